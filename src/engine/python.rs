use super::{Engine, types::*};
use crate::config::{Config, PythonPackage};
use anyhow::{Context, Result, anyhow};
use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const CONVERT_SCRIPT: &str = include_str!("../../scripts/convert_docx.py");
const IMPORT_CHECK_SCRIPT: &str = include_str!("../../scripts/import_check.py");

pub const PYTHON_ENV_VAR: &str = "PDF2DOCX_PYTHON";

/// Runs the embedded helper scripts with a Python interpreter, one child
/// process per call, exchanging JSON over stdin/stdout.
pub struct PythonEngine {
    cfg: Config,
    python_exe: PathBuf,
    venv: Option<PathBuf>,
}

impl PythonEngine {
    pub fn new(cfg: &Config) -> Self {
        let (python_exe, venv) = resolve_python_exe(&cfg.python.python_exe, &cfg.python.venv_dir);
        debug!(
            "python interpreter {} venv={:?}",
            python_exe.display(),
            venv
        );
        Self {
            cfg: cfg.clone(),
            python_exe,
            venv,
        }
    }

    fn run_json<I: serde::Serialize, O: for<'de> serde::Deserialize<'de>>(
        &self,
        name: &str,
        script: &str,
        input: &I,
        timeout_seconds: Option<u64>,
    ) -> Result<O> {
        debug!("python run {name} timeout={:?}", timeout_seconds);
        let mut cmd = Command::new(&self.python_exe);
        cmd.arg("-c").arg(script);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        if let Some(venv) = &self.venv {
            cmd.env("VIRTUAL_ENV", venv);
            if let Some(path) = venv_path_var(venv) {
                cmd.env("PATH", path);
            }
        }
        for (k, v) in &self.cfg.python.env {
            cmd.env(k, v);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning python: {}", self.python_exe.display()))?;

        {
            let mut stdin = child.stdin.take().ok_or_else(|| anyhow!("no stdin"))?;
            let bytes = serde_json::to_vec(input)?;
            stdin.write_all(&bytes)?;
            stdin.flush().ok();
        }

        let output = if let Some(secs) = timeout_seconds {
            wait_with_timeout(&mut child, Duration::from_secs(secs))?
        } else {
            child
                .wait_with_output()
                .with_context(|| "waiting for python")?
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "python {name} helper failed ({}): {}",
                output.status,
                stderr.trim()
            ));
        }

        if self.cfg.convert.keep_python_stderr && !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("python stderr {name}: {}", stderr.trim());
        }

        let out: O = serde_json::from_slice(&output.stdout)
            .with_context(|| format!("parsing python JSON output: {name}"))?;
        Ok(out)
    }
}

/// Picks the interpreter. Returns the venv root when the interpreter came
/// from a local virtualenv so the child can run with it activated.
fn resolve_python_exe(raw: &str, venv_dir: &str) -> (PathBuf, Option<PathBuf>) {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("auto") {
        if let Ok(env_val) = std::env::var(PYTHON_ENV_VAR) {
            let p = expand_tilde(&env_val);
            if p.exists() {
                return (p, None);
            }
        }
        if !venv_dir.is_empty() {
            let venv = expand_tilde(venv_dir);
            let exe = venv_python(&venv);
            if exe.exists() {
                let venv = venv.canonicalize().unwrap_or(venv);
                return (venv_python(&venv), Some(venv));
            }
        }
        return (PathBuf::from("python3"), None);
    }
    (expand_tilde(raw), None)
}

fn venv_bin(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}

fn venv_python(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_bin(venv).join("python.exe")
    } else {
        venv_bin(venv).join("python")
    }
}

fn venv_path_var(venv: &Path) -> Option<OsString> {
    let mut paths = vec![venv_bin(venv)];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).ok()
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

fn timeout_of(secs: u64) -> Option<u64> {
    (secs > 0).then_some(secs)
}

impl Engine for PythonEngine {
    fn interpreter(&self) -> String {
        self.python_exe.display().to_string()
    }

    fn convert(&self, req: &ConvertIn) -> Result<ConvertOut> {
        let out: ConvertOut = self.run_json(
            "convert",
            CONVERT_SCRIPT,
            req,
            timeout_of(self.cfg.convert.timeout_seconds),
        )?;
        if !out.ok {
            warn!("pdf2docx returned ok=false for {}", req.input_pdf);
        }
        Ok(out)
    }

    fn doctor(&self, packages: &[PythonPackage]) -> Result<DoctorOut> {
        self.run_json(
            "import_check",
            IMPORT_CHECK_SCRIPT,
            &serde_json::json!({ "packages": packages }),
            timeout_of(self.cfg.doctor.timeout_seconds),
        )
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Output> {
    // Drain pipes while waiting so a chatty converter can't block on a full
    // stdout/stderr buffer.
    let stdout_reader = child.stdout.take();
    let stderr_reader = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_reader {
            out.read_to_end(&mut buf).with_context(|| "read stdout")?;
        }
        Ok(buf)
    });

    let stderr_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_reader {
            err.read_to_end(&mut buf).with_context(|| "read stderr")?;
        }
        Ok(buf)
    });

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().with_context(|| "try_wait")? {
            let stdout = stdout_thread
                .join()
                .map_err(|_| anyhow!("stdout reader thread panicked"))??;
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Ok(Output {
                status,
                stdout,
                stderr,
            });
        }

        if start.elapsed() > timeout {
            warn!("python process timed out after {:?}", timeout);
            let _ = child.kill();
            child.wait().with_context(|| "wait after kill")?;
            let _ = stdout_thread.join();
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Err(anyhow!(
                "python process exceeded timeout ({:?}); stderr: {}",
                timeout,
                String::from_utf8_lossy(&stderr).trim()
            ));
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}
