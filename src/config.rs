use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "pdf2docx.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub python: Python,
    #[serde(default)]
    pub convert: Convert,
    #[serde(default)]
    pub doctor: Doctor,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// Loads the explicit path if given, else `./pdf2docx.toml` when present,
    /// else the built-in defaults.
    pub fn resolve(user: Option<&Path>) -> Result<Self> {
        match resolve_config_path(user) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Python {
    /// `auto`, a bare command name, or a path to an interpreter.
    pub python_exe: String,
    /// Virtualenv probed when `python_exe = "auto"`.
    pub venv_dir: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}
impl Default for Python {
    fn default() -> Self {
        Self {
            python_exe: "auto".into(),
            venv_dir: "venv".into(),
            env: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convert {
    /// 0 disables the timeout.
    pub timeout_seconds: u64,
    pub keep_python_stderr: bool,
}
impl Default for Convert {
    fn default() -> Self {
        Self {
            timeout_seconds: 0,
            keep_python_stderr: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonPackage {
    /// Distribution name shown in reports.
    pub package: String,
    /// Module passed to `import`.
    pub module: String,
}

impl PythonPackage {
    pub fn new(package: &str, module: &str) -> Self {
        Self {
            package: package.into(),
            module: module.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub timeout_seconds: u64,
    pub packages: Vec<PythonPackage>,
}
impl Default for Doctor {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            packages: vec![
                PythonPackage::new("pdf2docx", "pdf2docx"),
                PythonPackage::new("PyPDF2", "PyPDF2"),
                PythonPackage::new("python-docx", "docx"),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    /// Empty means no log file.
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
            file_path: "".into(),
        }
    }
}
