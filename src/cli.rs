use crate::{
    config::{Config, Logging},
    convert::{ConvertRequest, convert_pdf_to_docx},
    doctor::{DoctorReport, check_imports},
    engine::python::PythonEngine,
    error::ConvertError,
    pages::PageSelection,
    report::ConversionReport,
    util::ensure_parent_dir,
};
use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind};
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pdf2docx")]
#[command(about = "Convert PDF to DOCX using pdf2docx")]
pub struct ConvertArgs {
    /// Input PDF file path
    pub input: PathBuf,

    /// Output DOCX file path
    pub output: PathBuf,

    /// Specific pages to convert (comma-separated, 0-indexed)
    #[arg(long)]
    pub pages: Option<String>,

    /// Start page (0-indexed)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub start: i64,

    /// End page (exclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub end: Option<i64>,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(name = "pdf2docx-doctor")]
#[command(about = "Check that the Python conversion libraries can be imported")]
pub struct DoctorArgs {
    /// Output result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(clap::Args, Debug, Default)]
pub struct CommonArgs {
    /// Path to config TOML. If omitted, uses ./pdf2docx.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Runs the conversion command and prints its report. The caller maps
/// `success == false` to exit code 1. A config that fails to load becomes a
/// `CONVERSION_ERROR` report so `--json` still prints a result.
pub fn convert(args: ConvertArgs) -> Result<ConversionReport> {
    let (cfg, cfg_err) = load_config(args.common.config.as_deref());
    let _guard = init_logging(args.common.log_level.as_deref(), &cfg.logging);

    let report = if let Some(err) = cfg_err {
        error!("{:#}", err);
        ConversionReport::failure(&ConvertError::from(err))
    } else {
        match PageSelection::from_args(args.pages.as_deref(), args.start, args.end) {
            Ok(selection) => {
                let engine = PythonEngine::new(&cfg);
                let req = ConvertRequest {
                    input: args.input,
                    output: args.output,
                    selection,
                };
                convert_pdf_to_docx(&engine, &req)
            }
            Err(err) => {
                debug!("rejecting --pages {:?}", args.pages);
                ConversionReport::failure(&err)
            }
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render_text());
    }
    Ok(report)
}

impl DoctorArgs {
    /// Like `parse_from`, but unknown or malformed arguments fall back to the
    /// defaults (with `--json` honored if present) instead of exiting.
    /// `--help` and `--version` still print and exit.
    pub fn parse_lenient<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        match Self::try_parse_from(argv.iter().cloned()) {
            Ok(args) => args,
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                err.exit()
            }
            Err(_) => Self {
                json: argv.iter().skip(1).any(|a| a == "--json"),
                common: CommonArgs::default(),
            },
        }
    }
}

/// Never fails on setup: a bad config falls back to the defaults so the
/// report is always printed.
pub fn doctor(args: DoctorArgs) -> Result<DoctorReport> {
    let (cfg, cfg_err) = load_config(args.common.config.as_deref());
    let _guard = init_logging(args.common.log_level.as_deref(), &cfg.logging);
    if let Some(err) = cfg_err {
        error!("{:#}; using default config", err);
    }

    let engine = PythonEngine::new(&cfg);
    let report = check_imports(&engine, &cfg.doctor.packages);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render_text());
    }
    Ok(report)
}

fn load_config(path: Option<&Path>) -> (Config, Option<anyhow::Error>) {
    match Config::resolve(path) {
        Ok(cfg) => (cfg, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

/// Logs go to stderr so stdout stays a clean report. A log file that cannot
/// be created is reported and skipped. A second call in the same process
/// keeps the first subscriber.
fn init_logging(level: Option<&str>, cfg: &Logging) -> Option<WorkerGuard> {
    let level = level.unwrap_or(cfg.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = if cfg.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file, file_err) = if cfg.file_path.is_empty() {
        (None, None)
    } else {
        match open_log_file(Path::new(&cfg.file_path)) {
            Ok(file) => (Some(file), None),
            Err(err) => (None, Some(err)),
        }
    };
    let (file_layer, guard) = match file {
        Some(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        debug!("logging already initialised: {err}");
    }
    if let Some(err) = file_err {
        error!("{:#}; logging to stderr only", err);
    }

    guard
}

fn open_log_file(path: &Path) -> Result<File> {
    ensure_parent_dir(path)?;
    File::create(path).with_context(|| format!("create log file: {}", path.display()))
}
