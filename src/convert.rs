use crate::{
    engine::{ConvertIn, Engine},
    error::ConvertError,
    pages::PageSelection,
    probe,
    report::{ConversionReport, PageTally, Statistics},
    util::ensure_parent_dir,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub selection: PageSelection,
}

/// Runs one conversion and folds every failure into the report.
pub fn convert_pdf_to_docx(engine: &dyn Engine, req: &ConvertRequest) -> ConversionReport {
    match try_convert(engine, req) {
        Ok(report) => report,
        Err(err) => {
            warn!(code = err.code(), "{err}");
            ConversionReport::failure(&err)
        }
    }
}

fn try_convert(engine: &dyn Engine, req: &ConvertRequest) -> Result<ConversionReport, ConvertError> {
    if !req.input.exists() {
        return Err(ConvertError::FileNotFound {
            path: req.input.clone(),
        });
    }
    warn_unless_pdf(&req.input);

    ensure_parent_dir(&req.output)?;

    info!(
        "converting {} -> {} selection={:?}",
        req.input.display(),
        req.output.display(),
        req.selection
    );
    let started = Instant::now();
    let out = engine.convert(&ConvertIn::new(&req.input, &req.output, &req.selection))?;
    if !out.ok {
        return Err(ConvertError::ConversionError {
            message: out
                .error
                .unwrap_or_else(|| "pdf2docx conversion failed".to_string()),
        });
    }
    info!("converter finished in {:?}", started.elapsed());

    let Ok(meta) = std::fs::metadata(&req.output) else {
        return Err(ConvertError::ConversionFailed);
    };

    let total_pages = match probe::page_count(&req.input) {
        Ok(n) => PageTally::Count(n.into()),
        Err(err) => {
            debug!("page count unavailable: {err:#}");
            PageTally::Unknown
        }
    };
    let converted_pages = req.selection.converted_pages(total_pages);

    Ok(ConversionReport::success(
        &req.output,
        meta.len(),
        Statistics::new(total_pages, converted_pages),
    ))
}

fn warn_unless_pdf(input: &Path) {
    match input.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => {}
        Some(_) => warn!("input is not a .pdf file: {}", input.display()),
        None => warn!("input has no extension; assuming PDF: {}", input.display()),
    }
}
