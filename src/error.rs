use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the user through the result record.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid pages format. Use comma-separated numbers.")]
    InvalidPages { raw: String },

    /// The converter returned without error but left no output behind.
    #[error("Output file was not created")]
    ConversionFailed,

    #[error("{message}")]
    ConversionError { message: String },
}

impl ConvertError {
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ConvertError::InvalidPages { .. } => "INVALID_PAGES",
            ConvertError::ConversionFailed => "CONVERSION_FAILED",
            ConvertError::ConversionError { .. } => "CONVERSION_ERROR",
        }
    }
}

impl From<anyhow::Error> for ConvertError {
    fn from(err: anyhow::Error) -> Self {
        ConvertError::ConversionError {
            message: format!("{err:#}"),
        }
    }
}
