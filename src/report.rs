use crate::error::ConvertError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

pub const METHOD: &str = "pdf2docx library conversion";
pub const FORMAT: &str = "High-quality PDF to DOCX conversion";
pub const PRESERVES: [&str; 4] = ["formatting", "tables", "images", "text structure"];

/// A page count that may not be known. Serializes as a number or `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTally {
    Count(i64),
    Unknown,
}

impl Serialize for PageTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageTally::Count(n) => serializer.serialize_i64(*n),
            PageTally::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

impl fmt::Display for PageTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTally::Count(n) => write!(f, "{n}"),
            PageTally::Unknown => f.write_str("Unknown"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_pages: PageTally,
    pub converted_pages: PageTally,
    pub format: String,
    pub preserves: Vec<String>,
}

impl Statistics {
    pub fn new(total_pages: PageTally, converted_pages: PageTally) -> Self {
        Self {
            total_pages,
            converted_pages,
            format: FORMAT.to_string(),
            preserves: PRESERVES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Outcome of one conversion run, printed as JSON or text.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ConversionReport {
    pub fn success(output: &Path, file_size: u64, statistics: Statistics) -> Self {
        Self {
            success: true,
            output_path: Some(output.display().to_string()),
            file_size: Some(file_size),
            method: Some(METHOD.to_string()),
            statistics: Some(statistics),
            error: None,
            code: None,
        }
    }

    pub fn failure(err: &ConvertError) -> Self {
        Self {
            success: false,
            output_path: None,
            file_size: None,
            method: None,
            statistics: None,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
        }
    }

    pub fn render_text(&self) -> String {
        let error = self.error.as_deref().unwrap_or_default();
        if !self.success {
            // Bad --pages is a usage error, not a failed conversion.
            if self.code.as_deref() == Some("INVALID_PAGES") {
                return format!("Error: {error}");
            }
            return format!("❌ Conversion failed: {error}");
        }

        let mut lines = vec![
            "✅ Conversion successful!".to_string(),
            format!("📄 Output: {}", self.output_path.as_deref().unwrap_or_default()),
            format!("📊 File size: {} bytes", self.file_size.unwrap_or_default()),
            format!("🔧 Method: {}", self.method.as_deref().unwrap_or_default()),
        ];
        if let Some(stats) = &self.statistics {
            lines.push(format!("📖 Pages: {}", stats.converted_pages));
            lines.push(format!("✨ Preserves: {}", stats.preserves.join(", ")));
        }
        lines.join("\n")
    }
}
