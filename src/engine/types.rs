use crate::pages::PageSelection;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertIn {
    pub input_pdf: String,
    pub output_docx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<i64>>,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
}

impl ConvertIn {
    pub fn new(input: &Path, output: &Path, selection: &PageSelection) -> Self {
        let (pages, start, end) = match selection {
            PageSelection::All => (None, None, None),
            PageSelection::List(pages) => (Some(pages.clone()), None, None),
            PageSelection::Range { start, end } => (None, Some(*start), *end),
        };
        Self {
            input_pdf: input.display().to_string(),
            output_docx: output.display().to_string(),
            pages,
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOut {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorOut {
    pub python_version: String,
    pub imports: Vec<ImportOut>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOut {
    pub package: String,
    pub ok: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
