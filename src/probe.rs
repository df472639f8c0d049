use anyhow::{Context, Result};
use std::path::Path;

/// Counts the pages in the PDF's page tree.
pub fn page_count(input: &Path) -> Result<u32> {
    let doc = lopdf::Document::load(input)
        .with_context(|| format!("loading PDF: {}", input.display()))?;
    Ok(doc.get_pages().len() as u32)
}
