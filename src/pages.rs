use crate::{error::ConvertError, report::PageTally};

/// Which pages of the input the converter should process.
///
/// Page indices are 0-based. A range's `end` is exclusive, as the converter
/// treats it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    All,
    List(Vec<i64>),
    Range { start: i64, end: Option<i64> },
}

impl PageSelection {
    /// Builds a selection from the raw CLI options. An explicit page list wins
    /// over the start/end range; an empty list counts as absent.
    pub fn from_args(
        pages: Option<&str>,
        start: i64,
        end: Option<i64>,
    ) -> Result<Self, ConvertError> {
        if let Some(raw) = pages.filter(|p| !p.is_empty()) {
            return parse_page_list(raw).map(PageSelection::List);
        }
        if start != 0 || end.is_some() {
            Ok(PageSelection::Range { start, end })
        } else {
            Ok(PageSelection::All)
        }
    }

    /// Number of pages reported as converted. A range is not clamped to the
    /// document length.
    pub fn converted_pages(&self, total: PageTally) -> PageTally {
        match self {
            PageSelection::List(pages) => PageTally::Count(pages.len() as i64),
            PageSelection::Range {
                start,
                end: Some(end),
            } => PageTally::Count(end.saturating_sub(*start)),
            _ => total,
        }
    }
}

pub fn parse_page_list(raw: &str) -> Result<Vec<i64>, ConvertError> {
    raw.split(',')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConvertError::InvalidPages { raw: raw.to_string() })
}
