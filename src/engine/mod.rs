pub mod python;
pub mod types;

use crate::config::PythonPackage;
use anyhow::Result;

pub use types::{ConvertIn, ConvertOut, DoctorOut, ImportOut};

/// The external side that does the actual document work.
pub trait Engine {
    /// Human-readable name of the interpreter or backend, for reports.
    fn interpreter(&self) -> String;
    /// Writes the DOCX named in `req`. An exception inside the converter comes
    /// back as `ok == false`; `Err` means the converter could not be run.
    fn convert(&self, req: &ConvertIn) -> Result<ConvertOut>;
    fn doctor(&self, packages: &[PythonPackage]) -> Result<DoctorOut>;
}
