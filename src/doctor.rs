use crate::{config::PythonPackage, engine::Engine};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub python_exe: String,
    pub python_version: String,
    pub imports: Vec<ImportStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportStatus {
    pub package: String,
    /// `OK` or `FAILED: <reason>`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ImportStatus {
    pub fn ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Checks that every package imports. Never fails: an interpreter that cannot
/// be run marks every package as failed.
pub fn check_imports(engine: &dyn Engine, packages: &[PythonPackage]) -> DoctorReport {
    let python_exe = engine.interpreter();
    match engine.doctor(packages) {
        Ok(out) => DoctorReport {
            python_exe,
            python_version: out.python_version,
            imports: out
                .imports
                .into_iter()
                .map(|imp| {
                    if imp.ok {
                        ImportStatus {
                            package: imp.package,
                            status: "OK".into(),
                            version: Some(imp.version.unwrap_or_else(|| "unknown".into())),
                        }
                    } else {
                        ImportStatus {
                            package: imp.package,
                            status: format!("FAILED: {}", imp.error.unwrap_or_default()),
                            version: None,
                        }
                    }
                })
                .collect(),
        },
        Err(err) => {
            warn!("import check could not run: {err:#}");
            DoctorReport {
                python_exe,
                python_version: "unavailable".into(),
                imports: packages
                    .iter()
                    .map(|p| ImportStatus {
                        package: p.package.clone(),
                        status: format!("FAILED: {err:#}"),
                        version: None,
                    })
                    .collect(),
            }
        }
    }
}

impl DoctorReport {
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            "🐍 Python Test Results:".to_string(),
            format!("Python: {}", self.python_version),
            String::new(),
            "Imports:".to_string(),
        ];
        for imp in &self.imports {
            match (&imp.version, imp.ok()) {
                (Some(v), true) => lines.push(format!("✅ {}: {} ({v})", imp.package, imp.status)),
                (None, true) => lines.push(format!("✅ {}: {}", imp.package, imp.status)),
                _ => lines.push(format!("❌ {}: {}", imp.package, imp.status)),
            }
        }
        lines.join("\n")
    }
}
