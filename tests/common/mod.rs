#![allow(dead_code)]

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};
use std::process::Command;

const STUB_PDF2DOCX: &str = r#"import json

__version__ = "0.0-stub"


class Converter:
    def __init__(self, pdf_file):
        self.pdf_file = pdf_file

    def convert(self, docx_filename, start=0, end=None, pages=None):
        print("Parsing pages ...")
        if pages and 99 in pages:
            raise ValueError("bad page 99")
        with open(docx_filename, "w") as f:
            json.dump({"start": start, "end": end, "pages": pages}, f)

    def close(self):
        pass
"#;

pub fn write_pdf(path: &Path, pages: u32) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
            }))
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save pdf");
}

pub fn python3_available() -> bool {
    Command::new("python3")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Writes a fake `pdf2docx` package that records its arguments as the
/// output file. Returns the directory to put on `PYTHONPATH`.
pub fn write_stub_pdf2docx(root: &Path) -> PathBuf {
    let stubs = root.join("stubs");
    std::fs::create_dir_all(stubs.join("pdf2docx")).unwrap();
    std::fs::write(stubs.join("pdf2docx").join("__init__.py"), STUB_PDF2DOCX).unwrap();
    stubs
}

/// A config that runs `python3` with the stub package importable.
pub fn stub_config_toml(stubs: &Path) -> String {
    format!(
        "[python]\npython_exe = \"python3\"\nvenv_dir = \"\"\n\n[python.env]\nPYTHONPATH = {:?}\n",
        stubs.display().to_string()
    )
}
