use pdf2docx_bridge::cli;
use tracing::error;

// Always exits 0: failures are part of the report.
fn main() {
    let args = cli::DoctorArgs::parse_lenient(std::env::args_os());
    if let Err(err) = cli::doctor(args) {
        error!("{:#}", err);
    }
}
