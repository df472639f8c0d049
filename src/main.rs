use anyhow::Result;
use clap::Parser;
use pdf2docx_bridge::cli;
use tracing::error;

fn main() -> Result<()> {
    let args = cli::ConvertArgs::parse();
    match cli::convert(args) {
        Ok(report) if report.success => Ok(()),
        Ok(_) => std::process::exit(1),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(1);
        }
    }
}
