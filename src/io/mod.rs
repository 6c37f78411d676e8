pub mod datasets;
pub mod output;

pub use datasets::{load_companies, load_municipalities};
pub use output::{create_writer, OutputFormat, ReportWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
