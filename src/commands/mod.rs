//! CLI command implementations.
//!
//! Each submodule implements one subcommand: a plain config struct built by
//! `main`, a handler that loads the dataset, runs the pure transformation
//! layer, and hands the resulting report to a writer.

pub mod companies;
pub mod init;
pub mod municipalities;
pub mod sector;

pub use companies::{rank_companies_command, CompaniesConfig};
pub use init::init_config;
pub use municipalities::{rank_municipalities_command, MunicipalitiesConfig};
pub use sector::{compare_sector_command, SectorConfig};

use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Open the report destination: a file when requested, stdout otherwise.
pub(crate) fn open_destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    })
}
