//! The `companies` subcommand: derive reductions, rank, render.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

use crate::formatting::FormattingConfig;
use crate::io::load_companies;
use crate::io::output::{create_writer, CompanyReport, OutputFormat};
use crate::metrics::rank_companies;

#[derive(Debug, Clone)]
pub struct CompaniesConfig {
    pub path: PathBuf,
    pub top: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

pub fn rank_companies_command(config: CompaniesConfig) -> Result<()> {
    let records = load_companies(&config.path)?;
    let total_records = records.len();

    let mut ranked = rank_companies(&records);
    if let Some(top) = config.top {
        ranked.truncate(top);
    }
    log::debug!("Ranked {} of {} companies", ranked.len(), total_records);

    let report = CompanyReport {
        generated_at: Utc::now(),
        total_records,
        companies: ranked,
    };

    let destination = super::open_destination(config.output.as_deref())?;
    let mut writer = create_writer(destination, config.format, config.formatting);
    writer.write_companies(&report)
}
