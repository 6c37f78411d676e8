//! The `sector` subcommand: peer comparison for one company.

use anyhow::{bail, Result};
use chrono::Utc;
use std::path::PathBuf;

use crate::core::{ComparisonView, Error};
use crate::formatting::FormattingConfig;
use crate::io::load_companies;
use crate::io::output::{create_writer, OutputFormat, SectorReport};
use crate::metrics::sector::rank_sector_peers;

#[derive(Debug, Clone)]
pub struct SectorConfig {
    pub path: PathBuf,
    pub company: String,
    pub view: ComparisonView,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

pub fn compare_sector_command(config: SectorConfig) -> Result<()> {
    let records = load_companies(&config.path)?;

    let target = records
        .iter()
        .find(|c| c.wikidata_id == config.company)
        .ok_or_else(|| {
            Error::Validation(format!(
                "no company with wikidata id {:?} in dataset",
                config.company
            ))
        })?;

    let Some(ranking) = rank_sector_peers(target, &records) else {
        // Absent sector code means no comparison, per the data contract;
        // as a CLI invocation it is still a user-visible dead end.
        bail!("company {} has no sector code; nothing to compare", target.name);
    };
    log::debug!(
        "Sector {}: {} peers, target rank {}",
        ranking.sector_code,
        ranking.peers.len(),
        ranking.target_rank
    );

    let report = SectorReport {
        generated_at: Utc::now(),
        view: config.view,
        ranking,
    };

    let destination = super::open_destination(config.output.as_deref())?;
    let mut writer = create_writer(destination, config.format, config.formatting);
    writer.write_sector(&report)
}
