//! The `municipalities` subcommand: filter, sort, render.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

use crate::core::{SortDirection, SortKey};
use crate::formatting::FormattingConfig;
use crate::io::output::{create_writer, MunicipalityReport, OutputFormat};
use crate::io::load_municipalities;
use crate::ranking::{sort_municipalities, MunicipalityFilter};

#[derive(Debug, Clone)]
pub struct MunicipalitiesConfig {
    pub path: PathBuf,
    pub sort_by: Option<SortKey>,
    pub direction: Option<SortDirection>,
    pub region: Option<String>,
    pub search: Option<String>,
    pub top: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

pub fn rank_municipalities_command(config: MunicipalitiesConfig) -> Result<()> {
    let defaults = crate::config::get_config().ranking();
    let sort_key = config.sort_by.unwrap_or(defaults.default_sort);
    let direction = config.direction.unwrap_or(defaults.default_direction);

    let records = load_municipalities(&config.path)?;
    let total_records = records.len();

    let filter = MunicipalityFilter::new(config.region.clone(), config.search.clone());
    let filtered = filter.apply(&records);
    let mut sorted = sort_municipalities(&filtered, sort_key, direction);
    if let Some(top) = config.top {
        sorted.truncate(top);
    }
    log::debug!(
        "Ranked {} of {} municipalities by {:?}/{:?}",
        sorted.len(),
        total_records,
        sort_key,
        direction
    );

    let report = MunicipalityReport {
        generated_at: Utc::now(),
        sort_key,
        direction,
        region: config.region,
        search: config.search,
        total_records,
        municipalities: sorted,
    };

    let destination = super::open_destination(config.output.as_deref())?;
    let mut writer = create_writer(destination, config.format, config.formatting);
    writer.write_municipalities(&report)
}
