//! Report rendering.
//!
//! Each command produces a report struct that one of three writers renders:
//! JSON (machine-readable, serde), Markdown (pipe tables), or Terminal
//! (comfy-table with optional color). Writers never reorder report entries;
//! ordering is fixed by the ranking layer.

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets, Cell, Color, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::core::{ComparisonView, Municipality, SortDirection, SortKey};
use crate::formatting::{signed_percent, FormattingConfig};
use crate::metrics::sector::{SectorPeer, SectorRanking};
use crate::metrics::RankedCompany;

/// Ranked municipality list with the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityReport {
    pub generated_at: DateTime<Utc>,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Dataset size before filtering.
    pub total_records: usize,
    pub municipalities: Vec<Municipality>,
}

/// Companies ranked by emissions reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyReport {
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub companies: Vec<RankedCompany>,
}

/// Sector peer comparison for one target company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorReport {
    pub generated_at: DateTime<Utc>,
    pub view: ComparisonView,
    pub ranking: SectorRanking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait ReportWriter {
    fn write_municipalities(&mut self, report: &MunicipalityReport) -> Result<()>;
    fn write_companies(&mut self, report: &CompanyReport) -> Result<()>;
    fn write_sector(&mut self, report: &SectorReport) -> Result<()>;
}

/// Build a writer for the requested format.
pub fn create_writer(
    writer: Box<dyn Write>,
    format: OutputFormat,
    formatting: FormattingConfig,
) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

// --- JSON ----------------------------------------------------------------

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_municipalities(&mut self, report: &MunicipalityReport) -> Result<()> {
        self.write_json(report)
    }

    fn write_companies(&mut self, report: &CompanyReport) -> Result<()> {
        self.write_json(report)
    }

    fn write_sector(&mut self, report: &SectorReport) -> Result<()> {
        self.write_json(report)
    }
}

// --- Markdown --------------------------------------------------------------

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, title: &str, generated_at: DateTime<Utc>) -> Result<()> {
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_municipalities(&mut self, report: &MunicipalityReport) -> Result<()> {
        self.write_header("Municipality Ranking", report.generated_at)?;
        writeln!(
            self.writer,
            "Sorted by {} ({} first); {} of {} municipalities shown.",
            report.sort_key.display_name(),
            direction_label(report.direction),
            report.municipalities.len(),
            report.total_records,
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| # | Municipality | Region | Change | Needed | Consumption | EV/CP | Plan | Budget |"
        )?;
        writeln!(
            self.writer,
            "|---|--------------|--------|--------|--------|-------------|-------|------|--------|"
        )?;
        for (index, m) in report.municipalities.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {:.1}% | {:.1} | {:.1} | {} | {} |",
                index + 1,
                m.name,
                m.region,
                signed_percent(m.historical_emission_change_percent),
                m.needed_emission_change_percent,
                m.total_consumption_emission,
                m.electric_vehicle_per_charge_points,
                m.climate_plan,
                m.budget_outcome,
            )?;
        }
        Ok(())
    }

    fn write_companies(&mut self, report: &CompanyReport) -> Result<()> {
        self.write_header("Company Emission Reductions", report.generated_at)?;
        writeln!(self.writer, "| Rank | Company | Reduction |")?;
        writeln!(self.writer, "|------|---------|-----------|")?;
        for company in &report.companies {
            writeln!(
                self.writer,
                "| {} | {} | {}% |",
                company.rank, company.name, company.metrics.display_reduction,
            )?;
        }
        Ok(())
    }

    fn write_sector(&mut self, report: &SectorReport) -> Result<()> {
        self.write_header("Sector Comparison", report.generated_at)?;
        writeln!(
            self.writer,
            "Sector {}: rank {} of {} companies.",
            report.ranking.sector_code,
            report.ranking.target_rank,
            report.ranking.peers.len(),
        )?;
        writeln!(self.writer)?;
        match report.view {
            ComparisonView::Emissions => {
                writeln!(self.writer, "| Rank | Company | Reduction |")?;
                writeln!(self.writer, "|------|---------|-----------|")?;
                for peer in &report.ranking.peers {
                    writeln!(
                        self.writer,
                        "| {} | {} | {}% |",
                        peer.rank,
                        markdown_peer_name(peer),
                        peer.metrics.display_reduction,
                    )?;
                }
            }
            ComparisonView::Reporting => {
                writeln!(self.writer, "| Company | Reported years |")?;
                writeln!(self.writer, "|---------|----------------|")?;
                for peer in &report.ranking.peers {
                    writeln!(
                        self.writer,
                        "| {} | {} |",
                        markdown_peer_name(peer),
                        join_numbers(&peer.reporting_years),
                    )?;
                }
            }
            ComparisonView::Scope3 => {
                writeln!(self.writer, "| Company | Scope 3 categories |")?;
                writeln!(self.writer, "|---------|--------------------|")?;
                for peer in &report.ranking.peers {
                    writeln!(
                        self.writer,
                        "| {} | {} |",
                        markdown_peer_name(peer),
                        join_numbers(&peer.reported_categories),
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn markdown_peer_name(peer: &SectorPeer) -> String {
    if peer.is_target {
        format!("**{}**", peer.name)
    } else {
        peer.name.clone()
    }
}

fn join_numbers<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Best => "best",
        SortDirection::Worst => "worst",
    }
}

// --- Terminal --------------------------------------------------------------

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatting: FormattingConfig,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self { writer, formatting }
    }

    fn use_color(&self) -> bool {
        self.formatting.color.should_use_color()
    }

    fn heading(&self, text: &str) -> String {
        if self.use_color() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// A reduction cell: falling emissions render green, rising red.
    fn change_cell(&self, change_percent: f64) -> Cell {
        let cell = Cell::new(signed_percent(change_percent));
        if !self.use_color() {
            return cell;
        }
        if change_percent > 0.0 {
            cell.fg(Color::Red)
        } else {
            cell.fg(Color::Green)
        }
    }

    /// A derived-reduction cell: positive reduction is an improvement.
    fn reduction_cell(&self, value: f64, display: &str) -> Cell {
        let sign = if value > 0.0 { "+" } else { "" };
        let cell = Cell::new(format!("{sign}{display}%"));
        if !self.use_color() {
            return cell;
        }
        if value >= 0.0 {
            cell.fg(Color::Green)
        } else {
            cell.fg(Color::Red)
        }
    }

    fn new_table(&self, header: Vec<&str>) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_BORDERS_ONLY);
        table.set_header(header);
        table
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_municipalities(&mut self, report: &MunicipalityReport) -> Result<()> {
        let title = format!(
            "Municipalities by {} ({} first)",
            report.sort_key.display_name(),
            direction_label(report.direction)
        );
        writeln!(self.writer, "{}", self.heading(&title))?;
        writeln!(
            self.writer,
            "{} of {} municipalities",
            report.municipalities.len(),
            report.total_records
        )?;
        writeln!(self.writer)?;

        let mut table = self.new_table(vec![
            "#", "Municipality", "Region", "Change", "Needed", "Consumption", "EV/CP", "Plan",
            "Budget",
        ]);
        for (index, m) in report.municipalities.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(&m.name),
                Cell::new(&m.region),
                self.change_cell(m.historical_emission_change_percent),
                Cell::new(format!("{:.1}%", m.needed_emission_change_percent)),
                Cell::new(format!("{:.1}", m.total_consumption_emission)),
                Cell::new(format!("{:.1}", m.electric_vehicle_per_charge_points)),
                Cell::new(m.climate_plan.to_string()),
                Cell::new(m.budget_outcome.to_string()),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_companies(&mut self, report: &CompanyReport) -> Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.heading("Companies by emissions reduction")
        )?;
        writeln!(
            self.writer,
            "{} of {} companies",
            report.companies.len(),
            report.total_records
        )?;
        writeln!(self.writer)?;

        let mut table = self.new_table(vec!["Rank", "Company", "Reduction"]);
        for company in &report.companies {
            table.add_row(vec![
                Cell::new(company.rank),
                Cell::new(&company.name),
                self.reduction_cell(
                    company.metrics.emissions_reduction,
                    &company.metrics.display_reduction,
                ),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_sector(&mut self, report: &SectorReport) -> Result<()> {
        let ranking = &report.ranking;
        writeln!(
            self.writer,
            "{}",
            self.heading(&format!("Sector {} comparison", ranking.sector_code))
        )?;
        writeln!(
            self.writer,
            "Rank {} of {} companies in the sector",
            ranking.target_rank,
            ranking.peers.len()
        )?;
        writeln!(self.writer)?;

        let table = match report.view {
            ComparisonView::Emissions => {
                let mut table = self.new_table(vec!["Rank", "Company", "Reduction"]);
                for peer in &ranking.peers {
                    table.add_row(vec![
                        Cell::new(peer.rank),
                        self.peer_name_cell(peer),
                        self.reduction_cell(
                            peer.metrics.emissions_reduction,
                            &peer.metrics.display_reduction,
                        ),
                    ]);
                }
                table
            }
            ComparisonView::Reporting => {
                let mut table = self.new_table(vec!["Company", "Reported years"]);
                for peer in &ranking.peers {
                    table.add_row(vec![
                        self.peer_name_cell(peer),
                        Cell::new(join_numbers(&peer.reporting_years)),
                    ]);
                }
                table
            }
            ComparisonView::Scope3 => {
                let mut table = self.new_table(vec!["Company", "Scope 3 categories"]);
                for peer in &ranking.peers {
                    table.add_row(vec![
                        self.peer_name_cell(peer),
                        Cell::new(join_numbers(&peer.reported_categories)),
                    ]);
                }
                table
            }
        };
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn peer_name_cell(&self, peer: &SectorPeer) -> Cell {
        let cell = Cell::new(&peer.name);
        if peer.is_target && self.use_color() {
            cell.fg(Color::Cyan)
        } else {
            cell
        }
    }
}
