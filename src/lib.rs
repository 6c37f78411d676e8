// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod ranking;

// Re-export commonly used types
pub use crate::core::{
    BudgetOutcome, ClimatePlan, Company, ComparisonView, Emissions, Municipality,
    ReportingPeriod, SortDirection, SortKey,
};

pub use crate::metrics::{
    derive_reduction, format_reduction, rank_companies, top_companies, top_municipalities,
    RankedCompany, ReductionMetrics,
};

pub use crate::metrics::sector::{rank_sector_peers, SectorPeer, SectorRanking};

pub use crate::ranking::{filter_municipalities, sort_municipalities};

pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
