use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::{ComparisonView, SortDirection, SortKey};

#[derive(Parser, Debug)]
#[command(name = "klimatrank")]
#[command(about = "Ranking and comparison engine for emissions data", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank municipalities from a dataset snapshot
    Municipalities {
        /// Path to the municipality dataset (JSON array)
        path: PathBuf,

        /// Sort key (defaults to the configured default)
        #[arg(short = 's', long = "sort-by", value_enum)]
        sort_by: Option<SortKey>,

        /// Sort direction
        #[arg(short = 'd', long, value_enum)]
        direction: Option<SortDirection>,

        /// Keep only municipalities in this region
        #[arg(long)]
        region: Option<String>,

        /// Comma-separated name search terms (OR-matched substrings)
        #[arg(long)]
        search: Option<String>,

        /// Show only the top N municipalities
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Plain output: no colors
        #[arg(long)]
        plain: bool,
    },

    /// Rank companies by emissions reduction
    Companies {
        /// Path to the company dataset (JSON array)
        path: PathBuf,

        /// Show only the top N companies
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Plain output: no colors
        #[arg(long)]
        plain: bool,
    },

    /// Compare a company against its sector peers
    Sector {
        /// Path to the company dataset (JSON array)
        path: PathBuf,

        /// Wikidata id of the target company
        #[arg(short, long)]
        company: String,

        /// Comparison view
        #[arg(long, value_enum, default_value = "emissions")]
        view: ComparisonView,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Plain output: no colors
        #[arg(long)]
        plain: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
