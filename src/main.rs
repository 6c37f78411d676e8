use anyhow::Result;
use clap::Parser;
use klimatrank::cli::{Cli, Commands};
use klimatrank::commands::{
    compare_sector_command, init_config, rank_companies_command, rank_municipalities_command,
    CompaniesConfig, MunicipalitiesConfig, SectorConfig,
};
use klimatrank::formatting::FormattingConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Municipalities {
            path,
            sort_by,
            direction,
            region,
            search,
            top,
            format,
            output,
            plain,
        } => rank_municipalities_command(MunicipalitiesConfig {
            path,
            sort_by,
            direction,
            region,
            search,
            top,
            format: format.into(),
            output,
            formatting: formatting_config(plain),
        }),
        Commands::Companies {
            path,
            top,
            format,
            output,
            plain,
        } => rank_companies_command(CompaniesConfig {
            path,
            top,
            format: format.into(),
            output,
            formatting: formatting_config(plain),
        }),
        Commands::Sector {
            path,
            company,
            view,
            format,
            output,
            plain,
        } => compare_sector_command(SectorConfig {
            path,
            company,
            view,
            format: format.into(),
            output,
            formatting: formatting_config(plain),
        }),
        Commands::Init { force } => init_config(force),
    }
}

/// RUST_LOG still wins; -v flags only raise the default filter.
fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
