use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".klimatrank.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Klimatrank Configuration

[display]
# Reductions beyond +/- this render as ">N" / "<-N"
clamp_percent = 200.0
decimals = 1

[ranking]
default_sort = "reduction"
default_direction = "best"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .klimatrank.toml configuration file");

    Ok(())
}
