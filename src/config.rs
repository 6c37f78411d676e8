//! `.klimatrank.toml` configuration.
//!
//! The file is discovered by walking ancestor directories from the current
//! working directory, parsed once, and cached for the process lifetime. A
//! malformed file warns and falls back to defaults rather than failing the
//! run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::{Error, SortDirection, SortKey};

static CONFIG: OnceLock<KlimatrankConfig> = OnceLock::new();

/// Display settings for derived-metric presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Reductions beyond ±this render as ">N" / "<-N".
    #[serde(default = "default_clamp_percent")]
    pub clamp_percent: f64,

    /// Decimal places for unclamped values.
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clamp_percent: default_clamp_percent(),
            decimals: default_decimals(),
        }
    }
}

fn default_clamp_percent() -> f64 {
    200.0
}

fn default_decimals() -> usize {
    1
}

/// Defaults for the municipality ranking command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_sort_key")]
    pub default_sort: SortKey,

    #[serde(default = "default_direction")]
    pub default_direction: SortDirection,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort_key(),
            default_direction: default_direction(),
        }
    }
}

fn default_sort_key() -> SortKey {
    SortKey::Reduction
}

fn default_direction() -> SortDirection {
    SortDirection::Best
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KlimatrankConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub ranking: RankingConfig,
}

impl KlimatrankConfig {
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }
}

/// Parse config contents, reporting the toml error verbatim.
fn parse_config(contents: &str) -> Result<KlimatrankConfig, Error> {
    toml::from_str(contents).map_err(|e| Error::Configuration(format!("invalid .klimatrank.toml: {e}")))
}

fn try_load_config_from_path(config_path: &Path) -> Option<KlimatrankConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // "Not found" is the normal case while walking ancestors
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            None
        }
    }
}

fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration by searching the directory hierarchy.
pub fn load_config() -> KlimatrankConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {e}. Using default config.");
            return KlimatrankConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".klimatrank.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_default()
}

/// Get the cached configuration.
pub fn get_config() -> &'static KlimatrankConfig {
    CONFIG.get_or_init(load_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KlimatrankConfig::default();
        assert_eq!(config.display.clamp_percent, 200.0);
        assert_eq!(config.display.decimals, 1);
        assert_eq!(config.ranking.default_sort, SortKey::Reduction);
        assert_eq!(config.ranking.default_direction, SortDirection::Best);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [display]
            clamp_percent = 500.0

            [ranking]
            default_sort = "meets_paris"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.clamp_percent, 500.0);
        assert_eq!(config.display.decimals, 1);
        assert_eq!(config.ranking.default_sort, SortKey::MeetsParis);
        assert_eq!(config.ranking.default_direction, SortDirection::Best);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_config("display = nonsense").is_err());
    }

    #[test]
    fn test_try_load_from_missing_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_load_config_from_path(&dir.path().join(".klimatrank.toml")).is_none());
    }

    #[test]
    fn test_try_load_from_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".klimatrank.toml");
        fs::write(&path, "[display]\nclamp_percent = 300.0\n").unwrap();
        let config = try_load_config_from_path(&path).unwrap();
        assert_eq!(config.display.clamp_percent, 300.0);
    }

    #[test]
    fn test_directory_ancestors_bounded() {
        let paths: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(paths, [PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }
}
