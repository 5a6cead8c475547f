//! Settings for the `bsonfilter` tool.
//!
//! Precedence: explicit `--config` file > `BSONFILTER_CONFIG` > user config dir >
//! `./bsonfilter.toml` > environment overrides > defaults. The first source that sets a
//! field wins; command-line flags are applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::render::OutputFormat;

pub const CONFIG_FILE_NAME: &str = "bsonfilter.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_format: Option<OutputFormat>,
    pub default_collection: Option<String>,
    pub log_config: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<usize>,
}

impl AppConfig {
    /// Fills every unset field from `other`.
    pub fn merge(&mut self, other: Self) {
        if self.output_format.is_none() {
            self.output_format = other.output_format;
        }
        if self.default_collection.is_none() {
            self.default_collection = other.default_collection;
        }
        if self.log_config.is_none() {
            self.log_config = other.log_config;
        }
        if self.log_dir.is_none() {
            self.log_dir = other.log_dir;
        }
        if self.log_level.is_none() {
            self.log_level = other.log_level;
        }
        if self.log_retention.is_none() {
            self.log_retention = other.log_retention;
        }
    }

    /// Fills unset fields from environment-style lookups.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        use clap::ValueEnum;
        if self.output_format.is_none() {
            self.output_format =
                lookup("BSONFILTER_FORMAT").and_then(|s| OutputFormat::from_str(&s, true).ok());
        }
        if self.default_collection.is_none() {
            self.default_collection = lookup("BSONFILTER_COLLECTION");
        }
        if self.log_config.is_none() {
            self.log_config = lookup("BSONFILTER_LOG_CONFIG").map(PathBuf::from);
        }
    }

    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Candidate config files, highest precedence first.
#[must_use]
pub fn config_search_paths(cli_cfg: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = cli_cfg {
        paths.push(p.to_path_buf());
    }
    if let Ok(p) = std::env::var("BSONFILTER_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join(CONFIG_FILE_NAME));
    }
    paths
}

/// Reads one config file.
///
/// # Errors
/// Returns [`ConfigError`] if the file cannot be read or is not valid TOML.
pub fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

/// Merges every existing file in `paths`; missing files are skipped.
///
/// # Errors
/// Returns the first read or parse failure of a file that exists.
pub fn load_config_from(paths: &[PathBuf]) -> Result<AppConfig, ConfigError> {
    let mut cfg = AppConfig::default();
    for p in paths.iter().filter(|p| p.exists()) {
        let file_cfg = read_config_file(p)?;
        log::debug!("loaded config from {}", p.display());
        cfg.merge(file_cfg);
    }
    Ok(cfg)
}

/// Resolves the full configuration for the tool.
///
/// # Errors
/// See [`load_config_from`].
pub fn load_config(cli_cfg: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut cfg = load_config_from(&config_search_paths(cli_cfg))?;
    cfg.apply_env(|k| std::env::var(k).ok());
    Ok(cfg)
}
