//! Configuration loading
//!
//! Resolution order for the TOML file:
//! 1. Explicit path argument (highest priority)
//! 2. `SONGMAP_CONFIG` environment variable
//! 3. `<config dir>/songmap/config.toml`
//! 4. Compiled defaults (fallback)
//!
//! A missing file is not an error: a warning is logged and defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "SONGMAP_CONFIG";

/// Environment variable overriding `mapper.workers`
pub const WORKERS_ENV_VAR: &str = "SONGMAP_WORKERS";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub logging: LoggingConfig,
    pub mapper: MapperConfig,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Reconciliation section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Concurrent songs in a batch (1 = sequential)
    pub workers: usize,
    /// Candidates listed per song in diagnostics
    pub max_display: usize,
    pub thresholds: MatchThresholds,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            max_display: 5,
            thresholds: MatchThresholds::default(),
        }
    }
}

impl MapperConfig {
    /// Reject values the mapper cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("mapper.workers must be at least 1".to_string()));
        }
        if self.max_display == 0 {
            return Err(Error::Config("mapper.max_display must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.thresholds.name_ratio) {
            return Err(Error::Config(format!(
                "mapper.thresholds.name_ratio must be within [0, 1], got {}",
                self.thresholds.name_ratio
            )));
        }
        Ok(())
    }
}

/// Candidate classification constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Names match when their similarity ratio is strictly above this
    pub name_ratio: f64,
    /// Durations match when they differ by strictly less than this
    pub duration_tolerance_secs: u32,
    /// Largest similar set promoted to identical when the source has no duration
    pub promotion_limit: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            name_ratio: 0.8,
            duration_tolerance_secs: 3,
            promotion_limit: 2,
        }
    }
}

/// Parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Serialize a config to a TOML file, creating parent directories
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Default config file location for the platform, if one can be determined
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songmap").join("config.toml"))
}

/// Load configuration following the resolution order.
///
/// An explicitly requested file (argument or environment variable) must exist
/// and parse. The platform default file is optional.
pub fn load_config(cli_path: Option<&Path>) -> Result<TomlConfig> {
    let explicit = cli_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let mut config = match explicit {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            read_toml_config(&path)?
        }
        None => match default_config_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading configuration");
                read_toml_config(&path)?
            }
            _ => {
                warn!("No configuration file found, using defaults");
                TomlConfig::default()
            }
        },
    };

    apply_env_overrides(&mut config);
    config.mapper.validate()?;
    Ok(config)
}

fn apply_env_overrides(config: &mut TomlConfig) {
    let Ok(raw) = std::env::var(WORKERS_ENV_VAR) else {
        return;
    };
    match raw.trim().parse::<usize>() {
        Ok(workers) if workers > 0 => {
            info!(workers, "Worker count overridden from environment");
            config.mapper.workers = workers;
        }
        _ => warn!(value = %raw, "Ignoring invalid {}", WORKERS_ENV_VAR),
    }
}
