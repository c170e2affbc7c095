use crate::error::{NextverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for nextver.
///
/// Everything here is a default that CLI flags can override per run.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,
}

/// Defaults for the release pipeline.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ReleaseConfig {
    /// Fail on non-conventional commits instead of treating them as "other"
    #[serde(default)]
    pub strict: bool,

    /// Commits containing any of these substrings are ignored
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Mono-repo subdirectory to scope tags and commits to
    #[serde(default)]
    pub directory: Option<String>,
}

/// Loads configuration from file or returns defaults.
///
/// Load order:
/// 1. Custom path provided as parameter
/// 2. `nextver.toml` in the current directory
/// 3. `.nextver.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./nextver.toml").exists() {
        fs::read_to_string("./nextver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".nextver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| NextverError::config(format!("Invalid config file: {}", e)))?;
    Ok(config)
}
