//! # Configuration Loader
//!
//! Reads the TOML file and maps it onto the [`AppConfig`] DTO. Pure data
//! loading: empty strings and zeros are accepted as they are written, and
//! deciding what they mean is left to wiring.

use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;
use ts_core::config::AppConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "TEMPSYNC_CONFIG";

const CONFIG_DIR_NAME: &str = "tempsync";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    Ok(AppConfig::from_toml(&toml_value))
}

/// `$TEMPSYNC_CONFIG` when set, otherwise `<config dir>/tempsync/config.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
    }
}

/// Load from the resolved path. A missing file yields an empty config; an
/// unreadable or malformed one is an error.
pub fn load_config_or_default(config_path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    match config_path {
        Some(path) if path.exists() => load_config(path),
        Some(path) => {
            debug!(path = %path.display(), "config file not found, using empty config");
            Ok(AppConfig::empty())
        }
        None => Ok(AppConfig::empty()),
    }
}
