//! Application configuration.
//!
//! Settings come from `config.toml` in the platform data directory (or the
//! file named by `OCTOFIT_CONFIG`), then `OCTOFIT_HOST`, `OCTOFIT_PORT` and
//! `OCTOFIT_DB_PATH` override individual values.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

pub const CONFIG_PATH_VAR: &str = "OCTOFIT_CONFIG";
pub const HOST_VAR: &str = "OCTOFIT_HOST";
pub const PORT_VAR: &str = "OCTOFIT_PORT";
pub const DB_PATH_VAR: &str = "OCTOFIT_DB_PATH";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Storage settings
    pub database: DatabaseSettings,
    /// Aggregation settings
    pub leaderboard: LeaderboardSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// How long browsers may cache a CORS preflight, in seconds
    pub cors_max_age_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_max_age_secs: 3600,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file; `None` means `octofit.db` in the data directory
    pub path: Option<PathBuf>,
}

impl DatabaseSettings {
    /// The database file to open.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| get_data_dir().join("octofit.db"))
    }
}

/// Aggregation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardSettings {
    /// Refresh the affected users' rows whenever an activity is written
    pub refresh_on_activity_write: bool,
}

impl AppConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Read a config file, falling back to defaults when it does not exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup(HOST_VAR).filter(|v| !v.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = parse_override(&lookup, PORT_VAR) {
            self.server.port = port;
        }
        if let Some(path) = lookup(DB_PATH_VAR).filter(|v| !v.is_empty()) {
            self.database.path = Some(PathBuf::from(path));
        }
    }
}

fn parse_override<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key)?;
    raw.parse()
        .map_err(|e| warn!("Invalid {key} value {raw:?}: {e}, keeping configured value"))
        .ok()
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "octofit", "OctoFit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            warn!("No platform data directory, using the working directory");
            PathBuf::from(".")
        })
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| get_data_dir().join("config.toml"))
}

/// Load the configuration file and apply process environment overrides.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::from_file(&get_config_path())?;
    config.apply_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
