use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, str::FromStr};

use crate::{Units, provider::openweather::DEFAULT_BASE_URL};

/// Which backend answers `GET /weather`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read-through proxy to the upstream provider.
    #[default]
    Proxy,
    /// In-memory record store with GET/POST.
    Store,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Proxy => "proxy",
            Mode::Store => "store",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Mode::Proxy => 9010,
            Mode::Store => 9000,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "proxy" => Ok(Mode::Proxy),
            "store" => Ok(Mode::Store),
            _ => Err(anyhow!("Unknown mode '{value}'. Supported modes: proxy, store.")),
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Verbose,
    Quiet,
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "verbose" => Ok(LogLevel::Verbose),
            "quiet" => Ok(LogLevel::Quiet),
            _ => Err(anyhow!("Unknown log level '{value}'. Use verbose or quiet.")),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// mode = "store"
/// port = 9000
/// units = "metric"
/// api_key_env = "OPENWEATHER_API_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub host: String,
    /// Listening port; falls back to the mode's default when unset.
    pub port: Option<u16>,
    /// Unit system used when a request carries no `units` parameter.
    pub units: Units,
    /// Name of the environment variable holding the upstream API key.
    pub api_key_env: String,
    pub log: LogLevel,
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,
    pub shutdown_grace_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            host: "127.0.0.1".to_string(),
            port: None,
            units: Units::default(),
            api_key_env: "OPENWEATHER_API_KEY".to_string(),
            log: LogLevel::default(),
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout_secs: 10,
            shutdown_grace_secs: 15,
        }
    }
}

impl Config {
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.mode.default_port())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.effective_port())
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-service", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
