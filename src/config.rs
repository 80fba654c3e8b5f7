//! TOML configuration.
//!
//! Every section is optional; a missing file yields [`Config::minimal`].
//! The lookup tables are read from a separate TOML file named in
//! `[tables].path`, so they can be swapped without touching the rest.
//!
//! ```toml
//! [monitor]
//! interval_ms = 5000
//! scroll_debounce_ms = 1000
//!
//! [server]
//! bind = "127.0.0.1:7341"
//!
//! [fetch]
//! timeout_secs = 30
//!
//! [tables]
//! path = "config/tables.toml"
//! ```

use anyhow::{Context, Result};
use page_context_core::tables::Tables;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub tables: TablesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_scroll_debounce_ms")]
    pub scroll_debounce_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            scroll_debounce_ms: default_scroll_debounce_ms(),
        }
    }
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }
}

fn default_interval_ms() -> u64 {
    5000
}
fn default_scroll_debounce_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!("pagectx/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TablesConfig {
    /// Tables file; relative paths resolve against the config file's directory.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Load the lookup tables named in `[tables].path`, or the built-ins.
    pub fn load_tables(&self) -> Result<Tables> {
        let Some(path) = &self.tables.path else {
            return Ok(Tables::builtin());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tables file: {}", path.display()))?;
        let tables: Tables = toml::from_str(&content)
            .with_context(|| format!("Failed to parse tables file: {}", path.display()))?;
        tables.validate()?;
        tracing::debug!(path = %path.display(), "loaded lookup tables");
        Ok(tables)
    }
}

/// Read and validate the config at `path`.
///
/// A missing file is not an error: the defaults are returned instead.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::minimal());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if let Some(tables_path) = &config.tables.path {
        if tables_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.tables.path = Some(dir.join(tables_path));
            }
        }
    }

    // Validate monitor
    if config.monitor.interval_ms == 0 {
        anyhow::bail!("monitor.interval_ms must be > 0");
    }
    if config.monitor.scroll_debounce_ms == 0 {
        anyhow::bail!("monitor.scroll_debounce_ms must be > 0");
    }

    // Validate fetch
    if config.fetch.timeout_secs == 0 {
        anyhow::bail!("fetch.timeout_secs must be > 0");
    }

    Ok(config)
}
