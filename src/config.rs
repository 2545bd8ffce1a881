//! Configuration file parser for ~/.config/headline/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as warnings, since they are
//! usually typos.
use secrecy::SecretString;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::feed::Latency;
use crate::storage::{Category, CategoryParseError};

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "NEWS_API_KEY";

/// Longest accepted refresh period (one day). Larger values are clamped.
pub const MAX_REFRESH_INTERVAL_MINUTES: u64 = 24 * 60;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid default_category: {0}")]
    Category(#[from] CategoryParseError),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Simulated provider response times, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub articles_ms: u64,
    pub breaking_ms: u64,
    pub trending_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        let latency = Latency::default();
        Self {
            articles_ms: latency.articles.as_millis() as u64,
            breaking_ms: latency.breaking.as_millis() as u64,
            trending_ms: latency.trending.as_millis() as u64,
        }
    }
}

impl LatencyConfig {
    const KNOWN_KEYS: [&'static str; 3] = ["articles_ms", "breaking_ms", "trending_ms"];

    pub fn to_latency(self) -> Latency {
        Latency {
            articles: Duration::from_millis(self.articles_ms),
            breaking: Duration::from_millis(self.breaking_ms),
            trending: Duration::from_millis(self.trending_ms),
        }
    }
}

/// Settings read from `config.toml`. Every key is optional.
///
/// `Debug` masks `api_key`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minutes between background refreshes. 0 disables the timer.
    pub refresh_interval_minutes: u64,

    /// Upper bound on a single article retrieval, in seconds.
    pub request_timeout_secs: u64,

    /// Category selected at startup ("all" or a category name).
    pub default_category: String,

    pub latency: LatencyConfig,

    /// Base URL of the headline provider. Only reported at startup: the
    /// bundled simulated service is what actually answers requests.
    pub api_base_url: String,

    /// Provider API key (alternative to the NEWS_API_KEY env var).
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: 5,
            request_timeout_secs: 10,
            default_category: Category::ALL.to_string(),
            latency: LatencyConfig::default(),
            api_base_url: "https://newsapi.org/v2".to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("refresh_interval_minutes", &self.refresh_interval_minutes)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("default_category", &self.default_category)
            .field("latency", &self.latency)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "refresh_interval_minutes",
        "request_timeout_secs",
        "default_category",
        "latency",
        "api_base_url",
        "api_key",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing or empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown `default_category` → `Err(ConfigError::Category)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let Some(content) = read_limited(path, Self::MAX_FILE_SIZE)? else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        };
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Empty config file, using defaults");
            return Ok(Self::default());
        }

        let table: toml::Table = content.parse()?;
        warn_unknown_keys(&table);

        let config: Config = toml::Value::Table(table).try_into()?;
        config.default_selection()?;
        if config.refresh_interval_minutes > MAX_REFRESH_INTERVAL_MINUTES {
            tracing::warn!(
                refresh_minutes = config.refresh_interval_minutes,
                max = MAX_REFRESH_INTERVAL_MINUTES,
                "refresh_interval_minutes too large, clamping"
            );
        }
        tracing::info!(
            path = %path.display(),
            refresh_minutes = config.refresh_interval_minutes,
            default_category = %config.default_category,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Background refresh period, or `None` when disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        let minutes = self
            .refresh_interval_minutes
            .min(MAX_REFRESH_INTERVAL_MINUTES);
        minutes
            .checked_mul(60)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Per-request timeout; never shorter than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn default_selection(&self) -> Result<Option<Category>, CategoryParseError> {
        Category::parse_selection(&self.default_category)
    }

    /// API key with the environment taking precedence over the file.
    pub fn resolved_api_key(&self) -> Option<SecretString> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .map(SecretString::from)
    }
}

/// Read `path` as UTF-8 text, or `None` if it does not exist.
fn read_limited(path: &Path, max_bytes: u64) -> Result<Option<String>, ConfigError> {
    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if size > max_bytes {
        return Err(ConfigError::TooLarge(format!(
            "{} is {} bytes, limit is {}",
            path.display(),
            size,
            max_bytes
        )));
    }
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        // Removed between the two calls.
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn warn_unknown_keys(table: &toml::Table) {
    for key in table
        .keys()
        .filter(|k| !Config::KNOWN_KEYS.contains(&k.as_str()))
    {
        tracing::warn!(key = %key, "Unknown config key, ignoring");
    }
    if let Some(toml::Value::Table(latency)) = table.get("latency") {
        for key in latency
            .keys()
            .filter(|k| !LatencyConfig::KNOWN_KEYS.contains(&k.as_str()))
        {
            tracing::warn!(key = %format!("latency.{}", key), "Unknown config key, ignoring");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
