//! TOML-backed application configuration.
//!
//! One file drives the whole pipeline: where the provider lives and how it
//! behaves, how transient failures are retried, and whether fetched series
//! are cached on disk. Every field has a default, so an absent file or an
//! empty one is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use market_data::providers::retry::RetryPolicy;
use market_data::providers::yahoo_chart::YahooChartSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalyzerConfig {
    pub provider: ProviderConfig,
    pub retry: RetryPolicy,
    pub cache: CacheConfig,
}

/// Connection settings for the data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderConfig {
    /// Endpoint root; point this at a proxy to intercept traffic.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Local request budget per minute.
    pub requests_per_minute: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 30,
            requests_per_minute: 60,
        }
    }
}

/// On-disk cache policy for fetched series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CacheConfig {
    /// Caching is opt-in.
    pub enabled: bool,
    /// Directory holding one CSV file per (symbol, period).
    pub dir: PathBuf,
    /// Entry lifetime in seconds, measured from file modification time.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: std::env::temp_dir().join("stock_analyzer"),
            ttl_secs: 900,
        }
    }
}

impl AnalyzerConfig {
    /// Loads and parses the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses a TOML document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Provider settings derived from this configuration.
    #[must_use]
    pub fn provider_settings(&self) -> YahooChartSettings {
        YahooChartSettings {
            base_url: self.provider.base_url.clone(),
            user_agent: self.provider.user_agent.clone(),
            timeout: Duration::from_secs(self.provider.timeout_secs),
            requests_per_minute: self.provider.requests_per_minute,
            retry: self.retry,
        }
    }
}
