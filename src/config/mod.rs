//! Configuration management
//!
//! This module handles loading and validating configuration from
//! environment variables and TOML files. CLI flags may override individual
//! fields after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::RetryPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reward API configuration
    pub api: ApiConfig,

    /// Proxy list configuration
    pub proxy: ProxyConfig,

    /// Polling and retry configuration
    pub scheduler: SchedulerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Reward API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Proxy list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Local proxy list path
    pub file: PathBuf,

    /// Optional remote list URL fetched into `file` before loading
    pub remote_url: Option<String>,

    /// Route requests through proxies for this run
    pub enabled: bool,
}

/// Polling and retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between polling cycles of each loop
    pub poll_interval_secs: u64,

    /// Attempts per outbound operation
    pub max_attempts: u32,

    /// Seconds between attempts of one operation
    pub retry_delay_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DAWNKEEP_BASE_URL")
            .unwrap_or_else(|_| crate::client::DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = std::env::var("DAWNKEEP_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(120);

        let proxy_file = std::env::var("DAWNKEEP_PROXY_FILE")
            .unwrap_or_else(|_| String::from("proxy.txt"))
            .into();

        let proxy_remote_url = std::env::var("DAWNKEEP_PROXY_REMOTE_URL").ok();

        let proxy_enabled = std::env::var("DAWNKEEP_USE_PROXY")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        let poll_interval_secs = std::env::var("DAWNKEEP_POLL_INTERVAL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let max_attempts = std::env::var("DAWNKEEP_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let retry_delay_secs = std::env::var("DAWNKEEP_RETRY_DELAY")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5);

        let log_level =
            std::env::var("DAWNKEEP_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("DAWNKEEP_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            api: ApiConfig {
                base_url,
                request_timeout_secs,
            },
            proxy: ProxyConfig {
                file: proxy_file,
                remote_url: proxy_remote_url,
                enabled: proxy_enabled,
            },
            scheduler: SchedulerConfig {
                poll_interval_secs,
                max_attempts,
                retry_delay_secs,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }

        if self.api.request_timeout_secs == 0 {
            anyhow::bail!("api.request_timeout_secs must be greater than 0");
        }

        if self.scheduler.poll_interval_secs == 0 {
            anyhow::bail!("scheduler.poll_interval_secs must be greater than 0");
        }

        if self.scheduler.max_attempts == 0 {
            anyhow::bail!("scheduler.max_attempts must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Get polling interval as Duration
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler.poll_interval_secs)
    }

    /// Build the retry policy for outbound operations
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_delay(
            self.scheduler.max_attempts,
            Duration::from_secs(self.scheduler.retry_delay_secs),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: crate::client::DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: 120,
            },
            proxy: ProxyConfig {
                file: PathBuf::from("proxy.txt"),
                remote_url: None,
                enabled: true,
            },
            scheduler: SchedulerConfig {
                poll_interval_secs: 600,
                max_attempts: 5,
                retry_delay_secs: 5,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = Config::default();
        config.scheduler.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = Config::default();
        config.scheduler.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_conversions() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.poll_interval(), Duration::from_secs(600));

        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.retry_delay, Duration::from_secs(5));
    }
}
