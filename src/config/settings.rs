use serde::Deserialize;
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_MAX_CONCURRENCY;

/// ================================
/// HTTP session settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// request timeout in seconds, None = no timeout
    pub timeout: Option<u64>,
    /// transport retries on top of the first attempt
    pub max_retries: u32,
    /// ceiling for concurrent requests, also the idle pool size per host
    pub max_concurrency: usize,
    /// default for dispatched batches: report failed calls instead of dropping them
    pub return_exceptions: bool,
    pub user_agent: String,
    /// TLS certificate verification
    pub verify: bool,
    /// text cookie file, only `#HttpOnly_` lines are loaded
    pub cookie: Option<PathBuf>,
    /// PEM bundle trusted in addition to the built-in roots
    pub ca_cert_bundle: Option<PathBuf>,
    pub scheme: Scheme,
    pub retry: Option<RetryConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_retries: 0,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            return_exceptions: true,
            user_agent: default_user_agent(),
            verify: true,
            cookie: None,
            ca_cert_bundle: None,
            scheme: Scheme::Https,
            retry: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    /// will be mutiply by 2 on every attempt until max_delay_ms
    pub base_delay_ms: Option<u64>,
    /// invariant: >= base_delay_ms
    pub max_delay_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

pub fn default_user_agent() -> String {
    format!(
        "DeviceCloudSDK/{} {}/{} Rust",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level: level, format: format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
