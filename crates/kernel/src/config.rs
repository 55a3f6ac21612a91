//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cache::{DEFAULT_MAX_CAPACITY, DEFAULT_STALE_SECS, RetryPolicy};

/// Where event data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    /// Seed dataset with simulated latency.
    #[default]
    Mock,
    /// The REST API at `api_base_url`.
    Remote,
}

impl FromStr for DataSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(DataSource::Mock),
            "remote" | "api" => Ok(DataSource::Remote),
            other => anyhow::bail!("unknown data source {other:?} (expected mock or remote)"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Data source (default: mock).
    pub data_source: DataSource,

    /// Base URL of the event API for the remote source.
    pub api_base_url: String,

    /// Remote request timeout (default: 10s).
    pub http_timeout: Duration,

    /// Simulated mock latency bounds (default: 300-600ms).
    pub mock_delay_min: Duration,
    pub mock_delay_max: Duration,

    /// How long cached responses are served (default: 5 minutes).
    pub cache_stale_time: Duration,

    /// Maximum cached responses (default: 1000).
    pub cache_max_capacity: u64,

    pub retry: RetryPolicy,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Where to persist FAQ search history. In memory when unset.
    pub search_history_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            data_source: DataSource::Mock,
            api_base_url: "http://localhost:3000".to_string(),
            http_timeout: Duration::from_secs(10),
            mock_delay_min: Duration::from_millis(300),
            mock_delay_max: Duration::from_millis(600),
            cache_stale_time: Duration::from_secs(DEFAULT_STALE_SECS),
            cache_max_capacity: DEFAULT_MAX_CAPACITY,
            retry: RetryPolicy::default(),
            cors_allowed_origins: vec!["*".to_string()],
            search_history_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = parse(&lookup, "PORT", defaults.port)?;

        let data_source = match lookup("DATA_SOURCE") {
            Some(v) => v.parse().context("DATA_SOURCE must be mock or remote")?,
            None => defaults.data_source,
        };

        let api_base_url = lookup("API_BASE_URL").unwrap_or(defaults.api_base_url);

        let http_timeout = Duration::from_secs(parse(&lookup, "HTTP_TIMEOUT_SECS", 10)?);

        let mock_delay_min = Duration::from_millis(parse(&lookup, "MOCK_DELAY_MIN_MS", 300)?);
        let mock_delay_max = Duration::from_millis(parse(&lookup, "MOCK_DELAY_MAX_MS", 600)?);
        if mock_delay_min > mock_delay_max {
            anyhow::bail!("MOCK_DELAY_MIN_MS must not exceed MOCK_DELAY_MAX_MS");
        }

        let cache_stale_time = Duration::from_secs(parse(&lookup, "CACHE_STALE_SECS", DEFAULT_STALE_SECS)?);
        let cache_max_capacity = parse(&lookup, "CACHE_MAX_CAPACITY", defaults.cache_max_capacity)?;

        let retry = RetryPolicy {
            attempts: parse::<u32>(&lookup, "RETRY_ATTEMPTS", defaults.retry.attempts)?.max(1),
            base_delay: Duration::from_millis(parse(&lookup, "RETRY_BASE_DELAY_MS", 1_000)?),
            max_delay: Duration::from_millis(parse(&lookup, "RETRY_MAX_DELAY_MS", 30_000)?),
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allowed_origins);

        let search_history_path = lookup("SEARCH_HISTORY_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            data_source,
            api_base_url,
            http_timeout,
            mock_delay_min,
            mock_delay_max,
            cache_stale_time,
            cache_max_capacity,
            retry,
            cors_allowed_origins,
            search_history_path,
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
