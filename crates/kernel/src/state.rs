//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::cache::QueryCache;
use crate::config::{Config, DataSource};
use crate::data::Dataset;
use crate::search::SearchHistory;
use crate::services::{EventService, EventSource, MockSource, RemoteSource};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,

    /// Cached access to the configured event source.
    events: EventService,
}

impl AppState {
    /// Build the event source named by `config` and wrap it.
    pub async fn new(config: Config) -> Result<Self> {
        let source: Arc<dyn EventSource> = match config.data_source {
            DataSource::Mock => {
                info!(
                    min_ms = config.mock_delay_min.as_millis() as u64,
                    max_ms = config.mock_delay_max.as_millis() as u64,
                    "using mock event source"
                );
                Arc::new(
                    MockSource::new(Dataset::seed())
                        .with_delay(config.mock_delay_min, config.mock_delay_max),
                )
            }
            DataSource::Remote => {
                info!(base_url = %config.api_base_url, "using remote event source");
                Arc::new(RemoteSource::new(
                    &config.api_base_url,
                    config.http_timeout,
                )?)
            }
        };

        let cache = QueryCache::new(
            config.cache_stale_time,
            config.cache_max_capacity,
            config.retry,
        );

        let mut events = EventService::new(source, cache);
        if let Some(path) = &config.search_history_path {
            events = events.with_history(SearchHistory::open(path).await);
        }

        Ok(Self::from_parts(config, events))
    }

    /// Assemble state from an already built service.
    pub fn from_parts(config: Config, events: EventService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, events }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn events(&self) -> &EventService {
        &self.inner.events
    }
}
