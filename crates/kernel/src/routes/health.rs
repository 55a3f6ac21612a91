//! Health check endpoint.
//!
//! Always 200 while the process serves requests; reports which data source
//! is active and how full the query cache is.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::config::DataSource;
use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    data_source: &'static str,
    cache: CacheStats,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let data_source = match state.config().data_source {
        DataSource::Mock => "mock",
        DataSource::Remote => "remote",
    };

    Json(HealthResponse {
        status: "healthy",
        data_source,
        cache: state.events().cache().stats().await,
    })
}

/// Create the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
