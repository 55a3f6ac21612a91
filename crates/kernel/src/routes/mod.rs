//! HTTP route handlers.

pub mod communities;
pub mod faqs;
pub mod health;
mod helpers;
pub mod registration;
pub mod schedule;
pub mod speakers;
pub mod sponsors;

use axum::Router;

use crate::state::AppState;

/// Every route of the event API plus the health check, without middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(speakers::router())
        .merge(sponsors::router())
        .merge(communities::router())
        .merge(faqs::router())
        .merge(schedule::router())
        .merge(registration::router())
}
