//! Sponsor endpoints.
//!
//! The list uses the "pagination" envelope keyed by `sponsors`.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::helpers::parse_segment;
use crate::error::AppResult;
use crate::gather::{SponsorQuery, SponsorStats};
use crate::models::{Sponsor, SponsorTier};
use crate::services::wire::to_pagination_envelope;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/event/sponsors", get(list_sponsors))
        .route("/api/event/sponsors/featured", get(featured_sponsors))
        .route("/api/event/sponsors/stats", get(sponsor_stats))
        .route("/api/event/sponsors/tier/{tier}", get(sponsors_by_tier))
        .route("/api/event/sponsors/{id}", get(get_sponsor))
}

async fn list_sponsors(
    State(state): State<AppState>,
    Query(params): Query<SponsorQuery>,
) -> AppResult<Json<Value>> {
    let page = state.events().sponsors(&params).await?;
    Ok(Json(to_pagination_envelope(page)?))
}

async fn featured_sponsors(State(state): State<AppState>) -> AppResult<Json<Vec<Sponsor>>> {
    Ok(Json(state.events().featured_sponsors().await?))
}

async fn sponsor_stats(State(state): State<AppState>) -> AppResult<Json<SponsorStats>> {
    Ok(Json(state.events().sponsor_stats().await?))
}

async fn sponsors_by_tier(
    State(state): State<AppState>,
    Path(tier): Path<String>,
) -> AppResult<Json<Vec<Sponsor>>> {
    let tier: SponsorTier = parse_segment(&tier)?;
    Ok(Json(state.events().sponsors_by_tier(tier).await?))
}

async fn get_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Sponsor>> {
    Ok(Json(state.events().sponsor(&id).await?))
}
