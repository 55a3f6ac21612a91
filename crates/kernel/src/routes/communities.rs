//! Community endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::helpers::parse_segment;
use crate::error::AppResult;
use crate::gather::{CommunityQuery, CommunityStats};
use crate::models::{Community, CommunityType};
use crate::services::wire::to_pagination_envelope;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/event/communities", get(list_communities))
        .route("/api/event/communities/featured", get(featured_communities))
        .route("/api/event/communities/stats", get(community_stats))
        .route(
            "/api/event/communities/type/{community_type}",
            get(communities_by_type),
        )
        .route("/api/event/communities/{id}", get(get_community))
}

async fn list_communities(
    State(state): State<AppState>,
    Query(params): Query<CommunityQuery>,
) -> AppResult<Json<Value>> {
    let page = state.events().communities(&params).await?;
    Ok(Json(to_pagination_envelope(page)?))
}

async fn featured_communities(State(state): State<AppState>) -> AppResult<Json<Vec<Community>>> {
    Ok(Json(state.events().featured_communities().await?))
}

async fn community_stats(State(state): State<AppState>) -> AppResult<Json<CommunityStats>> {
    Ok(Json(state.events().community_stats().await?))
}

async fn communities_by_type(
    State(state): State<AppState>,
    Path(community_type): Path<String>,
) -> AppResult<Json<Vec<Community>>> {
    let community_type: CommunityType = parse_segment(&community_type)?;
    Ok(Json(
        state.events().communities_by_type(community_type).await?,
    ))
}

async fn get_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Community>> {
    Ok(Json(state.events().community(&id).await?))
}
