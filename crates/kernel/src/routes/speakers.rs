//! Speaker endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppResult;
use crate::gather::{SpeakerQuery, SpeakerStats};
use crate::models::Speaker;
use crate::services::wire::DocsEnvelope;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/event/speakers", get(list_speakers))
        .route("/api/event/speakers/featured", get(featured_speakers))
        .route("/api/event/speakers/stats", get(speaker_stats))
        .route("/api/event/speakers/{id}", get(get_speaker))
}

async fn list_speakers(
    State(state): State<AppState>,
    Query(params): Query<SpeakerQuery>,
) -> AppResult<Json<DocsEnvelope<Speaker, SpeakerStats>>> {
    let page = state.events().speakers(&params).await?;
    Ok(Json(page.into()))
}

async fn featured_speakers(State(state): State<AppState>) -> AppResult<Json<Vec<Speaker>>> {
    Ok(Json(state.events().featured_speakers().await?))
}

async fn speaker_stats(State(state): State<AppState>) -> AppResult<Json<SpeakerStats>> {
    Ok(Json(state.events().speaker_stats().await?))
}

async fn get_speaker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Speaker>> {
    Ok(Json(state.events().speaker(&id).await?))
}
