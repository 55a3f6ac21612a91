//! Schedule endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::helpers::parse_day;
use crate::error::AppResult;
use crate::gather::{ScheduleStats, SessionQuery};
use crate::models::{Session, Speaker};
use crate::services::wire::DocsEnvelope;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/event/schedule", get(list_sessions))
        .route("/api/event/schedule/stats", get(schedule_stats))
        .route("/api/event/schedule/day/{day}", get(sessions_by_day))
        .route("/api/event/schedule/{id}", get(get_session))
        .route("/api/event/schedule/{id}/speakers", get(session_speakers))
}

async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> AppResult<Json<DocsEnvelope<Session, ScheduleStats>>> {
    let page = state.events().sessions(&params).await?;
    Ok(Json(page.into()))
}

async fn schedule_stats(State(state): State<AppState>) -> AppResult<Json<ScheduleStats>> {
    Ok(Json(state.events().schedule_stats().await?))
}

async fn sessions_by_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> AppResult<Json<Vec<Session>>> {
    let day = parse_day(&day)?;
    Ok(Json(state.events().sessions_by_day(day).await?))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Session>> {
    Ok(Json(state.events().session(&id).await?))
}

async fn session_speakers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Speaker>>> {
    Ok(Json(state.events().session_speakers(&id).await?))
}
