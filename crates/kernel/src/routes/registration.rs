//! Registration endpoints.
//!
//! Submissions are validated before they reach the event source, so a bad
//! form is rejected with field errors whichever source is configured.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppResult;
use crate::form::validate_registration;
use crate::gather::{RegistrationQuery, RegistrationStats};
use crate::models::{Registration, RegistrationReceipt, RegistrationRequest};
use crate::services::wire::DocsEnvelope;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/event/registration",
            get(list_registrations).post(submit_registration),
        )
        .route("/api/event/registration/stats", get(registration_stats))
        .route("/api/event/registration/{code}", get(get_registration))
}

async fn list_registrations(
    State(state): State<AppState>,
    Query(params): Query<RegistrationQuery>,
) -> AppResult<Json<DocsEnvelope<Registration, RegistrationStats>>> {
    let page = state.events().registrations(&params).await?;
    Ok(Json(page.into()))
}

async fn submit_registration(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<RegistrationReceipt>)> {
    validate_registration(&request)?;
    let receipt = state.events().submit_registration(request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn registration_stats(State(state): State<AppState>) -> AppResult<Json<RegistrationStats>> {
    Ok(Json(state.events().registration_stats().await?))
}

async fn get_registration(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<Registration>> {
    Ok(Json(state.events().registration(&code).await?))
}
