//! FAQ endpoints, including search and helpfulness feedback.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use super::helpers::parse_segment;
use crate::error::AppResult;
use crate::gather::{FaqQuery, FaqStats};
use crate::models::{Faq, FaqCategory, FaqFeedback, FeedbackResult};
use crate::services::wire::{DocsEnvelope, SearchParams};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/event/faqs", get(list_faqs))
        .route("/api/event/faqs/featured", get(featured_faqs))
        .route("/api/event/faqs/stats", get(faq_stats))
        .route("/api/event/faqs/search", get(search_faqs))
        .route("/api/event/faqs/feedback", post(submit_feedback))
        .route("/api/event/faqs/category/{category}", get(faqs_by_category))
        .route("/api/event/faqs/{id}", get(get_faq))
        .route("/api/event/faqs/{id}/related", get(related_faqs))
}

async fn list_faqs(
    State(state): State<AppState>,
    Query(params): Query<FaqQuery>,
) -> AppResult<Json<DocsEnvelope<Faq, FaqStats>>> {
    let page = state.events().faqs(&params).await?;
    Ok(Json(page.into()))
}

async fn featured_faqs(State(state): State<AppState>) -> AppResult<Json<Vec<Faq>>> {
    Ok(Json(state.events().featured_faqs().await?))
}

async fn faq_stats(State(state): State<AppState>) -> AppResult<Json<FaqStats>> {
    Ok(Json(state.events().faq_stats().await?))
}

async fn search_faqs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Faq>>> {
    Ok(Json(
        state.events().search_faqs(&params.q, params.limit).await?,
    ))
}

async fn submit_feedback(
    State(state): State<AppState>,
    Json(feedback): Json<FaqFeedback>,
) -> AppResult<Json<FeedbackResult>> {
    Ok(Json(state.events().submit_faq_feedback(&feedback).await?))
}

async fn faqs_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Faq>>> {
    let category: FaqCategory = parse_segment(&category)?;
    Ok(Json(state.events().faqs_by_category(category).await?))
}

async fn get_faq(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Faq>> {
    Ok(Json(state.events().faq(&id).await?))
}

async fn related_faqs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Faq>>> {
    Ok(Json(state.events().related_faqs(&id).await?))
}
