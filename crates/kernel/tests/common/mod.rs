#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common fixtures for integration tests.
//!
//! Everything runs against the real query engine and `MockSource` with
//! latency turned off, so tests are fast and deterministic.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

use techfest_kernel::cache::{QueryCache, RetryPolicy};
use techfest_kernel::config::Config;
use techfest_kernel::form::RegistrationForm;
use techfest_kernel::models::{
    EmergencyContact, ExperienceLevel, RegistrationRequest, RegistrationType, TicketType, Track,
};
use techfest_kernel::routes;
use techfest_kernel::services::{EventService, EventSource, MockSource};
use techfest_kernel::state::AppState;

/// Retry policy with millisecond backoff.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        attempts: 3,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

pub fn test_cache() -> QueryCache {
    QueryCache::new(Duration::from_secs(60), 100, fast_retry())
}

/// Service over any source.
pub fn service_over(source: Arc<dyn EventSource>) -> EventService {
    EventService::new(source, test_cache())
}

/// Service over the seed data with no simulated latency.
pub fn mock_service() -> EventService {
    service_over(Arc::new(MockSource::instant()))
}

/// Router with state and no middleware.
pub fn app_with(events: EventService) -> Router {
    routes::router().with_state(AppState::from_parts(Config::default(), events))
}

pub fn app() -> Router {
    app_with(mock_service())
}

/// A submission every check accepts.
pub fn valid_request(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone: "+1 (555) 010-2030".to_string(),
        institution: "Analytical University".to_string(),
        experience_level: ExperienceLevel::Intermediate,
        interests: vec![Track::AiMl, Track::Data],
        expectations: Some("Meet other builders".to_string()),
        emergency_contact: EmergencyContact {
            name: "Charles Babbage".to_string(),
            phone: "555-123-4567".to_string(),
            relationship: "Mentor".to_string(),
        },
        ticket_type: TicketType::Student,
        registration_type: RegistrationType::Individual,
        terms_accepted: true,
        code_of_conduct_accepted: true,
        newsletter: false,
    }
}

/// The same submission as a filled-in wizard form.
pub fn valid_form(email: &str) -> RegistrationForm {
    let request = valid_request(email);
    RegistrationForm {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone,
        institution: request.institution,
        experience_level: Some(request.experience_level),
        interests: request.interests,
        expectations: request.expectations.unwrap_or_default(),
        emergency_contact: request.emergency_contact,
        ticket_type: Some(request.ticket_type),
        registration_type: Some(request.registration_type),
        terms_accepted: true,
        code_of_conduct_accepted: true,
        newsletter: false,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &impl Serialize) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send one request and decode the JSON body.
pub async fn send<T: DeserializeOwned>(app: &Router, request: Request<Body>) -> (StatusCode, T) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("{status}: undecodable body {bytes:?}: {e}"));
    (status, body)
}

pub async fn send_value(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    send(app, request).await
}
