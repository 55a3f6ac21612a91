#![allow(clippy::unwrap_used, clippy::expect_used)]
//! `RemoteSource` against a live in-process API server.

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use techfest_kernel::data::Dataset;
use techfest_kernel::error::AppError;
use techfest_kernel::gather::{
    self, CommunityQuery, FaqQuery, RegistrationQuery, SpeakerQuery, SponsorQuery,
};
use techfest_kernel::models::{FaqCategory, FaqFeedback, SponsorTier};
use techfest_kernel::services::{EventSource, RemoteSource};

/// Serve `app` on an ephemeral port.
async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn remote_for(app: Router) -> RemoteSource {
    let addr = spawn_server(app).await;
    RemoteSource::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

/// Remote source over the mock-backed API.
async fn remote() -> RemoteSource {
    remote_for(common::app()).await
}

#[tokio::test]
async fn docs_pages_match_the_local_engine() {
    let source = remote().await;
    let data = Dataset::seed();
    let params = SpeakerQuery {
        limit: Some(4),
        search: Some("a".to_string()),
        ..Default::default()
    };

    let page = source.speakers(&params).await.unwrap();
    assert_eq!(page, gather::speakers::query(&data.speakers, &params));

    let faqs = source
        .faqs(&FaqQuery {
            category: Some(FaqCategory::Technical),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(faqs.items.iter().all(|f| f.category == FaqCategory::Technical));
}

#[tokio::test]
async fn pagination_pages_match_the_local_engine() {
    let source = remote().await;
    let data = Dataset::seed();

    let params = SponsorQuery {
        tier: Some(SponsorTier::Silver),
        ..Default::default()
    };
    let sponsors = source.sponsors(&params).await.unwrap();
    assert_eq!(sponsors, gather::sponsors::query(&data.sponsors, &params));

    let communities = source
        .communities(&CommunityQuery::default())
        .await
        .unwrap();
    assert_eq!(communities.pagination.total, 8);
    assert!(communities.meta.is_some());
}

#[tokio::test]
async fn misshapen_collection_body_is_a_fetch_failure() {
    let app = Router::new()
        .route(
            "/api/event/sponsors",
            get(|| async { Json(json!({"unexpected": []})) }),
        )
        .route(
            "/api/event/communities",
            get(|| async { Json(json!({"communities": "nope", "pagination": {}})) }),
        );
    let source = remote_for(app).await;

    let err = source.sponsors(&SponsorQuery::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Network { .. }));
    assert!(err.is_retryable());
    assert_eq!(err.to_string(), "failed to fetch sponsors");

    let err = source
        .communities(&CommunityQuery::default())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.to_string(), "failed to fetch communities");
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let source = remote().await;
    let err = source.session("ses-404").await.unwrap_err();

    match err {
        AppError::NotFound { entity, id } => {
            assert_eq!(entity, "session");
            assert_eq!(id, "ses-404");
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn subsets_and_search_travel_over_http() {
    let source = remote().await;

    let day = source.sessions_by_day(1).await.unwrap();
    assert!(!day.is_empty());
    assert!(day.iter().all(|s| s.event_day == 1));

    let hits = source.search_faqs("eduroam", 3).await.unwrap();
    assert_eq!(hits.len(), 1);

    let related = source.related_faqs("faq-002").await.unwrap();
    assert!(related.iter().all(|f| f.id != "faq-099"));

    let session = Dataset::seed()
        .sessions
        .into_iter()
        .find(|s| !s.event_speakers.is_empty())
        .unwrap();
    let speakers = source.session_speakers(&session.id).await.unwrap();
    assert!(!speakers.is_empty());
    assert!(matches!(
        source.session_speakers("ses-404").await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn writes_round_trip() {
    let source = remote().await;

    let receipt = source
        .submit_registration(common::valid_request("remote@example.org"))
        .await
        .unwrap();
    let registration = source
        .registration(&receipt.confirmation_code)
        .await
        .unwrap();
    assert_eq!(registration.email, "remote@example.org");

    let page = source
        .registrations(&RegistrationQuery::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].confirmation_code, receipt.confirmation_code);
    assert_eq!(page.meta.unwrap().total, 1);

    let result = source
        .submit_faq_feedback(&FaqFeedback {
            faq_id: "faq-004".to_string(),
            helpful: true,
            comment: None,
        })
        .await
        .unwrap();
    assert!(result.helpful > 0);
}

#[tokio::test]
async fn server_validation_errors_keep_their_fields() {
    let source = remote().await;
    let mut request = common::valid_request("remote@example.org");
    request.terms_accepted = false;

    let err = source.submit_registration(request).await.unwrap_err();
    let AppError::Validation(fields) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(
        fields
            .iter()
            .any(|f| f.field.as_deref() == Some("termsAccepted"))
    );
}

#[tokio::test]
async fn client_honours_the_configured_timeout() {
    let app = Router::new().route(
        "/api/event/speakers/stats",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({}))
        }),
    );
    let addr = spawn_server(app).await;
    let source = RemoteSource::new(&format!("http://{addr}"), Duration::from_millis(200)).unwrap();

    let started = std::time::Instant::now();
    let err = source.speaker_stats().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(started.elapsed() < Duration::from_secs(4));
}
