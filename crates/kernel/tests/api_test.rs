#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Event API routes driven through `oneshot`.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{get, post_json, send, send_value};
use techfest_kernel::data::Dataset;
use techfest_kernel::gather::{FaqStats, RegistrationStats};
use techfest_kernel::models::{Faq, RegistrationReceipt, Speaker, Sponsor};
use techfest_kernel::services::MockSource;

#[tokio::test]
async fn health_reports_the_data_source() {
    let app = common::app();
    let (status, body) = send_value(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dataSource"], "mock");
}

#[tokio::test]
async fn speaker_list_uses_the_docs_envelope() {
    let app = common::app();
    let (status, body) = send_value(&app, get("/api/event/speakers?limit=3&page=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docs"].as_array().unwrap().len(), 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 3);
    assert_eq!(body["hasPrevPage"], true);
    assert!(body["totalDocs"].as_u64().unwrap() >= 6);
    assert!(body["meta"]["total"].is_number());
}

#[tokio::test]
async fn sponsor_list_uses_the_pagination_envelope() {
    let app = common::app();
    let (status, body) = send_value(&app, get("/api/event/sponsors?tier=gold")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sponsors"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["hasNext"], false);
}

#[tokio::test]
async fn query_string_enums_accept_any_case() {
    let app = common::app();
    let (status, body) = send_value(&app, get("/api/event/sponsors?tier=GOLD")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["sponsors"][0]["tier"], "gold");
}

#[tokio::test]
async fn community_list_is_keyed_by_collection() {
    let app = common::app();
    let (status, body) = send_value(&app, get("/api/event/communities?limit=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communities"].as_array().unwrap().len(), 8);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn static_segments_win_over_ids() {
    let app = common::app();

    let (status, stats) = send_value(&app, get("/api/event/speakers/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(stats["byTrack"].is_object());

    let (status, featured) = send_value(&app, get("/api/event/faqs/featured")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(featured.is_array());
}

#[tokio::test]
async fn tier_path_accepts_any_case() {
    let app = common::app();
    let (status, sponsors): (_, Vec<Sponsor>) =
        send(&app, get("/api/event/sponsors/tier/PLATINUM")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!sponsors.is_empty());
}

#[tokio::test]
async fn unknown_enum_segment_is_a_bad_request() {
    let app = common::app();
    let (status, body) = send_value(&app, get("/api/event/communities/type/cult")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cult"));

    let (status, _) = send_value(&app, get("/api/event/schedule/day/9")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_records_are_404_with_the_id() {
    let app = common::app();
    let (status, body) = send_value(&app, get("/api/event/sponsors/spn-missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("spn-missing"));
}

#[tokio::test]
async fn related_faqs_skip_dangling_references() {
    let app = common::app();
    let (status, related): (_, Vec<Faq>) = send(&app, get("/api/event/faqs/faq-002/related")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(related.iter().all(|f| f.id != "faq-099"));
}

#[tokio::test]
async fn search_endpoint_matches_tags() {
    let app = common::app();
    let (status, hits): (_, Vec<Faq>) =
        send(&app, get("/api/event/faqs/search?q=eduroam&limit=5")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn feedback_is_counted() {
    let app = common::app();
    let (_, before): (_, FaqStats) = send(&app, get("/api/event/faqs/stats")).await;

    let (status, body) = send_value(
        &app,
        post_json(
            "/api/event/faqs/feedback",
            &json!({"faqId": "faq-003", "helpful": false, "comment": "Unclear"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["notHelpful"].is_number());

    let (_, after): (_, FaqStats) = send(&app, get("/api/event/faqs/stats")).await;
    assert_eq!(after.not_helpful, before.not_helpful + 1);
}

#[tokio::test]
async fn registration_round_trip() {
    let app = common::app();
    let (status, receipt): (_, RegistrationReceipt) = send(
        &app,
        post_json(
            "/api/event/registration",
            &common::valid_request("lin@example.org"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/event/registration/{}", receipt.confirmation_code);
    let (status, registration) = send_value(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registration["email"], "lin@example.org");

    let (_, stats): (_, RegistrationStats) =
        send(&app, get("/api/event/registration/stats")).await;
    assert_eq!(stats.total, 1);

    let (status, list) = send_value(&app, get("/api/event/registration?search=lin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["totalDocs"], 1);
    assert_eq!(list["docs"][0]["confirmationCode"], receipt.confirmation_code);
}

#[tokio::test]
async fn invalid_registration_lists_field_errors() {
    let app = common::app();
    let mut request = common::valid_request("not-an-email");
    request.interests.clear();

    let (status, body) = send_value(&app, post_json("/api/event/registration", &request)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"interests"));
}

#[tokio::test]
async fn schedule_day_lists_only_that_day() {
    let app = common::app();
    let (status, sessions): (_, Vec<Value>) = send(&app, get("/api/event/schedule/day/2")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!sessions.is_empty());
    assert!(sessions.iter().all(|s| s["eventDay"] == 2));
}

#[tokio::test]
async fn session_speakers_resolve_references() {
    let app = common::app();
    let (_, sessions): (_, Value) = send(&app, get("/api/event/schedule?limit=100")).await;
    let session = sessions["docs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| !s["eventSpeakers"].as_array().unwrap().is_empty())
        .unwrap();

    let uri = format!("/api/event/schedule/{}/speakers", session["id"].as_str().unwrap());
    let (status, speakers): (_, Vec<Speaker>) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!speakers.is_empty());

    let (status, _) = send_value(&app, get("/api/event/schedule/ses-404/speakers")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_dataset_lists_have_no_pages() {
    let source = MockSource::new(Dataset::default()).with_delay(Duration::ZERO, Duration::ZERO);
    let app = common::app_with(common::service_over(Arc::new(source)));

    let (status, body) = send_value(&app, get("/api/event/speakers")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docs"], json!([]));
    assert_eq!(body["totalDocs"], 0);
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["hasNextPage"], false);
    assert_eq!(body["hasPrevPage"], false);

    let (status, body) = send_value(&app, get("/api/event/communities")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communities"], json!([]));
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["hasNext"], false);
}
