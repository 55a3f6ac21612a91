#![allow(clippy::unwrap_used, clippy::expect_used)]
//! `EventService` behavior: caching, retries, invalidation and the wizard.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use techfest_kernel::data::Dataset;
use techfest_kernel::error::{AppError, AppResult};
use techfest_kernel::form::{RegistrationWizard, Step, WizardStatus};
use techfest_kernel::gather::{
    self, CommunityQuery, CommunityStats, FaqQuery, FaqStats, Page, RegistrationQuery,
    RegistrationStats, ScheduleStats, SessionQuery, SpeakerQuery, SpeakerStats, SponsorQuery,
    SponsorStats,
};
use techfest_kernel::models::{
    Community, CommunityType, Faq, FaqCategory, FaqFeedback, FeedbackResult, Registration,
    RegistrationReceipt, RegistrationRequest, Session, Speaker, Sponsor, SponsorTier,
};
use techfest_kernel::search::MAX_ENTRIES;
use techfest_kernel::services::{EventSource, MockSource};

/// Counts calls and fails the first `failures` of them with a network error.
struct CountingSource {
    inner: MockSource,
    calls: AtomicU32,
    failures: AtomicU32,
}

impl CountingSource {
    fn new(inner: MockSource) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicU32::new(0),
            failures: AtomicU32::new(0),
        })
    }

    fn failing(failures: u32) -> Arc<Self> {
        let source = Self::new(MockSource::instant());
        source.failures.store(failures, Ordering::SeqCst);
        source
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::network("stub", "connection reset"));
        }
        Ok(())
    }
}

#[async_trait]
impl EventSource for CountingSource {
    async fn speakers(&self, params: &SpeakerQuery) -> AppResult<Page<Speaker, SpeakerStats>> {
        self.hit()?;
        self.inner.speakers(params).await
    }

    async fn speaker(&self, id: &str) -> AppResult<Speaker> {
        self.hit()?;
        self.inner.speaker(id).await
    }

    async fn featured_speakers(&self) -> AppResult<Vec<Speaker>> {
        self.hit()?;
        self.inner.featured_speakers().await
    }

    async fn speaker_stats(&self) -> AppResult<SpeakerStats> {
        self.hit()?;
        self.inner.speaker_stats().await
    }

    async fn sponsors(&self, params: &SponsorQuery) -> AppResult<Page<Sponsor, SponsorStats>> {
        self.hit()?;
        self.inner.sponsors(params).await
    }

    async fn sponsor(&self, id: &str) -> AppResult<Sponsor> {
        self.hit()?;
        self.inner.sponsor(id).await
    }

    async fn featured_sponsors(&self) -> AppResult<Vec<Sponsor>> {
        self.hit()?;
        self.inner.featured_sponsors().await
    }

    async fn sponsors_by_tier(&self, tier: SponsorTier) -> AppResult<Vec<Sponsor>> {
        self.hit()?;
        self.inner.sponsors_by_tier(tier).await
    }

    async fn sponsor_stats(&self) -> AppResult<SponsorStats> {
        self.hit()?;
        self.inner.sponsor_stats().await
    }

    async fn communities(
        &self,
        params: &CommunityQuery,
    ) -> AppResult<Page<Community, CommunityStats>> {
        self.hit()?;
        self.inner.communities(params).await
    }

    async fn community(&self, id: &str) -> AppResult<Community> {
        self.hit()?;
        self.inner.community(id).await
    }

    async fn featured_communities(&self) -> AppResult<Vec<Community>> {
        self.hit()?;
        self.inner.featured_communities().await
    }

    async fn communities_by_type(
        &self,
        community_type: CommunityType,
    ) -> AppResult<Vec<Community>> {
        self.hit()?;
        self.inner.communities_by_type(community_type).await
    }

    async fn community_stats(&self) -> AppResult<CommunityStats> {
        self.hit()?;
        self.inner.community_stats().await
    }

    async fn faqs(&self, params: &FaqQuery) -> AppResult<Page<Faq, FaqStats>> {
        self.hit()?;
        self.inner.faqs(params).await
    }

    async fn faq(&self, id: &str) -> AppResult<Faq> {
        self.hit()?;
        self.inner.faq(id).await
    }

    async fn featured_faqs(&self) -> AppResult<Vec<Faq>> {
        self.hit()?;
        self.inner.featured_faqs().await
    }

    async fn faqs_by_category(&self, category: FaqCategory) -> AppResult<Vec<Faq>> {
        self.hit()?;
        self.inner.faqs_by_category(category).await
    }

    async fn search_faqs(&self, term: &str, limit: usize) -> AppResult<Vec<Faq>> {
        self.hit()?;
        self.inner.search_faqs(term, limit).await
    }

    async fn related_faqs(&self, id: &str) -> AppResult<Vec<Faq>> {
        self.hit()?;
        self.inner.related_faqs(id).await
    }

    async fn faq_stats(&self) -> AppResult<FaqStats> {
        self.hit()?;
        self.inner.faq_stats().await
    }

    async fn submit_faq_feedback(&self, feedback: &FaqFeedback) -> AppResult<FeedbackResult> {
        self.hit()?;
        self.inner.submit_faq_feedback(feedback).await
    }

    async fn sessions(&self, params: &SessionQuery) -> AppResult<Page<Session, ScheduleStats>> {
        self.hit()?;
        self.inner.sessions(params).await
    }

    async fn session(&self, id: &str) -> AppResult<Session> {
        self.hit()?;
        self.inner.session(id).await
    }

    async fn sessions_by_day(&self, day: u8) -> AppResult<Vec<Session>> {
        self.hit()?;
        self.inner.sessions_by_day(day).await
    }

    async fn session_speakers(&self, id: &str) -> AppResult<Vec<Speaker>> {
        self.hit()?;
        self.inner.session_speakers(id).await
    }

    async fn schedule_stats(&self) -> AppResult<ScheduleStats> {
        self.hit()?;
        self.inner.schedule_stats().await
    }

    async fn submit_registration(
        &self,
        request: RegistrationRequest,
    ) -> AppResult<RegistrationReceipt> {
        self.hit()?;
        self.inner.submit_registration(request).await
    }

    async fn registrations(
        &self,
        params: &RegistrationQuery,
    ) -> AppResult<Page<Registration, RegistrationStats>> {
        self.hit()?;
        self.inner.registrations(params).await
    }

    async fn registration(&self, confirmation_code: &str) -> AppResult<Registration> {
        self.hit()?;
        self.inner.registration(confirmation_code).await
    }

    async fn registration_stats(&self) -> AppResult<RegistrationStats> {
        self.hit()?;
        self.inner.registration_stats().await
    }
}

// -------------------------------------------------------------------------
// Cache and retry
// -------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_identical_reads_share_one_fetch() {
    let delay = Duration::from_millis(30);
    let source = CountingSource::new(MockSource::new(Dataset::seed()).with_delay(delay, delay));
    let events = common::service_over(source.clone());

    let (a, b, c, d) = tokio::join!(
        events.speaker_stats(),
        events.speaker_stats(),
        events.speaker_stats(),
        events.speaker_stats(),
    );

    assert_eq!(source.calls(), 1);
    let a = a.unwrap();
    assert_eq!(a, b.unwrap());
    assert_eq!(a, c.unwrap());
    assert_eq!(a, d.unwrap());
}

#[tokio::test]
async fn repeated_reads_are_served_from_cache() {
    let source = CountingSource::new(MockSource::instant());
    let events = common::service_over(source.clone());

    let first = events.speakers(&SpeakerQuery::default()).await.unwrap();
    let second = events.speakers(&SpeakerQuery::default()).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(source.calls(), 1);

    let other = SpeakerQuery {
        page: Some(2),
        ..Default::default()
    };
    events.speakers(&other).await.unwrap();
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn network_failures_are_retried() {
    let source = CountingSource::failing(2);
    let events = common::service_over(source.clone());

    let stats = events.sponsor_stats().await.unwrap();
    assert_eq!(stats.total, Dataset::seed().sponsors.len() as u64);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn retries_stop_after_the_attempt_limit() {
    let source = CountingSource::failing(10);
    let events = common::service_over(source.clone());

    let err = events.faq_stats().await.unwrap_err();
    assert!(matches!(err, AppError::Network { .. }));
    assert_eq!(source.calls(), common::fast_retry().attempts);
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let source = CountingSource::new(MockSource::instant());
    let events = common::service_over(source.clone());

    let err = events.speaker("spk-404").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(err.to_string().contains("spk-404"));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let source = CountingSource::failing(3);
    let events = common::service_over(source.clone());

    assert!(events.community_stats().await.is_err());
    assert!(events.community_stats().await.is_ok());
    assert_eq!(source.calls(), 4);
}

// -------------------------------------------------------------------------
// Writes and invalidation
// -------------------------------------------------------------------------

#[tokio::test]
async fn registration_refreshes_cached_stats() {
    let events = common::mock_service();

    assert_eq!(events.registration_stats().await.unwrap().total, 0);

    let receipt = events
        .submit_registration(common::valid_request("ada@example.org"))
        .await
        .unwrap();
    assert!(receipt.confirmation_code.starts_with("TF-"));

    let stats = events.registration_stats().await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.active, 1);

    let found = events
        .registration(&receipt.confirmation_code.to_lowercase())
        .await
        .unwrap();
    assert_eq!(found.email, "ada@example.org");
}

#[tokio::test]
async fn duplicate_email_is_a_field_error() {
    let events = common::mock_service();
    events
        .submit_registration(common::valid_request("ada@example.org"))
        .await
        .unwrap();

    let err = events
        .submit_registration(common::valid_request("ADA@example.org"))
        .await
        .unwrap_err();
    let AppError::Validation(fields) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(fields[0].field.as_deref(), Some("email"));
}

#[tokio::test]
async fn feedback_updates_cached_faq_counts() {
    let events = common::mock_service();
    let before = events.faq("faq-001").await.unwrap();

    let result = events
        .submit_faq_feedback(&FaqFeedback {
            faq_id: "faq-001".to_string(),
            helpful: true,
            comment: None,
        })
        .await
        .unwrap();
    assert_eq!(result.helpful, before.helpful + 1);

    let after = events.faq("faq-001").await.unwrap();
    assert_eq!(after.helpful, before.helpful + 1);
    assert_eq!(after.not_helpful, before.not_helpful);
}

#[tokio::test]
async fn invalid_feedback_never_reaches_the_source() {
    let source = CountingSource::new(MockSource::instant());
    let events = common::service_over(source.clone());

    let err = events
        .submit_faq_feedback(&FaqFeedback {
            faq_id: "faq-001".to_string(),
            helpful: false,
            comment: Some("x".repeat(501)),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(source.calls(), 0);
}

// -------------------------------------------------------------------------
// Search history and grouped views
// -------------------------------------------------------------------------

#[tokio::test]
async fn search_history_keeps_the_latest_terms() {
    let events = common::mock_service();
    for term in ["wifi", "ticket", "food", "parking", "visa", "badge", "WIFI"] {
        events.search_faqs(term, None).await.unwrap();
    }
    events.search_faqs("   ", None).await.unwrap();

    let history = events.history().entries();
    assert_eq!(history.len(), MAX_ENTRIES);
    assert_eq!(history, vec!["WIFI", "badge", "visa", "parking", "food"]);
}

#[tokio::test]
async fn blank_search_returns_nothing() {
    let events = common::mock_service();
    assert!(events.search_faqs("  ", Some(5)).await.unwrap().is_empty());
    assert!(events.history().is_empty());
}

#[tokio::test]
async fn grouped_views_cover_the_seed_data() {
    let events = common::mock_service();
    let data = Dataset::seed();

    let tiers = events.sponsor_tiers().await.unwrap();
    assert_eq!(tiers[0].key, SponsorTier::Platinum);
    assert_eq!(
        tiers.iter().map(|g| g.len()).sum::<usize>(),
        data.sponsors.len()
    );

    let agenda = events.agenda().await.unwrap();
    let days: Vec<u8> = agenda.iter().map(|g| g.key).collect();
    assert_eq!(days, vec![1, 2, 3]);

    let sections = events.faq_sections().await.unwrap();
    assert_eq!(
        sections.iter().map(|g| g.len()).sum::<usize>(),
        data.faqs.len()
    );

    let locations = events.community_locations().await.unwrap();
    assert_eq!(
        locations.iter().map(|g| g.len()).sum::<usize>(),
        data.communities.len()
    );

    let tracks = events.speaker_tracks().await.unwrap();
    assert!(!tracks.is_empty());
    assert!(tracks.iter().all(|g| !g.is_empty()));
}

#[tokio::test]
async fn grouped_views_walk_every_page() {
    let seed = Dataset::seed();
    let sponsors: Vec<Sponsor> = (0..130)
        .map(|i| {
            let mut sponsor = seed.sponsors[i % seed.sponsors.len()].clone();
            sponsor.id = format!("spn-bulk-{i:03}");
            sponsor
        })
        .collect();
    let data = Dataset { sponsors, ..seed };
    let source = CountingSource::new(
        MockSource::new(data).with_delay(Duration::ZERO, Duration::ZERO),
    );
    let events = common::service_over(source.clone());

    let tiers = events.sponsor_tiers().await.unwrap();

    assert_eq!(tiers.iter().map(|g| g.len()).sum::<usize>(), 130);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn session_speakers_follow_the_session_order() {
    let events = common::mock_service();
    let data = Dataset::seed();
    let session = data
        .sessions
        .iter()
        .find(|s| !s.event_speakers.is_empty())
        .unwrap();

    let speakers = events.session_speakers(&session.id).await.unwrap();
    let expected: Vec<&str> = gather::schedule::speakers_for(session, &data.speakers)
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    let ids: Vec<&str> = speakers.iter().map(|s| s.id.as_str()).collect();
    assert!(!ids.is_empty());
    assert_eq!(ids, expected);

    let err = events.session_speakers("ses-404").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn registration_list_sees_new_submissions() {
    let events = common::mock_service();
    assert_eq!(
        events
            .registrations(&RegistrationQuery::default())
            .await
            .unwrap()
            .pagination
            .total,
        0
    );

    for email in ["ada@example.org", "grace@example.org"] {
        events
            .submit_registration(common::valid_request(email))
            .await
            .unwrap();
    }

    let page = events
        .registrations(&RegistrationQuery {
            search: Some("GRACE".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].email, "grace@example.org");
    assert_eq!(page.meta.unwrap().total, 2);
}

// -------------------------------------------------------------------------
// Wizard submission
// -------------------------------------------------------------------------

#[tokio::test]
async fn wizard_submits_a_complete_form() {
    let events = common::mock_service();
    let mut wizard = RegistrationWizard::with_form(common::valid_form("grace@example.org"));

    let receipt = wizard.submit(&events).await.unwrap();

    assert!(matches!(wizard.status(), WizardStatus::Success { .. }));
    assert_eq!(wizard.progress(), 100);
    assert_eq!(
        events
            .registration(&receipt.confirmation_code)
            .await
            .unwrap()
            .first_name,
        "Ada"
    );

    let again = wizard.submit(&events).await.unwrap_err();
    assert!(matches!(again, AppError::BadRequest(_)));

    wizard.reset();
    assert_eq!(wizard.current_step(), Step::Personal);
    wizard.form = common::valid_form("hopper@example.org");
    wizard.submit(&events).await.unwrap();
    assert_eq!(events.registration_stats().await.unwrap().total, 2);
}

#[tokio::test]
async fn wizard_returns_to_the_first_invalid_step() {
    let events = common::mock_service();
    let mut form = common::valid_form("grace@example.org");
    form.emergency_contact.phone = "123".to_string();
    let mut wizard = RegistrationWizard::with_form(form);

    let err = wizard.submit(&events).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(wizard.current_step(), Step::EmergencyContact);
    assert!(wizard.field_error("emergencyContact.phone").is_some());
}

#[tokio::test]
async fn wizard_keeps_server_field_errors() {
    let events = common::mock_service();
    events
        .submit_registration(common::valid_request("taken@example.org"))
        .await
        .unwrap();

    let mut wizard = RegistrationWizard::with_form(common::valid_form("taken@example.org"));
    assert!(wizard.submit(&events).await.is_err());

    assert!(matches!(wizard.status(), WizardStatus::Error { .. }));
    assert!(wizard.field_error("email").is_some());
    assert_eq!(wizard.prev_step(), Step::EmergencyContact);
}
