//! In-memory event source over the seed dataset.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use rand::Rng;
use tracing::{debug, info};

use super::EventSource;
use crate::data::Dataset;
use crate::error::{AppError, AppResult};
use crate::form::{ValidationError, validate_feedback, validate_registration};
use crate::gather::{
    self, CommunityQuery, CommunityStats, FaqQuery, FaqStats, Page, RegistrationQuery,
    RegistrationStats, ScheduleStats, SessionQuery, SpeakerQuery, SpeakerStats, SponsorQuery,
    SponsorStats,
};
use crate::models::{
    Community, CommunityType, Faq, FaqCategory, FaqFeedback, FeedbackResult, Record,
    Registration, RegistrationReceipt, RegistrationRequest, Session, Speaker, Sponsor,
    SponsorTier,
};

/// Default simulated latency bounds.
pub const DEFAULT_DELAY_MIN: Duration = Duration::from_millis(300);
pub const DEFAULT_DELAY_MAX: Duration = Duration::from_millis(600);

const CODE_PREFIX: &str = "TF-";
const CODE_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Votes received since startup for one FAQ.
#[derive(Debug, Clone, Copy, Default)]
struct VoteDelta {
    helpful: u32,
    not_helpful: u32,
}

/// Event source backed by an in-memory [`Dataset`].
///
/// Every call first sleeps a random delay from the configured range.
/// Submitted registrations and FAQ votes are kept in memory for the life of
/// the source.
pub struct MockSource {
    data: Dataset,
    delay_min: Duration,
    delay_max: Duration,
    registrations: RwLock<Vec<Registration>>,
    votes: DashMap<String, VoteDelta>,
}

impl MockSource {
    pub fn new(data: Dataset) -> Self {
        Self {
            data,
            delay_min: DEFAULT_DELAY_MIN,
            delay_max: DEFAULT_DELAY_MAX,
            registrations: RwLock::new(Vec::new()),
            votes: DashMap::new(),
        }
    }

    /// Seed data with no simulated latency.
    pub fn instant() -> Self {
        Self::new(Dataset::seed()).with_delay(Duration::ZERO, Duration::ZERO)
    }

    /// Set the latency range. A reversed range is normalized.
    pub fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.delay_min = min.min(max);
        self.delay_max = max.max(min);
        self
    }

    async fn latency(&self) {
        if self.delay_max.is_zero() {
            return;
        }
        let millis = rand::thread_rng()
            .gen_range(self.delay_min.as_millis() as u64..=self.delay_max.as_millis() as u64);
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    /// Seed FAQs with the recorded votes added.
    fn current_faqs(&self) -> Vec<Faq> {
        let mut faqs = self.data.faqs.clone();
        if self.votes.is_empty() {
            return faqs;
        }
        for faq in &mut faqs {
            if let Some(delta) = self.votes.get(&faq.id) {
                faq.helpful = faq.helpful.saturating_add(delta.helpful);
                faq.not_helpful = faq.not_helpful.saturating_add(delta.not_helpful);
            }
        }
        faqs
    }

    fn new_confirmation_code(existing: &[Registration]) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let suffix: String = (0..CODE_LEN)
                .map(|_| char::from(CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())]))
                .collect();
            let code = format!("{CODE_PREFIX}{suffix}");
            if !existing.iter().any(|r| r.confirmation_code == code) {
                return code;
            }
        }
    }
}

impl std::fmt::Debug for MockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSource")
            .field("delay_min", &self.delay_min)
            .field("delay_max", &self.delay_max)
            .field("registrations", &self.registrations.read().len())
            .finish()
    }
}

#[async_trait]
impl EventSource for MockSource {
    async fn speakers(&self, params: &SpeakerQuery) -> AppResult<Page<Speaker, SpeakerStats>> {
        self.latency().await;
        debug!(?params, "mock speakers query");
        Ok(gather::speakers::query(&self.data.speakers, params))
    }

    async fn speaker(&self, id: &str) -> AppResult<Speaker> {
        self.latency().await;
        gather::find(&self.data.speakers, id).cloned()
    }

    async fn featured_speakers(&self) -> AppResult<Vec<Speaker>> {
        self.latency().await;
        Ok(gather::speakers::featured(&self.data.speakers))
    }

    async fn speaker_stats(&self) -> AppResult<SpeakerStats> {
        self.latency().await;
        Ok(gather::speakers::stats(&self.data.speakers))
    }

    async fn sponsors(&self, params: &SponsorQuery) -> AppResult<Page<Sponsor, SponsorStats>> {
        self.latency().await;
        debug!(?params, "mock sponsors query");
        Ok(gather::sponsors::query(&self.data.sponsors, params))
    }

    async fn sponsor(&self, id: &str) -> AppResult<Sponsor> {
        self.latency().await;
        gather::find(&self.data.sponsors, id).cloned()
    }

    async fn featured_sponsors(&self) -> AppResult<Vec<Sponsor>> {
        self.latency().await;
        Ok(gather::sponsors::featured(&self.data.sponsors))
    }

    async fn sponsors_by_tier(&self, tier: SponsorTier) -> AppResult<Vec<Sponsor>> {
        self.latency().await;
        Ok(gather::sponsors::by_tier(&self.data.sponsors, tier))
    }

    async fn sponsor_stats(&self) -> AppResult<SponsorStats> {
        self.latency().await;
        Ok(gather::sponsors::stats(&self.data.sponsors))
    }

    async fn communities(
        &self,
        params: &CommunityQuery,
    ) -> AppResult<Page<Community, CommunityStats>> {
        self.latency().await;
        debug!(?params, "mock communities query");
        Ok(gather::communities::query(&self.data.communities, params))
    }

    async fn community(&self, id: &str) -> AppResult<Community> {
        self.latency().await;
        gather::find(&self.data.communities, id).cloned()
    }

    async fn featured_communities(&self) -> AppResult<Vec<Community>> {
        self.latency().await;
        Ok(gather::communities::featured(&self.data.communities))
    }

    async fn communities_by_type(
        &self,
        community_type: CommunityType,
    ) -> AppResult<Vec<Community>> {
        self.latency().await;
        Ok(gather::communities::by_type(
            &self.data.communities,
            community_type,
        ))
    }

    async fn community_stats(&self) -> AppResult<CommunityStats> {
        self.latency().await;
        Ok(gather::communities::stats(&self.data.communities))
    }

    async fn faqs(&self, params: &FaqQuery) -> AppResult<Page<Faq, FaqStats>> {
        self.latency().await;
        debug!(?params, "mock faqs query");
        Ok(gather::faqs::query(&self.current_faqs(), params))
    }

    async fn faq(&self, id: &str) -> AppResult<Faq> {
        self.latency().await;
        gather::find(&self.current_faqs(), id).cloned()
    }

    async fn featured_faqs(&self) -> AppResult<Vec<Faq>> {
        self.latency().await;
        Ok(gather::faqs::featured(&self.current_faqs()))
    }

    async fn faqs_by_category(&self, category: FaqCategory) -> AppResult<Vec<Faq>> {
        self.latency().await;
        Ok(gather::faqs::by_category(&self.current_faqs(), category))
    }

    async fn search_faqs(&self, term: &str, limit: usize) -> AppResult<Vec<Faq>> {
        self.latency().await;
        Ok(gather::faqs::search(&self.current_faqs(), term, limit))
    }

    async fn related_faqs(&self, id: &str) -> AppResult<Vec<Faq>> {
        self.latency().await;
        let faqs = self.current_faqs();
        let faq = gather::find(&faqs, id)?;
        Ok(gather::faqs::related(&faqs, faq).into_iter().cloned().collect())
    }

    async fn faq_stats(&self) -> AppResult<FaqStats> {
        self.latency().await;
        Ok(gather::faqs::stats(&self.current_faqs()))
    }

    async fn submit_faq_feedback(&self, feedback: &FaqFeedback) -> AppResult<FeedbackResult> {
        self.latency().await;
        validate_feedback(feedback)?;

        let faq = gather::find(&self.data.faqs, &feedback.faq_id)?;
        let delta = {
            let mut entry = self.votes.entry(faq.id.clone()).or_default();
            if feedback.helpful {
                entry.helpful = entry.helpful.saturating_add(1);
            } else {
                entry.not_helpful = entry.not_helpful.saturating_add(1);
            }
            *entry
        };

        debug!(faq_id = %faq.id, helpful = feedback.helpful, "faq feedback recorded");

        Ok(FeedbackResult {
            helpful: faq.helpful.saturating_add(delta.helpful),
            not_helpful: faq.not_helpful.saturating_add(delta.not_helpful),
        })
    }

    async fn sessions(&self, params: &SessionQuery) -> AppResult<Page<Session, ScheduleStats>> {
        self.latency().await;
        debug!(?params, "mock schedule query");
        Ok(gather::schedule::query(&self.data.sessions, params))
    }

    async fn session(&self, id: &str) -> AppResult<Session> {
        self.latency().await;
        gather::find(&self.data.sessions, id).cloned()
    }

    async fn sessions_by_day(&self, day: u8) -> AppResult<Vec<Session>> {
        self.latency().await;
        Ok(gather::schedule::by_day(&self.data.sessions, day))
    }

    async fn session_speakers(&self, id: &str) -> AppResult<Vec<Speaker>> {
        self.latency().await;
        let session = gather::find(&self.data.sessions, id)?;
        Ok(gather::schedule::speakers_for(session, &self.data.speakers)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn schedule_stats(&self) -> AppResult<ScheduleStats> {
        self.latency().await;
        Ok(gather::schedule::stats(&self.data.sessions))
    }

    async fn submit_registration(
        &self,
        request: RegistrationRequest,
    ) -> AppResult<RegistrationReceipt> {
        self.latency().await;
        validate_registration(&request)?;

        let mut registrations = self.registrations.write();

        let email = request.email.trim().to_lowercase();
        if registrations
            .iter()
            .any(|r| r.is_active && r.email.to_lowercase() == email)
        {
            return Err(AppError::Validation(vec![ValidationError::field(
                "email",
                "This email address is already registered",
            )]));
        }

        let code = Self::new_confirmation_code(&registrations);
        let registration = Registration::from_request(request, code, Utc::now());
        let receipt = registration.receipt();

        info!(
            confirmation_code = %registration.id(),
            ticket_type = %registration.ticket_type,
            "registration accepted"
        );
        registrations.push(registration);

        Ok(receipt)
    }

    async fn registrations(
        &self,
        params: &RegistrationQuery,
    ) -> AppResult<Page<Registration, RegistrationStats>> {
        self.latency().await;
        debug!(?params, "mock registrations query");
        Ok(gather::registrations::query(
            &self.registrations.read(),
            params,
        ))
    }

    async fn registration(&self, confirmation_code: &str) -> AppResult<Registration> {
        self.latency().await;
        gather::registrations::find_by_code(&self.registrations.read(), confirmation_code).cloned()
    }

    async fn registration_stats(&self) -> AppResult<RegistrationStats> {
        self.latency().await;
        Ok(gather::registrations::stats(&self.registrations.read()))
    }
}
