//! Event data services.
//!
//! [`EventSource`] is the uniform async contract over conference data. Two
//! sources implement it: [`MockSource`] answers from the seed dataset after
//! an artificial delay, [`RemoteSource`] calls the REST API. Callers use
//! [`EventService`], which adds caching, retry and search history on top of
//! whichever source was configured.

mod event_service;
pub mod grouping;
mod mock;
mod remote;
pub mod wire;

use async_trait::async_trait;

pub use event_service::EventService;
pub use mock::MockSource;
pub use remote::RemoteSource;

use crate::error::AppResult;
use crate::gather::{
    CommunityQuery, CommunityStats, FaqQuery, FaqStats, Page, RegistrationQuery,
    RegistrationStats, ScheduleStats, SessionQuery, SpeakerQuery, SpeakerStats, SponsorQuery,
    SponsorStats,
};
use crate::models::{
    Community, CommunityType, Faq, FaqCategory, FaqFeedback, FeedbackResult, Registration,
    RegistrationReceipt, RegistrationRequest, Session, Speaker, Sponsor, SponsorTier,
};

/// Source of conference data.
#[async_trait]
pub trait EventSource: Send + Sync {
    // Speakers
    async fn speakers(&self, params: &SpeakerQuery) -> AppResult<Page<Speaker, SpeakerStats>>;
    async fn speaker(&self, id: &str) -> AppResult<Speaker>;
    async fn featured_speakers(&self) -> AppResult<Vec<Speaker>>;
    async fn speaker_stats(&self) -> AppResult<SpeakerStats>;

    // Sponsors
    async fn sponsors(&self, params: &SponsorQuery) -> AppResult<Page<Sponsor, SponsorStats>>;
    async fn sponsor(&self, id: &str) -> AppResult<Sponsor>;
    async fn featured_sponsors(&self) -> AppResult<Vec<Sponsor>>;
    async fn sponsors_by_tier(&self, tier: SponsorTier) -> AppResult<Vec<Sponsor>>;
    async fn sponsor_stats(&self) -> AppResult<SponsorStats>;

    // Communities
    async fn communities(
        &self,
        params: &CommunityQuery,
    ) -> AppResult<Page<Community, CommunityStats>>;
    async fn community(&self, id: &str) -> AppResult<Community>;
    async fn featured_communities(&self) -> AppResult<Vec<Community>>;
    async fn communities_by_type(&self, community_type: CommunityType)
    -> AppResult<Vec<Community>>;
    async fn community_stats(&self) -> AppResult<CommunityStats>;

    // FAQs
    async fn faqs(&self, params: &FaqQuery) -> AppResult<Page<Faq, FaqStats>>;
    async fn faq(&self, id: &str) -> AppResult<Faq>;
    async fn featured_faqs(&self) -> AppResult<Vec<Faq>>;
    async fn faqs_by_category(&self, category: FaqCategory) -> AppResult<Vec<Faq>>;
    async fn search_faqs(&self, term: &str, limit: usize) -> AppResult<Vec<Faq>>;
    async fn related_faqs(&self, id: &str) -> AppResult<Vec<Faq>>;
    async fn faq_stats(&self) -> AppResult<FaqStats>;
    async fn submit_faq_feedback(&self, feedback: &FaqFeedback) -> AppResult<FeedbackResult>;

    // Schedule
    async fn sessions(&self, params: &SessionQuery) -> AppResult<Page<Session, ScheduleStats>>;
    async fn session(&self, id: &str) -> AppResult<Session>;
    async fn sessions_by_day(&self, day: u8) -> AppResult<Vec<Session>>;
    async fn session_speakers(&self, id: &str) -> AppResult<Vec<Speaker>>;
    async fn schedule_stats(&self) -> AppResult<ScheduleStats>;

    // Registration
    async fn submit_registration(
        &self,
        request: RegistrationRequest,
    ) -> AppResult<RegistrationReceipt>;
    async fn registrations(
        &self,
        params: &RegistrationQuery,
    ) -> AppResult<Page<Registration, RegistrationStats>>;
    async fn registration(&self, confirmation_code: &str) -> AppResult<Registration>;
    async fn registration_stats(&self) -> AppResult<RegistrationStats>;
}
