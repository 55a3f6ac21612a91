//! Cached, retrying access to an [`EventSource`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::EventSource;
use super::grouping::{self, Group};
use crate::cache::{QueryCache, cache_key};
use crate::error::AppResult;
use crate::form::validate_feedback;
use crate::gather::types::MAX_LIMIT;
use crate::gather::{
    CommunityQuery, CommunityStats, FaqQuery, FaqStats, Page, RegistrationQuery,
    RegistrationStats, ScheduleStats, SessionQuery, SpeakerQuery, SpeakerStats, SponsorQuery,
    SponsorStats,
};
use crate::models::{
    Community, CommunityType, Faq, FaqCategory, FaqFeedback, FeedbackResult, Registration,
    RegistrationReceipt, RegistrationRequest, Session, Speaker, Sponsor, SponsorTier, Track,
};
use crate::search::SearchHistory;

const SPEAKERS: &str = "speakers";
const SPONSORS: &str = "sponsors";
const COMMUNITIES: &str = "communities";
const FAQS: &str = "faqs";
const SCHEDULE: &str = "schedule";
const REGISTRATION: &str = "registration";

/// Default number of FAQ search hits.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Event data for callers: every read goes through the query cache, which
/// de-duplicates concurrent identical requests and retries transport
/// failures. Writes go straight to the source and invalidate what they
/// change.
#[derive(Clone)]
pub struct EventService {
    source: Arc<dyn EventSource>,
    cache: QueryCache,
    history: Arc<SearchHistory>,
}

impl EventService {
    pub fn new(source: Arc<dyn EventSource>, cache: QueryCache) -> Self {
        Self {
            source,
            cache,
            history: Arc::new(SearchHistory::new()),
        }
    }

    pub fn with_history(mut self, history: SearchHistory) -> Self {
        self.history = Arc::new(history);
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    async fn cached<T, P, F, Fut>(
        &self,
        resource: &str,
        operation: &str,
        params: &P,
        fetch: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        P: Serialize + ?Sized,
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.cache
            .get_or_fetch(cache_key(resource, operation, &params)?, fetch)
            .await
    }

    // Speakers

    pub async fn speakers(&self, params: &SpeakerQuery) -> AppResult<Page<Speaker, SpeakerStats>> {
        self.cached(SPEAKERS, "list", params, || self.source.speakers(params))
            .await
    }

    pub async fn speaker(&self, id: &str) -> AppResult<Speaker> {
        self.cached(SPEAKERS, "get", id, || self.source.speaker(id))
            .await
    }

    pub async fn featured_speakers(&self) -> AppResult<Vec<Speaker>> {
        self.cached(SPEAKERS, "featured", &(), || self.source.featured_speakers())
            .await
    }

    pub async fn speaker_stats(&self) -> AppResult<SpeakerStats> {
        self.cached(SPEAKERS, "stats", &(), || self.source.speaker_stats())
            .await
    }

    // Sponsors

    pub async fn sponsors(&self, params: &SponsorQuery) -> AppResult<Page<Sponsor, SponsorStats>> {
        self.cached(SPONSORS, "list", params, || self.source.sponsors(params))
            .await
    }

    pub async fn sponsor(&self, id: &str) -> AppResult<Sponsor> {
        self.cached(SPONSORS, "get", id, || self.source.sponsor(id))
            .await
    }

    pub async fn featured_sponsors(&self) -> AppResult<Vec<Sponsor>> {
        self.cached(SPONSORS, "featured", &(), || self.source.featured_sponsors())
            .await
    }

    pub async fn sponsors_by_tier(&self, tier: SponsorTier) -> AppResult<Vec<Sponsor>> {
        self.cached(SPONSORS, "tier", &tier, || self.source.sponsors_by_tier(tier))
            .await
    }

    pub async fn sponsor_stats(&self) -> AppResult<SponsorStats> {
        self.cached(SPONSORS, "stats", &(), || self.source.sponsor_stats())
            .await
    }

    // Communities

    pub async fn communities(
        &self,
        params: &CommunityQuery,
    ) -> AppResult<Page<Community, CommunityStats>> {
        self.cached(COMMUNITIES, "list", params, || {
            self.source.communities(params)
        })
        .await
    }

    pub async fn community(&self, id: &str) -> AppResult<Community> {
        self.cached(COMMUNITIES, "get", id, || self.source.community(id))
            .await
    }

    pub async fn featured_communities(&self) -> AppResult<Vec<Community>> {
        self.cached(COMMUNITIES, "featured", &(), || {
            self.source.featured_communities()
        })
        .await
    }

    pub async fn communities_by_type(
        &self,
        community_type: CommunityType,
    ) -> AppResult<Vec<Community>> {
        self.cached(COMMUNITIES, "type", &community_type, || {
            self.source.communities_by_type(community_type)
        })
        .await
    }

    pub async fn community_stats(&self) -> AppResult<CommunityStats> {
        self.cached(COMMUNITIES, "stats", &(), || self.source.community_stats())
            .await
    }

    // FAQs

    pub async fn faqs(&self, params: &FaqQuery) -> AppResult<Page<Faq, FaqStats>> {
        self.cached(FAQS, "list", params, || self.source.faqs(params))
            .await
    }

    pub async fn faq(&self, id: &str) -> AppResult<Faq> {
        self.cached(FAQS, "get", id, || self.source.faq(id)).await
    }

    pub async fn featured_faqs(&self) -> AppResult<Vec<Faq>> {
        self.cached(FAQS, "featured", &(), || self.source.featured_faqs())
            .await
    }

    pub async fn faqs_by_category(&self, category: FaqCategory) -> AppResult<Vec<Faq>> {
        self.cached(FAQS, "category", &category, || {
            self.source.faqs_by_category(category)
        })
        .await
    }

    /// Search FAQs and remember the term in the search history.
    pub async fn search_faqs(&self, term: &str, limit: Option<usize>) -> AppResult<Vec<Faq>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        self.history.record(term).await;

        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .min(MAX_LIMIT as usize);
        let key = term.to_lowercase();
        self.cached(FAQS, "search", &(key.as_str(), limit), || {
            self.source.search_faqs(term, limit)
        })
        .await
    }

    pub async fn related_faqs(&self, id: &str) -> AppResult<Vec<Faq>> {
        self.cached(FAQS, "related", id, || self.source.related_faqs(id))
            .await
    }

    pub async fn faq_stats(&self) -> AppResult<FaqStats> {
        self.cached(FAQS, "stats", &(), || self.source.faq_stats())
            .await
    }

    /// Validate and record a vote. Cached FAQ reads are dropped so counts
    /// reflect the vote.
    pub async fn submit_faq_feedback(&self, feedback: &FaqFeedback) -> AppResult<FeedbackResult> {
        validate_feedback(feedback)?;
        let result = self.source.submit_faq_feedback(feedback).await?;
        self.cache.invalidate_prefix(&format!("{FAQS}:")).await;
        debug!(faq_id = %feedback.faq_id, "faq cache invalidated after feedback");
        Ok(result)
    }

    // Schedule

    pub async fn sessions(&self, params: &SessionQuery) -> AppResult<Page<Session, ScheduleStats>> {
        self.cached(SCHEDULE, "list", params, || self.source.sessions(params))
            .await
    }

    pub async fn session(&self, id: &str) -> AppResult<Session> {
        self.cached(SCHEDULE, "get", id, || self.source.session(id))
            .await
    }

    pub async fn sessions_by_day(&self, day: u8) -> AppResult<Vec<Session>> {
        self.cached(SCHEDULE, "day", &day, || self.source.sessions_by_day(day))
            .await
    }

    /// Speakers presenting a session, in the order the session lists them.
    pub async fn session_speakers(&self, id: &str) -> AppResult<Vec<Speaker>> {
        self.cached(SCHEDULE, "speakers", id, || self.source.session_speakers(id))
            .await
    }

    pub async fn schedule_stats(&self) -> AppResult<ScheduleStats> {
        self.cached(SCHEDULE, "stats", &(), || self.source.schedule_stats())
            .await
    }

    // Registration

    /// Submit a registration. Never retried; on success registration reads
    /// are invalidated so stats include it.
    pub async fn submit_registration(
        &self,
        request: RegistrationRequest,
    ) -> AppResult<RegistrationReceipt> {
        let receipt = self.source.submit_registration(request).await?;
        self.cache
            .invalidate_prefix(&format!("{REGISTRATION}:"))
            .await;
        info!(
            confirmation_code = %receipt.confirmation_code,
            "registration submitted"
        );
        Ok(receipt)
    }

    pub async fn registrations(
        &self,
        params: &RegistrationQuery,
    ) -> AppResult<Page<Registration, RegistrationStats>> {
        self.cached(REGISTRATION, "list", params, || {
            self.source.registrations(params)
        })
        .await
    }

    pub async fn registration(&self, confirmation_code: &str) -> AppResult<Registration> {
        let code = confirmation_code.trim().to_uppercase();
        self.cached(REGISTRATION, "get", code.as_str(), || {
            self.source.registration(&code)
        })
        .await
    }

    pub async fn registration_stats(&self) -> AppResult<RegistrationStats> {
        self.cached(REGISTRATION, "stats", &(), || {
            self.source.registration_stats()
        })
        .await
    }

    // Grouped views

    /// All sponsors grouped by tier.
    pub async fn sponsor_tiers(&self) -> AppResult<Vec<Group<SponsorTier, Sponsor>>> {
        let sponsors =
            all_pages(move |q: SponsorQuery| async move { self.sponsors(&q).await }).await?;
        Ok(grouping::sponsors_by_tier(&sponsors))
    }

    /// All FAQs grouped by category.
    pub async fn faq_sections(&self) -> AppResult<Vec<Group<FaqCategory, Faq>>> {
        let faqs = all_pages(move |q: FaqQuery| async move { self.faqs(&q).await }).await?;
        Ok(grouping::faqs_by_category(&faqs))
    }

    /// All communities grouped by location.
    pub async fn community_locations(&self) -> AppResult<Vec<Group<String, Community>>> {
        let communities =
            all_pages(move |q: CommunityQuery| async move { self.communities(&q).await }).await?;
        Ok(grouping::communities_by_location(&communities))
    }

    /// The whole schedule grouped by day.
    pub async fn agenda(&self) -> AppResult<Vec<Group<u8, Session>>> {
        let sessions =
            all_pages(move |q: SessionQuery| async move { self.sessions(&q).await }).await?;
        Ok(grouping::sessions_by_day(&sessions))
    }

    /// All speakers grouped by track.
    pub async fn speaker_tracks(&self) -> AppResult<Vec<Group<Track, Speaker>>> {
        let speakers =
            all_pages(move |q: SpeakerQuery| async move { self.speakers(&q).await }).await?;
        Ok(grouping::speakers_by_track(&speakers))
    }
}

/// Walk every page of an unfiltered list at the largest page size and
/// collect the items.
async fn all_pages<Q, T, M, F, Fut>(mut fetch: F) -> AppResult<Vec<T>>
where
    Q: Default + PagedQuery,
    F: FnMut(Q) -> Fut,
    Fut: Future<Output = AppResult<Page<T, M>>>,
{
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let mut query = Q::default();
        query.set_window(page, MAX_LIMIT);
        let current = fetch(query).await?;
        let done = current.items.is_empty()
            || !current.pagination.has_next
            || current.pagination.page >= current.pagination.total_pages;
        items.extend(current.items);
        if done {
            return Ok(items);
        }
        page += 1;
    }
}

trait PagedQuery {
    fn set_window(&mut self, page: u32, limit: u32);
}

macro_rules! paged_query {
    ($($query:ty),+) => {
        $(impl PagedQuery for $query {
            fn set_window(&mut self, page: u32, limit: u32) {
                self.page = Some(page);
                self.limit = Some(limit);
            }
        })+
    };
}

paged_query!(SpeakerQuery, SponsorQuery, CommunityQuery, FaqQuery, SessionQuery);

impl std::fmt::Debug for EventService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventService")
            .field("cache", &self.cache)
            .finish()
    }
}
