//! HTTP event source against the event REST API.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::EventSource;
use super::wire::{Collection, DocsEnvelope, SearchParams, from_pagination_envelope};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::gather::{
    CommunityQuery, CommunityStats, FaqQuery, FaqStats, Page, RegistrationQuery,
    RegistrationStats, ScheduleStats, SessionQuery, SpeakerQuery, SpeakerStats, SponsorQuery,
    SponsorStats,
};
use crate::models::{
    Community, CommunityType, Faq, FaqCategory, FaqFeedback, FeedbackResult, Record,
    Registration, RegistrationReceipt, RegistrationRequest, Session, Speaker, Sponsor,
    SponsorTier,
};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Event source that calls `{base}/api/event/...`.
///
/// Never retries; failures other than 404 and 422 become
/// [`AppError::Network`].
#[derive(Clone, Debug)]
pub struct RemoteSource {
    client: reqwest::Client,
    base: Url,
}

impl RemoteSource {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("invalid API base URL {base_url:?}: {e}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("API base URL {base_url:?} cannot be used as a base");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, base })
    }

    /// `{base}/api/event/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Internal("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["api", "event"])
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        what: &str,
        segments: &[&str],
        query: Option<&(dyn ErasedQuery + Sync)>,
        missing: Option<(&'static str, &str)>,
    ) -> AppResult<T> {
        let mut request = self.client.get(self.endpoint(segments)?);
        if let Some(query) = query {
            request = query.apply(request);
        }
        self.send(what, request, missing).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        what: &str,
        segments: &[&str],
        body: &B,
        missing: Option<(&'static str, &str)>,
    ) -> AppResult<T> {
        let request = self.client.post(self.endpoint(segments)?).json(body);
        self.send(what, request, missing).await
    }

    /// Send and decode, mapping status codes onto [`AppError`].
    async fn send<T: DeserializeOwned>(
        &self,
        what: &str,
        request: RequestBuilder,
        missing: Option<(&'static str, &str)>,
    ) -> AppResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::network(what, e))?;
        let status = response.status();
        debug!(what = %what, status = %status, "event API response");

        match status {
            StatusCode::NOT_FOUND => match missing {
                Some((entity, id)) => Err(AppError::not_found(entity, id)),
                None => Err(AppError::network(what, "endpoint not found")),
            },
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body: ErrorBody = response
                    .json()
                    .await
                    .map_err(|e| AppError::network(what, e))?;
                Err(AppError::Validation(body.fields))
            }
            s if s.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| AppError::network(what, e)),
            s => Err(AppError::network(what, format!("HTTP {s}"))),
        }
    }

    async fn get_docs<T: DeserializeOwned, M: DeserializeOwned>(
        &self,
        what: &str,
        segments: &[&str],
        query: &(dyn ErasedQuery + Sync),
    ) -> AppResult<Page<T, M>> {
        let envelope: DocsEnvelope<T, M> = self.get(what, segments, Some(query), None).await?;
        Ok(envelope.into())
    }

    /// A "pagination" shaped list. A body of the wrong shape is a fetch
    /// failure like any other.
    async fn get_collection<T, M>(
        &self,
        what: &str,
        query: &(dyn ErasedQuery + Sync),
    ) -> AppResult<Page<T, M>>
    where
        T: Collection + DeserializeOwned,
        M: DeserializeOwned,
    {
        let body: Value = self.get(what, &[T::KEY], Some(query), None).await?;
        from_pagination_envelope(body).map_err(|e| AppError::network(what, e))
    }

    async fn get_one<T: Record + DeserializeOwned>(
        &self,
        segments: &[&str],
        id: &str,
    ) -> AppResult<T> {
        self.get(T::ENTITY, segments, None, Some((T::ENTITY, id)))
            .await
    }
}

/// Query-string parameters behind a trait object, so the request helpers
/// stay non-generic over the parameter type.
trait ErasedQuery {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder;
}

impl<Q: Serialize> ErasedQuery for Q {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(self)
    }
}

#[async_trait]
impl EventSource for RemoteSource {
    async fn speakers(&self, params: &SpeakerQuery) -> AppResult<Page<Speaker, SpeakerStats>> {
        self.get_docs("speakers", &["speakers"], params).await
    }

    async fn speaker(&self, id: &str) -> AppResult<Speaker> {
        self.get_one(&["speakers", id], id).await
    }

    async fn featured_speakers(&self) -> AppResult<Vec<Speaker>> {
        self.get("featured speakers", &["speakers", "featured"], None, None)
            .await
    }

    async fn speaker_stats(&self) -> AppResult<SpeakerStats> {
        self.get("speaker stats", &["speakers", "stats"], None, None)
            .await
    }

    async fn sponsors(&self, params: &SponsorQuery) -> AppResult<Page<Sponsor, SponsorStats>> {
        self.get_collection("sponsors", params).await
    }

    async fn sponsor(&self, id: &str) -> AppResult<Sponsor> {
        self.get_one(&["sponsors", id], id).await
    }

    async fn featured_sponsors(&self) -> AppResult<Vec<Sponsor>> {
        self.get("featured sponsors", &["sponsors", "featured"], None, None)
            .await
    }

    async fn sponsors_by_tier(&self, tier: SponsorTier) -> AppResult<Vec<Sponsor>> {
        self.get("sponsors", &["sponsors", "tier", tier.as_str()], None, None)
            .await
    }

    async fn sponsor_stats(&self) -> AppResult<SponsorStats> {
        self.get("sponsor stats", &["sponsors", "stats"], None, None)
            .await
    }

    async fn communities(
        &self,
        params: &CommunityQuery,
    ) -> AppResult<Page<Community, CommunityStats>> {
        self.get_collection("communities", params).await
    }

    async fn community(&self, id: &str) -> AppResult<Community> {
        self.get_one(&["communities", id], id).await
    }

    async fn featured_communities(&self) -> AppResult<Vec<Community>> {
        self.get(
            "featured communities",
            &["communities", "featured"],
            None,
            None,
        )
        .await
    }

    async fn communities_by_type(
        &self,
        community_type: CommunityType,
    ) -> AppResult<Vec<Community>> {
        self.get(
            "communities",
            &["communities", "type", community_type.as_str()],
            None,
            None,
        )
        .await
    }

    async fn community_stats(&self) -> AppResult<CommunityStats> {
        self.get("community stats", &["communities", "stats"], None, None)
            .await
    }

    async fn faqs(&self, params: &FaqQuery) -> AppResult<Page<Faq, FaqStats>> {
        self.get_docs("faqs", &["faqs"], params).await
    }

    async fn faq(&self, id: &str) -> AppResult<Faq> {
        self.get_one(&["faqs", id], id).await
    }

    async fn featured_faqs(&self) -> AppResult<Vec<Faq>> {
        self.get("featured faqs", &["faqs", "featured"], None, None)
            .await
    }

    async fn faqs_by_category(&self, category: FaqCategory) -> AppResult<Vec<Faq>> {
        self.get("faqs", &["faqs", "category", category.as_str()], None, None)
            .await
    }

    async fn search_faqs(&self, term: &str, limit: usize) -> AppResult<Vec<Faq>> {
        let params = SearchParams {
            q: term.to_string(),
            limit: Some(limit),
        };
        self.get("faq search", &["faqs", "search"], Some(&params), None)
            .await
    }

    async fn related_faqs(&self, id: &str) -> AppResult<Vec<Faq>> {
        self.get(
            "related faqs",
            &["faqs", id, "related"],
            None,
            Some((Faq::ENTITY, id)),
        )
        .await
    }

    async fn faq_stats(&self) -> AppResult<FaqStats> {
        self.get("faq stats", &["faqs", "stats"], None, None).await
    }

    async fn submit_faq_feedback(&self, feedback: &FaqFeedback) -> AppResult<FeedbackResult> {
        self.post(
            "faq feedback",
            &["faqs", "feedback"],
            feedback,
            Some((Faq::ENTITY, feedback.faq_id.as_str())),
        )
        .await
    }

    async fn sessions(&self, params: &SessionQuery) -> AppResult<Page<Session, ScheduleStats>> {
        self.get_docs("schedule", &["schedule"], params).await
    }

    async fn session(&self, id: &str) -> AppResult<Session> {
        self.get_one(&["schedule", id], id).await
    }

    async fn sessions_by_day(&self, day: u8) -> AppResult<Vec<Session>> {
        let day = day.to_string();
        self.get("schedule", &["schedule", "day", day.as_str()], None, None)
            .await
    }

    async fn session_speakers(&self, id: &str) -> AppResult<Vec<Speaker>> {
        self.get(
            "session speakers",
            &["schedule", id, "speakers"],
            None,
            Some((Session::ENTITY, id)),
        )
        .await
    }

    async fn schedule_stats(&self) -> AppResult<ScheduleStats> {
        self.get("schedule stats", &["schedule", "stats"], None, None)
            .await
    }

    async fn submit_registration(
        &self,
        request: RegistrationRequest,
    ) -> AppResult<RegistrationReceipt> {
        self.post("registration", &["registration"], &request, None)
            .await
    }

    async fn registrations(
        &self,
        params: &RegistrationQuery,
    ) -> AppResult<Page<Registration, RegistrationStats>> {
        self.get_docs("registrations", &["registration"], params)
            .await
    }

    async fn registration(&self, confirmation_code: &str) -> AppResult<Registration> {
        self.get_one(&["registration", confirmation_code], confirmation_code)
            .await
    }

    async fn registration_stats(&self) -> AppResult<RegistrationStats> {
        self.get("registration stats", &["registration", "stats"], None, None)
            .await
    }
}
