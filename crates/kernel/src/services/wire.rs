//! JSON envelopes of the event REST API.
//!
//! Two list shapes exist. Speakers, FAQs and the schedule use the "docs"
//! shape:
//!
//! ```json
//! {"docs": [...], "totalDocs": 8, "limit": 10, "totalPages": 1, "page": 1,
//!  "hasPrevPage": false, "hasNextPage": false}
//! ```
//!
//! Sponsors and communities use the "pagination" shape, keyed by the
//! collection name:
//!
//! ```json
//! {"sponsors": [...], "pagination": {"page": 1, "limit": 12, "total": 8,
//!  "totalPages": 1, "hasNext": false, "hasPrev": false}, "meta": {...}}
//! ```
//!
//! Both convert to and from [`Page`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::gather::{Page, Pagination};
use crate::models::{Community, Sponsor};

/// "docs" list envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: DeserializeOwned, M: DeserializeOwned")
)]
pub struct DocsEnvelope<T, M = ()> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub limit: u32,
    pub total_pages: u32,
    pub page: u32,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    /// Unfiltered counts. Not every backend sends them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

impl<T, M> From<Page<T, M>> for DocsEnvelope<T, M> {
    fn from(page: Page<T, M>) -> Self {
        let p = page.pagination;
        Self {
            docs: page.items,
            total_docs: p.total,
            limit: p.limit,
            total_pages: p.total_pages,
            page: p.page,
            has_prev_page: p.has_prev,
            has_next_page: p.has_next,
            meta: page.meta,
        }
    }
}

impl<T, M> From<DocsEnvelope<T, M>> for Page<T, M> {
    fn from(envelope: DocsEnvelope<T, M>) -> Self {
        Page {
            items: envelope.docs,
            pagination: Pagination {
                page: envelope.page,
                limit: envelope.limit,
                total: envelope.total_docs,
                total_pages: envelope.total_pages,
                has_next: envelope.has_next_page,
                has_prev: envelope.has_prev_page,
            },
            meta: envelope.meta,
        }
    }
}

/// Entities listed in the "pagination" envelope, with their collection key.
pub trait Collection {
    const KEY: &'static str;
}

impl Collection for Sponsor {
    const KEY: &'static str = "sponsors";
}

impl Collection for Community {
    const KEY: &'static str = "communities";
}

/// Encode a page in the "pagination" shape.
pub fn to_pagination_envelope<T, M>(page: Page<T, M>) -> AppResult<Value>
where
    T: Collection + Serialize,
    M: Serialize,
{
    let mut body = Map::new();
    body.insert(T::KEY.to_string(), serde_json::to_value(page.items)?);
    body.insert(
        "pagination".to_string(),
        serde_json::to_value(page.pagination)?,
    );
    if let Some(meta) = page.meta {
        body.insert("meta".to_string(), serde_json::to_value(meta)?);
    }
    Ok(Value::Object(body))
}

/// Decode a "pagination" shaped body.
pub fn from_pagination_envelope<T, M>(mut body: Value) -> AppResult<Page<T, M>>
where
    T: Collection + DeserializeOwned,
    M: DeserializeOwned,
{
    let Some(items) = body.get_mut(T::KEY).map(Value::take) else {
        return Err(AppError::Internal(format!(
            "response is missing the `{}` collection",
            T::KEY
        )));
    };
    let Some(pagination) = body.get_mut("pagination").map(Value::take) else {
        return Err(AppError::Internal(
            "response is missing pagination".to_string(),
        ));
    };

    let meta = match body.get_mut("meta").map(Value::take) {
        None | Some(Value::Null) => None,
        Some(meta) => Some(serde_json::from_value(meta)?),
    };

    Ok(Page {
        items: serde_json::from_value(items)?,
        pagination: serde_json::from_value(pagination)?,
        meta,
    })
}

/// Search endpoint query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::Dataset;
    use crate::gather::{self, CommunityQuery, CommunityStats, SponsorQuery, SponsorStats};
    use crate::models::Speaker;

    #[test]
    fn docs_envelope_reads_backend_json() {
        let body = json!({
            "docs": [],
            "totalDocs": 23,
            "limit": 10,
            "totalPages": 3,
            "page": 3,
            "hasPrevPage": true,
            "hasNextPage": false
        });

        let envelope: DocsEnvelope<Speaker> = serde_json::from_value(body).unwrap();
        let page: Page<Speaker> = envelope.into();

        assert_eq!(page.pagination, Pagination::new(23, 3, 10));
        assert!(page.meta.is_none());
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Counts {
        total: u64,
    }

    fn decode_docs<T: DeserializeOwned, M: DeserializeOwned>(body: Value) -> Page<T, M> {
        serde_json::from_value::<DocsEnvelope<T, M>>(body)
            .unwrap()
            .into()
    }

    #[test]
    fn docs_meta_type_needs_no_default() {
        let body = json!({
            "docs": [],
            "totalDocs": 0,
            "limit": 10,
            "totalPages": 0,
            "page": 1,
            "hasPrevPage": false,
            "hasNextPage": false,
            "meta": {"total": 3}
        });

        let page: Page<Speaker, Counts> = decode_docs(body);
        assert_eq!(page.meta, Some(Counts { total: 3 }));
    }

    #[test]
    fn docs_envelope_uses_backend_field_names() {
        let data = Dataset::seed();
        let page = gather::speakers::query(&data.speakers, &Default::default()).without_meta();
        let value = serde_json::to_value(DocsEnvelope::from(page)).unwrap();

        assert_eq!(value["totalDocs"], 8);
        assert_eq!(value["hasNextPage"], false);
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn pagination_envelope_is_keyed_by_collection() {
        let data = Dataset::seed();
        let page = gather::sponsors::query(&data.sponsors, &SponsorQuery::default());
        let value = to_pagination_envelope(page.clone()).unwrap();

        assert!(value["sponsors"].is_array());
        assert_eq!(value["pagination"]["total"], data.sponsors.len());
        assert_eq!(value["meta"]["total"], data.sponsors.len());

        let back: Page<Sponsor, SponsorStats> = from_pagination_envelope(value).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn pagination_envelope_without_meta() {
        let body = json!({
            "communities": [],
            "pagination": {
                "page": 2, "limit": 12, "total": 8,
                "totalPages": 1, "hasNext": false, "hasPrev": true
            },
            "meta": null
        });

        let page: Page<Community, CommunityStats> = from_pagination_envelope(body).unwrap();
        assert!(page.is_empty());
        assert!(page.meta.is_none());
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn wrong_collection_key_is_rejected() {
        let data = Dataset::seed();
        let page = gather::communities::query(&data.communities, &CommunityQuery::default());
        let value = to_pagination_envelope(page).unwrap();

        let result: AppResult<Page<Sponsor, SponsorStats>> = from_pagination_envelope(value);
        assert!(result.is_err());
    }
}
