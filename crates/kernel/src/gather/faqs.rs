//! FAQ queries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{count_by, count_if};
use super::types::{Page, PageWindow, SortDirection, SortField, SortSpec, compare_text, search_term};
use crate::models::common::contains_folded;
use crate::models::faq::helpfulness_ratio;
use crate::models::{Faq, FaqCategory, resolve_all};

pub const DEFAULT_LIMIT: u32 = 10;

/// Sortable FAQ fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaqSort {
    /// Lower priority value first.
    #[default]
    Priority,
    Helpful,
    LastUpdated,
    Question,
    Category,
}

impl SortField for FaqSort {
    const KEYS: &'static [(Self, &'static str)] = &[
        (FaqSort::Priority, "priority"),
        (FaqSort::Helpful, "helpful"),
        (FaqSort::LastUpdated, "lastUpdated"),
        (FaqSort::Question, "question"),
        (FaqSort::Category, "category"),
    ];

    fn natural_direction(self) -> SortDirection {
        match self {
            FaqSort::Priority | FaqSort::Question | FaqSort::Category => SortDirection::Asc,
            FaqSort::Helpful | FaqSort::LastUpdated => SortDirection::Desc,
        }
    }
}

/// FAQ list parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec<FaqSort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FaqCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Exact tag (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FaqQuery {
    fn matches(&self, faq: &Faq, term: Option<&str>) -> bool {
        self.category.is_none_or(|c| faq.category == c)
            && self.featured.is_none_or(|f| faq.featured == f)
            && self
                .tag
                .as_deref()
                .is_none_or(|tag| faq.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim())))
            && term.is_none_or(|t| matches_term(faq, t))
    }
}

/// Free-text match over question, answer and tags. `term` must be lowercase.
fn matches_term(faq: &Faq, term: &str) -> bool {
    contains_folded(&faq.question, term)
        || contains_folded(&faq.answer, term)
        || faq.tags.iter().any(|t| contains_folded(t, term))
}

/// Unfiltered FAQ counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqStats {
    pub total: u64,
    pub featured: u64,
    pub by_category: BTreeMap<FaqCategory, u64>,
    pub helpful: u64,
    pub not_helpful: u64,
    /// Helpful votes over all votes, 0.0 without votes.
    pub helpfulness: f64,
}

/// Filter, sort and page FAQs.
pub fn query(faqs: &[Faq], params: &FaqQuery) -> Page<Faq, FaqStats> {
    let term = search_term(params.search.as_deref());
    let mut matched: Vec<Faq> = faqs
        .iter()
        .filter(|f| params.matches(f, term.as_deref()))
        .cloned()
        .collect();

    sort(&mut matched, params.sort.unwrap_or_default());

    PageWindow::new(params.page, params.limit, DEFAULT_LIMIT).apply(matched, Some(stats(faqs)))
}

/// Stable sort by the given key.
pub fn sort(faqs: &mut [Faq], spec: SortSpec<FaqSort>) {
    let direction = spec.direction();
    faqs.sort_by(|a, b| direction.apply(compare(a, b, spec.key)));
}

fn compare(a: &Faq, b: &Faq, key: FaqSort) -> Ordering {
    match key {
        FaqSort::Priority => a.priority.cmp(&b.priority),
        FaqSort::Helpful => a.helpful.cmp(&b.helpful),
        FaqSort::LastUpdated => a.last_updated.cmp(&b.last_updated),
        FaqSort::Question => compare_text(&a.question, &b.question),
        FaqSort::Category => a.category.cmp(&b.category),
    }
}

pub fn stats(faqs: &[Faq]) -> FaqStats {
    let helpful: u64 = faqs.iter().map(|f| u64::from(f.helpful)).sum();
    let not_helpful: u64 = faqs.iter().map(|f| u64::from(f.not_helpful)).sum();

    FaqStats {
        total: faqs.len() as u64,
        featured: count_if(faqs, |f| f.featured),
        by_category: count_by(faqs, |f| f.category),
        helpful,
        not_helpful,
        helpfulness: helpfulness_ratio(helpful, not_helpful),
    }
}

/// Featured FAQs by priority.
pub fn featured(faqs: &[Faq]) -> Vec<Faq> {
    let mut out: Vec<Faq> = faqs.iter().filter(|f| f.featured).cloned().collect();
    sort(&mut out, SortSpec::default());
    out
}

/// FAQs of one category by priority.
pub fn by_category(faqs: &[Faq], category: FaqCategory) -> Vec<Faq> {
    let mut out: Vec<Faq> = faqs.iter().filter(|f| f.category == category).cloned().collect();
    sort(&mut out, SortSpec::default());
    out
}

/// Free-text search by priority, at most `limit` hits. Blank terms match nothing.
pub fn search(faqs: &[Faq], term: &str, limit: usize) -> Vec<Faq> {
    let Some(term) = search_term(Some(term)) else {
        return Vec::new();
    };

    let mut out: Vec<Faq> = faqs
        .iter()
        .filter(|f| matches_term(f, &term))
        .cloned()
        .collect();
    sort(&mut out, SortSpec::default());
    out.truncate(limit);
    out
}

/// Related FAQs that still exist, in the order they are listed.
pub fn related<'a>(faqs: &'a [Faq], faq: &Faq) -> Vec<&'a Faq> {
    resolve_all(&faq.related_faqs, faqs)
        .into_iter()
        .filter(|f| f.id != faq.id)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn default_sort_is_priority_ascending() {
        let data = Dataset::seed();
        let priorities: Vec<u32> = query(&data.faqs, &FaqQuery::default())
            .items
            .iter()
            .map(|f| f.priority)
            .collect();
        assert!(priorities.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn tag_filter_is_case_insensitive() {
        let data = Dataset::seed();
        let tag = data.faqs[0].tags[0].to_uppercase();
        let params = FaqQuery {
            tag: Some(tag),
            ..Default::default()
        };
        assert!(query(&data.faqs, &params).pagination.total >= 1);
    }

    #[test]
    fn search_respects_limit() {
        let data = Dataset::seed();
        assert!(search(&data.faqs, "the", 2).len() <= 2);
        assert!(search(&data.faqs, "   ", 5).is_empty());
    }

    #[test]
    fn related_skips_dangling_references() {
        let data = Dataset::seed();
        let faq = data
            .faqs
            .iter()
            .find(|f| f.related_faqs.iter().any(|r| r.resolve(&data.faqs).is_none()))
            .expect("seed has a dangling related reference");
        let related = related(&data.faqs, faq);
        assert!(related.len() < faq.related_faqs.len());
    }
}
