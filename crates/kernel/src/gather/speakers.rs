//! Speaker queries.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::aggregate::{count_by, count_if};
use super::types::{Page, PageWindow, SortDirection, SortField, SortSpec, compare_text, search_term};
use crate::models::common::contains_folded;
use crate::models::{ExperienceLevel, Speaker, Track};

pub const DEFAULT_LIMIT: u32 = 10;

/// Sortable speaker fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeakerSort {
    #[default]
    Name,
    Company,
    Title,
    Order,
    Track,
}

impl SortField for SpeakerSort {
    const KEYS: &'static [(Self, &'static str)] = &[
        (SpeakerSort::Name, "name"),
        (SpeakerSort::Company, "company"),
        (SpeakerSort::Title, "title"),
        (SpeakerSort::Order, "order"),
        (SpeakerSort::Track, "track"),
    ];

    fn natural_direction(self) -> SortDirection {
        SortDirection::Asc
    }
}

/// Speaker list parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec<SpeakerSort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keynote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl SpeakerQuery {
    fn matches(&self, speaker: &Speaker, term: Option<&str>) -> bool {
        self.track.is_none_or(|t| speaker.track == t)
            && self
                .experience_level
                .is_none_or(|l| speaker.experience_level == l)
            && self.featured.is_none_or(|f| speaker.featured == f)
            && self.keynote.is_none_or(|k| speaker.keynote == k)
            && term.is_none_or(|t| {
                contains_folded(&speaker.name, t)
                    || contains_folded(&speaker.title, t)
                    || contains_folded(&speaker.company, t)
                    || contains_folded(&speaker.bio, t)
            })
    }
}

/// Unfiltered speaker counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerStats {
    pub total: u64,
    pub featured: u64,
    pub keynote: u64,
    pub by_track: BTreeMap<Track, u64>,
    pub by_level: BTreeMap<ExperienceLevel, u64>,
    /// Distinct companies represented.
    pub companies: u64,
}

/// Filter, sort and page speakers.
pub fn query(speakers: &[Speaker], params: &SpeakerQuery) -> Page<Speaker, SpeakerStats> {
    let term = search_term(params.search.as_deref());
    let mut matched: Vec<Speaker> = speakers
        .iter()
        .filter(|s| params.matches(s, term.as_deref()))
        .cloned()
        .collect();

    sort(&mut matched, params.sort.unwrap_or_default());

    PageWindow::new(params.page, params.limit, DEFAULT_LIMIT).apply(matched, Some(stats(speakers)))
}

/// Stable sort by the given key.
pub fn sort(speakers: &mut [Speaker], spec: SortSpec<SpeakerSort>) {
    let direction = spec.direction();
    speakers.sort_by(|a, b| direction.apply(compare(a, b, spec.key)));
}

fn compare(a: &Speaker, b: &Speaker, key: SpeakerSort) -> Ordering {
    match key {
        SpeakerSort::Name => compare_text(&a.name, &b.name),
        SpeakerSort::Company => compare_text(&a.company, &b.company),
        SpeakerSort::Title => compare_text(&a.title, &b.title),
        SpeakerSort::Order => a.order.cmp(&b.order),
        SpeakerSort::Track => a.track.cmp(&b.track),
    }
}

pub fn stats(speakers: &[Speaker]) -> SpeakerStats {
    let companies: BTreeSet<String> = speakers.iter().map(|s| s.company.to_lowercase()).collect();

    SpeakerStats {
        total: speakers.len() as u64,
        featured: count_if(speakers, |s| s.featured),
        keynote: count_if(speakers, |s| s.keynote),
        by_track: count_by(speakers, |s| s.track),
        by_level: count_by(speakers, |s| s.experience_level),
        companies: companies.len() as u64,
    }
}

/// Featured speakers in display order.
pub fn featured(speakers: &[Speaker]) -> Vec<Speaker> {
    let mut out: Vec<Speaker> = speakers.iter().filter(|s| s.featured).cloned().collect();
    sort(&mut out, SortSpec::new(SpeakerSort::Order));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn default_sort_is_by_name() {
        let data = Dataset::seed();
        let page = query(&data.speakers, &SpeakerQuery::default());
        let names: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_by(|a, b| compare_text(a, b));
        assert_eq!(names, sorted);
    }

    #[test]
    fn keynote_filter() {
        let data = Dataset::seed();
        let params = SpeakerQuery {
            keynote: Some(true),
            ..Default::default()
        };
        let page = query(&data.speakers, &params);
        assert!(page.items.iter().all(|s| s.keynote));
        assert_eq!(page.pagination.total, stats(&data.speakers).keynote);
    }

    #[test]
    fn search_spans_company_and_bio() {
        let data = Dataset::seed();
        let company = data.speakers[0].company.to_uppercase();
        let params = SpeakerQuery {
            search: Some(company),
            ..Default::default()
        };
        assert!(query(&data.speakers, &params).pagination.total >= 1);
    }

    #[test]
    fn featured_is_in_display_order() {
        let data = Dataset::seed();
        let orders: Vec<u32> = featured(&data.speakers).iter().map(|s| s.order).collect();
        assert!(orders.windows(2).all(|w| w[0] <= w[1]));
    }
}
