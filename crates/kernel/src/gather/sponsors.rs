//! Sponsor queries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{count_by, count_if};
use super::types::{Page, PageWindow, SortDirection, SortField, SortSpec, compare_text, search_term};
use crate::models::common::contains_folded;
use crate::models::{Sponsor, SponsorCategory, SponsorTier};

pub const DEFAULT_LIMIT: u32 = 12;

/// Sortable sponsor fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SponsorSort {
    /// Rank table, most prominent first.
    #[default]
    Tier,
    Name,
    SponsorshipValue,
    StartDate,
}

impl SortField for SponsorSort {
    const KEYS: &'static [(Self, &'static str)] = &[
        (SponsorSort::Tier, "tier"),
        (SponsorSort::Name, "name"),
        (SponsorSort::SponsorshipValue, "sponsorshipValue"),
        (SponsorSort::StartDate, "startDate"),
    ];

    fn natural_direction(self) -> SortDirection {
        match self {
            SponsorSort::Tier | SponsorSort::Name => SortDirection::Asc,
            SponsorSort::SponsorshipValue | SponsorSort::StartDate => SortDirection::Desc,
        }
    }
}

/// Sponsor list parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec<SponsorSort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<SponsorTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SponsorCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl SponsorQuery {
    fn matches(&self, sponsor: &Sponsor, term: Option<&str>) -> bool {
        self.tier.is_none_or(|t| sponsor.tier == t)
            && self.category.is_none_or(|c| sponsor.category == c)
            && self.featured.is_none_or(|f| sponsor.featured == f)
            && self.is_active.is_none_or(|a| sponsor.is_active == a)
            && term.is_none_or(|t| {
                contains_folded(&sponsor.name, t)
                    || contains_folded(&sponsor.description, t)
                    || sponsor.benefits.iter().any(|b| contains_folded(b, t))
            })
    }
}

/// Unfiltered sponsor counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorStats {
    pub total: u64,
    pub active: u64,
    pub featured: u64,
    pub by_tier: BTreeMap<SponsorTier, u64>,
    pub by_category: BTreeMap<SponsorCategory, u64>,
    pub total_sponsorship_value: u64,
}

/// Filter, sort and page sponsors.
pub fn query(sponsors: &[Sponsor], params: &SponsorQuery) -> Page<Sponsor, SponsorStats> {
    let term = search_term(params.search.as_deref());
    let mut matched: Vec<Sponsor> = sponsors
        .iter()
        .filter(|s| params.matches(s, term.as_deref()))
        .cloned()
        .collect();

    sort(&mut matched, params.sort.unwrap_or_default());

    PageWindow::new(params.page, params.limit, DEFAULT_LIMIT).apply(matched, Some(stats(sponsors)))
}

/// Stable sort by the given key.
pub fn sort(sponsors: &mut [Sponsor], spec: SortSpec<SponsorSort>) {
    let direction = spec.direction();
    sponsors.sort_by(|a, b| direction.apply(compare(a, b, spec.key)));
}

fn compare(a: &Sponsor, b: &Sponsor, key: SponsorSort) -> Ordering {
    match key {
        SponsorSort::Tier => a.tier.rank().cmp(&b.tier.rank()),
        SponsorSort::Name => compare_text(&a.name, &b.name),
        SponsorSort::SponsorshipValue => a.sponsorship_value.cmp(&b.sponsorship_value),
        SponsorSort::StartDate => a.start_date.cmp(&b.start_date),
    }
}

pub fn stats(sponsors: &[Sponsor]) -> SponsorStats {
    SponsorStats {
        total: sponsors.len() as u64,
        active: count_if(sponsors, |s| s.is_active),
        featured: count_if(sponsors, |s| s.featured),
        by_tier: count_by(sponsors, |s| s.tier),
        by_category: count_by(sponsors, |s| s.category),
        total_sponsorship_value: sponsors.iter().map(|s| s.sponsorship_value).sum(),
    }
}

/// Featured sponsors, most prominent tier first.
pub fn featured(sponsors: &[Sponsor]) -> Vec<Sponsor> {
    let mut out: Vec<Sponsor> = sponsors.iter().filter(|s| s.featured).cloned().collect();
    sort(&mut out, SortSpec::default());
    out
}

/// Sponsors of one tier, by name.
pub fn by_tier(sponsors: &[Sponsor], tier: SponsorTier) -> Vec<Sponsor> {
    let mut out: Vec<Sponsor> = sponsors.iter().filter(|s| s.tier == tier).cloned().collect();
    sort(&mut out, SortSpec::new(SponsorSort::Name));
    out
}
