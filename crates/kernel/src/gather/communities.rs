//! Partner community queries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::{count_by, count_if};
use super::types::{Page, PageWindow, SortDirection, SortField, SortSpec, compare_text, search_term};
use crate::models::common::contains_folded;
use crate::models::{Community, CommunityCategory, CommunityType};

pub const DEFAULT_LIMIT: u32 = 12;

/// Sortable community fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommunitySort {
    #[default]
    MemberCount,
    Name,
    FoundedYear,
    Type,
}

impl SortField for CommunitySort {
    const KEYS: &'static [(Self, &'static str)] = &[
        (CommunitySort::MemberCount, "memberCount"),
        (CommunitySort::Name, "name"),
        (CommunitySort::FoundedYear, "foundedYear"),
        (CommunitySort::Type, "type"),
    ];

    fn natural_direction(self) -> SortDirection {
        match self {
            CommunitySort::MemberCount | CommunitySort::FoundedYear => SortDirection::Desc,
            CommunitySort::Name | CommunitySort::Type => SortDirection::Asc,
        }
    }
}

/// Community list parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec<CommunitySort>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub community_type: Option<CommunityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CommunityCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_remote: Option<bool>,
    /// Substring of the city or country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Exact technology name (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl CommunityQuery {
    fn matches(
        &self,
        community: &Community,
        location: Option<&str>,
        term: Option<&str>,
    ) -> bool {
        self.community_type
            .is_none_or(|t| community.community_type == t)
            && self.category.is_none_or(|c| community.category == c)
            && self.featured.is_none_or(|f| community.featured == f)
            && self
                .is_remote
                .is_none_or(|r| community.location.is_remote == r)
            && location.is_none_or(|l| community.located_in(l))
            && self.technology.as_deref().is_none_or(|tech| {
                community
                    .technologies
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(tech.trim()))
            })
            && term.is_none_or(|t| {
                contains_folded(&community.name, t)
                    || contains_folded(&community.description, t)
                    || community.technologies.iter().any(|x| contains_folded(x, t))
            })
    }
}

/// Unfiltered community counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub total: u64,
    pub featured: u64,
    pub remote: u64,
    pub total_members: u64,
    pub by_type: BTreeMap<CommunityType, u64>,
    pub by_category: BTreeMap<CommunityCategory, u64>,
    pub by_country: BTreeMap<String, u64>,
}

/// Filter, sort and page communities.
pub fn query(communities: &[Community], params: &CommunityQuery) -> Page<Community, CommunityStats> {
    let term = search_term(params.search.as_deref());
    let location = search_term(params.location.as_deref());
    let mut matched: Vec<Community> = communities
        .iter()
        .filter(|c| params.matches(c, location.as_deref(), term.as_deref()))
        .cloned()
        .collect();

    sort(&mut matched, params.sort.unwrap_or_default());

    PageWindow::new(params.page, params.limit, DEFAULT_LIMIT)
        .apply(matched, Some(stats(communities)))
}

/// Stable sort by the given key.
pub fn sort(communities: &mut [Community], spec: SortSpec<CommunitySort>) {
    let direction = spec.direction();
    communities.sort_by(|a, b| direction.apply(compare(a, b, spec.key)));
}

fn compare(a: &Community, b: &Community, key: CommunitySort) -> Ordering {
    match key {
        CommunitySort::MemberCount => a.member_count.cmp(&b.member_count),
        CommunitySort::Name => compare_text(&a.name, &b.name),
        CommunitySort::FoundedYear => a.founded_year.cmp(&b.founded_year),
        CommunitySort::Type => a.community_type.cmp(&b.community_type),
    }
}

pub fn stats(communities: &[Community]) -> CommunityStats {
    CommunityStats {
        total: communities.len() as u64,
        featured: count_if(communities, |c| c.featured),
        remote: count_if(communities, |c| c.location.is_remote),
        total_members: communities.iter().map(|c| u64::from(c.member_count)).sum(),
        by_type: count_by(communities, |c| c.community_type),
        by_category: count_by(communities, |c| c.category),
        by_country: count_by(communities, |c| c.location.country.clone()),
    }
}

/// Featured communities, largest first.
pub fn featured(communities: &[Community]) -> Vec<Community> {
    let mut out: Vec<Community> = communities.iter().filter(|c| c.featured).cloned().collect();
    sort(&mut out, SortSpec::default());
    out
}

/// Communities of one type, largest first.
pub fn by_type(communities: &[Community], community_type: CommunityType) -> Vec<Community> {
    let mut out: Vec<Community> = communities
        .iter()
        .filter(|c| c.community_type == community_type)
        .cloned()
        .collect();
    sort(&mut out, SortSpec::default());
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn default_sort_is_member_count_descending() {
        let data = Dataset::seed();
        let counts: Vec<u32> = query(&data.communities, &CommunityQuery::default())
            .items
            .iter()
            .map(|c| c.member_count)
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn inverted_member_count_is_ascending() {
        let data = Dataset::seed();
        let params = CommunityQuery {
            sort: Some(SortSpec::inverted(CommunitySort::MemberCount)),
            ..Default::default()
        };
        let counts: Vec<u32> = query(&data.communities, &params)
            .items
            .iter()
            .map(|c| c.member_count)
            .collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn location_matches_city_or_country() {
        let data = Dataset::seed();
        let country = data.communities[0].location.country.clone();
        let params = CommunityQuery {
            location: Some(country.to_uppercase()),
            ..Default::default()
        };
        let page = query(&data.communities, &params);
        assert!(page.pagination.total >= 1);
        assert!(page.items.iter().all(|c| c.located_in(&country.to_lowercase())));
    }

    #[test]
    fn technology_filter_is_exact() {
        let data = Dataset::seed();
        let params = CommunityQuery {
            technology: Some("rust".to_string()),
            ..Default::default()
        };
        let page = query(&data.communities, &params);
        assert!(
            page.items
                .iter()
                .all(|c| c.technologies.iter().any(|t| t.eq_ignore_ascii_case("rust")))
        );
    }
}
