//! Display grouping of already fetched records.
//!
//! Groups follow the order a page shows them in: tiers by rank, categories
//! and tracks in declaration order, days ascending. Empty groups are left
//! out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gather::{self, SortSpec};
use crate::models::{Community, Faq, FaqCategory, Session, Speaker, Sponsor, SponsorTier, Track};

/// Label of the bucket holding remote communities.
pub const REMOTE: &str = "Remote";

/// Records sharing one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group<K, T> {
    pub key: K,
    pub items: Vec<T>,
}

impl<K, T> Group<K, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Group by a closed enum, in the order of `keys`.
fn by_enum<K: Copy + PartialEq, T: Clone>(
    items: &[T],
    keys: &[K],
    key_of: impl Fn(&T) -> K,
) -> Vec<Group<K, T>> {
    keys.iter()
        .map(|&key| Group {
            key,
            items: items.iter().filter(|i| key_of(i) == key).cloned().collect(),
        })
        .filter(|g| !g.is_empty())
        .collect()
}

/// Sponsors by tier, platinum first; each tier sorted by name.
pub fn sponsors_by_tier(sponsors: &[Sponsor]) -> Vec<Group<SponsorTier, Sponsor>> {
    let mut groups = by_enum(sponsors, SponsorTier::ALL, |s| s.tier);
    for group in &mut groups {
        gather::sponsors::sort(
            &mut group.items,
            SortSpec::new(gather::SponsorSort::Name),
        );
    }
    groups
}

/// FAQs by category, each sorted by priority.
pub fn faqs_by_category(faqs: &[Faq]) -> Vec<Group<FaqCategory, Faq>> {
    let mut groups = by_enum(faqs, FaqCategory::ALL, |f| f.category);
    for group in &mut groups {
        gather::faqs::sort(&mut group.items, SortSpec::default());
    }
    groups
}

/// Speakers by track, each in display order.
pub fn speakers_by_track(speakers: &[Speaker]) -> Vec<Group<Track, Speaker>> {
    let mut groups = by_enum(speakers, Track::ALL, |s| s.track);
    for group in &mut groups {
        gather::speakers::sort(
            &mut group.items,
            SortSpec::new(gather::SpeakerSort::Order),
        );
    }
    groups
}

/// Communities by location: the remote bucket first, then one bucket per
/// country in alphabetical order.
pub fn communities_by_location(communities: &[Community]) -> Vec<Group<String, Community>> {
    let (remote, local): (Vec<&Community>, Vec<&Community>) =
        communities.iter().partition(|c| c.location.is_remote);

    let mut countries: BTreeMap<&str, Vec<Community>> = BTreeMap::new();
    for community in local {
        countries
            .entry(community.location.country.as_str())
            .or_default()
            .push(community.clone());
    }

    let mut groups = Vec::with_capacity(countries.len() + 1);
    if !remote.is_empty() {
        groups.push(Group {
            key: REMOTE.to_string(),
            items: remote.into_iter().cloned().collect(),
        });
    }
    groups.extend(countries.into_iter().map(|(country, items)| Group {
        key: country.to_string(),
        items,
    }));
    groups
}

/// Sessions by event day, each day in schedule order.
pub fn sessions_by_day(sessions: &[Session]) -> Vec<Group<u8, Session>> {
    let mut days: BTreeMap<u8, Vec<Session>> = BTreeMap::new();
    for session in sessions {
        days.entry(session.event_day)
            .or_default()
            .push(session.clone());
    }

    days.into_iter()
        .map(|(day, mut items)| {
            gather::schedule::sort(&mut items, SortSpec::default());
            Group { key: day, items }
        })
        .collect()
}
