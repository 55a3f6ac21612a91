//! Gather query engine types.
//!
//! Provides the pieces every entity query shares:
//! - Pagination / Page: the paged result with its metadata
//! - SortSpec: a parsed `key` / `-key` sort parameter
//! - PageWindow: normalized page and limit

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Pagination metadata for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-indexed).
    pub page: u32,

    /// Items per page.
    pub limit: u32,

    /// Total count after filtering, before paging.
    pub total: u64,

    /// Total number of pages.
    pub total_pages: u32,

    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Compute paging metadata.
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(u64::from(limit)) as u32
        } else {
            0
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// A bounded slice of a filtered, sorted collection.
///
/// `meta` carries the unfiltered aggregate counts when the source provides
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned, M: DeserializeOwned"))]
pub struct Page<T, M = ()> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

impl<T, M> Page<T, M> {
    /// Drop the aggregate counts.
    pub fn without_meta(self) -> Page<T> {
        Page {
            items: self.items,
            pagination: self.pagination,
            meta: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Normalized page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl PageWindow {
    /// Apply defaults: page 0 or missing becomes 1, limit 0 or missing
    /// becomes `default_limit`, limits are capped at [`MAX_LIMIT`].
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(MAX_LIMIT);
        Self { page, limit }
    }

    /// Cut the window out of an already filtered and sorted list.
    pub fn apply<T, M>(self, items: Vec<T>, meta: Option<M>) -> Page<T, M> {
        let total = items.len() as u64;
        let start = (self.page as usize)
            .saturating_sub(1)
            .saturating_mul(self.limit as usize);

        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(self.limit as usize)
            .collect();

        Page {
            items,
            pagination: Pagination::new(total, self.page, self.limit),
            meta,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// A sortable field of one entity.
pub trait SortField: Copy + Default + PartialEq + fmt::Debug + 'static {
    /// Every key with its wire name.
    const KEYS: &'static [(Self, &'static str)];

    /// Direction used when the key has no `-` prefix.
    fn natural_direction(self) -> SortDirection;

    fn as_str(self) -> &'static str {
        Self::KEYS
            .iter()
            .find(|(k, _)| *k == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }
}

/// Parsed sort parameter: a key plus an optional `-` inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec<K> {
    pub key: K,
    pub inverted: bool,
}

impl<K: SortField> SortSpec<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            inverted: false,
        }
    }

    pub fn inverted(key: K) -> Self {
        Self {
            key,
            inverted: true,
        }
    }

    /// Effective direction: the key's natural direction, flipped by `-`.
    pub fn direction(&self) -> SortDirection {
        let natural = self.key.natural_direction();
        if self.inverted {
            natural.reversed()
        } else {
            natural
        }
    }

    /// Parse `key` or `-key`; unknown keys fall back to the entity default.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::debug!(sort = %raw, "unknown sort key, using default");
            Self::default()
        })
    }
}

/// Sort key that no entity recognizes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl<K: SortField> FromStr for SortSpec<K> {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (inverted, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        K::KEYS
            .iter()
            .find(|(_, wire)| wire.eq_ignore_ascii_case(name))
            .map(|(key, _)| SortSpec {
                key: *key,
                inverted,
            })
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

impl<K: SortField> fmt::Display for SortSpec<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("-")?;
        }
        f.write_str(self.key.as_str())
    }
}

impl<K: SortField> Serialize for SortSpec<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, K: SortField> Deserialize<'de> for SortSpec<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

/// Locale-style text comparison: case-insensitive first, then by raw value
/// so the order is total.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    folded.then_with(|| a.cmp(b))
}

/// Lowercased, trimmed search term; `None` when blank.
pub fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}
