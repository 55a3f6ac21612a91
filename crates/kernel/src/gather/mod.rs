//! Gather query engine module.
//!
//! Pure functions over in-memory collections. Every entity module provides:
//! - `query`: filter, stable sort and page, with unfiltered stats as meta
//! - `stats`: aggregate counts over the whole collection
//! - subset helpers (featured, by tier/type/category/day)
//!
//! Lookups by id go through [`find`], the only operation that can fail.

mod aggregate;
pub mod communities;
pub mod faqs;
pub mod registrations;
pub mod schedule;
pub mod speakers;
pub mod sponsors;
pub mod types;

pub use aggregate::{count_by, count_each, count_if, find};
pub use communities::{CommunityQuery, CommunitySort, CommunityStats};
pub use faqs::{FaqQuery, FaqSort, FaqStats};
pub use registrations::{RegistrationQuery, RegistrationSort, RegistrationStats};
pub use schedule::{ScheduleStats, SessionQuery, SessionSort};
pub use speakers::{SpeakerQuery, SpeakerSort, SpeakerStats};
pub use sponsors::{SponsorQuery, SponsorSort, SponsorStats};
pub use types::{Page, PageWindow, Pagination, SortDirection, SortField, SortSpec};
