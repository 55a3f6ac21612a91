//! Seed dataset.
//!
//! Fixed in-memory records standing in for the conference database. The
//! mock event source serves these; tests use them as realistic fixtures.

mod communities;
mod faqs;
mod schedule;
mod speakers;
mod sponsors;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::models::{
    Community, ContactInfo, Faq, Session, SocialLinks, SocialPlatform, Speaker, Sponsor,
};

/// Every seeded collection.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub speakers: Vec<Speaker>,
    pub sponsors: Vec<Sponsor>,
    pub communities: Vec<Community>,
    pub faqs: Vec<Faq>,
    pub sessions: Vec<Session>,
}

impl Dataset {
    /// The built-in conference data.
    pub fn seed() -> Self {
        Self {
            speakers: speakers::seed(),
            sponsors: sponsors::seed(),
            communities: communities::seed(),
            faqs: faqs::seed(),
            sessions: schedule::seed(),
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn timestamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn links(entries: &[(SocialPlatform, &str)]) -> SocialLinks {
    entries
        .iter()
        .map(|(platform, url)| (*platform, (*url).to_string()))
        .collect()
}

fn contact(name: &str, email: &str) -> ContactInfo {
    ContactInfo {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
