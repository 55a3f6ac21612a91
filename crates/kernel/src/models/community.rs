//! Partner community model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{ContactInfo, SocialLinks};
use super::reference::Record;

closed_enum! {
    /// Kind of organisation behind a community.
    pub enum CommunityType {
        StudentClub => ("student-club", "Student Club"),
        Developer => ("developer-community", "Developer Community"),
        OpenSource => ("open-source", "Open Source Project"),
        Meetup => ("meetup", "Meetup Group"),
        Nonprofit => ("nonprofit", "Non-profit"),
        Professional => ("professional", "Professional Network"),
    }
}

closed_enum! {
    /// Focus area of a community.
    pub enum CommunityCategory {
        Technology => ("technology", "Technology"),
        Design => ("design", "Design"),
        Data => ("data", "Data & AI"),
        Security => ("security", "Security"),
        Entrepreneurship => ("entrepreneurship", "Entrepreneurship"),
        Diversity => ("diversity", "Diversity & Inclusion"),
        General => ("general", "General"),
    }
}

closed_enum! {
    /// Partnership level with the conference.
    pub enum PartnershipLevel {
        Premier => ("premier", "Premier Partner"),
        Official => ("official", "Official Partner"),
        Supporting => ("supporting", "Supporting Partner"),
    }
}

/// Where a community is based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
}

/// Kinds of events a community runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsOffered {
    #[serde(default)]
    pub workshops: bool,
    #[serde(default)]
    pub hackathons: bool,
    #[serde(default)]
    pub meetups: bool,
    #[serde(default)]
    pub mentorship: bool,
}

/// Partnership terms between the community and the conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    pub level: PartnershipLevel,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A partner community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub website: String,
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    pub category: CommunityCategory,
    pub location: Location,

    #[serde(default)]
    pub featured: bool,
    pub member_count: u32,
    pub founded_year: i32,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub social_links: SocialLinks,
    pub contact: ContactInfo,

    #[serde(default)]
    pub events_offered: EventsOffered,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partnership: Option<Partnership>,
}

impl Community {
    /// Whether `location` (already lowercase) matches the city or country.
    pub fn located_in(&self, location: &str) -> bool {
        super::common::contains_folded(&self.location.city, location)
            || super::common::contains_folded(&self.location.country, location)
    }
}

impl Record for Community {
    const ENTITY: &'static str = "community";

    fn id(&self) -> &str {
        &self.id
    }
}
