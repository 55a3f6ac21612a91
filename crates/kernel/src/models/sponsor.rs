//! Sponsor model and the tier rank table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{ContactInfo, SocialLinks};
use super::reference::Record;

closed_enum! {
    /// Sponsorship tier. Declaration order matches [`SponsorTier::rank`].
    pub enum SponsorTier {
        Platinum => ("platinum", "Platinum"),
        Gold => ("gold", "Gold"),
        Silver => ("silver", "Silver"),
        Bronze => ("bronze", "Bronze"),
        Community => ("community", "Community Partner"),
        Media => ("media", "Media Partner"),
    }
}

impl SponsorTier {
    /// Prominence rank, 0 = most prominent.
    pub fn rank(self) -> u8 {
        match self {
            SponsorTier::Platinum => 0,
            SponsorTier::Gold => 1,
            SponsorTier::Silver => 2,
            SponsorTier::Bronze => 3,
            SponsorTier::Community => 4,
            SponsorTier::Media => 5,
        }
    }

    /// Accent color used by tier badges.
    pub fn color(self) -> &'static str {
        match self {
            SponsorTier::Platinum => "#e5e4e2",
            SponsorTier::Gold => "#ffd700",
            SponsorTier::Silver => "#c0c0c0",
            SponsorTier::Bronze => "#cd7f32",
            SponsorTier::Community => "#4f46e5",
            SponsorTier::Media => "#0ea5e9",
        }
    }
}

closed_enum! {
    /// Industry of a sponsor.
    pub enum SponsorCategory {
        Technology => ("technology", "Technology"),
        Education => ("education", "Education"),
        Finance => ("finance", "Finance"),
        Healthcare => ("healthcare", "Healthcare"),
        Startup => ("startup", "Startup"),
        NonProfit => ("non-profit", "Non-profit"),
        Media => ("media", "Media"),
    }
}

/// Exhibition booth assigned to a sponsor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothInfo {
    pub number: String,
    pub location: String,
    pub size: String,
}

/// A conference sponsor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub website: String,
    pub tier: SponsorTier,
    pub category: SponsorCategory,

    #[serde(default)]
    pub featured: bool,

    /// Benefits in display order.
    #[serde(default)]
    pub benefits: Vec<String>,

    #[serde(default)]
    pub social_links: SocialLinks,
    pub contact: ContactInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booth: Option<BoothInfo>,

    /// Sponsorship amount in whole currency units.
    pub sponsorship_value: u64,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl Record for Sponsor {
    const ENTITY: &'static str = "sponsor";

    fn id(&self) -> &str {
        &self.id
    }
}
