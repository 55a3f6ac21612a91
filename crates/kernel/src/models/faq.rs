//! FAQ model and visitor feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::{Record, Ref};

closed_enum! {
    /// FAQ section.
    pub enum FaqCategory {
        General => ("general", "General"),
        Registration => ("registration", "Registration"),
        Tickets => ("tickets", "Tickets & Pricing"),
        Schedule => ("schedule", "Schedule"),
        Venue => ("venue", "Venue"),
        Travel => ("travel", "Travel"),
        Accommodation => ("accommodation", "Accommodation"),
        Food => ("food", "Food & Dietary"),
        Accessibility => ("accessibility", "Accessibility"),
        Speakers => ("speakers", "Speakers"),
        Sponsors => ("sponsors", "Sponsors"),
        Volunteering => ("volunteering", "Volunteering"),
        CodeOfConduct => ("code-of-conduct", "Code of Conduct"),
        Technical => ("technical", "Technical Support"),
    }
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: String,
    pub question: String,

    /// Answer as rich text (markdown).
    pub answer: String,
    pub category: FaqCategory,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Lower is more important.
    pub priority: u32,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub helpful: u32,
    #[serde(default)]
    pub not_helpful: u32,

    #[serde(default, rename = "relatedFAQs")]
    pub related_faqs: Vec<Ref<Faq>>,

    pub last_updated: DateTime<Utc>,
}

impl Faq {
    /// `helpful / (helpful + not_helpful)`, 0.0 with no votes.
    pub fn helpfulness(&self) -> f64 {
        helpfulness_ratio(u64::from(self.helpful), u64::from(self.not_helpful))
    }
}

/// Ratio of helpful votes, defined as 0.0 when there are no votes.
pub fn helpfulness_ratio(helpful: u64, not_helpful: u64) -> f64 {
    let votes = helpful + not_helpful;
    if votes == 0 {
        0.0
    } else {
        helpful as f64 / votes as f64
    }
}

impl Record for Faq {
    const ENTITY: &'static str = "faq";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A visitor's vote on an FAQ answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqFeedback {
    pub faq_id: String,
    pub helpful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Vote counters after feedback was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    pub helpful: u32,
    pub not_helpful: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpfulness_without_votes_is_zero() {
        assert_eq!(helpfulness_ratio(0, 0), 0.0);
    }

    #[test]
    fn helpfulness_ratio_counts_both_sides() {
        assert!((helpfulness_ratio(3, 1) - 0.75).abs() < f64::EPSILON);
        assert_eq!(helpfulness_ratio(0, 4), 0.0);
        assert_eq!(helpfulness_ratio(5, 0), 1.0);
    }

    #[test]
    fn there_are_fourteen_categories() {
        assert_eq!(FaqCategory::ALL.len(), 14);
    }
}
