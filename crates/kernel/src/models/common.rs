//! Types shared by several entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

closed_enum! {
    /// Conference track. Used by speakers, sessions and registration interests.
    pub enum Track {
        Web => ("web-development", "Web Development"),
        Mobile => ("mobile-development", "Mobile Development"),
        AiMl => ("ai-ml", "AI & Machine Learning"),
        Cloud => ("cloud-devops", "Cloud & DevOps"),
        Security => ("cybersecurity", "Cybersecurity"),
        Data => ("data-science", "Data Science"),
        Design => ("design", "Design & UX"),
        Career => ("career", "Career & Entrepreneurship"),
    }
}

closed_enum! {
    /// Self-declared experience level of a speaker or attendee.
    pub enum ExperienceLevel {
        Beginner => ("beginner", "Beginner"),
        Intermediate => ("intermediate", "Intermediate"),
        Advanced => ("advanced", "Advanced"),
        Expert => ("expert", "Expert"),
    }
}

closed_enum! {
    /// Platforms that may appear in a social links map.
    pub enum SocialPlatform {
        Website => ("website", "Website"),
        Twitter => ("twitter", "Twitter"),
        Linkedin => ("linkedin", "LinkedIn"),
        Github => ("github", "GitHub"),
        Instagram => ("instagram", "Instagram"),
        Facebook => ("facebook", "Facebook"),
        Youtube => ("youtube", "YouTube"),
        Discord => ("discord", "Discord"),
    }
}

/// Platform → profile URL.
pub type SocialLinks = BTreeMap<SocialPlatform, String>;

/// Contact details for an organisation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Case-insensitive substring test used by every free-text filter.
///
/// `needle` must already be lowercase.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
