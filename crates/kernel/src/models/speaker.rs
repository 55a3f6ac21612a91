//! Speaker model.

use serde::{Deserialize, Serialize};

use super::common::{ExperienceLevel, SocialLinks, Track};
use super::reference::Record;

/// A conference speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: String,
    pub name: String,

    /// Job title (e.g. "Staff Engineer").
    pub title: String,
    pub company: String,
    pub bio: String,
    pub avatar: String,

    #[serde(default)]
    pub social_links: SocialLinks,

    #[serde(default)]
    pub featured: bool,

    /// Keynote speakers are shown in the hero section.
    #[serde(default)]
    pub keynote: bool,

    pub track: Track,
    pub experience_level: ExperienceLevel,

    /// Display order on the speakers page (ascending).
    #[serde(default)]
    pub order: u32,
}

impl Record for Speaker {
    const ENTITY: &'static str = "speaker";

    fn id(&self) -> &str {
        &self.id
    }
}
