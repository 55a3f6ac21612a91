//! Schedule session model.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::common::Track;
use super::reference::{Record, Ref};
use super::speaker::Speaker;

closed_enum! {
    /// Kind of schedule slot.
    pub enum SessionType {
        Keynote => ("keynote", "Keynote"),
        Talk => ("talk", "Talk"),
        Workshop => ("workshop", "Workshop"),
        Panel => ("panel", "Panel Discussion"),
        Lightning => ("lightning", "Lightning Talks"),
        Networking => ("networking", "Networking"),
        Break => ("break", "Break"),
        Ceremony => ("ceremony", "Ceremony"),
    }
}

closed_enum! {
    /// Audience level of a session.
    pub enum SessionLevel {
        Beginner => ("beginner", "Beginner"),
        Intermediate => ("intermediate", "Intermediate"),
        Advanced => ("advanced", "Advanced"),
        All => ("all", "All Levels"),
    }
}

/// First and last valid `event_day`.
pub const FIRST_EVENT_DAY: u8 = 1;
pub const LAST_EVENT_DAY: u8 = 5;

/// A slot in the conference schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub date: NaiveDate,
    pub room: String,

    /// Speakers presenting, by id. May reference speakers that no longer exist.
    #[serde(default)]
    pub event_speakers: Vec<Ref<Speaker>>,

    #[serde(default)]
    pub tags: Vec<String>,
    pub level: SessionLevel,
    pub track: Track,

    /// Conference day, 1 through 5.
    pub event_day: u8,
    #[serde(default)]
    pub order: u32,
}

impl Session {
    /// Whether `speaker_id` presents in this session.
    pub fn features_speaker(&self, speaker_id: &str) -> bool {
        self.event_speakers.iter().any(|s| s.id() == speaker_id)
    }
}

impl Record for Session {
    const ENTITY: &'static str = "session";

    fn id(&self) -> &str {
        &self.id
    }
}
