//! Schedule queries.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::aggregate::count_by;
use super::types::{Page, PageWindow, SortDirection, SortField, SortSpec, compare_text, search_term};
use crate::models::common::contains_folded;
use crate::models::{Session, SessionLevel, SessionType, Speaker, Track, resolve_all};

pub const DEFAULT_LIMIT: u32 = 10;

/// Sortable session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionSort {
    /// Chronological: date, start time, then display order.
    #[default]
    StartTime,
    Title,
    Room,
    Order,
}

impl SortField for SessionSort {
    const KEYS: &'static [(Self, &'static str)] = &[
        (SessionSort::StartTime, "startTime"),
        (SessionSort::Title, "title"),
        (SessionSort::Room, "room"),
        (SessionSort::Order, "order"),
    ];

    fn natural_direction(self) -> SortDirection {
        SortDirection::Asc
    }
}

/// Schedule list parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec<SessionSort>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub session_type: Option<SessionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SessionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_day: Option<u8>,
    /// Exact room name (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    /// Speaker id that must present in the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl SessionQuery {
    fn matches(&self, session: &Session, term: Option<&str>) -> bool {
        self.session_type.is_none_or(|t| session.session_type == t)
            && self.track.is_none_or(|t| session.track == t)
            && self.level.is_none_or(|l| session.level == l)
            && self.event_day.is_none_or(|d| session.event_day == d)
            && self
                .room
                .as_deref()
                .is_none_or(|r| session.room.eq_ignore_ascii_case(r.trim()))
            && self
                .speaker
                .as_deref()
                .is_none_or(|id| session.features_speaker(id))
            && term.is_none_or(|t| {
                contains_folded(&session.title, t)
                    || contains_folded(&session.description, t)
                    || contains_folded(&session.room, t)
                    || session.tags.iter().any(|x| contains_folded(x, t))
            })
    }
}

/// Unfiltered schedule counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total: u64,
    pub by_type: BTreeMap<SessionType, u64>,
    pub by_track: BTreeMap<Track, u64>,
    pub by_level: BTreeMap<SessionLevel, u64>,
    pub by_day: BTreeMap<u8, u64>,
    /// Distinct rooms in use.
    pub rooms: u64,
}

/// Filter, sort and page sessions.
pub fn query(sessions: &[Session], params: &SessionQuery) -> Page<Session, ScheduleStats> {
    let term = search_term(params.search.as_deref());
    let mut matched: Vec<Session> = sessions
        .iter()
        .filter(|s| params.matches(s, term.as_deref()))
        .cloned()
        .collect();

    sort(&mut matched, params.sort.unwrap_or_default());

    PageWindow::new(params.page, params.limit, DEFAULT_LIMIT).apply(matched, Some(stats(sessions)))
}

/// Stable sort by the given key.
pub fn sort(sessions: &mut [Session], spec: SortSpec<SessionSort>) {
    let direction = spec.direction();
    sessions.sort_by(|a, b| direction.apply(compare(a, b, spec.key)));
}

fn compare(a: &Session, b: &Session, key: SessionSort) -> Ordering {
    match key {
        SessionSort::StartTime => (a.date, a.start_time, a.order).cmp(&(b.date, b.start_time, b.order)),
        SessionSort::Title => compare_text(&a.title, &b.title),
        SessionSort::Room => compare_text(&a.room, &b.room),
        SessionSort::Order => a.order.cmp(&b.order),
    }
}

pub fn stats(sessions: &[Session]) -> ScheduleStats {
    let rooms: BTreeSet<&str> = sessions.iter().map(|s| s.room.as_str()).collect();

    ScheduleStats {
        total: sessions.len() as u64,
        by_type: count_by(sessions, |s| s.session_type),
        by_track: count_by(sessions, |s| s.track),
        by_level: count_by(sessions, |s| s.level),
        by_day: count_by(sessions, |s| s.event_day),
        rooms: rooms.len() as u64,
    }
}

/// Sessions of one conference day in chronological order.
pub fn by_day(sessions: &[Session], day: u8) -> Vec<Session> {
    let mut out: Vec<Session> = sessions.iter().filter(|s| s.event_day == day).cloned().collect();
    sort(&mut out, SortSpec::default());
    out
}

/// Speakers of a session that still exist.
pub fn speakers_for<'a>(session: &Session, speakers: &'a [Speaker]) -> Vec<&'a Speaker> {
    resolve_all(&session.event_speakers, speakers)
}
