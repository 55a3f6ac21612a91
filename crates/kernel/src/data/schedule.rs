use super::{date, strings, time};
use crate::models::{Ref, Session, SessionLevel, SessionType, Track};

struct Seed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    session_type: SessionType,
    day: u8,
    start: (u32, u32),
    end: (u32, u32),
    room: &'static str,
    speakers: &'static [&'static str],
    tags: &'static [&'static str],
    level: SessionLevel,
    track: Track,
    order: u32,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "ses-001",
        title: "Opening Ceremony",
        description: "Welcome from the organizers and a tour of the week ahead.",
        session_type: SessionType::Ceremony,
        day: 1,
        start: (9, 0),
        end: (9, 30),
        room: "Main Hall",
        speakers: &[],
        tags: &["welcome"],
        level: SessionLevel::All,
        track: Track::Career,
        order: 1,
    },
    Seed {
        id: "ses-002",
        title: "Building Systems That Outlive You",
        description: "Lessons from a decade of running storage at scale.",
        session_type: SessionType::Keynote,
        day: 1,
        start: (9, 30),
        end: (10, 30),
        room: "Main Hall",
        speakers: &["spk-001"],
        tags: &["storage", "reliability"],
        level: SessionLevel::All,
        track: Track::Cloud,
        order: 2,
    },
    Seed {
        id: "ses-003",
        title: "Coffee Break",
        description: "Refreshments in the foyer.",
        session_type: SessionType::Break,
        day: 1,
        start: (10, 30),
        end: (11, 0),
        room: "Foyer",
        speakers: &[],
        tags: &[],
        level: SessionLevel::All,
        track: Track::Career,
        order: 3,
    },
    Seed {
        id: "ses-004",
        title: "Accessible Interfaces from Day One",
        description: "Practical patterns for building inclusive web apps.",
        session_type: SessionType::Talk,
        day: 1,
        start: (11, 0),
        end: (11, 45),
        room: "Room A",
        speakers: &["spk-004"],
        tags: &["a11y", "frontend"],
        level: SessionLevel::Intermediate,
        track: Track::Web,
        order: 4,
    },
    Seed {
        id: "ses-005",
        title: "Hands-on Capture the Flag",
        description: "Solve beginner-friendly security challenges in teams.",
        session_type: SessionType::Workshop,
        day: 1,
        start: (13, 0),
        end: (15, 0),
        room: "Lab 1",
        speakers: &["spk-003"],
        tags: &["ctf", "security"],
        level: SessionLevel::Beginner,
        track: Track::Security,
        order: 5,
    },
    Seed {
        id: "ses-006",
        title: "Language Models for Every Language",
        description: "Training efficient models when data is scarce.",
        session_type: SessionType::Keynote,
        day: 2,
        start: (9, 0),
        end: (10, 0),
        room: "Main Hall",
        speakers: &["spk-002"],
        tags: &["nlp", "research"],
        level: SessionLevel::All,
        track: Track::AiMl,
        order: 1,
    },
    Seed {
        id: "ses-007",
        title: "Shipping Cross-Platform Apps",
        description: "One codebase, two stores, millions of users.",
        session_type: SessionType::Talk,
        day: 2,
        start: (10, 15),
        end: (11, 0),
        room: "Room A",
        speakers: &["spk-005"],
        tags: &["mobile", "flutter"],
        level: SessionLevel::Intermediate,
        track: Track::Mobile,
        order: 2,
    },
    Seed {
        id: "ses-008",
        title: "Open Data for Civic Decisions",
        description: "From public spreadsheets to policy dashboards.",
        session_type: SessionType::Workshop,
        day: 2,
        start: (11, 15),
        end: (13, 0),
        room: "Lab 2",
        speakers: &["spk-006"],
        tags: &["python", "visualization"],
        level: SessionLevel::Intermediate,
        track: Track::Data,
        order: 3,
    },
    Seed {
        id: "ses-009",
        title: "Careers in Tech Panel",
        description: "Engineers, designers and founders answer your questions.",
        session_type: SessionType::Panel,
        day: 2,
        start: (14, 0),
        end: (15, 0),
        room: "Main Hall",
        speakers: &["spk-001", "spk-007", "spk-008"],
        tags: &["career", "advice"],
        level: SessionLevel::All,
        track: Track::Career,
        order: 4,
    },
    Seed {
        id: "ses-010",
        title: "Designing With Students",
        description: "Co-design methods for learning tools.",
        session_type: SessionType::Talk,
        day: 3,
        start: (10, 0),
        end: (10, 45),
        room: "Room B",
        speakers: &["spk-007"],
        tags: &["ux", "research"],
        level: SessionLevel::Beginner,
        track: Track::Design,
        order: 1,
    },
    Seed {
        id: "ses-011",
        title: "Lightning Talks",
        description: "Five-minute talks from attendees. Lineup announced on the day.",
        session_type: SessionType::Lightning,
        day: 3,
        start: (11, 0),
        end: (12, 0),
        room: "Main Hall",
        speakers: &["spk-008", "spk-999"],
        tags: &["community"],
        level: SessionLevel::All,
        track: Track::Career,
        order: 2,
    },
    Seed {
        id: "ses-012",
        title: "Closing Networking Mixer",
        description: "Meet speakers, sponsors and communities.",
        session_type: SessionType::Networking,
        day: 3,
        start: (17, 0),
        end: (19, 0),
        room: "Foyer",
        speakers: &[],
        tags: &["social"],
        level: SessionLevel::All,
        track: Track::Career,
        order: 3,
    },
];

/// Calendar date of conference day 1.
const FIRST_DAY: (i32, u32, u32) = (2025, 3, 10);

pub(super) fn seed() -> Vec<Session> {
    let (y, m, d) = FIRST_DAY;
    SEEDS
        .iter()
        .map(|s| Session {
            id: s.id.to_string(),
            title: s.title.to_string(),
            description: s.description.to_string(),
            session_type: s.session_type,
            start_time: time(s.start.0, s.start.1),
            end_time: time(s.end.0, s.end.1),
            date: date(y, m, d + u32::from(s.day) - 1),
            room: s.room.to_string(),
            event_speakers: s.speakers.iter().map(|id| Ref::new(*id)).collect(),
            tags: strings(s.tags),
            level: s.level,
            track: s.track,
            event_day: s.day,
            order: s.order,
        })
        .collect()
}
