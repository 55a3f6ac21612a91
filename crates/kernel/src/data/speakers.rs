use super::links;
use crate::models::{ExperienceLevel, SocialPlatform, Speaker, Track};

struct Seed {
    id: &'static str,
    name: &'static str,
    title: &'static str,
    company: &'static str,
    bio: &'static str,
    featured: bool,
    keynote: bool,
    track: Track,
    level: ExperienceLevel,
    order: u32,
    handle: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "spk-001",
        name: "Amara Okafor",
        title: "Principal Engineer",
        company: "Lumen Cloud",
        bio: "Builds planet-scale storage systems and mentors student open source contributors.",
        featured: true,
        keynote: true,
        track: Track::Cloud,
        level: ExperienceLevel::Expert,
        order: 1,
        handle: "amaraokafor",
    },
    Seed {
        id: "spk-002",
        name: "Diego Hernández",
        title: "Machine Learning Researcher",
        company: "Northwind AI",
        bio: "Works on efficient language models for low-resource languages.",
        featured: true,
        keynote: true,
        track: Track::AiMl,
        level: ExperienceLevel::Expert,
        order: 2,
        handle: "diegoh",
    },
    Seed {
        id: "spk-003",
        name: "Priya Raman",
        title: "Security Engineer",
        company: "Shieldwall",
        bio: "Red-team lead who teaches secure coding through capture-the-flag events.",
        featured: true,
        keynote: false,
        track: Track::Security,
        level: ExperienceLevel::Advanced,
        order: 3,
        handle: "priyaraman",
    },
    Seed {
        id: "spk-004",
        name: "Lukas Becker",
        title: "Frontend Lead",
        company: "Pixelhaus",
        bio: "Obsessed with accessible, fast web interfaces and design systems.",
        featured: false,
        keynote: false,
        track: Track::Web,
        level: ExperienceLevel::Advanced,
        order: 4,
        handle: "lukasbecker",
    },
    Seed {
        id: "spk-005",
        name: "Mei Tanaka",
        title: "Mobile Developer",
        company: "Kitsune Apps",
        bio: "Ships cross-platform apps used by millions of commuters.",
        featured: false,
        keynote: false,
        track: Track::Mobile,
        level: ExperienceLevel::Intermediate,
        order: 5,
        handle: "meitanaka",
    },
    Seed {
        id: "spk-006",
        name: "Samuel Adeyemi",
        title: "Data Scientist",
        company: "Northwind AI",
        bio: "Turns messy public datasets into decisions for city governments.",
        featured: true,
        keynote: false,
        track: Track::Data,
        level: ExperienceLevel::Advanced,
        order: 6,
        handle: "samadeyemi",
    },
    Seed {
        id: "spk-007",
        name: "Chloé Martin",
        title: "Product Designer",
        company: "Atelier UX",
        bio: "Designs learning tools with students instead of for them.",
        featured: false,
        keynote: false,
        track: Track::Design,
        level: ExperienceLevel::Intermediate,
        order: 7,
        handle: "chloemartin",
    },
    Seed {
        id: "spk-008",
        name: "Jordan Ellis",
        title: "Founder",
        company: "Launchpad Labs",
        bio: "Dropped out of a PhD to start a developer tools company; now angel invests in student founders.",
        featured: false,
        keynote: false,
        track: Track::Career,
        level: ExperienceLevel::Beginner,
        order: 8,
        handle: "jordanellis",
    },
];

pub(super) fn seed() -> Vec<Speaker> {
    SEEDS
        .iter()
        .map(|s| Speaker {
            id: s.id.to_string(),
            name: s.name.to_string(),
            title: s.title.to_string(),
            company: s.company.to_string(),
            bio: s.bio.to_string(),
            avatar: format!("/images/speakers/{}.jpg", s.id),
            social_links: links(&[
                (SocialPlatform::Twitter, format!("https://twitter.com/{}", s.handle).as_str()),
                (SocialPlatform::Linkedin, format!("https://linkedin.com/in/{}", s.handle).as_str()),
            ]),
            featured: s.featured,
            keynote: s.keynote,
            track: s.track,
            experience_level: s.level,
            order: s.order,
        })
        .collect()
}
