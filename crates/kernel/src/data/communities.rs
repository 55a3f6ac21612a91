use super::{contact, date, links, strings};
use crate::models::{
    Community, CommunityCategory, CommunityType, EventsOffered, Location, Partnership,
    PartnershipLevel, SocialPlatform,
};

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    community_type: CommunityType,
    category: CommunityCategory,
    city: &'static str,
    country: &'static str,
    is_remote: bool,
    featured: bool,
    members: u32,
    founded: i32,
    technologies: &'static [&'static str],
    events: EventsOffered,
    partnership: Option<PartnershipLevel>,
}

const ALL_EVENTS: EventsOffered = EventsOffered {
    workshops: true,
    hackathons: true,
    meetups: true,
    mentorship: true,
};

const MEETUPS_ONLY: EventsOffered = EventsOffered {
    workshops: false,
    hackathons: false,
    meetups: true,
    mentorship: false,
};

const SEEDS: &[Seed] = &[
    Seed {
        id: "com-gdsc",
        name: "Developer Student Club Lagos",
        description: "Campus club running weekly study jams and an annual hackathon.",
        community_type: CommunityType::StudentClub,
        category: CommunityCategory::Technology,
        city: "Lagos",
        country: "Nigeria",
        is_remote: false,
        featured: true,
        members: 1_200,
        founded: 2019,
        technologies: &["Flutter", "Firebase", "Kotlin"],
        events: ALL_EVENTS,
        partnership: Some(PartnershipLevel::Premier),
    },
    Seed {
        id: "com-rustaceans",
        name: "Rustaceans Berlin",
        description: "Monthly meetups about systems programming in Rust.",
        community_type: CommunityType::Meetup,
        category: CommunityCategory::Technology,
        city: "Berlin",
        country: "Germany",
        is_remote: false,
        featured: true,
        members: 3_400,
        founded: 2015,
        technologies: &["Rust", "WebAssembly"],
        events: MEETUPS_ONLY,
        partnership: Some(PartnershipLevel::Official),
    },
    Seed {
        id: "com-womenintech",
        name: "Women in Tech Collective",
        description: "Mentorship network supporting women entering software careers.",
        community_type: CommunityType::Nonprofit,
        category: CommunityCategory::Diversity,
        city: "Toronto",
        country: "Canada",
        is_remote: true,
        featured: true,
        members: 8_500,
        founded: 2014,
        technologies: &["JavaScript", "Python"],
        events: ALL_EVENTS,
        partnership: Some(PartnershipLevel::Premier),
    },
    Seed {
        id: "com-openml",
        name: "OpenML Guild",
        description: "Contributors maintaining open machine learning datasets and tools.",
        community_type: CommunityType::OpenSource,
        category: CommunityCategory::Data,
        city: "Amsterdam",
        country: "Netherlands",
        is_remote: true,
        featured: false,
        members: 5_100,
        founded: 2016,
        technologies: &["Python", "PyTorch", "Rust"],
        events: EventsOffered {
            workshops: true,
            hackathons: true,
            meetups: false,
            mentorship: false,
        },
        partnership: None,
    },
    Seed {
        id: "com-ctf",
        name: "Campus CTF League",
        description: "Inter-university capture-the-flag competitions every semester.",
        community_type: CommunityType::StudentClub,
        category: CommunityCategory::Security,
        city: "Bangalore",
        country: "India",
        is_remote: false,
        featured: false,
        members: 900,
        founded: 2020,
        technologies: &["Linux", "Python", "Ghidra"],
        events: EventsOffered {
            workshops: true,
            hackathons: true,
            meetups: false,
            mentorship: true,
        },
        partnership: Some(PartnershipLevel::Supporting),
    },
    Seed {
        id: "com-designjam",
        name: "Design Jam",
        description: "Designers and developers prototyping together in 48-hour jams.",
        community_type: CommunityType::Developer,
        category: CommunityCategory::Design,
        city: "Lisbon",
        country: "Portugal",
        is_remote: false,
        featured: false,
        members: 650,
        founded: 2018,
        technologies: &["Figma", "React"],
        events: MEETUPS_ONLY,
        partnership: None,
    },
    Seed {
        id: "com-founders",
        name: "Student Founders Network",
        description: "Peer support for students turning side projects into companies.",
        community_type: CommunityType::Professional,
        category: CommunityCategory::Entrepreneurship,
        city: "Nairobi",
        country: "Kenya",
        is_remote: true,
        featured: false,
        members: 2_300,
        founded: 2021,
        technologies: &["No-code", "JavaScript"],
        events: EventsOffered {
            workshops: false,
            hackathons: false,
            meetups: true,
            mentorship: true,
        },
        partnership: Some(PartnershipLevel::Supporting),
    },
    Seed {
        id: "com-cloudnative",
        name: "Cloud Native Lagos",
        description: "Practitioners sharing Kubernetes and DevOps experience.",
        community_type: CommunityType::Developer,
        category: CommunityCategory::General,
        city: "Lagos",
        country: "Nigeria",
        is_remote: false,
        featured: false,
        members: 1_750,
        founded: 2017,
        technologies: &["Kubernetes", "Go", "Terraform"],
        events: ALL_EVENTS,
        partnership: None,
    },
];

pub(super) fn seed() -> Vec<Community> {
    SEEDS
        .iter()
        .map(|s| {
            let slug = s.id.trim_start_matches("com-");
            Community {
                id: s.id.to_string(),
                name: s.name.to_string(),
                description: s.description.to_string(),
                logo: format!("/images/communities/{slug}.png"),
                website: format!("https://{slug}.example.org"),
                community_type: s.community_type,
                category: s.category,
                location: Location {
                    city: s.city.to_string(),
                    country: s.country.to_string(),
                    region: None,
                    is_remote: s.is_remote,
                },
                featured: s.featured,
                member_count: s.members,
                founded_year: s.founded,
                technologies: strings(s.technologies),
                social_links: links(&[(
                    SocialPlatform::Discord,
                    format!("https://discord.gg/{slug}").as_str(),
                )]),
                contact: contact("Organizers", &format!("hello@{slug}.example.org")),
                events_offered: s.events,
                partnership: s.partnership.map(|level| Partnership {
                    level,
                    benefits: strings(&["Discounted tickets", "Logo on website"]),
                    start_date: date(2025, 1, 1),
                    end_date: date(2025, 12, 31),
                }),
            }
        })
        .collect()
}
