use super::{strings, timestamp};
use crate::models::{Faq, FaqCategory, Ref};

struct Seed {
    id: &'static str,
    question: &'static str,
    answer: &'static str,
    category: FaqCategory,
    tags: &'static [&'static str],
    priority: u32,
    featured: bool,
    votes: (u32, u32),
    related: &'static [&'static str],
    updated: (i32, u32, u32),
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "faq-001",
        question: "What is TechFest?",
        answer: "A five-day student technology conference with talks, workshops and a hackathon.",
        category: FaqCategory::General,
        tags: &["about", "overview"],
        priority: 1,
        featured: true,
        votes: (42, 3),
        related: &["faq-002", "faq-005"],
        updated: (2025, 1, 15),
    },
    Seed {
        id: "faq-002",
        question: "How do I register?",
        answer: "Complete the four-step registration form. You will receive a confirmation code by email.",
        category: FaqCategory::Registration,
        tags: &["signup", "form"],
        priority: 2,
        featured: true,
        votes: (35, 2),
        related: &["faq-003", "faq-099"],
        updated: (2025, 2, 1),
    },
    Seed {
        id: "faq-003",
        question: "How much does a ticket cost?",
        answer: "Student passes are free with a valid student ID. General admission and VIP passes are paid.",
        category: FaqCategory::Tickets,
        tags: &["price", "student"],
        priority: 3,
        featured: true,
        votes: (28, 5),
        related: &["faq-002"],
        updated: (2025, 2, 10),
    },
    Seed {
        id: "faq-004",
        question: "Where can I find the schedule?",
        answer: "The full schedule is published on the Schedule page and updated as sessions are confirmed.",
        category: FaqCategory::Schedule,
        tags: &["agenda", "timetable"],
        priority: 6,
        featured: false,
        votes: (12, 1),
        related: &[],
        updated: (2025, 3, 1),
    },
    Seed {
        id: "faq-005",
        question: "Where is the venue?",
        answer: "All sessions take place at the University Convention Centre, next to the central station.",
        category: FaqCategory::Venue,
        tags: &["location", "address"],
        priority: 4,
        featured: true,
        votes: (20, 0),
        related: &["faq-006"],
        updated: (2025, 1, 20),
    },
    Seed {
        id: "faq-006",
        question: "How do I get to the venue?",
        answer: "Take any regional train to the central station and walk five minutes north.",
        category: FaqCategory::Travel,
        tags: &["transport", "train"],
        priority: 7,
        featured: false,
        votes: (9, 2),
        related: &["faq-005"],
        updated: (2025, 1, 22),
    },
    Seed {
        id: "faq-007",
        question: "Is accommodation provided?",
        answer: "We have discounted rates at partner hostels. Book through the link in your confirmation email.",
        category: FaqCategory::Accommodation,
        tags: &["hotel", "hostel"],
        priority: 8,
        featured: false,
        votes: (7, 4),
        related: &[],
        updated: (2025, 2, 5),
    },
    Seed {
        id: "faq-008",
        question: "Will food be provided?",
        answer: "Lunch and snacks are included every day. Vegetarian, vegan and halal options are available.",
        category: FaqCategory::Food,
        tags: &["lunch", "dietary"],
        priority: 9,
        featured: false,
        votes: (15, 1),
        related: &[],
        updated: (2025, 2, 12),
    },
    Seed {
        id: "faq-009",
        question: "Is the venue accessible?",
        answer: "Yes. All rooms are step-free and live captioning is available for keynotes.",
        category: FaqCategory::Accessibility,
        tags: &["wheelchair", "captions"],
        priority: 5,
        featured: false,
        votes: (11, 0),
        related: &["faq-005"],
        updated: (2025, 2, 20),
    },
    Seed {
        id: "faq-010",
        question: "How can I apply to speak?",
        answer: "Submit a proposal through the call for speakers before the deadline listed on the Speakers page.",
        category: FaqCategory::Speakers,
        tags: &["cfp", "proposal"],
        priority: 10,
        featured: false,
        votes: (6, 1),
        related: &[],
        updated: (2024, 11, 30),
    },
    Seed {
        id: "faq-011",
        question: "How can my company sponsor the conference?",
        answer: "Download the sponsorship prospectus and contact the partnerships team.",
        category: FaqCategory::Sponsors,
        tags: &["prospectus", "partnership"],
        priority: 11,
        featured: false,
        votes: (4, 0),
        related: &[],
        updated: (2024, 12, 5),
    },
    Seed {
        id: "faq-012",
        question: "Can I volunteer?",
        answer: "Volunteers get a free pass and a t-shirt. Choose the volunteer registration type when you sign up.",
        category: FaqCategory::Volunteering,
        tags: &["helpers", "crew"],
        priority: 12,
        featured: false,
        votes: (8, 2),
        related: &["faq-002"],
        updated: (2025, 1, 5),
    },
    Seed {
        id: "faq-013",
        question: "Is there a code of conduct?",
        answer: "Yes. Every attendee must accept it during registration. Report concerns to any organizer.",
        category: FaqCategory::CodeOfConduct,
        tags: &["safety", "conduct"],
        priority: 3,
        featured: true,
        votes: (18, 0),
        related: &[],
        updated: (2025, 1, 10),
    },
    Seed {
        id: "faq-014",
        question: "How do I get online at the venue?",
        answer: "Connect to the conference network; credentials are printed on the back of your badge.",
        category: FaqCategory::Technical,
        tags: &["wifi", "eduroam"],
        priority: 13,
        featured: false,
        votes: (0, 0),
        related: &[],
        updated: (2025, 3, 5),
    },
];

pub(super) fn seed() -> Vec<Faq> {
    SEEDS
        .iter()
        .map(|s| Faq {
            id: s.id.to_string(),
            question: s.question.to_string(),
            answer: s.answer.to_string(),
            category: s.category,
            tags: strings(s.tags),
            priority: s.priority,
            featured: s.featured,
            helpful: s.votes.0,
            not_helpful: s.votes.1,
            related_faqs: s.related.iter().map(|id| Ref::new(*id)).collect(),
            last_updated: timestamp(s.updated.0, s.updated.1, s.updated.2),
        })
        .collect()
}
