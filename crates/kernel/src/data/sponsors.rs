use super::{contact, date, links, strings};
use crate::models::{BoothInfo, SocialPlatform, Sponsor, SponsorCategory, SponsorTier};

#[allow(clippy::too_many_arguments)]
fn sponsor(
    id: &str,
    name: &str,
    description: &str,
    tier: SponsorTier,
    category: SponsorCategory,
    featured: bool,
    benefits: &[&str],
    value: u64,
    booth: Option<(&str, &str)>,
) -> Sponsor {
    let slug = id.trim_start_matches("spn-");
    Sponsor {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        logo: format!("/images/sponsors/{slug}.svg"),
        website: format!("https://{slug}.example.com"),
        tier,
        category,
        featured,
        benefits: strings(benefits),
        social_links: links(&[(
            SocialPlatform::Linkedin,
            format!("https://linkedin.com/company/{slug}").as_str(),
        )]),
        contact: contact("Partnerships Team", &format!("partners@{slug}.example.com")),
        booth: booth.map(|(number, size)| BoothInfo {
            number: number.to_string(),
            location: "Main Hall".to_string(),
            size: size.to_string(),
        }),
        sponsorship_value: value,
        start_date: date(2025, 1, 1),
        end_date: date(2025, 12, 31),
        is_active: true,
    }
}

pub(super) fn seed() -> Vec<Sponsor> {
    let mut sponsors = vec![
        sponsor(
            "spn-lumen",
            "Lumen Cloud",
            "Cloud infrastructure for builders of every size.",
            SponsorTier::Platinum,
            SponsorCategory::Technology,
            true,
            &["Keynote slot", "Premium exhibition booth", "Logo on lanyards"],
            50_000,
            Some(("A1", "large")),
        ),
        sponsor(
            "spn-northwind",
            "Northwind AI",
            "Applied research lab building assistive language technology.",
            SponsorTier::Gold,
            SponsorCategory::Technology,
            true,
            &["Workshop slot", "Exhibition booth", "Recruiting session"],
            25_000,
            Some(("B2", "medium")),
        ),
        sponsor(
            "spn-finly",
            "Finly",
            "Student-friendly banking with zero fees.",
            SponsorTier::Silver,
            SponsorCategory::Finance,
            false,
            &["Exhibition booth", "Logo on website"],
            10_000,
            Some(("C4", "small")),
        ),
        sponsor(
            "spn-edupath",
            "EduPath",
            "Online courses co-created with universities.",
            SponsorTier::Silver,
            SponsorCategory::Education,
            false,
            &["Logo on website", "Swag bag insert"],
            8_000,
            None,
        ),
        sponsor(
            "spn-seedling",
            "Seedling Ventures",
            "Pre-seed fund for first-time student founders.",
            SponsorTier::Bronze,
            SponsorCategory::Startup,
            false,
            &["Logo on website"],
            3_000,
            None,
        ),
        sponsor(
            "spn-codeclub",
            "Code Club Network",
            "Volunteer-run coding clubs for teenagers.",
            SponsorTier::Community,
            SponsorCategory::NonProfit,
            false,
            &["Community table"],
            0,
            None,
        ),
        sponsor(
            "spn-devweekly",
            "Dev Weekly",
            "Newsletter and podcast about software careers.",
            SponsorTier::Media,
            SponsorCategory::Media,
            false,
            &["Podcast interviews", "Newsletter feature"],
            0,
            None,
        ),
    ];

    // Last year's bronze sponsor, kept for the archive page.
    let mut lapsed = sponsor(
        "spn-retro",
        "RetroByte",
        "Refurbished laptops for students.",
        SponsorTier::Bronze,
        SponsorCategory::Technology,
        false,
        &["Logo on website"],
        2_000,
        None,
    );
    lapsed.start_date = date(2024, 1, 1);
    lapsed.end_date = date(2024, 12, 31);
    lapsed.is_active = false;
    sponsors.push(lapsed);

    sponsors
}
