//! Event data models.
//!
//! Plain records for every entity shown on the landing site. Category-like
//! fields are closed enums declared with [`closed_enum!`], so labels, wire
//! names and rank tables are exhaustive matches the compiler checks.

/// Declare a closed, wire-named enum.
///
/// Generates the enum with serde names, `ALL` (declaration order), `as_str`,
/// `label`, `Display` and a case-insensitive `FromStr`. Deserialization goes
/// through `FromStr`, so bodies, query strings and path segments all accept
/// any case. Declaration order is also the `Ord` order.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($wire:literal, $label:literal), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::models::UnknownVariant {
                    kind: stringify!($name),
                    value: s.to_string(),
                })
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub mod common;
pub mod community;
pub mod faq;
pub mod reference;
pub mod registration;
pub mod session;
pub mod speaker;
pub mod sponsor;

pub use common::{ContactInfo, ExperienceLevel, SocialLinks, SocialPlatform, Track};
pub use community::{
    Community, CommunityCategory, CommunityType, EventsOffered, Location, Partnership,
    PartnershipLevel,
};
pub use faq::{Faq, FaqCategory, FaqFeedback, FeedbackResult};
pub use reference::{Record, Ref, resolve_all};
pub use registration::{
    EmergencyContact, PaymentStatus, Registration, RegistrationReceipt, RegistrationRequest,
    RegistrationType, TicketType,
};
pub use session::{Session, SessionLevel, SessionType};
pub use speaker::Speaker;
pub use sponsor::{BoothInfo, Sponsor, SponsorCategory, SponsorTier};

/// A string that does not name any variant of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
