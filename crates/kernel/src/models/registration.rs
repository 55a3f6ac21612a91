//! Registration records and the submission payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{ExperienceLevel, Track};
use super::reference::Record;

closed_enum! {
    /// Ticket purchased by an attendee.
    pub enum TicketType {
        Student => ("student", "Student Pass"),
        General => ("general", "General Admission"),
        Vip => ("vip", "VIP Pass"),
        Workshop => ("workshop", "Workshop Pass"),
    }
}

impl TicketType {
    /// Price in whole currency units.
    pub fn price(self) -> u32 {
        match self {
            TicketType::Student => 0,
            TicketType::General => 49,
            TicketType::Vip => 149,
            TicketType::Workshop => 79,
        }
    }
}

closed_enum! {
    /// How the attendee registered.
    pub enum RegistrationType {
        Individual => ("individual", "Individual"),
        Group => ("group", "Group"),
        Volunteer => ("volunteer", "Volunteer"),
        Speaker => ("speaker", "Speaker"),
        Sponsor => ("sponsor", "Sponsor"),
    }
}

closed_enum! {
    /// Payment state of a registration.
    pub enum PaymentStatus {
        Pending => ("pending", "Pending"),
        Paid => ("paid", "Paid"),
        Waived => ("waived", "Waived"),
        Failed => ("failed", "Failed"),
        Refunded => ("refunded", "Refunded"),
    }
}

/// Person to call in an emergency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// Payload submitted by the registration wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    pub experience_level: ExperienceLevel,
    pub interests: Vec<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectations: Option<String>,
    pub emergency_contact: EmergencyContact,
    pub ticket_type: TicketType,
    pub registration_type: RegistrationType,
    pub terms_accepted: bool,
    pub code_of_conduct_accepted: bool,
    #[serde(default)]
    pub newsletter: bool,
}

/// Answer to a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub registration_id: Uuid,
    pub confirmation_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
}

/// A stored registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    pub experience_level: ExperienceLevel,
    pub interests: Vec<Track>,
    pub emergency_contact: EmergencyContact,
    pub ticket_type: TicketType,
    pub registration_type: RegistrationType,
    pub payment_status: PaymentStatus,
    pub confirmation_code: String,
    #[serde(default)]
    pub checked_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Build a stored registration from an accepted request.
    ///
    /// Free tickets are marked as waived, everything else starts pending.
    pub fn from_request(
        request: RegistrationRequest,
        confirmation_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let payment_status = if request.ticket_type.price() == 0 {
            PaymentStatus::Waived
        } else {
            PaymentStatus::Pending
        };

        Self {
            id: Uuid::now_v7(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            institution: request.institution,
            experience_level: request.experience_level,
            interests: request.interests,
            emergency_contact: request.emergency_contact,
            ticket_type: request.ticket_type,
            registration_type: request.registration_type,
            payment_status,
            confirmation_code,
            checked_in: false,
            checked_in_at: None,
            is_active: true,
            created_at,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Receipt returned to the registrant.
    pub fn receipt(&self) -> RegistrationReceipt {
        RegistrationReceipt {
            registration_id: self.id,
            confirmation_code: self.confirmation_code.clone(),
            qr_code: Some(format!("techfest:{}", self.confirmation_code)),
            ticket_url: Some(format!("/tickets/{}", self.confirmation_code)),
        }
    }
}

impl Record for Registration {
    const ENTITY: &'static str = "registration";

    fn id(&self) -> &str {
        &self.confirmation_code
    }
}
