//! Registration form values as edited in the wizard.

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;
use crate::models::{
    EmergencyContact, ExperienceLevel, RegistrationRequest, RegistrationType, TicketType, Track,
};

/// Everything the four wizard steps collect.
///
/// Choice fields stay `None` until the attendee picks a value; the form
/// only becomes a [`RegistrationRequest`] once every step validates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    // Personal information
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub institution: String,

    // Experience and interests
    pub experience_level: Option<ExperienceLevel>,
    pub interests: Vec<Track>,
    pub expectations: String,

    // Emergency contact
    pub emergency_contact: EmergencyContact,

    // Ticket and terms
    pub ticket_type: Option<TicketType>,
    pub registration_type: Option<RegistrationType>,
    pub terms_accepted: bool,
    pub code_of_conduct_accepted: bool,
    pub newsletter: bool,
}

impl RegistrationForm {
    /// Toggle an interest on or off.
    pub fn toggle_interest(&mut self, track: Track) {
        if let Some(pos) = self.interests.iter().position(|t| *t == track) {
            self.interests.remove(pos);
        } else {
            self.interests.push(track);
        }
    }

    /// Convert into the submission payload, trimming text fields.
    ///
    /// Fails with a form-level error if a required choice is still unset;
    /// callers validate the steps first.
    pub fn to_request(&self) -> Result<RegistrationRequest, ValidationError> {
        let (Some(experience_level), Some(ticket_type)) = (self.experience_level, self.ticket_type)
        else {
            return Err(ValidationError::form("Registration form is incomplete"));
        };

        let expectations = self.expectations.trim();

        Ok(RegistrationRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            institution: self.institution.trim().to_string(),
            experience_level,
            interests: self.interests.clone(),
            expectations: (!expectations.is_empty()).then(|| expectations.to_string()),
            emergency_contact: EmergencyContact {
                name: self.emergency_contact.name.trim().to_string(),
                phone: self.emergency_contact.phone.trim().to_string(),
                relationship: self.emergency_contact.relationship.trim().to_string(),
            },
            ticket_type,
            registration_type: self
                .registration_type
                .unwrap_or(RegistrationType::Individual),
            terms_accepted: self.terms_accepted,
            code_of_conduct_accepted: self.code_of_conduct_accepted,
            newsletter: self.newsletter,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn toggle_interest_adds_then_removes() {
        let mut form = RegistrationForm::default();
        form.toggle_interest(Track::Web);
        form.toggle_interest(Track::AiMl);
        assert_eq!(form.interests, vec![Track::Web, Track::AiMl]);

        form.toggle_interest(Track::Web);
        assert_eq!(form.interests, vec![Track::AiMl]);
    }

    #[test]
    fn incomplete_form_does_not_convert() {
        let form = RegistrationForm::default();
        assert!(form.to_request().is_err());
    }

    #[test]
    fn conversion_trims_and_defaults() {
        let form = RegistrationForm {
            first_name: "  Ada ".to_string(),
            experience_level: Some(ExperienceLevel::Beginner),
            ticket_type: Some(TicketType::Student),
            expectations: "   ".to_string(),
            ..Default::default()
        };

        let request = form.to_request().unwrap();
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.registration_type, RegistrationType::Individual);
        assert!(request.expectations.is_none());
    }
}
