//! Field validation shared by the registration wizard, the FAQ feedback
//! form and the server-side registration endpoint.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{EmergencyContact, FaqFeedback, RegistrationRequest};

/// Longest accepted feedback comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

/// Fewest digits a phone number may contain.
pub const MIN_PHONE_DIGITS: usize = 10;

/// `local@domain.tld` with no whitespace.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex literal"));

/// Validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field name (None for form-level errors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Error message.
    pub message: String,
}

impl ValidationError {
    /// Create a field-level error.
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
            message: message.into(),
        }
    }

    /// Create a form-level error.
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Number of ASCII digits, ignoring spaces, dashes and a leading `+`.
pub fn phone_digits(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_digits(phone) >= MIN_PHONE_DIGITS
}

/// Collects field errors in the order checks run.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    pub(crate) fn required(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors
                .push(ValidationError::field(field, format!("{label} is required")));
        }
        self
    }

    pub(crate) fn present<T>(&mut self, field: &str, label: &str, value: Option<T>) -> &mut Self {
        if value.is_none() {
            self.errors
                .push(ValidationError::field(field, format!("{label} is required")));
        }
        self
    }

    pub(crate) fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors
                .push(ValidationError::field(field, "Email is required"));
        } else if !is_valid_email(value) {
            self.errors
                .push(ValidationError::field(field, "Enter a valid email address"));
        }
        self
    }

    pub(crate) fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_phone(value) {
            self.errors.push(ValidationError::field(
                field,
                format!("Phone number must contain at least {MIN_PHONE_DIGITS} digits"),
            ));
        }
        self
    }

    pub(crate) fn non_empty<T>(&mut self, field: &str, message: &str, values: &[T]) -> &mut Self {
        if values.is_empty() {
            self.errors.push(ValidationError::field(field, message));
        }
        self
    }

    pub(crate) fn accepted(&mut self, field: &str, message: &str, value: bool) -> &mut Self {
        if !value {
            self.errors.push(ValidationError::field(field, message));
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Vec<ValidationError> {
        std::mem::take(&mut self.errors)
    }
}

pub(crate) fn check_personal(
    c: &mut Checker,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    institution: &str,
) {
    c.required("firstName", "First name", first_name)
        .required("lastName", "Last name", last_name)
        .email("email", email)
        .phone("phone", phone)
        .required("institution", "Institution", institution);
}

pub(crate) fn check_emergency_contact(c: &mut Checker, contact: &EmergencyContact) {
    c.required("emergencyContact.name", "Contact name", &contact.name)
        .phone("emergencyContact.phone", &contact.phone)
        .required(
            "emergencyContact.relationship",
            "Relationship",
            &contact.relationship,
        );
}

/// Server-side check of a submitted registration.
pub fn validate_registration(request: &RegistrationRequest) -> AppResult<()> {
    let mut c = Checker::default();
    check_personal(
        &mut c,
        &request.first_name,
        &request.last_name,
        &request.email,
        &request.phone,
        &request.institution,
    );
    c.non_empty("interests", "Select at least one interest", &request.interests);
    check_emergency_contact(&mut c, &request.emergency_contact);
    c.accepted(
        "termsAccepted",
        "You must accept the terms and conditions",
        request.terms_accepted,
    )
    .accepted(
        "codeOfConductAccepted",
        "You must accept the code of conduct",
        request.code_of_conduct_accepted,
    );

    into_result(c.finish())
}

/// Check FAQ feedback before it is sent.
pub fn validate_feedback(feedback: &FaqFeedback) -> AppResult<()> {
    let mut errors = Vec::new();

    if feedback.faq_id.trim().is_empty() {
        errors.push(ValidationError::field("faqId", "FAQ id is required"));
    }

    if let Some(comment) = &feedback.comment
        && comment.chars().count() > MAX_COMMENT_CHARS
    {
        errors.push(ValidationError::field(
            "comment",
            format!("Comment must be at most {MAX_COMMENT_CHARS} characters"),
        ));
    }

    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let field_error = ValidationError::field("email", "Invalid email");
        assert_eq!(field_error.field, Some("email".to_string()));

        let form_error = ValidationError::form("Submission failed");
        assert!(form_error.field.is_none());
    }

    #[test]
    fn email_needs_domain_and_tld() {
        assert!(is_valid_email("ada@uni.edu"));
        assert!(is_valid_email("  ada.l+tf@mail.uni.ac.uk "));
        assert!(!is_valid_email("ada@uni"));
        assert!(!is_valid_email("ada uni.edu"));
        assert!(!is_valid_email("@uni.edu"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_counts_digits_only() {
        assert!(is_valid_phone("+44 20 7946 0958"));
        assert!(is_valid_phone("555-123-4567"));
        assert!(!is_valid_phone("555-1234"));
        assert_eq!(phone_digits("(555) 123"), 6);
    }

    #[test]
    fn feedback_comment_is_bounded() {
        let mut feedback = FaqFeedback {
            faq_id: "faq-001".to_string(),
            helpful: true,
            comment: Some("x".repeat(MAX_COMMENT_CHARS)),
        };
        assert!(validate_feedback(&feedback).is_ok());

        feedback.comment = Some("x".repeat(MAX_COMMENT_CHARS + 1));
        let Err(AppError::Validation(errors)) = validate_feedback(&feedback) else {
            panic!("expected a validation error");
        };
        assert_eq!(errors[0].field.as_deref(), Some("comment"));
    }

    #[test]
    fn feedback_needs_an_id() {
        let feedback = FaqFeedback {
            faq_id: " ".to_string(),
            helpful: false,
            comment: None,
        };
        assert!(matches!(
            validate_feedback(&feedback),
            Err(AppError::Validation(_))
        ));
    }
}
