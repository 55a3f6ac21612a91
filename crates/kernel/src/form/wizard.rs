//! Four-step registration wizard.
//!
//! Steps advance only when the current step validates. Going back is always
//! allowed. Submission re-validates everything, hands the request to the
//! [`EventService`] and ends in `Success` or `Error`; from `Error` the
//! attendee stays on the last step and may submit again.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::types::RegistrationForm;
use super::validation::{Checker, ValidationError, check_emergency_contact, check_personal};
use crate::error::{AppError, AppResult};
use crate::models::RegistrationReceipt;
use crate::services::EventService;

/// A page of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Personal,
    Experience,
    EmergencyContact,
    TicketAndTerms,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::Personal,
        Step::Experience,
        Step::EmergencyContact,
        Step::TicketAndTerms,
    ];

    /// 1-based position.
    pub fn number(self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::Experience => 2,
            Step::EmergencyContact => 3,
            Step::TicketAndTerms => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Personal => "Personal Information",
            Step::Experience => "Experience & Interests",
            Step::EmergencyContact => "Emergency Contact",
            Step::TicketAndTerms => "Ticket & Terms",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Personal => Some(Step::Experience),
            Step::Experience => Some(Step::EmergencyContact),
            Step::EmergencyContact => Some(Step::TicketAndTerms),
            Step::TicketAndTerms => None,
        }
    }

    pub fn prev(self) -> Option<Step> {
        match self {
            Step::Personal => None,
            Step::Experience => Some(Step::Personal),
            Step::EmergencyContact => Some(Step::Experience),
            Step::TicketAndTerms => Some(Step::EmergencyContact),
        }
    }
}

/// Where the wizard is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum WizardStatus {
    Editing { step: Step },
    Submitting,
    Success { receipt: RegistrationReceipt },
    Error { message: String },
}

/// Registration wizard state machine.
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    pub form: RegistrationForm,
    status: WizardStatus,
    errors: Vec<ValidationError>,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self::with_form(RegistrationForm::default())
    }

    /// Start from pre-filled values.
    pub fn with_form(form: RegistrationForm) -> Self {
        Self {
            form,
            status: WizardStatus::Editing {
                step: Step::Personal,
            },
            errors: Vec::new(),
        }
    }

    pub fn status(&self) -> &WizardStatus {
        &self.status
    }

    /// The step on screen. Outside of editing this is the last step.
    pub fn current_step(&self) -> Step {
        match self.status {
            WizardStatus::Editing { step } => step,
            _ => Step::TicketAndTerms,
        }
    }

    /// Errors from the last failed transition or submission.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Error for one field, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field.as_deref() == Some(field))
            .map(|e| e.message.as_str())
    }

    /// Completion as a percentage of steps.
    pub fn progress(&self) -> u8 {
        match self.status {
            WizardStatus::Success { .. } => 100,
            _ => self.current_step().number() * 25,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, WizardStatus::Submitting)
    }

    pub fn validate_step(&self, step: Step) -> Vec<ValidationError> {
        let form = &self.form;
        let mut c = Checker::default();

        match step {
            Step::Personal => check_personal(
                &mut c,
                &form.first_name,
                &form.last_name,
                &form.email,
                &form.phone,
                &form.institution,
            ),
            Step::Experience => {
                c.present(
                    "experienceLevel",
                    "Experience level",
                    form.experience_level,
                )
                .non_empty("interests", "Select at least one interest", &form.interests);
            }
            Step::EmergencyContact => check_emergency_contact(&mut c, &form.emergency_contact),
            Step::TicketAndTerms => {
                c.present("ticketType", "Ticket type", form.ticket_type)
                    .accepted(
                        "termsAccepted",
                        "You must accept the terms and conditions",
                        form.terms_accepted,
                    )
                    .accepted(
                        "codeOfConductAccepted",
                        "You must accept the code of conduct",
                        form.code_of_conduct_accepted,
                    );
            }
        }

        c.finish()
    }

    /// Validate the current step and advance. On failure the wizard stays
    /// where it is and the field errors are returned.
    pub fn next_step(&mut self) -> Result<Step, Vec<ValidationError>> {
        let WizardStatus::Editing { step } = self.status else {
            return Ok(self.current_step());
        };

        let errors = self.validate_step(step);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }

        self.errors.clear();
        let step = step.next().unwrap_or(step);
        debug!(step = step.title(), "wizard advanced");
        self.status = WizardStatus::Editing { step };
        Ok(step)
    }

    /// Go back one step without validating. From `Error` this leaves the
    /// last step.
    pub fn prev_step(&mut self) -> Step {
        let from = match self.status {
            WizardStatus::Editing { step } => step,
            WizardStatus::Error { .. } => Step::TicketAndTerms,
            WizardStatus::Submitting | WizardStatus::Success { .. } => {
                return self.current_step();
            }
        };

        let step = from.prev().unwrap_or(from);
        self.status = WizardStatus::Editing { step };
        self.errors.clear();
        step
    }

    /// Re-validate all steps and submit.
    ///
    /// A step that fails validation becomes the current step again.
    pub async fn submit(&mut self, service: &EventService) -> AppResult<RegistrationReceipt> {
        if self.is_submitting() {
            return Err(AppError::BadRequest(
                "registration is already being submitted".to_string(),
            ));
        }
        if let WizardStatus::Success { .. } = self.status {
            return Err(AppError::BadRequest(
                "registration was already completed".to_string(),
            ));
        }

        for step in Step::ALL {
            let errors = self.validate_step(step);
            if !errors.is_empty() {
                self.status = WizardStatus::Editing { step };
                self.errors = errors.clone();
                return Err(AppError::Validation(errors));
            }
        }

        let request = self
            .form
            .to_request()
            .map_err(|e| AppError::Validation(vec![e]))?;

        self.errors.clear();
        self.status = WizardStatus::Submitting;

        match service.submit_registration(request).await {
            Ok(receipt) => {
                info!(
                    confirmation_code = %receipt.confirmation_code,
                    "registration completed"
                );
                self.status = WizardStatus::Success {
                    receipt: receipt.clone(),
                };
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "registration submission failed");
                if let AppError::Validation(fields) = &e {
                    self.errors = fields.clone();
                }
                self.status = WizardStatus::Error {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Start over with an empty form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
