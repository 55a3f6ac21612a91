//! Registration wizard and form validation.
//!
//! The wizard walks an attendee through four steps, validating each step
//! before it advances. Validation helpers are shared with the FAQ feedback
//! form and with the server-side registration endpoint.

mod types;
pub mod validation;
mod wizard;

pub use types::RegistrationForm;
pub use validation::{ValidationError, validate_feedback, validate_registration};
pub use wizard::{RegistrationWizard, Step, WizardStatus};
