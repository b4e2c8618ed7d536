//! Contact module - Form submission and relay.
//!
//! - `submission` - Payload + validation shared by both sides
//! - `form` - Visitor-side form state machine
//! - `relay` - Server-side forwarding to the form processor

pub mod form;
mod relay;
mod submission;

pub use form::{ContactForm, ContactSettings, SubmissionStatus};
pub use relay::{FORM_SERVICE_BASE, FormRelay, RelayError, RelayOutcome, form_endpoint};
pub use submission::{ContactSubmission, ValidationIssue, is_plausible_email};
