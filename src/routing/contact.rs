//! Contact page form
//!
//! Submitting a complete form clears every field and shows a confirmation
//! popup for [`CONFIRMATION_DURATION`]. Nothing is sent anywhere.

use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// How long the confirmation popup stays up.
pub const CONFIRMATION_DURATION: Duration = Duration::from_millis(3500);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContactRejected {
    #[error("field '{0}' is required")]
    MissingField(&'static str),

    #[error("email address is not valid")]
    InvalidEmail,
}

/// Field values captured at submit time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    confirmed_at: Option<Instant>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit at `now`; a rejected submission leaves the fields untouched
    pub fn submit(&mut self, now: Instant) -> Result<ContactSubmission, ContactRejected> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactRejected::MissingField(field));
            }
        }
        if !is_plausible_email(self.email.trim()) {
            return Err(ContactRejected::InvalidEmail);
        }

        let submission = ContactSubmission {
            name: std::mem::take(&mut self.name),
            email: std::mem::take(&mut self.email),
            message: std::mem::take(&mut self.message),
        };
        self.confirmed_at = Some(now);
        debug!("Contact form submitted");
        Ok(submission)
    }

    /// Whether the confirmation popup is showing at `now`
    ///
    /// A second submission restarts the timer.
    pub fn confirmation_visible(&self, now: Instant) -> bool {
        self.confirmed_at
            .is_some_and(|at| now.saturating_duration_since(at) < CONFIRMATION_DURATION)
    }
}

/// `local@domain` with a non-empty local part and a dotted domain
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
}
