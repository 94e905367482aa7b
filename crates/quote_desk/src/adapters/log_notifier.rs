// Rust guideline compliant 2026-02-23

//! Demo adapter for the `Notifier` port.
//!
//! Logs each accepted submission via `tracing::info!` and always returns `Ok(())`.
//! `NotifyError::DeliveryFailed` is unreachable in this demo adapter; an email
//! or chat integration would implement the same trait.

use domain::{Notifier, NotifyError, QuoteSubmission};

/// `Notifier` adapter that emits one log event per accepted submission.
#[derive(Debug)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a new log notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for LogNotifier {
    async fn notify(&self, submission: &QuoteSubmission) -> Result<(), NotifyError> {
        tracing::info!(
            submission_id = %submission.submission_id,
            modules = %pricing::describe_specification(&submission.ram_spec),
            estimated_value = submission.quote.estimated_value,
            contact = %submission.contact.name,
            preferred_contact = %submission.contact.preferred_contact,
            "log_notifier.new_submission"
        );
        Ok(())
    }
}
