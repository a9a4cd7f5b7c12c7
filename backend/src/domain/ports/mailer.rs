//! Outbound transactional email port.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use thiserror::Error;

/// One transactional message handed to the delivery service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Sender in `Display Name <address>` form.
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Errors surfaced by mailer adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailerError {
    /// The delivery service could not be reached.
    #[error("mail delivery failed: {message}")]
    Delivery { message: String },
    /// The delivery service rejected the message.
    #[error("mail rejected by delivery service: {message}")]
    Rejected { message: String },
}

impl MailerError {
    /// Helper for transport-level failures.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Helper for rejected submissions.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Port for sending one transactional message.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand the message to the delivery service.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Recording mailer used by tests and mail-less deployments.
#[derive(Default)]
pub struct FixtureMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failing: AtomicBool,
}

impl FixtureMailer {
    /// Create a mailer that records every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail, to exercise upstream error paths.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Release);
    }

    /// Messages recorded so far, in send order.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for FixtureMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        if self.failing.load(Ordering::Acquire) {
            return Err(MailerError::delivery("fixture mailer set to fail"));
        }
        let mut guard = self
            .sent
            .lock()
            .map_err(|_| MailerError::delivery("fixture mailer lock poisoned"))?;
        guard.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn message() -> EmailMessage {
        EmailMessage {
            from: "Cleit <connect@cleit.example>".into(),
            to: "asha@x.edu".into(),
            subject: "Hello".into(),
            html: "<p>Hi</p>".into(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn records_messages_in_order() {
        let mailer = FixtureMailer::new();
        mailer.send(&message()).await.expect("send");
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.sent()[0].to, "asha@x.edu");
    }

    #[rstest]
    #[tokio::test]
    async fn failing_mode_surfaces_delivery_errors() {
        let mailer = FixtureMailer::new();
        mailer.set_failing(true);
        let err = mailer.send(&message()).await.expect_err("send fails");
        assert!(matches!(err, MailerError::Delivery { .. }));
    }
}
