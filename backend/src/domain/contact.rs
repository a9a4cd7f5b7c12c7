//! Support contact form: message composition and dispatch.
//!
//! Two messages go out per submission: an acknowledgement to the sender and
//! a copy to the admin inbox. Composition is pure so it can be tested
//! without touching the mail service.

use std::sync::Arc;

use serde_json::json;
use tracing::error;

use super::error::Error;
use super::ports::{EmailMessage, Mailer};
use super::ApiResult;

/// Fields submitted by the support form.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

impl ContactRequest {
    /// All four fields are required.
    pub fn validate(&self) -> Result<(), Error> {
        let missing = [
            ("name", self.name.trim().is_empty()),
            ("email", self.email.trim().is_empty()),
            ("subject", self.subject.trim().is_empty()),
            ("body", self.body.trim().is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, empty)| empty.then_some(field))
        .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_request("All fields are required")
                .with_details(json!({ "missing": missing })))
        }
    }
}

fn html_paragraphs(body: &str) -> String {
    body.replace('\n', "<br>")
}

/// Acknowledgement sent back to the person who submitted the form.
pub fn acknowledgement_message(request: &ContactRequest, from: &str) -> EmailMessage {
    let html = format!(
        "<h2>Hi {name},</h2>\
         <p>Thank you for reaching out to Cleit Support. We've received your message \
         and will get back to you shortly.</p>\
         <hr />\
         <h3>Your message:</h3>\
         <p><strong>Subject:</strong> {subject}</p>\
         <p><strong>Message:</strong></p>\
         <p>{body}</p>\
         <hr />\
         <p>We'll review your message and respond as soon as possible.</p>\
         <p>Best regards,<br>Team Cleit</p>",
        name = request.name,
        subject = request.subject,
        body = html_paragraphs(&request.body),
    );
    EmailMessage {
        from: from.to_owned(),
        to: request.email.clone(),
        subject: "We've received your message — Cleit Support".to_owned(),
        html,
    }
}

/// Copy of the submission delivered to the admin inbox.
pub fn admin_copy_message(request: &ContactRequest, from: &str, admin: &str) -> EmailMessage {
    let html = format!(
        "<h2>New support request received</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Subject:</strong> {subject}</p>\
         <p><strong>Message:</strong></p>\
         <p>{body}</p>\
         <hr />\
         <p>This message was submitted via the Cleit support form.</p>",
        name = request.name,
        email = request.email,
        subject = request.subject,
        body = html_paragraphs(&request.body),
    );
    EmailMessage {
        from: from.to_owned(),
        to: admin.to_owned(),
        subject: format!("New Contact Form Submission from {}", request.name),
        html,
    }
}

/// Use-case service behind the support form.
#[derive(Clone)]
pub struct SupportDesk {
    mailer: Arc<dyn Mailer>,
    sender: String,
    admin: String,
}

impl SupportDesk {
    /// Create the service over a mailer port with fixed sender and admin
    /// addresses.
    pub fn new(mailer: Arc<dyn Mailer>, sender: impl Into<String>, admin: impl Into<String>) -> Self {
        Self {
            mailer,
            sender: sender.into(),
            admin: admin.into(),
        }
    }

    /// Validate the submission and send both messages.
    pub async fn submit(&self, request: &ContactRequest) -> ApiResult<()> {
        request.validate()?;
        let acknowledgement = acknowledgement_message(request, &self.sender);
        let admin_copy = admin_copy_message(request, &self.sender, &self.admin);

        for message in [&acknowledgement, &admin_copy] {
            self.mailer.send(message).await.map_err(|err| {
                error!(error = %err, to = %message.to, "support mail dispatch failed");
                Error::upstream("Failed to send emails")
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureMailer;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Asha".into(),
            email: "asha@x.edu".into(),
            subject: "Stall booking".into(),
            body: "First line\nSecond line".into(),
        }
    }

    #[rstest]
    fn acknowledgement_echoes_submission_with_breaks() {
        let message = acknowledgement_message(&request(), "Cleit <connect@cleit.example>");
        assert_eq!(message.to, "asha@x.edu");
        assert!(message.subject.contains("Cleit Support"));
        assert!(message.html.contains("First line<br>Second line"));
    }

    #[rstest]
    fn admin_copy_names_the_sender() {
        let message =
            admin_copy_message(&request(), "Cleit <connect@cleit.example>", "admin@cleit.example");
        assert_eq!(message.to, "admin@cleit.example");
        assert_eq!(message.subject, "New Contact Form Submission from Asha");
        assert!(message.html.contains("asha@x.edu"));
    }

    #[rstest]
    #[tokio::test]
    async fn submit_sends_acknowledgement_then_admin_copy() {
        let mailer = Arc::new(FixtureMailer::new());
        let desk = SupportDesk::new(mailer.clone(), "Cleit <c@c.example>", "admin@c.example");

        desk.submit(&request()).await.expect("submit");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "asha@x.edu");
        assert_eq!(sent[1].to, "admin@c.example");
    }

    #[rstest]
    #[tokio::test]
    async fn blank_fields_are_rejected_before_sending() {
        let mailer = Arc::new(FixtureMailer::new());
        let desk = SupportDesk::new(mailer.clone(), "Cleit <c@c.example>", "admin@c.example");

        let mut bad = request();
        bad.subject = "  ".into();
        let err = desk.submit(&bad).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(mailer.sent().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delivery_failure_maps_to_upstream() {
        let mailer = Arc::new(FixtureMailer::new());
        mailer.set_failing(true);
        let desk = SupportDesk::new(mailer, "Cleit <c@c.example>", "admin@c.example");

        let err = desk.submit(&request()).await.expect_err("delivery fails");
        assert_eq!(err.code(), ErrorCode::Upstream);
    }
}
