//! Resend-backed mailer adapter.
//!
//! Delivery happens over Resend's HTTP API; the adapter submits one message
//! per call and treats any non-success status as a rejection.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use url::Url;

use crate::domain::ports::{EmailMessage, Mailer, MailerError};

const DEFAULT_ENDPOINT: &str = "https://api.resend.com/emails";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Resend transactional email API.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: Url,
}

impl ResendMailer {
    /// Build a mailer using the production Resend endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, MailerError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|err| MailerError::delivery(format!("invalid mail endpoint: {err}")))?;
        Self::with_endpoint(api_key, endpoint)
    }

    /// Build a mailer against an alternative endpoint (test doubles).
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: Url) -> Result<Self, MailerError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| MailerError::delivery(format!("mail client build failed: {err}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint,
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let body = json!({
            "from": message.from,
            "to": [message.to],
            "subject": message.subject,
            "html": message.html,
        });
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| MailerError::delivery(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(MailerError::rejected(format!("status {status}")))
        }
    }
}
