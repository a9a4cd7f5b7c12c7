//! Firebase-backed credential verifier adapter.
//!
//! Resolves an ID token to the account's email via the Identity Toolkit
//! `accounts:lookup` endpoint. Token semantics (expiry, revocation,
//! signatures) are entirely the verifier's concern.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::domain::ports::{Principal, TokenVerificationError, TokenVerifier};
use crate::domain::EmailAddress;

const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    email: Option<String>,
}

/// HTTP client for the Firebase Identity Toolkit lookup endpoint.
#[derive(Clone)]
pub struct FirebaseTokenVerifier {
    client: reqwest::Client,
    api_key: String,
    endpoint: Url,
}

impl FirebaseTokenVerifier {
    /// Build a verifier using the production endpoint and the project's web
    /// API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TokenVerificationError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).map_err(|err| {
            TokenVerificationError::unavailable(format!("invalid verifier endpoint: {err}"))
        })?;
        Self::with_endpoint(api_key, endpoint)
    }

    /// Build a verifier against an alternative endpoint (test doubles).
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: Url,
    ) -> Result<Self, TokenVerificationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| {
                TokenVerificationError::unavailable(format!("verifier client build failed: {err}"))
            })?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint,
        })
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let response = self
            .client
            .post(url)
            .json(&json!({ "idToken": token }))
            .send()
            .await
            .map_err(|err| TokenVerificationError::unavailable(err.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            // The toolkit answers 400 INVALID_ID_TOKEN for bad credentials.
            return Err(TokenVerificationError::Invalid);
        }
        if !status.is_success() {
            return Err(TokenVerificationError::unavailable(format!(
                "status {status}"
            )));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|err| TokenVerificationError::unavailable(err.to_string()))?;
        let email = lookup
            .users
            .into_iter()
            .next()
            .and_then(|user| user.email)
            .ok_or(TokenVerificationError::Invalid)?;
        let email = EmailAddress::new(email).map_err(|_| TokenVerificationError::Invalid)?;
        Ok(Principal { email })
    }
}
