//! Credential verification port.
//!
//! Bearer tokens are opaque to this backend; the external verifier resolves
//! them to a principal or rejects them. Header syntax checks happen in the
//! HTTP adapter before this port is consulted.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::identity::EmailAddress;

/// Authenticated identity derived from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: EmailAddress,
}

/// Errors surfaced by token verifier adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenVerificationError {
    /// The token was rejected by the verifier.
    #[error("token rejected by credential verifier")]
    Invalid,
    /// The verifier could not be reached.
    #[error("credential verifier unavailable: {message}")]
    Unavailable { message: String },
}

impl TokenVerificationError {
    /// Helper for transport-level failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port resolving a bearer token to a principal.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify the token and return the identity it asserts.
    async fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError>;
}

/// Deterministic verifier used by tests and verifier-less deployments.
///
/// Accepts tokens of the form `token-for:<email>` and resolves them to that
/// email; everything else is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenVerifier;

impl FixtureTokenVerifier {
    /// Token prefix recognised by the fixture.
    pub const PREFIX: &'static str = "token-for:";

    /// Build the token the fixture would accept for this email.
    pub fn token_for(email: &str) -> String {
        format!("{}{email}", Self::PREFIX)
    }
}

#[async_trait]
impl TokenVerifier for FixtureTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError> {
        let email = token
            .strip_prefix(Self::PREFIX)
            .ok_or(TokenVerificationError::Invalid)?;
        let email = EmailAddress::new(email).map_err(|_| TokenVerificationError::Invalid)?;
        Ok(Principal { email })
    }
}
