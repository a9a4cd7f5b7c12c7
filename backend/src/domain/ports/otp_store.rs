//! Ephemeral storage port for one-time codes.
//!
//! Codes are written by an external sender keyed by email; this backend only
//! reads and deletes them.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by OTP store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpStoreError {
    /// The cache backend is unavailable or timing out.
    #[error("otp store backend failure: {message}")]
    Backend { message: String },
}

impl OtpStoreError {
    /// Helper for backend-level failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Cache port for one-time codes keyed by email.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Read the code stored for this email, if any.
    async fn fetch(&self, email: &str) -> Result<Option<String>, OtpStoreError>;

    /// Delete the code stored for this email.
    async fn delete(&self, email: &str) -> Result<(), OtpStoreError>;
}

/// In-memory OTP store used by tests and cache-less deployments.
#[derive(Default)]
pub struct FixtureOtpStore {
    codes: Mutex<HashMap<String, String>>,
}

impl FixtureOtpStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a code the way the external sender would.
    pub fn seed(&self, email: &str, code: &str) {
        if let Ok(mut guard) = self.codes.lock() {
            guard.insert(email.to_owned(), code.to_owned());
        }
    }
}

#[async_trait]
impl OtpStore for FixtureOtpStore {
    async fn fetch(&self, email: &str) -> Result<Option<String>, OtpStoreError> {
        let guard = self
            .codes
            .lock()
            .map_err(|_| OtpStoreError::backend("fixture store lock poisoned"))?;
        Ok(guard.get(email).cloned())
    }

    async fn delete(&self, email: &str) -> Result<(), OtpStoreError> {
        let mut guard = self
            .codes
            .lock()
            .map_err(|_| OtpStoreError::backend("fixture store lock poisoned"))?;
        guard.remove(email);
        Ok(())
    }
}
