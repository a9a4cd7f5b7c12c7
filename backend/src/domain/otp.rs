//! One-time-code verification use-case.
//!
//! Codes are issued and stored by an external sender; this service only
//! checks a submitted code against the stored one and consumes it on match.
//! A mismatch leaves the stored code in place so the user may retry until
//! the sender's expiry evicts it.

use std::sync::Arc;

use tracing::error;

use super::error::Error;
use super::ports::{OtpStore, OtpStoreError};
use super::ApiResult;

fn map_otp_error(err: OtpStoreError) -> Error {
    error!(error = %err, "otp store failure");
    Error::upstream("OTP store unavailable")
}

/// Use-case service verifying one-time codes.
#[derive(Clone)]
pub struct OtpVerificationService {
    store: Arc<dyn OtpStore>,
}

impl OtpVerificationService {
    /// Create the service over an OTP store port.
    pub fn new(store: Arc<dyn OtpStore>) -> Self {
        Self { store }
    }

    /// Compare the submitted code with the stored one. On match the stored
    /// code is deleted, making it single-use.
    pub async fn verify(&self, email: &str, code: &str) -> ApiResult<bool> {
        let stored = self.store.fetch(email).await.map_err(map_otp_error)?;
        match stored {
            Some(expected) if expected == code => {
                self.store.delete(email).await.map_err(map_otp_error)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureOtpStore;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn matching_code_verifies_once() {
        let store = Arc::new(FixtureOtpStore::new());
        store.seed("drama@x.edu", "482913");
        let service = OtpVerificationService::new(store);

        assert!(service.verify("drama@x.edu", "482913").await.expect("verify"));
        // Consumed on success: the same code must not verify twice.
        assert!(!service.verify("drama@x.edu", "482913").await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn mismatch_keeps_the_stored_code() {
        let store = Arc::new(FixtureOtpStore::new());
        store.seed("drama@x.edu", "482913");
        let service = OtpVerificationService::new(store);

        assert!(!service.verify("drama@x.edu", "000000").await.expect("verify"));
        assert!(service.verify("drama@x.edu", "482913").await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_email_fails_verification() {
        let service = OtpVerificationService::new(Arc::new(FixtureOtpStore::new()));
        assert!(!service.verify("ghost@x.edu", "482913").await.expect("verify"));
    }
}
