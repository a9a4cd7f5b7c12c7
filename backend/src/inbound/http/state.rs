//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain services and ports, keeping them testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureMailer, FixtureOtpStore, FixtureSocietyStore, FixtureTokenVerifier, TokenVerifier,
};
use crate::domain::{
    OtpVerificationService, RegistrationService, SocietyProfileService, SupportDesk,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: RegistrationService,
    pub society: SocietyProfileService,
    pub otp: OtpVerificationService,
    pub support: SupportDesk,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Handles onto the fixture adapters backing a [`HttpState::with_fixtures`]
/// state, so tests can seed codes and inspect outbound mail.
pub struct FixtureHandles {
    pub society_store: Arc<FixtureSocietyStore>,
    pub otp_store: Arc<FixtureOtpStore>,
    pub mailer: Arc<FixtureMailer>,
}

impl HttpState {
    /// Build a state wired entirely to in-memory fixture adapters.
    ///
    /// Used by tests and by runs without external infrastructure configured.
    pub fn with_fixtures() -> (Self, FixtureHandles) {
        let society_store = Arc::new(FixtureSocietyStore::new());
        let otp_store = Arc::new(FixtureOtpStore::new());
        let mailer = Arc::new(FixtureMailer::new());

        let state = Self {
            registration: RegistrationService::new(society_store.clone()),
            society: SocietyProfileService::new(society_store.clone()),
            otp: OtpVerificationService::new(otp_store.clone()),
            support: SupportDesk::new(
                mailer.clone(),
                "Cleit <connect@cleit.example>",
                "admin@cleit.example",
            ),
            verifier: Arc::new(FixtureTokenVerifier),
        };
        let handles = FixtureHandles {
            society_store,
            otp_store,
            mailer,
        };
        (state, handles)
    }
}
