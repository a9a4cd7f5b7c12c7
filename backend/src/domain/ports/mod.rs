//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the document store, the OTP cache, the mail service, the credential
//! verifier). Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants, and each ships a functional
//! `Fixture*` implementation for tests and infrastructure-less runs.

pub mod mailer;
pub mod otp_store;
pub mod society_store;
pub mod token_verifier;
pub mod user_store;

pub use self::mailer::{EmailMessage, FixtureMailer, Mailer, MailerError};
pub use self::otp_store::{FixtureOtpStore, OtpStore, OtpStoreError};
pub use self::society_store::{
    EntryMutation, FixtureSocietyStore, SocietyStore, SocietyStoreError,
};
pub use self::token_verifier::{
    FixtureTokenVerifier, Principal, TokenVerificationError, TokenVerifier,
};
pub use self::user_store::{FixtureUserStore, UserStore, UserStoreError};
