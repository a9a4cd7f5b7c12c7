//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed stores using Diesel
//! - **otp**: Redis-backed one-time-code store
//! - **email**: Resend-backed transactional mailer
//! - **token**: Firebase-backed credential verifier
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations; they contain no business logic.

pub mod email;
pub mod otp;
pub mod persistence;
pub mod token;
