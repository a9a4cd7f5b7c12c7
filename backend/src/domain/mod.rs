//! Domain aggregates, value types, and use-case services.
//!
//! Everything here is transport agnostic: HTTP concerns live in
//! `inbound::http`, infrastructure concerns behind the traits in [`ports`].

pub mod contact;
pub mod error;
pub mod event;
pub mod identity;
pub mod otp;
pub mod ports;
pub mod profile;
pub mod registration;
pub mod society;
pub mod team;
pub mod user;

pub use self::contact::{ContactRequest, SupportDesk};
pub use self::error::{Error, ErrorCode};
pub use self::event::{Event, EventContact, EventDraft, EventUpdate, EventValidationError};
pub use self::identity::{EmailAddress, IdentityValidationError, Username};
pub use self::otp::OtpVerificationService;
pub use self::profile::SocietyProfileService;
pub use self::registration::{RegistrationRequest, RegistrationService};
pub use self::society::{
    EligibilityCriterion, NewSociety, PasswordHash, ProfileUpdate, SocialLink, Society,
};
pub use self::team::{TeamMember, TeamMemberDraft, TeamMemberUpdate};
pub use self::user::{SocietyRef, User};

/// Convenient result alias for domain services and HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;
