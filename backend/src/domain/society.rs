//! The society aggregate: a registered student organisation and everything
//! it publishes (roster, events, social links, eligibility criteria).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::event::Event;
use super::identity::{EmailAddress, Username};
use super::team::TeamMember;

/// A link to a society's presence on some platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub handle: String,
}

/// One entry in a society's eligibility list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCriterion {
    #[serde(default)]
    pub name: String,
}

/// Argon2id hash of a society's password, in PHC string format.
///
/// Lives only on the write path ([`NewSociety`]); the [`Society`] returned by
/// reads carries no credential material at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed PHC hash string.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Borrow the PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A registered student organisation, the root aggregate of this system.
///
/// ## Invariants
/// - `email` and `username` are unique across the directory (store-enforced).
/// - Embedded roster and event entries carry store-generated identifiers
///   unique within their list.
/// - The aggregate exclusively owns its embedded lists: deleting the society
///   deletes them implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Society {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "drama")]
    pub username: Username,
    #[schema(value_type = String, example = "drama@x.edu")]
    pub email: EmailAddress,
    pub about: String,
    pub website: String,
    pub logo: String,
    #[serde(rename = "type")]
    pub society_type: String,
    pub faculty_coordinator: String,
    pub audition_open: bool,
    pub centralized: bool,
    pub team: Vec<TeamMember>,
    pub events: Vec<Event>,
    pub social: Vec<SocialLink>,
    pub eligibility: Vec<EligibilityCriterion>,
}

/// Record inserted at registration: identity plus the hashed credential.
/// Every profile field starts empty and every embedded list starts empty.
#[derive(Debug, Clone)]
pub struct NewSociety {
    pub name: String,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

/// Allow-listed partial update for a society's top-level profile.
///
/// Absent fields are left untouched. The roster and event lists are not
/// reachable from here (they have their own targeted operations), so a
/// partial profile update can never clobber them. The login email and the
/// credential are likewise not updatable through this path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Username>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub society_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_coordinator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audition_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centralized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Vec<EligibilityCriterion>>,
}

impl ProfileUpdate {
    /// True when no field is present, i.e. applying it is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.about.is_none()
            && self.website.is_none()
            && self.logo.is_none()
            && self.society_type.is_none()
            && self.faculty_coordinator.is_none()
            && self.audition_open.is_none()
            && self.centralized.is_none()
            && self.social.is_none()
            && self.eligibility.is_none()
    }
}
