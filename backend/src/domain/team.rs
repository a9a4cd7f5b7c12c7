//! Team roster entries embedded in a society.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A person listed on a society's roster. Not a login principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Store-generated identifier, the only addressing key for edits.
    pub id: Uuid,
    pub name: String,
    pub designation: String,
    pub mobile: String,
    pub email: String,
}

/// Payload for adding a roster entry; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDraft {
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
}

/// Partial update for one roster entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl TeamMemberUpdate {
    /// True when no field is present, i.e. applying it is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.designation.is_none()
            && self.mobile.is_none()
            && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn draft_defaults_optional_fields() {
        let draft: TeamMemberDraft =
            serde_json::from_str(r#"{"name":"Asha"}"#).expect("parse draft");
        assert_eq!(draft.name, "Asha");
        assert_eq!(draft.designation, "");
        assert_eq!(draft.mobile, "");
    }

    #[rstest]
    fn update_emptiness_tracks_presence() {
        assert!(TeamMemberUpdate::default().is_empty());
        let update = TeamMemberUpdate {
            mobile: Some("12345".into()),
            ..TeamMemberUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
