//! Individual student accounts.
//!
//! Societies are the audience of this backend; student users live mostly in
//! the sibling campus app. The aggregate is persisted here because the two
//! share one store, but no HTTP routes expose it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::identity::{EmailAddress, Username};

/// Weak reference to a society, by its public handle rather than ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocietyRef {
    pub society_username: String,
}

impl SocietyRef {
    /// Reference a society by handle.
    pub fn new(society_username: impl Into<String>) -> Self {
        Self {
            society_username: society_username.into(),
        }
    }
}

/// A student account with saved societies and reminder subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub username: Username,
    #[schema(value_type = String)]
    pub email: EmailAddress,
    pub branch: String,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_start: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_end: Option<i32>,
    pub wishlist: Vec<SocietyRef>,
    pub reminders: Vec<SocietyRef>,
}

impl User {
    /// Add a society to the wishlist; duplicates are ignored.
    pub fn wishlist_add(&mut self, society_username: &str) {
        if !Self::contains(&self.wishlist, society_username) {
            self.wishlist.push(SocietyRef::new(society_username));
        }
    }

    /// Remove a society from the wishlist; unknown handles are a no-op.
    pub fn wishlist_remove(&mut self, society_username: &str) {
        self.wishlist
            .retain(|entry| entry.society_username != society_username);
    }

    /// Add a reminder subscription; duplicates are ignored.
    pub fn reminder_add(&mut self, society_username: &str) {
        if !Self::contains(&self.reminders, society_username) {
            self.reminders.push(SocietyRef::new(society_username));
        }
    }

    /// Remove a reminder subscription; unknown handles are a no-op.
    pub fn reminder_remove(&mut self, society_username: &str) {
        self.reminders
            .retain(|entry| entry.society_username != society_username);
    }

    fn contains(entries: &[SocietyRef], society_username: &str) -> bool {
        entries
            .iter()
            .any(|entry| entry.society_username == society_username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user() -> User {
        User {
            id: Uuid::nil(),
            name: "Asha".into(),
            username: Username::new("asha").expect("username"),
            email: EmailAddress::new("asha@x.edu").expect("email"),
            branch: "CSE".into(),
            section: "B".into(),
            batch_start: Some(2024),
            batch_end: Some(2028),
            wishlist: Vec::new(),
            reminders: Vec::new(),
        }
    }

    #[rstest]
    fn wishlist_add_is_idempotent() {
        let mut u = user();
        u.wishlist_add("drama");
        u.wishlist_add("drama");
        assert_eq!(u.wishlist.len(), 1);
    }

    #[rstest]
    fn removal_of_unknown_handle_is_a_no_op() {
        let mut u = user();
        u.reminder_add("drama");
        u.reminder_remove("music");
        assert_eq!(u.reminders.len(), 1);
    }

    #[rstest]
    fn refs_serialise_with_camel_case_key() {
        let value = serde_json::to_value(SocietyRef::new("drama")).expect("serialise ref");
        assert_eq!(value["societyUsername"], "drama");
    }
}
