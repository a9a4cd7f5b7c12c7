//! Persistence port for the society aggregate.
//!
//! The trait is the seam between the profile/registration services and the
//! document store. Adapters map their infrastructure failures into
//! [`SocietyStoreError`] so services see predictable variants. Not-found is
//! modelled in the return types, not the error enum: reads yield `Option`,
//! and targeted entry mutations yield [`EntryMutation`] so callers can tell
//! a missing society from a missing entry.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::event::{Event, EventDraft, EventUpdate};
use crate::domain::identity::EmailAddress;
use crate::domain::society::{NewSociety, PasswordHash, ProfileUpdate, Society};
use crate::domain::team::{TeamMember, TeamMemberDraft, TeamMemberUpdate};

/// Errors surfaced by society store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocietyStoreError {
    /// Store connectivity failed (pool checkout, network, timeout).
    #[error("society store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("society store query failed: {message}")]
    Query { message: String },
    /// A unique identity column (username or email) is already taken.
    #[error("{field} is already registered")]
    Duplicate { field: String },
}

impl SocietyStoreError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-identity collisions.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }
}

/// Outcome of a targeted update of one embedded entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryMutation {
    /// The entry was updated; the refreshed aggregate is returned.
    Applied(Box<Society>),
    /// No society matches the given email.
    SocietyMissing,
    /// The society exists but no entry matches the identifier.
    EntryMissing,
}

/// Document-store port for societies.
///
/// Every mutation is a single targeted statement on the adapter side;
/// there is no read-modify-write of embedded lists.
#[async_trait]
pub trait SocietyStore: Send + Sync {
    /// Fetch a society (with roster and events) by its login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Society>, SocietyStoreError>;

    /// True when a society already uses this username.
    async fn username_exists(&self, username: &str) -> Result<bool, SocietyStoreError>;

    /// True when a society already uses this email.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, SocietyStoreError>;

    /// Insert a freshly registered society with empty embedded lists.
    async fn insert(&self, society: &NewSociety) -> Result<(), SocietyStoreError>;

    /// Apply an allow-listed partial update to the top-level profile.
    /// Returns `None` when no society matches.
    async fn update_profile(
        &self,
        email: &EmailAddress,
        update: &ProfileUpdate,
    ) -> Result<Option<Society>, SocietyStoreError>;

    /// Delete the society and everything it owns. Returns whether a row
    /// was removed.
    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, SocietyStoreError>;

    /// Append one roster entry; the store assigns its identifier.
    async fn add_team_member(
        &self,
        email: &EmailAddress,
        draft: &TeamMemberDraft,
    ) -> Result<Option<Society>, SocietyStoreError>;

    /// Update one roster entry by identifier.
    async fn update_team_member(
        &self,
        email: &EmailAddress,
        member_id: Uuid,
        update: &TeamMemberUpdate,
    ) -> Result<EntryMutation, SocietyStoreError>;

    /// Remove one roster entry by identifier. Removing an unknown
    /// identifier leaves the roster unchanged.
    async fn remove_team_member(
        &self,
        email: &EmailAddress,
        member_id: Uuid,
    ) -> Result<Option<Society>, SocietyStoreError>;

    /// Append one event; the store assigns its identifier.
    async fn add_event(
        &self,
        email: &EmailAddress,
        draft: &EventDraft,
    ) -> Result<Option<Society>, SocietyStoreError>;

    /// Update one event by identifier.
    async fn update_event(
        &self,
        email: &EmailAddress,
        event_id: Uuid,
        update: &EventUpdate,
    ) -> Result<EntryMutation, SocietyStoreError>;

    /// Remove one event by identifier. Removing an unknown identifier
    /// leaves the list unchanged.
    async fn remove_event(
        &self,
        email: &EmailAddress,
        event_id: Uuid,
    ) -> Result<Option<Society>, SocietyStoreError>;

    /// Fetch just the events list. Returns `None` when no society matches.
    async fn list_events(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Vec<Event>>, SocietyStoreError>;
}

struct StoredSociety {
    society: Society,
    #[expect(dead_code, reason = "retained so the fixture mirrors the real row shape")]
    password_hash: PasswordHash,
}

/// In-memory store used by tests and by deployments without a database.
#[derive(Default)]
pub struct FixtureSocietyStore {
    societies: Mutex<Vec<StoredSociety>>,
}

impl FixtureSocietyStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_societies<T>(
        &self,
        f: impl FnOnce(&mut Vec<StoredSociety>) -> T,
    ) -> Result<T, SocietyStoreError> {
        let mut guard = self
            .societies
            .lock()
            .map_err(|_| SocietyStoreError::query("fixture store lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

fn apply_profile_update(society: &mut Society, update: &ProfileUpdate) {
    if let Some(name) = &update.name {
        society.name = name.clone();
    }
    if let Some(username) = &update.username {
        society.username = username.clone();
    }
    if let Some(about) = &update.about {
        society.about = about.clone();
    }
    if let Some(website) = &update.website {
        society.website = website.clone();
    }
    if let Some(logo) = &update.logo {
        society.logo = logo.clone();
    }
    if let Some(society_type) = &update.society_type {
        society.society_type = society_type.clone();
    }
    if let Some(faculty_coordinator) = &update.faculty_coordinator {
        society.faculty_coordinator = faculty_coordinator.clone();
    }
    if let Some(audition_open) = update.audition_open {
        society.audition_open = audition_open;
    }
    if let Some(centralized) = update.centralized {
        society.centralized = centralized;
    }
    if let Some(social) = &update.social {
        society.social = social.clone();
    }
    if let Some(eligibility) = &update.eligibility {
        society.eligibility = eligibility.clone();
    }
}

fn apply_member_update(member: &mut TeamMember, update: &TeamMemberUpdate) {
    if let Some(name) = &update.name {
        member.name = name.clone();
    }
    if let Some(designation) = &update.designation {
        member.designation = designation.clone();
    }
    if let Some(mobile) = &update.mobile {
        member.mobile = mobile.clone();
    }
    if let Some(email) = &update.email {
        member.email = email.clone();
    }
}

fn apply_event_update(event: &mut Event, update: &EventUpdate) {
    if let Some(title) = &update.title {
        event.title = title.clone();
    }
    if let Some(event_type) = &update.event_type {
        event.event_type = event_type.clone();
    }
    if let Some(start_date) = &update.start_date {
        event.start_date = Some(start_date.clone());
    }
    if let Some(end_date) = &update.end_date {
        event.end_date = Some(end_date.clone());
    }
    if let Some(venue) = &update.venue {
        event.venue = venue.clone();
    }
    if let Some(time) = &update.time {
        event.time = time.clone();
    }
    if let Some(about) = &update.about {
        event.about = about.clone();
    }
    if let Some(contact) = &update.contact {
        event.contact = contact.clone();
    }
    if let Some(social_group) = &update.social_group {
        event.social_group = social_group.clone();
    }
}

fn member_from_draft(draft: &TeamMemberDraft) -> TeamMember {
    TeamMember {
        id: Uuid::new_v4(),
        name: draft.name.clone(),
        designation: draft.designation.clone(),
        mobile: draft.mobile.clone(),
        email: draft.email.clone(),
    }
}

fn event_from_draft(draft: &EventDraft) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: draft.title.clone(),
        event_type: draft.event_type.clone(),
        start_date: draft.start_date.clone(),
        end_date: draft.end_date.clone(),
        venue: draft.venue.clone(),
        time: draft.time.clone(),
        about: draft.about.clone(),
        contact: draft.contact.clone(),
        social_group: draft.social_group.clone(),
    }
}

#[async_trait]
impl SocietyStore for FixtureSocietyStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Society>, SocietyStoreError> {
        self.with_societies(|societies| {
            societies
                .iter()
                .find(|stored| &stored.society.email == email)
                .map(|stored| stored.society.clone())
        })
    }

    async fn username_exists(&self, username: &str) -> Result<bool, SocietyStoreError> {
        self.with_societies(|societies| {
            societies
                .iter()
                .any(|stored| stored.society.username.as_str() == username)
        })
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, SocietyStoreError> {
        self.with_societies(|societies| {
            societies.iter().any(|stored| &stored.society.email == email)
        })
    }

    async fn insert(&self, society: &NewSociety) -> Result<(), SocietyStoreError> {
        self.with_societies(|societies| {
            if societies
                .iter()
                .any(|stored| stored.society.email == society.email)
            {
                return Err(SocietyStoreError::duplicate("email"));
            }
            if societies
                .iter()
                .any(|stored| stored.society.username == society.username)
            {
                return Err(SocietyStoreError::duplicate("username"));
            }
            societies.push(StoredSociety {
                society: Society {
                    id: Uuid::new_v4(),
                    name: society.name.clone(),
                    username: society.username.clone(),
                    email: society.email.clone(),
                    about: String::new(),
                    website: String::new(),
                    logo: String::new(),
                    society_type: String::new(),
                    faculty_coordinator: String::new(),
                    audition_open: false,
                    centralized: false,
                    team: Vec::new(),
                    events: Vec::new(),
                    social: Vec::new(),
                    eligibility: Vec::new(),
                },
                password_hash: society.password_hash.clone(),
            });
            Ok(())
        })?
    }

    async fn update_profile(
        &self,
        email: &EmailAddress,
        update: &ProfileUpdate,
    ) -> Result<Option<Society>, SocietyStoreError> {
        self.with_societies(|societies| {
            if let Some(username) = &update.username {
                let taken = societies.iter().any(|stored| {
                    &stored.society.email != email && &stored.society.username == username
                });
                if taken {
                    return Err(SocietyStoreError::duplicate("username"));
                }
            }
            let Some(stored) = societies
                .iter_mut()
                .find(|stored| &stored.society.email == email)
            else {
                return Ok(None);
            };
            apply_profile_update(&mut stored.society, update);
            Ok(Some(stored.society.clone()))
        })?
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, SocietyStoreError> {
        self.with_societies(|societies| {
            let before = societies.len();
            societies.retain(|stored| &stored.society.email != email);
            societies.len() != before
        })
    }

    async fn add_team_member(
        &self,
        email: &EmailAddress,
        draft: &TeamMemberDraft,
    ) -> Result<Option<Society>, SocietyStoreError> {
        self.with_societies(|societies| {
            let Some(stored) = societies
                .iter_mut()
                .find(|stored| &stored.society.email == email)
            else {
                return None;
            };
            stored.society.team.push(member_from_draft(draft));
            Some(stored.society.clone())
        })
    }

    async fn update_team_member(
        &self,
        email: &EmailAddress,
        member_id: Uuid,
        update: &TeamMemberUpdate,
    ) -> Result<EntryMutation, SocietyStoreError> {
        self.with_societies(|societies| {
            let Some(stored) = societies
                .iter_mut()
                .find(|stored| &stored.society.email == email)
            else {
                return EntryMutation::SocietyMissing;
            };
            let Some(member) = stored
                .society
                .team
                .iter_mut()
                .find(|member| member.id == member_id)
            else {
                return EntryMutation::EntryMissing;
            };
            apply_member_update(member, update);
            EntryMutation::Applied(Box::new(stored.society.clone()))
        })
    }

    async fn remove_team_member(
        &self,
        email: &EmailAddress,
        member_id: Uuid,
    ) -> Result<Option<Society>, SocietyStoreError> {
        self.with_societies(|societies| {
            let Some(stored) = societies
                .iter_mut()
                .find(|stored| &stored.society.email == email)
            else {
                return None;
            };
            stored.society.team.retain(|member| member.id != member_id);
            Some(stored.society.clone())
        })
    }

    async fn add_event(
        &self,
        email: &EmailAddress,
        draft: &EventDraft,
    ) -> Result<Option<Society>, SocietyStoreError> {
        self.with_societies(|societies| {
            let Some(stored) = societies
                .iter_mut()
                .find(|stored| &stored.society.email == email)
            else {
                return None;
            };
            stored.society.events.push(event_from_draft(draft));
            Some(stored.society.clone())
        })
    }

    async fn update_event(
        &self,
        email: &EmailAddress,
        event_id: Uuid,
        update: &EventUpdate,
    ) -> Result<EntryMutation, SocietyStoreError> {
        self.with_societies(|societies| {
            let Some(stored) = societies
                .iter_mut()
                .find(|stored| &stored.society.email == email)
            else {
                return EntryMutation::SocietyMissing;
            };
            let Some(event) = stored
                .society
                .events
                .iter_mut()
                .find(|event| event.id == event_id)
            else {
                return EntryMutation::EntryMissing;
            };
            apply_event_update(event, update);
            EntryMutation::Applied(Box::new(stored.society.clone()))
        })
    }

    async fn remove_event(
        &self,
        email: &EmailAddress,
        event_id: Uuid,
    ) -> Result<Option<Society>, SocietyStoreError> {
        self.with_societies(|societies| {
            let Some(stored) = societies
                .iter_mut()
                .find(|stored| &stored.society.email == email)
            else {
                return None;
            };
            stored.society.events.retain(|event| event.id != event_id);
            Some(stored.society.clone())
        })
    }

    async fn list_events(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Vec<Event>>, SocietyStoreError> {
        self.with_societies(|societies| {
            societies
                .iter()
                .find(|stored| &stored.society.email == email)
                .map(|stored| stored.society.events.clone())
        })
    }
}
