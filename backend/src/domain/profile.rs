//! Society profile use-cases.
//!
//! Owns every read and mutation of the society aggregate after
//! registration. Mutations are scoped to the principal asserted by the
//! verified bearer token; the target society is never taken from the
//! request body.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use super::error::Error;
use super::event::{Event, EventDraft, EventUpdate};
use super::identity::EmailAddress;
use super::ports::{EntryMutation, Principal, SocietyStore, SocietyStoreError};
use super::society::{ProfileUpdate, Society};
use super::team::{TeamMemberDraft, TeamMemberUpdate};
use super::ApiResult;

/// Map store failures onto the API error taxonomy.
///
/// Infrastructure detail stays in the logs; clients get a stable message.
pub(crate) fn map_store_error(err: SocietyStoreError) -> Error {
    match err {
        SocietyStoreError::Duplicate { field } => {
            Error::conflict(format!("{field} is already registered"))
        }
        SocietyStoreError::Connection { .. } | SocietyStoreError::Query { .. } => {
            error!(error = %err, "society store failure");
            Error::upstream("Document store unavailable")
        }
    }
}

fn society_not_found() -> Error {
    Error::not_found("Society not found")
}

/// Use-case service for society reads and principal-scoped mutations.
#[derive(Clone)]
pub struct SocietyProfileService {
    store: Arc<dyn SocietyStore>,
}

impl SocietyProfileService {
    /// Create the service over a store port.
    pub fn new(store: Arc<dyn SocietyStore>) -> Self {
        Self { store }
    }

    /// Fetch a society by login email. The returned aggregate never carries
    /// credential material.
    pub async fn get_by_email(&self, email: &EmailAddress) -> ApiResult<Society> {
        self.store
            .find_by_email(email)
            .await
            .map_err(map_store_error)?
            .ok_or_else(society_not_found)
    }

    /// Apply an allow-listed partial update to the caller's own profile.
    pub async fn update_profile(
        &self,
        principal: &Principal,
        update: &ProfileUpdate,
    ) -> ApiResult<Society> {
        self.store
            .update_profile(&principal.email, update)
            .await
            .map_err(map_store_error)?
            .ok_or_else(society_not_found)
    }

    /// Delete the caller's own society and everything it published.
    pub async fn delete_account(&self, principal: &Principal) -> ApiResult<()> {
        let removed = self
            .store
            .delete_by_email(&principal.email)
            .await
            .map_err(map_store_error)?;
        if removed { Ok(()) } else { Err(society_not_found()) }
    }

    /// Append a roster entry to the caller's society.
    pub async fn add_team_member(
        &self,
        principal: &Principal,
        draft: &TeamMemberDraft,
    ) -> ApiResult<Society> {
        self.store
            .add_team_member(&principal.email, draft)
            .await
            .map_err(map_store_error)?
            .ok_or_else(society_not_found)
    }

    /// Update one roster entry of the caller's society by identifier.
    pub async fn update_team_member(
        &self,
        principal: &Principal,
        member_id: Uuid,
        update: &TeamMemberUpdate,
    ) -> ApiResult<Society> {
        let outcome = self
            .store
            .update_team_member(&principal.email, member_id, update)
            .await
            .map_err(map_store_error)?;
        match outcome {
            EntryMutation::Applied(society) => Ok(*society),
            EntryMutation::SocietyMissing => Err(society_not_found()),
            EntryMutation::EntryMissing => Err(Error::not_found("Team member not found")),
        }
    }

    /// Remove one roster entry by identifier. Unknown identifiers are a
    /// no-op: the unchanged society is returned.
    pub async fn remove_team_member(
        &self,
        principal: &Principal,
        member_id: Uuid,
    ) -> ApiResult<Society> {
        self.store
            .remove_team_member(&principal.email, member_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(society_not_found)
    }

    /// Publish an event under the caller's society.
    pub async fn add_event(&self, principal: &Principal, draft: &EventDraft) -> ApiResult<Society> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.store
            .add_event(&principal.email, draft)
            .await
            .map_err(map_store_error)?
            .ok_or_else(society_not_found)
    }

    /// Update one event of the caller's society by identifier.
    pub async fn update_event(
        &self,
        principal: &Principal,
        event_id: Uuid,
        update: &EventUpdate,
    ) -> ApiResult<Society> {
        update
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let outcome = self
            .store
            .update_event(&principal.email, event_id, update)
            .await
            .map_err(map_store_error)?;
        match outcome {
            EntryMutation::Applied(society) => Ok(*society),
            EntryMutation::SocietyMissing => Err(society_not_found()),
            EntryMutation::EntryMissing => Err(Error::not_found("Event not found")),
        }
    }

    /// Remove one event by identifier. Unknown identifiers are a no-op.
    pub async fn remove_event(&self, principal: &Principal, event_id: Uuid) -> ApiResult<Society> {
        self.store
            .remove_event(&principal.email, event_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(society_not_found)
    }

    /// Fetch the events list for any society by email.
    pub async fn list_events(&self, email: &EmailAddress) -> ApiResult<Vec<Event>> {
        self.store
            .list_events(email)
            .await
            .map_err(map_store_error)?
            .ok_or_else(society_not_found)
    }
}
