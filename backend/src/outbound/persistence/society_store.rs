//! PostgreSQL-backed `SocietyStore` implementation using Diesel.
//!
//! Roster and event rows live in child tables keyed by store-generated
//! UUIDs, so every entry edit is one targeted UPDATE/DELETE matched on the
//! identifier. Concurrent edits of different entries therefore cannot
//! clobber each other.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::select;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{EntryMutation, SocietyStore, SocietyStoreError};
use crate::domain::{
    EmailAddress, Event, EventDraft, EventUpdate, NewSociety, ProfileUpdate, Society,
    TeamMemberDraft, TeamMemberUpdate,
};

use super::error_mapping::{map_society_diesel_error, map_society_pool_error};
use super::models::{
    event_changeset, event_from_row, profile_changeset, society_from_rows, EventRow,
    NewEventRow, NewSocietyRow, NewTeamMemberRow, SocietyRow, TeamMemberChangeset, TeamMemberRow,
};
use super::pool::StorePool;
use super::schema::{events, societies, team_members};

/// Diesel-backed implementation of the society store port.
#[derive(Clone)]
pub struct DieselSocietyStore {
    pool: StorePool,
}

impl DieselSocietyStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: StorePool) -> Self {
        Self { pool }
    }
}

async fn load_society_id(
    conn: &mut AsyncPgConnection,
    email: &EmailAddress,
) -> Result<Option<Uuid>, SocietyStoreError> {
    societies::table
        .filter(societies::email.eq(email.as_str()))
        .select(societies::id)
        .first::<Uuid>(conn)
        .await
        .optional()
        .map_err(map_society_diesel_error)
}

async fn load_children(
    conn: &mut AsyncPgConnection,
    row: SocietyRow,
) -> Result<Society, SocietyStoreError> {
    let team_rows: Vec<TeamMemberRow> = team_members::table
        .filter(team_members::society_id.eq(row.id))
        .order((team_members::created_at.asc(), team_members::id.asc()))
        .select(TeamMemberRow::as_select())
        .load(conn)
        .await
        .map_err(map_society_diesel_error)?;
    let event_rows: Vec<EventRow> = events::table
        .filter(events::society_id.eq(row.id))
        .order((events::created_at.asc(), events::id.asc()))
        .select(EventRow::as_select())
        .load(conn)
        .await
        .map_err(map_society_diesel_error)?;
    society_from_rows(row, team_rows, event_rows)
}

async fn load_aggregate(
    conn: &mut AsyncPgConnection,
    email: &EmailAddress,
) -> Result<Option<Society>, SocietyStoreError> {
    let row = societies::table
        .filter(societies::email.eq(email.as_str()))
        .select(SocietyRow::as_select())
        .first::<SocietyRow>(conn)
        .await
        .optional()
        .map_err(map_society_diesel_error)?;
    match row {
        Some(row) => load_children(conn, row).await.map(Some),
        None => Ok(None),
    }
}

/// Reload after a successful child mutation. The parent existed a moment
/// ago, so a vanishing row means it was deleted concurrently.
async fn reload_aggregate(
    conn: &mut AsyncPgConnection,
    email: &EmailAddress,
) -> Result<Society, SocietyStoreError> {
    load_aggregate(conn, email)
        .await?
        .ok_or_else(|| SocietyStoreError::query("society removed during mutation"))
}

#[async_trait]
impl SocietyStore for DieselSocietyStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Society>, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        load_aggregate(&mut conn, email).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        select(exists(
            societies::table.filter(societies::username.eq(username)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_society_diesel_error)
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        select(exists(
            societies::table.filter(societies::email.eq(email.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_society_diesel_error)
    }

    async fn insert(&self, society: &NewSociety) -> Result<(), SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let row = NewSocietyRow {
            name: &society.name,
            username: society.username.as_str(),
            email: society.email.as_str(),
            password_hash: society.password_hash.as_str(),
        };
        diesel::insert_into(societies::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_society_diesel_error)
    }

    async fn update_profile(
        &self,
        email: &EmailAddress,
        update: &ProfileUpdate,
    ) -> Result<Option<Society>, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let changeset = profile_changeset(update)?;
        let row = diesel::update(societies::table.filter(societies::email.eq(email.as_str())))
            .set(&changeset)
            .returning(SocietyRow::as_returning())
            .get_result::<SocietyRow>(&mut conn)
            .await
            .optional()
            .map_err(map_society_diesel_error)?;
        match row {
            Some(row) => load_children(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let removed =
            diesel::delete(societies::table.filter(societies::email.eq(email.as_str())))
                .execute(&mut conn)
                .await
                .map_err(map_society_diesel_error)?;
        Ok(removed > 0)
    }

    async fn add_team_member(
        &self,
        email: &EmailAddress,
        draft: &TeamMemberDraft,
    ) -> Result<Option<Society>, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let Some(parent_id) = load_society_id(&mut conn, email).await? else {
            return Ok(None);
        };
        let row = NewTeamMemberRow {
            society_id: parent_id,
            name: &draft.name,
            designation: &draft.designation,
            mobile: &draft.mobile,
            email: &draft.email,
        };
        diesel::insert_into(team_members::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_society_diesel_error)?;
        reload_aggregate(&mut conn, email).await.map(Some)
    }

    async fn update_team_member(
        &self,
        email: &EmailAddress,
        member_id: Uuid,
        update: &TeamMemberUpdate,
    ) -> Result<EntryMutation, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let Some(parent_id) = load_society_id(&mut conn, email).await? else {
            return Ok(EntryMutation::SocietyMissing);
        };
        let scope = team_members::table.filter(
            team_members::id
                .eq(member_id)
                .and(team_members::society_id.eq(parent_id)),
        );
        let matched = if update.is_empty() {
            // Nothing to set; just confirm the entry exists.
            select(exists(scope))
                .get_result::<bool>(&mut conn)
                .await
                .map_err(map_society_diesel_error)?
        } else {
            let changeset = TeamMemberChangeset {
                name: update.name.clone(),
                designation: update.designation.clone(),
                mobile: update.mobile.clone(),
                email: update.email.clone(),
            };
            let rows = diesel::update(scope)
                .set(&changeset)
                .execute(&mut conn)
                .await
                .map_err(map_society_diesel_error)?;
            rows > 0
        };
        if !matched {
            return Ok(EntryMutation::EntryMissing);
        }
        let society = reload_aggregate(&mut conn, email).await?;
        Ok(EntryMutation::Applied(Box::new(society)))
    }

    async fn remove_team_member(
        &self,
        email: &EmailAddress,
        member_id: Uuid,
    ) -> Result<Option<Society>, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let Some(parent_id) = load_society_id(&mut conn, email).await? else {
            return Ok(None);
        };
        diesel::delete(
            team_members::table.filter(
                team_members::id
                    .eq(member_id)
                    .and(team_members::society_id.eq(parent_id)),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_society_diesel_error)?;
        reload_aggregate(&mut conn, email).await.map(Some)
    }

    async fn add_event(
        &self,
        email: &EmailAddress,
        draft: &EventDraft,
    ) -> Result<Option<Society>, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let Some(parent_id) = load_society_id(&mut conn, email).await? else {
            return Ok(None);
        };
        let contact = serde_json::to_value(&draft.contact)
            .map_err(|err| SocietyStoreError::query(format!("serialise event contacts: {err}")))?;
        let row = NewEventRow {
            society_id: parent_id,
            title: &draft.title,
            event_type: &draft.event_type,
            start_date: draft.start_date.as_deref(),
            end_date: draft.end_date.as_deref(),
            venue: &draft.venue,
            time: &draft.time,
            about: &draft.about,
            contact,
            social_group: &draft.social_group,
        };
        diesel::insert_into(events::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_society_diesel_error)?;
        reload_aggregate(&mut conn, email).await.map(Some)
    }

    async fn update_event(
        &self,
        email: &EmailAddress,
        event_id: Uuid,
        update: &EventUpdate,
    ) -> Result<EntryMutation, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let Some(parent_id) = load_society_id(&mut conn, email).await? else {
            return Ok(EntryMutation::SocietyMissing);
        };
        let scope = events::table.filter(
            events::id
                .eq(event_id)
                .and(events::society_id.eq(parent_id)),
        );
        let matched = if update.is_empty() {
            select(exists(scope))
                .get_result::<bool>(&mut conn)
                .await
                .map_err(map_society_diesel_error)?
        } else {
            let changeset = event_changeset(update)?;
            let rows = diesel::update(scope)
                .set(&changeset)
                .execute(&mut conn)
                .await
                .map_err(map_society_diesel_error)?;
            rows > 0
        };
        if !matched {
            return Ok(EntryMutation::EntryMissing);
        }
        let society = reload_aggregate(&mut conn, email).await?;
        Ok(EntryMutation::Applied(Box::new(society)))
    }

    async fn remove_event(
        &self,
        email: &EmailAddress,
        event_id: Uuid,
    ) -> Result<Option<Society>, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let Some(parent_id) = load_society_id(&mut conn, email).await? else {
            return Ok(None);
        };
        diesel::delete(
            events::table.filter(
                events::id
                    .eq(event_id)
                    .and(events::society_id.eq(parent_id)),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_society_diesel_error)?;
        reload_aggregate(&mut conn, email).await.map(Some)
    }

    async fn list_events(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Vec<Event>>, SocietyStoreError> {
        let mut conn = self.pool.get().await.map_err(map_society_pool_error)?;
        let Some(parent_id) = load_society_id(&mut conn, email).await? else {
            return Ok(None);
        };
        let rows: Vec<EventRow> = events::table
            .filter(events::society_id.eq(parent_id))
            .order((events::created_at.asc(), events::id.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_society_diesel_error)?;
        rows.into_iter()
            .map(event_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
