//! Diesel row types and changesets for the society, event, and user tables,
//! plus conversions into validated domain aggregates.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ports::SocietyStoreError;
use crate::domain::{
    EligibilityCriterion, EmailAddress, Event, EventContact, EventUpdate, ProfileUpdate,
    SocialLink, Society, TeamMember, User, Username,
};

use super::schema::{events, societies, team_members, users};

// ---------------------------------------------------------------------------
// Society rows
// ---------------------------------------------------------------------------

/// Queryable row for the societies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = societies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SocietyRow {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    #[expect(dead_code, reason = "credential never leaves the adapter")]
    pub password_hash: String,
    pub about: String,
    pub website: String,
    pub logo: String,
    pub society_type: String,
    pub faculty_coordinator: String,
    pub audition_open: bool,
    pub centralized: bool,
    pub social: Value,
    pub eligibility: Value,
    #[expect(dead_code, reason = "audit column, not part of the aggregate")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "audit column, not part of the aggregate")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for a freshly registered society; profile columns take
/// their database defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = societies)]
pub(crate) struct NewSocietyRow<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Changeset for allow-listed profile updates. `None` fields are skipped;
/// `updated_at` is always touched so even an empty update is a valid
/// statement.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = societies)]
pub(crate) struct SocietyChangeset {
    pub name: Option<String>,
    pub username: Option<String>,
    pub about: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub society_type: Option<String>,
    pub faculty_coordinator: Option<String>,
    pub audition_open: Option<bool>,
    pub centralized: Option<bool>,
    pub social: Option<Value>,
    pub eligibility: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) fn profile_changeset(
    update: &ProfileUpdate,
) -> Result<SocietyChangeset, SocietyStoreError> {
    let social = update
        .social
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|err| SocietyStoreError::query(format!("serialise social links: {err}")))?;
    let eligibility = update
        .eligibility
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|err| SocietyStoreError::query(format!("serialise eligibility: {err}")))?;
    Ok(SocietyChangeset {
        name: update.name.clone(),
        username: update.username.as_ref().map(|u| u.as_str().to_owned()),
        about: update.about.clone(),
        website: update.website.clone(),
        logo: update.logo.clone(),
        society_type: update.society_type.clone(),
        faculty_coordinator: update.faculty_coordinator.clone(),
        audition_open: update.audition_open,
        centralized: update.centralized,
        social,
        eligibility,
        updated_at: Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// Team member rows
// ---------------------------------------------------------------------------

/// Queryable row for roster entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TeamMemberRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "parent key only used in filters")]
    pub society_id: Uuid,
    pub name: String,
    pub designation: String,
    pub mobile: String,
    pub email: String,
    #[expect(dead_code, reason = "ordering column, not part of the aggregate")]
    pub created_at: DateTime<Utc>,
}

/// Insertable roster entry; the id and timestamp come from the store.
#[derive(Debug, Insertable)]
#[diesel(table_name = team_members)]
pub(crate) struct NewTeamMemberRow<'a> {
    pub society_id: Uuid,
    pub name: &'a str,
    pub designation: &'a str,
    pub mobile: &'a str,
    pub email: &'a str,
}

/// Changeset for one roster entry. All-`None` changesets must be guarded by
/// the caller; Diesel rejects empty updates.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = team_members)]
pub(crate) struct TeamMemberChangeset {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Event rows
// ---------------------------------------------------------------------------

/// Queryable row for events.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "parent key only used in filters")]
    pub society_id: Uuid,
    pub title: String,
    pub event_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub venue: String,
    pub time: String,
    pub about: String,
    pub contact: Value,
    pub social_group: String,
    #[expect(dead_code, reason = "ordering column, not part of the aggregate")]
    pub created_at: DateTime<Utc>,
}

/// Insertable event; the id and timestamp come from the store.
#[derive(Debug, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub society_id: Uuid,
    pub title: &'a str,
    pub event_type: &'a str,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub venue: &'a str,
    pub time: &'a str,
    pub about: &'a str,
    pub contact: Value,
    pub social_group: &'a str,
}

/// Changeset for one event. All-`None` changesets must be guarded by the
/// caller.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = events)]
pub(crate) struct EventChangeset {
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub venue: Option<String>,
    pub time: Option<String>,
    pub about: Option<String>,
    pub contact: Option<Value>,
    pub social_group: Option<String>,
}

pub(crate) fn event_changeset(update: &EventUpdate) -> Result<EventChangeset, SocietyStoreError> {
    let contact = update
        .contact
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|err| SocietyStoreError::query(format!("serialise event contacts: {err}")))?;
    Ok(EventChangeset {
        title: update.title.clone(),
        event_type: update.event_type.clone(),
        start_date: update.start_date.clone(),
        end_date: update.end_date.clone(),
        venue: update.venue.clone(),
        time: update.time.clone(),
        about: update.about.clone(),
        contact,
        social_group: update.social_group.clone(),
    })
}

// ---------------------------------------------------------------------------
// User rows
// ---------------------------------------------------------------------------

/// Queryable row for student accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub branch: String,
    pub section: String,
    pub batch_start: Option<i32>,
    pub batch_end: Option<i32>,
    pub wishlist: Value,
    pub reminders: Value,
    #[expect(dead_code, reason = "audit column, not part of the aggregate")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "audit column, not part of the aggregate")]
    pub updated_at: DateTime<Utc>,
}

/// Upsertable user record.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub branch: String,
    pub section: String,
    pub batch_start: Option<i32>,
    pub batch_end: Option<i32>,
    pub wishlist: Value,
    pub reminders: Value,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Domain conversions
// ---------------------------------------------------------------------------

fn decode_list<T: serde::de::DeserializeOwned>(
    value: Value,
    field: &str,
) -> Result<Vec<T>, SocietyStoreError> {
    serde_json::from_value(value)
        .map_err(|err| SocietyStoreError::query(format!("decode {field}: {err}")))
}

pub(crate) fn member_from_row(row: TeamMemberRow) -> TeamMember {
    TeamMember {
        id: row.id,
        name: row.name,
        designation: row.designation,
        mobile: row.mobile,
        email: row.email,
    }
}

pub(crate) fn event_from_row(row: EventRow) -> Result<Event, SocietyStoreError> {
    let contact: Vec<EventContact> = decode_list(row.contact, "event contacts")?;
    Ok(Event {
        id: row.id,
        title: row.title,
        event_type: row.event_type,
        start_date: row.start_date,
        end_date: row.end_date,
        venue: row.venue,
        time: row.time,
        about: row.about,
        contact,
        social_group: row.social_group,
    })
}

/// Convert a society row plus its child rows into the domain aggregate.
pub(crate) fn society_from_rows(
    row: SocietyRow,
    team_rows: Vec<TeamMemberRow>,
    event_rows: Vec<EventRow>,
) -> Result<Society, SocietyStoreError> {
    let email = EmailAddress::new(&row.email)
        .map_err(|err| SocietyStoreError::query(format!("stored email invalid: {err}")))?;
    let username = Username::new(&row.username)
        .map_err(|err| SocietyStoreError::query(format!("stored username invalid: {err}")))?;
    let social: Vec<SocialLink> = decode_list(row.social, "social links")?;
    let eligibility: Vec<EligibilityCriterion> = decode_list(row.eligibility, "eligibility")?;
    let events = event_rows
        .into_iter()
        .map(event_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Society {
        id: row.id,
        name: row.name,
        username,
        email,
        about: row.about,
        website: row.website,
        logo: row.logo,
        society_type: row.society_type,
        faculty_coordinator: row.faculty_coordinator,
        audition_open: row.audition_open,
        centralized: row.centralized,
        team: team_rows.into_iter().map(member_from_row).collect(),
        events,
        social,
        eligibility,
    })
}

/// Convert a user row into the domain aggregate.
pub(crate) fn user_from_row(row: UserRow) -> Result<User, crate::domain::ports::UserStoreError> {
    use crate::domain::ports::UserStoreError;
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserStoreError::query(format!("stored email invalid: {err}")))?;
    let username = Username::new(&row.username)
        .map_err(|err| UserStoreError::query(format!("stored username invalid: {err}")))?;
    let wishlist = serde_json::from_value(row.wishlist)
        .map_err(|err| UserStoreError::query(format!("decode wishlist: {err}")))?;
    let reminders = serde_json::from_value(row.reminders)
        .map_err(|err| UserStoreError::query(format!("decode reminders: {err}")))?;
    Ok(User {
        id: row.id,
        name: row.name,
        username,
        email,
        branch: row.branch,
        section: row.section,
        batch_start: row.batch_start,
        batch_end: row.batch_end,
        wishlist,
        reminders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn society_row() -> SocietyRow {
        SocietyRow {
            id: Uuid::new_v4(),
            name: "Drama Club".into(),
            username: "drama".into(),
            email: "drama@x.edu".into(),
            password_hash: "$argon2id$stub".into(),
            about: String::new(),
            website: String::new(),
            logo: String::new(),
            society_type: String::new(),
            faculty_coordinator: String::new(),
            audition_open: false,
            centralized: false,
            social: json!([{ "name": "instagram", "handle": "@drama" }]),
            eligibility: json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn society_conversion_decodes_embedded_lists() {
        let society =
            society_from_rows(society_row(), Vec::new(), Vec::new()).expect("convert row");
        assert_eq!(society.social.len(), 1);
        assert_eq!(society.social[0].handle, "@drama");
    }

    #[rstest]
    fn society_conversion_rejects_malformed_lists() {
        let mut row = society_row();
        row.social = json!({ "not": "a list" });
        let err = society_from_rows(row, Vec::new(), Vec::new()).expect_err("malformed json");
        assert!(matches!(err, SocietyStoreError::Query { .. }));
    }

    #[rstest]
    fn empty_profile_update_still_produces_a_changeset() {
        let changeset = profile_changeset(&ProfileUpdate::default()).expect("changeset");
        assert!(changeset.name.is_none());
        // updated_at is always present, keeping the UPDATE statement valid.
    }

    #[rstest]
    fn event_conversion_decodes_contacts() {
        let row = EventRow {
            id: Uuid::new_v4(),
            society_id: Uuid::new_v4(),
            title: "Auditions".into(),
            event_type: "audition".into(),
            start_date: Some("2025-01-01".into()),
            end_date: None,
            venue: "Hall A".into(),
            time: "10:00".into(),
            about: String::new(),
            contact: json!([{ "name": "Asha", "mobile": "111" }]),
            social_group: String::new(),
            created_at: Utc::now(),
        };
        let event = event_from_row(row).expect("convert row");
        assert_eq!(event.contact.len(), 1);
        assert_eq!(event.contact[0].name, "Asha");
        assert_eq!(event.contact[0].designation, "");
    }
}
