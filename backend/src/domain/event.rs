//! Events published by a society (auditions, competitions, workshops).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for event payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventValidationError {
    #[error("event title must not be empty")]
    EmptyTitle,
    #[error("startDate must not be after endDate")]
    DateOrder,
}

/// Contact person attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
}

/// A dated activity published by a society.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-generated identifier, the only addressing key for edits.
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub venue: String,
    pub time: String,
    pub about: String,
    pub contact: Vec<EventContact>,
    pub social_group: String,
}

/// Payload for publishing an event; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub contact: Vec<EventContact>,
    #[serde(default)]
    pub social_group: String,
}

impl EventDraft {
    /// Check the invariants that can be judged from the payload alone.
    ///
    /// Dates are free-form strings on the wire; ordering is only enforced
    /// when both are present and both parse as ISO dates.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        check_date_order(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// Partial update for one event. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Vec<EventContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_group: Option<String>,
}

impl EventUpdate {
    /// True when no field is present, i.e. applying it is a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.event_type.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.venue.is_none()
            && self.time.is_none()
            && self.about.is_none()
            && self.contact.is_none()
            && self.social_group.is_none()
    }

    /// Date-order check for updates that carry both bounds.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        check_date_order(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

fn check_date_order(start: Option<&str>, end: Option<&str>) -> Result<(), EventValidationError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(());
    };
    let parsed_start = NaiveDate::parse_from_str(start, "%Y-%m-%d");
    let parsed_end = NaiveDate::parse_from_str(end, "%Y-%m-%d");
    if let (Ok(start), Ok(end)) = (parsed_start, parsed_end) {
        if start > end {
            return Err(EventValidationError::DateOrder);
        }
    }
    Ok(())
}
