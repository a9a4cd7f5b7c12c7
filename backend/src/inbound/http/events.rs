//! Event API handlers.
//!
//! ```text
//! GET    /api/v1/society/events?email=drama@x.edu
//! POST   /api/v1/society/events {"newEvent":{...}}              (bearer token)
//! PATCH  /api/v1/society/events {"eventId":...,"updates":{...}} (bearer token)
//! DELETE /api/v1/society/events {"eventId":...}                 (bearer token)
//! ```
//!
//! All three mutations require a bearer token, the same as the roster
//! routes.

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Event, EventDraft, EventUpdate};

use super::auth::{authenticate, BearerToken};
use super::society::{required_email, SocietyEnvelope, SocietyQuery};
use super::state::HttpState;
use super::ApiResult;

/// Envelope wrapping a society's events list.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventsEnvelope {
    pub events: Vec<Event>,
}

/// Body for publishing an event.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddEventBody {
    pub new_event: EventDraft,
}

/// Body for editing one event by identifier.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventBody {
    pub event_id: Uuid,
    pub updates: EventUpdate,
}

/// Body for removing one event by identifier.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveEventBody {
    pub event_id: Uuid,
}

/// List the events a society has published.
#[utoipa::path(
    get,
    path = "/api/v1/society/events",
    params(SocietyQuery),
    responses(
        (status = 200, description = "Events list", body = EventsEnvelope),
        (status = 400, description = "Email missing", body = Error),
        (status = 404, description = "No society with this email", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/society/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    query: web::Query<SocietyQuery>,
) -> ApiResult<web::Json<EventsEnvelope>> {
    let email = required_email(query.email.as_deref())?;
    let events = state.society.list_events(&email).await?;
    Ok(web::Json(EventsEnvelope { events }))
}

/// Publish an event under the caller's society.
#[utoipa::path(
    post,
    path = "/api/v1/society/events",
    request_body = AddEventBody,
    responses(
        (status = 200, description = "Event published", body = SocietyEnvelope),
        (status = 400, description = "Invalid event payload", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Caller has no society", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "addEvent"
)]
#[post("/society/events")]
pub async fn add_event(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<AddEventBody>,
) -> ApiResult<web::Json<SocietyEnvelope>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    let society = state
        .society
        .add_event(&principal, &payload.new_event)
        .await?;
    Ok(web::Json(SocietyEnvelope { society }))
}

/// Edit one event of the caller's society.
#[utoipa::path(
    patch,
    path = "/api/v1/society/events",
    request_body = UpdateEventBody,
    responses(
        (status = 200, description = "Event updated", body = SocietyEnvelope),
        (status = 400, description = "Invalid event payload", body = Error),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Society or event not found", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "updateEvent"
)]
#[patch("/society/events")]
pub async fn update_event(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<UpdateEventBody>,
) -> ApiResult<web::Json<SocietyEnvelope>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    let society = state
        .society
        .update_event(&principal, payload.event_id, &payload.updates)
        .await?;
    Ok(web::Json(SocietyEnvelope { society }))
}

/// Remove one event by identifier. Unknown identifiers leave the list
/// unchanged.
#[utoipa::path(
    delete,
    path = "/api/v1/society/events",
    request_body = RemoveEventBody,
    responses(
        (status = 200, description = "Events returned", body = SocietyEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Caller has no society", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["events"],
    operation_id = "removeEvent"
)]
#[delete("/society/events")]
pub async fn remove_event(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<RemoveEventBody>,
) -> ApiResult<web::Json<SocietyEnvelope>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    let society = state
        .society
        .remove_event(&principal, payload.event_id)
        .await?;
    Ok(web::Json(SocietyEnvelope { society }))
}
