//! Team roster API handlers.
//!
//! ```text
//! POST   /api/v1/society/team {"newMember":{...}}              (bearer token)
//! PATCH  /api/v1/society/team {"memberId":...,"updates":{...}} (bearer token)
//! DELETE /api/v1/society/team {"memberId":...}                 (bearer token)
//! ```

use actix_web::{delete, patch, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, TeamMemberDraft, TeamMemberUpdate};

use super::auth::{authenticate, BearerToken};
use super::society::SocietyEnvelope;
use super::state::HttpState;
use super::ApiResult;

/// Body for adding a roster entry.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberBody {
    pub new_member: TeamMemberDraft,
}

/// Body for editing one roster entry by identifier.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberBody {
    pub member_id: Uuid,
    pub updates: TeamMemberUpdate,
}

/// Body for removing one roster entry by identifier.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberBody {
    pub member_id: Uuid,
}

/// Add a member to the caller's roster.
#[utoipa::path(
    post,
    path = "/api/v1/society/team",
    request_body = AddMemberBody,
    responses(
        (status = 200, description = "Roster updated", body = SocietyEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Caller has no society", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["team"],
    operation_id = "addTeamMember"
)]
#[post("/society/team")]
pub async fn add_member(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<AddMemberBody>,
) -> ApiResult<web::Json<SocietyEnvelope>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    let society = state
        .society
        .add_team_member(&principal, &payload.new_member)
        .await?;
    Ok(web::Json(SocietyEnvelope { society }))
}

/// Edit one member of the caller's roster.
#[utoipa::path(
    patch,
    path = "/api/v1/society/team",
    request_body = UpdateMemberBody,
    responses(
        (status = 200, description = "Member updated", body = SocietyEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Society or member not found", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["team"],
    operation_id = "updateTeamMember"
)]
#[patch("/society/team")]
pub async fn update_member(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<UpdateMemberBody>,
) -> ApiResult<web::Json<SocietyEnvelope>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    let society = state
        .society
        .update_team_member(&principal, payload.member_id, &payload.updates)
        .await?;
    Ok(web::Json(SocietyEnvelope { society }))
}

/// Remove one member from the caller's roster. Unknown identifiers leave
/// the roster unchanged.
#[utoipa::path(
    delete,
    path = "/api/v1/society/team",
    request_body = RemoveMemberBody,
    responses(
        (status = 200, description = "Roster returned", body = SocietyEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Caller has no society", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["team"],
    operation_id = "removeTeamMember"
)]
#[delete("/society/team")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<RemoveMemberBody>,
) -> ApiResult<web::Json<SocietyEnvelope>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    let society = state
        .society
        .remove_team_member(&principal, payload.member_id)
        .await?;
    Ok(web::Json(SocietyEnvelope { society }))
}
