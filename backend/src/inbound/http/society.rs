//! Society account API handlers.
//!
//! ```text
//! GET    /api/v1/society?email=drama@x.edu
//! PATCH  /api/v1/society {"updates":{...}}       (bearer token)
//! DELETE /api/v1/society                          (bearer token)
//! ```
//!
//! Mutations target the society owned by the verified token's email; the
//! body never names the target account.

use actix_web::{delete, get, patch, web};
use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, Error, ProfileUpdate, Society};

use super::auth::{authenticate, BearerToken};
use super::state::HttpState;
use super::ApiResult;

/// Query string for society lookup.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SocietyQuery {
    pub email: Option<String>,
}

/// Envelope wrapping a society aggregate.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SocietyEnvelope {
    pub society: Society,
}

/// Envelope for profile mutations.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdatedSocietyEnvelope {
    pub success: bool,
    pub society: Society,
}

/// Acknowledgement for account deletion.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
}

pub(super) fn required_email(email: Option<&str>) -> ApiResult<EmailAddress> {
    email
        .and_then(|value| EmailAddress::new(value).ok())
        .ok_or_else(|| Error::invalid_request("Email is required"))
}

/// Fetch a society's public profile by login email.
#[utoipa::path(
    get,
    path = "/api/v1/society",
    params(SocietyQuery),
    responses(
        (status = 200, description = "Society profile", body = SocietyEnvelope),
        (status = 400, description = "Email missing", body = Error),
        (status = 404, description = "No society with this email", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["society"],
    operation_id = "getSociety"
)]
#[get("/society")]
pub async fn get_society(
    state: web::Data<HttpState>,
    query: web::Query<SocietyQuery>,
) -> ApiResult<web::Json<SocietyEnvelope>> {
    let email = required_email(query.email.as_deref())?;
    let society = state.society.get_by_email(&email).await?;
    Ok(web::Json(SocietyEnvelope { society }))
}

/// Body for profile updates: the allow-listed partial under `updates`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateProfileBody {
    pub updates: ProfileUpdate,
}

/// Update the caller's own profile fields.
#[utoipa::path(
    patch,
    path = "/api/v1/society",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Profile updated", body = UpdatedSocietyEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Caller has no society", body = Error),
        (status = 409, description = "New username already taken", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["society"],
    operation_id = "updateSocietyProfile"
)]
#[patch("/society")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<UpdatedSocietyEnvelope>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    let society = state
        .society
        .update_profile(&principal, &payload.updates)
        .await?;
    Ok(web::Json(UpdatedSocietyEnvelope {
        success: true,
        society,
    }))
}

/// Delete the caller's own society account.
#[utoipa::path(
    delete,
    path = "/api/v1/society",
    responses(
        (status = 200, description = "Account removed", body = DeletedResponse),
        (status = 401, description = "Missing or invalid bearer token", body = Error),
        (status = 404, description = "Caller has no society", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["society"],
    operation_id = "deleteSocietyAccount"
)]
#[delete("/society")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<DeletedResponse>> {
    let principal = authenticate(state.verifier.as_ref(), &token).await?;
    state.society.delete_account(&principal).await?;
    Ok(web::Json(DeletedResponse { success: true }))
}
