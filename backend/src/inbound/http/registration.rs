//! Registration API handlers.
//!
//! ```text
//! GET  /api/v1/registration/availability?username=|email=
//! POST /api/v1/registration {"name":...,"username":...,"email":...,"password":...}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, RegistrationRequest};

use super::state::HttpState;
use super::ApiResult;

/// Query string for the availability probe; exactly one of the two fields
/// is expected.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AvailabilityQuery {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Availability probe result; carries whichever flag was asked for.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_exists: Option<bool>,
}

/// Check whether a username or email is already registered.
///
/// The email check wins when both parameters are supplied, matching the
/// sign-up form's behaviour of probing one field at a time.
#[utoipa::path(
    get,
    path = "/api/v1/registration/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Existence flag", body = AvailabilityResponse),
        (status = 400, description = "Neither parameter supplied", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["registration"],
    operation_id = "checkAvailability"
)]
#[get("/registration/availability")]
pub async fn check_availability(
    state: web::Data<HttpState>,
    query: web::Query<AvailabilityQuery>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    if let Some(email) = query.email.as_deref() {
        let exists = state.registration.email_exists(email).await?;
        return Ok(web::Json(AvailabilityResponse {
            username_exists: None,
            email_exists: Some(exists),
        }));
    }
    if let Some(username) = query.username.as_deref() {
        let exists = state.registration.username_exists(username).await?;
        return Ok(web::Json(AvailabilityResponse {
            username_exists: Some(exists),
            email_exists: None,
        }));
    }
    Err(Error::invalid_request(
        "Please provide 'username' or 'email' to check.",
    ))
}

/// Registration form body. No `Debug` impl: the password must not reach
/// the logs.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterBody {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration acknowledgement.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub ok: bool,
}

/// Register a new society.
#[utoipa::path(
    post,
    path = "/api/v1/registration",
    request_body = RegisterBody,
    responses(
        (status = 200, description = "Society created", body = RegisterResponse),
        (status = 400, description = "Missing or malformed fields", body = Error),
        (status = 409, description = "Username or email already registered", body = Error),
        (status = 500, description = "Store unavailable", body = Error)
    ),
    tags = ["registration"],
    operation_id = "registerSociety"
)]
#[post("/registration")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<web::Json<RegisterResponse>> {
    let RegisterBody {
        name,
        username,
        email,
        password,
    } = payload.into_inner();
    state
        .registration
        .register(RegistrationRequest {
            name,
            username,
            email,
            password,
        })
        .await?;
    Ok(web::Json(RegisterResponse { ok: true }))
}
