//! Support contact form handler.
//!
//! ```text
//! POST /api/v1/contact {"name":...,"email":...,"subject":...,"body":...}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ContactRequest, Error};

use super::state::HttpState;
use super::ApiResult;

/// Support form body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ContactBody {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

/// Dispatch acknowledgement.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub message: String,
}

/// Submit the support form. Sends an acknowledgement to the sender and a
/// copy to the admin inbox.
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = ContactBody,
    responses(
        (status = 200, description = "Both messages dispatched", body = ContactResponse),
        (status = 400, description = "Missing fields", body = Error),
        (status = 500, description = "Mail service unavailable", body = Error)
    ),
    tags = ["contact"],
    operation_id = "submitContactForm"
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactBody>,
) -> ApiResult<web::Json<ContactResponse>> {
    let ContactBody {
        name,
        email,
        subject,
        body,
    } = payload.into_inner();
    state
        .support
        .submit(&ContactRequest {
            name,
            email,
            subject,
            body,
        })
        .await?;
    Ok(web::Json(ContactResponse {
        message: "Support message sent to user and admin".to_owned(),
    }))
}
