//! One-time-code verification handler.
//!
//! ```text
//! POST /api/v1/otp/verify {"email":...,"otp":...}
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::Error;

use super::state::HttpState;
use super::ApiResult;

/// Submitted code and the email it was issued for.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct VerifyOtpBody {
    pub email: String,
    pub otp: String,
}

/// Verification outcome.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerifyOtpResponse {
    pub verified: bool,
}

/// Check a one-time code. A match consumes the stored code; a mismatch is
/// reported as 400 with `verified: false` and leaves the code in place.
#[utoipa::path(
    post,
    path = "/api/v1/otp/verify",
    request_body = VerifyOtpBody,
    responses(
        (status = 200, description = "Code matched and was consumed", body = VerifyOtpResponse),
        (status = 400, description = "Code mismatch or unknown email", body = VerifyOtpResponse),
        (status = 500, description = "OTP store unavailable", body = Error)
    ),
    tags = ["otp"],
    operation_id = "verifyOtp"
)]
#[post("/otp/verify")]
pub async fn verify_otp(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyOtpBody>,
) -> ApiResult<HttpResponse> {
    let verified = state.otp.verify(&payload.email, &payload.otp).await?;
    let body = VerifyOtpResponse { verified };
    if verified {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::BadRequest().json(body))
    }
}
