//! Bearer-token handling for mutating endpoints.
//!
//! The extractor enforces header syntax before any verification happens: a
//! missing or malformed `Authorization: Bearer <token>` header is rejected
//! with 401 without consulting the credential verifier.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::error;

use crate::domain::ports::{Principal, TokenVerificationError, TokenVerifier};
use crate::domain::Error;

use super::ApiResult;

/// Raw bearer token lifted out of the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(String);

impl BearerToken {
    /// Borrow the opaque token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn token_from_request(req: &HttpRequest) -> ApiResult<BearerToken> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized("Missing token"))?;
    let token = header
        .strip_prefix("Bearer ")
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| Error::unauthorized("Missing token"))?;
    Ok(BearerToken(token.to_owned()))
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<ApiResult<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(token_from_request(req))
    }
}

/// Resolve the token to a verified principal.
pub async fn authenticate(
    verifier: &dyn TokenVerifier,
    token: &BearerToken,
) -> ApiResult<Principal> {
    verifier.verify(token.as_str()).await.map_err(|err| match err {
        TokenVerificationError::Invalid => Error::unauthorized("Unauthorized"),
        TokenVerificationError::Unavailable { .. } => {
            error!(error = %err, "credential verifier unreachable");
            Error::upstream("Credential verifier unavailable")
        }
    })
}
