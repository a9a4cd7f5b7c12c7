//! Society registration use-cases.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use serde_json::json;
use tracing::error;
use zeroize::Zeroize;

use super::error::Error;
use super::identity::{EmailAddress, IdentityValidationError, Username};
use super::ports::SocietyStore;
use super::profile::map_store_error;
use super::society::{NewSociety, PasswordHash};
use super::ApiResult;

/// Fields submitted by the registration form. The password is plaintext on
/// arrival and is zeroised as soon as it has been hashed; the struct
/// deliberately has no `Debug` impl so it cannot end up in logs.
pub struct RegistrationRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Use-case service creating new societies.
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn SocietyStore>,
}

impl RegistrationService {
    /// Create the service over a store port.
    pub fn new(store: Arc<dyn SocietyStore>) -> Self {
        Self { store }
    }

    /// True when a society already uses this username.
    pub async fn username_exists(&self, username: &str) -> ApiResult<bool> {
        self.store
            .username_exists(username.trim())
            .await
            .map_err(map_store_error)
    }

    /// True when a society already uses this email.
    pub async fn email_exists(&self, email: &str) -> ApiResult<bool> {
        let Ok(email) = EmailAddress::new(email) else {
            // A blank address can never be registered.
            return Ok(false);
        };
        self.store
            .email_exists(&email)
            .await
            .map_err(map_store_error)
    }

    /// Validate, hash the credential, and insert a new society with empty
    /// profile and sub-lists.
    ///
    /// Uniqueness of username and email is enforced by the store, so two
    /// racing registrations cannot both succeed; the loser surfaces as a
    /// conflict.
    pub async fn register(&self, mut request: RegistrationRequest) -> ApiResult<()> {
        let missing = [
            ("name", request.name.trim().is_empty()),
            ("username", request.username.trim().is_empty()),
            ("email", request.email.trim().is_empty()),
            ("password", request.password.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, empty)| empty.then_some(field))
        .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(
                Error::invalid_request("Invalid Entry").with_details(json!({ "missing": missing }))
            );
        }

        let email = EmailAddress::validated(&request.email).map_err(|err| match err {
            IdentityValidationError::MalformedEmail => {
                Error::invalid_request("Invalid Email Format!")
            }
            other => Error::invalid_request(other.to_string()),
        })?;
        let username = Username::new(&request.username)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let password_hash = hash_password(&request.password)?;
        request.password.zeroize();

        let society = NewSociety {
            name: request.name.trim().to_owned(),
            username,
            email,
            password_hash,
        };
        self.store.insert(&society).await.map_err(map_store_error)
    }
}

fn hash_password(password: &str) -> ApiResult<PasswordHash> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| {
            error!(error = %err, "password hashing failed");
            Error::internal("Registration failed")
        })?;
    Ok(PasswordHash::new(hash.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureSocietyStore;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn service() -> RegistrationService {
        RegistrationService::new(Arc::new(FixtureSocietyStore::new()))
    }

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Drama Club".into(),
            username: "drama".into(),
            email: "drama@x.edu".into(),
            password: "Aa1!aaaa".into(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn registration_flips_availability() {
        let service = service();
        assert!(!service.username_exists("drama").await.expect("check"));

        service.register(request()).await.expect("register");

        assert!(service.username_exists("drama").await.expect("check"));
        assert!(service.email_exists("Drama@X.edu").await.expect("check"));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_fields_are_reported_together() {
        let service = service();
        let err = service
            .register(RegistrationRequest {
                name: String::new(),
                username: "drama".into(),
                email: "drama@x.edu".into(),
                password: String::new(),
            })
            .await
            .expect_err("missing fields rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Invalid Entry");
        let details = err.details().expect("details present");
        assert_eq!(details["missing"], serde_json::json!(["name", "password"]));
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("missing@tld")]
    #[tokio::test]
    async fn malformed_email_is_rejected(#[case] email: &str) {
        let service = service();
        let mut req = request();
        req.email = email.into();
        let err = service.register(req).await.expect_err("malformed email");
        assert_eq!(err.message(), "Invalid Email Format!");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_surfaces_as_conflict() {
        let service = service();
        service.register(request()).await.expect("first register");

        let mut second = request();
        second.email = "other@x.edu".into();
        let err = service.register(second).await.expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn stored_credential_is_an_argon2_hash() {
        let store = Arc::new(FixtureSocietyStore::new());
        let service = RegistrationService::new(store.clone());
        service.register(request()).await.expect("register");
        // The fixture keeps the hash internally; the public aggregate must
        // not expose it.
        let email = EmailAddress::new("drama@x.edu").expect("email");
        let society = store
            .find_by_email(&email)
            .await
            .expect("find")
            .expect("present");
        let value = serde_json::to_value(&society).expect("serialise");
        assert!(value.get("password").is_none());
    }
}
