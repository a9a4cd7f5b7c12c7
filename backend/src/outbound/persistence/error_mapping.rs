//! Mapping from Diesel and pool failures onto store port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::ports::{SocietyStoreError, UserStoreError};

use super::pool::PoolError;

pub(super) fn map_society_pool_error(error: PoolError) -> SocietyStoreError {
    SocietyStoreError::connection(error.to_string())
}

pub(super) fn map_society_diesel_error(error: DieselError) -> SocietyStoreError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            // The unique indexes cover username and email; anything else
            // falling in here still names the offending constraint.
            let field = match info.constraint_name() {
                Some("societies_username_key") => "username",
                Some("societies_email_key") => "email",
                other => other.unwrap_or("identity"),
            };
            SocietyStoreError::duplicate(field)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            SocietyStoreError::connection(info.message().to_owned())
        }
        other => SocietyStoreError::query(other.to_string()),
    }
}

pub(super) fn map_user_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.to_string())
}

pub(super) fn map_user_diesel_error(error: DieselError) -> UserStoreError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserStoreError::connection(info.message().to_owned())
        }
        other => UserStoreError::query(other.to_string()),
    }
}
