//! PostgreSQL-backed `UserStore` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel_async::RunQueryDsl;

use diesel::prelude::*;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{EmailAddress, User};

use super::error_mapping::{map_user_diesel_error, map_user_pool_error};
use super::models::{user_from_row, UserRecord, UserRow};
use super::pool::StorePool;
use super::schema::users;

/// Diesel-backed implementation of the user store port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: StorePool,
}

impl DieselUserStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: StorePool) -> Self {
        Self { pool }
    }
}

fn record_from_user(user: &User) -> Result<UserRecord, UserStoreError> {
    let wishlist = serde_json::to_value(&user.wishlist)
        .map_err(|err| UserStoreError::query(format!("serialise wishlist: {err}")))?;
    let reminders = serde_json::to_value(&user.reminders)
        .map_err(|err| UserStoreError::query(format!("serialise reminders: {err}")))?;
    Ok(UserRecord {
        id: user.id,
        name: user.name.clone(),
        username: user.username.as_str().to_owned(),
        email: user.email.as_str().to_owned(),
        branch: user.branch.clone(),
        section: user.section.clone(),
        batch_start: user.batch_start,
        batch_end: user.batch_end,
        wishlist,
        reminders,
        updated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SocietyRef, Username};
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn records_serialise_reference_lists_as_jsonb() {
        let mut user = User {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            username: Username::new("asha").expect("username"),
            email: EmailAddress::new("asha@x.edu").expect("email"),
            branch: "CSE".into(),
            section: "B".into(),
            batch_start: Some(2024),
            batch_end: Some(2028),
            wishlist: vec![SocietyRef::new("drama")],
            reminders: Vec::new(),
        };
        user.reminder_add("music");

        let record = record_from_user(&user).expect("record");
        assert_eq!(record.wishlist[0]["societyUsername"], "drama");
        assert_eq!(record.reminders[0]["societyUsername"], "music");
        assert_eq!(record.batch_start, Some(2024));
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_user_diesel_error)?;
        row.map(user_from_row).transpose()
    }

    async fn upsert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_user_pool_error)?;
        let record = record_from_user(user)?;
        diesel::insert_into(users::table)
            .values(&record)
            .on_conflict(users::email)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_user_diesel_error)
    }
}
