//! Redis-backed OTP store adapter.
//!
//! Codes are written by the external sender under `otp:<email>`; this
//! adapter only reads and deletes them through a pooled connection.

use async_trait::async_trait;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::RedisConnectionManager;

use crate::domain::ports::{OtpStore, OtpStoreError};

fn map_redis_error(err: impl std::fmt::Display) -> OtpStoreError {
    OtpStoreError::backend(err.to_string())
}

/// Pooled Redis client implementing the OTP store port.
#[derive(Clone)]
pub struct RedisOtpStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisOtpStore {
    /// Build a pooled client against the given Redis URL.
    pub async fn connect(redis_url: &str) -> Result<Self, OtpStoreError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(map_redis_error)?;
        let pool = Pool::builder()
            .max_size(8)
            .build(manager)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { pool })
    }

    fn key(email: &str) -> String {
        format!("otp:{email}")
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn fetch(&self, email: &str) -> Result<Option<String>, OtpStoreError> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let value: Option<String> = conn.get(Self::key(email)).await.map_err(map_redis_error)?;
        Ok(value)
    }

    async fn delete(&self, email: &str) -> Result<(), OtpStoreError> {
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;
        let _: () = conn.del(Self::key(email)).await.map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn keys_are_namespaced_by_email() {
        assert_eq!(RedisOtpStore::key("drama@x.edu"), "otp:drama@x.edu");
    }
}
