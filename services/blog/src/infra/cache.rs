use std::time::Duration;

use deadpool_redis::redis::{AsyncCommands, RedisError};
use deadpool_redis::{Connection, Pool};

use crate::domain::repository::CodeStore;
use crate::error::BlogServiceError;

/// Verification codes and pending registrations, stored under plain keys
/// with Redis-side expiry.
#[derive(Clone)]
pub struct RedisCodeStore {
    pub pool: Pool,
}

impl RedisCodeStore {
    async fn conn(&self) -> Result<Connection, BlogServiceError> {
        self.pool
            .get()
            .await
            .map_err(|e| BlogServiceError::Internal(e.into()))
    }
}

impl CodeStore for RedisCodeStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), BlogServiceError> {
        let mut conn = self.conn().await?;
        // SETEX rejects a zero expiry.
        let secs = ttl.as_secs().max(1);
        let (): () = conn
            .set_ex(key, value, secs)
            .await
            .map_err(|e: RedisError| BlogServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BlogServiceError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e: RedisError| BlogServiceError::Internal(e.into()))?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<(), BlogServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .del(key)
            .await
            .map_err(|e: RedisError| BlogServiceError::Internal(e.into()))?;
        Ok(())
    }
}
