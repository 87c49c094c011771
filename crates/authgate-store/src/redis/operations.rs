//! Redis store provider implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_core::traits::store::KvStore;

use super::client::RedisClient;

/// Redis-backed session store.
#[derive(Debug, Clone)]
pub struct RedisStore {
    /// Redis client.
    client: RedisClient,
    /// Per-command timeout. A command exceeding it surfaces as
    /// store-unavailable instead of hanging the caller.
    command_timeout: Duration,
}

impl RedisStore {
    /// Create a new Redis store provider.
    pub fn new(client: RedisClient, command_timeout_seconds: u64) -> Self {
        Self {
            client,
            command_timeout: Duration::from_secs(command_timeout_seconds),
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::StoreUnavailable, format!("Redis error: {e}"), e)
    }

    /// Run a Redis command under the configured timeout.
    async fn timed<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        tokio::time::timeout(self.command_timeout, fut)
            .await
            .map_err(|_| AppError::store_unavailable("Redis command timed out"))?
            .map_err(Self::map_err)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.timed(async move { conn.get(&full_key).await }).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let value = value.to_string();
        let mut conn = self.client.conn_mut();
        self.timed(async move { conn.set_ex(&full_key, value, ttl.as_secs()).await })
            .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.timed(async move { conn.del(&full_key).await }).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = self
            .timed(async move { redis::cmd("PING").query_async(&mut conn).await })
            .await?;
        Ok(pong == "PONG")
    }
}
