//! Key-value store trait for pluggable session store backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for session store backends (Redis or in-memory).
///
/// The backend must offer atomic per-key read/write; the authority delegates
/// all serialization of "what is the current session" to it. Connectivity
/// failures surface as `ErrorKind::StoreUnavailable` and are never swallowed.
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has
    /// expired; absence is not an error.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, unconditionally overwriting any existing record, and
    /// expire it after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key. Idempotent: deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check that the store backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
