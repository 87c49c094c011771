//! In-memory store implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;

use authgate_core::config::store::MemoryStoreConfig;
use authgate_core::result::AppResult;
use authgate_core::traits::store::KvStore;

/// In-memory session store using moka.
///
/// Each entry carries its own deadline; expired entries are dropped lazily
/// on read. Suitable for single-node deployments and tests — a multi-node
/// deployment needs the Redis provider so all nodes observe the same
/// session records.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// The underlying moka cache. Values are (credential, deadline) pairs.
    cache: Cache<String, (String, Instant)>,
}

impl MemoryStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryStoreConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.max_capacity).build();
        Self { cache }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self.cache.get(key).await {
            Some((value, deadline)) if Instant::now() < deadline => Ok(Some(value)),
            Some(_) => {
                self.cache.invalidate(key).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let deadline = Instant::now() + ttl;
        self.cache
            .insert(key.to_string(), (value.to_string(), deadline))
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
