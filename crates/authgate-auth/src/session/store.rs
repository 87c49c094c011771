//! Per-principal session record facade over the key-value store.

use std::sync::Arc;
use std::time::Duration;

use authgate_core::result::AppResult;
use authgate_core::traits::store::KvStore;
use authgate_store::{StoreManager, keys};

use crate::token::claims::TokenKind;

/// Records the single live credential per (principal, kind).
///
/// Access and refresh credentials occupy separate keys, so a principal holds
/// at most one live credential of each kind. Records expire with the
/// credential lifetime and are overwritten on re-issuance.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// The underlying key-value store.
    store: Arc<StoreManager>,
}

impl SessionStore {
    /// Creates a new session store over the given key-value store.
    pub fn new(store: Arc<StoreManager>) -> Self {
        Self { store }
    }

    fn key(principal: &str, kind: TokenKind) -> String {
        match kind {
            TokenKind::Access => keys::access_token(principal),
            TokenKind::Refresh => keys::refresh_token(principal),
        }
    }

    /// Records `credential` as the live credential for (principal, kind),
    /// unconditionally overwriting any existing record, expiring after `ttl`.
    pub async fn put(
        &self,
        principal: &str,
        kind: TokenKind,
        credential: &str,
        ttl: Duration,
    ) -> AppResult<()> {
        self.store
            .set(&Self::key(principal, kind), credential, ttl)
            .await
    }

    /// Returns the live credential for (principal, kind), or `None` if the
    /// record is absent or expired. Absence is not an error.
    pub async fn get(&self, principal: &str, kind: TokenKind) -> AppResult<Option<String>> {
        self.store.get(&Self::key(principal, kind)).await
    }

    /// Removes the record for (principal, kind). Idempotent.
    pub async fn delete(&self, principal: &str, kind: TokenKind) -> AppResult<()> {
        self.store.delete(&Self::key(principal, kind)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::config::store::MemoryStoreConfig;
    use authgate_store::memory::MemoryStore;

    fn make_store() -> SessionStore {
        let provider = Arc::new(MemoryStore::new(&MemoryStoreConfig { max_capacity: 1000 }));
        SessionStore::new(Arc::new(StoreManager::from_provider(provider)))
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let sessions = make_store();
        sessions
            .put("u1", TokenKind::Access, "cred-a", Duration::from_secs(60))
            .await
            .unwrap();
        let stored = sessions.get("u1", TokenKind::Access).await.unwrap();
        assert_eq!(stored, Some("cred-a".to_string()));
    }

    #[tokio::test]
    async fn test_kinds_use_separate_slots() {
        let sessions = make_store();
        sessions
            .put("u1", TokenKind::Access, "cred-a", Duration::from_secs(60))
            .await
            .unwrap();
        sessions
            .put("u1", TokenKind::Refresh, "cred-r", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            sessions.get("u1", TokenKind::Access).await.unwrap(),
            Some("cred-a".to_string())
        );
        assert_eq!(
            sessions.get("u1", TokenKind::Refresh).await.unwrap(),
            Some("cred-r".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_then_absent() {
        let sessions = make_store();
        sessions
            .put("u1", TokenKind::Access, "cred-a", Duration::from_secs(60))
            .await
            .unwrap();
        sessions.delete("u1", TokenKind::Access).await.unwrap();
        assert_eq!(sessions.get("u1", TokenKind::Access).await.unwrap(), None);
        // Idempotent.
        sessions.delete("u1", TokenKind::Access).await.unwrap();
    }
}
