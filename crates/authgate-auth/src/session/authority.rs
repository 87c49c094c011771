//! Session authority — credential issuance, validation, and revocation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;

use crate::token::claims::{Claims, TokenKind};
use crate::token::signer::{TokenPair, TokenSigner};
use crate::token::verifier::TokenVerifier;

use super::store::SessionStore;

/// The single caller-facing component of the authority.
///
/// Composes the token codec with the session store: credentials it issues
/// are recorded as the live session per (principal, kind), and a presented
/// credential is accepted only while it is byte-identical to that record.
/// Each (principal, kind) session moves `ABSENT → ACTIVE` on issuance,
/// `ACTIVE → ACTIVE` on re-issuance (the previous credential is silently
/// superseded), and `ACTIVE → ABSENT` on revocation or record expiry.
///
/// All collaborators are constructor-injected; there is no process-wide
/// registry. No in-process locking: concurrent issuance for the same
/// principal races at the store, whose last write wins.
#[derive(Debug, Clone)]
pub struct SessionAuthority {
    /// Credential signing.
    signer: Arc<TokenSigner>,
    /// Credential verification.
    verifier: Arc<TokenVerifier>,
    /// Live session records.
    sessions: Arc<SessionStore>,
    /// Access credential lifetime.
    access_ttl: Duration,
    /// Refresh credential lifetime.
    refresh_ttl: Duration,
}

impl SessionAuthority {
    /// Creates a new session authority with its collaborators.
    pub fn new(
        signer: Arc<TokenSigner>,
        verifier: Arc<TokenVerifier>,
        sessions: Arc<SessionStore>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            signer,
            verifier,
            sessions,
            access_ttl: Duration::from_secs(config.access_ttl_seconds),
            refresh_ttl: Duration::from_secs(config.refresh_ttl_seconds),
        }
    }

    /// Mints an access + refresh credential pair for the principal and
    /// records both as the live session, superseding any previous pair.
    ///
    /// Both records must be written before this returns success. If the
    /// refresh write fails after the access write succeeded, the session is
    /// left partial (access live, refresh missing); retrying `issue_pair`
    /// is safe and supersedes the partial state.
    pub async fn issue_pair(
        &self,
        principal: &str,
        display_name: &str,
    ) -> Result<TokenPair, AppError> {
        let pair = self.signer.sign_pair(principal, display_name)?;

        self.sessions
            .put(principal, TokenKind::Access, &pair.access_token, self.access_ttl)
            .await?;
        self.sessions
            .put(principal, TokenKind::Refresh, &pair.refresh_token, self.refresh_ttl)
            .await?;

        info!(principal = %principal, "Issued credential pair");
        Ok(pair)
    }

    /// Validates a presented credential of the given kind.
    ///
    /// Checks, in order:
    /// 1. Signature, algorithm, and expiry (the token codec)
    /// 2. A live session record exists for (principal, kind)
    /// 3. The record is byte-identical to the presented credential
    ///
    /// A missing record means the session was revoked or expired; a
    /// differing record means the credential was superseded by a newer
    /// login (or forged around the store).
    pub async fn validate(&self, kind: TokenKind, credential: &str) -> Result<Claims, AppError> {
        let claims = self.verifier.verify(credential)?;

        match self.sessions.get(&claims.subject, kind).await? {
            None => Err(AppError::session_revoked(
                "No live session record for the presented credential",
            )),
            Some(stored) if stored != credential => {
                warn!(
                    principal = %claims.subject,
                    kind = %kind,
                    "Presented credential differs from the live session record"
                );
                Err(AppError::session_mismatch(
                    "Presented credential has been superseded",
                ))
            }
            Some(_) => Ok(claims),
        }
    }

    /// Validates a presented access credential.
    pub async fn validate_access(&self, credential: &str) -> Result<Claims, AppError> {
        self.validate(TokenKind::Access, credential).await
    }

    /// Rotates a session: validates the presented refresh credential, then
    /// issues a fresh pair for the same principal. The old refresh
    /// credential is retired by overwrite, so presenting it again fails
    /// with a session mismatch.
    pub async fn refresh(&self, refresh_credential: &str) -> Result<TokenPair, AppError> {
        let claims = self.validate(TokenKind::Refresh, refresh_credential).await?;

        let pair = self
            .issue_pair(&claims.subject, &claims.display_name)
            .await?;

        info!(principal = %claims.subject, "Rotated credential pair");
        Ok(pair)
    }

    /// Revokes the principal's session: deletes both the access and refresh
    /// records. Succeeds unless the store is unavailable.
    pub async fn revoke(&self, principal: &str) -> Result<(), AppError> {
        self.sessions.delete(principal, TokenKind::Access).await?;
        self.sessions.delete(principal, TokenKind::Refresh).await?;

        info!(principal = %principal, "Revoked session records");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use uuid::Uuid;

    use authgate_core::config::store::MemoryStoreConfig;
    use authgate_core::error::ErrorKind;
    use authgate_core::result::AppResult;
    use authgate_core::traits::store::KvStore;
    use authgate_store::StoreManager;
    use authgate_store::memory::MemoryStore;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "authority-test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn make_authority_with(manager: StoreManager) -> SessionAuthority {
        let config = test_config();
        SessionAuthority::new(
            Arc::new(TokenSigner::new(&config)),
            Arc::new(TokenVerifier::new(&config)),
            Arc::new(SessionStore::new(Arc::new(manager))),
            &config,
        )
    }

    fn make_authority() -> SessionAuthority {
        let provider = Arc::new(MemoryStore::new(&MemoryStoreConfig { max_capacity: 1000 }));
        make_authority_with(StoreManager::from_provider(provider))
    }

    fn principal() -> String {
        Uuid::new_v4().to_string()
    }

    /// Credentials for the same principal differ only by their timestamps,
    /// so two issuances inside one second are byte-identical; step past the
    /// second boundary to make the superseding pair distinguishable.
    async fn next_second() {
        tokio::time::sleep(Duration::from_millis(1100)).await;
    }

    #[tokio::test]
    async fn test_issue_then_validate() {
        let authority = make_authority();
        let p = principal();

        let pair = authority.issue_pair(&p, "alice").await.unwrap();
        assert_eq!(pair.expires_in, 900);

        let claims = authority.validate_access(&pair.access_token).await.unwrap();
        assert_eq!(claims.subject, p);
        assert_eq!(claims.display_name, "alice");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[tokio::test]
    async fn test_unrecorded_credential_is_revoked() {
        let authority = make_authority();
        let p = principal();

        // Signed by us, but never recorded as a live session.
        let config = test_config();
        let token = TokenSigner::new(&config)
            .sign(&p, "alice", TokenKind::Access)
            .unwrap();

        let err = authority.validate_access(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionRevoked);
    }

    #[tokio::test]
    async fn test_revoke_invalidates_both_kinds() {
        let authority = make_authority();
        let p = principal();

        let pair = authority.issue_pair(&p, "alice").await.unwrap();
        authority.revoke(&p).await.unwrap();

        let err = authority.validate_access(&pair.access_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionRevoked);

        let err = authority.refresh(&pair.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionRevoked);

        // Revoking an already-absent session is not an error.
        authority.revoke(&p).await.unwrap();
    }

    #[tokio::test]
    async fn test_reissue_supersedes_previous_pair() {
        let authority = make_authority();
        let p = principal();

        let first = authority.issue_pair(&p, "alice").await.unwrap();
        next_second().await;
        let second = authority.issue_pair(&p, "alice").await.unwrap();

        let err = authority.validate_access(&first.access_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionMismatch);

        let claims = authority
            .validate_access(&second.access_token)
            .await
            .unwrap();
        assert_eq!(claims.subject, p);
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_retires_old_credentials() {
        let authority = make_authority();
        let p = principal();

        let first = authority.issue_pair(&p, "alice").await.unwrap();
        next_second().await;

        let second = authority.refresh(&first.refresh_token).await.unwrap();
        let claims = authority
            .validate_access(&second.access_token)
            .await
            .unwrap();
        assert_eq!(claims.subject, p);

        // The rotated-out refresh credential is dead.
        let err = authority.refresh(&first.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionMismatch);

        // Rotation supersedes the whole pair: the old access credential
        // fails the same way (single live slot per kind).
        let err = authority.validate_access(&first.access_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionMismatch);
    }

    #[tokio::test]
    async fn test_wrong_kind_fails_store_cross_check() {
        let authority = make_authority();
        let p = principal();

        let pair = authority.issue_pair(&p, "alice").await.unwrap();

        // A refresh credential presented as access never matches the access
        // slot: rejected without a dedicated kind check.
        let err = authority.validate_access(&pair.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionMismatch);
    }

    #[derive(Debug)]
    struct UnreachableStore;

    #[async_trait]
    impl KvStore for UnreachableStore {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::store_unavailable("store is down"))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            Err(AppError::store_unavailable("store is down"))
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Err(AppError::store_unavailable("store is down"))
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates_not_swallowed() {
        let authority = make_authority_with(StoreManager::from_provider(Arc::new(UnreachableStore)));
        let p = principal();

        let err = authority.issue_pair(&p, "alice").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);

        let token = TokenSigner::new(&test_config())
            .sign(&p, "alice", TokenKind::Access)
            .unwrap();
        let err = authority.validate_access(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);

        let err = authority.revoke(&p).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    }
}
