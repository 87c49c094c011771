//! Credential creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::{AppError, ErrorKind};

use super::claims::{Claims, TokenKind};

/// Creates signed access and refresh credentials.
///
/// Stateless: a pure function of (secret, claims, clock). The issued-at
/// timestamp always reflects the server clock; client-supplied time never
/// participates in `iat` or `exp`.
#[derive(Clone)]
pub struct TokenSigner {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access credential TTL in seconds.
    access_ttl_seconds: i64,
    /// Refresh credential TTL in seconds.
    refresh_ttl_seconds: i64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

/// Result of a successful credential pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access credential.
    pub access_token: String,
    /// Long-lived refresh credential.
    pub refresh_token: String,
    /// Seconds until the access credential expires.
    pub expires_in: u64,
}

impl TokenSigner {
    /// Creates a new signer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            access_ttl_seconds: config.access_ttl_seconds as i64,
            refresh_ttl_seconds: config.refresh_ttl_seconds as i64,
        }
    }

    /// Signs a single credential of the given kind for the principal.
    ///
    /// Fails only on environmental failure, never on valid input.
    pub fn sign(
        &self,
        subject: &str,
        display_name: &str,
        kind: TokenKind,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        };

        let claims = Claims {
            subject: subject.to_string(),
            display_name: display_name.to_string(),
            kind,
            iat: now,
            exp: now + ttl,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(
                ErrorKind::Signing,
                format!("Failed to encode {kind} credential"),
                e,
            )
        })
    }

    /// Mints a new access + refresh credential pair for the principal.
    pub fn sign_pair(&self, subject: &str, display_name: &str) -> Result<TokenPair, AppError> {
        let access_token = self.sign(subject, display_name, TokenKind::Access)?;
        let refresh_token = self.sign(subject, display_name, TokenKind::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_ttl_seconds as u64,
        })
    }
}
