//! Credential claims embedded in access and refresh credentials.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims payload embedded in every credential.
///
/// Immutable once signed; any change invalidates the signature. The wire
/// shape is `{"subject", "display_name", "type", "iat", "exp"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The principal this credential was issued to.
    pub subject: String,
    /// Display name of the principal at issuance time.
    pub display_name: String,
    /// Credential kind: access or refresh.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Issued-at timestamp (seconds since epoch), server-assigned.
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Distinguishes access credentials from refresh credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived credential used to authorize individual requests.
    Access,
    /// Long-lived credential used solely to mint new pairs.
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

impl Claims {
    /// Checks whether this credential has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_claims(exp_offset: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            subject: "u1".to_string(),
            display_name: "alice".to_string(),
            kind: TokenKind::Access,
            iat: now,
            exp: now + exp_offset,
        }
    }

    #[test]
    fn test_wire_shape() {
        let claims = make_claims(900);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["subject"], "u1");
        assert_eq!(json["display_name"], "alice");
        assert_eq!(json["type"], "access");
        assert!(json["iat"].is_i64());
        assert!(json["exp"].is_i64());
    }

    #[test]
    fn test_expiry_helpers() {
        let live = make_claims(900);
        assert!(!live.is_expired());
        assert!(live.remaining_ttl_seconds() > 0);

        let expired = make_claims(-10);
        assert!(expired.is_expired());
        assert_eq!(expired.remaining_ttl_seconds(), 0);
    }
}
