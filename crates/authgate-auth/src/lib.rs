//! # authgate-auth
//!
//! Credential signing, verification, and session orchestration for the
//! Authgate session/token authority.
//!
//! ## Modules
//!
//! - `token` — HMAC-signed credential creation and validation
//! - `session` — the per-principal session record facade and the
//!   [`SessionAuthority`] that composes it with the token codec
//!
//! The authority enforces a single live credential per (principal, kind):
//! every issuance overwrites the previous record, so the latest login wins
//! and superseded credentials fail validation.

pub mod session;
pub mod token;

pub use session::{SessionAuthority, SessionStore};
pub use token::{Claims, TokenKind, TokenPair, TokenSigner, TokenVerifier};
