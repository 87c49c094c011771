//! Store key builders for all Authgate session records.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Store key for the live access credential of a principal.
pub fn access_token(principal: &str) -> String {
    format!("token:{principal}")
}

/// Store key for the live refresh credential of a principal.
pub fn refresh_token(principal: &str) -> String {
    format!("refresh_token:{principal}")
}
