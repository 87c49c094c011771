//! # authgate-core
//!
//! Core crate for Authgate. Contains configuration schemas, the key-value
//! store trait the authority depends on, telemetry setup, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Authgate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
