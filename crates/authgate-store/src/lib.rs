//! # authgate-store
//!
//! Session store implementations for Authgate. Supports two modes:
//!
//! - **memory**: In-process store using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. Both
//! implement the `KvStore` trait from `authgate-core`: per-key atomic
//! read/write with TTL-based expiry, which is all the session authority
//! relies on.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
