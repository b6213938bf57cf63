//! Test utilities shared across the credcache workspace
//!
//! This crate provides common testing infrastructure including:
//! - XDG directory isolation ([`EnvTestGuard`])
//! - Seeded store files ([`StoreFileGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod store;

// Re-export commonly used items
pub use env::EnvTestGuard;
pub use store::StoreFileGuard;
