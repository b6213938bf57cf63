//! # Credcache Core Library
//!
//! A local credential cache mapping a `(service, account)` pair to a secret.
//! Secrets are kept either in a JSON file on disk or in the OS secure store;
//! both backends implement [`CredentialStore`] and are chosen through
//! [`StoreConfig`].

pub mod config;
pub mod consts;
pub mod error;
pub mod store;

// Re-export main types for store consumers
pub use config::{Backend, ConfigDirs, ConfigOverrides, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use store::{CredentialStore, FileStore, NativeStore, composite_key, open_store};
