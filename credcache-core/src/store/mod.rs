//! # Credential Storage
//!
//! Persistent storage of secrets keyed by a `(service, account)` pair, with a
//! file-backed store and a store delegating to the OS secure storage facility.
//! Both implement [`CredentialStore`]; which one is used is a configuration
//! choice made in [`open_store`].

pub mod file;
pub mod native;
mod permissions;

use tracing::debug;

pub use self::file::FileStore;
pub use self::native::NativeStore;
pub use self::permissions::{FilePermissions, PlatformFilePermissions};
use crate::config::{Backend, StoreConfig};
use crate::consts::KEY_SEPARATOR;
use crate::error::StoreResult;

/// Operations shared by every credential backend
pub trait CredentialStore: Send + Sync {
  /// Look up the secret for `account` on `service`
  fn get(&self, service: &str, account: &str) -> StoreResult<String>;

  /// Store or overwrite the secret for `account` on `service`
  fn set(&self, service: &str, account: &str, secret: &str) -> StoreResult<()>;

  /// Delete the secret for `account` on `service`. Removing an entry that
  /// does not exist succeeds.
  fn remove(&self, service: &str, account: &str) -> StoreResult<()>;

  /// Check whether a secret is stored, without treating a miss as an error
  fn contains(&self, service: &str, account: &str) -> StoreResult<bool> {
    match self.get(service, account) {
      Ok(_) => Ok(true),
      Err(e) if e.is_not_found() => Ok(false),
      Err(e) => Err(e),
    }
  }
}

/// Build the key a `(service, account)` pair is stored under
///
/// ```
/// use credcache_core::store::composite_key;
///
/// assert_eq!(composite_key("example.com", "alice"), "example.com|alice");
/// ```
pub fn composite_key(service: &str, account: &str) -> String {
  format!("{service}{KEY_SEPARATOR}{account}")
}

/// Open the store selected by `config.backend`
pub fn open_store(config: &StoreConfig) -> Box<dyn CredentialStore> {
  debug!(backend = %config.backend, name = %config.name, "Opening credential store");
  match config.backend {
    Backend::File => Box::new(FileStore::new(config)),
    Backend::Native => Box::new(NativeStore::new(config)),
  }
}
