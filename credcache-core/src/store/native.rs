//! Credential store delegating to the OS secure storage facility (macOS
//! Keychain, Windows Credential Manager, Linux kernel keyutils) through the
//! `keyring` crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use keyring::Entry;
use tracing::debug;

use super::{CredentialStore, composite_key};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Credential store backed by the platform keychain
pub struct NativeStore {
  namespace: String,
  // One handle per (service, account), reused for every call on that pair
  entries: Mutex<HashMap<String, Arc<Entry>>>,
}

impl NativeStore {
  pub fn new(config: &StoreConfig) -> Self {
    Self {
      namespace: config.name.clone(),
      entries: Mutex::new(HashMap::new()),
    }
  }

  // Helper to format the keychain service name
  fn target_name(&self, service: &str) -> String {
    format!("{}:{}", self.namespace, service)
  }

  fn entry(&self, service: &str, account: &str) -> StoreResult<Arc<Entry>> {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    let key = composite_key(service, account);
    if let Some(entry) = entries.get(&key) {
      return Ok(Arc::clone(entry));
    }

    let entry = Arc::new(Entry::new(&self.target_name(service), account)?);
    entries.insert(key, Arc::clone(&entry));
    Ok(entry)
  }
}

impl CredentialStore for NativeStore {
  fn get(&self, service: &str, account: &str) -> StoreResult<String> {
    match self.entry(service, account)?.get_password() {
      Ok(secret) => Ok(secret),
      Err(keyring::Error::NoEntry) => Err(StoreError::not_found(service, account)),
      Err(e) => Err(e.into()),
    }
  }

  fn set(&self, service: &str, account: &str, secret: &str) -> StoreResult<()> {
    self.entry(service, account)?.set_password(secret)?;
    debug!("Stored {account} for {} in native store", self.target_name(service));
    Ok(())
  }

  fn remove(&self, service: &str, account: &str) -> StoreResult<()> {
    match self.entry(service, account)?.delete_credential() {
      Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
