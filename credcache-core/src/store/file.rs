//! File-backed credential store.
//!
//! Secrets live in a single JSON object mapping `"service|account"` to the
//! secret. The file is the source of truth: every operation reloads it under
//! the store's lock before reading or modifying, so writes made by other
//! processes show up on the next call. There is no cross-process locking;
//! the last writer wins.
//!
//! Saves go to a temporary file in the same directory which is then renamed
//! over the store file, so readers see either the old or the new contents and
//! never a truncated file.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::NamedTempFile;
use tracing::{debug, trace, warn};

use super::permissions::{FilePermissions, PlatformFilePermissions};
use super::{CredentialStore, composite_key};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

type Entries = HashMap<String, String>;

/// Credential store persisted as a JSON file
pub struct FileStore {
  path: PathBuf,
  entries: Mutex<Entries>,
}

impl FileStore {
  /// Create a store at the path derived from `config`. A missing or
  /// unreadable file results in an empty store.
  pub fn new(config: &StoreConfig) -> Self {
    Self::open(config.store_path())
  }

  /// Create a store backed by an explicit file
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let entries = load_entries(&path);
    debug!("Opened file store at {} with {} entries", path.display(), entries.len());

    Self {
      path,
      entries: Mutex::new(entries),
    }
  }

  /// Location of the backing file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Take the lock and refresh the cached entries from disk
  fn reload(&self) -> MutexGuard<'_, Entries> {
    // The map is replaced wholesale from disk, so a poisoned lock holds
    // nothing worth protecting.
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    *entries = load_entries(&self.path);
    entries
  }

  fn save(&self, entries: &Entries) -> StoreResult<()> {
    let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      Some(parent) => {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        parent
      }
      None => Path::new("."),
    };

    let content = serde_json::to_string_pretty(entries)?;

    // The temp file is created owner-only and removed again if anything
    // below fails, so a secret never sits on disk with looser permissions.
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    PlatformFilePermissions::set_secure_permissions(temp.path())?;
    temp
      .write_all(content.as_bytes())
      .and_then(|()| temp.as_file().sync_all())
      .map_err(|e| StoreError::io(temp.path(), e))?;
    temp.persist(&self.path).map_err(|e| StoreError::io(&self.path, e.error))?;

    trace!("Saved {} entries to {}", entries.len(), self.path.display());
    Ok(())
  }
}

impl CredentialStore for FileStore {
  fn get(&self, service: &str, account: &str) -> StoreResult<String> {
    let entries = self.reload();
    entries
      .get(&composite_key(service, account))
      .cloned()
      .ok_or_else(|| StoreError::not_found(service, account))
  }

  fn set(&self, service: &str, account: &str, secret: &str) -> StoreResult<()> {
    let mut entries = self.reload();
    entries.insert(composite_key(service, account), secret.to_string());
    self.save(&entries)
  }

  fn remove(&self, service: &str, account: &str) -> StoreResult<()> {
    let mut entries = self.reload();
    if entries.remove(&composite_key(service, account)).is_none() {
      debug!("No entry for {account} on {service}, nothing to remove");
    }
    self.save(&entries)
  }
}

/// Read the store file, treating anything unusable as an empty store
fn load_entries(path: &Path) -> Entries {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      trace!("Store file {} does not exist yet", path.display());
      return Entries::new();
    }
    Err(e) => {
      warn!("Failed to read store file {}: {e}", path.display());
      return Entries::new();
    }
  };

  if content.trim().is_empty() {
    return Entries::new();
  }

  serde_json::from_str(&content).unwrap_or_else(|e| {
    warn!("Ignoring unreadable store file {}: {e}", path.display());
    Entries::new()
  })
}
