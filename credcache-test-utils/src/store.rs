//! Temporary store files for testing
//!
//! [`StoreFileGuard`] owns a temporary directory holding a store file, so
//! tests can seed known contents and inspect what was written without going
//! through the store under test.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// RAII guard for a test store file
///
/// The backing directory is removed when the guard is dropped.
pub struct StoreFileGuard {
  temp_dir: TempDir,
  store_path: PathBuf,
}

impl Default for StoreFileGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl StoreFileGuard {
  /// A store path that does not exist yet
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store_path = temp_dir.path().join("store.json");
    Self { temp_dir, store_path }
  }

  /// A store file holding raw `content`, valid JSON or not
  pub fn with_content(content: &str) -> Self {
    let guard = Self::new();
    fs::write(&guard.store_path, content).expect("Failed to write test store file");
    guard
  }

  /// A store file holding the given `(service, account, secret)` entries
  pub fn with_entries(entries: &[(&str, &str, &str)]) -> Self {
    let map: BTreeMap<String, &str> = entries
      .iter()
      .map(|(service, account, secret)| (format!("{service}|{account}"), *secret))
      .collect();
    let content = serde_json::to_string_pretty(&map).expect("Failed to encode test store");
    Self::with_content(&content)
  }

  /// Get the path to the store file
  pub fn store_path(&self) -> &Path {
    &self.store_path
  }

  /// Get the path to the temporary directory
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Read the store file back as a map of composite key to secret
  pub fn read_entries(&self) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(&self.store_path)
      .with_context(|| format!("Failed to read {}", self.store_path.display()))?;
    serde_json::from_str(&content).context("Store file is not a JSON object of strings")
  }
}
