//! # Store Errors
//!
//! Error kinds surfaced by credential store operations. Problems reading the
//! backing file are not represented here: a store that cannot be loaded is
//! treated as empty.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing credentials
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("No secret stored for account '{account}' on service '{service}'")]
  NotFound { service: String, account: String },

  #[error("Failed to write credential store at {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to serialize credential store: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("Native secure store error: {0}")]
  Native(#[from] keyring::Error),
}

impl StoreError {
  pub(crate) fn not_found(service: &str, account: &str) -> Self {
    Self::NotFound {
      service: service.to_string(),
      account: account.to_string(),
    }
  }

  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  /// Whether this error is a lookup miss rather than a storage failure
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

/// Convenience alias for store results
pub type StoreResult<T> = std::result::Result<T, StoreError>;
