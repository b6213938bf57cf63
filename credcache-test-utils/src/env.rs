//! Environment variable management for testing
//!
//! This module provides utilities for pointing XDG directories and the
//! `CREDCACHE_*` variables at a per-test temporary directory so tests never
//! touch the user's real credential store.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use tempfile::TempDir;

/// A test environment that overrides XDG directories to use a per-test
/// temporary directory
pub struct EnvTestGuard {
  /// The temporary directory that will be used for XDG directories
  pub temp_dir: TempDir,
  /// Original values of every variable this guard overrides
  originals: Vec<(&'static str, Option<OsString>)>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// XDG environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";

  /// Store settings that would otherwise leak in from the developer's shell
  pub const CLEARED: [&'static str; 3] = ["CREDCACHE_BACKEND", "CREDCACHE_STORE_PATH", "CREDCACHE_NAME"];

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let names = [Self::XDG_CONFIG_HOME, Self::XDG_DATA_HOME].into_iter().chain(Self::CLEARED);
    let originals = names.map(|name| (name, env::var_os(name))).collect();

    let guard = Self { temp_dir, originals };

    std::fs::create_dir_all(guard.config_home()).expect("Failed to create config directory");
    std::fs::create_dir_all(guard.data_home()).expect("Failed to create data directory");

    // SAFETY: tests using this guard do not read the environment from other
    // threads while it is being modified.
    unsafe {
      env::set_var(Self::XDG_CONFIG_HOME, guard.config_home());
      env::set_var(Self::XDG_DATA_HOME, guard.data_home());
      for name in Self::CLEARED {
        env::remove_var(name);
      }
    }

    guard
  }

  /// Get the path to the XDG config home
  pub fn config_home(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the XDG data home
  pub fn data_home(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }

  /// Directory credcache resolves its config file in under this guard
  pub fn app_config_dir(&self) -> PathBuf {
    self.config_home().join("credcache")
  }

  /// Directory credcache keeps its store files in under this guard
  pub fn app_data_dir(&self) -> PathBuf {
    self.data_home().join("credcache")
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    // SAFETY: see `EnvTestGuard::new`.
    unsafe {
      for (name, original) in &self.originals {
        match original {
          Some(val) => env::set_var(name, val),
          None => env::remove_var(name),
        }
      }
    }
  }
}
