//! # Info Command
//!
//! Shows which backend and store file are in effect after configuration
//! layering, and whether the store file is readable only by its owner.

use anyhow::Result;
use credcache_core::store::{FilePermissions, PlatformFilePermissions};
use credcache_core::{Backend, ConfigDirs, StoreConfig};

use crate::output::{format_path, print_field, print_info};

pub(crate) fn handle_info_command(dirs: &ConfigDirs, config: &StoreConfig) -> Result<()> {
  let store_path = config.store_path();
  let config_path = dirs.config_path();

  print_field("backend", &config.backend.to_string());
  print_field("name", &config.name);
  print_field("config", &format_path(&config_path.display().to_string()));

  match config.backend {
    Backend::File => {
      print_field("store", &format_path(&store_path.display().to_string()));
      if !store_path.exists() {
        print_info("The store file will be created on the first `credcache set`.");
      } else if !PlatformFilePermissions::has_secure_permissions(&store_path)? {
        print_info("The store file is readable by other users; it is restricted on the next write.");
      }
    }
    Backend::Native => {
      print_field("store", &format!("OS secure store, entries prefixed '{}:'", config.name));
    }
  }

  Ok(())
}
