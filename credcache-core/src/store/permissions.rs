//! Platform-specific permission handling for the store file.

use std::path::Path;

use crate::error::StoreResult;

/// Restricting who can read a file holding plaintext secrets
pub trait FilePermissions {
  /// Set owner-only permissions on a store file
  fn set_secure_permissions(path: &Path) -> StoreResult<()>;

  /// Check whether a store file is readable only by its owner
  fn has_secure_permissions(path: &Path) -> StoreResult<bool>;
}

/// Permission handling for the platform this build targets
pub struct PlatformFilePermissions;

#[cfg(unix)]
impl FilePermissions for PlatformFilePermissions {
  fn set_secure_permissions(path: &Path) -> StoreResult<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use crate::error::StoreError;

    let mut perms = fs::metadata(path).map_err(|e| StoreError::io(path, e))?.permissions();
    perms.set_mode(0o600); // Owner read/write only
    fs::set_permissions(path, perms).map_err(|e| StoreError::io(path, e))
  }

  fn has_secure_permissions(path: &Path) -> StoreResult<bool> {
    use std::os::unix::fs::PermissionsExt;

    use crate::error::StoreError;

    let metadata = std::fs::metadata(path).map_err(|e| StoreError::io(path, e))?;
    Ok(metadata.permissions().mode() & 0o077 == 0)
  }
}

#[cfg(not(unix))]
impl FilePermissions for PlatformFilePermissions {
  fn set_secure_permissions(_path: &Path) -> StoreResult<()> {
    // ACLs are left to the user profile directory's defaults
    Ok(())
  }

  fn has_secure_permissions(path: &Path) -> StoreResult<bool> {
    Ok(path.exists())
  }
}

#[cfg(all(test, unix))]
mod tests {
  use std::fs;
  use std::os::unix::fs::PermissionsExt;

  use tempfile::TempDir;

  use super::*;
  use crate::error::StoreError;

  #[test]
  fn test_secure_permissions_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");
    fs::write(&path, "{}").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    assert!(!PlatformFilePermissions::has_secure_permissions(&path).unwrap());
    PlatformFilePermissions::set_secure_permissions(&path).unwrap();
    assert!(PlatformFilePermissions::has_secure_permissions(&path).unwrap());
  }

  #[test]
  fn test_missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = PlatformFilePermissions::set_secure_permissions(&temp_dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
  }
}
