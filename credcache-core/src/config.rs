//! # Configuration Management
//!
//! Handles store configuration, directory management, and settings for the
//! credcache tool, including XDG base directory support.
//!
//! Settings are layered: built-in defaults, then the optional
//! `config.toml`, then `CREDCACHE_*` environment variables, then whatever the
//! caller (usually the CLI) applies last.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{APP_NAME, DEFAULT_STORE_NAME, ENV_BACKEND, ENV_NAME, ENV_STORE_PATH};

/// Which backend holds the secrets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// JSON file on disk
  #[default]
  File,
  /// OS-provided secure storage
  Native,
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Backend::File => f.write_str("file"),
      Backend::Native => f.write_str("native"),
    }
  }
}

impl FromStr for Backend {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "file" => Ok(Backend::File),
      "native" | "keychain" | "keyring" => Ok(Backend::Native),
      other => Err(format!("unknown backend '{other}' (expected 'file' or 'native')")),
    }
  }
}

/// Represents the configuration directories for the credcache application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl Default for ConfigDirs {
  fn default() -> Self {
    Self::new()
  }
}

impl ConfigDirs {
  /// Resolve the platform directories, falling back to the temp directory
  /// when no home directory is available.
  pub fn new() -> Self {
    match ProjectDirs::from("", "", APP_NAME) {
      Some(proj_dirs) => Self {
        config_dir: proj_dirs.config_dir().to_path_buf(),
        data_dir: proj_dirs.data_dir().to_path_buf(),
      },
      None => {
        let root = std::env::temp_dir().join(APP_NAME);
        warn!("Could not determine home directory, using {}", root.display());
        Self::in_dir(root)
      }
    }
  }

  /// Lay out config and data directories under a single root
  pub fn in_dir(root: impl AsRef<Path>) -> Self {
    let root = root.as_ref();
    Self {
      config_dir: root.join("config"),
      data_dir: root.join("data"),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Get the path to the optional TOML configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Path of the store file for a given namespace
  pub fn default_store_path(&self, name: &str) -> PathBuf {
    store_file(&self.data_dir, name)
  }

  /// Initialize the configuration directories
  pub fn init(&self) -> Result<()> {
    fs::create_dir_all(&self.config_dir).context("Failed to create config directory")?;
    fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
    Ok(())
  }
}

/// A partial set of settings from one configuration layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
  pub name: Option<String>,
  pub backend: Option<Backend>,
  pub path: Option<PathBuf>,
}

impl ConfigOverrides {
  /// Read overrides from a TOML file. A missing file yields no overrides.
  pub fn from_file(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!("No config file at {}", path.display());
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
  }

  /// Read overrides from the `CREDCACHE_*` environment variables
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build overrides from an arbitrary variable lookup. Empty values count
  /// as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let backend = match get(ENV_BACKEND) {
      Some(raw) => Some(raw.parse::<Backend>().map_err(|e| anyhow::anyhow!("{ENV_BACKEND}: {e}"))?),
      None => None,
    };

    Ok(Self {
      name: get(ENV_NAME),
      backend,
      path: get(ENV_STORE_PATH).map(PathBuf::from),
    })
  }
}

/// Where and how a credential store keeps its secrets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
  /// Namespace for the store; names the store file and prefixes native
  /// entries
  pub name: String,
  pub backend: Backend,
  /// Explicit store file, overriding the path derived from `name`
  pub path: Option<PathBuf>,
  data_dir: PathBuf,
}

impl StoreConfig {
  /// File-backed configuration for `name` in the default data directory.
  /// Fails when `name` is not usable as a file name.
  pub fn for_name(name: &str) -> Result<Self> {
    let config = Self::in_data_dir(name, ConfigDirs::new().data_dir());
    config.validate()?;
    Ok(config)
  }

  /// File-backed configuration for `name` rooted at `data_dir`. The name is
  /// not checked; call [`StoreConfig::validate`] before using it.
  pub fn in_data_dir(name: &str, data_dir: impl Into<PathBuf>) -> Self {
    Self {
      name: name.to_string(),
      backend: Backend::default(),
      path: None,
      data_dir: data_dir.into(),
    }
  }

  /// File-backed configuration pinned to an explicit file
  pub fn at_path(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let data_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Self {
      name: DEFAULT_STORE_NAME.to_string(),
      backend: Backend::File,
      path: Some(path),
      data_dir,
    }
  }

  pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.path = Some(path.into());
    self
  }

  /// Load defaults, the config file, and the environment, in that order
  pub fn load(dirs: &ConfigDirs) -> Result<Self> {
    let mut config = Self::in_data_dir(DEFAULT_STORE_NAME, dirs.data_dir());
    config.merge(ConfigOverrides::from_file(&dirs.config_path())?);
    config.merge(ConfigOverrides::from_env()?);
    config.validate()?;

    debug!(name = %config.name, backend = %config.backend, "Loaded store configuration");
    Ok(config)
  }

  /// Apply a layer of overrides on top of the current settings
  pub fn merge(&mut self, overrides: ConfigOverrides) {
    if let Some(name) = overrides.name {
      self.name = name;
    }
    if let Some(backend) = overrides.backend {
      self.backend = backend;
    }
    if let Some(path) = overrides.path {
      self.path = Some(path);
    }
  }

  /// The name ends up in a file name, so it must be a single path component
  pub fn validate(&self) -> Result<()> {
    let name = self.name.trim();
    if name.is_empty() {
      bail!("Store name must not be empty");
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
      bail!("Store name '{}' must not contain path separators", self.name);
    }
    Ok(())
  }

  /// Resolved location of the store file
  pub fn store_path(&self) -> PathBuf {
    match &self.path {
      Some(path) => path.clone(),
      None => store_file(&self.data_dir, &self.name),
    }
  }
}

fn store_file(data_dir: &Path, name: &str) -> PathBuf {
  data_dir.join(format!("{name}.json"))
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use tempfile::TempDir;

  use super::*;

  fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
  }

  #[test]
  fn test_backend_parsing() {
    assert_eq!("file".parse::<Backend>().unwrap(), Backend::File);
    assert_eq!("Native".parse::<Backend>().unwrap(), Backend::Native);
    assert_eq!("keychain".parse::<Backend>().unwrap(), Backend::Native);
    assert!("s3".parse::<Backend>().is_err());
  }

  #[test]
  fn test_default_store_path_uses_name() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::in_dir(temp_dir.path());

    let path = dirs.default_store_path("ipatool");
    assert_eq!(path, temp_dir.path().join("data/ipatool.json"));

    let config = StoreConfig::in_data_dir("ipatool", dirs.data_dir());
    assert_eq!(config.store_path(), path);
  }

  #[test]
  fn test_explicit_path_wins_over_name() {
    let config = StoreConfig::in_data_dir("ipatool", "/var/data").with_path("/tmp/custom.json");
    assert_eq!(config.store_path(), PathBuf::from("/tmp/custom.json"));
  }

  #[test]
  fn test_init_creates_directories() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::in_dir(temp_dir.path());
    dirs.init().unwrap();

    assert!(dirs.config_dir().exists());
    assert!(dirs.data_dir().exists());
    assert!(dirs.config_path().ends_with("config.toml"));
  }

  #[test]
  fn test_missing_config_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let overrides = ConfigOverrides::from_file(&temp_dir.path().join("config.toml")).unwrap();
    assert_eq!(overrides, ConfigOverrides::default());
  }

  #[test]
  fn test_config_file_is_parsed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "name = \"work\"\nbackend = \"native\"\n").unwrap();

    let overrides = ConfigOverrides::from_file(&path).unwrap();
    assert_eq!(overrides.name.as_deref(), Some("work"));
    assert_eq!(overrides.backend, Some(Backend::Native));
    assert_eq!(overrides.path, None);
  }

  #[test]
  fn test_malformed_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "backend = \"floppy\"\n").unwrap();

    assert!(ConfigOverrides::from_file(&path).is_err());
  }

  #[test]
  fn test_env_overrides_file() {
    let mut config = StoreConfig::in_data_dir(DEFAULT_STORE_NAME, "/data");
    config.merge(ConfigOverrides {
      name: Some("from-file".to_string()),
      backend: Some(Backend::Native),
      path: None,
    });
    config.merge(ConfigOverrides::from_lookup(lookup_from(&[(ENV_BACKEND, "file"), (ENV_NAME, "")])).unwrap());

    assert_eq!(config.name, "from-file");
    assert_eq!(config.backend, Backend::File);
    assert_eq!(config.store_path(), PathBuf::from("/data/from-file.json"));
  }

  #[test]
  fn test_env_store_path() {
    let overrides = ConfigOverrides::from_lookup(lookup_from(&[(ENV_STORE_PATH, "/tmp/s.json")])).unwrap();
    assert_eq!(overrides.path, Some(PathBuf::from("/tmp/s.json")));
  }

  #[test]
  fn test_invalid_env_backend_is_an_error() {
    assert!(ConfigOverrides::from_lookup(lookup_from(&[(ENV_BACKEND, "vault")])).is_err());
  }

  #[test]
  fn test_validate_rejects_path_like_names() {
    assert!(StoreConfig::in_data_dir("", "/data").validate().is_err());
    assert!(StoreConfig::in_data_dir("../escape", "/data").validate().is_err());
    assert!(StoreConfig::in_data_dir("ipatool", "/data").validate().is_ok());
  }

  #[test]
  fn test_for_name_rejects_names_outside_data_dir() {
    assert!(StoreConfig::for_name("../x").is_err());
    assert!(StoreConfig::for_name("nested/store").is_err());
    assert!(StoreConfig::for_name("").is_err());
  }
}
