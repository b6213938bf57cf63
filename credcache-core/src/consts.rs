//! Core constants shared across credcache components.

/// Application name used for platform directories
pub const APP_NAME: &str = "credcache";

/// Namespace used when none is configured
pub const DEFAULT_STORE_NAME: &str = "credcache";

/// Joins service and account into a composite key
pub const KEY_SEPARATOR: char = '|';

pub const ENV_BACKEND: &str = "CREDCACHE_BACKEND";
pub const ENV_STORE_PATH: &str = "CREDCACHE_STORE_PATH";
pub const ENV_NAME: &str = "CREDCACHE_NAME";
