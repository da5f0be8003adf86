//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Nothing
//! in this crate reads environment variables itself; callers look values up and hand them in.

use crate::constants::DEFAULT_STORE_FILENAME;
use crate::{UidMapError, UidMapResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(store_path: PathBuf) -> UidMapResult<Self> {
        if store_path.as_os_str().is_empty() {
            return Err(UidMapError::InvalidConfig(
                "store path cannot be empty".into(),
            ));
        }

        if store_path.is_dir() {
            return Err(UidMapError::InvalidConfig(format!(
                "store path is a directory: {}",
                store_path.display()
            )));
        }

        Ok(Self { store_path })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

/// Pick the snapshot store path.
///
/// An explicit `override_path` wins, then a non-blank `env_value`, then
/// [`DEFAULT_STORE_FILENAME`] in the current directory.
pub fn resolve_store_path(override_path: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILENAME))
}
