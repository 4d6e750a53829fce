//! On-disk layout of the tooldock storage root.
//!
//! ```text
//! ~/.tooldock/                   (StoragePaths root, or $TOOLDOCK_HOME)
//! ├── plugins/                   (installation directory, one file per plugin)
//! ├── cache/
//! │   └── registry.json          (registry snapshot, 24h freshness)
//! ├── logs/                      (optional file logging)
//! └── config.toml                (optional user configuration)
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable that relocates the whole storage root.
pub const HOME_ENV_VAR: &str = "TOOLDOCK_HOME";

/// Name of the storage directory created under the user's home.
pub const APP_DIR_NAME: &str = ".tooldock";

/// File name of the registry snapshot inside the cache directory.
const REGISTRY_CACHE_FILE: &str = "registry.json";

/// Resolved storage locations.
///
/// Built once at startup and handed to every component; nothing in tooldock
/// looks up the home directory on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Resolve the storage root from the host environment.
    ///
    /// Checks `$TOOLDOCK_HOME` first, then falls back to `<home>/.tooldock/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PathResolution`] if `$TOOLDOCK_HOME` is relative,
    /// or if it is unset and the platform reports no home directory.
    pub fn resolve() -> ConfigResult<Self> {
        let home_override = std::env::var(HOME_ENV_VAR).ok();
        let user_home = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());
        Self::resolve_from(home_override.as_deref(), user_home)
    }

    /// Resolution logic with the environment lookups already performed.
    fn resolve_from(home_override: Option<&str>, user_home: Option<PathBuf>) -> ConfigResult<Self> {
        if let Some(custom) = home_override.filter(|s| !s.is_empty()) {
            let root = PathBuf::from(custom);
            if !root.is_absolute() {
                return Err(ConfigError::PathResolution(format!(
                    "{HOME_ENV_VAR} must be an absolute path, got: {custom}"
                )));
            }
            debug!(root = %root.display(), "using {HOME_ENV_VAR}");
            return Ok(Self { root });
        }

        let home = user_home
            .filter(|h| !h.as_os_str().is_empty())
            .ok_or_else(|| {
                ConfigError::PathResolution(format!(
                    "no home directory found and {HOME_ENV_VAR} is not set"
                ))
            })?;
        Ok(Self {
            root: home.join(APP_DIR_NAME),
        })
    }

    /// Create from an explicit root (useful for testing).
    #[must_use]
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the installation and cache directories if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CreateDir`] if either directory cannot be created.
    pub fn ensure(&self) -> ConfigResult<()> {
        for dir in [self.plugin_dir(), self.cache_dir()] {
            std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Storage root (`~/.tooldock/`).
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Installation directory (`~/.tooldock/plugins/`).
    #[must_use]
    pub fn plugin_dir(&self) -> PathBuf {
        self.root.join("plugins")
    }

    /// Cache directory (`~/.tooldock/cache/`).
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Registry snapshot (`~/.tooldock/cache/registry.json`).
    #[must_use]
    pub fn registry_cache_path(&self) -> PathBuf {
        self.cache_dir().join(REGISTRY_CACHE_FILE)
    }

    /// Log directory (`~/.tooldock/logs/`).
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// User configuration file (`~/.tooldock/config.toml`).
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_under_root() {
        let paths = StoragePaths::from_root("/home/user/.tooldock");
        assert_eq!(paths.plugin_dir(), PathBuf::from("/home/user/.tooldock/plugins"));
        assert_eq!(paths.cache_dir(), PathBuf::from("/home/user/.tooldock/cache"));
        assert_eq!(
            paths.registry_cache_path(),
            PathBuf::from("/home/user/.tooldock/cache/registry.json")
        );
        assert_eq!(
            paths.config_path(),
            PathBuf::from("/home/user/.tooldock/config.toml")
        );
    }

    #[test]
    fn resolve_uses_user_home() {
        let paths = StoragePaths::resolve_from(None, Some(PathBuf::from("/home/alex"))).unwrap();
        assert_eq!(paths.root(), Path::new("/home/alex/.tooldock"));
    }

    #[test]
    fn resolve_prefers_override() {
        let paths =
            StoragePaths::resolve_from(Some("/opt/tooldock"), Some(PathBuf::from("/home/alex")))
                .unwrap();
        assert_eq!(paths.root(), Path::new("/opt/tooldock"));
    }

    #[test]
    fn resolve_ignores_empty_override() {
        let paths = StoragePaths::resolve_from(Some(""), Some(PathBuf::from("/home/alex"))).unwrap();
        assert_eq!(paths.root(), Path::new("/home/alex/.tooldock"));
    }

    #[test]
    fn resolve_rejects_relative_override() {
        let err = StoragePaths::resolve_from(Some("relative/dir"), None).unwrap_err();
        assert!(matches!(err, ConfigError::PathResolution(_)));
    }

    #[test]
    fn resolve_fails_without_home() {
        let err = StoragePaths::resolve_from(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::PathResolution(_)));

        let err = StoragePaths::resolve_from(None, Some(PathBuf::new())).unwrap_err();
        assert!(matches!(err, ConfigError::PathResolution(_)));
    }

    #[test]
    fn ensure_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = StoragePaths::from_root(tmp.path().join("td"));
        paths.ensure().unwrap();
        assert!(paths.plugin_dir().is_dir());
        assert!(paths.cache_dir().is_dir());
        // Idempotent.
        paths.ensure().unwrap();
    }
}
