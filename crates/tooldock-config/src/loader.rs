//! Config file discovery and loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Start from [`Config::default`]
//! 2. Overlay `<root>/config.toml` when present
//! 3. Apply the `TOOLDOCK_REGISTRY_URL` override
//! 4. Validate

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::paths::StoragePaths;
use crate::types::{Config, REGISTRY_URL_ENV_VAR};
use crate::validate;

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load the configuration for the given storage root.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `config.toml` exists but is unreadable or
/// malformed, or if the final configuration fails validation.
pub fn load(paths: &StoragePaths) -> ConfigResult<Config> {
    load_with_env(paths, &collect_env_vars())
}

/// Load with an explicit environment snapshot instead of the process environment.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with_env(paths: &StoragePaths, env: &HashMap<String, String>) -> ConfigResult<Config> {
    let config_path = paths.config_path();
    let mut config = match try_load_file(&config_path)? {
        Some(config) => {
            info!(path = %config_path.display(), "loaded user config");
            config
        },
        None => Config::default(),
    };

    if let Some(url) = env.get(REGISTRY_URL_ENV_VAR).filter(|u| !u.is_empty()) {
        debug!(url = %url, "registry URL overridden by {REGISTRY_URL_ENV_VAR}");
        config.registry.url = Some(url.clone());
    }

    validate::validate(&config)?;
    Ok(config)
}

/// Snapshot the environment variables this crate cares about.
fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("TOOLDOCK_"))
        .collect()
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// Uses a single read operation (no separate exists/metadata checks).
fn try_load_file(path: &Path) -> ConfigResult<Option<Config>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {size} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit"
            ),
        });
    }

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(config))
}
