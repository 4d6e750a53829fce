#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Storage paths and configuration for the tooldock plugin manager.
//!
//! Two pieces live here:
//!
//! - [`StoragePaths`]: where installed plugins, the registry cache, logs and
//!   `config.toml` live (`~/.tooldock/` or `$TOOLDOCK_HOME`).
//! - [`Config`]: the optional `config.toml` merged with environment overrides.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tooldock_config::{Config, StoragePaths};
//!
//! let paths = StoragePaths::resolve().unwrap();
//! let config = Config::load(&paths).unwrap();
//! println!("registry: {}", config.registry_url());
//! println!("plugins:  {}", paths.plugin_dir().display());
//! ```
//!
//! # Registry URL precedence
//!
//! 1. `TOOLDOCK_REGISTRY_URL` environment variable (non-empty)
//! 2. `[registry] url` in `config.toml`
//! 3. The built-in default ([`DEFAULT_REGISTRY_URL`])
//!
//! This crate has no dependencies on other internal tooldock crates.

/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Resolution of the on-disk storage layout.
pub mod paths;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use paths::{APP_DIR_NAME, HOME_ENV_VAR, StoragePaths};
pub use types::*;

impl Config {
    /// Load `config.toml` from the storage root and apply environment overrides.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is malformed or the final
    /// configuration fails validation.
    pub fn load(paths: &StoragePaths) -> ConfigResult<Self> {
        loader::load(paths)
    }
}
