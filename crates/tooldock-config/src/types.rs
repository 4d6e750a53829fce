//! Configuration types for tooldock.
//!
//! Every struct implements [`Default`] so that a missing `config.toml`, or a
//! bare `[section]` header, produces a working configuration.

use serde::{Deserialize, Serialize};

/// Catalog source used when neither the environment nor `config.toml`
/// selects one.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/Saurav-Paul/tooldock-plugins/main/plugins.json";

/// Environment variable selecting an alternate catalog source.
pub const REGISTRY_URL_ENV_VAR: &str = "TOOLDOCK_REGISTRY_URL";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog source selection.
    pub registry: RegistrySection,
    /// Logging level, format, and per-target directives.
    pub logging: LoggingSection,
}

impl Config {
    /// The effective catalog source URL.
    ///
    /// The loader folds the environment override into `registry.url`, so
    /// this only has to fall back to the built-in default.
    #[must_use]
    pub fn registry_url(&self) -> &str {
        self.registry
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_REGISTRY_URL)
    }
}

// ---------------------------------------------------------------------------
// RegistrySection
// ---------------------------------------------------------------------------

/// Where the plugin catalog is fetched from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySection {
    /// Alternate catalog URL. `None` uses [`DEFAULT_REGISTRY_URL`].
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-target tracing directives (e.g. `["tooldock_registry=debug"]`).
    pub directives: Vec<String>,
    /// Write logs to daily files under `<root>/logs/` instead of stderr.
    pub file: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            file: false,
        }
    }
}
