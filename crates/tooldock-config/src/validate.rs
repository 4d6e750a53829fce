//! Post-load configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Log formats understood by the telemetry crate.
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json", "full"];

/// Validate a fully-loaded configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_registry(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_registry(config: &Config) -> ConfigResult<()> {
    let url = config.registry_url();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigError::ValidationError {
            field: "registry.url".to_owned(),
            message: format!("'{url}' must be an http:// or https:// URL"),
        });
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let format = config.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported format '{format}'; expected one of: {}",
                LOG_FORMATS.join(", ")
            ),
        });
    }
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: "must not be empty".to_owned(),
        });
    }
    Ok(())
}
