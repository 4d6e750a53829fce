use thiserror::Error;

/// Errors from path resolution and configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The host environment offers no resolvable home directory.
    #[error("cannot resolve storage location: {0}")]
    PathResolution(String),

    /// A config file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadError {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config file is not valid TOML or does not match the schema.
    #[error("failed to parse {path}: {source}")]
    ParseError {
        /// Path of the file.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A field holds a value outside its accepted range.
    #[error("invalid value for {field}: {message}")]
    ValidationError {
        /// Dotted field path (e.g. `registry.url`).
        field: String,
        /// What is wrong with the value.
        message: String,
    },

    /// A storage directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
