//! Registry and installation error types.

use std::path::PathBuf;

/// Errors from catalog, cache, store and installer operations.
///
/// Every variant carries the plugin name, URL or path it concerns so callers
/// can branch on the kind without inspecting message text.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The catalog source could not be reached or answered with a non-success status.
    #[error("failed to fetch registry from {url}: {message}")]
    RegistryUnavailable {
        /// Catalog source URL.
        url: String,
        /// Transport failure description.
        message: String,
    },

    /// The catalog payload is not valid catalog JSON.
    #[error("failed to parse registry from {origin}: {message}")]
    RegistryFormat {
        /// Where the payload came from (URL or cache path).
        origin: String,
        /// Decoder error message.
        message: String,
    },

    /// No catalog entry has this exact name.
    #[error("plugin '{name}' not found in registry")]
    NotFound {
        /// Requested plugin name.
        name: String,
    },

    /// The plugin is not present in the installation directory.
    #[error("plugin '{name}' is not installed")]
    NotInstalled {
        /// Requested plugin name.
        name: String,
    },

    /// The plugin is already present in the installation directory.
    #[error("plugin '{name}' is already installed")]
    AlreadyInstalled {
        /// Requested plugin name.
        name: String,
    },

    /// Downloaded content does not match the declared checksum.
    #[error("checksum mismatch for {name}: expected {expected}, got {actual}")]
    Integrity {
        /// Plugin whose artifact failed verification.
        name: String,
        /// Checksum declared in the catalog.
        expected: String,
        /// Checksum of the downloaded bytes.
        actual: String,
    },

    /// The artifact could not be downloaded.
    #[error("failed to download {name} from {url}: {message}")]
    DownloadFailed {
        /// Plugin being downloaded.
        name: String,
        /// Artifact URL.
        url: String,
        /// Transport failure description.
        message: String,
    },

    /// The artifact could not be placed in the installation directory.
    #[error("failed to write plugin {name} to {}: {source}", .path.display())]
    WriteFailed {
        /// Plugin being written.
        name: String,
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The installed artifact could not be deleted.
    #[error("failed to remove plugin {name} at {}: {source}", .path.display())]
    RemovalFailed {
        /// Plugin being removed.
        name: String,
        /// Path that could not be deleted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The installation directory exists but cannot be enumerated.
    #[error("failed to read installation directory {}: {source}", .path.display())]
    StoreUnreadable {
        /// Installation directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A plugin name cannot be used as a file name in the installation directory.
    #[error("invalid plugin name '{name}': {reason}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Why the name is rejected.
        reason: String,
    },

    /// The registry snapshot could not be written. Never terminal.
    #[error("failed to write registry cache {}: {message}", .path.display())]
    CacheWrite {
        /// Cache file path.
        path: PathBuf,
        /// Failure description.
        message: String,
    },

    /// The plugin executable could not be started.
    #[error("failed to run plugin {name} ({}): {source}", .path.display())]
    SpawnFailed {
        /// Plugin being run.
        name: String,
        /// Executable path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
