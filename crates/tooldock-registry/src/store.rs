//! The installation directory: one executable file per installed plugin.
//!
//! Hidden entries and subdirectories are ignored. A plugin is installed iff
//! `<dir>/<name>` is a regular file.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use tooldock_config::StoragePaths;
use tracing::{debug, info};

use crate::error::{RegistryError, RegistryResult};

/// Check that `name` can be used as a file name inside the installation directory.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidName`] for empty names, names starting with
/// `.`, and names containing a path separator or NUL.
pub fn validate_name(name: &str) -> RegistryResult<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.starts_with('.') {
        "name must not start with '.'"
    } else if name.contains(['/', '\\']) {
        "name must not contain a path separator"
    } else if name.contains('\0') {
        "name must not contain NUL"
    } else {
        return Ok(());
    };

    Err(RegistryError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

/// Owner of the installation directory's contents.
#[derive(Debug, Clone)]
pub struct InstallationStore {
    dir: PathBuf,
}

impl InstallationStore {
    /// Store rooted at `dir`. The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at the standard location under the storage root.
    #[must_use]
    pub fn from_paths(paths: &StoragePaths) -> Self {
        Self::new(paths.plugin_dir())
    }

    /// Installation directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of installed plugins, sorted.
    ///
    /// A missing directory is an empty set. Entries whose names are not
    /// valid UTF-8 are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StoreUnreadable`] if the directory exists but
    /// cannot be enumerated.
    pub fn list(&self) -> RegistryResult<BTreeSet<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(source) => {
                return Err(RegistryError::StoreUnreadable {
                    path: self.dir.clone(),
                    source,
                });
            },
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| RegistryError::StoreUnreadable {
                path: self.dir.clone(),
                source,
            })?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            names.insert(name);
        }
        Ok(names)
    }

    /// Whether `<dir>/<name>` exists and is a regular file.
    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Path of the installed executable for `name`, if installed.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        validate_name(name).ok()?;
        let path = self.dir.join(name);
        std::fs::metadata(&path)
            .is_ok_and(|m| m.is_file())
            .then_some(path)
    }

    /// Atomically place `content` at `<dir>/<name>`, replacing any existing file.
    ///
    /// The bytes go to a temporary file in the same directory, receive their
    /// permissions (0755 when `executable`, else 0644 on Unix), are synced, and
    /// are renamed over the destination.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] for unsafe names and
    /// [`RegistryError::WriteFailed`] for any I/O failure.
    pub fn write(&self, name: &str, content: &[u8], executable: bool) -> RegistryResult<PathBuf> {
        validate_name(name)?;
        let path = self.dir.join(name);
        let write_err = |source: std::io::Error| RegistryError::WriteFailed {
            name: name.to_string(),
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(content).map_err(write_err)?;
        set_mode(tmp.as_file(), executable).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        debug!(name, path = %path.display(), bytes = content.len(), "wrote plugin");
        Ok(path)
    }

    /// Delete the installed file for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotInstalled`] if absent and
    /// [`RegistryError::RemovalFailed`] for any other I/O failure.
    pub fn remove(&self, name: &str) -> RegistryResult<()> {
        validate_name(name)?;
        let path = self.dir.join(name);

        match std::fs::metadata(&path) {
            Ok(m) if m.is_file() => {},
            Ok(_) => {
                return Err(RegistryError::NotInstalled {
                    name: name.to_string(),
                });
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RegistryError::NotInstalled {
                    name: name.to_string(),
                });
            },
            Err(source) => {
                return Err(RegistryError::RemovalFailed {
                    name: name.to_string(),
                    path,
                    source,
                });
            },
        }

        std::fs::remove_file(&path).map_err(|source| RegistryError::RemovalFailed {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;

        info!(name, "removed plugin");
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(file: &std::fs::File, executable: bool) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if executable { 0o755 } else { 0o644 };
    file.set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &std::fs::File, _executable: bool) -> std::io::Result<()> {
    Ok(())
}
