//! Forwarding an invocation to an installed plugin executable.

use std::ffi::OsString;
use std::process::{ExitStatus, Stdio};

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::store::InstallationStore;

/// Run the installed plugin `name` with `args`, inheriting stdin, stdout and stderr.
///
/// Waits for the child and returns its exit status. A non-zero exit is not an error.
///
/// # Errors
///
/// - [`RegistryError::NotInstalled`] if `name` is not installed
/// - [`RegistryError::SpawnFailed`] if the executable cannot be started
pub async fn run_plugin(
    store: &InstallationStore,
    name: &str,
    args: &[OsString],
) -> RegistryResult<ExitStatus> {
    let path = store.resolve(name).ok_or_else(|| RegistryError::NotInstalled {
        name: name.to_string(),
    })?;

    debug!(name, path = %path.display(), args = args.len(), "running plugin");

    let spawn_err = |source: std::io::Error| RegistryError::SpawnFailed {
        name: name.to_string(),
        path: path.clone(),
        source,
    };

    let mut child = tokio::process::Command::new(&path)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(spawn_err)?;

    let status = child.wait().await.map_err(spawn_err)?;
    debug!(name, status = %status, "plugin exited");
    Ok(status)
}

/// Process exit code to report for a finished plugin.
///
/// The child's own code, or 1 when it was terminated by a signal.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
