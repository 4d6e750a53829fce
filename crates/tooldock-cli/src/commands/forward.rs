//! Dispatch of `tooldock <plugin> [args...]` to installed plugin executables.

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::bail;
use tooldock_registry::{InstallationStore, exit_code, run_plugin};
use tracing::debug;

/// Top-level words handled by the built-in command parser.
const RESERVED: &[&str] = &["plugin", "help", "version"];

/// The plugin name to forward to, if `first` is neither a flag nor a built-in command.
pub(crate) fn forward_target(first: &OsString) -> Option<&str> {
    let word = first.to_str()?;
    if word.is_empty() || word.starts_with('-') || RESERVED.contains(&word) {
        return None;
    }
    Some(word)
}

/// Run the installed plugin `name` and translate its exit status.
pub(crate) async fn run_forwarded(
    store: &InstallationStore,
    name: &str,
    args: &[OsString],
) -> anyhow::Result<ExitCode> {
    if !store.is_installed(name) {
        bail!("plugin '{name}' is not installed. Install it with: tooldock plugin install {name}");
    }

    let status = run_plugin(store, name, args).await?;
    let code = u8::try_from(exit_code(status)).unwrap_or(1);
    debug!(plugin = name, code, "forwarded invocation finished");
    Ok(ExitCode::from(code))
}
