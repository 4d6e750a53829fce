//! `tooldock plugin update <name>`.

use anyhow::Context;
use tooldock_registry::{PluginManager, RegistryError};

use crate::theme::Theme;

pub(crate) async fn update_plugin(manager: &PluginManager, name: &str) -> anyhow::Result<()> {
    let descriptor = match manager.prepare_update(name).await {
        Ok(d) => d,
        Err(e @ (RegistryError::RegistryUnavailable { .. } | RegistryError::RegistryFormat { .. })) => {
            return Err(e).context("failed to fetch plugin registry");
        },
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}",
        Theme::info(&format!(
            "Updating {} to v{}...",
            descriptor.name, descriptor.version
        ))
    );

    manager
        .apply_update(&descriptor)
        .await
        .map_err(|e| apply_failure(name, e))?;

    println!(
        "{}",
        Theme::success(&format!(
            "Successfully updated {} to v{}",
            descriptor.name, descriptor.version
        ))
    );
    Ok(())
}

/// Add the reinstall hint only once the old copy is gone.
fn apply_failure(name: &str, err: RegistryError) -> anyhow::Error {
    match err {
        e @ RegistryError::RemovalFailed { .. } => {
            anyhow::Error::new(e).context("failed to update plugin; the installed version was kept")
        },
        e => anyhow::Error::new(e).context(format!(
            "failed to update plugin; {name} is no longer installed, reinstall it with: tooldock plugin install {name}"
        )),
    }
}
