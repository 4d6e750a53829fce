//! `tooldock plugin install <name>`.

use anyhow::Context;
use tooldock_registry::{PluginManager, RegistryError};

use crate::theme::Theme;

pub(crate) async fn install_plugin(manager: &PluginManager, name: &str) -> anyhow::Result<()> {
    let descriptor = match manager.prepare_install(name).await {
        Ok(d) => d,
        Err(RegistryError::AlreadyInstalled { .. }) => {
            print_already_installed(name);
            return Ok(());
        },
        Err(e @ (RegistryError::RegistryUnavailable { .. } | RegistryError::RegistryFormat { .. })) => {
            return Err(e).context("failed to fetch plugin registry");
        },
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}",
        Theme::info(&format!(
            "Installing {} v{}...",
            descriptor.name, descriptor.version
        ))
    );

    manager
        .install_descriptor(&descriptor)
        .await
        .context("failed to install plugin")?;

    println!(
        "{}",
        Theme::success(&format!("Successfully installed {}", descriptor.name))
    );
    println!(
        "{}",
        Theme::hint(&format!("Usage: tooldock {} [args...]", descriptor.name))
    );
    Ok(())
}

fn print_already_installed(name: &str) {
    println!(
        "{}",
        Theme::warning(&format!("Plugin '{name}' is already installed"))
    );
    println!(
        "{}",
        Theme::hint(&format!("Use 'tooldock plugin update {name}' to update it"))
    );
}
