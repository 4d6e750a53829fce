//! `tooldock plugin list`: every catalog entry with its install state.

use anyhow::Context;
use tooldock_registry::PluginManager;

use crate::theme::Theme;

pub(crate) async fn list_plugins(manager: &PluginManager) -> anyhow::Result<()> {
    let listings = manager
        .list()
        .await
        .context("failed to fetch plugin registry")?;

    println!("{}", Theme::header("Available plugins:"));
    println!();

    if listings.is_empty() {
        println!("{}", Theme::info("The registry has no plugins"));
        return Ok(());
    }

    for listing in &listings {
        println!("{}", Theme::plugin_row(listing));
    }

    println!();
    println!("{}", Theme::dimmed("✓ = installed"));
    Ok(())
}
