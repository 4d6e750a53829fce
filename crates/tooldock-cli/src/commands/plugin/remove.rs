//! `tooldock plugin remove <name>` (aliases `uninstall`, `rm`).

use tooldock_registry::PluginManager;

use crate::theme::Theme;

pub(crate) fn remove_plugin(manager: &PluginManager, name: &str) -> anyhow::Result<()> {
    manager.remove(name)?;
    println!("{}", Theme::success(&format!("Successfully removed {name}")));
    Ok(())
}
