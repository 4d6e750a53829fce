//! `tooldock plugin search <query>`.

use anyhow::Context;
use tooldock_registry::PluginManager;

use crate::theme::Theme;

pub(crate) async fn search_plugins(manager: &PluginManager, query: &str) -> anyhow::Result<()> {
    let hits = manager
        .search(query)
        .await
        .context("failed to fetch plugin registry")?;

    println!(
        "{}",
        Theme::header(&format!("Search results for '{}':", query.to_lowercase()))
    );
    println!();

    if hits.is_empty() {
        println!("No plugins found matching your query.");
    } else {
        for listing in &hits {
            println!("{}", Theme::plugin_row(listing));
        }
    }

    println!();
    Ok(())
}
