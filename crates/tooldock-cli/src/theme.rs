//! CLI theme and styling.

use colored::Colorize;
use tooldock_registry::PluginListing;

/// Width of the name column in plugin tables.
const NAME_WIDTH: usize = 15;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a hint.
    pub(crate) fn hint(text: &str) -> String {
        format!("  {}", text.dimmed())
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// One catalog row: install mark, padded name, description and version.
    pub(crate) fn plugin_row(listing: &PluginListing) -> String {
        let mark = if listing.installed {
            format!("{} ", "✓".green())
        } else {
            "  ".to_string()
        };
        let d = &listing.descriptor;
        format!(
            "{mark}{:<width$} {} (v{})",
            d.name,
            d.description,
            d.version,
            width = NAME_WIDTH
        )
    }
}
