//! CLI theme and styling.

use colored::Colorize;
use lantern_catalog::PermissionRisk;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
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

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a prompt.
    pub(crate) fn prompt(text: &str) -> String {
        format!("{}", text.bold())
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(50).dimmed().to_string()
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {}", key.bold(), value)
    }

    /// Format a plugin id.
    pub(crate) fn plugin_id(id: &str) -> String {
        format!("{}", id.cyan())
    }

    /// Format a permission key by risk.
    pub(crate) fn permission(key: &str, risk: PermissionRisk) -> String {
        match risk {
            PermissionRisk::Normal => key.to_owned(),
            PermissionRisk::Dangerous => key.yellow().to_string(),
            PermissionRisk::Critical => key.red().bold().to_string(),
        }
    }
}
