//! `lantern show <id>`: detail view of one plugin.

use anyhow::{Result, bail};
use lantern_catalog::PermissionRisk;

use crate::formatter::{self, OutputFormat, PluginDetail};
use crate::market::Market;
use crate::theme::Theme;

/// Print everything the market publishes about `id`.
pub(crate) fn show_plugin(market: &Market, id: &str, output: OutputFormat) -> Result<()> {
    let Some(plugin) = market.catalog.get(id) else {
        bail!("no plugin with id '{id}' in the market");
    };
    let detail = PluginDetail::new(&market.catalog, plugin, market.locale());

    if output == OutputFormat::Json {
        return formatter::print_json(&detail);
    }

    println!("{}", Theme::header(&format!("Plugin: {}", detail.row.name)));
    println!("{}", Theme::kv("ID", detail.row.id));
    if let Some(version) = detail.row.version {
        println!("{}", Theme::kv("Version", version));
    }
    if !detail.row.description.is_empty() {
        println!("{}", Theme::kv("Description", detail.row.description));
    }
    if !detail.row.categories.is_empty() {
        println!(
            "{}",
            Theme::kv("Categories", &detail.row.categories.join(", "))
        );
    }
    match detail.author_url {
        Some(url) => println!(
            "{}",
            Theme::kv("Author", &format!("{} <{url}>", detail.row.author))
        ),
        None => println!("{}", Theme::kv("Author", detail.row.author)),
    }
    if let Some(repo) = &detail.repo {
        println!("{}", Theme::kv("Repository", repo));
    }
    if let Some(download) = &detail.download {
        println!("{}", Theme::kv("Download", download));
    }
    if let Some(icon) = &detail.icon {
        println!("{}", Theme::kv("Icon", icon));
    }

    if !detail.permissions.is_empty() {
        println!("{}", Theme::prompt("Permissions:"));
        for entry in &detail.permissions {
            println!(
                "  - {} {}",
                Theme::permission(entry.key, entry.risk),
                Theme::dimmed(&format!("({})", entry.risk.as_str()))
            );
        }
        if detail
            .permissions
            .iter()
            .any(|p| p.risk == PermissionRisk::Critical)
        {
            println!(
                "{}",
                Theme::warning("This plugin can run programs or reach into the plugin folder")
            );
        }
    }

    Ok(())
}
