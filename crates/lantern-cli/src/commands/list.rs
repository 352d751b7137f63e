//! `lantern list`: one-shot filtered, sorted listing.

use anyhow::Result;
use lantern_catalog::{FilterSortEngine, ViewState};

use crate::formatter::{self, Listing, OutputFormat, PluginRow};
use crate::market::Market;
use crate::theme::Theme;

/// Print the view for `state` in the requested format.
pub(crate) fn render_view(market: &Market, state: &ViewState, output: OutputFormat) -> Result<()> {
    let locale = market.locale();
    let view = market.engine.view(&market.catalog, state);
    let summary = FilterSortEngine::summary(&market.catalog, &view);
    let rows: Vec<PluginRow<'_>> = view
        .iter()
        .map(|plugin| PluginRow::new(&market.catalog, plugin, locale))
        .collect();

    if output == OutputFormat::Json {
        return formatter::print_json(&Listing {
            locale: locale.tag(),
            summary,
            plugins: rows,
        });
    }

    if rows.is_empty() {
        println!("{}", Theme::info(&summary.describe(locale)));
        return Ok(());
    }

    println!(
        "  {:<24} {:<28} {:<10} CATEGORIES",
        "ID", "NAME", "VERSION"
    );
    println!("{}", Theme::separator());
    for row in &rows {
        println!(
            "  {:<24} {:<28} {:<10} {}",
            Theme::plugin_id(row.id),
            row.name,
            row.version.unwrap_or("-"),
            row.categories.join(", ")
        );
        if !row.description.is_empty() {
            println!("  {}", Theme::dimmed(row.description));
        }
    }
    println!("\n{}", Theme::dimmed(&summary.describe(locale)));
    Ok(())
}
