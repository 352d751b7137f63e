//! `lantern categories`: categories that at least one plugin declares.

use anyhow::Result;

use crate::formatter::{self, CategoryRow, OutputFormat};
use crate::market::Market;
use crate::theme::Theme;

/// In-use categories with their labels and member counts.
pub(crate) fn category_rows(market: &Market) -> Vec<CategoryRow<'_>> {
    let locale = market.locale();
    market
        .catalog
        .categories_in_use()
        .into_iter()
        .map(|key| CategoryRow {
            key,
            label: market.catalog.category_label(key, locale),
            count: market.catalog.count_in_category(key),
        })
        .collect()
}

/// Print the in-use categories.
pub(crate) fn list_categories(market: &Market, output: OutputFormat) -> Result<()> {
    let rows = category_rows(market);

    if output == OutputFormat::Json {
        return formatter::print_json(&rows);
    }

    if rows.is_empty() {
        println!("{}", Theme::info("No categories in use"));
        return Ok(());
    }

    println!("  {:<20} {:<20} {:>7}", "KEY", "LABEL", "PLUGINS");
    println!("{}", Theme::separator());
    for row in &rows {
        println!("  {:<20} {:<20} {:>7}", row.key, row.label, row.count);
    }
    Ok(())
}
