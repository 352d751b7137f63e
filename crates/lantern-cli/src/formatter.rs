//! Output projections shared by the commands.
//!
//! Pretty output is written by each command with [`Theme`](crate::theme::Theme);
//! JSON output serializes the projections below, one document per render.

use anyhow::{Context, Result};
use clap::ValueEnum;
use lantern_catalog::{Catalog, Locale, PermissionRisk, PluginDescriptor, ViewSummary};
use serde::Serialize;

/// Output format mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Styled terminal output.
    #[default]
    Pretty,
    /// JSON documents on stdout.
    Json,
}

/// One row of a listing.
#[derive(Debug, Serialize)]
pub(crate) struct PluginRow<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) version: Option<&'a str>,
    pub(crate) categories: Vec<&'a str>,
    pub(crate) author: &'a str,
}

impl<'a> PluginRow<'a> {
    pub(crate) fn new(catalog: &'a Catalog, plugin: &'a PluginDescriptor, locale: Locale) -> Self {
        Self {
            id: &plugin.id,
            name: plugin.display_name(locale),
            description: plugin.display_description(locale),
            version: plugin.version.as_deref(),
            categories: category_labels(catalog, plugin, locale),
            author: plugin.author_name(),
        }
    }
}

/// A whole listing: the rows plus the count line.
#[derive(Debug, Serialize)]
pub(crate) struct Listing<'a> {
    pub(crate) locale: &'static str,
    #[serde(flatten)]
    pub(crate) summary: ViewSummary,
    pub(crate) plugins: Vec<PluginRow<'a>>,
}

/// A requested permission and how risky it is.
#[derive(Debug, Serialize)]
pub(crate) struct PermissionEntry<'a> {
    pub(crate) key: &'a str,
    pub(crate) risk: PermissionRisk,
}

/// Full detail for `show`.
#[derive(Debug, Serialize)]
pub(crate) struct PluginDetail<'a> {
    #[serde(flatten)]
    pub(crate) row: PluginRow<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) author_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) download: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) icon: Option<String>,
    pub(crate) permissions: Vec<PermissionEntry<'a>>,
    pub(crate) source_path: &'a str,
}

impl<'a> PluginDetail<'a> {
    pub(crate) fn new(catalog: &'a Catalog, plugin: &'a PluginDescriptor, locale: Locale) -> Self {
        Self {
            row: PluginRow::new(catalog, plugin, locale),
            author_url: plugin
                .author
                .as_ref()
                .map(|a| a.url.as_str())
                .filter(|u| !u.is_empty()),
            repo: plugin.repo_link(),
            download: plugin.download_link(),
            icon: plugin.icon_location(),
            permissions: plugin
                .permissions
                .iter()
                .map(|key| PermissionEntry {
                    key,
                    risk: PermissionRisk::classify(key),
                })
                .collect(),
            source_path: &plugin.source_path,
        }
    }
}

/// An in-use category with its label and member count.
#[derive(Debug, Serialize)]
pub(crate) struct CategoryRow<'a> {
    pub(crate) key: &'a str,
    pub(crate) label: &'a str,
    pub(crate) count: usize,
}

/// Labels for a plugin's categories, in declaration order.
pub(crate) fn category_labels<'a>(
    catalog: &'a Catalog,
    plugin: &'a PluginDescriptor,
    locale: Locale,
) -> Vec<&'a str> {
    plugin
        .categories
        .iter()
        .map(|key| catalog.category_label(key, locale))
        .collect()
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
