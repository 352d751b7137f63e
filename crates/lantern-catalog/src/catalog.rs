//! The loaded, immutable plugin catalog.

use std::collections::HashSet;

use crate::category::{CategoryRegistry, category_label};
use crate::descriptor::PluginDescriptor;
use crate::locale::Locale;

/// Every plugin that survived loading, plus the category labels loaded
/// alongside them.
///
/// Built once by [`CatalogLoader`](crate::CatalogLoader) and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    plugins: Vec<PluginDescriptor>,
    registry: CategoryRegistry,
}

impl Catalog {
    /// Assemble a catalog.
    #[must_use]
    pub fn new(plugins: Vec<PluginDescriptor>, registry: CategoryRegistry) -> Self {
        Self { plugins, registry }
    }

    /// All plugins, in load order.
    #[must_use]
    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    /// Number of plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether the catalog has no plugins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Look up a plugin by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Category keys declared by at least one plugin, in first-seen order.
    ///
    /// Registry keys that no plugin declares are not listed.
    #[must_use]
    pub fn categories_in_use(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.plugins
            .iter()
            .flat_map(|p| p.categories.iter().map(String::as_str))
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Number of plugins declaring `key`.
    #[must_use]
    pub fn count_in_category(&self, key: &str) -> usize {
        self.plugins.iter().filter(|p| p.has_category(key)).count()
    }

    /// Display label for a category key.
    #[must_use]
    pub fn category_label<'a>(&'a self, key: &'a str, locale: Locale) -> &'a str {
        category_label(key, &self.registry, locale)
    }
}
