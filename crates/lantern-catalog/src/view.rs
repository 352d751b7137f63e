//! View derivation: filter, search and sort over a [`Catalog`].
//!
//! The engine is a pure function of `(catalog, state, locale)`. The caller
//! owns the [`ViewState`] and re-runs [`FilterSortEngine::view`] after every
//! change.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::descriptor::PluginDescriptor;
use crate::error::{CatalogError, CatalogResult};
use crate::locale::Locale;

/// Sort order for a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by display name, collated for the active locale.
    #[default]
    Name,
}

impl SortKey {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            other => Err(CatalogError::UnknownSortKey(other.to_owned())),
        }
    }
}

/// User-driven view predicates. Lives as long as the browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Only show plugins declaring this category.
    pub active_category: Option<String>,
    /// Only show plugins whose name or description contains this text.
    pub search_query: String,
    /// Result ordering.
    pub sort_by: SortKey,
}

impl ViewState {
    /// Session-start state: all categories, no search, sorted by name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_category`](Self::set_category).
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(Some(category.into()));
        self
    }

    /// Builder form of [`set_search`](Self::set_search).
    #[must_use]
    pub fn with_search(mut self, query: &str) -> Self {
        self.set_search(query);
        self
    }

    /// Builder form of [`set_sort`](Self::set_sort).
    #[must_use]
    pub fn with_sort(mut self, sort_by: SortKey) -> Self {
        self.set_sort(sort_by);
        self
    }

    /// Select a category; `None` or an empty key selects all.
    pub fn set_category(&mut self, category: Option<String>) {
        self.active_category = category.filter(|c| !c.is_empty());
    }

    /// Replace the search query. Surrounding whitespace is ignored.
    pub fn set_search(&mut self, query: &str) {
        query.trim().clone_into(&mut self.search_query);
    }

    /// Change the ordering.
    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.sort_by = sort_by;
    }
}

/// Shown vs. total plugin counts for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    /// Plugins in the view.
    pub shown: usize,
    /// Plugins in the catalog.
    pub total: usize,
}

impl ViewSummary {
    /// Whether the view shows the whole catalog.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shown == self.total
    }

    /// Count line in the given locale's wording.
    #[must_use]
    pub fn describe(&self, locale: Locale) -> String {
        match (locale, self.is_complete()) {
            (Locale::ZhCn, true) => format!("共 {} 个插件", self.total),
            (Locale::ZhCn, false) => format!("显示 {} / {}", self.shown, self.total),
            (Locale::EnUs, _) => self.to_string(),
        }
    }
}

impl fmt::Display for ViewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            write!(f, "{} plugins", self.total)
        } else {
            write!(f, "showing {} / {}", self.shown, self.total)
        }
    }
}

/// Computes views for one locale.
pub struct FilterSortEngine {
    locale: Locale,
    collator: CollatorBorrowed<'static>,
}

impl fmt::Debug for FilterSortEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSortEngine")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl FilterSortEngine {
    /// Create an engine that resolves and collates text for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Collation`] if no collation data is available
    /// for the locale.
    pub fn new(locale: Locale) -> CatalogResult<Self> {
        let icu_locale = match locale {
            Locale::ZhCn => locale!("zh-CN"),
            Locale::EnUs => locale!("en-US"),
        };
        let collator = Collator::try_new(icu_locale.into(), CollatorOptions::default()).map_err(
            |e| CatalogError::Collation {
                locale,
                message: e.to_string(),
            },
        )?;
        Ok(Self { locale, collator })
    }

    /// The locale this engine resolves text for.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Compare two strings in the engine's collation order.
    #[must_use]
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }

    /// Derive the view for `state`.
    ///
    /// Steps, in order: keep plugins declaring the active category (exact
    /// key match); keep plugins whose resolved name or description contains
    /// the case-folded query; stable-sort by the requested key.
    #[must_use]
    pub fn view<'a>(&self, catalog: &'a Catalog, state: &ViewState) -> Vec<&'a PluginDescriptor> {
        let mut list: Vec<&PluginDescriptor> = catalog.plugins().iter().collect();

        if let Some(category) = state.active_category.as_deref() {
            list.retain(|p| p.has_category(category));
        }

        if !state.search_query.is_empty() {
            let needle = state.search_query.to_lowercase();
            list.retain(|p| self.matches_search(p, &needle));
        }

        match state.sort_by {
            SortKey::Name => list.sort_by(|a, b| {
                self.compare(a.display_name(self.locale), b.display_name(self.locale))
            }),
        }

        list
    }

    /// Counts for a view produced by [`view`](Self::view).
    #[must_use]
    pub fn summary(catalog: &Catalog, view: &[&PluginDescriptor]) -> ViewSummary {
        ViewSummary {
            shown: view.len(),
            total: catalog.len(),
        }
    }

    fn matches_search(&self, plugin: &PluginDescriptor, needle: &str) -> bool {
        plugin
            .display_name(self.locale)
            .to_lowercase()
            .contains(needle)
            || plugin
                .display_description(self.locale)
                .to_lowercase()
                .contains(needle)
    }
}
