//! Category label registry.
//!
//! The registry only translates category keys into display labels. Which
//! categories exist is decided by the descriptors themselves; see
//! [`Catalog::categories_in_use`](crate::Catalog::categories_in_use).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient::OrIgnored;
use crate::locale::{Locale, LocalizedText};

/// Category key → localized label.
///
/// Entries whose value is not a label (`null`, numbers, lists) are dropped
/// on load, so their keys display as themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    labels: HashMap<String, LocalizedText>,
}

impl<'de> Deserialize<'de> for CategoryRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = HashMap::<String, OrIgnored<LocalizedText>>::deserialize(deserializer)?;
        Ok(Self {
            labels: entries
                .into_iter()
                .filter_map(|(key, label)| Some((key, label.into_value()?)))
                .collect(),
        })
    }
}

impl CategoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the label for `key`.
    pub fn insert(&mut self, key: impl Into<String>, label: LocalizedText) {
        self.labels.insert(key.into(), label);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, label: LocalizedText) -> Self {
        self.insert(key, label);
        self
    }

    /// Raw label entry for `key`, if registered.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LocalizedText> {
        self.labels.get(key)
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Display label for `key` in `locale`. See [`category_label`].
    #[must_use]
    pub fn label<'a>(&'a self, key: &'a str, locale: Locale) -> &'a str {
        category_label(key, self, locale)
    }
}

/// Display label for a category key.
///
/// Unregistered keys, and registered keys with no usable text, are shown as
/// the key itself.
#[must_use]
pub fn category_label<'a>(key: &'a str, registry: &'a CategoryRegistry, locale: Locale) -> &'a str {
    registry
        .get(key)
        .map_or(key, |label| label.resolve(locale, key))
}
