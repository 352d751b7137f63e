//! Tolerant field deserializers for published documents.
//!
//! A value of the wrong shape (including `null`) decodes as the field's
//! default instead of failing the whole document.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// A value of type `T`, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum OrIgnored<T> {
    Value(T),
    Ignored(#[allow(dead_code)] IgnoredAny),
}

impl<T> OrIgnored<T> {
    pub(crate) fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Ignored(_) => None,
        }
    }
}

/// Decode `T`, or `T::default()` when the value does not fit.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(OrIgnored::<T>::deserialize(deserializer)?
        .into_value()
        .unwrap_or_default())
}

/// Decode a list of strings, skipping non-string items. Anything that is not
/// a list decodes as empty.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<OrIgnored<String>> = or_default(deserializer)?;
    Ok(items.into_iter().filter_map(OrIgnored::into_value).collect())
}
