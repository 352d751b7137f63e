//! Locale detection and localized string resolution.
//!
//! The market speaks exactly two locales. Every display string goes through
//! the same chain: requested locale, then [`DEFAULT_LOCALE`], then a
//! caller-supplied last resort (the plugin id or the raw category key).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient::OrIgnored;

/// The canonical locale every descriptor is expected to carry.
pub const DEFAULT_LOCALE: Locale = Locale::ZhCn;

/// Environment variables consulted by [`Locale::from_env`], highest priority
/// first (POSIX precedence).
const LOCALE_ENV_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

/// A display locale supported by the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Simplified Chinese (`zh-CN`).
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// US English (`en-US`).
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// The BCP 47 tag used as a key in localized mappings.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    /// Map a runtime language tag onto a market locale.
    ///
    /// Any tag starting with `zh` (ASCII case-insensitive, so `zh_TW.UTF-8`
    /// and `zh-Hant` qualify) is [`Locale::ZhCn`]; every other tag is
    /// [`Locale::EnUs`]. A missing or blank tag falls back to
    /// [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn detect(tag: Option<&str>) -> Self {
        let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
            return DEFAULT_LOCALE;
        };
        let is_chinese = tag
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("zh"));
        if is_chinese { Self::ZhCn } else { Self::EnUs }
    }

    /// Detect the locale from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let tag = LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty());
        Self::detect(tag.as_deref())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A display string that may vary by locale.
///
/// Published documents use either a plain string (same text for every
/// locale) or an object keyed by locale tag. Non-string entries in the
/// object are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// One string for all locales.
    Plain(String),
    /// Locale tag → string.
    PerLocale(BTreeMap<String, String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedWire {
    Plain(String),
    PerLocale(BTreeMap<String, OrIgnored<String>>),
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match LocalizedWire::deserialize(deserializer)? {
            LocalizedWire::Plain(text) => Self::Plain(text),
            LocalizedWire::PerLocale(map) => Self::PerLocale(
                map.into_iter()
                    .filter_map(|(tag, text)| Some((tag, text.into_value()?)))
                    .collect(),
            ),
        })
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::PerLocale(BTreeMap::new())
    }
}

impl LocalizedText {
    /// Build a per-locale text from `(tag, text)` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::PerLocale(
            pairs
                .into_iter()
                .map(|(tag, text)| (tag.to_owned(), text.to_owned()))
                .collect(),
        )
    }

    /// Look up the text for `locale`, falling back to [`DEFAULT_LOCALE`].
    ///
    /// Empty strings count as missing.
    #[must_use]
    pub fn lookup(&self, locale: Locale) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text.as_str()).filter(|t| !t.is_empty()),
            Self::PerLocale(map) => [locale, DEFAULT_LOCALE]
                .into_iter()
                .filter_map(|l| map.get(l.tag()))
                .map(String::as_str)
                .find(|t| !t.is_empty()),
        }
    }

    /// Resolve the text for `locale`, using `fallback` when neither the
    /// requested nor the default locale has a non-empty entry.
    #[must_use]
    pub fn resolve<'a>(&'a self, locale: Locale, fallback: &'a str) -> &'a str {
        self.lookup(locale).unwrap_or(fallback)
    }

    /// Whether no locale has any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.is_empty(),
            Self::PerLocale(map) => map.values().all(String::is_empty),
        }
    }
}
