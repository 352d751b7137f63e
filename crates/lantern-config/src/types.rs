//! Configuration types for the Lantern tools.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header yields a working section.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the market documents live and how to fetch them.
    pub catalog: CatalogSection,
    /// Browsing defaults (locale, search debounce, sort order).
    pub view: ViewSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// CatalogSection
// ---------------------------------------------------------------------------

/// Market location and transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Market root. `http://` or `https://` roots are fetched over HTTP,
    /// anything else is read as a local directory.
    pub source: String,
    /// Location of the index document, relative to `source`.
    pub index_path: String,
    /// Location of the category registry, relative to `source`.
    pub registry_path: String,
    /// Per-request timeout for HTTP sources.
    pub http_timeout_secs: u64,
    /// User agent sent by HTTP sources. Unset means the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            source: ".".to_owned(),
            index_path: "api/plugins.json".to_owned(),
            registry_path: "api/categories.json".to_owned(),
            http_timeout_secs: 30,
            user_agent: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewSection
// ---------------------------------------------------------------------------

/// Browsing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSection {
    /// Pinned language tag. Unset means detect from the environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Quiescence window for interactive search input.
    pub search_debounce_ms: u64,
    /// Default sort key.
    pub sort: String,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            locale: None,
            search_debounce_ms: 250,
            sort: "name".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["lantern_catalog=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}
