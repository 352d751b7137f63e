//! Plugin descriptor types.
//!
//! A [`RawDescriptor`] is what a plugin author publishes. It becomes a
//! [`PluginDescriptor`] once it has a non-empty `id` and is tagged with the
//! path it was loaded from.

use serde::{Deserialize, Serialize};

use crate::inference::GITHUB_BASE;
use crate::lenient::{or_default, string_list};
use crate::locale::{Locale, LocalizedText};

/// Author name shown when a descriptor has no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Plugin author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    /// Profile URL.
    #[serde(default, deserialize_with = "or_default")]
    pub url: String,
}

impl Author {
    /// Author whose profile lives on GitHub under `login`.
    #[must_use]
    pub fn github(login: &str) -> Self {
        Self {
            name: login.to_owned(),
            url: format!("{GITHUB_BASE}/{login}"),
        }
    }
}

/// A descriptor document exactly as published.
///
/// Every field is optional at this stage and unknown fields are ignored.
/// Apart from `id`, a field that is `null` or of the wrong type reads as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDescriptor {
    /// Unique plugin key.
    pub id: Option<String>,
    /// Localized display name.
    #[serde(deserialize_with = "or_default")]
    pub name: LocalizedText,
    /// Localized description.
    #[serde(deserialize_with = "or_default")]
    pub description: LocalizedText,
    /// Category keys declared by the plugin.
    #[serde(deserialize_with = "string_list")]
    pub categories: Vec<String>,
    /// Release version.
    #[serde(deserialize_with = "or_default")]
    pub version: Option<String>,
    /// Source repository in `owner/name` form.
    #[serde(deserialize_with = "or_default")]
    pub repo: Option<String>,
    /// Plugin author.
    #[serde(deserialize_with = "or_default")]
    pub author: Option<Author>,
    /// Permission keys the plugin requests.
    #[serde(deserialize_with = "string_list")]
    pub permissions: Vec<String>,
    /// Icon path, relative to the descriptor's directory.
    #[serde(deserialize_with = "or_default")]
    pub icon_url: Option<String>,
    /// Explicit download location.
    #[serde(deserialize_with = "or_default")]
    pub download_url: Option<String>,
}

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    /// Unique plugin key. Never empty.
    pub id: String,
    /// Localized display name.
    pub name: LocalizedText,
    /// Localized description.
    pub description: LocalizedText,
    /// Category keys, deduplicated in declaration order.
    pub categories: Vec<String>,
    /// Release version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Source repository in `owner/name` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Plugin author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Permission keys the plugin requests.
    pub permissions: Vec<String>,
    /// Icon path, relative to the descriptor's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Explicit download location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Location the descriptor was loaded from, relative to the catalog root.
    #[serde(rename = "_sourcePath")]
    pub source_path: String,
}

impl PluginDescriptor {
    /// Validate a raw descriptor. Returns `None` when `id` is missing or
    /// empty.
    #[must_use]
    pub fn from_raw(raw: RawDescriptor, source_path: impl Into<String>) -> Option<Self> {
        let id = raw.id.filter(|id| !id.trim().is_empty())?;

        let mut categories: Vec<String> = Vec::with_capacity(raw.categories.len());
        for key in raw.categories {
            if !categories.contains(&key) {
                categories.push(key);
            }
        }

        Some(Self {
            id,
            name: raw.name,
            description: raw.description,
            categories,
            version: raw.version,
            repo: raw.repo.filter(|r| !r.is_empty()),
            author: raw.author,
            permissions: raw.permissions,
            icon_url: raw.icon_url.filter(|u| !u.is_empty()),
            download_url: raw.download_url.filter(|u| !u.is_empty()),
            source_path: source_path.into(),
        })
    }

    /// Name in `locale`; falls back to the id.
    #[must_use]
    pub fn display_name(&self, locale: Locale) -> &str {
        self.name.resolve(locale, &self.id)
    }

    /// Description in `locale`; empty when none is published.
    #[must_use]
    pub fn display_description(&self, locale: Locale) -> &str {
        self.description.resolve(locale, "")
    }

    /// Whether the plugin declares `key`.
    #[must_use]
    pub fn has_category(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c == key)
    }

    /// Directory part of the source path (empty for a bare file name).
    #[must_use]
    pub fn source_dir(&self) -> &str {
        self.source_path
            .rsplit_once('/')
            .map_or("", |(dir, _)| dir)
    }

    /// Resolve an asset path relative to the descriptor's directory.
    ///
    /// Absolute `http(s)` URLs are returned unchanged.
    #[must_use]
    pub fn asset_url(&self, relative: &str) -> String {
        if relative.starts_with("http://") || relative.starts_with("https://") {
            return relative.to_owned();
        }
        let relative = relative.trim_start_matches("./");
        match self.source_dir() {
            "" => relative.to_owned(),
            dir => format!("{dir}/{relative}"),
        }
    }

    /// Catalog-relative icon location, if the plugin has an icon.
    #[must_use]
    pub fn icon_location(&self) -> Option<String> {
        self.icon_url.as_deref().map(|icon| self.asset_url(icon))
    }

    /// Repository page, if the repository is known.
    #[must_use]
    pub fn repo_link(&self) -> Option<String> {
        self.repo.as_deref().map(|repo| format!("{GITHUB_BASE}/{repo}"))
    }

    /// Where to download the plugin: the explicit URL, else the latest
    /// release of the repository.
    #[must_use]
    pub fn download_link(&self) -> Option<String> {
        self.download_url.clone().or_else(|| {
            self.repo
                .as_deref()
                .map(|repo| format!("{GITHUB_BASE}/{repo}/releases/latest"))
        })
    }

    /// Author name, or [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// How much a requested permission should worry the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionRisk {
    /// Ordinary permission.
    Normal,
    /// Touches the filesystem, network, server or console.
    Dangerous,
    /// Runs programs or reaches into the plugin folder.
    Critical,
}

impl PermissionRisk {
    const CRITICAL: &'static [&'static str] = &["execute_program", "plugin_folder_access"];
    const DANGEROUS: &'static [&'static str] = &["fs", "network", "server", "console"];

    /// Classify a permission key.
    #[must_use]
    pub fn classify(permission: &str) -> Self {
        if Self::CRITICAL.contains(&permission) {
            Self::Critical
        } else if Self::DANGEROUS.contains(&permission) {
            Self::Dangerous
        } else {
            Self::Normal
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Dangerous => "dangerous",
            Self::Critical => "critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(json: &str, path: &str) -> Option<PluginDescriptor> {
        let raw: RawDescriptor = serde_json::from_str(json).unwrap();
        PluginDescriptor::from_raw(raw, path)
    }

    #[test]
    fn deserialize_full_descriptor() {
        let json = r#"{
            "id": "coolmod",
            "name": { "zh-CN": "酷模组", "en-US": "Cool Mod" },
            "description": { "en-US": "Does cool things" },
            "categories": ["tool", "game"],
            "version": "1.2.0",
            "repo": "alice/coolmod",
            "author": { "name": "Alice", "url": "https://example.com/alice" },
            "permissions": ["fs", "network"],
            "icon_url": "icon.png",
            "download_url": "https://example.com/coolmod.zip",
            "homepage": "ignored"
        }"#;
        let raw: RawDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id.as_deref(), Some("coolmod"));
        assert_eq!(raw.categories, vec!["tool", "game"]);
        assert_eq!(raw.author.as_ref().unwrap().name, "Alice");
        assert_eq!(raw.permissions.len(), 2);
    }

    #[test]
    fn deserialize_minimal_descriptor() {
        let raw: RawDescriptor = serde_json::from_str(r#"{ "id": "x" }"#).unwrap();
        assert_eq!(raw.id.as_deref(), Some("x"));
        assert!(raw.name.is_empty());
        assert!(raw.categories.is_empty());
        assert!(raw.author.is_none());
    }

    #[test]
    fn odd_optional_fields_read_as_absent() {
        for json in [
            r#"{ "id": "x", "name": null }"#,
            r#"{ "id": "x", "name": 7 }"#,
            r#"{ "id": "x", "description": { "zh-CN": "d", "en-US": null } }"#,
            r#"{ "id": "x", "version": 1.2 }"#,
            r#"{ "id": "x", "categories": null }"#,
            r#"{ "id": "x", "permissions": null }"#,
            r#"{ "id": "x", "author": "alice" }"#,
            r#"{ "id": "x", "icon_url": false, "download_url": [] }"#,
        ] {
            let d = descriptor(json, "plugins/a/x/plugin.json");
            assert_eq!(d.map(|d| d.id).as_deref(), Some("x"), "{json}");
        }

        let d = descriptor(
            r#"{ "id": "x", "description": { "zh-CN": "d", "en-US": null } }"#,
            "x.json",
        )
        .unwrap();
        assert_eq!(d.display_description(Locale::EnUs), "d");
        assert_eq!(d.display_name(Locale::EnUs), "x");
    }

    #[test]
    fn author_without_name_is_unknown() {
        let d = descriptor(r#"{ "id": "x", "author": {} }"#, "x.json").unwrap();
        assert_eq!(d.author_name(), UNKNOWN_AUTHOR);

        let d = descriptor(r#"{ "id": "x", "author": { "name": null, "url": 3 } }"#, "x.json")
            .unwrap();
        assert_eq!(d.author.unwrap().url, "");
    }

    #[test]
    fn from_raw_rejects_missing_or_blank_id() {
        assert!(descriptor(r#"{ "name": "No id" }"#, "p/a/b/c.json").is_none());
        assert!(descriptor(r#"{ "id": "" }"#, "p/a/b/c.json").is_none());
        assert!(descriptor(r#"{ "id": "  " }"#, "p/a/b/c.json").is_none());
    }

    #[test]
    fn from_raw_deduplicates_categories() {
        let d = descriptor(r#"{ "id": "x", "categories": ["tool", "game", "tool"] }"#, "x.json")
            .unwrap();
        assert_eq!(d.categories, vec!["tool", "game"]);
        assert!(d.has_category("game"));
        assert!(!d.has_category("Game"));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let d = descriptor(r#"{ "id": "b", "name": { "en-US": "Beta" } }"#, "x.json").unwrap();
        assert_eq!(d.display_name(Locale::EnUs), "Beta");
        assert_eq!(d.display_name(Locale::ZhCn), "b");
        assert_eq!(d.display_description(Locale::ZhCn), "");
    }

    #[test]
    fn serializes_source_path_key() {
        let d = descriptor(r#"{ "id": "x" }"#, "plugins/a/x/x.json").unwrap();
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value["_sourcePath"], "plugins/a/x/x.json");
        assert!(value.get("repo").is_none());
    }

    #[test]
    fn asset_url_is_relative_to_descriptor_dir() {
        let d = descriptor(
            r#"{ "id": "x", "icon_url": "assets/icon.png" }"#,
            "plugins/alice/x/x.json",
        )
        .unwrap();
        assert_eq!(d.source_dir(), "plugins/alice/x");
        assert_eq!(
            d.icon_location().as_deref(),
            Some("plugins/alice/x/assets/icon.png")
        );
        assert_eq!(d.asset_url("./logo.svg"), "plugins/alice/x/logo.svg");
        assert_eq!(
            d.asset_url("https://cdn.example.com/i.png"),
            "https://cdn.example.com/i.png"
        );
    }

    #[test]
    fn asset_url_for_root_level_descriptor() {
        let d = descriptor(r#"{ "id": "x", "icon_url": "icon.png" }"#, "x.json").unwrap();
        assert_eq!(d.icon_location().as_deref(), Some("icon.png"));
    }

    #[test]
    fn download_link_prefers_explicit_url() {
        let d = descriptor(
            r#"{ "id": "x", "repo": "a/x", "download_url": "https://example.com/x.zip" }"#,
            "x.json",
        )
        .unwrap();
        assert_eq!(d.download_link().as_deref(), Some("https://example.com/x.zip"));
    }

    #[test]
    fn download_link_from_repo() {
        let d = descriptor(r#"{ "id": "x", "repo": "a/x" }"#, "x.json").unwrap();
        assert_eq!(
            d.download_link().as_deref(),
            Some("https://github.com/a/x/releases/latest")
        );
        assert_eq!(d.repo_link().as_deref(), Some("https://github.com/a/x"));
    }

    #[test]
    fn no_links_without_repo() {
        let d = descriptor(r#"{ "id": "x" }"#, "x.json").unwrap();
        assert!(d.download_link().is_none());
        assert!(d.repo_link().is_none());
        assert_eq!(d.author_name(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn permission_risk_classification() {
        assert_eq!(PermissionRisk::classify("execute_program"), PermissionRisk::Critical);
        assert_eq!(
            PermissionRisk::classify("plugin_folder_access"),
            PermissionRisk::Critical
        );
        assert_eq!(PermissionRisk::classify("network"), PermissionRisk::Dangerous);
        assert_eq!(PermissionRisk::classify("console"), PermissionRisk::Dangerous);
        assert_eq!(PermissionRisk::classify("ui"), PermissionRisk::Normal);
        assert!(PermissionRisk::Critical > PermissionRisk::Dangerous);
    }
}
