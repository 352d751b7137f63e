//! Environment variable fallbacks.
//!
//! Env vars are a fallback, not an override: they only fill fields that no
//! config file set.

use std::collections::HashMap;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
#[derive(Debug, Clone, Copy)]
pub struct EnvMapping {
    /// Environment variable name.
    pub var_name: &'static str,
    /// Dotted config field path the variable fills.
    pub field_path: &'static str,
}

/// All supported `LANTERN_*` env var mappings.
pub const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "LANTERN_SOURCE",
        field_path: "catalog.source",
    },
    EnvMapping {
        var_name: "LANTERN_HTTP_TIMEOUT_SECS",
        field_path: "catalog.http_timeout_secs",
    },
    EnvMapping {
        var_name: "LANTERN_LOCALE",
        field_path: "view.locale",
    },
    EnvMapping {
        var_name: "LANTERN_SEARCH_DEBOUNCE_MS",
        field_path: "view.search_debounce_ms",
    },
    EnvMapping {
        var_name: "LANTERN_LOG_LEVEL",
        field_path: "logging.level",
    },
];

/// Apply environment variable fallbacks to fields that were **not** set by
/// any config file layer.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if is_file_set(sources, mapping.field_path) {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );

            set_field(
                merged,
                mapping.field_path,
                coerce_to_toml_value(mapping.field_path, val),
            );
            sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
            count = count.saturating_add(1);
        }
    }

    count
}

/// Whether a config file (not the embedded defaults) set `path`.
fn is_file_set(sources: &FieldSources, path: &str) -> bool {
    sources
        .get(path)
        .is_some_and(|layer| *layer != ConfigLayer::Defaults)
}

/// Set a dotted field in the TOML tree, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_owned(), value);
            return;
        }
        current = table
            .entry(segment)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
}

/// Coerce a string env var value to the TOML type of the field it feeds.
fn coerce_to_toml_value(path: &str, val: &str) -> toml::Value {
    if matches!(
        path,
        "catalog.http_timeout_secs" | "view.search_debounce_ms"
    ) && let Ok(i) = val.trim().parse::<i64>()
    {
        return toml::Value::Integer(i);
    }

    toml::Value::String(val.to_owned())
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_apply_env_fallbacks() {
        let mut merged: toml::Value = toml::from_str("[catalog]\nsource = \".\"").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("catalog.source".to_owned(), ConfigLayer::Defaults);
        let env = make_env(&[
            ("LANTERN_SOURCE", "https://market.example.com"),
            ("LANTERN_LOCALE", "en-US"),
        ]);

        let count = apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(count, 2);
        assert_eq!(
            merged["catalog"]["source"].as_str(),
            Some("https://market.example.com")
        );
        assert_eq!(merged["view"]["locale"].as_str(), Some("en-US"));
        assert_eq!(
            sources.get("catalog.source"),
            Some(&ConfigLayer::Environment)
        );
    }

    #[test]
    fn test_every_mapping_targets_a_config_field() {
        let mut merged = toml::Value::try_from(crate::Config::default()).unwrap();
        let mut sources = FieldSources::new();
        let env = make_env(&[
            ("LANTERN_SOURCE", "https://market.example.com"),
            ("LANTERN_HTTP_TIMEOUT_SECS", "7"),
            ("LANTERN_LOCALE", "en-US"),
            ("LANTERN_SEARCH_DEBOUNCE_MS", "9"),
            ("LANTERN_LOG_LEVEL", "debug"),
        ]);

        let count = apply_env_fallbacks(&mut merged, &mut sources, &env);
        assert_eq!(count, ENV_MAPPINGS.len());

        let config: crate::Config = merged.try_into().unwrap();
        assert_eq!(config.catalog.source, "https://market.example.com");
        assert_eq!(config.catalog.http_timeout_secs, 7);
        assert_eq!(config.view.locale.as_deref(), Some("en-US"));
        assert_eq!(config.view.search_debounce_ms, 9);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_fallback_skips_file_set_fields() {
        let mut merged: toml::Value = toml::from_str("[logging]\nlevel = \"info\"").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("logging.level".to_owned(), ConfigLayer::Workspace);

        let env = make_env(&[("LANTERN_LOG_LEVEL", "trace")]);
        let count = apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(count, 0);
        assert_eq!(merged["logging"]["level"].as_str(), Some("info"));
    }

    #[test]
    fn test_unrelated_env_vars_are_ignored() {
        let mut merged: toml::Value = toml::from_str("[view]").unwrap();
        let mut sources = FieldSources::new();
        let env = make_env(&[("LANG", "zh_CN.UTF-8"), ("HOME", "/home/sea")]);

        assert_eq!(apply_env_fallbacks(&mut merged, &mut sources, &env), 0);
        assert!(sources.is_empty());
    }

    #[test]
    fn test_coerce_integer() {
        let v = coerce_to_toml_value("view.search_debounce_ms", "400");
        assert_eq!(v.as_integer(), Some(400));
    }

    #[test]
    fn test_coerce_unparsable_integer_stays_string() {
        let v = coerce_to_toml_value("catalog.http_timeout_secs", "soon");
        assert_eq!(v.as_str(), Some("soon"));
    }

    #[test]
    fn test_coerce_string_default() {
        let v = coerce_to_toml_value("catalog.source", "./market");
        assert_eq!(v.as_str(), Some("./market"));
    }
}
