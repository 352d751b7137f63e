//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Upper bound for `catalog.http_timeout_secs`.
const MAX_HTTP_TIMEOUT_SECS: u64 = 600;

/// Upper bound for `view.search_debounce_ms`.
const MAX_SEARCH_DEBOUNCE_MS: u64 = 10_000;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_catalog(config)?;
    validate_view(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_catalog(config: &Config) -> ConfigResult<()> {
    let c = &config.catalog;

    if c.source.trim().is_empty() {
        return Err(invalid(
            "catalog.source",
            "source must be an http(s) URL or a directory",
        ));
    }
    if c.index_path.trim().is_empty() {
        return Err(invalid("catalog.index_path", "index_path must not be empty"));
    }
    if c.registry_path.trim().is_empty() {
        return Err(invalid(
            "catalog.registry_path",
            "registry_path must not be empty",
        ));
    }
    if c.http_timeout_secs == 0 || c.http_timeout_secs > MAX_HTTP_TIMEOUT_SECS {
        return Err(invalid(
            "catalog.http_timeout_secs",
            format!("http_timeout_secs must be between 1 and {MAX_HTTP_TIMEOUT_SECS}"),
        ));
    }
    if c.user_agent.as_deref().is_some_and(|ua| ua.trim().is_empty()) {
        return Err(invalid(
            "catalog.user_agent",
            "user_agent must not be empty when set",
        ));
    }

    Ok(())
}

fn validate_view(config: &Config) -> ConfigResult<()> {
    let v = &config.view;

    if v.search_debounce_ms > MAX_SEARCH_DEBOUNCE_MS {
        return Err(invalid(
            "view.search_debounce_ms",
            format!("search_debounce_ms must be at most {MAX_SEARCH_DEBOUNCE_MS}"),
        ));
    }

    if v.sort != "name" {
        return Err(invalid(
            "view.sort",
            format!("unsupported sort key '{}'; expected: name", v.sort),
        ));
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        ));
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        ));
    }

    Ok(())
}
