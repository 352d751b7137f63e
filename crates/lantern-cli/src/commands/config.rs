//! CLI handlers for the `lantern config` subcommand.

use anyhow::{Result, anyhow};
use lantern_config::env::ENV_MAPPINGS;
use lantern_config::{ResolvedConfig, ShowFormat};

use crate::formatter::OutputFormat;
use crate::theme::Theme;

/// Show the resolved configuration with source annotations.
pub(crate) fn show_config(
    resolved: &ResolvedConfig,
    output: OutputFormat,
    section: Option<&str>,
) -> Result<()> {
    let show_format = match output {
        OutputFormat::Json => ShowFormat::Json,
        OutputFormat::Pretty => ShowFormat::Toml,
    };

    let rendered = resolved.show(show_format, section).map_err(|_| match section {
        Some(name) => anyhow!("no config section named '{name}'"),
        None => anyhow!("failed to format config"),
    })?;

    println!("{rendered}");
    Ok(())
}

/// Report that the configuration loaded and validated.
pub(crate) fn validate_config(resolved: &ResolvedConfig) {
    println!("Configuration is valid.");
    if !resolved.loaded_files.is_empty() {
        println!("\nLoaded files:");
        for path in &resolved.loaded_files {
            println!("  - {path}");
        }
    }
}

/// Show all config file paths that are checked.
pub(crate) fn show_paths() {
    let home = directories::BaseDirs::new().map(|d| d.home_dir().to_string_lossy().into_owned());
    let workspace = std::env::current_dir()
        .ok()
        .map(|p| p.to_string_lossy().into_owned());

    let paths = ResolvedConfig::config_paths(home.as_deref(), workspace.as_deref());

    println!(
        "{}",
        Theme::header("Configuration files checked (in precedence order):")
    );
    for (i, path) in paths.iter().enumerate() {
        let status = if std::path::Path::new(path).exists() {
            "found"
        } else {
            "not found"
        };
        println!("  {}. {path}  [{status}]", i.saturating_add(1));
    }

    println!("\n{}", Theme::header("Environment variable fallbacks:"));
    for mapping in ENV_MAPPINGS {
        println!("  {:<28} -> {}", mapping.var_name, mapping.field_path);
    }
}
