//! Lantern CLI - browse the Lantern plugin market from a terminal.
//!
//! Loads the market catalog from an HTTP base URL or a local directory, then
//! lists, filters, searches and inspects plugins.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lantern_catalog::{SortKey, ViewState};
use lantern_config::{Config, ResolvedConfig};
use lantern_telemetry::{LogConfig, setup_logging};

mod commands;
mod config_bridge;
mod formatter;
mod market;
mod theme;

use commands::{browse, categories, config, list, show};
use formatter::OutputFormat;
use market::Market;
use theme::Theme;

/// Lantern - plugin market browser
#[derive(Parser)]
#[command(name = "lantern")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Market root: an http(s) base URL or a local directory
    #[arg(long, global = true)]
    source: Option<String>,

    /// Display language tag (e.g. zh-CN, en-US)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Path to a configuration file used instead of ~/.lantern/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List plugins
    List {
        /// Only plugins in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only plugins whose name or description contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Sort key (name)
        #[arg(long)]
        sort: Option<String>,
    },

    /// Show everything about one plugin
    Show {
        /// Plugin ID
        id: String,
    },

    /// List categories in use with their plugin counts
    Categories,

    /// Browse interactively (type to search, :help for commands)
    Browse {
        /// Start in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration with source annotations
    Show {
        /// Show only a specific section (catalog, view, logging)
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Validate the current configuration
    Validate,
    /// Show config file paths being checked
    Paths,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace_root = std::env::current_dir().ok();
    let loaded = Config::load(workspace_root.as_deref(), cli.config.as_deref());

    // Set up logging from config, with --verbose override.
    let log_config = match &loaded {
        Ok(resolved) => config_bridge::to_log_config(&resolved.config, cli.verbose),
        Err(_) => LogConfig::new(if cli.verbose { "debug" } else { "warn" }),
    };
    if let Err(e) = setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let resolved = match loaded {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("Configuration error: {e}")));
            std::process::exit(1);
        },
    };

    match cli.command {
        Some(Commands::Config { command }) => handle_config(command, &resolved, cli.format),
        command => {
            let cfg = &resolved.config;
            let locale = config_bridge::resolve_locale(cli.locale.as_deref(), cfg);
            let market = Market::open(cfg, cli.source.as_deref(), locale).await?;
            handle_market(command, &market, cfg, cli.format).await
        },
    }
}

async fn handle_market(
    command: Option<Commands>,
    market: &Market,
    cfg: &Config,
    output: OutputFormat,
) -> Result<()> {
    let default_state = ViewState::new().with_sort(config_bridge::default_sort(cfg));

    match command {
        Some(Commands::List {
            category,
            search,
            sort,
        }) => {
            let mut state = default_state;
            state.set_category(category);
            state.set_search(search.as_deref().unwrap_or_default());
            if let Some(sort) = sort {
                state.set_sort(
                    sort.parse::<SortKey>()
                        .context("invalid --sort value")?,
                );
            }
            list::render_view(market, &state, output)
        },
        Some(Commands::Show { id }) => show::show_plugin(market, &id, output),
        Some(Commands::Categories) => categories::list_categories(market, output),
        Some(Commands::Browse { category }) => {
            let mut state = default_state;
            state.set_category(category);
            browse::browse(
                market,
                state,
                config_bridge::search_debounce(cfg),
                output,
            )
            .await
        },
        // `config` never reaches the market.
        Some(Commands::Config { .. }) => Ok(()),
        None => list::render_view(market, &default_state, output),
    }
}

fn handle_config(
    command: ConfigCommands,
    resolved: &ResolvedConfig,
    output: OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show { section } => {
            config::show_config(resolved, output, section.as_deref())
        },
        ConfigCommands::Validate => {
            config::validate_config(resolved);
            Ok(())
        },
        ConfigCommands::Paths => {
            config::show_paths();
            Ok(())
        },
    }
}
