//! Opening the market: source selection, catalog load, view engine.

use anyhow::{Context, Result};
use lantern_catalog::source::DEFAULT_USER_AGENT;
use lantern_catalog::{Catalog, CatalogLoader, FilterSortEngine, Locale, open_source};
use lantern_config::Config;
use tracing::debug;

use crate::config_bridge;

/// A loaded catalog plus the engine that derives views over it.
#[derive(Debug)]
pub(crate) struct Market {
    pub(crate) catalog: Catalog,
    pub(crate) engine: FilterSortEngine,
}

impl Market {
    /// Load the catalog from `source_override`, or `catalog.source` when
    /// none is given.
    pub(crate) async fn open(
        cfg: &Config,
        source_override: Option<&str>,
        locale: Locale,
    ) -> Result<Self> {
        let root = source_override.unwrap_or(&cfg.catalog.source);
        let user_agent = cfg
            .catalog
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT);
        debug!(source = root, locale = %locale, "opening market");

        let source = open_source(root, config_bridge::http_timeout(cfg), user_agent)
            .with_context(|| format!("invalid market source '{root}'"))?;
        let catalog = CatalogLoader::new(source)
            .load(&cfg.catalog.index_path, &cfg.catalog.registry_path)
            .await
            .with_context(|| format!("failed to load plugins from {root}"))?;
        let engine = FilterSortEngine::new(locale)?;

        Ok(Self { catalog, engine })
    }

    /// The display locale.
    pub(crate) fn locale(&self) -> Locale {
        self.engine.locale()
    }
}
