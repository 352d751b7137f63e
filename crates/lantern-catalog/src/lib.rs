//! Plugin catalog core for the Lantern plugin market.
//!
//! The market publishes one JSON descriptor per plugin at heterogeneous
//! paths, plus an index listing those paths and a category label table.
//! This crate turns that into an in-memory catalog and derives views over it:
//!
//! - [`CatalogSource`]: transport seam ([`HttpSource`], [`DirSource`])
//! - [`CatalogLoader`]: index + registry fetch, then settle-all record fetch
//! - [`infer`]: backfills `repo` and `author` from the descriptor's path
//! - [`LocalizedText`] / [`Locale`]: display strings with a fallback chain
//! - [`FilterSortEngine`]: category filter, search filter, collated sort
//! - [`SearchDebouncer`]: last-value-wins search input coalescing
//!
//! # Failure model
//!
//! Only the index and registry fetches can fail a load. A broken descriptor
//! (transport error, bad status, malformed JSON, missing `id`) is dropped
//! from the catalog and logged, never returned as an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use lantern_catalog::{CatalogLoader, DirSource, FilterSortEngine, Locale, ViewState};
//!
//! # async fn demo() -> lantern_catalog::CatalogResult<()> {
//! let loader = CatalogLoader::new(Arc::new(DirSource::new("site")));
//! let catalog = loader.load("api/plugins.json", "api/categories.json").await?;
//!
//! let engine = FilterSortEngine::new(Locale::EnUs)?;
//! let state = ViewState::new().with_search("backup");
//! for plugin in engine.view(&catalog, &state) {
//!     println!("{}", plugin.display_name(Locale::EnUs));
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod catalog;
pub mod category;
pub mod debounce;
pub mod descriptor;
pub mod error;
pub mod inference;
mod lenient;
pub mod loader;
pub mod locale;
pub mod source;
pub mod view;

pub use catalog::Catalog;
pub use category::{CategoryRegistry, category_label};
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, SearchDebouncer};
pub use descriptor::{Author, PermissionRisk, PluginDescriptor, RawDescriptor};
pub use error::{CatalogError, CatalogResult};
pub use inference::{PathConvention, infer};
pub use loader::{CatalogLoader, IndexDocument};
pub use locale::{DEFAULT_LOCALE, Locale, LocalizedText};
pub use source::{CatalogSource, DirSource, HttpSource, open_source};
pub use view::{FilterSortEngine, SortKey, ViewState, ViewSummary};
