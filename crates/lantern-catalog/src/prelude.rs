//! Prelude module - commonly used types for convenient import.
//!
//! Use `use lantern_catalog::prelude::*;` to import all essential types.

// Errors
pub use crate::{CatalogError, CatalogResult};

// Loading
pub use crate::{CatalogLoader, CatalogSource, DirSource, HttpSource, open_source};

// Data model
pub use crate::{Catalog, CategoryRegistry, Locale, LocalizedText, PluginDescriptor};

// Views
pub use crate::{FilterSortEngine, SearchDebouncer, SortKey, ViewState, ViewSummary};
