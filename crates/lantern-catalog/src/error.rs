//! Catalog error types.

use std::path::PathBuf;

use crate::locale::Locale;

/// Errors from catalog operations.
///
/// Per-record failures are represented here too, but [`CatalogLoader`]
/// absorbs them; only [`CatalogError::Index`] and [`CatalogError::Registry`]
/// ever escape a load.
///
/// [`CatalogLoader`]: crate::CatalogLoader
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The transport failed before a response was received.
    #[error("failed to fetch {location}: {message}")]
    Fetch {
        /// Location that was requested.
        location: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("{location} returned HTTP {status}")]
    Status {
        /// Location that was requested.
        location: String,
        /// HTTP status code.
        status: u16,
    },

    /// The fetched document is not valid JSON of the expected shape.
    #[error("failed to parse {location}: {source}")]
    Parse {
        /// Location the document came from.
        location: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A location cannot be resolved against the source root.
    #[error("invalid catalog location '{location}': {reason}")]
    InvalidLocation {
        /// The offending location.
        location: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Reading a file from a directory source failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Collation data for a locale is unavailable.
    #[error("collation unavailable for {locale}: {message}")]
    Collation {
        /// Locale the collator was requested for.
        locale: Locale,
        /// Provider error description.
        message: String,
    },

    /// Unknown sort key.
    #[error("unknown sort key '{0}'; expected: name")]
    UnknownSortKey(String),

    /// The plugin index could not be loaded. Fatal to the whole load.
    #[error("plugin index could not be loaded: {0}")]
    Index(#[source] Box<CatalogError>),

    /// The category registry could not be loaded. Fatal to the whole load.
    #[error("category registry could not be loaded: {0}")]
    Registry(#[source] Box<CatalogError>),
}

impl CatalogError {
    /// Whether this error aborts a catalog load (as opposed to dropping a
    /// single record).
    #[must_use]
    pub fn is_fatal_to_load(&self) -> bool {
        matches!(self, Self::Index(_) | Self::Registry(_))
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
