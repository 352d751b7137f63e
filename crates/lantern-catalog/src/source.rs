//! Where catalog documents come from.
//!
//! The market is a static site: an index, a category table and one JSON file
//! per plugin, all addressed by paths relative to the site root. A
//! [`CatalogSource`] fetches the raw bytes for one such path.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Default HTTP request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("lantern/", env!("CARGO_PKG_VERSION"));

/// Fetches catalog documents by site-relative location.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the document at `location`.
    ///
    /// One attempt, no retry. Any non-success outcome is an error.
    async fn fetch(&self, location: &str) -> CatalogResult<Vec<u8>>;

    /// Human-readable description of the source root, for logs.
    fn describe(&self) -> String;
}

impl std::fmt::Debug for dyn CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSource")
            .field("root", &self.describe())
            .finish_non_exhaustive()
    }
}

/// Fetches documents over HTTP(S) relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    /// Create a source rooted at `base_url` with the default timeout and
    /// user agent.
    ///
    /// The base is treated as a directory: `https://host/market` and
    /// `https://host/market/` both resolve `api/plugins.json` to
    /// `https://host/market/api/plugins.json`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidLocation`] if `base_url` is not an
    /// absolute URL, or [`CatalogError::Client`] if the HTTP client cannot be
    /// built (e.g. TLS backend unavailable).
    pub fn new(base_url: &str) -> CatalogResult<Self> {
        Self::with_options(base_url, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a source with an explicit request timeout and user agent.
    ///
    /// # Errors
    ///
    /// See [`HttpSource::new`].
    pub fn with_options(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> CatalogResult<Self> {
        let base = parse_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .user_agent(user_agent)
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;
        Ok(Self { client, base })
    }

    /// The directory URL locations are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a site-relative location to an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidLocation`] if the location cannot be
    /// joined onto the base.
    pub fn resolve(&self, location: &str) -> CatalogResult<Url> {
        self.base
            .join(location.trim_start_matches('/'))
            .map_err(|e| CatalogError::InvalidLocation {
                location: location.to_owned(),
                reason: e.to_string(),
            })
    }
}

fn parse_base_url(base_url: &str) -> CatalogResult<Url> {
    let mut base = Url::parse(base_url).map_err(|e| CatalogError::InvalidLocation {
        location: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self, location: &str) -> CatalogResult<Vec<u8>> {
        let url = self.resolve(location)?;
        debug!(url = %url, "fetching catalog document");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::Fetch {
                location: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                location: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| CatalogError::Fetch {
            location: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Reads documents from a local checkout of the market site.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The site root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a location to a file under the root.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidLocation`] for empty or absolute
    /// locations and for any `..` component.
    pub fn resolve(&self, location: &str) -> CatalogResult<PathBuf> {
        let relative = Path::new(location);
        let invalid = |reason: &str| CatalogError::InvalidLocation {
            location: location.to_owned(),
            reason: reason.to_owned(),
        };

        if location.is_empty() {
            return Err(invalid("empty location"));
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {},
                Component::ParentDir => return Err(invalid("escapes the site root")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("must be relative to the site root"));
                },
            }
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl CatalogSource for DirSource {
    async fn fetch(&self, location: &str) -> CatalogResult<Vec<u8>> {
        let path = self.resolve(location)?;
        debug!(path = %path.display(), "reading catalog document");
        tokio::fs::read(&path)
            .await
            .map_err(|source| CatalogError::Io { path, source })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Open a source from a user-supplied root: `http://` and `https://` roots
/// become an [`HttpSource`], anything else a [`DirSource`].
///
/// # Errors
///
/// Returns an error if an HTTP source cannot be constructed.
pub fn open_source(
    root: &str,
    timeout: Duration,
    user_agent: &str,
) -> CatalogResult<Arc<dyn CatalogSource>> {
    if root.starts_with("http://") || root.starts_with("https://") {
        Ok(Arc::new(HttpSource::with_options(root, timeout, user_agent)?))
    } else {
        Ok(Arc::new(DirSource::new(root)))
    }
}
