//! Catalog loading.
//!
//! ```text
//! registry ─┐
//!           ├─ both must succeed ─→ fetch every index path concurrently
//! index ────┘                        → settle all (no fail-fast)
//!                                    → parse, require id, infer repo/author
//!                                    → Catalog
//! ```

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::category::CategoryRegistry;
use crate::descriptor::{PluginDescriptor, RawDescriptor};
use crate::error::{CatalogError, CatalogResult};
use crate::inference::infer;
use crate::source::CatalogSource;

/// Default index location, relative to the site root.
pub const DEFAULT_INDEX_PATH: &str = "api/plugins.json";

/// Default category registry location, relative to the site root.
pub const DEFAULT_REGISTRY_PATH: &str = "api/categories.json";

/// The index document: where each descriptor lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDocument {
    /// Descriptor locations, relative to the site root.
    pub paths: Vec<String>,
}

impl IndexDocument {
    /// Extract the path list from an index document.
    ///
    /// A document without a `paths` array yields no paths. Non-string
    /// entries are skipped.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let paths = value
            .get("paths")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        let path = entry.as_str();
                        if path.is_none() {
                            debug!(entry = %entry, "skipping non-string index entry");
                        }
                        path.map(str::to_owned)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { paths }
    }
}

/// Loads a [`Catalog`] from a [`CatalogSource`].
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
}

impl CatalogLoader {
    /// Create a loader reading from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Load the whole catalog.
    ///
    /// The registry and the index are fetched concurrently. Then every
    /// descriptor listed in the index is fetched concurrently, and the load
    /// waits for all of them to settle. Descriptors that fail to fetch or
    /// parse, or that have no `id`, are left out of the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Index`] or [`CatalogError::Registry`] when
    /// either document cannot be fetched or parsed. Nothing else fails a
    /// load.
    pub async fn load(
        &self,
        index_location: &str,
        registry_location: &str,
    ) -> CatalogResult<Catalog> {
        info!(
            source = %self.source.describe(),
            index = index_location,
            registry = registry_location,
            "loading plugin catalog"
        );

        let (registry, index) = tokio::try_join!(
            self.fetch_registry(registry_location),
            self.fetch_index(index_location),
        )?;

        let outcomes = join_all(index.paths.iter().map(|path| self.fetch_record(path))).await;

        let mut plugins = Vec::with_capacity(outcomes.len());
        let mut dropped: usize = 0;
        for (path, outcome) in index.paths.iter().zip(outcomes) {
            match outcome {
                Ok(Some(plugin)) => plugins.push(plugin),
                Ok(None) => {
                    debug!(path = %path, "dropping descriptor without id");
                    dropped = dropped.saturating_add(1);
                },
                Err(e) => {
                    warn!(path = %path, error = %e, "dropping descriptor that failed to load");
                    dropped = dropped.saturating_add(1);
                },
            }
        }

        info!(
            loaded = plugins.len(),
            dropped,
            categories = registry.len(),
            "plugin catalog loaded"
        );
        Ok(Catalog::new(plugins, registry))
    }

    async fn fetch_registry(&self, location: &str) -> CatalogResult<CategoryRegistry> {
        let bytes = self
            .source
            .fetch(location)
            .await
            .map_err(|e| CatalogError::Registry(Box::new(e)))?;
        serde_json::from_slice(&bytes).map_err(|source| {
            CatalogError::Registry(Box::new(CatalogError::Parse {
                location: location.to_owned(),
                source,
            }))
        })
    }

    async fn fetch_index(&self, location: &str) -> CatalogResult<IndexDocument> {
        let bytes = self
            .source
            .fetch(location)
            .await
            .map_err(|e| CatalogError::Index(Box::new(e)))?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|source| {
            CatalogError::Index(Box::new(CatalogError::Parse {
                location: location.to_owned(),
                source,
            }))
        })?;
        let index = IndexDocument::from_value(&value);
        debug!(entries = index.paths.len(), "plugin index fetched");
        Ok(index)
    }

    /// Fetch and validate one descriptor. `Ok(None)` means it parsed but has
    /// no usable id.
    async fn fetch_record(&self, path: &str) -> CatalogResult<Option<PluginDescriptor>> {
        let bytes = self.source.fetch(path).await?;
        let raw: RawDescriptor =
            serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
                location: path.to_owned(),
                source,
            })?;
        Ok(PluginDescriptor::from_raw(infer(raw, path), path))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::descriptor::UNKNOWN_AUTHOR;
    use crate::locale::Locale;

    enum Canned {
        Body(&'static str),
        Status(u16),
    }

    /// In-memory source. Unknown locations fail like a network error.
    #[derive(Default)]
    struct MemorySource {
        docs: HashMap<String, Canned>,
        barrier: Option<Barrier>,
    }

    impl MemorySource {
        fn with(mut self, location: &str, doc: Canned) -> Self {
            self.docs.insert(location.to_owned(), doc);
            self
        }
    }

    #[async_trait]
    impl CatalogSource for MemorySource {
        async fn fetch(&self, location: &str) -> CatalogResult<Vec<u8>> {
            if location.starts_with("plugins/") {
                if let Some(barrier) = &self.barrier {
                    barrier.wait().await;
                }
            }
            match self.docs.get(location) {
                Some(Canned::Body(body)) => Ok(body.as_bytes().to_vec()),
                Some(Canned::Status(status)) => Err(CatalogError::Status {
                    location: location.to_owned(),
                    status: *status,
                }),
                None => Err(CatalogError::Fetch {
                    location: location.to_owned(),
                    message: "connection refused".to_owned(),
                }),
            }
        }

        fn describe(&self) -> String {
            "memory".to_owned()
        }
    }

    const REGISTRY: &str = r#"{ "tool": { "zh-CN": "工具", "en-US": "Tools" } }"#;

    fn loader(source: MemorySource) -> CatalogLoader {
        CatalogLoader::new(Arc::new(source))
    }

    async fn load(source: MemorySource) -> CatalogResult<Catalog> {
        loader(source)
            .load(DEFAULT_INDEX_PATH, DEFAULT_REGISTRY_PATH)
            .await
    }

    #[tokio::test]
    async fn loads_all_records_and_infers_fields() {
        let source = MemorySource::default()
            .with(DEFAULT_REGISTRY_PATH, Canned::Body(REGISTRY))
            .with(
                DEFAULT_INDEX_PATH,
                Canned::Body(r#"{ "paths": ["plugins/alice/coolmod/coolmod.json", "plugins/bob/b/b.json"] }"#),
            )
            .with(
                "plugins/alice/coolmod/coolmod.json",
                Canned::Body(r#"{ "id": "coolmod", "categories": ["tool"] }"#),
            )
            .with(
                "plugins/bob/b/b.json",
                Canned::Body(r#"{ "id": "b", "repo": "org/b" }"#),
            );

        let catalog = load(source).await.unwrap();
        assert_eq!(catalog.len(), 2);

        let coolmod = catalog.get("coolmod").unwrap();
        assert_eq!(coolmod.repo.as_deref(), Some("alice/coolmod"));
        assert_eq!(coolmod.author.as_ref().unwrap().url, "https://github.com/alice");
        assert_eq!(coolmod.source_path, "plugins/alice/coolmod/coolmod.json");

        let b = catalog.get("b").unwrap();
        assert_eq!(b.repo.as_deref(), Some("org/b"));
        assert_eq!(b.author_name(), "bob");

        assert_eq!(catalog.category_label("tool", Locale::EnUs), "Tools");
    }

    #[tokio::test]
    async fn isolates_per_record_failures() {
        // N = 6 paths, M = 4 failures of different kinds.
        let source = MemorySource::default()
            .with(DEFAULT_REGISTRY_PATH, Canned::Body(REGISTRY))
            .with(
                DEFAULT_INDEX_PATH,
                Canned::Body(
                    r#"{ "paths": [
                        "plugins/a/ok1/ok1.json",
                        "plugins/a/missing/missing.json",
                        "plugins/a/forbidden/forbidden.json",
                        "plugins/a/garbled/garbled.json",
                        "plugins/a/anon/anon.json",
                        "plugins/a/ok2/ok2.json"
                    ] }"#,
                ),
            )
            .with("plugins/a/ok1/ok1.json", Canned::Body(r#"{ "id": "ok1" }"#))
            .with("plugins/a/forbidden/forbidden.json", Canned::Status(403))
            .with("plugins/a/garbled/garbled.json", Canned::Body("{ not json"))
            .with("plugins/a/anon/anon.json", Canned::Body(r#"{ "name": "No id" }"#))
            .with("plugins/a/ok2/ok2.json", Canned::Body(r#"{ "id": "ok2" }"#));

        let catalog = load(source).await.unwrap();
        let ids: Vec<&str> = catalog.plugins().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok1", "ok2"]);
    }

    #[tokio::test]
    async fn non_object_record_is_dropped() {
        let source = MemorySource::default()
            .with(DEFAULT_REGISTRY_PATH, Canned::Body("{}"))
            .with(
                DEFAULT_INDEX_PATH,
                Canned::Body(r#"{ "paths": ["plugins/a/x/x.json", "plugins/a/y/y.json"] }"#),
            )
            .with("plugins/a/x/x.json", Canned::Body("[1, 2, 3]"))
            .with("plugins/a/y/y.json", Canned::Body(r#"{ "id": "y" }"#));

        let catalog = load(source).await.unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn odd_optional_fields_keep_the_record() {
        let source = MemorySource::default()
            .with(DEFAULT_REGISTRY_PATH, Canned::Body(REGISTRY))
            .with(
                DEFAULT_INDEX_PATH,
                Canned::Body(
                    r#"{ "paths": [
                        "plugins/a/n/n.json",
                        "plugins/a/d/d.json",
                        "plugins/a/v/v.json",
                        "plugins/a/c/c.json",
                        "plugins/a/p/p.json",
                        "plugins/a/e/e.json"
                    ] }"#,
                ),
            )
            .with("plugins/a/n/n.json", Canned::Body(r#"{ "id": "n", "name": null }"#))
            .with(
                "plugins/a/d/d.json",
                Canned::Body(r#"{ "id": "d", "description": { "zh-CN": "描述", "en-US": null } }"#),
            )
            .with("plugins/a/v/v.json", Canned::Body(r#"{ "id": "v", "version": 1.2 }"#))
            .with("plugins/a/c/c.json", Canned::Body(r#"{ "id": "c", "categories": null }"#))
            .with("plugins/a/p/p.json", Canned::Body(r#"{ "id": "p", "permissions": null }"#))
            .with("plugins/a/e/e.json", Canned::Body(r#"{ "id": "e", "author": {} }"#));

        let catalog = load(source).await.unwrap();
        let ids: Vec<&str> = catalog.plugins().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["n", "d", "v", "c", "p", "e"]);

        assert_eq!(catalog.get("n").unwrap().display_name(Locale::EnUs), "n");
        assert_eq!(
            catalog.get("d").unwrap().display_description(Locale::EnUs),
            "描述"
        );
        assert_eq!(catalog.get("v").unwrap().version, None);
        assert!(catalog.get("c").unwrap().categories.is_empty());
        assert!(catalog.get("p").unwrap().permissions.is_empty());
        assert_eq!(catalog.get("e").unwrap().author_name(), UNKNOWN_AUTHOR);
    }

    #[tokio::test]
    async fn odd_registry_entry_does_not_fail_the_load() {
        let source = MemorySource::default()
            .with(
                DEFAULT_REGISTRY_PATH,
                Canned::Body(r#"{ "tool": { "zh-CN": "工具", "en-US": null }, "x": null }"#),
            )
            .with(DEFAULT_INDEX_PATH, Canned::Body(r#"{ "paths": ["plugins/a/t/t.json"] }"#))
            .with(
                "plugins/a/t/t.json",
                Canned::Body(r#"{ "id": "t", "categories": ["tool", "x"] }"#),
            );

        let catalog = load(source).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.category_label("tool", Locale::EnUs), "工具");
        assert_eq!(catalog.category_label("x", Locale::EnUs), "x");
    }

    #[tokio::test]
    async fn index_failure_is_fatal() {
        let source = MemorySource::default()
            .with(DEFAULT_REGISTRY_PATH, Canned::Body(REGISTRY))
            .with(DEFAULT_INDEX_PATH, Canned::Status(404));

        let err = load(source).await.unwrap_err();
        assert!(matches!(err, CatalogError::Index(_)));
        assert!(err.is_fatal_to_load());
    }

    #[tokio::test]
    async fn registry_failure_is_fatal() {
        let source = MemorySource::default()
            .with(DEFAULT_INDEX_PATH, Canned::Body(r#"{ "paths": [] }"#));

        let err = load(source).await.unwrap_err();
        assert!(matches!(err, CatalogError::Registry(_)));
    }

    #[tokio::test]
    async fn unparsable_registry_is_fatal() {
        let source = MemorySource::default()
            .with(DEFAULT_REGISTRY_PATH, Canned::Body("<html>oops</html>"))
            .with(DEFAULT_INDEX_PATH, Canned::Body(r#"{ "paths": [] }"#));

        let err = load(source).await.unwrap_err();
        assert!(err.is_fatal_to_load());
        assert!(err.to_string().contains("category registry"));
    }

    #[tokio::test]
    async fn both_failures_produce_no_catalog() {
        let err = load(MemorySource::default()).await.unwrap_err();
        assert!(err.is_fatal_to_load());
    }

    #[tokio::test]
    async fn index_without_paths_yields_empty_catalog() {
        let source = MemorySource::default()
            .with(DEFAULT_REGISTRY_PATH, Canned::Body(REGISTRY))
            .with(DEFAULT_INDEX_PATH, Canned::Body(r#"{ "plugins": ["x"] }"#));

        let catalog = load(source).await.unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn index_document_skips_non_strings() {
        let value: Value =
            serde_json::from_str(r#"{ "paths": ["a/b/c/d.json", 42, null, "e.json"] }"#).unwrap();
        assert_eq!(
            IndexDocument::from_value(&value).paths,
            vec!["a/b/c/d.json", "e.json"]
        );
        let not_array: Value = serde_json::from_str(r#"{ "paths": "a.json" }"#).unwrap();
        assert!(IndexDocument::from_value(&not_array).paths.is_empty());
    }

    #[tokio::test]
    async fn record_fetches_run_concurrently() {
        // Every record fetch blocks on a barrier sized to the whole index, so
        // the load only completes if all fetches are in flight at once.
        let source = MemorySource {
            barrier: Some(Barrier::new(3)),
            ..MemorySource::default()
        }
        .with(DEFAULT_REGISTRY_PATH, Canned::Body(REGISTRY))
        .with(
            DEFAULT_INDEX_PATH,
            Canned::Body(r#"{ "paths": ["plugins/a/x/x.json", "plugins/a/y/y.json", "plugins/a/z/z.json"] }"#),
        )
        .with("plugins/a/x/x.json", Canned::Body(r#"{ "id": "x" }"#))
        .with("plugins/a/z/z.json", Canned::Body(r#"{ "id": "z" }"#));

        let catalog = tokio::time::timeout(Duration::from_secs(5), load(source))
            .await
            .expect("record fetches were serialized")
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
