//! On-disk snapshot of the catalog with a time-based freshness window.
//!
//! The snapshot lives at `<cache_dir>/registry.json` in the same schema as the
//! network payload. Freshness is judged purely by file modification time.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tooldock_config::StoragePaths;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::{RegistryError, RegistryResult};
use crate::fetch::RegistryFetcher;

/// A snapshot younger than this is reused without touching the network.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// The registry snapshot file.
#[derive(Debug, Clone)]
pub struct RegistryCache {
    path: PathBuf,
    max_age: Duration,
}

impl RegistryCache {
    /// Cache backed by `path` with the default freshness window.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: FRESHNESS_WINDOW,
        }
    }

    /// Cache at the standard location under the storage root.
    #[must_use]
    pub fn from_paths(paths: &StoragePaths) -> Self {
        Self::new(paths.registry_cache_path())
    }

    /// Override the freshness window.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the snapshot when it exists, is fresh and parses.
    ///
    /// Every failure here is a cache miss. A modification time in the future
    /// counts as fresh.
    #[must_use]
    pub fn read_fresh(&self) -> Option<Catalog> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "registry cache miss");
                return None;
            },
        };

        let modified = metadata.modified().ok()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= self.max_age {
            debug!(
                path = %self.path.display(),
                age_secs = age.as_secs(),
                "registry cache is stale"
            );
            return None;
        }

        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read registry cache");
                return None;
            },
        };

        match Catalog::from_slice(&bytes, &self.path.display().to_string()) {
            Ok(catalog) => {
                debug!(
                    path = %self.path.display(),
                    plugins = catalog.len(),
                    "using cached registry"
                );
                Some(catalog)
            },
            Err(e) => {
                warn!(error = %e, "ignoring unreadable registry cache");
                None
            },
        }
    }

    /// Return the fresh snapshot, or fetch (and thereby re-store) the catalog.
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's error when the cache cannot be used.
    pub async fn load(&self, fetcher: &RegistryFetcher) -> RegistryResult<Catalog> {
        if let Some(catalog) = self.read_fresh() {
            return Ok(catalog);
        }
        fetcher.fetch().await
    }

    /// Write `catalog` to the snapshot file, replacing any previous one.
    ///
    /// The file is written to a temporary sibling and renamed into place.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CacheWrite`]. Callers treat it as a warning.
    pub fn store(&self, catalog: &Catalog) -> RegistryResult<()> {
        let cache_err = |message: String| RegistryError::CacheWrite {
            path: self.path.clone(),
            message,
        };

        let bytes = catalog.to_json().map_err(|e| cache_err(e.to_string()))?;

        let parent = self
            .path
            .parent()
            .ok_or_else(|| cache_err("cache path has no parent directory".to_string()))?;
        std::fs::create_dir_all(parent)
            .map_err(|e| cache_err(format!("failed to create cache directory: {e}")))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| cache_err(format!("failed to create temp file: {e}")))?;
        tmp.write_all(&bytes)
            .map_err(|e| cache_err(format!("failed to write temp file: {e}")))?;
        tmp.persist(&self.path)
            .map_err(|e| cache_err(format!("failed to persist cache: {e}")))?;

        debug!(path = %self.path.display(), "stored registry cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{PluginDescriptor, PluginKind};
    use crate::testing::StubTransport;

    const URL: &str = "https://registry.test/plugins.json";

    fn sample(version: &str) -> Catalog {
        Catalog::new(
            version,
            vec![PluginDescriptor {
                name: "fmt".to_string(),
                description: "Formatter".to_string(),
                version: "1.0.0".to_string(),
                download_url: "https://registry.test/fmt".to_string(),
                kind: PluginKind::Script,
                checksum: None,
            }],
        )
    }

    fn set_age(path: &Path, age: Duration) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    fn fetcher(cache: &RegistryCache, transport: &Arc<StubTransport>) -> RegistryFetcher {
        RegistryFetcher::new(URL, transport.clone(), cache.clone())
    }

    #[test]
    fn test_store_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("cache/registry.json"));

        cache.store(&sample("7")).unwrap();
        assert_eq!(cache.read_fresh().unwrap(), sample("7"));
    }

    #[test]
    fn test_store_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("registry.json"));

        cache.store(&sample("1")).unwrap();
        cache.store(&sample("2")).unwrap();
        assert_eq!(cache.read_fresh().unwrap().version(), "2");
    }

    #[test]
    fn test_missing_is_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("registry.json"));
        assert!(cache.read_fresh().is_none());
    }

    #[test]
    fn test_stale_is_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("registry.json"));
        cache.store(&sample("1")).unwrap();

        set_age(cache.path(), Duration::from_secs(25 * 3600));
        assert!(cache.read_fresh().is_none());

        set_age(cache.path(), Duration::from_secs(23 * 3600));
        assert!(cache.read_fresh().is_some());
    }

    #[test]
    fn test_corrupt_is_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("registry.json"));
        std::fs::write(cache.path(), b"{ truncated").unwrap();
        assert!(cache.read_fresh().is_none());
    }

    #[test]
    fn test_store_into_unwritable_location() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let cache = RegistryCache::new(blocker.join("registry.json"));
        let err = cache.store(&sample("1")).unwrap_err();
        assert!(matches!(err, RegistryError::CacheWrite { .. }));
    }

    #[tokio::test]
    async fn test_load_fresh_skips_network() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("registry.json"));
        cache.store(&sample("cached")).unwrap();
        set_age(cache.path(), Duration::from_secs(23 * 3600));

        let transport = Arc::new(StubTransport::new());
        let catalog = cache.load(&fetcher(&cache, &transport)).await.unwrap();

        assert_eq!(catalog.version(), "cached");
        assert_eq!(transport.total_hits(), 0);
    }

    #[tokio::test]
    async fn test_load_stale_fetches_and_restores() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("registry.json"));
        cache.store(&sample("old")).unwrap();
        set_age(cache.path(), Duration::from_secs(25 * 3600));

        let transport = Arc::new(StubTransport::new());
        transport.serve(URL, sample("new").to_json().unwrap());

        let catalog = cache.load(&fetcher(&cache, &transport)).await.unwrap();
        assert_eq!(catalog.version(), "new");
        assert_eq!(transport.hits(URL), 1);

        // The fetch refreshed the snapshot.
        assert_eq!(cache.read_fresh().unwrap().version(), "new");
    }

    #[tokio::test]
    async fn test_load_corrupt_falls_through_to_fetch() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = RegistryCache::new(tmp.path().join("registry.json"));
        std::fs::write(cache.path(), b"garbage").unwrap();

        let transport = Arc::new(StubTransport::new());
        transport.serve(URL, sample("net").to_json().unwrap());

        let catalog = cache.load(&fetcher(&cache, &transport)).await.unwrap();
        assert_eq!(catalog.version(), "net");
    }
}
