//! Network retrieval of the catalog and of plugin artifacts.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::RegistryCache;
use crate::catalog::Catalog;
use crate::error::{RegistryError, RegistryResult};
use crate::transport::{HttpTransport, TransportError};

/// Talks to the registry source. The only component that fetches catalog data.
#[derive(Debug, Clone)]
pub struct RegistryFetcher {
    source_url: String,
    transport: Arc<dyn HttpTransport>,
    cache: RegistryCache,
}

impl RegistryFetcher {
    /// Fetcher for `source_url` that writes every fetched catalog to `cache`.
    #[must_use]
    pub fn new(
        source_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        cache: RegistryCache,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            transport,
            cache,
        }
    }

    /// The catalog source URL.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Retrieve and decode the catalog, bypassing any cached snapshot.
    ///
    /// The result is always written through to the cache; a failed write is
    /// logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::RegistryUnavailable`] on network failure or non-success status
    /// - [`RegistryError::RegistryFormat`] if the payload does not decode
    pub async fn fetch(&self) -> RegistryResult<Catalog> {
        let body = self.transport.get(&self.source_url).await.map_err(|e| {
            RegistryError::RegistryUnavailable {
                url: self.source_url.clone(),
                message: e.to_string(),
            }
        })?;

        let catalog = Catalog::from_slice(&body, &self.source_url)?;
        info!(
            url = %self.source_url,
            version = %catalog.version(),
            plugins = catalog.len(),
            "fetched registry"
        );

        if let Err(e) = self.cache.store(&catalog) {
            warn!(error = %e, "registry cache not updated");
        }

        Ok(catalog)
    }

    /// Download an artifact body.
    ///
    /// # Errors
    ///
    /// Returns the transport failure unchanged; the installer attaches the
    /// plugin name.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.transport.get(url).await
    }
}
