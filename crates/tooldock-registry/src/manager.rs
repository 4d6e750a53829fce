//! The plugin management operations behind `tooldock plugin ...`.

use std::path::PathBuf;
use std::sync::Arc;

use tooldock_config::{Config, StoragePaths};
use tracing::{info, warn};

use crate::cache::RegistryCache;
use crate::catalog::{Catalog, PluginDescriptor};
use crate::error::{RegistryError, RegistryResult};
use crate::fetch::RegistryFetcher;
use crate::installer::Installer;
use crate::store::{InstallationStore, validate_name};
use crate::transport::HttpTransport;

/// A catalog entry together with its local installation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginListing {
    /// The catalog entry.
    pub descriptor: PluginDescriptor,
    /// Whether the plugin is present in the installation directory.
    pub installed: bool,
}

/// Composes cache, fetcher, store and installer into the user-facing operations.
#[derive(Debug, Clone)]
pub struct PluginManager {
    cache: RegistryCache,
    fetcher: RegistryFetcher,
    store: InstallationStore,
}

impl PluginManager {
    /// Manager over the standard storage layout and the configured registry URL.
    #[must_use]
    pub fn new(paths: &StoragePaths, config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        let cache = RegistryCache::from_paths(paths);
        let fetcher = RegistryFetcher::new(config.registry_url(), transport, cache.clone());
        Self::from_parts(cache, fetcher, InstallationStore::from_paths(paths))
    }

    /// Manager over explicitly constructed components.
    #[must_use]
    pub fn from_parts(
        cache: RegistryCache,
        fetcher: RegistryFetcher,
        store: InstallationStore,
    ) -> Self {
        Self {
            cache,
            fetcher,
            store,
        }
    }

    /// The installation store.
    #[must_use]
    pub fn store(&self) -> &InstallationStore {
        &self.store
    }

    /// The catalog, from a fresh snapshot when available.
    ///
    /// # Errors
    ///
    /// Propagates fetch errors when the snapshot is missing, stale or unreadable.
    pub async fn catalog(&self) -> RegistryResult<Catalog> {
        self.cache.load(&self.fetcher).await
    }

    /// Every catalog entry in catalog order with its installation state.
    ///
    /// # Errors
    ///
    /// Propagates catalog and store errors.
    pub async fn list(&self) -> RegistryResult<Vec<PluginListing>> {
        let catalog = self.catalog().await?;
        self.annotate(catalog.entries().iter())
    }

    /// Catalog entries matching `query` with their installation state.
    ///
    /// # Errors
    ///
    /// Propagates catalog and store errors.
    pub async fn search(&self, query: &str) -> RegistryResult<Vec<PluginListing>> {
        let catalog = self.catalog().await?;
        self.annotate(catalog.search(query).into_iter())
    }

    /// Install `name` from the catalog.
    ///
    /// Returns the descriptor that was installed and the installed path.
    ///
    /// # Errors
    ///
    /// Any [`Self::prepare_install`] or [`Self::install_descriptor`] error.
    pub async fn install(&self, name: &str) -> RegistryResult<(PluginDescriptor, PathBuf)> {
        let descriptor = self.prepare_install(name).await?;
        let path = self.install_descriptor(&descriptor).await?;
        Ok((descriptor, path))
    }

    /// Resolve the descriptor `install` would use, without downloading.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidName`] for unsafe names
    /// - [`RegistryError::NotFound`] if the catalog has no such entry
    /// - [`RegistryError::AlreadyInstalled`] if the plugin is present
    /// - catalog fetch errors
    pub async fn prepare_install(&self, name: &str) -> RegistryResult<PluginDescriptor> {
        validate_name(name)?;
        let catalog = self.catalog().await?;
        let descriptor = find(&catalog, name)?;

        if self.store.is_installed(name) {
            return Err(RegistryError::AlreadyInstalled {
                name: name.to_string(),
            });
        }
        Ok(descriptor)
    }

    /// Download, verify and write `descriptor`.
    ///
    /// # Errors
    ///
    /// Any [`Installer::install`] error.
    pub async fn install_descriptor(&self, descriptor: &PluginDescriptor) -> RegistryResult<PathBuf> {
        Installer::new(&self.fetcher, &self.store)
            .install(descriptor)
            .await
    }

    /// Replace an installed plugin with the current catalog version.
    ///
    /// # Errors
    ///
    /// Any [`Self::prepare_update`] or [`Self::apply_update`] error.
    pub async fn update(&self, name: &str) -> RegistryResult<(PluginDescriptor, PathBuf)> {
        let descriptor = self.prepare_update(name).await?;
        let path = self.apply_update(&descriptor).await?;
        Ok((descriptor, path))
    }

    /// Check that `name` is installed and resolve it against a freshly
    /// fetched catalog. The cached snapshot is never consulted.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotInstalled`] if the plugin is absent
    /// - [`RegistryError::NotFound`] if the fresh catalog has no such entry
    /// - fetch errors
    pub async fn prepare_update(&self, name: &str) -> RegistryResult<PluginDescriptor> {
        validate_name(name)?;
        if !self.store.is_installed(name) {
            return Err(RegistryError::NotInstalled {
                name: name.to_string(),
            });
        }

        let catalog = self.fetcher.fetch().await?;
        find(&catalog, name)
    }

    /// Remove the installed file, then install `descriptor`.
    ///
    /// The old file is gone before the download starts, so a failed download
    /// or checksum leaves the plugin uninstalled.
    ///
    /// # Errors
    ///
    /// Removal errors and any [`Installer::install`] error.
    pub async fn apply_update(&self, descriptor: &PluginDescriptor) -> RegistryResult<PathBuf> {
        let name = descriptor.name.as_str();
        self.store.remove(name)?;

        match self.install_descriptor(descriptor).await {
            Ok(path) => {
                info!(name, version = %descriptor.version, "updated plugin");
                Ok(path)
            },
            Err(e) => {
                warn!(name, error = %e, "update failed after removal, plugin is no longer installed");
                Err(e)
            },
        }
    }

    /// Uninstall `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotInstalled`] or [`RegistryError::RemovalFailed`].
    pub fn remove(&self, name: &str) -> RegistryResult<()> {
        self.store.remove(name)
    }

    fn annotate<'a>(
        &self,
        descriptors: impl Iterator<Item = &'a PluginDescriptor>,
    ) -> RegistryResult<Vec<PluginListing>> {
        let installed = self.store.list()?;
        Ok(descriptors
            .map(|d| PluginListing {
                descriptor: d.clone(),
                installed: installed.contains(&d.name),
            })
            .collect())
    }
}

fn find(catalog: &Catalog, name: &str) -> RegistryResult<PluginDescriptor> {
    catalog
        .find(name)
        .cloned()
        .ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })
}
