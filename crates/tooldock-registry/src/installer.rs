//! Download, verify and place a plugin artifact.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::catalog::PluginDescriptor;
use crate::error::{RegistryError, RegistryResult};
use crate::fetch::RegistryFetcher;
use crate::integrity::verify_checksum;
use crate::store::{InstallationStore, validate_name};

/// Installs one descriptor into the store.
///
/// Does not check whether the plugin is already installed; that policy
/// belongs to the caller.
#[derive(Debug, Clone, Copy)]
pub struct Installer<'a> {
    fetcher: &'a RegistryFetcher,
    store: &'a InstallationStore,
}

impl<'a> Installer<'a> {
    /// Installer downloading through `fetcher` into `store`.
    #[must_use]
    pub fn new(fetcher: &'a RegistryFetcher, store: &'a InstallationStore) -> Self {
        Self { fetcher, store }
    }

    /// Download `descriptor`'s artifact, verify its checksum when one is
    /// declared, and write it as an executable.
    ///
    /// Nothing is written unless verification passes.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidName`] if the name is not a safe file name
    /// - [`RegistryError::DownloadFailed`] on network failure or non-success status
    /// - [`RegistryError::Integrity`] on checksum mismatch
    /// - [`RegistryError::WriteFailed`] if the file cannot be placed
    pub async fn install(&self, descriptor: &PluginDescriptor) -> RegistryResult<PathBuf> {
        let name = descriptor.name.as_str();
        validate_name(name)?;

        debug!(name, url = %descriptor.download_url, "downloading plugin");
        let content = self
            .fetcher
            .download(&descriptor.download_url)
            .await
            .map_err(|e| RegistryError::DownloadFailed {
                name: name.to_string(),
                url: descriptor.download_url.clone(),
                message: e.to_string(),
            })?;

        match descriptor.checksum() {
            Some(expected) => {
                verify_checksum(&content, expected, name)?;
                debug!(name, "checksum verified");
            },
            None => debug!(name, "no checksum declared, skipping verification"),
        }

        let path = self.store.write(name, &content, true)?;
        info!(
            name,
            version = %descriptor.version,
            path = %path.display(),
            "installed plugin"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::RegistryCache;
    use crate::catalog::PluginKind;
    use crate::integrity::sha256_checksum;
    use crate::testing::StubTransport;
    use crate::transport::TransportError;

    const ARTIFACT_URL: &str = "https://registry.test/fmt.sh";
    const SCRIPT: &[u8] = b"#!/bin/sh\necho formatted\n";

    struct Fixture {
        _tmp: tempfile::TempDir,
        transport: Arc<StubTransport>,
        fetcher: RegistryFetcher,
        store: InstallationStore,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let transport = Arc::new(StubTransport::new());
        let fetcher = RegistryFetcher::new(
            "https://registry.test/plugins.json",
            transport.clone(),
            RegistryCache::new(tmp.path().join("cache/registry.json")),
        );
        let store = InstallationStore::new(tmp.path().join("plugins"));
        Fixture {
            _tmp: tmp,
            transport,
            fetcher,
            store,
        }
    }

    fn descriptor(checksum: Option<String>) -> PluginDescriptor {
        PluginDescriptor {
            name: "fmt".to_string(),
            description: "Formatter".to_string(),
            version: "1.2.0".to_string(),
            download_url: ARTIFACT_URL.to_string(),
            kind: PluginKind::Script,
            checksum,
        }
    }

    #[tokio::test]
    async fn test_install_with_matching_checksum() {
        let f = fixture();
        f.transport.serve(ARTIFACT_URL, SCRIPT);

        let installer = Installer::new(&f.fetcher, &f.store);
        let path = installer
            .install(&descriptor(Some(sha256_checksum(SCRIPT))))
            .await
            .unwrap();

        assert!(f.store.is_installed("fmt"));
        assert_eq!(std::fs::read(path).unwrap(), SCRIPT);
    }

    #[tokio::test]
    async fn test_install_mismatch_writes_nothing() {
        let f = fixture();
        f.transport.serve(ARTIFACT_URL, b"#!/bin/sh\nrm -rf ~\n".to_vec());

        let installer = Installer::new(&f.fetcher, &f.store);
        let err = installer
            .install(&descriptor(Some(sha256_checksum(SCRIPT))))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::Integrity { .. }));
        assert!(!f.store.is_installed("fmt"));
        assert!(f.store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_install_without_checksum() {
        let f = fixture();
        f.transport.serve(ARTIFACT_URL, SCRIPT);

        Installer::new(&f.fetcher, &f.store)
            .install(&descriptor(None))
            .await
            .unwrap();
        assert!(f.store.is_installed("fmt"));
    }

    #[tokio::test]
    async fn test_install_empty_checksum_skips_verification() {
        let f = fixture();
        f.transport.serve(ARTIFACT_URL, SCRIPT);

        Installer::new(&f.fetcher, &f.store)
            .install(&descriptor(Some(String::new())))
            .await
            .unwrap();
        assert!(f.store.is_installed("fmt"));
    }

    #[tokio::test]
    async fn test_download_failure() {
        let f = fixture();
        f.transport.fail(ARTIFACT_URL, TransportError::Status(404));

        let err = Installer::new(&f.fetcher, &f.store)
            .install(&descriptor(None))
            .await
            .unwrap_err();

        match err {
            RegistryError::DownloadFailed { name, url, .. } => {
                assert_eq!(name, "fmt");
                assert_eq!(url, ARTIFACT_URL);
            },
            other => panic!("expected DownloadFailed, got {other:?}"),
        }
        assert!(!f.store.is_installed("fmt"));
    }

    #[tokio::test]
    async fn test_unsafe_name_never_downloads() {
        let f = fixture();
        let mut d = descriptor(None);
        d.name = "../../bin/sh".to_string();

        let err = Installer::new(&f.fetcher, &f.store)
            .install(&d)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName { .. }));
        assert_eq!(f.transport.total_hits(), 0);
    }
}
