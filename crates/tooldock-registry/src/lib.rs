//! Plugin registry and installation subsystem for tooldock.
//!
//! Provides the pieces behind `tooldock plugin ...`:
//!
//! - [`Catalog`] / [`PluginDescriptor`]: the remote plugin catalog, with exact
//!   name lookup and case-insensitive search
//! - [`RegistryCache`]: a 24-hour snapshot of the catalog on disk
//! - [`RegistryFetcher`]: network retrieval of the catalog and of plugin artifacts
//! - [`InstallationStore`]: the installation directory, one executable per plugin
//! - [`Installer`]: download, SHA-256 verification, atomic placement
//! - [`PluginManager`]: the list/install/update/remove/search operations
//! - [`run_plugin`]: forwarding an invocation to an installed plugin
//!
//! # Integrity
//!
//! When a descriptor declares `checksum = "sha256:<hex>"`, the downloaded bytes
//! are hashed and compared before anything touches the installation
//! directory. A mismatch is [`RegistryError::Integrity`] and nothing is written.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod cache;
pub mod catalog;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod installer;
pub mod integrity;
pub mod manager;
pub mod store;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{FRESHNESS_WINDOW, RegistryCache};
pub use catalog::{Catalog, PluginDescriptor, PluginKind};
pub use error::{RegistryError, RegistryResult};
pub use exec::{exit_code, run_plugin};
pub use fetch::RegistryFetcher;
pub use installer::Installer;
pub use integrity::{sha256_checksum, verify_checksum};
pub use manager::{PluginListing, PluginManager};
pub use store::{InstallationStore, validate_name};
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
