//! The plugin catalog: descriptors published by the registry source.
//!
//! The same JSON schema is used for the network payload and the on-disk
//! snapshot:
//!
//! ```json
//! { "version": "1",
//!   "plugins": [
//!     { "name": "fmt", "description": "...", "version": "1.2.0",
//!       "url": "https://...", "type": "script", "checksum": "sha256:..." } ] }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RegistryError, RegistryResult};

/// How a plugin artifact is packaged. Both kinds are installed the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// An interpreted script with a shebang line.
    #[default]
    Script,
    /// A native executable.
    Binary,
    /// Any other declared type. Installed like the rest.
    #[serde(other)]
    Unknown,
}

/// One installable plugin as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique plugin name; also the installed file name.
    pub name: String,
    /// One-line human description.
    #[serde(default)]
    pub description: String,
    /// Published version string (opaque, never compared).
    #[serde(default)]
    pub version: String,
    /// Where the artifact is downloaded from.
    #[serde(rename = "url")]
    pub download_url: String,
    /// Artifact packaging.
    #[serde(rename = "type", default)]
    pub kind: PluginKind,
    /// Declared digest, `sha256:<lowercase-hex>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl PluginDescriptor {
    /// The declared checksum, treating an empty string as absent.
    #[must_use]
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether `needle` (already lowercased) occurs in the name or description.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// The full set of descriptors published by a registry source.
///
/// Entries keep their published order. Lookups scan linearly and the first
/// entry with a given name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Opaque catalog version string.
    #[serde(rename = "version", default)]
    catalog_version: String,
    /// Descriptors in published order.
    #[serde(rename = "plugins", default)]
    entries: Vec<PluginDescriptor>,
}

impl Catalog {
    /// Build a catalog from its parts.
    #[must_use]
    pub fn new(catalog_version: impl Into<String>, entries: Vec<PluginDescriptor>) -> Self {
        let catalog = Self {
            catalog_version: catalog_version.into(),
            entries,
        };
        catalog.warn_on_duplicates();
        catalog
    }

    /// Decode a catalog payload.
    ///
    /// `origin` names where the bytes came from and is only used in the error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistryFormat`] if the payload is not catalog JSON.
    pub fn from_slice(bytes: &[u8], origin: &str) -> RegistryResult<Self> {
        let catalog: Self =
            serde_json::from_slice(bytes).map_err(|e| RegistryError::RegistryFormat {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;
        catalog.warn_on_duplicates();
        Ok(catalog)
    }

    /// Encode the catalog in the payload schema.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistryFormat`] if serialization fails.
    pub fn to_json(&self) -> RegistryResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| RegistryError::RegistryFormat {
            origin: "in-memory catalog".to_string(),
            message: e.to_string(),
        })
    }

    /// Catalog version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.catalog_version
    }

    /// All descriptors in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[PluginDescriptor] {
        &self.entries
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive lookup by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&PluginDescriptor> {
        self.entries.iter().find(|p| p.name == name)
    }

    /// Case-insensitive substring match on name or description, in catalog order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&PluginDescriptor> {
        let needle = query.to_lowercase();
        self.entries.iter().filter(|p| p.matches(&needle)).collect()
    }

    fn warn_on_duplicates(&self) {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.name.as_str()) {
                warn!(
                    name = %entry.name,
                    "duplicate plugin name in catalog, the first entry wins"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, description: &str) -> PluginDescriptor {
        PluginDescriptor {
            name: name.to_string(),
            description: description.to_string(),
            version: "1.0.0".to_string(),
            download_url: format!("https://example.com/{name}"),
            kind: PluginKind::Script,
            checksum: None,
        }
    }

    const PAYLOAD: &str = r#"{
        "version": "1.0",
        "plugins": [
            {
                "name": "fmt",
                "description": "Format source files",
                "version": "0.3.1",
                "url": "https://example.com/fmt.sh",
                "type": "script",
                "checksum": "sha256:abc123"
            },
            {
                "name": "jqx",
                "description": "JSON helper",
                "version": "2.0.0",
                "url": "https://example.com/jqx",
                "type": "binary"
            }
        ]
    }"#;

    #[test]
    fn test_parse_payload() {
        let catalog = Catalog::from_slice(PAYLOAD.as_bytes(), "test").unwrap();
        assert_eq!(catalog.version(), "1.0");
        assert_eq!(catalog.len(), 2);

        let fmt = catalog.find("fmt").unwrap();
        assert_eq!(fmt.download_url, "https://example.com/fmt.sh");
        assert_eq!(fmt.kind, PluginKind::Script);
        assert_eq!(fmt.checksum(), Some("sha256:abc123"));

        let jqx = catalog.find("jqx").unwrap();
        assert_eq!(jqx.kind, PluginKind::Binary);
        assert_eq!(jqx.checksum(), None);
    }

    #[test]
    fn test_malformed_payload() {
        let err = Catalog::from_slice(b"{\"plugins\": 3}", "https://example.com/p.json")
            .unwrap_err();
        match err {
            RegistryError::RegistryFormat { origin, .. } => {
                assert_eq!(origin, "https://example.com/p.json");
            },
            other => panic!("expected RegistryFormat, got {other:?}"),
        }

        assert!(Catalog::from_slice(b"not json", "x").is_err());
    }

    #[test]
    fn test_unknown_kind_keeps_catalog_usable() {
        let payload = br#"{"version":"1","plugins":[
            {"name":"fmt","description":"Formatter","url":"u1","type":"script"},
            {"name":"wasmfmt","description":"fmt as wasm","url":"u2","type":"wasm"}
        ]}"#;
        let catalog = Catalog::from_slice(payload, "x").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("fmt").unwrap().kind, PluginKind::Script);
        assert_eq!(catalog.find("wasmfmt").unwrap().kind, PluginKind::Unknown);
        assert_eq!(catalog.search("fmt").len(), 2);
    }

    #[test]
    fn test_round_trip() {
        let catalog = Catalog::from_slice(PAYLOAD.as_bytes(), "test").unwrap();
        let bytes = catalog.to_json().unwrap();
        let back = Catalog::from_slice(&bytes, "cache").unwrap();
        assert_eq!(catalog, back);
    }

    #[test]
    fn test_empty_checksum_is_absent() {
        let mut d = descriptor("a", "");
        d.checksum = Some(String::new());
        assert_eq!(d.checksum(), None);
    }

    #[test]
    fn test_find_is_exact_and_case_sensitive() {
        let catalog = Catalog::new("1", vec![descriptor("fmt", ""), descriptor("lint", "")]);
        assert!(catalog.find("fmt").is_some());
        assert!(catalog.find("FMT").is_none());
        assert!(catalog.find("fm").is_none());
        assert!(catalog.find("").is_none());
    }

    #[test]
    fn test_find_first_duplicate_wins() {
        let mut second = descriptor("fmt", "second");
        second.version = "9.9.9".to_string();
        let catalog = Catalog::new("1", vec![descriptor("fmt", "first"), second]);
        assert_eq!(catalog.find("fmt").unwrap().description, "first");
    }

    #[test]
    fn test_search_matches_name_or_description_in_order() {
        let catalog = Catalog::new(
            "1",
            vec![
                descriptor("fmt", "Formatter"),
                descriptor("deploy", "Ship it"),
                descriptor("lint", "runs fmt checks"),
            ],
        );
        let names: Vec<_> = catalog.search("fmt").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["fmt", "lint"]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let catalog = Catalog::new("1", vec![descriptor("Docker-Clean", "Prune IMAGES")]);
        assert_eq!(catalog.search("docker").len(), 1);
        assert_eq!(catalog.search("images").len(), 1);
        assert!(catalog.search("kubectl").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let catalog = Catalog::new("1", vec![descriptor("a", ""), descriptor("b", "")]);
        assert_eq!(catalog.search("").len(), 2);
    }
}
