//! In-memory transport double for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::transport::{HttpTransport, TransportError};

/// Serves canned responses by exact URL and counts requests.
///
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    routes: Mutex<HashMap<String, Result<Vec<u8>, TransportError>>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn serve(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(body.into()));
    }

    pub(crate) fn fail(&self, url: &str, error: TransportError) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
    }

    pub(crate) fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub(crate) fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        {
            let mut hits = self.hits.lock().unwrap();
            let count = hits.entry(url.to_string()).or_insert(0);
            *count = count.saturating_add(1);
        }
        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(Err(TransportError::Status(404)))
    }
}
