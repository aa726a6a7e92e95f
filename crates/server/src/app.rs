//! Article gateway service shared by both transports.

use std::sync::Arc;

use boardpress_store::{ArticleStore, StoreCapabilities};

/// Serves the article tool catalog over RMCP and HTTP.
///
/// Holds the injected store adapter and the capability set that scopes the
/// advertised catalog. No article state is retained between calls — every
/// tool call re-reads what it needs from the backend.
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
    capabilities: StoreCapabilities,
}

impl ArticleService {
    /// Service advertising everything the store supports.
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        let capabilities = store.capabilities();
        Self {
            store,
            capabilities,
        }
    }

    /// Service with a restricted capability set. The HTTP transport uses
    /// this to keep privileged tools off non-loopback binds.
    pub fn with_capabilities(store: Arc<dyn ArticleStore>, capabilities: StoreCapabilities) -> Self {
        Self {
            store,
            capabilities,
        }
    }

    pub fn store(&self) -> &Arc<dyn ArticleStore> {
        &self.store
    }

    pub fn capabilities(&self) -> StoreCapabilities {
        self.capabilities
    }
}
