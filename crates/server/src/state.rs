//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::UploadStore;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the flat-file store, and the upload handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Store,
    uploads: UploadStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The upload handler is rooted at the configured upload directory.
    #[must_use]
    pub fn new(config: ServerConfig, store: Store) -> Self {
        let uploads = UploadStore::new(config.upload_dir.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                uploads,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the flat-file store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the upload handler.
    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }
}
