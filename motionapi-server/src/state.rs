//! Application state shared across handlers

use std::sync::Arc;

use motionapi_core::ApiConfig;

use crate::store::EntryStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn EntryStore>,
    config: ApiConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>, config: ApiConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, config }),
        }
    }

    pub fn store(&self) -> &dyn EntryStore {
        self.inner.store.as_ref()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }
}
