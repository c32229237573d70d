//! Shared application state for the metrika collector.
//!
//! The store is constructed by the caller and injected here, so tests and the
//! binary each own their instance instead of reaching for a process global.

use std::sync::Arc;

use metrika_core::MetricStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<MetricStore>,
}

impl AppState {
    pub fn new(store: Arc<MetricStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> &MetricStore {
        &self.inner.store
    }
}
