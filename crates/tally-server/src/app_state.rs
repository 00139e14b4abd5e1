//! Shared application state for the counter service.
//!
//! Built once at startup and cloned into every handler through axum's
//! `State` extractor. The counter store lives here, not in a global.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::obs::metrics::ServiceMetrics;
use crate::store::{CounterStore, FileSnapshot, SnapshotBackend};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<CounterStore>,
    metrics: Arc<ServiceMetrics>,
}

struct AppStateInner {
    cfg: ServiceConfig,
}

impl AppState {
    /// Build state with the file snapshot named in the config.
    pub async fn new(cfg: ServiceConfig) -> Self {
        let backend = Arc::new(FileSnapshot::new(cfg.storage.snapshot_path.clone()));
        Self::with_backend(cfg, backend).await
    }

    /// Build state on top of an arbitrary snapshot backend.
    pub async fn with_backend(cfg: ServiceConfig, backend: Arc<dyn SnapshotBackend>) -> Self {
        let metrics = Arc::new(ServiceMetrics::default());
        let store = Arc::new(CounterStore::open(backend, Arc::clone(&metrics)).await);
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            store,
            metrics,
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<CounterStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }
}
