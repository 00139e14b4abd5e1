use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use tally_core::CounterTable;

use crate::obs::metrics::ServiceMetrics;
use crate::store::SnapshotBackend;

/// Authoritative counter state.
///
/// One mutex covers the whole table. `increment` keeps holding it while the
/// snapshot is written, so the file always matches some point in the total
/// order of increments and no increment can be lost to a race.
///
/// The critical section of `increment` runs in its own task: dropping the
/// caller's future (client disconnect) cannot release the lock while a
/// snapshot write is still in flight.
pub struct CounterStore {
    table: Arc<Mutex<CounterTable>>,
    backend: Arc<dyn SnapshotBackend>,
    metrics: Arc<ServiceMetrics>,
}

impl CounterStore {
    /// Load the table from `backend` once and wrap it.
    pub async fn open(backend: Arc<dyn SnapshotBackend>, metrics: Arc<ServiceMetrics>) -> Self {
        let table = backend.load().await;
        Self {
            table: Arc::new(Mutex::new(table)),
            backend,
            metrics,
        }
    }

    /// Add one to `name`, persist the whole table, return the new value.
    ///
    /// Persistence failures are logged and counted but never reach the caller:
    /// the in-memory value is still authoritative.
    pub async fn increment(&self, name: &str) -> u64 {
        let table = Arc::clone(&self.table);
        let backend = Arc::clone(&self.backend);
        let metrics = Arc::clone(&self.metrics);
        let counter = name.to_string();

        let task = tokio::spawn(async move {
            let mut table = table.lock_owned().await;
            let value = table.increment(&counter);

            let started = Instant::now();
            let saved = backend.save(&table).await;
            metrics.snapshot_save_duration.observe(&[], started.elapsed());

            if let Err(e) = saved {
                metrics.snapshot_save_failures.inc(&[]);
                tracing::warn!(counter = %counter, value, code = e.client_code().as_str(), error = %e, "snapshot save failed");
            }

            metrics.hits.inc(&[("counter", counter.as_str())]);
            value
        });

        match task.await {
            Ok(value) => value,
            Err(e) => {
                // the task panicked inside the backend; the table itself is still consistent
                tracing::error!(counter = name, error = %e, "increment task failed");
                self.table.lock().await.get(name)
            }
        }
    }

    /// Current value of `name`, 0 if it was never incremented.
    pub async fn read(&self, name: &str) -> u64 {
        let value = self.table.lock().await.get(name);
        self.metrics.reads.inc(&[("counter", name)]);
        value
    }

    /// Copy of the whole table.
    pub async fn snapshot(&self) -> CounterTable {
        self.table.lock().await.clone()
    }
}
