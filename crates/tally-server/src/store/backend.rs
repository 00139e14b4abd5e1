use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use tally_core::error::{Result, TallyError};
use tally_core::{snapshot, CounterTable};

/// Durable home of the counter table.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    /// Restore the table. Never fails: an unusable snapshot yields an empty table.
    async fn load(&self) -> CounterTable;

    /// Overwrite the stored snapshot with the whole table.
    async fn save(&self, table: &CounterTable) -> Result<()>;
}

/// Snapshot kept as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `Ok(None)` when the file does not exist.
    async fn try_load(&self) -> Result<Option<CounterTable>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        snapshot::decode(&bytes).map(Some)
    }
}

#[async_trait]
impl SnapshotBackend for FileSnapshot {
    async fn load(&self) -> CounterTable {
        let path = self.path.display();
        match self.try_load().await {
            Ok(Some(table)) => {
                tracing::info!(%path, counters = table.len(), "snapshot restored");
                table
            }
            Ok(None) => {
                tracing::info!(%path, "no snapshot file, starting from zero");
                CounterTable::new()
            }
            Err(e) => {
                tracing::warn!(%path, code = e.client_code().as_str(), error = %e, "snapshot unusable, starting from zero");
                CounterTable::new()
            }
        }
    }

    async fn save(&self, table: &CounterTable) -> Result<()> {
        let data = snapshot::encode(table)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent).await {
                tracing::warn!(parent = %parent.display(), error = %e, "snapshot directory could not be created");
            }
        }
        fs::write(&self.path, &data)
            .await
            .map_err(|e| TallyError::Io(format!("write {} failed: {e}", self.path.display())))
    }
}
