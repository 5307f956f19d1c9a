//! Storage for completed runs.
//!
//! Each run is kept under `runs/{id}/` as `summary.json` plus `track.gpx`.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use object_store::{
    ObjectStore, PutPayload, local::LocalFileSystem, memory::InMemory, path::Path,
};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{error, info};
use uuid::Uuid;

use crate::{errors::TrackerError, gpx_io, models::RunSummary, sink::RunSink};

const RUNS_PREFIX: &str = "runs";

#[derive(Clone, Debug)]
pub struct RunStore {
    store: Arc<dyn ObjectStore>,
}

impl RunStore {
    pub fn new_local(base_path: &str) -> Result<Self, TrackerError> {
        std::fs::create_dir_all(base_path)?;
        let store = Arc::new(LocalFileSystem::new_with_prefix(base_path)?);
        Ok(Self { store })
    }

    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
        }
    }

    fn summary_path(id: Uuid) -> Path {
        Path::from(format!("{RUNS_PREFIX}/{id}/summary.json"))
    }

    fn track_path(id: Uuid) -> Path {
        Path::from(format!("{RUNS_PREFIX}/{id}/track.gpx"))
    }

    /// Writes the summary and its GPX track. Returns the summary's object path.
    pub async fn save_run(&self, summary: &RunSummary) -> Result<String, TrackerError> {
        let json = serde_json::to_vec_pretty(summary)?;
        let gpx = gpx_io::summary_to_gpx(summary)?;

        let track_path = Self::track_path(summary.id);
        self.store
            .put(&track_path, PutPayload::from(gpx))
            .await?;

        let summary_path = Self::summary_path(summary.id);
        self.store
            .put(&summary_path, PutPayload::from(json))
            .await?;

        Ok(summary_path.to_string())
    }

    pub async fn get_run(&self, id: Uuid) -> Result<RunSummary, TrackerError> {
        let bytes = self.get_bytes(&Self::summary_path(id), id).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get_track_gpx(&self, id: Uuid) -> Result<Bytes, TrackerError> {
        self.get_bytes(&Self::track_path(id), id).await
    }

    async fn get_bytes(&self, path: &Path, id: Uuid) -> Result<Bytes, TrackerError> {
        let result = match self.store.get(path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Err(TrackerError::RunNotFound(id)),
            Err(e) => return Err(e.into()),
        };
        Ok(result.bytes().await?)
    }

    /// Ids of every stored run, in no particular order.
    pub async fn list_runs(&self) -> Result<Vec<Uuid>, TrackerError> {
        let prefix = Path::from(RUNS_PREFIX);
        let listing = self.store.list_with_delimiter(Some(&prefix)).await?;

        let ids = listing
            .common_prefixes
            .iter()
            .filter_map(|dir| dir.filename())
            .filter_map(|name| Uuid::parse_str(name).ok())
            .collect();
        Ok(ids)
    }

    pub async fn delete_run(&self, id: Uuid) -> Result<(), TrackerError> {
        let summary_path = Self::summary_path(id);
        match self.store.head(&summary_path).await {
            Ok(_) => {}
            Err(object_store::Error::NotFound { .. }) => return Err(TrackerError::RunNotFound(id)),
            Err(e) => return Err(e.into()),
        }

        // Summary first so a half-deleted run is no longer readable.
        self.store.delete(&summary_path).await?;
        match self.store.delete(&Self::track_path(id)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Hands completed runs to a [`RunStore`] without blocking the session.
///
/// Saves run on the tokio runtime that created the sink. Failures are logged;
/// [`StoreSink::flush`] waits for saves still in flight.
#[derive(Clone)]
pub struct StoreSink {
    store: RunStore,
    handle: Handle,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl StoreSink {
    /// Must be called from within a tokio runtime.
    pub fn new(store: RunStore) -> Self {
        Self {
            store,
            handle: Handle::current(),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn store(&self) -> &RunStore {
        &self.store
    }

    pub async fn flush(&self) {
        let pending: Vec<JoinHandle<()>> = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            pending.drain(..).collect()
        };
        for task in pending {
            if let Err(e) = task.await {
                error!("Run save task failed: {e}");
            }
        }
    }
}

impl RunSink for StoreSink {
    fn persist_run(&self, summary: RunSummary) {
        let store = self.store.clone();
        let task = self.handle.spawn(async move {
            match store.save_run(&summary).await {
                Ok(path) => info!(run_id = %summary.id, "Stored run at {path}"),
                Err(e) => error!(run_id = %summary.id, "Failed to store run: {e}"),
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.retain(|task| !task.is_finished());
        pending.push(task);
    }
}
