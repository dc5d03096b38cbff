/// Flat-file storage backend
///
/// Persists the same entities as the PostgreSQL backend, one JSON
/// array file per entity type under a data directory:
///
/// ```text
/// data/
/// ├── users.json
/// ├── projects.json
/// ├── areas.json
/// ├── responsibilities.json
/// ├── tasks.json
/// ├── meetings.json
/// ├── meeting_notes.json
/// └── templates.json
/// ```
///
/// Multi-valued relations are embedded as id arrays in the parent
/// record. Every write serializes the whole collection to a temp file
/// and renames it into place, so readers never observe a torn file; a
/// single async mutex serializes writers.
///
/// This backend exists for single-node deployments without a database
/// and for tests: semantics match the PostgreSQL backend exactly.

mod areas;
mod meetings;
mod projects;
mod tasks;
mod templates;
mod users;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use super::{Store, StoreError};

pub(crate) const USERS: &str = "users.json";
pub(crate) const PROJECTS: &str = "projects.json";
pub(crate) const AREAS: &str = "areas.json";
pub(crate) const RESPONSIBILITIES: &str = "responsibilities.json";
pub(crate) const TASKS: &str = "tasks.json";
pub(crate) const MEETINGS: &str = "meetings.json";
pub(crate) const MEETING_NOTES: &str = "meeting_notes.json";
pub(crate) const TEMPLATES: &str = "templates.json";

/// Flat-file-backed store
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (and creates if needed) a data directory
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// The data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    /// Reads a whole collection; a missing file is an empty collection
    pub(crate) async fn read_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        match tokio::fs::read(self.path_for(collection)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces a whole collection atomically (write temp + rename)
    pub(crate) async fn write_collection<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.root.join(format!("{collection}.tmp"));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, self.path_for(collection)).await?;
        Ok(())
    }

    /// Takes the writer guard; hold it across read-modify-write cycles
    pub(crate) async fn lock_writes(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

#[async_trait]
impl Store for FileStore {
    async fn ping(&self) -> Result<(), StoreError> {
        tokio::fs::metadata(&self.root).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "flatfile"
    }
}
