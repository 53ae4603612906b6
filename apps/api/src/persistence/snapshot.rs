//! Snapshot mirror: one durable key-value slot holding the whole document.
//!
//! Backends are pluggable behind `SnapshotStore`; `AppState` carries an
//! `Arc<dyn SnapshotStore>` picked at startup from `SNAPSHOT_BACKEND`.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::bootstrap_document;
use crate::models::resume::ResumeDocument;
use crate::persistence::codec::decode_snapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("background write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns the slot contents, or `None` if nothing was ever written.
    async fn load(&self) -> Result<Option<String>, StoreError>;

    /// Overwrites the slot. Each write fully supersedes the previous one.
    async fn save(&self, encoded: &str) -> Result<(), StoreError>;

    fn describe(&self) -> String;
}

// ────────────────────────────────────────────────────────────────────────────
// File backend (default)
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the snapshot in one JSON file, replaced atomically on every save.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, encoded: &str) -> Result<(), StoreError> {
        let path = self.path.clone();
        let contents = encoded.to_owned();
        tokio::task::spawn_blocking(move || write_atomically(&path, &contents)).await??;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis backend
// ────────────────────────────────────────────────────────────────────────────

/// Keeps the snapshot under a single Redis key.
pub struct RedisSnapshotStore {
    client: redis::Client,
    key: String,
}

impl RedisSnapshotStore {
    pub fn new(client: redis::Client, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }
}

#[async_trait]
impl SnapshotStore for RedisSnapshotStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(&self.key).await?;
        Ok(value)
    }

    async fn save(&self, encoded: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(&self.key, encoded).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("redis key '{}'", self.key)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemorySnapshotStore {
    slot: std::sync::Mutex<Option<String>>,
    writes: std::sync::Mutex<usize>,
}

#[cfg(test)]
impl MemorySnapshotStore {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: std::sync::Mutex::new(Some(contents.into())),
            writes: std::sync::Mutex::new(0),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents())
    }

    async fn save(&self, encoded: &str) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(encoded.to_owned());
        }
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Loads the initial document. Falls back to the built-in sample when the slot
/// is empty, unreadable, or holds something that does not decode.
pub async fn restore_or_default(store: &dyn SnapshotStore) -> ResumeDocument {
    match store.load().await {
        Ok(Some(text)) => match decode_snapshot(&text) {
            Ok(doc) => {
                info!("Restored document from {}", store.describe());
                doc
            }
            Err(e) => {
                warn!("Ignoring snapshot in {}: {e}", store.describe());
                bootstrap_document()
            }
        },
        Ok(None) => {
            info!("No snapshot in {}, starting from the sample document", store.describe());
            bootstrap_document()
        }
        Err(e) => {
            warn!("Could not read snapshot from {}: {e}", store.describe());
            bootstrap_document()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::codec::encode_snapshot;

    #[tokio::test]
    async fn test_restore_uses_stored_document() {
        let mut doc = bootstrap_document();
        doc.personal_info.full_name = "Restored Person".into();
        let store = MemorySnapshotStore::with_contents(encode_snapshot(&doc).unwrap());
        assert_eq!(restore_or_default(&store).await, doc);
    }

    #[tokio::test]
    async fn test_restore_falls_back_on_corrupt_snapshot() {
        let store = MemorySnapshotStore::with_contents("{\"personalInfo\": oops");
        assert_eq!(restore_or_default(&store).await, bootstrap_document());
    }

    #[tokio::test]
    async fn test_restore_falls_back_on_empty_slot() {
        let store = MemorySnapshotStore::default();
        assert_eq!(restore_or_default(&store).await, bootstrap_document());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("nested").join("resume-data.json"));
        assert!(store.load().await.unwrap().is_none());

        store.save("{\"a\":1}").await.unwrap();
        store.save("{\"a\":2}").await.unwrap();

        assert_eq!(store.load().await.unwrap().as_deref(), Some("{\"a\":2}"));
    }

    #[tokio::test]
    async fn test_memory_store_counts_writes() {
        let store = MemorySnapshotStore::default();
        store.save("x").await.unwrap();
        store.save("y").await.unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.contents().as_deref(), Some("y"));
    }
}
