//! JSON file-based SessionRepository implementation

use crate::paths::SiteplanPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use siteplan_core::{Result, SiteplanError};
use siteplan_core::session::{Session, SessionRepository};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tokio::task;

/// The persisted document: one JSON object keyed by session ID.
pub type SessionDocument = BTreeMap<String, Session>;

/// A repository that keeps every session in a single JSON document.
///
/// ```text
/// sessions.json
/// {
///   "SAVE-3fa91c07": { "id": ..., "config": {...}, "date": ..., "summary": ..., "unix_time": ... },
///   ...
/// }
/// ```
///
/// Readers share a read lock; `save` and `delete` hold the write lock for
/// their whole load-modify-write cycle, so concurrent writers never lose each
/// other's updates. Every write replaces the document atomically. File I/O
/// runs on the blocking pool while the lock is held.
///
/// The lock lives in this process only. Two processes pointing at the same
/// file are not coordinated.
pub struct JsonSessionRepository {
    file: AtomicJsonFile<SessionDocument>,
    lock: RwLock<()>,
}

impl JsonSessionRepository {
    /// Creates a repository backed by the given document path.
    ///
    /// The file and its parent directory are created on first write; a
    /// missing file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            lock: RwLock::new(()),
        }
    }

    /// Creates a repository at the default location
    /// (`<data dir>/siteplan/sessions.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    pub fn default_location() -> Result<Self> {
        let path = SiteplanPaths::sessions_file()?;
        Ok(Self::new(path))
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the whole document on the blocking pool.
    async fn load_document(&self) -> Result<SessionDocument> {
        let file = self.file.clone();
        run_blocking(move || Ok(file.load()?.unwrap_or_default())).await
    }
}

/// Runs synchronous file I/O off the async worker threads.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| SiteplanError::internal(format!("Failed to spawn blocking task: {}", e)))?
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let _guard = self.lock.read().await;
        let mut document = self.load_document().await?;
        Ok(document.remove(session_id))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let _guard = self.lock.write().await;
        let file = self.file.clone();
        let entry = session.clone();
        run_blocking(move || {
            file.update(SessionDocument::new(), |document| {
                document.insert(entry.id.clone(), entry);
                true
            })?;
            Ok(())
        })
        .await?;

        tracing::info!(session_id = %session.id, path = ?self.file.path(), "Saved session");
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let file = self.file.clone();
        let id = session_id.to_string();
        let removed = run_blocking(move || {
            Ok(file.update(SessionDocument::new(), |document| {
                document.remove(&id).is_some()
            })?)
        })
        .await?;

        if removed {
            tracing::info!(session_id, "Deleted session");
        } else {
            tracing::debug!(session_id, "Delete of unknown session ignored");
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let _guard = self.lock.read().await;
        let mut sessions: Vec<Session> = self.load_document().await?.into_values().collect();

        // Most recent first
        sessions.sort_by(|a, b| b.unix_time.cmp(&a.unix_time));

        Ok(sessions)
    }
}
