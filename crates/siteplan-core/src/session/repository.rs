//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving sessions,
/// decoupling the use cases from the specific storage mechanism.
///
/// # Implementation Notes
///
/// Implementations must:
/// - Allow any number of concurrent readers (`find_by_id`, `list_all`)
/// - Run each `save`/`delete` read-modify-write cycle exclusively
/// - Never leave a partially written store behind after a failure
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: The store could not be read
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Inserts the session, replacing any existing entry with the same ID.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session from storage.
    ///
    /// Deleting an ID that does not exist succeeds without touching the store.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all stored sessions, most recent `unix_time` first.
    async fn list_all(&self) -> Result<Vec<Session>>;

    /// Checks whether a session ID is already taken.
    async fn exists(&self, session_id: &str) -> Result<bool> {
        Ok(self.find_by_id(session_id).await?.is_some())
    }
}
