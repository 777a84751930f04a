//! Session use case implementation.
//!
//! This module provides the `SessionUseCase` which validates incoming
//! configurations, assigns session IDs and stamps sessions before handing
//! them to the `SessionRepository`.

use chrono::Local;
use siteplan_core::session::{Session, SessionRepository, generate_id};
use siteplan_core::{LayoutRequest, Result, SiteplanError, validate};
use siteplan_infrastructure::JsonSessionRepository;
use std::path::PathBuf;
use std::sync::Arc;

/// Use case for saving, listing, loading and deleting named configurations.
///
/// # Responsibilities
///
/// - Rejecting invalid configurations before anything is written
/// - Generating an unused session ID when the caller supplies none
/// - Stamping the display date, summary and sort time on every save
///
/// # ID allocation
///
/// The unused-ID check and the save run under separate locks. Another writer
/// could claim the same freshly generated ID in between; with 32 random bits
/// per ID this is accepted rather than guarded against.
pub struct SessionUseCase {
    /// Repository for session data persistence
    session_repository: Arc<dyn SessionRepository>,
}

impl SessionUseCase {
    /// Creates a new `SessionUseCase` over any session repository.
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    /// Creates a `SessionUseCase` backed by a JSON document at `path`.
    pub fn with_json_store(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonSessionRepository::new(path)))
    }

    pub fn repository(&self) -> Arc<dyn SessionRepository> {
        Arc::clone(&self.session_repository)
    }

    /// Validates and saves a configuration, returning the session ID.
    ///
    /// An explicit `request.id` replaces any session stored under that ID;
    /// an absent or empty one gets a freshly generated, unused ID.
    pub async fn save(&self, request: &LayoutRequest) -> Result<String> {
        let config = validate(&request.configs)?;

        let session_id = match request.session_id() {
            Some(id) => id.to_string(),
            None => self.allocate_id().await?,
        };

        let session = Session::new(session_id.clone(), config, &Local::now());
        self.session_repository.save(&session).await?;

        Ok(session_id)
    }

    /// Lists all sessions, most recent first.
    pub async fn list(&self) -> Result<Vec<Session>> {
        self.session_repository.list_all().await
    }

    /// Loads a session by ID.
    ///
    /// # Errors
    ///
    /// Returns `SiteplanError::NotFound` if no session has this ID.
    pub async fn load(&self, session_id: &str) -> Result<Session> {
        self.session_repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| SiteplanError::not_found("session", session_id))
    }

    /// Deletes a session; unknown IDs are ignored.
    pub async fn delete(&self, session_id: &str) -> Result<()> {
        self.session_repository.delete(session_id).await
    }

    /// Draws IDs until one is not present in the store.
    async fn allocate_id(&self) -> Result<String> {
        loop {
            let candidate = generate_id();
            if !self.session_repository.exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::warn!(session_id = %candidate, "Generated session ID already in use, retrying");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use siteplan_core::session::SESSION_ID_PREFIX;
    use siteplan_core::{DeviceType, RawConfiguration, ValidationError};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn request(id: Option<&str>, entries: &[(&str, i64)]) -> LayoutRequest {
        LayoutRequest {
            id: id.map(str::to_string),
            configs: entries
                .iter()
                .map(|(name, count)| (name.to_string(), *count))
                .collect::<RawConfiguration>(),
        }
    }

    fn use_case_in(temp_dir: &TempDir) -> SessionUseCase {
        SessionUseCase::with_json_store(temp_dir.path().join("sessions.json"))
    }

    // In-memory repository whose first `taken` ID lookups report a collision
    struct CollidingRepository {
        sessions: Mutex<HashMap<String, Session>>,
        taken: Mutex<u32>,
        lookups: Mutex<Vec<String>>,
    }

    impl CollidingRepository {
        fn new(taken: u32) -> Self {
            Self {
                sessions: Mutex::new(HashMap::new()),
                taken: Mutex::new(taken),
                lookups: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SessionRepository for CollidingRepository {
        async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
            Ok(self.sessions.lock().unwrap().get(session_id).cloned())
        }

        async fn save(&self, session: &Session) -> Result<()> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id.clone(), session.clone());
            Ok(())
        }

        async fn delete(&self, session_id: &str) -> Result<()> {
            self.sessions.lock().unwrap().remove(session_id);
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<Session>> {
            Ok(self.sessions.lock().unwrap().values().cloned().collect())
        }

        async fn exists(&self, session_id: &str) -> Result<bool> {
            self.lookups.lock().unwrap().push(session_id.to_string());
            let mut taken = self.taken.lock().unwrap();
            if *taken > 0 {
                *taken -= 1;
                return Ok(true);
            }
            Ok(self.sessions.lock().unwrap().contains_key(session_id))
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = use_case_in(&temp_dir);

        let id = use_case
            .save(&request(None, &[("MegapackXL", 5), ("PowerPack", 0)]))
            .await
            .unwrap();

        let session = use_case.load(&id).await.unwrap();
        assert_eq!(session.config.count(DeviceType::MegapackXL), 5);
        assert_eq!(session.config.count(DeviceType::PowerPack), 0);
        assert_eq!(session.config.to_raw().len(), 2);
        assert_eq!(session.summary, "5 Devices");
    }

    #[tokio::test]
    async fn test_generated_id_has_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = use_case_in(&temp_dir);

        let id = use_case.save(&request(None, &[("Megapack", 1)])).await.unwrap();
        assert!(id.starts_with(SESSION_ID_PREFIX));

        let empty_id = use_case
            .save(&request(Some(""), &[("Megapack", 1)]))
            .await
            .unwrap();
        assert!(empty_id.starts_with(SESSION_ID_PREFIX));
        assert_ne!(id, empty_id);
    }

    #[tokio::test]
    async fn test_save_with_same_id_is_idempotent_upsert() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = use_case_in(&temp_dir);

        use_case
            .save(&request(Some("site-a"), &[("Megapack", 2)]))
            .await
            .unwrap();
        use_case
            .save(&request(Some("site-a"), &[("PowerPack", 7)]))
            .await
            .unwrap();

        let sessions = use_case.list().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "site-a");
        assert_eq!(sessions[0].config.count(DeviceType::PowerPack), 7);
        assert_eq!(sessions[0].config.count(DeviceType::Megapack), 0);
        assert_eq!(sessions[0].summary, "7 Devices");
    }

    #[tokio::test]
    async fn test_delete_then_load_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = use_case_in(&temp_dir);
        let id = use_case.save(&request(None, &[("Megapack2", 2)])).await.unwrap();

        use_case.delete(&id).await.unwrap();

        let err = use_case.load(&id).await.unwrap_err();
        assert!(err.is_not_found());
        // Deleting again is still fine
        use_case.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_configuration_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = use_case_in(&temp_dir);

        let cases = [
            (request(None, &[("Megapack", -1)]), "negative"),
            (request(None, &[("Supercapacitor", 1)]), "unknown"),
            (request(None, &[]), "empty"),
            (request(None, &[("Megapack", 3000), ("PowerPack", 3000)]), "site limit"),
        ];
        for (bad_request, label) in cases {
            let err = use_case.save(&bad_request).await.unwrap_err();
            assert!(err.is_input_error(), "{label}: {err:?}");
        }

        assert!(use_case.list().await.unwrap().is_empty());
        assert!(!temp_dir.path().join("sessions.json").exists());
    }

    #[tokio::test]
    async fn test_invalid_save_keeps_existing_session() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = use_case_in(&temp_dir);
        use_case
            .save(&request(Some("keep-me"), &[("Megapack", 2)]))
            .await
            .unwrap();

        let err = use_case
            .save(&request(Some("keep-me"), &[("Megapack", -2)]))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::NegativeCount {
                device_type: "Megapack".to_string(),
                count: -2
            })
        );

        let session = use_case.load("keep-me").await.unwrap();
        assert_eq!(session.config.count(DeviceType::Megapack), 2);
    }

    #[tokio::test]
    async fn test_id_allocation_retries_on_collision() {
        let repository = Arc::new(CollidingRepository::new(2));
        let use_case = SessionUseCase::new(repository.clone());

        let id = use_case.save(&request(None, &[("PowerPack", 1)])).await.unwrap();

        let lookups = repository.lookups.lock().unwrap().clone();
        assert_eq!(lookups.len(), 3);
        assert_eq!(lookups.last(), Some(&id));
        assert!(use_case.load(&id).await.is_ok());
    }
}
