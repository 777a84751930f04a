//! Layout use case implementation.

use siteplan_core::session::SessionRepository;
use siteplan_core::{RawConfiguration, Result, SiteLayout, SiteplanError, generate_layout, validate};
use std::sync::Arc;

/// Computes site layouts, either for a caller-supplied configuration or for
/// one that was saved earlier.
pub struct LayoutUseCase {
    session_repository: Arc<dyn SessionRepository>,
}

impl LayoutUseCase {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    /// Validates the configuration and computes its layout.
    pub fn calculate(&self, configs: &RawConfiguration) -> Result<SiteLayout> {
        let config = validate(configs)?;
        Ok(generate_layout(&config))
    }

    /// Computes the layout of a stored session's configuration.
    ///
    /// # Errors
    ///
    /// Returns `SiteplanError::NotFound` if no session has this ID.
    pub async fn layout_for_session(&self, session_id: &str) -> Result<SiteLayout> {
        let session = self
            .session_repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| SiteplanError::not_found("session", session_id))?;

        Ok(generate_layout(&session.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionUseCase;
    use siteplan_core::{DeviceType, LayoutRequest};
    use tempfile::TempDir;

    fn raw(entries: &[(&str, i64)]) -> RawConfiguration {
        entries
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_calculate_valid_configuration() {
        let temp_dir = TempDir::new().unwrap();
        let sessions = SessionUseCase::with_json_store(temp_dir.path().join("sessions.json"));
        let layouts = LayoutUseCase::new(sessions.repository());

        let layout = layouts.calculate(&raw(&[("Megapack2", 2)])).unwrap();
        assert_eq!(layout.total_cost, 170_000.0);
        assert_eq!(layout.transformer_count, 1);
    }

    #[test]
    fn test_calculate_rejects_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        let sessions = SessionUseCase::with_json_store(temp_dir.path().join("sessions.json"));
        let layouts = LayoutUseCase::new(sessions.repository());

        let err = layouts.calculate(&raw(&[("MegapackXL", -1)])).unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_layout_for_saved_session() {
        let temp_dir = TempDir::new().unwrap();
        let sessions = SessionUseCase::with_json_store(temp_dir.path().join("sessions.json"));
        let layouts = LayoutUseCase::new(sessions.repository());

        let id = sessions
            .save(&LayoutRequest {
                id: None,
                configs: raw(&[("MegapackXL", 10)]),
            })
            .await
            .unwrap();

        let layout = layouts.layout_for_session(&id).await.unwrap();
        assert_eq!(layout.count_of(DeviceType::MegapackXL), 10);
        assert_eq!(layout.transformer_count, 5);

        let err = layouts.layout_for_session("SAVE-missing").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
