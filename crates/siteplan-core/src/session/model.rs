//! Session domain model.

use crate::configuration::Configuration;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Display format for `Session::date`, e.g. `03/14/2025, 09:26 AM`.
pub const SESSION_DATE_FORMAT: &str = "%m/%d/%Y, %I:%M %p";

/// A named, persisted configuration.
///
/// Field names match the persisted document and the list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (`SAVE-xxxxxxxx` when generated)
    pub id: String,
    /// The saved device configuration
    pub config: Configuration,
    /// Human-readable save time
    pub date: String,
    /// Short description, e.g. `12 Devices`
    pub summary: String,
    /// Save time in Unix seconds, used for ordering
    pub unix_time: i64,
}

impl Session {
    /// Creates a session stamped with the given save time.
    ///
    /// The summary counts every requested device, transformers included.
    pub fn new<Tz>(id: impl Into<String>, config: Configuration, saved_at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let summary = summarize(&config);
        Self {
            id: id.into(),
            config,
            date: saved_at.format(SESSION_DATE_FORMAT).to_string(),
            summary,
            unix_time: saved_at.timestamp(),
        }
    }
}

fn summarize(config: &Configuration) -> String {
    format!("{} Devices", config.total_devices())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceType;
    use chrono::Utc;

    #[test]
    fn test_new_session_is_stamped() {
        let saved_at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap();
        let config = Configuration::new()
            .with(DeviceType::MegapackXL, 4)
            .with(DeviceType::Transformer, 3);

        let session = Session::new("SAVE-0badc0de", config.clone(), &saved_at);

        assert_eq!(session.id, "SAVE-0badc0de");
        assert_eq!(session.config, config);
        assert_eq!(session.date, "03/05/2024, 02:07 PM");
        assert_eq!(session.summary, "7 Devices");
        assert_eq!(session.unix_time, saved_at.timestamp());
    }

    #[test]
    fn test_session_wire_shape() {
        let saved_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let config = Configuration::new().with(DeviceType::PowerPack, 2);
        let session = Session::new("test-123", config, &saved_at);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["id"], "test-123");
        assert_eq!(json["config"]["PowerPack"], 2);
        assert_eq!(json["unix_time"], 1_704_067_200_i64);

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
