pub mod devices;
pub mod layout;
pub mod session;

use anyhow::{Context, Result};
use serde::Serialize;
use siteplan_application::{LayoutUseCase, SessionUseCase};
use siteplan_core::LayoutRequest;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Use cases wired to one session store.
pub struct App {
    pub sessions: SessionUseCase,
    pub layouts: LayoutUseCase,
}

impl App {
    pub fn new(sessions_file: PathBuf) -> Self {
        let sessions = SessionUseCase::with_json_store(sessions_file);
        let layouts = LayoutUseCase::new(sessions.repository());
        Self { sessions, layouts }
    }
}

/// Reads a `LayoutRequest` from a file, or from stdin when no path is given.
pub fn read_request(input: Option<&Path>) -> Result<LayoutRequest> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            buffer
        }
    };
    parse_request(&raw)
}

pub fn parse_request(raw: &str) -> Result<LayoutRequest> {
    serde_json::from_str(raw).context("Invalid JSON body")
}

/// Writes a value to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to encode response")?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_request() {
        let request = parse_request(r#"{"id":"SAVE-1","configs":{"PowerPack":3}}"#).unwrap();
        assert_eq!(request.session_id(), Some("SAVE-1"));
        assert_eq!(request.configs.get("PowerPack"), Some(&3));
    }

    #[test]
    fn test_parse_request_rejects_malformed_json() {
        let err = parse_request(r#"{"configs": {"PowerPack": "three"}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON body");

        assert!(parse_request(r#"{"id":"x"}"#).is_err());
    }

    #[test]
    fn test_read_request_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("request.json");
        fs::write(&path, r#"{"configs":{"MegapackXL":1}}"#).unwrap();

        let request = read_request(Some(&path)).unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.configs.get("MegapackXL"), Some(&1));
    }
}
