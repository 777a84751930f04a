//! Unified path management for siteplan files.
//!
//! Paths are resolved with the `dirs` crate so each platform gets its
//! conventional location.

use siteplan_core::SiteplanError;
use std::path::PathBuf;

const APP_DIR: &str = "siteplan";

/// Unified path management for siteplan.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/siteplan/          # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/siteplan/     # Data directory
/// └── sessions.json            # Saved configurations
/// ```
pub struct SiteplanPaths;

impl SiteplanPaths {
    /// Returns the siteplan configuration directory.
    pub fn config_dir() -> Result<PathBuf, SiteplanError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SiteplanError::config("Cannot determine the configuration directory"))
    }

    /// Returns the siteplan data directory.
    pub fn data_dir() -> Result<PathBuf, SiteplanError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SiteplanError::config("Cannot determine the data directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, SiteplanError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default path of the session document.
    pub fn sessions_file() -> Result<PathBuf, SiteplanError> {
        Ok(Self::data_dir()?.join("sessions.json"))
    }
}
