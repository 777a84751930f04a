//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/siteplan/config.toml by default).

use crate::paths::SiteplanPaths;
use siteplan_core::config::RootConfig;
use siteplan_core::{Result, SiteplanError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// The file is read once on first access; later calls return the cached
/// value until `invalidate_cache` is called.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading the platform default config file.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(SiteplanPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| SiteplanError::internal("config cache lock poisoned"))?;
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_config(&self.path)?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| SiteplanError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Resolves the session document path: an explicit override wins, then
    /// the config file, then the platform default.
    pub fn sessions_file(&self, override_path: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path);
        }
        match self.get_config()?.storage.sessions_file {
            Some(path) => Ok(path),
            None => SiteplanPaths::sessions_file(),
        }
    }

    fn load_config(path: &Path) -> Result<RootConfig> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?path, "No config file, using defaults");
                return Ok(RootConfig::default());
            }
            Err(err) => return Err(err.into()),
        };

        toml::from_str(&content).map_err(|err| {
            SiteplanError::config(format!("Invalid config file {}: {}", path.display(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config().unwrap(), RootConfig::default());
    }

    #[test]
    fn test_loads_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[logging]\nfilter = \"debug\"\n").unwrap();
        let service = ConfigService::new(&path);

        assert_eq!(service.get_config().unwrap().logging.filter, "debug");

        // Cached until invalidated
        fs::write(&path, "[logging]\nfilter = \"warn\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().logging.filter, "debug");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().logging.filter, "warn");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[storage\nsessions_file = ").unwrap();
        let service = ConfigService::new(&path);

        assert!(matches!(service.get_config(), Err(SiteplanError::Config(_))));
    }

    #[test]
    fn test_sessions_file_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[storage]\nsessions_file = \"/srv/sessions.json\"\n").unwrap();
        let service = ConfigService::new(&path);

        let explicit = PathBuf::from("/tmp/override.json");
        assert_eq!(
            service.sessions_file(Some(explicit.clone())).unwrap(),
            explicit
        );
        assert_eq!(
            service.sessions_file(None).unwrap(),
            PathBuf::from("/srv/sessions.json")
        );
    }
}
