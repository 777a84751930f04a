//! Atomic JSON file operations.
//!
//! Provides a thin layer for crash-safe replacement of a single JSON document.

use serde::{Serialize, de::DeserializeOwned};
use siteplan_core::SiteplanError;
use std::fs;
use std::io::{ErrorKind, Write as IoWrite};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during atomic JSON operations.
#[derive(Error, Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file exists but does not hold the expected JSON document.
    #[error("Corrupt JSON document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory value could not be serialized.
    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl From<AtomicJsonError> for SiteplanError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Io { .. } => SiteplanError::io(err.to_string()),
            AtomicJsonError::Parse { .. } | AtomicJsonError::Serialize(_) => {
                SiteplanError::Serialization {
                    format: "JSON".to_string(),
                    message: err.to_string(),
                }
            }
        }
    }
}

/// A handle to a JSON file that is only ever replaced whole.
///
/// Provides:
/// - **Atomicity**: writes go to a temporary file in the same directory,
///   which is then renamed over the target
/// - **Consistency**: the document is parsed into `T` on every load
/// - **Durability**: the temporary file is fsynced before the rename
///
/// Isolation is the caller's job: concurrent `update` calls on the same path
/// must be serialized externally.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

// Only the path is cloned; `T` need not be `Clone`.
impl<T> Clone for AtomicJsonFile<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic JSON file handle.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist
    /// - `Err`: Failed to read the file, or its contents are not a valid `T`
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(AtomicJsonError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|source| AtomicJsonError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Saves data to the file atomically.
    ///
    /// On failure the temporary file is removed and the previous document is
    /// left untouched.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        let json = serde_json::to_vec_pretty(data).map_err(AtomicJsonError::Serialize)?;

        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;

        // Dropping an unpersisted NamedTempFile deletes it.
        let mut tmp_file = tempfile::Builder::new()
            .prefix(&self.temp_prefix())
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|source| self.io_error(source))?;
        tmp_file
            .write_all(&json)
            .map_err(|source| self.io_error(source))?;
        tmp_file
            .as_file()
            .sync_all()
            .map_err(|source| self.io_error(source))?;

        tmp_file
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;

        Ok(())
    }

    /// Performs a read-modify-write cycle.
    ///
    /// `f` receives the current document (or `default_value` when the file
    /// doesn't exist) and returns whether it changed anything. The document
    /// is written back only when it did.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The document was modified and written
    /// - `Ok(false)`: Nothing changed, nothing was written
    /// - `Err`: Failed to read, parse or write
    pub fn update<F>(&self, default_value: T, f: F) -> Result<bool, AtomicJsonError>
    where
        F: FnOnce(&mut T) -> bool,
    {
        let mut data = self.load()?.unwrap_or(default_value);

        if !f(&mut data) {
            return Ok(false);
        }

        self.save(&data)?;
        Ok(true)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// `.<file name>.` so leftovers are hidden and traceable to their target.
    fn temp_prefix(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        format!(".{file_name}.")
    }

    fn io_error(&self, source: std::io::Error) -> AtomicJsonError {
        AtomicJsonError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
