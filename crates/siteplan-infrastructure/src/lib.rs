//! Infrastructure layer for Siteplan: file-backed persistence, paths and
//! configuration loading.

pub mod config_service;
pub mod json_session_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_session_repository::{JsonSessionRepository, SessionDocument};
pub use crate::paths::SiteplanPaths;
