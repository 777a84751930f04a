//! Session domain module.
//!
//! This module contains the saved-configuration model, the repository
//! interface used to persist it, and session ID generation.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `repository`: Repository trait for session persistence
//! - `id`: Session ID generation (`generate_id`)

mod id;
mod model;
mod repository;

// Re-export public API
pub use id::{SESSION_ID_PREFIX, generate_id, generate_id_with};
pub use model::{SESSION_DATE_FORMAT, Session};
pub use repository::SessionRepository;
