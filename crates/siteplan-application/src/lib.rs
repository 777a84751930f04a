//! Application layer for Siteplan.
//!
//! This crate provides use case implementations that coordinate between
//! domain and infrastructure layers: validation first, then either the
//! layout engine or the session store.

pub mod layout_usecase;
pub mod session_usecase;

pub use layout_usecase::LayoutUseCase;
pub use session_usecase::SessionUseCase;
