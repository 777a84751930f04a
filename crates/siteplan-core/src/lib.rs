//! Domain layer for Siteplan.
//!
//! Holds everything that does not touch the outside world: the device
//! registry, configuration validation, the layout engine, the session model
//! and the repository interface the infrastructure layer implements.

pub mod config;
pub mod configuration;
pub mod device;
pub mod error;
pub mod layout;
pub mod session;
pub mod validation;

// Re-export common types
pub use configuration::{Configuration, LayoutRequest, RawConfiguration};
pub use device::{DeviceSpec, DeviceType};
pub use error::{Result, SiteplanError};
pub use layout::{SiteLayout, generate_layout};
pub use validation::{ValidationError, validate};
