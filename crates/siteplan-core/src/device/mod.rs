//! Device domain module.
//!
//! - `registry`: the closed `DeviceType` enumeration and its static specs

mod registry;

pub use registry::{CatalogEntry, DeviceSpec, DeviceType, catalog};
