//! Layout domain module.
//!
//! - `model`: layout result types (`SiteLayout`, `PlacedDevice`, `Position`)
//! - `engine`: transformer sizing and first-fit decreasing row packing

mod engine;
mod model;

pub use engine::{MAX_SITE_WIDTH, generate_layout, required_transformers};
pub use model::{PlacedDevice, Position, SiteLayout};
