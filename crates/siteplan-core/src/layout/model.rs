//! Layout result types.
//!
//! Field names match the JSON wire shape (`placed_devices`, `total_width`, ...).

use crate::device::DeviceType;
use serde::{Deserialize, Serialize};

/// Top-left corner of a placed device, in site-plan units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// A single device instance placed on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedDevice {
    /// `"<type>-<index>"`, where index is the placement order
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub width: u32,
    pub height: u32,
    pub position: Position,
}

impl PlacedDevice {
    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.position.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.position.y + self.height
    }
}

/// The computed floor plan for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteLayout {
    /// Devices in placement order
    pub placed_devices: Vec<PlacedDevice>,
    /// Always the fixed site width
    pub total_width: u32,
    /// Sum of the heights of all rows used
    pub total_height: u32,
    pub total_cost: f64,
    /// Net energy; transformer draw can make this negative
    pub total_energy: f64,
    #[serde(rename = "transformers_count")]
    pub transformer_count: u32,
}

impl SiteLayout {
    /// Number of placed devices of one type.
    pub fn count_of(&self, device_type: DeviceType) -> usize {
        self.placed_devices
            .iter()
            .filter(|device| device.device_type == device_type)
            .count()
    }
}
