//! Static device catalogue.
//!
//! Every device type the site can hold is listed here with its footprint,
//! price and energy rating. The table is fixed at compile time and never
//! changes while the process runs.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// The closed set of devices that can be placed on a site.
///
/// Serialized as the exact variant name (e.g. `"MegapackXL"`), which is also
/// the key used in configuration mappings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum DeviceType {
    MegapackXL,
    Megapack2,
    Megapack,
    PowerPack,
    Transformer,
}

impl DeviceType {
    /// Returns the immutable spec for this device type.
    pub fn spec(self) -> &'static DeviceSpec {
        match self {
            Self::MegapackXL => &MEGAPACK_XL,
            Self::Megapack2 => &MEGAPACK_2,
            Self::Megapack => &MEGAPACK,
            Self::PowerPack => &POWER_PACK,
            Self::Transformer => &TRANSFORMER,
        }
    }

    /// Batteries are every device type except the transformer.
    pub fn is_battery(self) -> bool {
        self != Self::Transformer
    }

    /// Iterates over the battery types in declaration order.
    pub fn batteries() -> impl Iterator<Item = DeviceType> {
        Self::iter().filter(|device_type| device_type.is_battery())
    }
}

/// Physical and economic properties of a device type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceSpec {
    /// Human-readable name
    pub name: &'static str,
    /// Footprint width in site-plan units
    pub width: u32,
    /// Footprint height in site-plan units
    pub height: u32,
    /// Unit price
    pub cost: f64,
    /// Net energy in MWh; transformers draw power, so theirs is negative
    pub energy: f64,
}

const MEGAPACK_XL: DeviceSpec = DeviceSpec {
    name: "Megapack XL",
    width: 40,
    height: 10,
    cost: 120_000.0,
    energy: 4.0,
};

const MEGAPACK_2: DeviceSpec = DeviceSpec {
    name: "Megapack 2",
    width: 30,
    height: 10,
    cost: 80_000.0,
    energy: 3.0,
};

const MEGAPACK: DeviceSpec = DeviceSpec {
    name: "Megapack",
    width: 30,
    height: 10,
    cost: 50_000.0,
    energy: 2.0,
};

const POWER_PACK: DeviceSpec = DeviceSpec {
    name: "PowerPack",
    width: 10,
    height: 10,
    cost: 10_000.0,
    energy: 1.0,
};

const TRANSFORMER: DeviceSpec = DeviceSpec {
    name: "Transformer",
    width: 10,
    height: 10,
    cost: 10_000.0,
    energy: -0.5,
};

/// One row of the device catalogue, as listed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(flatten)]
    pub spec: DeviceSpec,
}

/// Lists every registered device type with its spec, in declaration order.
pub fn catalog() -> Vec<CatalogEntry> {
    DeviceType::iter()
        .map(|device_type| CatalogEntry {
            device_type,
            spec: *device_type.spec(),
        })
        .collect()
}
