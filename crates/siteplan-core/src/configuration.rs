//! Device configurations.
//!
//! A configuration maps device types to requested counts. Callers hand in a
//! [`RawConfiguration`] keyed by plain strings; once it passes
//! [`crate::validation::validate`] it becomes a typed [`Configuration`] that
//! the layout engine and session store accept.

use crate::device::DeviceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An untrusted device-count mapping as it arrives from a caller.
///
/// Keys may name unknown device types and counts may be negative; both are
/// rejected by validation.
pub type RawConfiguration = BTreeMap<String, i64>;

/// A validated mapping from device type to non-negative count.
///
/// Types that are absent count as zero. Entries explicitly set to zero are
/// kept so that a saved configuration reloads exactly as it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(BTreeMap<DeviceType, u32>);

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, device_type: DeviceType, count: u32) -> Self {
        self.set(device_type, count);
        self
    }

    pub fn set(&mut self, device_type: DeviceType, count: u32) {
        self.0.insert(device_type, count);
    }

    /// Requested count for a device type, zero when absent.
    pub fn count(&self, device_type: DeviceType) -> u32 {
        self.0.get(&device_type).copied().unwrap_or(0)
    }

    /// Entries in device-type declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceType, u32)> + '_ {
        self.0.iter().map(|(device_type, count)| (*device_type, *count))
    }

    /// Sum of every requested count, transformers included.
    pub fn total_devices(&self) -> u64 {
        self.0.values().map(|count| u64::from(*count)).sum()
    }

    /// Sum of every non-transformer count.
    pub fn battery_count(&self) -> u64 {
        self.iter()
            .filter(|(device_type, _)| device_type.is_battery())
            .map(|(_, count)| u64::from(count))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_devices() == 0
    }

    /// Converts back to the string-keyed wire form.
    pub fn to_raw(&self) -> RawConfiguration {
        self.iter()
            .map(|(device_type, count)| (device_type.to_string(), i64::from(count)))
            .collect()
    }
}

impl FromIterator<(DeviceType, u32)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (DeviceType, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Request payload shared by the calculate and save operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Session id to overwrite on save; a fresh id is generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Requested device counts keyed by device type name
    pub configs: RawConfiguration,
}

impl LayoutRequest {
    /// The explicit session id, treating an empty string as absent.
    pub fn session_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
