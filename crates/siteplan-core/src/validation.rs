//! Configuration validation.
//!
//! Turns an untrusted [`RawConfiguration`] into a typed [`Configuration`] or
//! explains why it was rejected. Runs before any other operation that takes a
//! configuration and has no side effects.

use crate::configuration::{Configuration, RawConfiguration};
use crate::device::DeviceType;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on the count of any single device type.
pub const MAX_PER_TYPE: i64 = 1000;

/// Upper bound on the number of devices across the whole site.
pub const MAX_SITE_DEVICES: i64 = 5000;

/// Reasons a configuration is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid count for {device_type}: {count} (counts cannot be negative)")]
    NegativeCount { device_type: String, count: i64 },

    #[error("too many {device_type} devices: {count} (limit {limit} per type)", limit = MAX_PER_TYPE)]
    PerTypeLimitExceeded { device_type: String, count: i64 },

    #[error("unknown device type: {0}")]
    UnknownDeviceType(String),

    #[error("configuration is empty: request at least one device")]
    EmptyConfiguration,

    #[error("too many devices on site: {total} (limit {limit})", limit = MAX_SITE_DEVICES)]
    SiteLimitExceeded { total: i64 },
}

/// Validates a raw configuration.
///
/// Entries are checked in key order. Unknown keys and negative counts are
/// reported first, then the site-wide total (empty, then over the site
/// limit), then the per-type limit.
pub fn validate(raw: &RawConfiguration) -> Result<Configuration, ValidationError> {
    let mut typed = Vec::with_capacity(raw.len());
    for (name, &count) in raw {
        let device_type = DeviceType::from_str(name)
            .map_err(|_| ValidationError::UnknownDeviceType(name.clone()))?;
        if count < 0 {
            return Err(ValidationError::NegativeCount {
                device_type: name.clone(),
                count,
            });
        }
        typed.push((device_type, count));
    }

    let total = typed
        .iter()
        .fold(0_i64, |sum, (_, count)| sum.saturating_add(*count));
    if total == 0 {
        return Err(ValidationError::EmptyConfiguration);
    }
    if total > MAX_SITE_DEVICES {
        return Err(ValidationError::SiteLimitExceeded { total });
    }

    typed
        .into_iter()
        .map(|(device_type, count)| {
            if count > MAX_PER_TYPE {
                return Err(ValidationError::PerTypeLimitExceeded {
                    device_type: device_type.to_string(),
                    count,
                });
            }
            // Bounded by MAX_PER_TYPE above.
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            Ok((device_type, count))
        })
        .collect()
}
