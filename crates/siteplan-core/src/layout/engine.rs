//! Layout engine: first-fit decreasing row packing.
//!
//! The engine is a pure function of its input. Device instances are expanded
//! in device-type declaration order, sorted by width (descending) with ties
//! broken by type name and then expansion index, and packed into rows of the
//! fixed site width. The same configuration always yields the same layout.

use super::model::{PlacedDevice, Position, SiteLayout};
use crate::configuration::Configuration;
use crate::device::{DeviceSpec, DeviceType};
use std::cmp::Ordering;
use strum::IntoEnumIterator;

/// Width of every site, in site-plan units.
pub const MAX_SITE_WIDTH: u32 = 100;

/// Batteries served by one transformer.
const BATTERIES_PER_TRANSFORMER: u64 = 2;

/// Transformer count for a configuration.
///
/// One transformer per two batteries, rounded down. A larger explicit request
/// is kept; a smaller one is raised to the minimum.
pub fn required_transformers(config: &Configuration) -> u32 {
    let minimum = config.battery_count() / BATTERIES_PER_TRANSFORMER;
    let minimum = u32::try_from(minimum).unwrap_or(u32::MAX);
    config.count(DeviceType::Transformer).max(minimum)
}

/// Computes the site layout for a validated configuration.
///
/// The configuration is not modified; the transformer top-up only affects
/// the returned layout.
pub fn generate_layout(config: &Configuration) -> SiteLayout {
    let transformer_count = required_transformers(config);

    let mut instances = expand_instances(config, transformer_count);
    instances.sort_by(placement_order);

    let mut packer = RowPacker::new(MAX_SITE_WIDTH);
    let mut placed_devices = Vec::with_capacity(instances.len());
    let mut total_cost = 0.0;
    let mut total_energy = 0.0;

    for (index, instance) in instances.iter().enumerate() {
        let spec = instance.spec;
        let position = packer.place(spec.width, spec.height);
        placed_devices.push(PlacedDevice {
            id: format!("{}-{}", instance.device_type, index),
            device_type: instance.device_type,
            width: spec.width,
            height: spec.height,
            position,
        });
        total_cost += spec.cost;
        total_energy += spec.energy;
    }

    tracing::debug!(
        devices = placed_devices.len(),
        rows = packer.rows.len(),
        transformers = transformer_count,
        "Generated site layout"
    );

    SiteLayout {
        placed_devices,
        total_width: MAX_SITE_WIDTH,
        total_height: packer.total_height(),
        total_cost,
        total_energy,
        transformer_count,
    }
}

/// One unit of a device type awaiting placement.
struct Instance {
    device_type: DeviceType,
    spec: &'static DeviceSpec,
    /// Position in the expansion sequence, the final tie-break
    sequence: usize,
}

/// Batteries in declaration order, then the transformers.
fn expand_instances(config: &Configuration, transformer_count: u32) -> Vec<Instance> {
    let battery_units = DeviceType::iter()
        .filter(|device_type| device_type.is_battery())
        .flat_map(|device_type| (0..config.count(device_type)).map(move |_| device_type));
    let transformer_units = (0..transformer_count).map(|_| DeviceType::Transformer);

    battery_units
        .chain(transformer_units)
        .enumerate()
        .map(|(sequence, device_type)| Instance {
            device_type,
            spec: device_type.spec(),
            sequence,
        })
        .collect()
}

fn placement_order(a: &Instance, b: &Instance) -> Ordering {
    b.spec
        .width
        .cmp(&a.spec.width)
        .then_with(|| a.device_type.as_ref().cmp(b.device_type.as_ref()))
        .then_with(|| a.sequence.cmp(&b.sequence))
}

/// A horizontal strip of the site.
#[derive(Debug, Clone, Copy)]
struct Row {
    y: u32,
    used_width: u32,
    height: u32,
}

/// First-fit row allocator.
struct RowPacker {
    max_width: u32,
    rows: Vec<Row>,
}

impl RowPacker {
    fn new(max_width: u32) -> Self {
        Self {
            max_width,
            rows: Vec::new(),
        }
    }

    /// Places an item in the first row with room for it, opening a new row
    /// below the last one when none fits.
    fn place(&mut self, width: u32, height: u32) -> Position {
        let max_width = self.max_width;
        if let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.used_width + width <= max_width)
        {
            let position = Position {
                x: row.used_width,
                y: row.y,
            };
            row.used_width += width;
            row.height = row.height.max(height);
            return position;
        }

        let y = self.rows.last().map(|row| row.y + row.height).unwrap_or(0);
        self.rows.push(Row {
            y,
            used_width: width,
            height,
        });
        Position { x: 0, y }
    }

    fn total_height(&self) -> u32 {
        self.rows.iter().map(|row| row.height).sum()
    }
}
