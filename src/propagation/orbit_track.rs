//! Orbit track generation

use std::f64::consts::PI;

use glam::DVec3;

use super::propagator::{angular_speed, display_position_at, OrbitPropagator};
use crate::data::TrackedObject;

/// Ticks needed for one display revolution of the orbit type
pub fn revolution_ticks(object: &TrackedObject) -> f64 {
    2.0 * PI / angular_speed(object.orbit_type)
}

/// Ticks after which the display path repeats.
///
/// The out-of-plane term runs at half the angular rate, so the path only
/// closes after two revolutions.
pub fn path_period_ticks(object: &TrackedObject) -> f64 {
    2.0 * revolution_ticks(object)
}

/// Sample the closed display path of one object.
///
/// Samples run from half a path period before `center_tick` to half a
/// period after it, `num_points + 1` points inclusive, so the first and
/// last points coincide.
pub fn generate_orbit_track(
    object: &TrackedObject,
    index: usize,
    group_size: usize,
    center_tick: u64,
    num_points: u32,
) -> Vec<DVec3> {
    if num_points == 0 {
        return vec![display_position_at(object, index, group_size, center_tick as f64)];
    }

    let period = path_period_ticks(object);
    let start = center_tick as f64 - period / 2.0;
    let step = period / num_points as f64;

    (0..=num_points)
        .map(|i| display_position_at(object, index, group_size, start + step * i as f64))
        .collect()
}

impl OrbitPropagator {
    /// Display path of a catalog object centred on `center_tick`
    pub fn orbit_track(&self, object: &TrackedObject, center_tick: u64, num_points: u32) -> Vec<DVec3> {
        let (index, group_size) = self.slot(object);
        generate_orbit_track(object, index, group_size, center_tick, num_points)
    }
}
