//! Display-scale orbit propagation
//!
//! Positions are a pure function of an object's static attributes, its slot
//! in the orbit group and the tick. No state is carried between ticks, so
//! there is no integration drift and any tick can be evaluated directly.

use std::f64::consts::PI;
use std::sync::Arc;

use glam::DVec3;
use rayon::prelude::*;

use crate::data::{CatalogStore, OrbitType, RiskLevel, TrackedObject};
use crate::risk::AsRiskLevel;

/// Altitude (km) that adds one unit to the display shell radius
pub const SHELL_SCALE_KM: f64 = 50_000.0;

/// Display angular speed in radians per tick.
///
/// A fixed lookup ordered LEO > MEO > HEO = GEO, chosen for a readable
/// animation. It is not derived from real orbital periods.
pub fn angular_speed(orbit_type: OrbitType) -> f64 {
    match orbit_type {
        OrbitType::Leo => 0.002,
        OrbitType::Meo => 0.001,
        OrbitType::Heo => 0.0002,
        OrbitType::Geo => 0.0002,
    }
}

/// Display shell radius in Earth-radius-like render units.
///
/// `1 + altitude / 50000` keeps every class inside a small scene; this is a
/// normalization for drawing, not the true orbital radius.
pub fn shell_radius(altitude_km: f64) -> f64 {
    1.0 + altitude_km / SHELL_SCALE_KM
}

/// Phase offset of slot `index` in a group of `group_size` objects
pub fn base_angle(index: usize, group_size: usize) -> f64 {
    if group_size == 0 {
        return 0.0;
    }
    (index as f64 / group_size as f64) * 2.0 * PI
}

/// Display position at a (possibly fractional) time in ticks
pub fn display_position_at(object: &TrackedObject, index: usize, group_size: usize, t: f64) -> DVec3 {
    let angle = base_angle(index, group_size) + t * angular_speed(object.orbit_type);
    let radius = shell_radius(object.altitude_km);
    let inclination_rad = object.inclination_deg * PI / 180.0;
    let tilt = inclination_rad * 0.3;

    DVec3::new(
        angle.cos() * radius * tilt.cos(),
        tilt.sin() * radius * 0.3 * (angle * 0.5).sin(),
        angle.sin() * radius,
    )
}

/// Display position at an integer tick
pub fn display_position(object: &TrackedObject, index: usize, group_size: usize, tick: u64) -> DVec3 {
    display_position_at(object, index, group_size, tick as f64)
}

/// Propagated state of one object at one tick
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectState {
    pub object: Arc<TrackedObject>,
    /// Position in display units (see [`shell_radius`])
    pub position: DVec3,
}

impl AsRef<TrackedObject> for ObjectState {
    fn as_ref(&self) -> &TrackedObject {
        &self.object
    }
}

impl AsRiskLevel for ObjectState {
    fn risk_level(&self) -> RiskLevel {
        self.object.risk_level
    }
}

/// Immutable set of object states for one tick.
///
/// A new snapshot is produced every tick; readers keep whichever snapshot
/// they hold for as long as they like.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tick: u64,
    states: Arc<[ObjectState]>,
}

impl Snapshot {
    pub fn new(tick: u64, states: Vec<ObjectState>) -> Self {
        Self {
            tick,
            states: states.into(),
        }
    }

    pub fn states(&self) -> &[ObjectState] {
        &self.states
    }

    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.states.iter().map(|s| s.object.as_ref())
    }

    pub fn get(&self, id: &str) -> Option<&ObjectState> {
        self.states.iter().find(|s| s.object.id == id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Computes positions for the objects of one catalog
#[derive(Debug, Clone)]
pub struct OrbitPropagator {
    catalog: Arc<CatalogStore>,
}

impl OrbitPropagator {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Group slot for an object; unregistered objects fall back to slot 0
    pub fn slot(&self, object: &TrackedObject) -> (usize, usize) {
        let group_size = self.catalog.group_size(object.orbit_type);
        let index = self.catalog.index_within_group(object).unwrap_or(0);
        (index, group_size)
    }

    /// Position of a single object at `tick`
    pub fn propagate(&self, object: &TrackedObject, tick: u64) -> DVec3 {
        let (index, group_size) = self.slot(object);
        display_position(object, index, group_size, tick)
    }

    /// Snapshot of every catalog object at `tick`.
    ///
    /// Objects have no cross dependencies, so they are evaluated in parallel;
    /// output order is the catalog order.
    pub fn propagate_all(&self, tick: u64) -> Snapshot {
        let objects = self.catalog.all();
        let states: Vec<ObjectState> = objects
            .par_iter()
            .enumerate()
            .map(|(idx, object)| {
                let index = self.catalog.group_index_at(idx).unwrap_or(0);
                let group_size = self.catalog.group_size(object.orbit_type);
                ObjectState {
                    object: Arc::clone(object),
                    position: display_position(object, index, group_size, tick),
                }
            })
            .collect();

        log::debug!("Propagated {} objects for tick {}", states.len(), tick);
        Snapshot::new(tick, states)
    }

    /// Snapshot of the listed ids only; unknown ids are skipped
    pub fn propagate_subset(&self, ids: &[&str], tick: u64) -> Snapshot {
        let states = ids
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .map(|object| ObjectState {
                object: Arc::clone(object),
                position: self.propagate(object, tick),
            })
            .collect();
        Snapshot::new(tick, states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ObjectClass;
    use proptest::prelude::*;

    fn object(id: &str, orbit_type: OrbitType, altitude_km: f64, inclination_deg: f64) -> TrackedObject {
        TrackedObject {
            id: id.into(),
            name: id.into(),
            class: ObjectClass::Satellite,
            orbit_type,
            altitude_km,
            inclination_deg,
            velocity_km_s: 7.5,
            risk_level: RiskLevel::Safe,
            origin: None,
            size: None,
        }
    }

    fn leo_trio() -> OrbitPropagator {
        let catalog = CatalogStore::from_objects(vec![
            object("a", OrbitType::Leo, 400.0, 0.0),
            object("b", OrbitType::Leo, 500.0, 0.0),
            object("c", OrbitType::Leo, 600.0, 0.0),
        ]);
        OrbitPropagator::new(Arc::new(catalog))
    }

    #[test]
    fn test_leo_trio_at_tick_zero() {
        let propagator = leo_trio();
        let snapshot = propagator.propagate_all(0);
        assert_eq!(snapshot.len(), 3);

        let expected_angles = [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0];
        let mut last_radius = 0.0;
        for (state, angle) in snapshot.states().iter().zip(expected_angles) {
            let radius = shell_radius(state.object.altitude_km);
            assert!(radius > last_radius);
            last_radius = radius;

            // Zero inclination: the path is a circle in the x/z plane
            assert!((state.position.x - angle.cos() * radius).abs() < 1e-12);
            assert!((state.position.z - angle.sin() * radius).abs() < 1e-12);
            assert_eq!(state.position.y, 0.0);
        }

        let p = snapshot.states();
        assert!(p[0].position != p[1].position);
        assert!(p[1].position != p[2].position);
        assert!(p[0].position != p[2].position);
    }

    #[test]
    fn test_inclined_position_formula() {
        let obj = object("x", OrbitType::Meo, 20_200.0, 55.0);
        let tick = 1234;
        let p = display_position(&obj, 2, 6, tick);

        let angle = (2.0 / 6.0) * 2.0 * PI + tick as f64 * 0.001;
        let r = 1.0 + 20_200.0 / 50_000.0;
        let inc = 55.0 * PI / 180.0;
        assert_eq!(p.x, angle.cos() * r * (inc * 0.3).cos());
        assert_eq!(p.y, (inc * 0.3).sin() * r * 0.3 * (angle * 0.5).sin());
        assert_eq!(p.z, angle.sin() * r);
    }

    #[test]
    fn test_zero_group_guard() {
        let obj = object("lonely", OrbitType::Heo, 100_000.0, 30.0);
        let empty = OrbitPropagator::new(Arc::new(CatalogStore::new()));
        assert_eq!(empty.catalog().group_size(OrbitType::Heo), 0);

        let p = empty.propagate(&obj, 10);
        assert!(p.is_finite());
        assert_eq!(p, display_position(&obj, 0, 1, 10));
    }

    #[test]
    fn test_speed_table_order() {
        assert!(angular_speed(OrbitType::Leo) > angular_speed(OrbitType::Meo));
        assert!(angular_speed(OrbitType::Meo) > angular_speed(OrbitType::Heo));
        for orbit in OrbitType::ALL {
            assert!(angular_speed(orbit) >= angular_speed(OrbitType::Geo));
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let specs = crate::data::world_manifest(21);
        let catalog = crate::data::build_catalog(specs, &crate::risk::RiskClassifier::new(21));
        let propagator = OrbitPropagator::new(Arc::new(catalog));

        let snapshot = propagator.propagate_all(777);
        for state in snapshot.states() {
            assert_eq!(state.position, propagator.propagate(&state.object, 777));
        }
    }

    #[test]
    fn test_subset_skips_unknown_ids() {
        let propagator = leo_trio();
        let snapshot = propagator.propagate_subset(&["c", "missing", "a"], 5);
        let ids: Vec<&str> = snapshot.objects().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    proptest! {
        #[test]
        fn prop_propagation_is_deterministic(
            altitude in 0.0f64..2_000_000.0,
            inclination in 0.0f64..=180.0,
            index in 0usize..50,
            extra in 0usize..50,
            tick in 0u64..10_000_000,
        ) {
            let obj = object("p", OrbitType::Leo, altitude, inclination);
            let group_size = index + extra + 1;
            let first = display_position(&obj, index, group_size, tick);
            let second = display_position(&obj, index, group_size, tick);
            prop_assert_eq!(first.x.to_bits(), second.x.to_bits());
            prop_assert_eq!(first.y.to_bits(), second.y.to_bits());
            prop_assert_eq!(first.z.to_bits(), second.z.to_bits());
        }

        #[test]
        fn prop_shell_radius_is_monotonic(low in 0.0f64..1_000_000.0, delta in 1e-3f64..1_000_000.0) {
            prop_assert!(shell_radius(low + delta) > shell_radius(low));
        }
    }
}
