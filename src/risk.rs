//! Risk level seeding and display ordering

use std::sync::Arc;

use crate::data::{ObjectClass, ObjectSpec, RiskLevel, TrackedObject};

/// Default seed used when the host does not supply one
pub const DEFAULT_RISK_SEED: u64 = 0x5eed_0b17;

/// Assigns initial risk levels at catalog load.
///
/// Levels are never reclassified automatically afterwards; only an explicit
/// conjunction analysis reports new risk information.
#[derive(Debug, Clone, Copy)]
pub struct RiskClassifier {
    seed: u64,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_SEED)
    }
}

impl RiskClassifier {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Risk level for a manifest entry.
    ///
    /// An explicit level in the manifest wins. Otherwise the level is drawn
    /// from a hash of (seed, id), so the same seed always produces the same
    /// catalog.
    pub fn classify(&self, spec: &ObjectSpec) -> RiskLevel {
        if let Some(level) = spec.risk_level {
            if level.is_valid_for(spec.class) {
                return level;
            }
            log::warn!(
                "Object {} has risk level '{}' not valid for {:?}, reseeding",
                spec.id,
                level,
                spec.class
            );
        }
        self.seeded_level(&spec.id, spec.class)
    }

    /// Deterministic level for an id
    pub fn seeded_level(&self, id: &str, class: ObjectClass) -> RiskLevel {
        let draw = unit_hash(self.seed ^ fnv1a(id.as_bytes()));
        let rank = match class {
            // Debris skews towards elevated risk buckets
            ObjectClass::Debris => {
                if draw > 0.8 {
                    0
                } else if draw > 0.45 {
                    1
                } else {
                    2
                }
            }
            // Operational constellation members: ~5% flagged for attention
            ObjectClass::Satellite | ObjectClass::Asteroid => {
                if draw > 0.95 {
                    1
                } else {
                    2
                }
            }
        };
        RiskLevel::from_rank(rank, class)
    }
}

/// Stable sort by display precedence: critical/high, warning/medium, safe/low.
///
/// Objects with equal rank keep their relative input order.
pub fn sort_by_risk<T: AsRiskLevel + Clone>(objects: &[T]) -> Vec<T> {
    let mut sorted = objects.to_vec();
    sorted.sort_by_key(|o| o.risk_level().rank());
    sorted
}

/// Anything that carries a risk level
pub trait AsRiskLevel {
    fn risk_level(&self) -> RiskLevel;
}

impl AsRiskLevel for TrackedObject {
    fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }
}

impl AsRiskLevel for RiskLevel {
    fn risk_level(&self) -> RiskLevel {
        *self
    }
}

impl<T: AsRiskLevel + ?Sized> AsRiskLevel for Arc<T> {
    fn risk_level(&self) -> RiskLevel {
        (**self).risk_level()
    }
}

/// 64-bit FNV-1a, stable across builds and platforms
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Finalizer mix mapped to [0, 1]
fn unit_hash(seed: u64) -> f64 {
    let mut x = seed;
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51afd7ed558ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
    x ^= x >> 33;
    (x as f64) / (u64::MAX as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OrbitType;

    fn object(id: &str, risk_level: RiskLevel) -> TrackedObject {
        TrackedObject {
            id: id.into(),
            name: id.into(),
            class: if risk_level.is_debris_level() {
                ObjectClass::Debris
            } else {
                ObjectClass::Satellite
            },
            orbit_type: OrbitType::Leo,
            altitude_km: 550.0,
            inclination_deg: 53.0,
            velocity_km_s: 7.59,
            risk_level,
            origin: None,
            size: None,
        }
    }

    fn spec(id: &str, class: ObjectClass, risk_level: Option<RiskLevel>) -> ObjectSpec {
        ObjectSpec {
            id: id.into(),
            name: id.into(),
            class,
            orbit_type: OrbitType::Leo,
            altitude_km: 550.0,
            inclination_deg: 53.0,
            velocity_km_s: 7.59,
            risk_level,
            origin: None,
            size: None,
        }
    }

    #[test]
    fn test_stable_sort_example() {
        let input = vec![
            object("A", RiskLevel::Warning),
            object("B", RiskLevel::Critical),
            object("C", RiskLevel::Warning),
        ];
        let sorted = sort_by_risk(&input);
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_mixes_vocabularies() {
        let input = vec![
            Arc::new(object("s1", RiskLevel::Safe)),
            Arc::new(object("d1", RiskLevel::Medium)),
            Arc::new(object("d2", RiskLevel::High)),
            Arc::new(object("s2", RiskLevel::Critical)),
            Arc::new(object("d3", RiskLevel::Low)),
        ];
        let sorted = sort_by_risk(&input);
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["d2", "s2", "d1", "s1", "d3"]);
    }

    #[test]
    fn test_explicit_level_wins() {
        let classifier = RiskClassifier::new(7);
        let s = spec("envisat", ObjectClass::Satellite, Some(RiskLevel::Critical));
        assert_eq!(classifier.classify(&s), RiskLevel::Critical);
    }

    #[test]
    fn test_seeded_assignment_is_reproducible() {
        let a = RiskClassifier::new(42);
        let b = RiskClassifier::new(42);
        for i in 0..200 {
            let s = spec(&format!("starlink-{}", i), ObjectClass::Satellite, None);
            assert_eq!(a.classify(&s), b.classify(&s));
        }
    }

    #[test]
    fn test_seeded_levels_use_class_vocabulary() {
        let classifier = RiskClassifier::default();
        for i in 0..100 {
            let id = format!("obj-{}", i);
            assert!(classifier
                .seeded_level(&id, ObjectClass::Debris)
                .is_valid_for(ObjectClass::Debris));
            assert!(classifier
                .seeded_level(&id, ObjectClass::Satellite)
                .is_valid_for(ObjectClass::Satellite));
        }
    }

    #[test]
    fn test_invalid_explicit_level_is_reseeded() {
        let classifier = RiskClassifier::default();
        let s = spec("deb-9", ObjectClass::Debris, Some(RiskLevel::Safe));
        assert!(classifier.classify(&s).is_debris_level());
    }
}
