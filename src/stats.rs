//! Derived counts over the live object collection

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::{ObjectClass, OrbitType, RiskLevel, TrackedObject};

/// Satellite-vocabulary risk totals
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RiskBreakdown {
    pub safe: usize,
    pub warning: usize,
    pub critical: usize,
}

/// Object totals by orbit type
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct OrbitBreakdown {
    pub leo: usize,
    pub meo: usize,
    pub geo: usize,
    pub heo: usize,
}

impl OrbitBreakdown {
    pub fn get(&self, orbit_type: OrbitType) -> usize {
        match orbit_type {
            OrbitType::Leo => self.leo,
            OrbitType::Meo => self.meo,
            OrbitType::Geo => self.geo,
            OrbitType::Heo => self.heo,
        }
    }

    pub fn total(&self) -> usize {
        self.leo + self.meo + self.geo + self.heo
    }
}

/// Debris totals by risk bucket
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DebrisBreakdown {
    pub total: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ClassBreakdown {
    pub satellites: usize,
    pub debris: usize,
    pub asteroids: usize,
}

/// Statistics about the current object collection
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub by_risk: RiskBreakdown,
    pub by_orbit: OrbitBreakdown,
    pub by_class: ClassBreakdown,
    pub debris: DebrisBreakdown,
    /// Members per named family, keyed by family name
    pub families: BTreeMap<String, usize>,
    /// Critical satellites plus high-risk debris
    pub active_alerts: usize,
}

/// Name-pattern family: an object belongs if its name contains any pattern
#[derive(Debug, Clone)]
pub struct FamilyPattern {
    pub name: String,
    pub patterns: Vec<String>,
}

impl FamilyPattern {
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn matches(&self, object_name: &str) -> bool {
        self.patterns.iter().any(|p| object_name.contains(p.as_str()))
    }
}

/// Full recomputation of stats; holds only the family configuration
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    families: Vec<FamilyPattern>,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new(vec![
            FamilyPattern::new("starlink", &["Starlink"]),
            FamilyPattern::new("gps", &["GPS"]),
            FamilyPattern::new("scientific", &["Hubble", "JWST", "Chandra", "TESS", "Fermi"]),
        ])
    }
}

impl StatsAggregator {
    pub fn new(families: Vec<FamilyPattern>) -> Self {
        Self { families }
    }

    /// Single O(n) pass; identical input gives identical output
    pub fn aggregate<'a, I>(&self, objects: I) -> Stats
    where
        I: IntoIterator<Item = &'a TrackedObject>,
    {
        let mut stats = Stats::default();
        for family in &self.families {
            stats.families.insert(family.name.clone(), 0);
        }

        for obj in objects {
            stats.total += 1;

            match obj.orbit_type {
                OrbitType::Leo => stats.by_orbit.leo += 1,
                OrbitType::Meo => stats.by_orbit.meo += 1,
                OrbitType::Geo => stats.by_orbit.geo += 1,
                OrbitType::Heo => stats.by_orbit.heo += 1,
            }

            match obj.class {
                ObjectClass::Satellite => stats.by_class.satellites += 1,
                ObjectClass::Debris => stats.by_class.debris += 1,
                ObjectClass::Asteroid => stats.by_class.asteroids += 1,
            }

            match obj.risk_level {
                RiskLevel::Safe => stats.by_risk.safe += 1,
                RiskLevel::Warning => stats.by_risk.warning += 1,
                RiskLevel::Critical => {
                    stats.by_risk.critical += 1;
                    stats.active_alerts += 1;
                }
                RiskLevel::Low => stats.debris.low += 1,
                RiskLevel::Medium => stats.debris.medium += 1,
                RiskLevel::High => {
                    stats.debris.high += 1;
                    stats.active_alerts += 1;
                }
            }
            if obj.is_debris() {
                stats.debris.total += 1;
            }

            for family in &self.families {
                if family.matches(&obj.name) {
                    if let Some(count) = stats.families.get_mut(&family.name) {
                        *count += 1;
                    }
                }
            }
        }

        stats
    }
}
