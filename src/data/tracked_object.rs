//! Tracked object data structures matching the catalog manifest JSON schema

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse orbit class, used as the propagation group key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrbitType {
    #[serde(rename = "LEO")]
    Leo,
    #[serde(rename = "MEO")]
    Meo,
    #[serde(rename = "GEO")]
    Geo,
    #[serde(rename = "HEO")]
    Heo,
}

impl OrbitType {
    pub const ALL: [OrbitType; 4] = [OrbitType::Leo, OrbitType::Meo, OrbitType::Geo, OrbitType::Heo];

    /// Dense index for per-group tables
    pub fn index(self) -> usize {
        match self {
            Self::Leo => 0,
            Self::Meo => 1,
            Self::Geo => 2,
            Self::Heo => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Leo => "LEO",
            Self::Meo => "MEO",
            Self::Geo => "GEO",
            Self::Heo => "HEO",
        }
    }
}

impl std::fmt::Display for OrbitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What kind of object is being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectClass {
    Satellite,
    Debris,
    Asteroid,
}

/// Discrete risk level.
///
/// Satellites (and asteroids) use the `safe`/`warning`/`critical` vocabulary,
/// debris uses `low`/`medium`/`high`. Both map onto the same three severity
/// ranks for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Critical,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Display rank, 0 is the most severe
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical | Self::High => 0,
            Self::Warning | Self::Medium => 1,
            Self::Safe | Self::Low => 2,
        }
    }

    pub fn is_debris_level(self) -> bool {
        matches!(self, Self::Low | Self::Medium | Self::High)
    }

    /// Whether this vocabulary is allowed for the given object class
    pub fn is_valid_for(self, class: ObjectClass) -> bool {
        match class {
            ObjectClass::Debris => self.is_debris_level(),
            ObjectClass::Satellite | ObjectClass::Asteroid => !self.is_debris_level(),
        }
    }

    /// Level of the given rank in the vocabulary of `class`
    pub fn from_rank(rank: u8, class: ObjectClass) -> Self {
        match (class, rank) {
            (ObjectClass::Debris, 0) => Self::High,
            (ObjectClass::Debris, 1) => Self::Medium,
            (ObjectClass::Debris, _) => Self::Low,
            (_, 0) => Self::Critical,
            (_, 1) => Self::Warning,
            (_, _) => Self::Safe,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Size bucket for tracked debris
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebrisSize {
    Small,
    Medium,
    Large,
}

/// Rejected catalog entry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("object id must not be empty")]
    EmptyId,

    #[error("object {id}: altitude {altitude_km} km is negative")]
    NegativeAltitude { id: String, altitude_km: f64 },

    #[error("object {id}: inclination {inclination_deg} deg outside [0, 180]")]
    InclinationOutOfRange { id: String, inclination_deg: f64 },

    #[error("object {id}: velocity {velocity_km_s} km/s is negative")]
    NegativeVelocity { id: String, velocity_km_s: f64 },

    #[error("object {id}: risk level '{level}' not valid for {class:?}")]
    RiskVocabulary {
        id: String,
        level: RiskLevel,
        class: ObjectClass,
    },
}

/// Static attributes of a tracked object.
///
/// Nothing here changes after the catalog is loaded; positions live in
/// per-tick snapshots (see `propagation::Snapshot`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedObject {
    pub id: String,
    pub name: String,
    pub class: ObjectClass,
    pub orbit_type: OrbitType,
    #[serde(rename = "altitude")]
    pub altitude_km: f64,
    #[serde(rename = "inclination")]
    pub inclination_deg: f64,
    #[serde(rename = "velocity")]
    pub velocity_km_s: f64,
    pub risk_level: RiskLevel,

    /// Launch origin / parent body, mostly for debris
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<DebrisSize>,
}

impl TrackedObject {
    /// Check the attribute ranges of the data model
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if !(self.altitude_km >= 0.0) {
            return Err(CatalogError::NegativeAltitude {
                id: self.id.clone(),
                altitude_km: self.altitude_km,
            });
        }
        if !(0.0..=180.0).contains(&self.inclination_deg) {
            return Err(CatalogError::InclinationOutOfRange {
                id: self.id.clone(),
                inclination_deg: self.inclination_deg,
            });
        }
        if !(self.velocity_km_s >= 0.0) {
            return Err(CatalogError::NegativeVelocity {
                id: self.id.clone(),
                velocity_km_s: self.velocity_km_s,
            });
        }
        if !self.risk_level.is_valid_for(self.class) {
            return Err(CatalogError::RiskVocabulary {
                id: self.id.clone(),
                level: self.risk_level,
                class: self.class,
            });
        }
        Ok(())
    }

    pub fn is_debris(&self) -> bool {
        self.class == ObjectClass::Debris
    }

    /// Display label used in listings
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Object {}", self.id)
        } else {
            self.name.clone()
        }
    }
}

/// Catalog manifest entry as supplied by the data-loading collaborator.
///
/// Same shape as [`TrackedObject`] except that the risk level may be
/// omitted; missing levels are seeded by the risk classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSpec {
    pub id: String,
    pub name: String,
    #[serde(default = "default_class")]
    pub class: ObjectClass,
    pub orbit_type: OrbitType,
    #[serde(rename = "altitude")]
    pub altitude_km: f64,
    #[serde(rename = "inclination", default)]
    pub inclination_deg: f64,
    #[serde(rename = "velocity", default)]
    pub velocity_km_s: f64,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub size: Option<DebrisSize>,
}

fn default_class() -> ObjectClass {
    ObjectClass::Satellite
}

impl ObjectSpec {
    /// Finish the entry with the given risk level
    pub fn into_object(self, risk_level: RiskLevel) -> TrackedObject {
        TrackedObject {
            id: self.id,
            name: self.name,
            class: self.class,
            orbit_type: self.orbit_type,
            altitude_km: self.altitude_km,
            inclination_deg: self.inclination_deg,
            velocity_km_s: self.velocity_km_s,
            risk_level,
            origin: self.origin,
            size: self.size,
        }
    }
}
