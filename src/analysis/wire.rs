//! Request and response schema of the conjunction-analysis service

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::data::OrbitType;
use crate::propagation::ObjectState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WirePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<DVec3> for WirePosition {
    fn from(v: DVec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// One object under analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPayload {
    pub id: String,
    pub name: String,
    /// km
    pub altitude: f64,
    /// km/s
    pub velocity: f64,
    pub position: WirePosition,
    #[serde(rename = "orbitType")]
    pub orbit_type: OrbitType,
}

impl From<&ObjectState> for ObjectPayload {
    fn from(state: &ObjectState) -> Self {
        Self {
            id: state.object.id.clone(),
            name: state.object.name.clone(),
            altitude: state.object.altitude_km,
            velocity: state.object.velocity_km_s,
            position: state.position.into(),
            orbit_type: state.object.orbit_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisPayload {
    pub id: String,
    pub position: WirePosition,
    pub altitude: f64,
}

impl From<&ObjectState> for DebrisPayload {
    fn from(state: &ObjectState) -> Self {
        Self {
            id: state.object.id.clone(),
            position: state.position.into(),
            altitude: state.object.altitude_km,
        }
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjunctionRequest {
    pub objects: Vec<ObjectPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debris: Option<Vec<DebrisPayload>>,
}

impl ConjunctionRequest {
    /// Build from snapshot states; `debris` is only sent when supplied
    pub fn from_states(objects: &[ObjectState], debris: Option<&[ObjectState]>) -> Self {
        Self {
            objects: objects.iter().map(ObjectPayload::from).collect(),
            debris: debris.map(|d| d.iter().map(DebrisPayload::from).collect()),
        }
    }

    pub fn debris_count(&self) -> usize {
        self.debris.as_ref().map_or(0, Vec::len)
    }
}

/// Predicted risk for one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConjunctionRisk {
    Safe,
    Warning,
    Critical,
}

/// Aggregate cascading-collision indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KesslerRisk {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjunctionPrediction {
    pub object1_name: String,
    pub object2_name: String,
    /// 0..=100
    pub risk_score: f64,
    #[serde(default)]
    pub time_to_closest_approach_hours: f64,
    #[serde(default)]
    pub minimum_distance_km: f64,
    pub risk_level: ConjunctionRisk,
    #[serde(default)]
    pub recommended_action: String,
    #[serde(default)]
    pub analysis: String,
}

impl ConjunctionPrediction {
    /// Pull numeric fields back into their documented ranges.
    ///
    /// Returns true if anything changed.
    pub(crate) fn clamp_ranges(&mut self) -> bool {
        let before = (
            self.risk_score,
            self.minimum_distance_km,
            self.time_to_closest_approach_hours,
        );
        self.risk_score = self.risk_score.clamp(0.0, 100.0);
        self.minimum_distance_km = self.minimum_distance_km.max(0.0);
        self.time_to_closest_approach_hours = self.time_to_closest_approach_hours.max(0.0);
        before
            != (
                self.risk_score,
                self.minimum_distance_km,
                self.time_to_closest_approach_hours,
            )
    }
}

/// Structured result of one analysis invocation.
///
/// `predictions` is the one key a reply must carry to count as a result;
/// error bodies and foreign envelopes lack it and are treated as degraded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub predictions: Vec<ConjunctionPrediction>,
    #[serde(default)]
    pub overall_risk_assessment: String,
    #[serde(default)]
    pub kessler_risk: KesslerRisk,
    #[serde(default)]
    pub summary: String,
}

impl AnalysisResult {
    pub fn critical_count(&self) -> usize {
        self.predictions
            .iter()
            .filter(|p| p.risk_level == ConjunctionRisk::Critical)
            .count()
    }
}
