//! Collision prediction through an external analysis service
//!
//! - `wire`: request and response schema
//! - `parse`: tolerant interpretation of the service's raw reply
//! - `service`: transport trait and its HTTP implementation
//! - `client`: invocation, timeout and last-result cache

mod client;
mod error;
mod parse;
mod service;
mod wire;

pub use client::{CachedAnalysis, ConjunctionAnalysisClient};
pub use error::AnalysisError;
pub use parse::{parse_payload, AnalysisOutcome};
pub use service::{HttpPredictionService, PredictionService};
pub use wire::{
    AnalysisResult, ConjunctionPrediction, ConjunctionRequest, ConjunctionRisk, DebrisPayload,
    KesslerRisk, ObjectPayload, WirePosition,
};
