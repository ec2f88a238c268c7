//! Runtime configuration for the simulation loop and the analysis client

use std::path::PathBuf;
use std::time::Duration;

use crate::risk::DEFAULT_RISK_SEED;

pub const ENV_ANALYSIS_URL: &str = "ORBITWATCH_ANALYSIS_URL";
pub const ENV_ANALYSIS_KEY: &str = "ORBITWATCH_ANALYSIS_KEY";
pub const ENV_ANALYSIS_TIMEOUT_SECS: &str = "ORBITWATCH_ANALYSIS_TIMEOUT_SECS";

/// Simulation loop settings
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Wall-clock period between ticks
    pub tick_period_ms: u64,
    /// Seed for unassigned risk levels and constellation jitter
    pub risk_seed: u64,
    /// Manifest to load instead of the built-in world catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 100,
            risk_seed: DEFAULT_RISK_SEED,
            catalog_path: None,
        }
    }
}

impl SimulationConfig {
    /// Tick period, never shorter than 1 ms
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }
}

/// Conjunction-analysis client settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub endpoint: String,
    /// Sent as a bearer token when present
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Send debris alongside the analysed objects
    pub include_debris: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:54321/functions/v1/ai-collision-prediction".to_string(),
            api_key: None,
            timeout_secs: 30,
            include_debris: false,
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by `ORBITWATCH_ANALYSIS_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_ANALYSIS_URL).filter(|v| !v.trim().is_empty()) {
            config.endpoint = url.trim().to_string();
        }
        if let Some(key) = lookup(ENV_ANALYSIS_KEY).filter(|v| !v.trim().is_empty()) {
            config.api_key = Some(key.trim().to_string());
        }
        if let Some(raw) = lookup(ENV_ANALYSIS_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => log::warn!(
                    "Ignoring {}={:?}; using {}s",
                    ENV_ANALYSIS_TIMEOUT_SECS,
                    raw,
                    config.timeout_secs
                ),
            }
        }

        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
