//! World tuning
//!
//! Loaded from an optional JSON file; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::fit::FitParams;

/// Simulation and sizing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Virtual milliseconds per tick (also the real-time re-arm delay)
    pub tick_interval_ms: u64,
    /// Per-tick velocity retention
    pub friction: f32,
    /// Attraction divisor (larger = weaker pull)
    pub gravity_divisor: f32,
    /// Entry drift divisor (larger = slower arrival)
    pub initial_drift_divisor: f32,
    /// Elastic bouncing window after the first add
    pub dynamic_collision_window_ms: u64,
    /// Fit search tuning
    pub fit: FitParams,
    /// Placement RNG seed
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            friction: FRICTION,
            gravity_divisor: GRAVITY_DIVISOR,
            initial_drift_divisor: INITIAL_DRIFT_DIVISOR,
            dynamic_collision_window_ms: DYNAMIC_COLLISION_WINDOW_MS,
            fit: FitParams::default(),
            seed: 0x5eed_b0bb_1e5,
        }
    }
}

impl WorldConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WorldConfig::from_json(r#"{ "seed": 7, "fit": { "max_iterations": 50 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.fit.max_iterations, 50);
        assert_eq!(config.fit.min_radius, FIT_MIN_RADIUS);
        assert_eq!(config.friction, FRICTION);
        assert_eq!(config.dynamic_collision_window_ms, 3000);
    }

    #[test]
    fn test_json_round_trip() {
        let config = WorldConfig {
            friction: 0.9,
            ..WorldConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(WorldConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(WorldConfig::from_json("{ friction: }").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = WorldConfig::load("/nonexistent/bubble-pack.json");
        assert_eq!(config, WorldConfig::default());
    }
}
