//! Shared, read-only steering weights.
//!
//! A `SteeringConfig` is loaded once per run (usually from JSON), validated,
//! and then borrowed immutably by every per-agent computation.  It is never
//! mutated while a simulation is running.
//!
//! # JSON format
//!
//! Every field is optional; missing fields take the defaults below.
//!
//! ```json
//! {
//!   "cohere_strength":    1.0,
//!   "align_strength":     1.0,
//!   "separate_strength":  1.5,
//!   "avoidance_strength": 10.0,
//!   "max_steer_force":    3.0,
//!   "obstacle_class":     1,
//!   "sweep_step_deg":     30.0,
//!   "sweep_fallback":     "reverse"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, ObstacleClass};

/// What the clear-direction search returns when every probed ray is blocked.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepFallback {
    /// Turn around: return the negated forward direction.
    #[default]
    Reverse,
    /// Keep heading: return the current forward direction.
    Forward,
}

/// Steering weights and obstacle-avoidance parameters shared by all agents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Weight of the steer force toward the visible neighbors' centre.
    pub cohere_strength: f32,

    /// Weight of the steer force along the visible neighbors' mean velocity.
    pub align_strength: f32,

    /// Weight of the steer force away from neighbors inside the separation
    /// radius.
    pub separate_strength: f32,

    /// Weight of the steer force toward a clear direction when the forward
    /// probe hits an obstacle.
    pub avoidance_strength: f32,

    /// Magnitude cap applied to every individual steer force.
    pub max_steer_force: f32,

    /// Obstacle layers considered by avoidance probes.
    pub obstacle_class: ObstacleClass,

    /// Angular step of the clear-direction sweep, in degrees.  Smaller steps
    /// probe more rays and find tighter gaps.
    pub sweep_step_deg: f32,

    /// Result of the sweep when no probed direction is clear.
    pub sweep_fallback: SweepFallback,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            cohere_strength:    1.0,
            align_strength:     1.0,
            separate_strength:  1.0,
            avoidance_strength: 10.0,
            max_steer_force:    3.0,
            obstacle_class:     ObstacleClass::default(),
            sweep_step_deg:     30.0,
            sweep_fallback:     SweepFallback::Reverse,
        }
    }
}

impl SteeringConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: SteeringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config from a JSON file.
    pub fn load_json(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject negative or non-finite weights and an out-of-range sweep step.
    pub fn validate(&self) -> CoreResult<()> {
        let weights = [
            ("cohere_strength",    self.cohere_strength),
            ("align_strength",     self.align_strength),
            ("separate_strength",  self.separate_strength),
            ("avoidance_strength", self.avoidance_strength),
            ("max_steer_force",    self.max_steer_force),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a non-negative finite number, got {value}"
                )));
            }
        }
        if !(self.sweep_step_deg > 0.0 && self.sweep_step_deg <= 180.0) {
            return Err(CoreError::Config(format!(
                "sweep_step_deg must be in (0, 180], got {}",
                self.sweep_step_deg
            )));
        }
        Ok(())
    }
}
