//! Per-agent perception and speed limits.

use serde::Deserialize;

use crate::{AgentError, AgentResult};

/// Tunables carried by every agent.
///
/// Validated once when the agent is inserted into the store; never clamped
/// silently.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct AgentTunables {
    /// Distance within which other agents can be perceived.
    pub perception_radius: f32,

    /// Half-angle of the perception cone around forward, in degrees.
    /// 180 means the agent sees all around.
    pub max_perception_angle_deg: f32,

    /// Neighbors closer than this push the agent away.
    pub separation_radius: f32,

    /// Length of the forward obstacle probe.
    pub avoidance_range: f32,

    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for AgentTunables {
    fn default() -> Self {
        Self {
            perception_radius:        5.0,
            max_perception_angle_deg: 120.0,
            separation_radius:        1.5,
            avoidance_range:          4.0,
            min_speed:                2.0,
            max_speed:                5.0,
        }
    }
}

impl AgentTunables {
    /// Check the ordering and range invariants:
    ///
    /// - every value finite
    /// - `0 ≤ min_speed ≤ max_speed`
    /// - `perception_radius ≥ separation_radius ≥ 0`
    /// - `avoidance_range ≥ 0`
    /// - `max_perception_angle_deg ∈ [0, 180]`
    pub fn validate(&self) -> AgentResult<()> {
        let fields = [
            ("perception_radius",        self.perception_radius),
            ("max_perception_angle_deg", self.max_perception_angle_deg),
            ("separation_radius",        self.separation_radius),
            ("avoidance_range",          self.avoidance_range),
            ("min_speed",                self.min_speed),
            ("max_speed",                self.max_speed),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AgentError::InvalidTunables(format!("{name} is not finite ({value})")));
        }

        if self.min_speed < 0.0 || self.min_speed > self.max_speed {
            return Err(AgentError::InvalidTunables(format!(
                "speed bounds must satisfy 0 <= min_speed <= max_speed (got {} / {})",
                self.min_speed, self.max_speed
            )));
        }
        if self.separation_radius < 0.0 || self.perception_radius < self.separation_radius {
            return Err(AgentError::InvalidTunables(format!(
                "radii must satisfy perception_radius >= separation_radius >= 0 (got {} / {})",
                self.perception_radius, self.separation_radius
            )));
        }
        if self.avoidance_range < 0.0 {
            return Err(AgentError::InvalidTunables(format!(
                "avoidance_range must be non-negative (got {})",
                self.avoidance_range
            )));
        }
        if !(0.0..=180.0).contains(&self.max_perception_angle_deg) {
            return Err(AgentError::InvalidTunables(format!(
                "max_perception_angle_deg must be in [0, 180] (got {})",
                self.max_perception_angle_deg
            )));
        }
        Ok(())
    }

    /// Scale every length and speed by `factor`, leaving the angle alone.
    ///
    /// A positive factor preserves all validation invariants.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            perception_radius:        self.perception_radius * factor,
            max_perception_angle_deg: self.max_perception_angle_deg,
            separation_radius:        self.separation_radius * factor,
            avoidance_range:          self.avoidance_range * factor,
            min_speed:                self.min_speed * factor,
            max_speed:                self.max_speed * factor,
        }
    }
}
