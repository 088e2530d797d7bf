//! Clear-direction search.
//!
//! When the forward probe hits an obstacle, the agent looks for the nearest
//! unobstructed heading by sweeping outward from forward:
//!
//! ```text
//! for k in 1.. while k*step <= 180°:
//!     +right, -right, +up, -up   (forward rotated by k*step toward each)
//! ```
//!
//! The first clear candidate wins.  Offsets past 180° would revisit rays
//! already probed on the other side, so the sweep stops there.  If nothing is
//! clear the configured [`SweepFallback`] applies.
//!
//! The order is fixed, so the same world and the same inputs always give the
//! same answer.

use glam::Vec3;
use shoal_core::math::{basis, is_zero, rotate_toward};
use shoal_core::{ObstacleClass, SteeringConfig, SweepFallback};
use shoal_spatial::ObstacleQuery;

/// Slack so that e.g. `step = 30°` still reaches exactly 180°.
const SWEEP_EPSILON_DEG: f32 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClearDirectionSearch {
    pub step_deg: f32,
    pub fallback: SweepFallback,
}

impl Default for ClearDirectionSearch {
    fn default() -> Self {
        Self { step_deg: 30.0, fallback: SweepFallback::Reverse }
    }
}

impl ClearDirectionSearch {
    pub fn from_config(config: &SteeringConfig) -> Self {
        Self { step_deg: config.sweep_step_deg, fallback: config.sweep_fallback }
    }

    /// Number of angular offsets probed.
    pub fn steps(&self) -> u32 {
        if !(self.step_deg > 0.0) {
            return 0;
        }
        ((180.0 + SWEEP_EPSILON_DEG) / self.step_deg).floor() as u32
    }

    /// First unobstructed unit direction around `forward`, or the fallback.
    pub fn find<O: ObstacleQuery + ?Sized>(
        &self,
        origin:      Vec3,
        forward:     Vec3,
        probe_range: f32,
        class:       ObstacleClass,
        obstacles:   &O,
    ) -> Vec3 {
        let forward = if is_zero(forward) { Vec3::Z } else { forward.normalize() };
        let (right, up) = basis(forward);
        let axes = [right, -right, up, -up];

        for k in 1..=self.steps() {
            let angle = (k as f32 * self.step_deg).to_radians();
            for axis in axes {
                let candidate = rotate_toward(forward, axis, angle).normalize_or_zero();
                if !obstacles.cast(origin, candidate, probe_range, class) {
                    return candidate;
                }
            }
        }

        log::trace!("no clear direction around {forward}; falling back to {:?}", self.fallback);
        match self.fallback {
            SweepFallback::Reverse => -forward,
            SweepFallback::Forward => forward,
        }
    }
}
