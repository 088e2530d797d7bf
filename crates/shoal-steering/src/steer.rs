//! The steer rule shared by every flocking force.

use glam::Vec3;
use shoal_core::math::{clamp_magnitude, is_zero};

/// Force that turns `velocity` toward `direction` at full speed.
///
/// `clamp(normalize(direction) * max_speed - velocity, max_steer_force)`.
///
/// A zero `direction` means "no preference" and yields zero force rather than
/// braking the agent.
#[inline]
pub fn steer_force(direction: Vec3, velocity: Vec3, max_speed: f32, max_steer_force: f32) -> Vec3 {
    if is_zero(direction) {
        return Vec3::ZERO;
    }
    clamp_magnitude(direction.normalize() * max_speed - velocity, max_steer_force)
}
