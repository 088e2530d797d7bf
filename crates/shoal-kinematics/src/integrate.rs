//! Semi-implicit Euler step with speed bounds.

use glam::Vec3;
use shoal_agent::AgentStore;
use shoal_core::AgentId;

use crate::{KinematicState, KinematicsError, KinematicsResult};

/// Reject a time step the integrator cannot use.
///
/// Checked once when a simulation is built, not on every step.
pub fn check_time_step(dt: f32) -> KinematicsResult<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::InvalidTimeStep(dt))
    }
}

/// Advance `state` by `dt` under `acceleration`.
///
/// The new speed is clamped to `[min_speed, max_speed]` with direction
/// preserved.  A zero new velocity has no direction, so position and forward
/// are held and velocity stays zero.
pub fn integrate(
    state:        &KinematicState,
    acceleration: Vec3,
    dt:           f32,
    min_speed:    f32,
    max_speed:    f32,
) -> KinematicState {
    let raw = state.velocity + acceleration * dt;
    // Too small to give a direction once squared (exact zero included).
    if raw.normalize_or_zero() == Vec3::ZERO {
        return KinematicState { velocity: Vec3::ZERO, ..*state };
    }

    let speed = raw.length();
    let velocity = if speed < min_speed {
        raw * (min_speed / speed)
    } else if speed > max_speed {
        raw * (max_speed / speed)
    } else {
        raw
    };
    if velocity == Vec3::ZERO {
        return KinematicState { velocity: Vec3::ZERO, ..*state };
    }

    KinematicState {
        position: state.position + velocity * dt,
        forward:  velocity.normalize(),
        velocity,
    }
}

/// [`integrate`] for an agent in `store`, using its own speed bounds.
#[inline]
pub fn integrate_agent(store: &AgentStore, agent: AgentId, acceleration: Vec3, dt: f32) -> KinematicState {
    let t = &store.tunables[agent.index()];
    integrate(&KinematicState::of(store, agent), acceleration, dt, t.min_speed, t.max_speed)
}
