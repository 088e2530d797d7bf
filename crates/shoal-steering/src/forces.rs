//! Steering output types.

use glam::Vec3;

/// Result of one [`SteeringEngine::compute`][crate::SteeringEngine::compute]
/// call.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Steering {
    /// Weighted sum of all steer forces.  Feed to the integrator.
    pub acceleration: Vec3,

    /// Neighbors that passed the distance and angle filter.
    pub visible: u32,

    /// `true` if the forward probe hit an obstacle this tick.
    pub avoiding: bool,

    /// Per-force breakdown, present only when the engine records forces.
    pub forces: Option<SteeringForces>,
}

/// Diagnostic breakdown of one agent's steering for one tick.
///
/// Directions are the raw inputs to the steer rule (before normalising), so
/// a zero vector means that force had nothing to act on.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SteeringForces {
    /// Visible neighbors' centre minus the agent's position.
    pub cohesion:  Vec3,
    /// Visible neighbors' mean velocity.
    pub alignment: Vec3,
    /// Mean offset away from neighbors inside the separation radius.
    pub separation: Vec3,
    /// Direction chosen by the clear-direction search, if the probe hit.
    pub clear_direction: Option<Vec3>,
    /// Visible neighbors inside the separation radius.
    pub separating: u32,
}
