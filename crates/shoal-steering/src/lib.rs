//! `shoal-steering` — per-agent steering.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`steer`]     | `steer_force` — pursuit-style, magnitude-capped steer rule    |
//! | [`avoidance`] | `ClearDirectionSearch` — deterministic angular ray sweep      |
//! | [`forces`]    | `Steering` result and diagnostic `SteeringForces`             |
//! | [`engine`]    | `SteeringEngine` — blends the above into one acceleration     |
//! | [`error`]     | `SteeringError`, `SteeringResult<T>`                          |
//!
//! # Design notes
//!
//! `SteeringEngine::compute` is a pure function of the agent store, the
//! candidate neighbor list, and the obstacle world.  It never writes, so the
//! simulation loop can call it for every agent in parallel during phase 1 and
//! commit the results afterwards.

pub mod avoidance;
pub mod engine;
pub mod error;
pub mod forces;
pub mod steer;

#[cfg(test)]
mod tests;

pub use avoidance::ClearDirectionSearch;
pub use engine::SteeringEngine;
pub use error::{SteeringError, SteeringResult};
pub use forces::{Steering, SteeringForces};
pub use steer::steer_force;
