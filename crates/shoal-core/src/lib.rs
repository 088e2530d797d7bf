//! `shoal-core` — foundational types for the `shoal` flocking simulator.
//!
//! This crate is a dependency of every other `shoal-*` crate.  It has no
//! `shoal-*` dependencies and only a handful of external ones (`glam`,
//! `rand`, `serde`, `serde_json`, `thiserror`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ObstacleId`                                    |
//! | [`class`]   | `ObstacleClass` layer bitmask                              |
//! | [`math`]    | angle, basis, and magnitude helpers over `glam::Vec3`      |
//! | [`config`]  | `SteeringConfig`, `SweepFallback` (JSON-loadable)          |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`rng`]     | `SimRng` — seeded sampling helpers for spawning            |
//! | [`error`]   | `CoreError`, `CoreResult`                                  |

pub mod class;
pub mod config;
pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use class::ObstacleClass;
pub use config::{SteeringConfig, SweepFallback};
pub use error::{CoreError, CoreResult};
pub use glam::Vec3;
pub use ids::{AgentId, ObstacleId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
