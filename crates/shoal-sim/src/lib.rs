//! `shoal-sim` — tick loop orchestrator for the shoal flocking simulator.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ⓪ Between ticks — spawner appends due agents; neighbor query refreshes.
//!   ① Plan (read-only) — for every agent: gather neighbors, compute steering,
//!                        integrate → PoseUpdate
//!                        (parallel with the `parallel` feature).
//!   ② Commit — write every PoseUpdate back to the AgentStore at once.
//! ```
//!
//! Phase ① takes `&self`, so no agent can observe another agent's new pose
//! within the same tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the plan phase on Rayon's thread pool.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shoal_agent::{AgentStore, SpawnParams};
//! use shoal_core::{SimConfig, SteeringConfig};
//! use shoal_sim::{NoopObserver, SimBuilder};
//! use shoal_spatial::{BruteForceNeighbors, NoObstacles};
//!
//! let mut sim = SimBuilder::new(
//!     SimConfig::default(),
//!     AgentStore::new(),
//!     SteeringConfig::default(),
//!     BruteForceNeighbors,
//!     NoObstacles,
//! )
//! .spawn(SpawnParams::default())
//! .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{PoseUpdate, Sim};
pub use stats::TickStats;
