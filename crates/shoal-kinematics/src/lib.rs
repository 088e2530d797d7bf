//! `shoal-kinematics` — turning accelerations into motion.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`state`]     | `KinematicState` — one agent's position, heading, velocity |
//! | [`integrate`] | `integrate`, `integrate_agent`, `check_time_step`           |
//! | [`error`]     | `KinematicsError`, `KinematicsResult<T>`                    |
//!
//! # Motion model
//!
//! Semi-implicit Euler: velocity is updated first and the *new* velocity
//! moves the agent.  Speed is then held inside `[min_speed, max_speed]`.
//!
//! ```text
//! v' = clamp_speed(v + a·dt)
//! p' = p + v'·dt
//! f' = normalize(v')
//! ```
//!
//! If `v'` is zero the agent holds its position and heading.

pub mod error;
pub mod integrate;
pub mod state;


pub use error::{KinematicsError, KinematicsResult};
pub use integrate::{check_time_step, integrate, integrate_agent};
pub use state::KinematicState;
