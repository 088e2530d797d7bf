//! `shoal-agent` — Structure-of-Arrays agent storage for the `shoal` simulator.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`tunables`]   | `AgentTunables` (per-agent perception/speed limits)        |
//! | [`store`]      | `AgentStore` (SoA arrays), `AgentInit`                     |
//! | [`builder`]    | `AgentStoreBuilder` (fluent construction)                  |
//! | [`spawn`]      | `FlockSpawner`, `SpawnParams` (seeded population growth)   |
//! | [`loader`]     | population CSV loader                                      |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                             |
//!
//! The store doubles as the flock registry: it is the single list of live
//! agents, enumerated with [`AgentStore::agent_ids`].  Agents are appended
//! only between ticks; the simulation loop never mutates it while steering
//! is being computed.

pub mod builder;
pub mod error;
pub mod loader;
pub mod spawn;
pub mod store;
pub mod tunables;


pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use loader::{load_population_csv, load_population_reader};
pub use spawn::{FlockSpawner, SpawnParams};
pub use store::{AgentInit, AgentStore};
pub use tunables::AgentTunables;
