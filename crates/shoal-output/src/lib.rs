//! `shoal-output` — snapshot and summary writers for shoal runs.
//!
//! # Backends
//!
//! | Feature   | Backend | Files created                   |
//! |-----------|---------|---------------------------------|
//! | *(none)*  | CSV     | one `<table>.csv` per table     |
//! | `sqlite`  | SQLite  | `output.db`                     |
//! | `parquet` | Parquet | one `<table>.parquet` per table |
//!
//! # Tables
//!
//! ```text
//! agent_snapshots(agent_id, tick, x, y, z, vx, vy, vz, speed)
//! tick_summaries(tick, sim_time_secs, agent_count, mean_speed, mean_visible, avoiding)
//! steering_forces(agent_id, tick, cohesion_{x,y,z}, alignment_{x,y,z},
//!                 separation_{x,y,z}, avoiding, clear_{x,y,z}, separating)
//! ```
//!
//! Snapshots are taken every `output_interval_ticks`; a summary row is written
//! every tick.  `steering_forces` rows accompany snapshots only when the run
//! records forces (`SimBuilder::record_forces(true)`).
//!
//! Every backend implements [`OutputWriter`] and is fed by
//! [`SimOutputObserver`], a `shoal_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shoal_output::{CsvWriter, SimOutputObserver};
//!
//! let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new("./output"))?, &sim.config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     log::error!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, SteeringForcesRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
