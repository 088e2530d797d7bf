//! CSV output backend.
//!
//! One file per table in the output directory: `agent_snapshots.csv`,
//! `tick_summaries.csv` and `steering_forces.csv`.  The forces file holds
//! only its header unless the run records forces.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, SteeringForcesRow, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 9] = ["agent_id", "tick", "x", "y", "z", "vx", "vy", "vz", "speed"];

pub const SUMMARY_HEADER: [&str; 6] =
    ["tick", "sim_time_secs", "agent_count", "mean_speed", "mean_visible", "avoiding"];

pub const FORCES_HEADER: [&str; 16] = [
    "agent_id", "tick",
    "cohesion_x", "cohesion_y", "cohesion_z",
    "alignment_x", "alignment_y", "alignment_z",
    "separation_x", "separation_y", "separation_z",
    "avoiding", "clear_x", "clear_y", "clear_z",
    "separating",
];

fn open(dir: &Path, name: &str, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = Writer::from_path(dir.join(name))?;
    w.write_record(header)?;
    Ok(w)
}

fn push_vec3(record: &mut Vec<String>, x: f32, y: f32, z: f32) {
    record.extend([x, y, z].map(|c| c.to_string()));
}

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    forces:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (truncating) the CSV files in `dir` and write their headers.
    /// `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            snapshots: open(dir, "agent_snapshots.csv", &SNAPSHOT_HEADER)?,
            summaries: open(dir, "tick_summaries.csv", &SUMMARY_HEADER)?,
            forces:    open(dir, "steering_forces.csv", &FORCES_HEADER)?,
            finished:  false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        let mut record = Vec::with_capacity(SNAPSHOT_HEADER.len());
        for row in rows {
            record.clear();
            record.push(row.agent_id.to_string());
            record.push(row.tick.to_string());
            push_vec3(&mut record, row.x, row.y, row.z);
            push_vec3(&mut record, row.vx, row.vy, row.vz);
            record.push(row.speed.to_string());
            self.snapshots.write_record(&record)?;
        }
        Ok(())
    }

    fn write_forces(&mut self, rows: &[SteeringForcesRow]) -> OutputResult<()> {
        let mut record = Vec::with_capacity(FORCES_HEADER.len());
        for row in rows {
            record.clear();
            record.push(row.agent_id.to_string());
            record.push(row.tick.to_string());
            push_vec3(&mut record, row.cohesion_x, row.cohesion_y, row.cohesion_z);
            push_vec3(&mut record, row.alignment_x, row.alignment_y, row.alignment_z);
            push_vec3(&mut record, row.separation_x, row.separation_y, row.separation_z);
            record.push(row.avoiding.to_string());
            push_vec3(&mut record, row.clear_x, row.clear_y, row.clear_z);
            record.push(row.separating.to_string());
            self.forces.write_record(&record)?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.sim_time_secs.to_string(),
            row.agent_count.to_string(),
            row.mean_speed.to_string(),
            row.mean_visible.to_string(),
            row.avoiding.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if std::mem::replace(&mut self.finished, true) {
            return Ok(());
        }
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.forces.flush()?;
        Ok(())
    }
}
