//! Parquet output backend (feature `parquet`).
//!
//! One snappy-compressed file per table: `agent_snapshots.parquet`,
//! `tick_summaries.parquet` and `steering_forces.parquet`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float32Array, Float64Array, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, SteeringForcesRow, TickSummaryRow};

fn schema(columns: &[(&str, DataType)]) -> Arc<Schema> {
    Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, ty)| Field::new(*name, ty.clone(), false))
            .collect::<Vec<_>>(),
    ))
}

fn snapshot_schema() -> Arc<Schema> {
    use DataType::*;
    schema(&[
        ("agent_id", UInt32),
        ("tick", UInt64),
        ("x", Float32),
        ("y", Float32),
        ("z", Float32),
        ("vx", Float32),
        ("vy", Float32),
        ("vz", Float32),
        ("speed", Float32),
    ])
}

fn summary_schema() -> Arc<Schema> {
    use DataType::*;
    schema(&[
        ("tick", UInt64),
        ("sim_time_secs", Float64),
        ("agent_count", UInt64),
        ("mean_speed", Float32),
        ("mean_visible", Float32),
        ("avoiding", UInt64),
    ])
}

fn forces_schema() -> Arc<Schema> {
    use DataType::*;
    schema(&[
        ("agent_id", UInt32),
        ("tick", UInt64),
        ("cohesion_x", Float32),
        ("cohesion_y", Float32),
        ("cohesion_z", Float32),
        ("alignment_x", Float32),
        ("alignment_y", Float32),
        ("alignment_z", Float32),
        ("separation_x", Float32),
        ("separation_y", Float32),
        ("separation_z", Float32),
        ("avoiding", Boolean),
        ("clear_x", Float32),
        ("clear_y", Float32),
        ("clear_z", Float32),
        ("separating", UInt32),
    ])
}

// ── Column helpers ────────────────────────────────────────────────────────────

fn f32s<R>(rows: &[R], f: impl Fn(&R) -> f32) -> ArrayRef {
    Arc::new(Float32Array::from_iter_values(rows.iter().map(f)))
}

fn u32s<R>(rows: &[R], f: impl Fn(&R) -> u32) -> ArrayRef {
    Arc::new(UInt32Array::from_iter_values(rows.iter().map(f)))
}

fn u64s<R>(rows: &[R], f: impl Fn(&R) -> u64) -> ArrayRef {
    Arc::new(UInt64Array::from_iter_values(rows.iter().map(f)))
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let props = WriterProperties::builder().set_compression(Compression::SNAPPY).build();
    Ok(ArrowWriter::try_new(File::create(dir.join(name))?, Arc::clone(schema), Some(props))?)
}

/// Writes simulation output to Parquet files.
///
/// `finish()` **must** be called to write the Parquet footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:     Option<ArrowWriter<File>>,
    summaries:     Option<ArrowWriter<File>>,
    forces:        Option<ArrowWriter<File>>,
    snap_schema:   Arc<Schema>,
    summ_schema:   Arc<Schema>,
    forces_schema: Arc<Schema>,
}

impl ParquetWriter {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();
        let forces_schema = forces_schema();

        Ok(Self {
            snapshots: Some(open(dir, "agent_snapshots.parquet", &snap_schema)?),
            summaries: Some(open(dir, "tick_summaries.parquet", &summ_schema)?),
            forces: Some(open(dir, "steering_forces.parquet", &forces_schema)?),
            snap_schema,
            summ_schema,
            forces_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        let Some(writer) = self.snapshots.as_mut().filter(|_| !rows.is_empty()) else {
            return Ok(());
        };
        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                u32s(rows, |r| r.agent_id),
                u64s(rows, |r| r.tick),
                f32s(rows, |r| r.x),
                f32s(rows, |r| r.y),
                f32s(rows, |r| r.z),
                f32s(rows, |r| r.vx),
                f32s(rows, |r| r.vy),
                f32s(rows, |r| r.vz),
                f32s(rows, |r| r.speed),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_forces(&mut self, rows: &[SteeringForcesRow]) -> OutputResult<()> {
        let Some(writer) = self.forces.as_mut().filter(|_| !rows.is_empty()) else {
            return Ok(());
        };
        let batch = RecordBatch::try_new(
            Arc::clone(&self.forces_schema),
            vec![
                u32s(rows, |r| r.agent_id),
                u64s(rows, |r| r.tick),
                f32s(rows, |r| r.cohesion_x),
                f32s(rows, |r| r.cohesion_y),
                f32s(rows, |r| r.cohesion_z),
                f32s(rows, |r| r.alignment_x),
                f32s(rows, |r| r.alignment_y),
                f32s(rows, |r| r.alignment_z),
                f32s(rows, |r| r.separation_x),
                f32s(rows, |r| r.separation_y),
                f32s(rows, |r| r.separation_z),
                Arc::new(rows.iter().map(|r| Some(r.avoiding)).collect::<BooleanArray>()),
                f32s(rows, |r| r.clear_x),
                f32s(rows, |r| r.clear_y),
                f32s(rows, |r| r.clear_z),
                u32s(rows, |r| r.separating),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };
        let rows = std::slice::from_ref(row);
        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                u64s(rows, |r| r.tick),
                Arc::new(Float64Array::from(vec![row.sim_time_secs])),
                u64s(rows, |r| r.agent_count),
                f32s(rows, |r| r.mean_speed),
                f32s(rows, |r| r.mean_visible),
                u64s(rows, |r| r.avoiding),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        for w in [self.snapshots.take(), self.summaries.take(), self.forces.take()].into_iter().flatten() {
            w.close()?;
        }
        Ok(())
    }
}
