//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, OutputResult, SteeringForcesRow, TickSummaryRow};

/// A sink for the three output tables.
///
/// Errors are returned to [`SimOutputObserver`][crate::SimOutputObserver],
/// which keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Append one snapshot's worth of agent rows.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Append the steering breakdown recorded at a snapshot.  Only called when
    /// the simulation records forces.
    fn write_forces(&mut self, rows: &[SteeringForcesRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush everything and release file handles.  Calling it again is a
    /// no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
