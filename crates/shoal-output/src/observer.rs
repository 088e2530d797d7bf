//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use shoal_agent::AgentStore;
use shoal_core::{SimConfig, Tick};
use shoal_sim::{SimObserver, TickStats};
use shoal_steering::SteeringForces;

use crate::row::{AgentSnapshotRow, SteeringForcesRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Feeds every output table of an [`OutputWriter`] from the sim's observer
/// hooks.
///
/// Observer hooks cannot fail, so the first writer error is parked here and
/// later writes are still attempted.  Check [`take_error`][Self::take_error]
/// once `sim.run()` returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    dt_secs:    f32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`; `config.dt_secs` maps ticks to
    /// simulated seconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self { writer, dt_secs: config.dt_secs, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // First error wins.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:          tick.0,
            sim_time_secs: tick.0 as f64 * self.dt_secs as f64,
            agent_count:   stats.agent_count as u64,
            mean_speed:    stats.mean_speed,
            mean_visible:  stats.mean_visible,
            avoiding:      stats.avoiding as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, forces: Option<&[SteeringForces]>) {
        let rows: Vec<AgentSnapshotRow> = agents
            .position
            .iter()
            .zip(&agents.velocity)
            .enumerate()
            .map(|(i, (p, v))| AgentSnapshotRow {
                agent_id: i as u32,
                tick:     tick.0,
                x:        p.x,
                y:        p.y,
                z:        p.z,
                vx:       v.x,
                vy:       v.y,
                vz:       v.z,
                speed:    v.length(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }

        if let Some(forces) = forces.filter(|f| !f.is_empty()) {
            let rows: Vec<SteeringForcesRow> =
                forces.iter().enumerate().map(|(i, f)| forces_row(i as u32, tick, f)).collect();
            let result = self.writer.write_forces(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

fn forces_row(agent_id: u32, tick: Tick, f: &SteeringForces) -> SteeringForcesRow {
    let clear = f.clear_direction.unwrap_or_default();
    SteeringForcesRow {
        agent_id,
        tick:         tick.0,
        cohesion_x:   f.cohesion.x,
        cohesion_y:   f.cohesion.y,
        cohesion_z:   f.cohesion.z,
        alignment_x:  f.alignment.x,
        alignment_y:  f.alignment.y,
        alignment_z:  f.alignment.z,
        separation_x: f.separation.x,
        separation_y: f.separation.y,
        separation_z: f.separation.z,
        avoiding:     f.clear_direction.is_some(),
        clear_x:      clear.x,
        clear_y:      clear.y,
        clear_z:      clear.z,
        separating:   f.separating,
    }
}
