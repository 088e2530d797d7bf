//! SQLite output backend (feature `sqlite`).
//!
//! All three tables live in a single `output.db` in the output directory.
//! Row batches are inserted inside one transaction each.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, SteeringForcesRow, TickSummaryRow};

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous  = NORMAL;
    CREATE TABLE IF NOT EXISTS agent_snapshots (
        agent_id INTEGER NOT NULL,
        tick     INTEGER NOT NULL,
        x        REAL    NOT NULL,
        y        REAL    NOT NULL,
        z        REAL    NOT NULL,
        vx       REAL    NOT NULL,
        vy       REAL    NOT NULL,
        vz       REAL    NOT NULL,
        speed    REAL    NOT NULL,
        PRIMARY KEY (tick, agent_id)
    );
    CREATE TABLE IF NOT EXISTS tick_summaries (
        tick          INTEGER PRIMARY KEY,
        sim_time_secs REAL    NOT NULL,
        agent_count   INTEGER NOT NULL,
        mean_speed    REAL    NOT NULL,
        mean_visible  REAL    NOT NULL,
        avoiding      INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS steering_forces (
        agent_id     INTEGER NOT NULL,
        tick         INTEGER NOT NULL,
        cohesion_x   REAL    NOT NULL,
        cohesion_y   REAL    NOT NULL,
        cohesion_z   REAL    NOT NULL,
        alignment_x  REAL    NOT NULL,
        alignment_y  REAL    NOT NULL,
        alignment_z  REAL    NOT NULL,
        separation_x REAL    NOT NULL,
        separation_y REAL    NOT NULL,
        separation_z REAL    NOT NULL,
        avoiding     INTEGER NOT NULL,
        clear_x      REAL    NOT NULL,
        clear_y      REAL    NOT NULL,
        clear_z      REAL    NOT NULL,
        separating   INTEGER NOT NULL,
        PRIMARY KEY (tick, agent_id)
    );";

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and create any missing tables.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots (agent_id, tick, x, y, z, vx, vy, vz, speed) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.agent_id, r.tick as i64, r.x, r.y, r.z, r.vx, r.vy, r.vz, r.speed,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_forces(&mut self, rows: &[SteeringForcesRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO steering_forces \
                 (agent_id, tick, cohesion_x, cohesion_y, cohesion_z, \
                  alignment_x, alignment_y, alignment_z, \
                  separation_x, separation_y, separation_z, \
                  avoiding, clear_x, clear_y, clear_z, separating) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.agent_id,
                    r.tick as i64,
                    r.cohesion_x,
                    r.cohesion_y,
                    r.cohesion_z,
                    r.alignment_x,
                    r.alignment_y,
                    r.alignment_z,
                    r.separation_x,
                    r.separation_y,
                    r.separation_z,
                    r.avoiding,
                    r.clear_x,
                    r.clear_y,
                    r.clear_z,
                    r.separating,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn
            .prepare_cached(
                "INSERT INTO tick_summaries \
                 (tick, sim_time_secs, agent_count, mean_speed, mean_visible, avoiding) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?
            .execute(params![
                row.tick as i64,
                row.sim_time_secs,
                row.agent_count as i64,
                row.mean_speed,
                row.mean_visible,
                row.avoiding as i64,
            ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if std::mem::replace(&mut self.finished, true) {
            return Ok(());
        }
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
