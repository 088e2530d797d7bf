//! Integration tests for shoal-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentSnapshotRow, SteeringForcesRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            x:     agent_id as f32,
            y:     0.5,
            z:     -1.5,
            vx:    0.0,
            vy:    0.0,
            vz:    2.5,
            speed: 2.5,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            sim_time_secs: tick as f64 * 0.25,
            agent_count:   12,
            mean_speed:    3.5,
            mean_visible:  4.25,
            avoiding:      2,
        }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("agent_snapshots.csv")),
            ["agent_id", "tick", "x", "y", "z", "vx", "vy", "vz", "speed"]
        );
        assert_eq!(
            headers(dir.path().join("tick_summaries.csv")),
            ["tick", "sim_time_secs", "agent_count", "mean_speed", "mean_visible", "avoiding"]
        );
        let forces = headers(dir.path().join("steering_forces.csv"));
        assert_eq!(forces.len(), 16);
        assert_eq!(forces[11], "avoiding");
        assert_eq!(forces[15], "separating");
    }

    #[test]
    fn csv_forces_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_forces(&[SteeringForcesRow {
            agent_id:   3,
            tick:       10,
            cohesion_x: 1.5,
            avoiding:   true,
            clear_x:    -1.0,
            separating: 2,
            ..SteeringForcesRow::default()
        }])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("steering_forces.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][2], "1.5");
        assert_eq!(&rows[0][11], "true");
        assert_eq!(&rows[0][12], "-1");
        assert_eq!(&rows[0][15], "2");
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0"); // agent_id
        assert_eq!(&rows[0][1], "5"); // tick
        assert_eq!(&rows[1][2], "1"); // x
        assert_eq!(&rows[2][4], "-1.5");
        assert_eq!(&rows[2][8], "2.5");
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "0.75");
        assert_eq!(&rows[0][2], "12");
        assert_eq!(&rows[0][4], "4.25");
        assert_eq!(&rows[0][5], "2");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use glam::Vec3;
    use shoal_agent::{AgentInit, AgentStoreBuilder, AgentTunables};
    use shoal_core::{SimConfig, SteeringConfig, Tick};
    use shoal_sim::{SimBuilder, SimObserver, TickStats};
    use shoal_spatial::{BruteForceNeighbors, NoObstacles};

    use crate::{
        AgentSnapshotRow, CsvWriter, OutputError, OutputResult, OutputWriter, SimOutputObserver,
        SteeringForcesRow, TickSummaryRow,
    };

    /// Collects rows in memory; fails every write once `fail` is set.
    #[derive(Default)]
    struct MemoryWriter {
        snapshots: Vec<AgentSnapshotRow>,
        summaries: Vec<TickSummaryRow>,
        forces:    Vec<SteeringForcesRow>,
        finished:  usize,
        fail:      bool,
    }

    impl OutputWriter for MemoryWriter {
        fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.snapshots.extend_from_slice(rows);
            Ok(())
        }

        fn write_forces(&mut self, rows: &[SteeringForcesRow]) -> OutputResult<()> {
            self.forces.extend_from_slice(rows);
            Ok(())
        }

        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("read only")));
            }
            self.summaries.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn config(total_ticks: u64, interval: u64) -> SimConfig {
        SimConfig {
            dt_secs:               0.25,
            total_ticks,
            seed:                  7,
            num_threads:           Some(1),
            output_interval_ticks: interval,
        }
    }

    fn trio() -> shoal_agent::AgentStore {
        AgentStoreBuilder::new()
            .agent(AgentInit::moving(Vec3::ZERO, Vec3::Z, 2.0, AgentTunables::default()))
            .agent(AgentInit::moving(Vec3::X, Vec3::Z, 2.0, AgentTunables::default()))
            .agent(AgentInit::moving(Vec3::new(0.0, 1.0, 0.5), Vec3::X, 3.0, AgentTunables::default()))
            .build()
            .unwrap()
    }

    #[test]
    fn summary_maps_tick_to_seconds() {
        let mut obs = SimOutputObserver::new(MemoryWriter::default(), &config(10, 1));
        let stats = TickStats { agent_count: 4, mean_speed: 2.0, mean_visible: 1.5, avoiding: 1 };
        obs.on_tick_end(Tick(6), &stats);

        let writer = obs.into_writer();
        assert_eq!(
            writer.summaries,
            [TickSummaryRow {
                tick:          6,
                sim_time_secs: 1.5,
                agent_count:   4,
                mean_speed:    2.0,
                mean_visible:  1.5,
                avoiding:      1,
            }]
        );
    }

    #[test]
    fn snapshot_rows_follow_store_order() {
        let store = trio();
        let mut obs = SimOutputObserver::new(MemoryWriter::default(), &config(10, 1));
        obs.on_snapshot(Tick(2), &store, None);

        let rows = obs.into_writer().snapshots;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].agent_id, 1);
        assert_eq!(rows[1].x, 1.0);
        assert_eq!(rows[1].vz, 2.0);
        assert_eq!(rows[2].vx, 3.0);
        assert!((rows[2].speed - 3.0).abs() < 1e-6);
        assert!(rows.iter().all(|r| r.tick == 2));
    }

    #[test]
    fn first_error_is_kept() {
        let writer = MemoryWriter { fail: true, ..MemoryWriter::default() };
        let mut obs = SimOutputObserver::new(writer, &config(10, 1));
        obs.on_snapshot(Tick(0), &trio(), None);
        obs.on_tick_end(Tick(0), &TickStats::default());

        let err = obs.take_error().expect("stored error");
        assert!(err.to_string().contains("disk full"), "{err}");
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn run_writes_every_summary_and_interval_snapshots() {
        let config = config(6, 2);
        let mut sim =
            SimBuilder::new(config.clone(), trio(), SteeringConfig::default(), BruteForceNeighbors, NoObstacles)
                .build()
                .unwrap();

        let mut obs = SimOutputObserver::new(MemoryWriter::default(), &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let writer = obs.into_writer();
        assert_eq!(writer.summaries.len(), 6);
        // Snapshots at ticks 0, 2 and 4.
        assert_eq!(writer.snapshots.len(), 9);
        assert_eq!(writer.finished, 1);
        let ticks: Vec<u64> = writer.snapshots.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, [0, 0, 0, 2, 2, 2, 4, 4, 4]);
    }

    #[test]
    fn forces_written_only_when_recorded() {
        let config = config(4, 2);
        let build = |record| {
            SimBuilder::new(config.clone(), trio(), SteeringConfig::default(), BruteForceNeighbors, NoObstacles)
                .record_forces(record)
                .build()
                .unwrap()
        };

        let mut plain = SimOutputObserver::new(MemoryWriter::default(), &config);
        build(false).run(&mut plain).unwrap();
        assert!(plain.into_writer().forces.is_empty());

        let mut recorded = SimOutputObserver::new(MemoryWriter::default(), &config);
        build(true).run(&mut recorded).unwrap();
        let writer = recorded.into_writer();
        // Ticks 0 and 2, three agents each.
        assert_eq!(writer.forces.len(), 6);
        assert_eq!(writer.forces.len(), writer.snapshots.len());
        let ids: Vec<u32> = writer.forces.iter().map(|r| r.agent_id).collect();
        assert_eq!(ids, [0, 1, 2, 0, 1, 2]);
        assert!(writer.forces.iter().all(|r| !r.avoiding && r.clear_x == 0.0));
    }

    #[test]
    fn integration_csv() {
        let config = config(6, 2);
        let mut sim =
            SimBuilder::new(config.clone(), trio(), SteeringConfig::default(), BruteForceNeighbors, NoObstacles)
                .build()
                .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 9);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[5][0], "5");
        assert_eq!(&rows[5][1], "1.25");
        assert_eq!(&rows[5][2], "3");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{AgentSnapshotRow, SteeringForcesRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            x:     1.5,
            y:     -2.0,
            z:     0.25,
            vx:    0.0,
            vy:    3.0,
            vz:    4.0,
            speed: 5.0,
        }
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[row(0, 1), row(1, 1), row(2, 1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM agent_snapshots", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_position_stored_as_real() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[row(4, 0)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (x, z, speed): (f64, f64, f64) = conn
            .query_row(
                "SELECT x, z, speed FROM agent_snapshots WHERE agent_id = 4",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((x, z, speed), (1.5, 0.25, 5.0));
    }

    #[test]
    fn sqlite_duplicate_snapshot_rejected() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[row(0, 3)]).unwrap();
        assert!(w.write_snapshots(&[row(0, 3)]).is_err());
    }

    #[test]
    fn sqlite_forces_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let forces = |agent_id| SteeringForcesRow {
            agent_id,
            tick: 4,
            avoiding: agent_id == 1,
            separating: agent_id,
            ..SteeringForcesRow::default()
        };
        w.write_forces(&[forces(0), forces(1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let avoiding: i64 = conn
            .query_row("SELECT COUNT(*) FROM steering_forces WHERE avoiding = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(avoiding, 1);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:          7,
            sim_time_secs: 0.14,
            agent_count:   42,
            mean_speed:    2.5,
            mean_visible:  6.0,
            avoiding:      3,
        })
        .unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, count, avoiding): (i64, i64, i64) = conn
            .query_row(
                "SELECT tick, agent_count, avoiding FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!((tick, count, avoiding), (7, 42, 3));
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::row::{AgentSnapshotRow, SteeringForcesRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(agent_id: u32) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick:  2,
            x:     0.0,
            y:     1.0,
            z:     2.0,
            vx:    1.0,
            vy:    0.0,
            vz:    0.0,
            speed: 1.0,
        }
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("agent_snapshots.parquet").exists());
        assert!(dir.path().join("tick_summaries.parquet").exists());
        assert!(dir.path().join("steering_forces.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_schema_and_rows() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[row(0), row(1)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 2);

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["agent_id", "tick", "x", "y", "z", "vx", "vy", "vz", "speed"]);
        assert_eq!(*schema.field_with_name("speed").unwrap().data_type(), DataType::Float32);
    }

    #[test]
    fn parquet_forces_avoiding_is_boolean() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_forces(&[SteeringForcesRow { avoiding: true, ..SteeringForcesRow::default() }]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("steering_forces.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        assert_eq!(*schema.field_with_name("avoiding").unwrap().data_type(), DataType::Boolean);
        let total_rows: usize = builder.build().unwrap().map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 1);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[row(0)]).unwrap();
            // Dropped without finish(): no footer.
        }

        let file = std::fs::File::open(dir.path().join("agent_snapshots.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
