//! aquarium — a school of fish in a walled tank with rocks and kelp.
//!
//! Usage:
//!
//! ```text
//! aquarium [STEERING_JSON] [brute|event]
//! ```
//!
//! `STEERING_JSON` overrides the default steering weights (see
//! `demos/aquarium/steering.json`).  The second argument picks the perception
//! strategy; both give identical results, `event` scales better.
//! Set `RUST_LOG=info` (or `debug` for per-tick stats) to see the run log.

use std::path::Path;
use std::time::Instant;

use anyhow::{Result, bail};
use glam::Vec3;

use shoal_agent::{AgentStore, AgentTunables, SpawnParams};
use shoal_core::{ObstacleClass, SimConfig, SteeringConfig, Tick};
use shoal_output::{CsvWriter, OutputWriter, SimOutputObserver};
use shoal_sim::{SimBuilder, SimObserver, TickStats};
use shoal_spatial::{
    BruteForceNeighbors, EventDrivenNeighbors, NeighborQuery, ObstacleField, ObstacleFieldBuilder,
};
use shoal_steering::SteeringForces;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64   = 42;
const DT_SECS:               f32   = 0.02;
const SIM_SECS:              u64   = 30;
const OUTPUT_INTERVAL_TICKS: u64   = 25;    // two snapshots per simulated second
const INITIAL_FISH:          usize = 80;
const MAX_FISH:              usize = 200;
const SPAWN_RATE_PER_SEC:    f32   = 4.0;
const OUTPUT_DIR:            &str  = "output/aquarium";

/// Half extent of the tank interior.
const TANK_HALF:      f32 = 20.0;
const WALL_THICKNESS: f32 = 1.0;

/// Solid geometry fish steer around.
const SOLID: ObstacleClass = ObstacleClass::layer(0);
/// Kelp: obstacles on their own layer that the default steering ignores.
const KELP: ObstacleClass = ObstacleClass::layer(1);

// ── Scene ─────────────────────────────────────────────────────────────────────

fn build_tank() -> Result<ObstacleField> {
    let mut field = ObstacleFieldBuilder::new();
    let (h, t) = (TANK_HALF, WALL_THICKNESS);

    // Six slabs enclosing [-h, h]³.
    for axis in 0..3 {
        for sign in [-1.0_f32, 1.0] {
            let mut min = Vec3::splat(-h - t);
            let mut max = Vec3::splat(h + t);
            if sign > 0.0 {
                min[axis] = h;
            } else {
                max[axis] = -h;
            }
            field.add_box(min, max, SOLID)?;
        }
    }

    // Rocks on the floor.
    for (x, z, r) in [(-8.0, -6.0, 4.0), (9.0, 4.0, 3.0), (2.0, 12.0, 2.5)] {
        field.add_sphere(Vec3::new(x, -h + r * 0.5, z), r, SOLID)?;
    }

    // Kelp columns.
    for (x, z) in [(-12.0, 10.0), (14.0, -11.0)] {
        field.add_box(Vec3::new(x - 0.3, -h, z - 0.3), Vec3::new(x + 0.3, h * 0.5, z + 0.3), KELP)?;
    }

    Ok(field.build())
}

fn spawn_params() -> SpawnParams {
    SpawnParams {
        center:             Vec3::new(0.0, 5.0, 0.0),
        spawn_radius:       8.0,
        initial_spawns:     INITIAL_FISH,
        max_spawn_count:    MAX_FISH,
        spawn_rate_per_sec: SPAWN_RATE_PER_SEC,
        jitter_fraction:    0.15,
        base:               AgentTunables {
            perception_radius:        5.0,
            max_perception_angle_deg: 135.0,
            separation_radius:        1.2,
            avoidance_range:          4.0,
            min_speed:                2.0,
            max_speed:                6.0,
        },
    }
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    peak_avoiding: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, peak_avoiding: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.peak_avoiding = self.peak_avoiding.max(stats.avoiding);
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, forces: Option<&[SteeringForces]>) {
        self.snapshot_rows += agents.count;
        self.inner.on_snapshot(tick, agents, forces);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run<N: NeighborQuery>(
    config:    SimConfig,
    steering:  SteeringConfig,
    neighbors: N,
    tank:      ObstacleField,
) -> Result<()> {
    let mut sim = SimBuilder::new(config.clone(), AgentStore::new(), steering, neighbors, tank)
        .spawn(spawn_params())
        .build()?;
    println!("Initial school: {} fish", sim.agents.count);

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config));

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        log::error!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  peak avoiding       : {} fish", obs.peak_avoiding);
    println!();

    let outside = sim
        .agents
        .position
        .iter()
        .filter(|p| p.abs().max_element() > TANK_HALF)
        .count();
    let mean_speed =
        sim.agents.velocity.iter().map(|v| v.length()).sum::<f32>() / sim.agents.count.max(1) as f32;

    println!("{:<16} {:>10}", "Final", "");
    println!("{}", "-".repeat(27));
    println!("{:<16} {:>10}", "fish", sim.agents.count);
    println!("{:<16} {:>10.3}", "mean speed", mean_speed);
    println!("{:<16} {:>10}", "outside tank", outside);

    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args().skip(1);
    let steering = match args.next() {
        Some(path) => SteeringConfig::load_json(Path::new(&path))?,
        None => SteeringConfig { obstacle_class: SOLID, ..SteeringConfig::default() },
    };
    let strategy = args.next().unwrap_or_else(|| "event".to_owned());

    let config = SimConfig {
        dt_secs:               DT_SECS,
        total_ticks:           (SIM_SECS as f32 / DT_SECS).round() as u64,
        seed:                  SEED,
        num_threads:           None, // all logical cores
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
    };

    println!("=== aquarium — shoal flocking ===");
    println!(
        "Fish: {INITIAL_FISH} → {MAX_FISH}  |  {} ticks of {DT_SECS} s  |  Seed: {SEED}  |  Neighbors: {strategy}",
        config.total_ticks
    );

    let tank = build_tank()?;
    println!("Tank: {} obstacles", tank.len());
    println!();

    match strategy.as_str() {
        "event" => run(config, steering, EventDrivenNeighbors::new(), tank),
        "brute" => run(config, steering, BruteForceNeighbors, tank),
        other => bail!("unknown neighbor strategy {other:?} (expected `brute` or `event`)"),
    }
}
