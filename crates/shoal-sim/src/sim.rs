//! The `Sim` struct and its tick loop.

use shoal_agent::{AgentStore, FlockSpawner};
use shoal_core::{AgentId, SimClock, SimConfig, Tick};
use shoal_kinematics::{integrate_agent, KinematicState};
use shoal_spatial::{NeighborQuery, ObstacleQuery};
use shoal_steering::{Steering, SteeringEngine, SteeringForces};

use crate::{SimObserver, SimResult, TickStats};

// ── Phase 1 output ────────────────────────────────────────────────────────────

/// One agent's planned outcome for a tick, produced in the read-only phase
/// and applied in the commit phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PoseUpdate {
    pub agent:    AgentId,
    pub next:     KinematicState,
    pub steering: Steering,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<N, O>` holds all simulation state and drives the two-phase tick loop:
///
/// 0. **Between ticks**: the spawner (if any) appends agents that are due,
///    then the [`NeighborQuery`] refreshes against the new positions.
/// 1. **Plan** (read-only, optionally parallel with the `parallel` feature):
///    every agent's neighbors, steering, and integrated state are computed
///    from the same snapshot.  See [`plan_tick`](Self::plan_tick).
/// 2. **Commit** (sequential, ascending `AgentId`): all [`PoseUpdate`]s are
///    written back.  See [`commit`](Self::commit).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<N: NeighborQuery, O: ObstacleQuery> {
    /// Global configuration (time step, total ticks, seed, …).
    pub config: SimConfig,

    /// Current tick and its simulated time.
    pub clock: SimClock,

    /// Agent state (SoA arrays).  Only the commit phase and the spawner
    /// write here.
    pub agents: AgentStore,

    /// Shared, read-only steering weights and the avoidance search.
    pub steering: SteeringEngine,

    /// Perception strategy.
    pub neighbors: N,

    /// Obstacle world probed by avoidance.
    pub obstacles: O,

    /// Population growth between ticks, if configured.
    pub spawner: Option<FlockSpawner>,

    /// Per-agent force breakdown of the last committed tick.  Empty unless the
    /// steering engine records forces.
    pub(crate) forces: Vec<SteeringForces>,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<N: NeighborQuery, O: ObstacleQuery> Sim<N, O> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<Obs: SimObserver>(&mut self, observer: &mut Obs) -> SimResult<()> {
        log::info!(
            "running {} → {} with {} agents (dt {} s)",
            self.clock.current_tick,
            self.config.end_tick(),
            self.agents.count,
            self.config.dt_secs
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        log::info!("finished at {} with {} agents", self.clock, self.agents.count);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<Obs: SimObserver>(&mut self, n: u64, observer: &mut Obs) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// The tick the next call to `run`/`run_ticks` will process.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Per-agent force breakdown of the last committed tick, if recorded.
    pub fn last_forces(&self) -> Option<&[SteeringForces]> {
        (self.steering.records_forces() && self.forces.len() == self.agents.count)
            .then_some(self.forces.as_slice())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Phase 0: spawn due agents and refresh the neighbor query.
    ///
    /// Must only be called between ticks.
    pub fn prepare_tick(&mut self) -> SimResult<()> {
        if let Some(spawner) = self.spawner.as_mut() {
            let due = spawner.due(self.agents.count, self.config.dt_secs);
            if !due.is_empty() {
                let ids = self.agents.extend_agents(&due)?;
                log::debug!("{}: spawned {} agents", self.clock.current_tick, ids.len());
            }
        }
        self.neighbors.refresh(&self.agents);
        Ok(())
    }

    /// Phase 1: compute every agent's next state from the current snapshot.
    ///
    /// Takes `&self`: nothing is written, so every agent sees the same world.
    /// Updates come back in ascending `AgentId` order.
    pub fn plan_tick(&self) -> Vec<PoseUpdate> {
        #[cfg(not(feature = "parallel"))]
        {
            let mut scratch = Vec::new();
            self.agents
                .agent_ids()
                .map(|agent| self.plan_agent(agent, &mut scratch))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let plan_all = || -> Vec<PoseUpdate> {
                (0..self.agents.count as u32)
                    .into_par_iter()
                    .map_init(Vec::new, |scratch, i| self.plan_agent(AgentId(i), scratch))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(plan_all),
                None => plan_all(),
            }
        }
    }

    /// Phase 2: write all updates back and summarise the tick.
    pub fn commit(&mut self, updates: Vec<PoseUpdate>) -> TickStats {
        let record = self.steering.records_forces();
        self.forces.clear();

        let mut speed_sum = 0.0_f32;
        let mut visible_sum = 0u64;
        let mut avoiding = 0usize;

        for update in &updates {
            update.next.write_to(&mut self.agents, update.agent);
            speed_sum += update.next.speed();
            visible_sum += u64::from(update.steering.visible);
            avoiding += usize::from(update.steering.avoiding);
            if record {
                self.forces.push(update.steering.forces.unwrap_or_default());
            }
        }

        let n = updates.len();
        let denom = n.max(1) as f32;
        TickStats {
            agent_count:  n,
            mean_speed:   speed_sum / denom,
            mean_visible: visible_sum as f32 / denom,
            avoiding,
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<Obs: SimObserver>(&mut self, observer: &mut Obs) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.prepare_tick()?;
        let updates = self.plan_tick();
        let stats = self.commit(updates);

        log::debug!("{now}: {stats}");
        observer.on_tick_end(now, &stats);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents, self.last_forces());
        }

        self.clock.advance();
        Ok(())
    }

    fn plan_agent(&self, agent: AgentId, scratch: &mut Vec<AgentId>) -> PoseUpdate {
        self.neighbors.neighbors(agent, &self.agents, scratch);
        let steering = self.steering.compute(agent, &self.agents, scratch, &self.obstacles);
        let next = integrate_agent(&self.agents, agent, steering.acceleration, self.config.dt_secs);
        PoseUpdate { agent, next, steering }
    }
}
