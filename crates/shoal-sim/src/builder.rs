//! Fluent builder for constructing a [`Sim`].

use shoal_agent::{AgentStore, FlockSpawner, SpawnParams};
use shoal_core::{SimConfig, SimRng, SteeringConfig};
use shoal_kinematics::check_time_step;
use shoal_spatial::{NeighborQuery, ObstacleQuery};
use shoal_steering::SteeringEngine;

use crate::{Sim, SimResult};

/// Seed offset of the spawner's RNG stream.
const SPAWNER_STREAM: u64 = 1;

/// Fluent builder for [`Sim<N, O>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: time step, total ticks, seed, …
/// - [`AgentStore`]: the starting flock (may be empty when spawning)
/// - [`SteeringConfig`]: shared weights
/// - `N: NeighborQuery`: the perception strategy
/// - `O: ObstacleQuery`: the obstacle world
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                          |
/// |----------------------|----------------------------------|
/// | `.spawn(params)`     | No spawner; the flock is fixed   |
/// | `.record_forces(b)`  | `false`                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, store, steering, EventDrivenNeighbors::new(), field)
///     .spawn(spawn_params)
///     .record_forces(true)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<N: NeighborQuery, O: ObstacleQuery> {
    config:        SimConfig,
    agents:        AgentStore,
    steering:      SteeringConfig,
    neighbors:     N,
    obstacles:     O,
    spawn:         Option<SpawnParams>,
    record_forces: bool,
}

impl<N: NeighborQuery, O: ObstacleQuery> SimBuilder<N, O> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:    SimConfig,
        agents:    AgentStore,
        steering:  SteeringConfig,
        neighbors: N,
        obstacles: O,
    ) -> Self {
        Self {
            config,
            agents,
            steering,
            neighbors,
            obstacles,
            spawn:         None,
            record_forces: false,
        }
    }

    /// Grow the flock with a [`FlockSpawner`] seeded from `config.seed`.
    ///
    /// The initial batch is appended at build time; rate-based spawns are
    /// appended between ticks.
    pub fn spawn(mut self, params: SpawnParams) -> Self {
        self.spawn = Some(params);
        self
    }

    /// Keep a per-agent [`SteeringForces`][shoal_steering::SteeringForces]
    /// breakdown for observers.
    pub fn record_forces(mut self, record: bool) -> Self {
        self.record_forces = record;
        self
    }

    /// Validate inputs, run the initial spawn, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<N, O>> {
        self.config.validate()?;
        check_time_step(self.config.dt_secs)?;
        let steering = SteeringEngine::new(self.steering)?.recording_forces(self.record_forces);

        let mut agents = self.agents;
        let spawner = match self.spawn {
            Some(params) => {
                let mut rng = SimRng::new(self.config.seed);
                let mut spawner = FlockSpawner::new(params, rng.child(SPAWNER_STREAM))?;
                let batch = spawner.initial(agents.count);
                agents.extend_agents(&batch)?;
                Some(spawner)
            }
            None => None,
        };

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| crate::SimError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        log::info!(
            "sim built: {} agents, {} ticks of {} s, spawner {}",
            agents.count,
            self.config.total_ticks,
            self.config.dt_secs,
            if spawner.is_some() { "on" } else { "off" }
        );

        Ok(Sim {
            clock:     self.config.make_clock(),
            config:    self.config,
            agents,
            steering,
            neighbors: self.neighbors,
            obstacles: self.obstacles,
            spawner,
            forces:    Vec::new(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
