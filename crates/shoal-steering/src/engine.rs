//! The steering engine.
//!
//! # Per-agent algorithm
//!
//! 1. Re-check every candidate neighbor with [`can_see`] and accumulate, over
//!    the visible ones: position sum, velocity sum, and for those within
//!    `separation_radius` the sum of `(self − other)` offsets.
//! 2. Turn each mean into a direction and each direction into a force with
//!    [`steer_force`]; weight and sum.
//! 3. Probe forward up to `avoidance_range`.  On a hit, add the weighted
//!    steer force toward the [`ClearDirectionSearch`] result.
//!
//! No state carries over between calls.

use glam::Vec3;
use shoal_agent::AgentStore;
use shoal_core::{AgentId, SteeringConfig};
use shoal_spatial::{can_see, ObstacleQuery};

use crate::{steer_force, ClearDirectionSearch, Steering, SteeringForces, SteeringResult};

/// Blends cohesion, alignment, separation, and avoidance into one
/// acceleration per agent.
///
/// Holds only the validated [`SteeringConfig`], so one engine is shared by
/// every worker thread.
#[derive(Clone, Debug)]
pub struct SteeringEngine {
    config:        SteeringConfig,
    search:        ClearDirectionSearch,
    record_forces: bool,
}

impl SteeringEngine {
    /// Validate `config` and build an engine that does not record forces.
    pub fn new(config: SteeringConfig) -> SteeringResult<Self> {
        config.validate()?;
        let search = ClearDirectionSearch::from_config(&config);
        Ok(Self { config, search, record_forces: false })
    }

    /// Return per-force diagnostics in [`Steering::forces`].
    pub fn recording_forces(mut self, record: bool) -> Self {
        self.record_forces = record;
        self
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    pub fn search(&self) -> &ClearDirectionSearch {
        &self.search
    }

    pub fn records_forces(&self) -> bool {
        self.record_forces
    }

    /// Desired acceleration of `agent` this tick.
    ///
    /// `neighbors` may be any superset of the visible agents (e.g. a stale
    /// candidate set); each entry is re-validated.
    pub fn compute<O: ObstacleQuery + ?Sized>(
        &self,
        agent:     AgentId,
        agents:    &AgentStore,
        neighbors: &[AgentId],
        obstacles: &O,
    ) -> Steering {
        let i = agent.index();
        let position = agents.position[i];
        let velocity = agents.velocity[i];
        let forward = agents.forward[i];
        let t = &agents.tunables[i];
        let sep_radius_2 = t.separation_radius * t.separation_radius;

        let mut visible = 0u32;
        let mut position_sum = Vec3::ZERO;
        let mut velocity_sum = Vec3::ZERO;
        let mut separating = 0u32;
        let mut away_sum = Vec3::ZERO;

        for &other in neighbors {
            if !can_see(agents, agent, other) {
                continue;
            }
            let other_pos = agents.position[other.index()];
            visible += 1;
            position_sum += other_pos;
            velocity_sum += agents.velocity[other.index()];

            let away = position - other_pos;
            if away.length_squared() <= sep_radius_2 {
                separating += 1;
                away_sum += away;
            }
        }

        let (cohesion, alignment) = if visible > 0 {
            let n = visible as f32;
            (position_sum / n - position, velocity_sum / n)
        } else {
            (Vec3::ZERO, Vec3::ZERO)
        };
        let separation = if separating > 0 { away_sum / separating as f32 } else { Vec3::ZERO };

        let cfg = &self.config;
        let steer = |dir: Vec3| steer_force(dir, velocity, t.max_speed, cfg.max_steer_force);

        let mut acceleration = steer(cohesion) * cfg.cohere_strength
            + steer(alignment) * cfg.align_strength
            + steer(separation) * cfg.separate_strength;

        let mut clear_direction = None;
        if obstacles.cast(position, forward, t.avoidance_range, cfg.obstacle_class) {
            let clear = self
                .search
                .find(position, forward, t.avoidance_range, cfg.obstacle_class, obstacles);
            acceleration += steer(clear) * cfg.avoidance_strength;
            clear_direction = Some(clear);
        }

        let forces = self.record_forces.then_some(SteeringForces {
            cohesion,
            alignment,
            separation,
            clear_direction,
            separating,
        });

        Steering { acceleration, visible, avoiding: clear_direction.is_some(), forces }
    }
}
