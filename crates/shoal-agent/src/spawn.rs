//! Seeded population growth.
//!
//! A `FlockSpawner` produces [`AgentInit`]s: an initial batch when the run
//! starts and, optionally, a steady trickle at `spawn_rate_per_sec` until
//! `max_spawn_count` agents exist.  The caller appends them to the
//! [`AgentStore`][crate::AgentStore] between ticks.
//!
//! Each spawned agent gets:
//!
//! - a position uniform in the ball of `spawn_radius` around `center`,
//! - a uniform random heading,
//! - a speed uniform in `[min_speed, max_speed]` along that heading,
//! - the base tunables scaled by one factor in `[1 - jitter, 1 + jitter]`.

use glam::Vec3;
use shoal_core::SimRng;

use crate::{AgentError, AgentInit, AgentResult, AgentTunables};

/// Parameters of a [`FlockSpawner`].
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnParams {
    pub center: Vec3,
    pub spawn_radius: f32,

    /// Agents created by [`FlockSpawner::initial`] (capped by
    /// `max_spawn_count`).
    pub initial_spawns: usize,

    /// Population ceiling for both initial and rate-based spawning.
    pub max_spawn_count: usize,

    /// Agents per simulated second after the initial batch.  0 disables.
    pub spawn_rate_per_sec: f32,

    /// Relative spread of the per-agent tunables scale, in `[0, 1]`.
    pub jitter_fraction: f32,

    pub base: AgentTunables,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            center:             Vec3::ZERO,
            spawn_radius:       10.0,
            initial_spawns:     50,
            max_spawn_count:    200,
            spawn_rate_per_sec: 0.0,
            jitter_fraction:    0.1,
            base:               AgentTunables::default(),
        }
    }
}

impl SpawnParams {
    pub fn validate(&self) -> AgentResult<()> {
        if !self.center.is_finite() {
            return Err(AgentError::InvalidSpawn("center is not finite".into()));
        }
        if !self.spawn_radius.is_finite() || self.spawn_radius < 0.0 {
            return Err(AgentError::InvalidSpawn(format!(
                "spawn_radius must be non-negative (got {})",
                self.spawn_radius
            )));
        }
        if !self.spawn_rate_per_sec.is_finite() || self.spawn_rate_per_sec < 0.0 {
            return Err(AgentError::InvalidSpawn(format!(
                "spawn_rate_per_sec must be non-negative (got {})",
                self.spawn_rate_per_sec
            )));
        }
        if !(0.0..=1.0).contains(&self.jitter_fraction) {
            return Err(AgentError::InvalidSpawn(format!(
                "jitter_fraction must be in [0, 1] (got {})",
                self.jitter_fraction
            )));
        }
        self.base.validate()
    }
}

/// Deterministic agent factory driven by a [`SimRng`].
pub struct FlockSpawner {
    params:      SpawnParams,
    rng:         SimRng,
    /// Fractional agents owed by rate-based spawning.
    accumulator: f32,
}

impl FlockSpawner {
    pub fn new(params: SpawnParams, rng: SimRng) -> AgentResult<Self> {
        params.validate()?;
        Ok(Self { params, rng, accumulator: 0.0 })
    }

    pub fn params(&self) -> &SpawnParams {
        &self.params
    }

    /// The initial batch with `current_count` agents already alive:
    /// `initial_spawns`, cut short at `max_spawn_count`.
    pub fn initial(&mut self, current_count: usize) -> Vec<AgentInit> {
        let room = self.params.max_spawn_count.saturating_sub(current_count);
        let n = self.params.initial_spawns.min(room);
        (0..n).map(|_| self.spawn_one()).collect()
    }

    /// Agents owed after `dt_secs` more seconds with `current_count` alive.
    ///
    /// Never returns more than would take the population past
    /// `max_spawn_count`.
    pub fn due(&mut self, current_count: usize, dt_secs: f32) -> Vec<AgentInit> {
        let room = self.params.max_spawn_count.saturating_sub(current_count);
        if room == 0 || self.params.spawn_rate_per_sec <= 0.0 {
            self.accumulator = 0.0;
            return Vec::new();
        }

        self.accumulator += self.params.spawn_rate_per_sec * dt_secs;
        let owed = self.accumulator.floor();
        self.accumulator -= owed;

        let n = (owed as usize).min(room);
        (0..n).map(|_| self.spawn_one()).collect()
    }

    fn spawn_one(&mut self) -> AgentInit {
        let p = &self.params;
        let position = p.center + self.rng.in_unit_ball() * p.spawn_radius;
        let forward = self.rng.unit_vector();
        let tunables = p.base.scaled(self.rng.jitter(p.jitter_fraction));

        let speed = if tunables.max_speed > tunables.min_speed {
            self.rng.gen_range(tunables.min_speed..=tunables.max_speed)
        } else {
            tunables.min_speed
        };

        AgentInit { position, forward, velocity: forward * speed, tunables }
    }
}
