//! Core agent storage: `AgentStore` (SoA data) and `AgentInit` (one agent's
//! initial state).
//!
//! # Layout
//!
//! Every `Vec` field has exactly `count` elements and the `AgentId` value is
//! the index into all of them:
//!
//! ```ignore
//! let p = store.position[agent.index()];  // O(1), cache-friendly
//! ```
//!
//! Steering reads positions and velocities of *other* agents, so keeping
//! them in dense arrays matters more than keeping one agent's fields
//! together.

use glam::Vec3;
use shoal_core::math::is_zero;
use shoal_core::AgentId;

use crate::{AgentError, AgentResult, AgentTunables};

/// Initial state for one agent, the unit of insertion into [`AgentStore`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentInit {
    pub position: Vec3,
    /// Heading.  Normalised on insertion; need not be unit length here.
    pub forward: Vec3,
    pub velocity: Vec3,
    pub tunables: AgentTunables,
}

impl AgentInit {
    /// An agent at `position` heading along `forward` at `speed`.
    pub fn moving(position: Vec3, forward: Vec3, speed: f32, tunables: AgentTunables) -> Self {
        let forward = forward.normalize_or_zero();
        Self { position, forward, velocity: forward * speed, tunables }
    }
}

/// Structure-of-Arrays storage for all agent state.
///
/// Fields are `pub` for direct indexed access on hot paths.  Only the
/// simulation's commit phase writes `position`, `forward`, and `velocity`;
/// `tunables` never change after insertion.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub position: Vec<Vec3>,

    /// Unit heading.  Updated from the velocity direction each tick.
    pub forward: Vec<Vec3>,

    pub velocity: Vec<Vec3>,

    pub tunables: Vec<AgentTunables>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count:    0,
            position: Vec::with_capacity(capacity),
            forward:  Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            tunables: Vec::with_capacity(capacity),
        }
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn speed(&self, agent: AgentId) -> f32 {
        self.velocity[agent.index()].length()
    }

    /// Largest perception radius in the flock (0 when empty).
    ///
    /// Broad-phase queries use this as their search radius so no pair that
    /// either side could perceive is missed.
    pub fn max_perception_radius(&self) -> f32 {
        self.tunables
            .iter()
            .map(|t| t.perception_radius)
            .fold(0.0, f32::max)
    }

    /// Validate and append one agent, returning its new id.
    ///
    /// Must only be called between ticks.
    pub fn push_agent(&mut self, init: AgentInit) -> AgentResult<AgentId> {
        init.tunables.validate()?;

        let id = AgentId::from_index(self.count).ok_or(AgentError::Capacity(self.count))?;
        let forward = initial_forward(id, &init);

        self.position.push(init.position);
        self.forward.push(forward);
        self.velocity.push(init.velocity);
        self.tunables.push(init.tunables);
        self.count += 1;
        Ok(id)
    }

    /// Validate every agent in `inits`, then append them all.
    ///
    /// Either all agents are inserted or none are.
    pub fn extend_agents(&mut self, inits: &[AgentInit]) -> AgentResult<Vec<AgentId>> {
        for (i, init) in inits.iter().enumerate() {
            init.tunables.validate().map_err(|e| match e {
                AgentError::InvalidTunables(msg) => {
                    AgentError::InvalidTunables(format!("agent #{i}: {msg}"))
                }
                other => other,
            })?;
        }
        inits.iter().map(|init| self.push_agent(*init)).collect()
    }
}

/// Unit forward for a new agent: the given heading, else the velocity
/// direction, else `+Z`.
fn initial_forward(id: AgentId, init: &AgentInit) -> Vec3 {
    if !is_zero(init.forward) {
        return init.forward.normalize();
    }
    if !is_zero(init.velocity) {
        return init.velocity.normalize();
    }
    log::warn!("{id} inserted with zero forward and zero velocity; facing +Z");
    Vec3::Z
}
