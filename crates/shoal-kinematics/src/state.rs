//! Per-agent kinematic state.

use glam::Vec3;
use shoal_agent::AgentStore;
use shoal_core::AgentId;

/// The slice of an agent that integration reads and writes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KinematicState {
    pub position: Vec3,
    /// Unit heading.
    pub forward:  Vec3,
    pub velocity: Vec3,
}

impl KinematicState {
    /// Copy `agent`'s state out of the store.
    #[inline]
    pub fn of(store: &AgentStore, agent: AgentId) -> Self {
        let i = agent.index();
        Self {
            position: store.position[i],
            forward:  store.forward[i],
            velocity: store.velocity[i],
        }
    }

    /// Write this state back into the store for `agent`.
    #[inline]
    pub fn write_to(&self, store: &mut AgentStore, agent: AgentId) {
        let i = agent.index();
        store.position[i] = self.position;
        store.forward[i] = self.forward;
        store.velocity[i] = self.velocity;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
