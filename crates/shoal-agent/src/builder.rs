//! Fluent builder for constructing an `AgentStore` in one step.
//!
//! # Usage
//!
//! ```rust
//! use shoal_agent::{AgentInit, AgentStoreBuilder, AgentTunables};
//! use shoal_core::Vec3;
//!
//! let store = AgentStoreBuilder::new()
//!     .agent(AgentInit::moving(Vec3::ZERO, Vec3::Z, 3.0, AgentTunables::default()))
//!     .agent(AgentInit::moving(Vec3::X, Vec3::Z, 3.0, AgentTunables::default()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count, 2);
//! ```

use crate::{AgentInit, AgentResult, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// Agents are collected first and validated together in
/// [`build`](Self::build), so a bad row anywhere fails the whole build.
#[derive(Default)]
pub struct AgentStoreBuilder {
    inits: Vec<AgentInit>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self { inits: Vec::new() }
    }

    /// Pre-allocate for `n` agents.
    pub fn with_capacity(n: usize) -> Self {
        Self { inits: Vec::with_capacity(n) }
    }

    pub fn agent(mut self, init: AgentInit) -> Self {
        self.inits.push(init);
        self
    }

    pub fn agents(mut self, inits: impl IntoIterator<Item = AgentInit>) -> Self {
        self.inits.extend(inits);
        self
    }

    /// Validate all agents and construct the store.
    pub fn build(self) -> AgentResult<AgentStore> {
        let mut store = AgentStore::with_capacity(self.inits.len());
        store.extend_agents(&self.inits)?;
        Ok(store)
    }
}
