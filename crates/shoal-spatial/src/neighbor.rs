//! Neighbor queries: who can an agent see this tick?
//!
//! # Pluggability
//!
//! The simulation calls perception through the [`NeighborQuery`] trait, so
//! the two strategies are interchangeable:
//!
//! - [`BruteForceNeighbors`] scans the whole flock for every agent.  O(N²)
//!   per tick, no state; the reference implementation and the right choice
//!   for a few hundred agents.
//! - [`EventDrivenNeighbors`] keeps a candidate set per agent, maintained
//!   from proximity events between ticks, and filters only those candidates.
//!
//! Both return exactly the agents accepted by [`can_see`], in ascending id
//! order, so their results are identical for the same world state.

use shoal_agent::AgentStore;
use shoal_core::math::angle_deg;
use shoal_core::AgentId;

use crate::proximity::{BroadPhase, ProximityEvent, ProximityTracker, SpatialBroadPhase};

// ── Perception predicate ──────────────────────────────────────────────────────

/// `true` if `observer` perceives `other`: a different agent within the
/// observer's perception radius and within its perception half-angle of the
/// observer's forward direction.
///
/// An agent at exactly the observer's position is at angle 0 and therefore
/// visible.
#[inline]
pub fn can_see(store: &AgentStore, observer: AgentId, other: AgentId) -> bool {
    if observer == other {
        return false;
    }
    let i = observer.index();
    let t = &store.tunables[i];
    let offset = store.position[other.index()] - store.position[i];
    if offset.length_squared() > t.perception_radius * t.perception_radius {
        return false;
    }
    angle_deg(store.forward[i], offset) <= t.max_perception_angle_deg
}

// ── NeighborQuery trait ───────────────────────────────────────────────────────

/// Pluggable perception strategy.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: `neighbors` is called concurrently
/// from Rayon workers during phase 1 of a tick and must only read.
pub trait NeighborQuery: Send + Sync {
    /// Replace the contents of `out` with the agents `agent` can see, sorted
    /// by id.
    fn neighbors(&self, agent: AgentId, store: &AgentStore, out: &mut Vec<AgentId>);

    /// Bring internal state up to date with `store`.  Called once between
    /// ticks, after any spawning.  Stateless strategies ignore it.
    fn refresh(&mut self, _store: &AgentStore) {}
}

// ── Strategy B ────────────────────────────────────────────────────────────────

/// Full scan of the flock for every query.
#[derive(Copy, Clone, Debug, Default)]
pub struct BruteForceNeighbors;

impl NeighborQuery for BruteForceNeighbors {
    fn neighbors(&self, agent: AgentId, store: &AgentStore, out: &mut Vec<AgentId>) {
        out.clear();
        out.extend(store.agent_ids().filter(|&other| can_see(store, agent, other)));
    }
}

// ── Strategy E ────────────────────────────────────────────────────────────────

/// Candidate sets fed by a [`BroadPhase`], re-filtered with [`can_see`] on
/// every query.
pub struct EventDrivenNeighbors<B: BroadPhase = SpatialBroadPhase> {
    broad_phase: B,
    tracker:     ProximityTracker,
    events:      Vec<ProximityEvent>,
}

impl EventDrivenNeighbors<SpatialBroadPhase> {
    /// Event-driven queries over the bundled R-tree broad-phase.
    pub fn new() -> Self {
        Self::with_broad_phase(SpatialBroadPhase::new())
    }
}

impl Default for EventDrivenNeighbors<SpatialBroadPhase> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BroadPhase> EventDrivenNeighbors<B> {
    pub fn with_broad_phase(broad_phase: B) -> Self {
        Self { broad_phase, tracker: ProximityTracker::new(), events: Vec::new() }
    }

    pub fn tracker(&self) -> &ProximityTracker {
        &self.tracker
    }

    pub fn broad_phase(&self) -> &B {
        &self.broad_phase
    }
}

impl<B: BroadPhase> NeighborQuery for EventDrivenNeighbors<B> {
    fn neighbors(&self, agent: AgentId, store: &AgentStore, out: &mut Vec<AgentId>) {
        out.clear();
        out.extend(
            self.tracker
                .candidates(agent)
                // Ids past the store can only come from a stale external feed.
                .filter(|other| other.index() < store.count)
                .filter(|&other| can_see(store, agent, other)),
        );
        out.sort_unstable();
    }

    fn refresh(&mut self, store: &AgentStore) {
        self.tracker.resize(store.count);
        self.events.clear();
        self.broad_phase.update(store, &mut self.events);
        for &event in &self.events {
            self.tracker.apply(event);
        }
    }
}
