//! Proximity events and the candidate sets they maintain.
//!
//! # Model
//!
//! A [`BroadPhase`] watches agent positions and reports, between ticks, which
//! pairs came within range ([`ProximityEvent::Entered`]) and which left it
//! ([`ProximityEvent::Exited`]).  A [`ProximityTracker`] folds those events
//! into one candidate set per agent.
//!
//! The range of a pair is the *larger* of the two perception radii, so an
//! agent's candidate set is always a superset of the agents it can perceive.
//! Consumers re-filter with [`can_see`][crate::can_see] every tick.
//!
//! [`SpatialBroadPhase`] is the bundled broad-phase: it rebuilds an R-tree of
//! agent positions on each update and diffs the in-range pair set against the
//! previous one.  Applications with their own proximity detector implement
//! [`BroadPhase`] or call [`ProximityTracker::apply`] directly.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashSet;

use shoal_agent::AgentStore;
use shoal_core::AgentId;

// ── Events ────────────────────────────────────────────────────────────────────

/// A change in whether `other` is a perception candidate of `observer`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProximityEvent {
    Entered { observer: AgentId, other: AgentId },
    Exited { observer: AgentId, other: AgentId },
}

impl ProximityEvent {
    #[inline]
    pub fn observer(&self) -> AgentId {
        match *self {
            ProximityEvent::Entered { observer, .. } | ProximityEvent::Exited { observer, .. } => observer,
        }
    }
}

// ── ProximityTracker ──────────────────────────────────────────────────────────

/// Per-agent candidate sets maintained from [`ProximityEvent`]s.
#[derive(Clone, Debug, Default)]
pub struct ProximityTracker {
    candidates: Vec<FxHashSet<AgentId>>,
}

impl ProximityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow to cover `agent_count` agents.  New agents start with no
    /// candidates; existing sets are kept.
    pub fn resize(&mut self, agent_count: usize) {
        if self.candidates.len() < agent_count {
            self.candidates.resize_with(agent_count, FxHashSet::default);
        }
    }

    /// Fold one event into the candidate sets.
    ///
    /// Self-pairs are ignored.  Events for agents beyond the current size grow
    /// the tracker.
    pub fn apply(&mut self, event: ProximityEvent) {
        match event {
            ProximityEvent::Entered { observer, other } => {
                if observer == other {
                    return;
                }
                self.resize(observer.index() + 1);
                self.candidates[observer.index()].insert(other);
            }
            ProximityEvent::Exited { observer, other } => {
                if let Some(set) = self.candidates.get_mut(observer.index()) {
                    set.remove(&other);
                }
            }
        }
    }

    /// Current candidates of `agent`, in no particular order.
    pub fn candidates(&self, agent: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        self.candidates
            .get(agent.index())
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn candidate_count(&self, agent: AgentId) -> usize {
        self.candidates.get(agent.index()).map_or(0, FxHashSet::len)
    }

    /// Drop every candidate of every agent.
    pub fn clear(&mut self) {
        self.candidates.iter_mut().for_each(FxHashSet::clear);
    }
}

// ── BroadPhase trait ──────────────────────────────────────────────────────────

/// Source of proximity events.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so the neighbor query that owns them
/// can be shared across Rayon workers during phase 1.  `update` itself is only
/// called between ticks.
pub trait BroadPhase: Send + Sync {
    /// Compare `store` against the state seen on the previous call and push
    /// the resulting events onto `events`.
    fn update(&mut self, store: &AgentStore, events: &mut Vec<ProximityEvent>);
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Agent position stored in the broad-phase R-tree.
#[derive(Clone)]
struct AgentEntry {
    point: [f32; 3],
    id: AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── SpatialBroadPhase ─────────────────────────────────────────────────────────

/// R-tree broad-phase over agent positions.
///
/// Each [`update`](BroadPhase::update) bulk-loads the current positions
/// (O(N log N)), collects every unordered pair `(a, b)` with
/// `distance ≤ max(radius_a, radius_b)`, and emits `Entered`/`Exited` for both
/// directions of each pair that changed.  Events come out sorted so runs are
/// reproducible.
#[derive(Default)]
pub struct SpatialBroadPhase {
    /// In-range pairs from the previous update, stored `(low, high)`.
    pairs: FxHashSet<(AgentId, AgentId)>,
}

impl SpatialBroadPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of in-range pairs as of the last update.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    fn in_range_pairs(store: &AgentStore) -> FxHashSet<(AgentId, AgentId)> {
        let mut pairs = FxHashSet::default();
        if store.count < 2 {
            return pairs;
        }

        let entries: Vec<AgentEntry> = store
            .agent_ids()
            .map(|id| AgentEntry { point: store.position[id.index()].to_array(), id })
            .collect();
        let tree = RTree::bulk_load(entries);

        // Search with the flock-wide maximum so no pair is missed, then
        // narrow to the pair's own range.
        let search = store.max_perception_radius();
        let search_2 = search * search;

        for a in store.agent_ids() {
            let pa = store.position[a.index()];
            let ra = store.tunables[a.index()].perception_radius;
            for entry in tree.locate_within_distance(pa.to_array(), search_2) {
                let b = entry.id;
                if b <= a {
                    continue;
                }
                let range = ra.max(store.tunables[b.index()].perception_radius);
                if pa.distance_squared(store.position[b.index()]) <= range * range {
                    pairs.insert((a, b));
                }
            }
        }
        pairs
    }
}

impl BroadPhase for SpatialBroadPhase {
    fn update(&mut self, store: &AgentStore, events: &mut Vec<ProximityEvent>) {
        let current = Self::in_range_pairs(store);
        let start = events.len();

        for &(a, b) in current.difference(&self.pairs) {
            events.push(ProximityEvent::Entered { observer: a, other: b });
            events.push(ProximityEvent::Entered { observer: b, other: a });
        }
        for &(a, b) in self.pairs.difference(&current) {
            events.push(ProximityEvent::Exited { observer: a, other: b });
            events.push(ProximityEvent::Exited { observer: b, other: a });
        }
        events[start..].sort_unstable();

        log::debug!(
            "broad-phase: {} pairs in range, {} events",
            current.len(),
            events.len() - start
        );
        self.pairs = current;
    }
}
