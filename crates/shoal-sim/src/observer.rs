//! Hooks for watching a run without touching the tick loop.

use shoal_agent::AgentStore;
use shoal_core::Tick;
use shoal_steering::SteeringForces;

use crate::TickStats;

/// Receives callbacks from [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks].
///
/// Every hook defaults to doing nothing.  Hooks only ever see committed
/// state: the plan phase is finished before `on_tick_end` fires.
///
/// ```rust,ignore
/// struct Progress { every: u64 }
///
/// impl SimObserver for Progress {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.0.is_multiple_of(self.every) {
///             println!("{tick}: {stats}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Before spawning and the neighbor refresh of `tick`.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// After every pose of `tick` has been committed.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Every `config.output_interval_ticks` ticks, right after
    /// `on_tick_end`.
    ///
    /// `forces` holds one entry per agent, in id order, when the run records
    /// forces.
    fn on_snapshot(
        &mut self,
        _tick:   Tick,
        _agents: &AgentStore,
        _forces: Option<&[SteeringForces]>,
    ) {}

    /// Once, when [`Sim::run`][crate::Sim::run] reaches the end tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// Ignores every callback.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
