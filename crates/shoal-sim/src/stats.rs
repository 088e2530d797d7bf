//! Per-tick aggregate statistics.

use std::fmt;

/// Flock-wide summary of one committed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Agents updated this tick.
    pub agent_count: usize,
    /// Mean speed after integration.
    pub mean_speed: f32,
    /// Mean number of visible neighbors per agent.
    pub mean_visible: f32,
    /// Agents whose forward probe hit an obstacle.
    pub avoiding: usize,
}

impl fmt::Display for TickStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} agents, mean speed {:.2}, mean visible {:.1}, {} avoiding",
            self.agent_count, self.mean_speed, self.mean_visible, self.avoiding
        )
    }
}
