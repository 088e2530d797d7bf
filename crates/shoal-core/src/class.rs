//! Obstacle classification bitmask.

use std::fmt;

/// A 32-bit layer mask tagging obstacles and filtering ray casts.
///
/// An obstacle carries the bits of the layers it belongs to; a cast carries
/// the bits it is interested in.  The cast sees the obstacle when the two
/// masks share at least one bit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ObstacleClass(pub u32);

impl ObstacleClass {
    pub const NONE: ObstacleClass = ObstacleClass(0);
    pub const ALL: ObstacleClass = ObstacleClass(u32::MAX);

    /// Mask with only `layer` set.  `layer` must be `< 32`.
    #[inline]
    pub const fn layer(layer: u32) -> Self {
        ObstacleClass(1 << layer)
    }

    /// `true` if the two masks share a layer.
    #[inline]
    pub fn intersects(self, other: ObstacleClass) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn union(self, other: ObstacleClass) -> ObstacleClass {
        ObstacleClass(self.0 | other.0)
    }
}

impl Default for ObstacleClass {
    /// Layer 0, the default obstacle layer.
    fn default() -> Self {
        ObstacleClass::layer(0)
    }
}

impl fmt::Display for ObstacleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
