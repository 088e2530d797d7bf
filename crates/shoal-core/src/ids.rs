//! Typed indices.
//!
//! Ids are plain indices: `AgentId(i)` is row `i` of every `AgentStore`
//! column and `ObstacleId(i)` is the `i`-th obstacle added to a field.  They
//! order and hash like their integer, which the sorted neighbor lists and the
//! proximity pair sets rely on.

use std::fmt;

macro_rules! index_id {
    ($(#[$attr:meta])* $name:ident, $tag:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// `None` once `index` no longer fits in 32 bits.
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map($name)
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }
    };
}

index_id!(
    /// Row of an agent in the SoA `AgentStore`.
    AgentId, "agent"
);

index_id!(
    /// Position of an obstacle in an `ObstacleField`.
    ObstacleId, "obstacle"
);
