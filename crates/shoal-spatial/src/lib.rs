//! `shoal-spatial` — perception and obstacle queries.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`neighbor`]   | `NeighborQuery` trait, `can_see`, `BruteForceNeighbors`, `EventDrivenNeighbors` |
//! | [`proximity`]  | `ProximityEvent`, `ProximityTracker`, `BroadPhase`, `SpatialBroadPhase` (R-tree) |
//! | [`obstacle`]   | `ObstacleQuery` trait, `NoObstacles`, `ObstacleField` + builder |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                             |
//!
//! Every query here is a pure read.  Mutation (`refresh`, building an
//! obstacle field) happens between ticks only.

pub mod error;
pub mod neighbor;
pub mod obstacle;
pub mod proximity;


pub use error::{SpatialError, SpatialResult};
pub use neighbor::{can_see, BruteForceNeighbors, EventDrivenNeighbors, NeighborQuery};
pub use obstacle::{NoObstacles, Obstacle, ObstacleField, ObstacleFieldBuilder, ObstacleQuery, ObstacleShape, RayHit};
pub use proximity::{BroadPhase, ProximityEvent, ProximityTracker, SpatialBroadPhase};
