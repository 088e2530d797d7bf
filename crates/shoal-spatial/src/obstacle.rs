//! Obstacle raycasting.
//!
//! The steering engine only ever asks one question of the world: does a ray
//! from here, in this direction, hit an obstacle of this class within this
//! range?  [`ObstacleQuery`] is that question.  [`ObstacleField`] answers it
//! for a static set of spheres and boxes; [`NoObstacles`] is open water.
//!
//! # Hit semantics
//!
//! - Only obstacles whose [`ObstacleClass`] intersects the query class count.
//! - A ray whose origin is inside a shape does not hit that shape.
//! - A zero direction or a non-positive range never hits.
//! - A hit exactly at `max_distance` counts.

use glam::Vec3;
use rstar::{RTree, RTreeObject, AABB};

use shoal_core::math::is_zero;
use shoal_core::{ObstacleClass, ObstacleId};

use crate::{SpatialError, SpatialResult};

// ── ObstacleQuery trait ───────────────────────────────────────────────────────

/// Pluggable raycast service.
///
/// # Thread safety
///
/// `Send + Sync` so one world can be probed by every Rayon worker during
/// phase 1.  `cast` must not mutate.
pub trait ObstacleQuery: Send + Sync {
    /// `true` if the ray `origin + t * direction`, `0 ≤ t ≤ max_distance`,
    /// hits an obstacle in `class`.  `direction` need not be normalised.
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, class: ObstacleClass) -> bool;
}

/// A world with nothing in it.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObstacles;

impl ObstacleQuery for NoObstacles {
    fn cast(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32, _class: ObstacleClass) -> bool {
        false
    }
}

// ── Shapes ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ObstacleShape {
    Sphere { center: Vec3, radius: f32 },
    /// Axis-aligned box.  Zero thickness on an axis is allowed (a wall).
    Aabb { min: Vec3, max: Vec3 },
}

impl ObstacleShape {
    fn validate(&self) -> SpatialResult<()> {
        match *self {
            ObstacleShape::Sphere { center, radius } => {
                if !center.is_finite() || !radius.is_finite() {
                    return Err(SpatialError::InvalidObstacle("sphere has non-finite values".into()));
                }
                if radius <= 0.0 {
                    return Err(SpatialError::InvalidObstacle(format!(
                        "sphere radius must be positive (got {radius})"
                    )));
                }
            }
            ObstacleShape::Aabb { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(SpatialError::InvalidObstacle("box has non-finite corners".into()));
                }
                if min.cmpgt(max).any() {
                    return Err(SpatialError::InvalidObstacle(format!(
                        "box min {min} exceeds max {max}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn bounds(&self) -> (Vec3, Vec3) {
        match *self {
            ObstacleShape::Sphere { center, radius } => (center - Vec3::splat(radius), center + Vec3::splat(radius)),
            ObstacleShape::Aabb { min, max } => (min, max),
        }
    }

    /// Distance along unit `dir` to the first surface crossing, if any.
    fn ray_entry(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        match *self {
            ObstacleShape::Sphere { center, radius } => ray_sphere(origin, dir, center, radius),
            ObstacleShape::Aabb { min, max } => ray_aabb(origin, dir, min, max),
        }
    }
}

fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c < 0.0 {
        return None; // inside
    }
    let b = oc.dot(dir);
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Slab test.  `None` when the origin is strictly inside the box or the ray
/// leaves it from a face.
fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    if origin.cmpgt(min).all() && origin.cmplt(max).all() {
        return None;
    }
    let mut t_near = 0.0_f32;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (mut t1, mut t2) = ((lo - o) / d, (hi - o) / d);
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_near = t_near.max(t1);
        t_far = t_far.min(t2);
        if t_near > t_far {
            return None;
        }
    }
    (t_far > 0.0).then_some(t_near)
}

/// One classified shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub shape: ObstacleShape,
    pub class: ObstacleClass,
}

/// The nearest obstacle along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub obstacle: ObstacleId,
    pub distance: f32,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct ObstacleEntry {
    envelope: AABB<[f32; 3]>,
    id: ObstacleId,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

// ── ObstacleField ─────────────────────────────────────────────────────────────

/// Static obstacle set with an R-tree over shape bounds.
///
/// Build with [`ObstacleFieldBuilder`].
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    index: RTree<ObstacleEntry>,
}

impl ObstacleField {
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.index())
    }

    /// Nearest hit along the ray, or `None`.  Same rules as
    /// [`ObstacleQuery::cast`].
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, class: ObstacleClass) -> Option<RayHit> {
        if is_zero(direction) || !(max_distance > 0.0) || !origin.is_finite() {
            return None;
        }
        let dir = direction.normalize();
        let end = origin + dir * max_distance;
        let segment = AABB::from_corners(origin.min(end).to_array(), origin.max(end).to_array());

        self.index
            .locate_in_envelope_intersecting(&segment)
            .filter_map(|entry| {
                let obstacle = &self.obstacles[entry.id.index()];
                if !obstacle.class.intersects(class) {
                    return None;
                }
                let t = obstacle.shape.ray_entry(origin, dir)?;
                (t <= max_distance).then_some(RayHit { obstacle: entry.id, distance: t })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance).then(a.obstacle.cmp(&b.obstacle)))
    }
}

impl ObstacleQuery for ObstacleField {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, class: ObstacleClass) -> bool {
        self.raycast(origin, direction, max_distance, class).is_some()
    }
}

// ── ObstacleFieldBuilder ──────────────────────────────────────────────────────

/// Collect obstacles, then call [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use shoal_core::{ObstacleClass, Vec3};
/// use shoal_spatial::{ObstacleFieldBuilder, ObstacleQuery};
///
/// let mut b = ObstacleFieldBuilder::new();
/// b.add_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, ObstacleClass::default()).unwrap();
/// let field = b.build();
///
/// assert!(field.cast(Vec3::ZERO, Vec3::Z, 10.0, ObstacleClass::ALL));
/// assert!(!field.cast(Vec3::ZERO, Vec3::X, 10.0, ObstacleClass::ALL));
/// ```
#[derive(Default)]
pub struct ObstacleFieldBuilder {
    obstacles: Vec<Obstacle>,
}

impl ObstacleFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add one obstacle.
    pub fn add(&mut self, obstacle: Obstacle) -> SpatialResult<ObstacleId> {
        obstacle.shape.validate()?;
        let id = ObstacleId::from_index(self.obstacles.len())
            .ok_or_else(|| SpatialError::InvalidObstacle("too many obstacles".into()))?;
        self.obstacles.push(obstacle);
        Ok(id)
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, class: ObstacleClass) -> SpatialResult<ObstacleId> {
        self.add(Obstacle { shape: ObstacleShape::Sphere { center, radius }, class })
    }

    pub fn add_box(&mut self, min: Vec3, max: Vec3, class: ObstacleClass) -> SpatialResult<ObstacleId> {
        self.add(Obstacle { shape: ObstacleShape::Aabb { min, max }, class })
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Bulk-load the R-tree and produce the field.
    pub fn build(self) -> ObstacleField {
        let entries: Vec<ObstacleEntry> = self
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let (min, max) = o.shape.bounds();
                ObstacleEntry {
                    envelope: AABB::from_corners(min.to_array(), max.to_array()),
                    id: ObstacleId(i as u32),
                }
            })
            .collect();
        log::debug!("obstacle field: {} obstacles", entries.len());
        ObstacleField { obstacles: self.obstacles, index: RTree::bulk_load(entries) }
    }
}
