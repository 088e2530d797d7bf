//! Vector helpers on top of `glam::Vec3`.
//!
//! Every function here is total: degenerate inputs (zero-length vectors)
//! produce a defined value instead of NaN.  Normalisation of a zero vector
//! uses `Vec3::normalize_or_zero`, which yields the zero vector.

use glam::Vec3;

/// Squared length below which a vector is treated as zero.
pub const ZERO_LENGTH_SQ: f32 = 1e-12;

/// World up, used to build a basis around a forward vector.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Fallback reference when forward is (anti)parallel to [`WORLD_UP`].
pub const WORLD_FORWARD: Vec3 = Vec3::Z;

/// `true` if `v` is short enough to have no usable direction.
#[inline]
pub fn is_zero(v: Vec3) -> bool {
    v.length_squared() <= ZERO_LENGTH_SQ
}

/// Unsigned angle between `a` and `b` in degrees, in `[0, 180]`.
///
/// Returns `0.0` when either vector is zero-length, so an agent sharing a
/// position with another is considered to be looking straight at it.
pub fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom <= ZERO_LENGTH_SQ {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Shrink `v` to at most `max_len`, preserving direction.
///
/// A non-positive `max_len` yields the zero vector.
#[inline]
pub fn clamp_magnitude(v: Vec3, max_len: f32) -> Vec3 {
    if max_len <= 0.0 {
        return Vec3::ZERO;
    }
    v.clamp_length_max(max_len)
}

/// Right and up axes completing an orthonormal basis with unit `forward`.
///
/// Uses the left-handed convention (`right = up × forward`), so for
/// `forward = +Z` the basis is `right = +X`, `up = +Y`.
pub fn basis(forward: Vec3) -> (Vec3, Vec3) {
    let reference = if forward.cross(WORLD_UP).length_squared() <= ZERO_LENGTH_SQ {
        WORLD_FORWARD
    } else {
        WORLD_UP
    };
    let right = reference.cross(forward).normalize_or_zero();
    let up = forward.cross(right).normalize_or_zero();
    (right, up)
}

/// Rotate unit `forward` toward unit, orthogonal `axis` by `angle_rad`.
#[inline]
pub fn rotate_toward(forward: Vec3, axis: Vec3, angle_rad: f32) -> Vec3 {
    forward * angle_rad.cos() + axis * angle_rad.sin()
}
