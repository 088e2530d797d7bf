//! Deterministic simulation-level RNG.
//!
//! Steering itself is deterministic; randomness only enters when agents are
//! spawned (start position, heading, speed, tunables jitter).  All of it
//! flows from one `SimRng` seeded by `SimConfig::seed`, so the same seed
//! always yields the same flock.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG with the geometric samplers the spawner needs.
///
/// Used only in single-threaded contexts (between ticks).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, e.g. one per
    /// spawner.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform point inside the unit ball (rejection sampling).
    pub fn in_unit_ball(&mut self) -> Vec3 {
        loop {
            let p = Vec3::new(
                self.0.gen_range(-1.0..=1.0),
                self.0.gen_range(-1.0..=1.0),
                self.0.gen_range(-1.0..=1.0),
            );
            if p.length_squared() <= 1.0 {
                return p;
            }
        }
    }

    /// Uniform direction on the unit sphere.
    pub fn unit_vector(&mut self) -> Vec3 {
        let z: f32 = self.0.gen_range(-1.0..=1.0);
        let phi: f32 = self.0.gen_range(0.0..TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }

    /// Scale factor uniform in `[1 - fraction, 1 + fraction]`.
    ///
    /// `fraction` is clamped to `[0, 1]` so the factor is never negative.
    pub fn jitter(&mut self, fraction: f32) -> f32 {
        let f = fraction.clamp(0.0, 1.0);
        if f == 0.0 {
            return 1.0;
        }
        self.0.gen_range(1.0 - f..=1.0 + f)
    }
}
