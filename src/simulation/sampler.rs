//! Random sampling used for initialization and flip impulses.
//!
//! The RNG is injected: `Sampler` wraps any `rand::Rng`, and
//! [`Sampler::seeded`] gives a reproducible `StdRng` from the scenario seed.

use std::f64::consts::PI;

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::states::NVec3;
use super::vector::normalize;

pub struct Sampler<R: Rng = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform real in `[lo, hi)`.
    /// An empty, non-finite or overflowing range yields `lo`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if !(hi > lo) || !(hi - lo).is_finite() {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Normal sample via Box–Muller.
    /// `u1` comes from the open interval (0, 1) so `ln(u1)` is always finite.
    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        let u1: f64 = self.rng.sample(Open01);
        let u2: f64 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        z * std + mean
    }

    /// Direction from three uniforms in [-1, 1), normalized.
    /// A degenerate draw is simply redrawn.
    pub fn random_unit_vector(&mut self) -> NVec3 {
        loop {
            let v = NVec3::new(
                self.uniform(-1.0, 1.0),
                self.uniform(-1.0, 1.0),
                self.uniform(-1.0, 1.0),
            );
            match normalize(&v) {
                Ok(dir) => return dir,
                Err(e) => log::warn!("redrawing unit vector: {e}"),
            }
        }
    }

    /// Vector with each component uniform in `[lo, hi)`
    pub fn uniform_vector(&mut self, lo: f64, hi: f64) -> NVec3 {
        NVec3::new(self.uniform(lo, hi), self.uniform(lo, hi), self.uniform(lo, hi))
    }
}
