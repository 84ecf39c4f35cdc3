//! Force contributors acting on the particle swarm
//!
//! Each term implements [`Force`] and adds into a per-particle output buffer.
//! Terms only ever read the particle slice, so every force of a tick is
//! computed from the same snapshot before anything is integrated.

use crate::simulation::states::{NVec3, Particle};
use crate::simulation::vector::normalize;

/// Collection of force terms (drag, gravity, pair interaction).
/// Their contributions are summed into a single force per particle
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a force term
    pub fn with(mut self, term: impl Force + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces for all particles
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate(&self, particles: &[Particle], out: &mut [NVec3]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        for term in &self.terms {
            term.apply(particles, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A force source. Implementations add their contribution into `out[i]`
/// for each particle `i`
pub trait Force {
    fn apply(&self, particles: &[Particle], out: &mut [NVec3]);
}

/// Linear drag on momentum: `F = -c * p`
pub struct LinearDrag {
    pub coefficient: f64,
}

impl Force for LinearDrag {
    fn apply(&self, particles: &[Particle], out: &mut [NVec3]) {
        for (p, f) in particles.iter().zip(out.iter_mut()) {
            *f -= self.coefficient * p.momentum;
        }
    }
}

/// Constant gravitational field: `F = m * g`
pub struct UniformGravity {
    pub g: NVec3,
}

impl Force for UniformGravity {
    fn apply(&self, particles: &[Particle], out: &mut [NVec3]) {
        for (p, f) in particles.iter().zip(out.iter_mut()) {
            *f += p.mass * self.g;
        }
    }
}

/// Short-range charge interaction between every pair closer than
/// `max_range` and farther than `min_range`.
///
/// With `r` pointing from particle i to particle j at distance `d`:
///
/// ```text
/// F_i = k q_i q_j r̂ / d²  -  3 k q_i q_j r̂ / d³
/// F_j = -F_i
/// ```
///
/// For like charges the second term dominates whenever `d < 3`, so inside
/// the default range of 1.5 like charges always push apart.
pub struct ChargeInteraction {
    pub k: f64,
    pub min_range: f64,
    pub max_range: f64,
}

impl ChargeInteraction {
    /// Force on a particle of charge `qi` from one of charge `qj` sitting at
    /// offset `r`. `None` when out of range or the direction is degenerate.
    pub fn pair_force(&self, qi: f64, qj: f64, r: &NVec3) -> Option<NVec3> {
        let d = r.norm();
        if d <= self.min_range || d >= self.max_range {
            return None;
        }
        let dir = normalize(r).ok()?;
        let kqq = self.k * qi * qj;
        let d2 = d * d;
        let coef = kqq / d2 - 3.0 * kqq / (d2 * d);
        Some(coef * dir)
    }
}

impl Force for ChargeInteraction {
    fn apply(&self, particles: &[Particle], out: &mut [NVec3]) {
        let n = particles.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let pi = &particles[i];
            for j in (i + 1)..n {
                let pj = &particles[j];
                let r = pj.position - pi.position;

                if let Some(f) = self.pair_force(pi.charge, pj.charge, &r) {
                    // equal and opposite
                    out[i] += f;
                    out[j] -= f;
                }
            }
        }
    }
}
