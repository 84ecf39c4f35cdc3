//! The particle swarm inside the bottle.
//!
//! Owns particle state, places particles by rejection sampling, and advances
//! them each tick with [`semi_implicit_euler`] followed by the containment
//! clamp against the bottle's current position.

use rand::Rng;

use crate::simulation::error::{SimError, SimResult};
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::{contain, semi_implicit_euler};
use crate::simulation::params::Parameters;
use crate::simulation::sampler::Sampler;
use crate::simulation::states::{Bottle, NVec3, Particle};

#[derive(Debug, Clone)]
pub struct ParticleSwarm {
    pub particles: Vec<Particle>,
    forces: Vec<NVec3>, // scratch buffer, one slot per particle
}

impl ParticleSwarm {
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        let forces = vec![NVec3::zeros(); particles.len()];
        Self { particles, forces }
    }

    /// Place `params.particle_count` particles inside `bottle`.
    ///
    /// Candidates are drawn from `[-r, r] x [0, h] x [-r, r]` and kept only
    /// when their own magnitude is within `r`, then offset by the bottle
    /// position. Each particle starts with a normally distributed speed in a
    /// random direction.
    pub fn initialize<R: Rng>(bottle: &Bottle, params: &Parameters, sampler: &mut Sampler<R>) -> SimResult<Self> {
        let n = params.particle_count;
        let r = bottle.radius;
        let mut particles = Vec::with_capacity(n);
        let mut attempts = 0;

        while particles.len() < n {
            if attempts >= params.max_init_attempts {
                return Err(SimError::SamplingExhaustion {
                    accepted: particles.len(),
                    requested: n,
                    attempts,
                });
            }
            attempts += 1;

            let rt = NVec3::new(
                sampler.uniform(-r, r),
                sampler.uniform(0.0, bottle.height),
                sampler.uniform(-r, r),
            );
            if rt.norm() <= r {
                particles.push(Particle::at_rest(
                    rt + bottle.position,
                    params.particle_mass,
                    params.particle_charge,
                ));
            }
        }

        for p in particles.iter_mut() {
            let speed = sampler.normal(0.0, 1.0);
            let v = speed * sampler.random_unit_vector();
            p.set_velocity(v);
        }

        Ok(Self::from_particles(particles))
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = &NVec3> + '_ {
        self.particles.iter().map(|p| &p.position)
    }

    /// Give every particle a fresh random velocity, each axis in [-2, 2)
    pub fn inject_impulse<R: Rng>(&mut self, sampler: &mut Sampler<R>) {
        for p in self.particles.iter_mut() {
            let v = sampler.uniform_vector(-2.0, 2.0);
            p.set_velocity(v);
        }
    }

    /// One tick: forces from a consistent snapshot, integrate, then clamp
    /// into the bottle at its already-updated position
    pub fn step(&mut self, dt: f64, forces: &ForceSet, bottle: &Bottle) {
        if self.forces.len() != self.particles.len() {
            self.forces.resize(self.particles.len(), NVec3::zeros());
        }
        semi_implicit_euler(&mut self.particles, forces, &mut self.forces, dt);
        contain(&mut self.particles, bottle);
    }
}
