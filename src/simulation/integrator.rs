//! Fixed-step time integration for the particle swarm
//!
//! Provides semi-implicit (symplectic) Euler on momentum and the hard
//! position clamp that keeps particles inside the bottle

use super::forces::ForceSet;
use super::states::{Bottle, NVec3, Particle};
use super::vector::clamp_to_sphere;

/// Advance all particles by one step using semi-implicit Euler.
///
/// Every force is computed into `buf` before any particle moves, so no
/// particle ever sees another's already-integrated position.
pub fn semi_implicit_euler(particles: &mut [Particle], forces: &ForceSet, buf: &mut [NVec3], dt: f64) {
    let n = particles.len();
    if n == 0 { // no particles, return
        return;
    }

    // F_n from x_n, p_n
    forces.accumulate(particles, buf);

    // Kick then drift:
    // p_n+1 = p_n + dt F_n
    // x_n+1 = x_n + dt p_n+1 / m
    for (p, f) in particles.iter_mut().zip(buf.iter()) {
        p.force = *f;
        p.momentum += *f * dt;
        p.position += p.momentum / p.mass * dt;
    }
}

/// Clamp every particle back onto the sphere of `bottle.radius` around the
/// bottle position. Bottle rotation is ignored; momentum is left untouched.
pub fn contain(particles: &mut [Particle], bottle: &Bottle) {
    for p in particles.iter_mut() {
        p.position = clamp_to_sphere(p.position, &bottle.position, bottle.radius);
    }
}
