use std::time::Instant;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Bottle, Floor, NVec3, Particle};
use crate::simulation::swarm::ParticleSwarm;
use crate::simulation::world::default_forces;

/// Helper to build a swarm of size `n` spread through a sphere of radius 5
fn make_swarm(n: usize, params: &Parameters) -> ParticleSwarm {
    let particles = (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec3::new(
                (i_f * 0.37).sin() * 2.5,
                (i_f * 0.13).cos() * 2.5,
                (i_f * 0.07).sin() * 2.5,
            );
            Particle::at_rest(x, params.particle_mass, params.particle_charge)
        })
        .collect();
    ParticleSwarm::from_particles(particles)
}

/// Time the swarm step for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_swarm_step() {
    let params = Parameters::default();
    let forces = default_forces(&params);

    // Large bottle so the clamp never fires and only the force loop is timed
    let mut bottle = Bottle::resting_on(&Floor::default(), 5.0, 10.0, 0.0);
    bottle.position = NVec3::zeros();

    println!("N,step_ms");

    for n in (50..=3200).step_by(150) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 20 } else { 3 };

        let mut swarm = make_swarm(n, &params);

        // Warm-up one step
        swarm.step(params.dt, &forces, &bottle);

        let t0 = Instant::now();
        for _ in 0..steps {
            swarm.step(params.dt, &forces, &bottle);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
