//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size and tick cap,
//! - gravity, drag and the interaction constant,
//! - particle count, mass and charge,
//! - rejection-sampling cap and random seed

use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,                // fixed step size
    pub max_ticks: u64,         // stop headless runs after this many ticks
    pub seed: u64,              // deterministic seed
    pub gravity: NVec3,         // gravitational acceleration
    pub drag: f64,              // linear drag on particle momentum
    pub k: f64,                 // interaction constant
    pub interaction_min: f64,   // pairs closer than this are ignored
    pub interaction_max: f64,   // pairs farther than this are ignored
    pub particle_count: usize,  // N
    pub particle_mass: f64,     // mass of every particle
    pub particle_charge: f64,   // charge of every particle
    pub max_init_attempts: usize, // rejection sampling cap
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 0.01,
            max_ticks: 20_000,
            seed: 42,
            gravity: NVec3::new(0.0, -9.8, 0.0),
            drag: 80.0,
            k: 10_000.0,
            interaction_min: 0.01,
            interaction_max: 1.5,
            particle_count: 35,
            particle_mass: 0.01,
            particle_charge: 1e-4,
            max_init_attempts: 100_000,
        }
    }
}
