//! Build fully-initialized simulation worlds from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! `SimulationWorld`:
//! - numerical/physical parameters (`Parameters`)
//! - bottle and floor
//! - swarm placed inside the bottle at t = 0
//! - standard force set (drag, gravity, pair interaction)

use nalgebra::UnitQuaternion;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::error::SimResult;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Bottle, Floor, NVec3};
use crate::simulation::world::SimulationWorld;

impl SimulationWorld {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let ScenarioConfig {
            engine,
            parameters: p_cfg,
            bottle: b_cfg,
            floor: f_cfg,
            particles,
        } = cfg;

        // Parameters (runtime) from the engine, parameter and particle sections
        let parameters = Parameters {
            dt: engine.dt,
            max_ticks: engine.max_ticks,
            seed: engine.seed,
            gravity: NVec3::from(p_cfg.gravity),
            drag: p_cfg.drag,
            k: p_cfg.k,
            interaction_min: p_cfg.interaction_min,
            interaction_max: p_cfg.interaction_max,
            particle_count: particles.count,
            particle_mass: particles.mass,
            particle_charge: particles.charge,
            max_init_attempts: particles.max_init_attempts,
        };

        let floor = Floor {
            y: f_cfg.y,
            half_height: f_cfg.half_height,
            width: f_cfg.width,
            depth: f_cfg.depth,
        };

        // Bottle stands on the floor unless placed explicitly
        let bottle = match b_cfg.position {
            Some(pos) => Bottle {
                position: NVec3::from(pos),
                velocity: NVec3::zeros(),
                angular_velocity: NVec3::zeros(),
                orientation: UnitQuaternion::identity(),
                radius: b_cfg.radius,
                height: b_cfg.height,
                wall_thickness: b_cfg.wall_thickness,
            },
            None => Bottle::resting_on(&floor, b_cfg.radius, b_cfg.height, b_cfg.wall_thickness),
        };

        SimulationWorld::new(parameters, bottle, floor)
    }
}
