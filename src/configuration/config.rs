//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! bottle flip scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – step size, tick cap and random seed
//! - [`ParametersConfig`] – physical constants for the particle forces
//! - [`BottleConfig`]     – bottle geometry and optional start position
//! - [`FloorConfig`]      – floor slab
//! - [`ParticleConfig`]   – swarm size and per-particle properties
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so a partial (or empty) file is valid and the
//! defaults reproduce the classic scene.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   dt: 0.01                # fixed step size
//!   seed: 42                # deterministic seed
//!   max_ticks: 20000        # headless tick cap
//!
//! parameters:
//!   gravity: [0.0, -9.8, 0.0]
//!   drag: 80.0              # linear drag on momentum
//!   k: 10000.0              # interaction constant
//!   interaction_min: 0.01
//!   interaction_max: 1.5
//!
//! bottle:
//!   radius: 0.5
//!   height: 2.0
//!   wall_thickness: 0.01
//!
//! floor:
//!   y: -0.5
//!   half_height: 0.5
//!
//! particles:
//!   count: 35
//!   mass: 0.01
//!   charge: 1.0e-4
//! ```

use serde::Deserialize;

/// Stepping configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub dt: f64,        // fixed time step
    pub seed: u64,      // deterministic seed to make runs reproducible
    pub max_ticks: u64, // headless runs stop here even if the bottle never settles
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            seed: 42,
            max_ticks: 20_000,
        }
    }
}

/// Physical constants for the particle forces
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub gravity: [f64; 3],    // gravitational acceleration
    pub drag: f64,            // linear drag on particle momentum
    pub k: f64,               // interaction constant
    pub interaction_min: f64, // pairs at or below this distance do not interact
    pub interaction_max: f64, // pairs at or beyond this distance do not interact
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.8, 0.0],
            drag: 80.0,
            k: 10_000.0,
            interaction_min: 0.01,
            interaction_max: 1.5,
        }
    }
}

/// Bottle geometry
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BottleConfig {
    pub radius: f64,
    pub height: f64,
    pub wall_thickness: f64,          // drawn only
    pub position: Option<[f64; 3]>,   // defaults to standing on the floor
}

impl Default for BottleConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
            wall_thickness: 0.01,
            position: None,
        }
    }
}

/// Floor slab; only its top surface matters for contact
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FloorConfig {
    pub y: f64,
    pub half_height: f64,
    pub width: f64, // drawn only
    pub depth: f64, // drawn only
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            y: -0.5,
            half_height: 0.5,
            width: 10.0,
            depth: 10.0,
        }
    }
}

/// Particle swarm
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub mass: f64,
    pub charge: f64,
    pub max_init_attempts: usize, // rejection sampling gives up after this many candidates
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 35,
            mass: 0.01,
            charge: 1e-4,
            max_init_attempts: 100_000,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bottle: BottleConfig,
    pub floor: FloorConfig,
    pub particles: ParticleConfig,
}
