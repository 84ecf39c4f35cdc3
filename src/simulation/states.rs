//! Core state types for the bottle flip simulation.
//!
//! Defines the particle, bottle (rigid body) and floor structs together with
//! the run state used by the trigger controller.
//!
//! Positions, momenta and velocities are `NVec3` (nalgebra, f64).

use nalgebra::{UnitQuaternion, Vector3};
use serde::Serialize;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: NVec3,
    pub momentum: NVec3,
    pub mass: f64, // fixed at creation
    pub charge: f64,
    pub force: NVec3, // force accumulated during the last step
}

impl Particle {
    pub fn at_rest(position: NVec3, mass: f64, charge: f64) -> Self {
        Self {
            position,
            momentum: NVec3::zeros(),
            mass,
            charge,
            force: NVec3::zeros(),
        }
    }

    /// Velocity derived from momentum, never stored separately
    pub fn velocity(&self) -> NVec3 {
        self.momentum / self.mass
    }

    /// Overwrite the velocity by rewriting the momentum
    pub fn set_velocity(&mut self, v: NVec3) {
        self.momentum = v * self.mass;
    }
}

/// The flipping bottle.
///
/// Orientation is kept explicitly as a quaternion so a renderer can pose the
/// bottle geometry; the physics never reads it (containment treats the bottle
/// as a sphere around `position`).
#[derive(Debug, Clone)]
pub struct Bottle {
    pub position: NVec3,
    pub velocity: NVec3,
    pub angular_velocity: NVec3,
    pub orientation: UnitQuaternion<f64>,
    pub radius: f64,
    pub height: f64,
    pub wall_thickness: f64, // visual only
}

impl Bottle {
    /// Bottle standing upright on `floor`, at rest
    pub fn resting_on(floor: &Floor, radius: f64, height: f64, wall_thickness: f64) -> Self {
        Self {
            position: NVec3::new(0.0, floor.top() + 0.5 * height, 0.0),
            velocity: NVec3::zeros(),
            angular_velocity: NVec3::zeros(),
            orientation: UnitQuaternion::identity(),
            radius,
            height,
            wall_thickness,
        }
    }

    pub fn half_height(&self) -> f64 {
        0.5 * self.height
    }
}

/// Horizontal floor slab, infinite for collision purposes
#[derive(Debug, Clone, Copy)]
pub struct Floor {
    pub y: f64,           // slab center
    pub half_height: f64, // half thickness
    pub width: f64,       // visual only
    pub depth: f64,       // visual only
}

impl Floor {
    pub fn top(&self) -> f64 {
        self.y + self.half_height
    }
}

impl Default for Floor {
    fn default() -> Self {
        Self {
            y: -0.5,
            half_height: 0.5,
            width: 10.0,
            depth: 10.0,
        }
    }
}

/// Run state of the simulation.
/// `Settled` steps exactly like `Idle`; it only records why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Idle,
    Running,
    Settled,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}
