//! Rigid-body motion of the bottle
//!
//! Gravity, free flight, spin, and a discrete floor contact with 50%
//! restitution. Contact is checked once per tick on penetration only, so a
//! very large `dt` can tunnel through the floor.

use nalgebra::{Unit, UnitQuaternion};
use rand::Rng;

use crate::simulation::sampler::Sampler;
use crate::simulation::states::{Bottle, Floor, NVec3};
use crate::simulation::vector::normalize;

pub const RESTITUTION: f64 = 0.5;
pub const IMPACT_SPIN_DAMPING: f64 = 0.5;
pub const REST_SPIN_DAMPING: f64 = 0.1;
pub const REST_SPEED: f64 = 0.1;

/// Outcome of a bottle step with respect to the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactState {
    Free,    // no floor contact this tick
    Bounced, // touched the floor and bounced
    Settled, // came to rest on the floor
}

impl Bottle {
    /// Advance the bottle by one tick: gravity kick, drift, spin, floor contact
    pub fn step(&mut self, dt: f64, gravity: &NVec3, floor: &Floor) -> ContactState {
        self.velocity += gravity * dt;
        self.position += self.velocity * dt;
        self.rotate(dt);
        self.resolve_floor(floor)
    }

    /// Rotate about `angular_velocity` by `|angular_velocity| * dt`.
    /// The pivot is the bottle's own position, so only the orientation moves.
    pub fn rotate(&mut self, dt: f64) {
        let Ok(axis) = normalize(&self.angular_velocity) else {
            return;
        };
        let angle = self.angular_velocity.norm() * dt;
        let spin = UnitQuaternion::from_axis_angle(&Unit::new_unchecked(axis), angle);
        self.orientation = spin * self.orientation;
    }

    /// Discrete floor contact
    pub fn resolve_floor(&mut self, floor: &Floor) -> ContactState {
        let floor_top = floor.top();
        if self.position.y - self.half_height() > floor_top {
            return ContactState::Free;
        }

        // unstick, bounce, lose spin
        self.position.y = floor_top + self.half_height();
        self.velocity.y = -self.velocity.y * RESTITUTION;
        self.angular_velocity *= IMPACT_SPIN_DAMPING;

        if self.velocity.y > 0.0 && self.velocity.norm() < REST_SPEED {
            self.velocity.y = 0.0;
            self.angular_velocity *= REST_SPIN_DAMPING;
        }

        if self.velocity.norm() < REST_SPEED && self.angular_velocity.norm() < REST_SPEED {
            ContactState::Settled
        } else {
            ContactState::Bounced
        }
    }

    /// Random upward launch and tumble
    pub fn inject_flip_impulse<R: Rng>(&mut self, sampler: &mut Sampler<R>) {
        self.velocity = NVec3::new(0.0, sampler.uniform(5.0, 15.0), 0.0);
        self.angular_velocity = NVec3::new(
            sampler.uniform(-10.0, 10.0),
            0.0,
            sampler.uniform(-10.0, 10.0),
        );
    }
}
