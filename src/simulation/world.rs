//! The simulation world: bottle, floor, swarm, forces, trigger and clock in
//! one owned value. Nothing here is global; the driver loop holds the world
//! and calls [`SimulationWorld::step`] at whatever rate it likes.

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

use crate::simulation::bottle::ContactState;
use crate::simulation::clock::SimulationClock;
use crate::simulation::error::{SimError, SimResult};
use crate::simulation::forces::{ChargeInteraction, ForceSet, LinearDrag, UniformGravity};
use crate::simulation::params::Parameters;
use crate::simulation::sampler::Sampler;
use crate::simulation::states::{Bottle, Floor, NVec3, RunState};
use crate::simulation::swarm::ParticleSwarm;
use crate::simulation::trigger::{TriggerController, Transition};

pub struct SimulationWorld<R: Rng = StdRng> {
    pub parameters: Parameters,
    pub bottle: Bottle,
    pub floor: Floor,
    pub swarm: ParticleSwarm,
    pub forces: ForceSet,
    pub trigger: TriggerController,
    pub clock: SimulationClock,
    sampler: Sampler<R>,
}

/// Summary of a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub state: RunState,
    pub contact: Option<ContactState>, // None when the world was not running
    pub elapsed: f64,
}

/// Read-only pose data for a renderer or for output
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub state: RunState,
    pub elapsed: f64,
    pub ticks: u64,
    pub bottle_position: [f64; 3],
    pub bottle_orientation: [f64; 4], // quaternion x, y, z, w
    pub particles: Vec<[f64; 3]>,
}

/// Standard force set: drag, gravity and the pair interaction
pub fn default_forces(params: &Parameters) -> ForceSet {
    ForceSet::new()
        .with(LinearDrag {
            coefficient: params.drag,
        })
        .with(UniformGravity { g: params.gravity })
        .with(ChargeInteraction {
            k: params.k,
            min_range: params.interaction_min,
            max_range: params.interaction_max,
        })
}

/// Reject parameter sets the simulation cannot run.
/// Every quantity must be finite; sampling spans must not overflow.
pub fn validate(params: &Parameters, bottle: &Bottle, floor: &Floor) -> SimResult<()> {
    let invalid = |msg: String| Err(SimError::InvalidConfiguration(msg));

    let scalars = [
        ("dt", params.dt),
        ("drag", params.drag),
        ("k", params.k),
        ("interaction min", params.interaction_min),
        ("particle mass", params.particle_mass),
        ("particle charge", params.particle_charge),
        ("bottle radius", bottle.radius),
        ("bottle height", bottle.height),
        ("bottle wall thickness", bottle.wall_thickness),
        ("floor y", floor.y),
        ("floor half height", floor.half_height),
        ("floor width", floor.width),
        ("floor depth", floor.depth),
    ];
    for (name, value) in scalars {
        if !value.is_finite() {
            return invalid(format!("{} must be finite, got {}", name, value));
        }
    }
    let vectors = [
        ("gravity", &params.gravity),
        ("bottle position", &bottle.position),
        ("bottle velocity", &bottle.velocity),
        ("bottle angular velocity", &bottle.angular_velocity),
    ];
    for (name, v) in vectors {
        if !v.iter().all(|c| c.is_finite()) {
            return invalid(format!("{} must be finite, got {:?}", name, v.as_slice()));
        }
    }

    if params.dt <= 0.0 {
        return invalid(format!("dt must be positive, got {}", params.dt));
    }
    if params.particle_mass <= 0.0 {
        return invalid(format!("particle mass must be positive, got {}", params.particle_mass));
    }
    if bottle.radius <= 0.0 {
        return invalid(format!("bottle radius must be positive, got {}", bottle.radius));
    }
    if bottle.height <= 0.0 {
        return invalid(format!("bottle height must be positive, got {}", bottle.height));
    }
    // placement samples [-r, r) and [0, h), takes their norm and offsets by the
    // bottle position; none of that may overflow
    let reach = bottle.position.amax() + 2.0 * bottle.radius + bottle.height;
    if !(reach * reach).is_finite() {
        return invalid(format!(
            "bottle geometry r={} h={} is too large to sample",
            bottle.radius, bottle.height
        ));
    }
    if floor.half_height < 0.0 {
        return invalid(format!("floor half height must not be negative, got {}", floor.half_height));
    }
    if params.drag < 0.0 {
        return invalid(format!("drag must not be negative, got {}", params.drag));
    }
    // explicit drag multiplies momentum by (1 - drag*dt) each tick
    if params.drag * params.dt >= 2.0 {
        return invalid(format!(
            "drag * dt = {} makes the drag term amplify momentum; must be below 2",
            params.drag * params.dt
        ));
    }
    if !(params.interaction_min < params.interaction_max) {
        return invalid(format!(
            "interaction range [{}, {}] is empty",
            params.interaction_min, params.interaction_max
        ));
    }
    Ok(())
}

impl SimulationWorld<StdRng> {
    /// Seeded world using the standard force set
    pub fn new(parameters: Parameters, bottle: Bottle, floor: Floor) -> SimResult<Self> {
        let sampler = Sampler::seeded(parameters.seed);
        let forces = default_forces(&parameters);
        Self::with_sampler(parameters, bottle, floor, forces, sampler)
    }
}

impl<R: Rng> SimulationWorld<R> {
    /// World with an injected sampler and force set
    pub fn with_sampler(
        parameters: Parameters,
        bottle: Bottle,
        floor: Floor,
        forces: ForceSet,
        mut sampler: Sampler<R>,
    ) -> SimResult<Self> {
        validate(&parameters, &bottle, &floor)?;

        let swarm = ParticleSwarm::initialize(&bottle, &parameters, &mut sampler)?;
        log::info!(
            "world ready: {} particles, bottle r={} h={}, dt={}",
            swarm.len(),
            bottle.radius,
            bottle.height,
            parameters.dt
        );

        Ok(Self {
            clock: SimulationClock::new(parameters.dt),
            parameters,
            bottle,
            floor,
            swarm,
            forces,
            trigger: TriggerController::new(),
            sampler,
        })
    }

    pub fn state(&self) -> RunState {
        self.trigger.state()
    }

    pub fn is_running(&self) -> bool {
        self.trigger.is_running()
    }

    /// Toggle now
    pub fn toggle(&mut self) -> Transition {
        let transition = self.trigger.toggle();
        self.apply(transition);
        transition
    }

    /// Queue a toggle for the start of the next step (input collaborator)
    pub fn request_toggle(&mut self) {
        self.trigger.request();
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Started => {
                self.bottle.inject_flip_impulse(&mut self.sampler);
                self.swarm.inject_impulse(&mut self.sampler);
                log::debug!(
                    "flip at t={:.2}: v={:?} w={:?}",
                    self.clock.elapsed,
                    self.bottle.velocity.as_slice(),
                    self.bottle.angular_velocity.as_slice()
                );
            }
            Transition::Paused => log::debug!("paused at t={:.2}", self.clock.elapsed),
        }
    }

    /// One fixed step.
    ///
    /// The bottle moves (and resolves floor contact) before the swarm, since
    /// containment must use the bottle's post-update position.
    pub fn step(&mut self) -> StepReport {
        if let Some(transition) = self.trigger.take_pending() {
            self.apply(transition);
        }

        let mut contact = None;
        if self.trigger.is_running() {
            let dt = self.parameters.dt;
            let c = self.bottle.step(dt, &self.parameters.gravity, &self.floor);
            self.swarm.step(dt, &self.forces, &self.bottle);

            if c == ContactState::Settled {
                self.trigger.settle();
                log::debug!("bottle settled at t={:.2}", self.clock.elapsed);
            }
            contact = Some(c);
        }

        self.clock.advance();

        StepReport {
            state: self.trigger.state(),
            contact,
            elapsed: self.clock.elapsed,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let q = self.bottle.orientation.quaternion();
        Snapshot {
            state: self.trigger.state(),
            elapsed: self.clock.elapsed,
            ticks: self.clock.ticks,
            bottle_position: to_array(&self.bottle.position),
            bottle_orientation: [q.i, q.j, q.k, q.w],
            particles: self.swarm.positions().map(to_array).collect(),
        }
    }
}

fn to_array(v: &NVec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}
