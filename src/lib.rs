pub mod simulation;
pub mod configuration;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Bottle, Floor, NVec3, Particle, RunState};
pub use simulation::error::{SimError, SimResult};
pub use simulation::sampler::Sampler;
pub use simulation::forces::{ChargeInteraction, Force, ForceSet, LinearDrag, UniformGravity};
pub use simulation::swarm::ParticleSwarm;
pub use simulation::bottle::ContactState;
pub use simulation::trigger::{TriggerController, Transition};
pub use simulation::clock::SimulationClock;
pub use simulation::world::{SimulationWorld, Snapshot, StepReport};
pub use simulation::params::Parameters;

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, BottleConfig, FloorConfig, ParticleConfig};

#[cfg(feature = "viewer")]
pub use visualization::bottle_vis3d::run_3d;

pub use benchmark::benchmark::bench_swarm_step;
