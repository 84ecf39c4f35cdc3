pub mod states;
pub mod error;
pub mod vector;
pub mod params;
pub mod sampler;
pub mod forces;
pub mod integrator;
pub mod swarm;
pub mod bottle;
pub mod trigger;
pub mod clock;
pub mod world;
pub mod scenario;
