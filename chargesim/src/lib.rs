pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use error::SimError;

pub use simulation::states::{Body, System, Snapshot, Trail, NVec2, hitbox_radii};
pub use simulation::params::{Parameters, Softening, Arena, RunParams};
pub use simulation::engine::{Engine, IntegrationScheme, EnergyConfig};
pub use simulation::forces::{Acceleration, AccelSet, Coulomb};
pub use simulation::integrator::{advance, verlet_integrator, rk4_integrator};
pub use simulation::collisions::{resolve_pair, resolve_body_collisions, resolve_walls};
pub use simulation::energy::{compute_energy, Energy, EnergyMonitor};
pub use simulation::scenario::{Scenario, Tick};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, ArenaConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_coulomb, bench_tick};
