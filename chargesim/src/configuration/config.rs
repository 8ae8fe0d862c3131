//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator choice, collision relaxation, energy thresholds
//! - [`ParametersConfig`] – time step, run length, physical constants, arena
//! - [`BodyConfig`]       – initial state for each point charge
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # or "rk4"
//!   relaxation_passes: 1    # body-body collision sweeps per tick
//!   correction_damping: 1.0 # share of an overlap removed per contact
//!
//! parameters:
//!   dt: 0.001               # time step
//!   steps: 5000             # ticks to run headless
//!   k: 8.99e9               # Coulomb constant
//!   min_r2: 400.0           # floor on squared separation
//!   softening_eps: 0.0      # softening length
//!   wall_restitution: 1.0
//!   trails: true            # keep position history for display
//!   arena: { width: 1500.0, height: 900.0, wall_thickness: 20.0 }
//!
//! bodies:
//!   - x: [ 700.0, 450.0 ]
//!     q: 1.0e-4
//!     m: 1.0
//!   - x: [ 800.0, 450.0 ]
//!     v: [ 0.0, 50.0 ]
//!     q: -1.0e-4
//!     m: 1.0
//!     radius: 12.0
//!     e: 1.0
//!     static: false
//!     environmental: true
//! ```
//!
//! Optional fields fall back to the defaults of the runtime types.

use serde::Deserialize;

/// Which integrator method used by the engine
/// integrator: "verlet"` or `integrator: "rk4"
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // Velocity-Verlet integrator. Symplectic, bounded long-term energy error
    #[default]
    Verlet,

    #[serde(rename = "rk4")] // Classical 4th-order Runge–Kutta integrator (RK4), higher local accuracy per step but not symplectic
    Rk4,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig, // Time integrator used for advancing the system state
    pub relaxation_passes: Option<usize>, // Body-body collision sweeps per tick, default 1
    pub correction_damping: Option<f64>, // Share of an overlap removed per contact, default 1.0
    pub energy_tolerance: Option<f64>, // Energy drift tolerated before correcting
    pub min_kinetic: Option<f64>, // Kinetic energy below which no correction runs
}

/// Walled rectangle the bodies live in
#[derive(Deserialize, Debug, Clone)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub wall_thickness: f64,
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,      // time step size
    pub steps: usize, // number of ticks to run
    pub k: Option<f64>, // Coulomb constant, default 8.99e9
    pub min_r2: Option<f64>, // floor on squared separation, default 400
    pub softening_eps: Option<f64>, // softening length, default 0
    pub wall_restitution: Option<f64>, // default 0.9
    pub arena: Option<ArenaConfig>, // default 1500x900 with 20 unit walls
    pub energy_correction: Option<bool>, // allow drift correction when fully elastic, default true
    pub report_every: Option<usize>, // ticks between energy reports, default 100
    pub trails: Option<bool>, // record body trails, default false
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position
    #[serde(default)]
    pub v: [f64; 2], // Initial velocity
    pub q: f64,      // Signed charge
    pub m: f64,      // Mass, must be positive unless static
    pub radius: Option<f64>, // Collision radius, derived from charge and mass when missing
    pub e: Option<f64>, // Restitution in [0, 2], default 1
    #[serde(default, rename = "static")]
    pub fixed: bool, // Immovable force source and obstacle
    #[serde(default)]
    pub environmental: bool, // Kept when the system is reset
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // List of bodies that define the initial state of the system
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
