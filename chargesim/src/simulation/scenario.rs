//! Build fully-initialized simulation scenarios and drive their ticks
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`) and run settings (`RunParams`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//! - the energy monitor holding E0 once the run is started
//!
//! One tick runs, in order: integrate, body collisions, wall collisions,
//! trail recording, optional energy correction, energy readback.

use log::{debug, info, trace};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::SimError;
use crate::simulation::collisions::{resolve_body_collisions, resolve_walls};
use crate::simulation::energy::{compute_energy, Energy, EnergyMonitor};
use crate::simulation::engine::{EnergyConfig, Engine};
use crate::simulation::forces::{AccelSet, Coulomb};
use crate::simulation::integrator::advance;
use crate::simulation::params::{Arena, Parameters, RunParams, Softening, K_COULOMB, DEFAULT_MIN_R2};
use crate::simulation::states::{hitbox_radii, Body, NVec2, System};

/// Inputs the caller chooses afresh for every tick
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub dt: f64,
    pub wall_restitution: f64,
    /// Gate for the drift correction, normally `System::all_elastic` AND-ed
    /// with whatever the caller allows
    pub energy_correction: bool,
    /// Record trails this tick; `false` drops any history
    pub trails: bool,
}

/// Pass `value` through when `ok` accepts it, otherwise name the bad parameter
fn check(name: &'static str, expected: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<f64, SimError> {
    if ok(value) {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, expected, value })
    }
}

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub run: RunParams,
    pub system: System,
    pub forces: AccelSet,
    pub monitor: EnergyMonitor,
}

impl Scenario {
    /// Bundle an already validated system with its settings
    pub fn new(engine: Engine, parameters: Parameters, run: RunParams, system: System) -> Self {
        let forces = AccelSet::new().with(Coulomb {
            k: parameters.k,
            softening: parameters.softening,
        });
        let monitor = EnergyMonitor::new(engine.energy);

        Self {
            engine,
            parameters,
            run,
            system,
            forces,
            monitor,
        }
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let arena = match &p_cfg.arena {
            Some(a) => Arena::new(a.width, a.height, a.wall_thickness)?,
            None => Arena::default(),
        };
        let parameters = Parameters {
            k: check("k", "finite", p_cfg.k.unwrap_or(K_COULOMB), f64::is_finite)?,
            softening: Softening::new(
                p_cfg.min_r2.unwrap_or(DEFAULT_MIN_R2),
                p_cfg.softening_eps.unwrap_or(0.0),
            )?,
            arena,
        };

        if !(p_cfg.dt > 0.0 && p_cfg.dt.is_finite()) {
            return Err(SimError::InvalidTimeStep { dt: p_cfg.dt });
        }
        let wall_restitution = p_cfg.wall_restitution.unwrap_or(0.9);
        if !(0.0..=1.0).contains(&wall_restitution) {
            return Err(SimError::InvalidRestitution { value: wall_restitution });
        }
        let run = RunParams {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            wall_restitution,
            energy_correction: p_cfg.energy_correction.unwrap_or(true),
            report_every: p_cfg.report_every.unwrap_or(100).max(1),
            trails: p_cfg.trails.unwrap_or(false),
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let defaults = EnergyConfig::default();
        let non_negative = |v: f64| v >= 0.0 && v.is_finite();
        let engine = Engine {
            scheme: e_cfg.integrator.into(),
            relaxation_passes: e_cfg.relaxation_passes.unwrap_or(1).max(1),
            correction_damping: check(
                "correction_damping",
                "in [0, 1]",
                e_cfg.correction_damping.unwrap_or(1.0),
                |v| (0.0..=1.0).contains(&v),
            )?,
            energy: EnergyConfig {
                tolerance: check(
                    "energy_tolerance",
                    "finite and non-negative",
                    e_cfg.energy_tolerance.unwrap_or(defaults.tolerance),
                    non_negative,
                )?,
                min_kinetic: check(
                    "min_kinetic",
                    "finite and non-negative",
                    e_cfg.min_kinetic.unwrap_or(defaults.min_kinetic),
                    non_negative,
                )?,
            },
        };

        // Bodies: map `BodyConfig` -> runtime `Body`, sizing missing radii
        // the way the display layer would
        let charges: Vec<f64> = cfg.bodies.iter().map(|bc| bc.q).collect();
        let masses: Vec<f64> = cfg.bodies.iter().map(|bc| bc.m).collect();
        let derived = hitbox_radii(&charges, &masses);
        let bodies: Vec<Body> = cfg.bodies.iter().zip(derived).map(|(bc, radius): (&BodyConfig, f64)| {
            Body::new(NVec2::new(bc.x[0], bc.x[1]), bc.q, bc.m)
                .with_velocity(NVec2::new(bc.v[0], bc.v[1]))
                .with_radius(bc.radius.unwrap_or(radius))
                .with_restitution(bc.e.unwrap_or(1.0))
                .fixed(bc.fixed)
                .environmental(bc.environmental)
        }).collect();
        let system = System::from_bodies(bodies)?;

        Ok(Self::new(engine, parameters, run, system))
    }

    /// Current kinetic and potential energy
    pub fn energy(&self) -> Energy {
        compute_energy(&self.system, self.parameters.k, &self.parameters.softening)
    }

    /// Check the system can run and capture the reference energy E0.
    ///
    /// Refuses an empty system and any body touching another or a wall.
    pub fn start(&mut self) -> Result<Energy, SimError> {
        if self.system.bodies.is_empty() {
            return Err(SimError::NoBodies);
        }
        if let Some(contact) = self.system.touching(&self.parameters.arena) {
            return Err(contact);
        }
        let energy = self.energy();
        self.monitor.capture(energy);
        info!("simulation started with {} bodies, E0 = {:.6e}", self.system.bodies.len(), energy.total());
        Ok(energy)
    }

    /// Tick inputs from the run settings, gating correction on elasticity
    pub fn next_tick(&self) -> Tick {
        Tick {
            dt: self.run.dt,
            wall_restitution: self.run.wall_restitution,
            energy_correction: self.run.energy_correction
                && self.system.all_elastic(self.run.wall_restitution),
            trails: self.run.trails,
        }
    }

    /// Advance one tick and return the energies after it
    pub fn tick(&mut self, tick: Tick) -> Energy {
        advance(self.engine.scheme, &mut self.system, &self.forces, tick.dt);
        resolve_body_collisions(&mut self.system, self.engine.relaxation_passes, self.engine.correction_damping);
        resolve_walls(&mut self.system, &self.parameters.arena, tick.wall_restitution);
        for b in self.system.bodies.iter_mut() {
            b.trail.record(tick.trails, b.x);
        }

        let mut energy = self.energy();
        if self.monitor.correct(&mut self.system, energy, tick.energy_correction).is_some() {
            energy = self.energy();
        }
        trace!("t = {:.6}, KE = {:.6e}, PE = {:.6e}", self.system.t, energy.kinetic, energy.potential);
        energy
    }

    /// Run `run.steps` ticks, calling `report` every `run.report_every` ticks
    pub fn run<F>(&mut self, mut report: F) -> Energy
    where
        F: FnMut(usize, &System, Energy),
    {
        let mut energy = self.energy();
        for step in 1..=self.run.steps {
            let tick = self.next_tick();
            energy = self.tick(tick);
            if step % self.run.report_every == 0 {
                report(step, &self.system, energy);
            }
        }
        energy
    }

    /// Back to the initial configuration; non-environmental bodies are dropped
    pub fn reset(&mut self) {
        self.system.reset();
        self.monitor.clear();
        debug!("scenario reset, {} environmental bodies kept", self.system.bodies.len());
    }
}
