//! Energy bookkeeping and the fully-elastic drift correction
//!
//! `compute_energy` is a pure diagnostic. `EnergyMonitor` remembers the
//! reference energy E0 captured at start and, when the caller says the run
//! is fully elastic, rescales velocities back towards it.

use log::{debug, warn};

use super::engine::EnergyConfig;
use super::params::Softening;
use super::states::System;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Energy {
    pub kinetic: f64,
    pub potential: f64,
}

impl Energy {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Kinetic energy of every body (static ones included) plus the Coulomb
/// potential of every unordered pair, using the same separation floor as
/// the force pass.
pub fn compute_energy(sys: &System, k: f64, softening: &Softening) -> Energy {
    let bodies = &sys.bodies;
    let kinetic: f64 = bodies.iter().map(|b| b.kinetic_energy()).sum();

    let mut potential = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            let d2 = softening.soft_r2((bi.x - bj.x).norm_squared());
            potential += k * bi.q * bj.q / d2.sqrt();
        }
    }

    Energy { kinetic, potential }
}

#[derive(Debug, Clone, Default)]
pub struct EnergyMonitor {
    pub config: EnergyConfig,
    reference: Option<f64>, // E0, captured when the run starts
}

impl EnergyMonitor {
    pub fn new(config: EnergyConfig) -> Self {
        Self {
            config,
            reference: None,
        }
    }

    pub fn capture(&mut self, energy: Energy) {
        debug!("reference energy E0 = {:.6e}", energy.total());
        self.reference = Some(energy.total());
    }

    pub fn reference(&self) -> Option<f64> {
        self.reference
    }

    pub fn clear(&mut self) {
        self.reference = None;
    }

    /// Velocity scale that would bring `energy` back to E0, if one is due.
    ///
    /// `None` when no reference was captured, either energy is not finite,
    /// the drift is within tolerance, or there is too little kinetic energy
    /// to rescale.
    pub fn correction_factor(&self, energy: Energy) -> Option<f64> {
        let e0 = self.reference?;
        if !(e0.is_finite() && energy.total().is_finite()) {
            warn!("energy is not finite (E = {}, E0 = {e0}), correction skipped", energy.total());
            return None;
        }
        if (energy.total() - e0).abs() <= self.config.tolerance {
            return None;
        }
        if energy.kinetic <= self.config.min_kinetic {
            warn!("energy drift {:.3e} left uncorrected, kinetic energy is negligible", energy.total() - e0);
            return None;
        }
        Some(((e0 - energy.potential) / energy.kinetic).max(0.0).sqrt())
    }

    /// Rescale every non-static velocity so KE + PE returns to E0.
    ///
    /// `elastic` is the caller's gate (see `System::all_elastic`); with any
    /// inelastic contact the energy loss is physical and nothing happens.
    /// Returns the applied factor.
    pub fn correct(&self, sys: &mut System, energy: Energy, elastic: bool) -> Option<f64> {
        if !elastic {
            return None;
        }
        let scale = self.correction_factor(energy)?;
        for b in sys.bodies.iter_mut().filter(|b| !b.fixed) {
            b.v *= scale;
        }
        debug!("energy drift {:.3e}, velocities scaled by {scale:.9}", energy.total() - self.reference.unwrap_or_default());
        Some(scale)
    }
}
