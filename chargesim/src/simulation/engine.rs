//! High-level runtime engine settings
//!
//! Selects the integration scheme, how collisions are relaxed and how the
//! energy monitor decides when a drift correction is worth applying.

use crate::configuration::config::IntegratorConfig;

/// Time integration strategy, fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationScheme {
    /// Symplectic, two force evaluations per tick
    #[default]
    VelocityVerlet,
    /// Classical fourth order Runge-Kutta, four force evaluations per tick
    Rk4,
}

impl From<IntegratorConfig> for IntegrationScheme {
    fn from(cfg: IntegratorConfig) -> Self {
        match cfg {
            IntegratorConfig::Verlet => IntegrationScheme::VelocityVerlet,
            IntegratorConfig::Rk4 => IntegrationScheme::Rk4,
        }
    }
}

/// Thresholds for the fully-elastic drift correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyConfig {
    pub tolerance: f64, // |E - E0| below this is left alone
    pub min_kinetic: f64, // no rescaling when KE is at or below this
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            min_kinetic: 1e-10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub scheme: IntegrationScheme, // verlet or rk4
    pub relaxation_passes: usize, // body-body collision sweeps per tick
    pub correction_damping: f64, // share of the overlap removed per contact, 0.8 avoids overshoot
    pub energy: EnergyConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            scheme: IntegrationScheme::VelocityVerlet,
            relaxation_passes: 1,
            correction_damping: 1.0,
            energy: EnergyConfig::default(),
        }
    }
}
