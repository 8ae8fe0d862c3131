//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the scalars a tick needs besides `dt`:
//! - Coulomb constant `k`,
//! - the separation floor shared by forces and potential energy (`Softening`),
//! - the walled arena bodies bounce around in (`Arena`)

use crate::error::SimError;
use crate::simulation::states::NVec2;

pub const K_COULOMB: f64 = 8.99e9;
pub const DEFAULT_MIN_R2: f64 = 400.0;

/// Guard against inverse-square blow-up at small separations.
///
/// Every pairwise distance goes through `soft_r2`, in the force pass and in
/// the potential energy pass alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Softening {
    pub min_r2: f64, // hard floor on squared separation
    pub eps2: f64, // softening length squared, added after the floor
}

impl Softening {
    /// Floor from a squared minimum separation and a softening length
    pub fn new(min_r2: f64, eps: f64) -> Result<Self, SimError> {
        let eps2 = eps * eps;
        let valid = min_r2.is_finite() && eps2.is_finite() && min_r2 >= 0.0 && min_r2 + eps2 > 0.0;
        if !valid {
            return Err(SimError::InvalidSoftening { min_r2, eps2 });
        }
        Ok(Self { min_r2, eps2 })
    }

    pub fn soft_r2(&self, r2: f64) -> f64 {
        r2.max(self.min_r2) + self.eps2
    }
}

impl Default for Softening {
    fn default() -> Self {
        Self {
            min_r2: DEFAULT_MIN_R2,
            eps2: 0.0,
        }
    }
}

/// Walled rectangle. Bodies live in the interior, i.e. the outer
/// rectangle inset by the wall thickness on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Arena {
    /// Outer rectangle anchored at the origin, y growing downwards
    pub fn new(width: f64, height: f64, wall_thickness: f64) -> Result<Self, SimError> {
        let arena = Self {
            left: wall_thickness,
            top: wall_thickness,
            right: width - wall_thickness,
            bottom: height - wall_thickness,
        };
        let valid = [width, height, wall_thickness].iter().all(|v| v.is_finite())
            && wall_thickness >= 0.0
            && arena.right > arena.left
            && arena.bottom > arena.top;
        if !valid {
            return Err(SimError::InvalidArena { width, height, wall_thickness });
        }
        Ok(arena)
    }

    /// Whether a disc at `x` reaches or crosses any wall
    pub fn touches(&self, x: NVec2, radius: f64) -> bool {
        x.x - radius <= self.left
            || x.x + radius >= self.right
            || x.y - radius <= self.top
            || x.y + radius >= self.bottom
    }
}

impl Default for Arena {
    /// 1500x900 window with 20 unit walls
    fn default() -> Self {
        Self {
            left: 20.0,
            top: 20.0,
            right: 1480.0,
            bottom: 880.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Parameters {
    pub k: f64, // Coulomb constant
    pub softening: Softening, // separation floor
    pub arena: Arena, // wall geometry
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            k: K_COULOMB,
            softening: Softening::default(),
            arena: Arena::default(),
        }
    }
}

/// Per-run settings that drive the tick loop from the outside
#[derive(Debug, Clone, Copy)]
pub struct RunParams {
    pub dt: f64, // time step handed to every tick
    pub steps: usize, // ticks to run
    pub wall_restitution: f64, // bounce factor of the walls
    pub energy_correction: bool, // allow drift correction in the fully elastic regime
    pub report_every: usize, // ticks between energy reports
    pub trails: bool, // record body trails for a display layer
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            steps: 1000,
            wall_restitution: 0.9,
            energy_correction: true,
            report_every: 100,
            trails: false,
        }
    }
}
