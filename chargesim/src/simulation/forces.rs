//! Force / acceleration contributors for the point-charge engine
//!
//! Defines the acceleration trait, the set that sums several terms, and the
//! direct O(n^2) Coulomb interaction

use crate::simulation::params::Softening;
use crate::simulation::states::{NVec2, Snapshot};

/// Collection of acceleration terms (Coulomb, external fields, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for every body in `state`
    /// - `out[i]` is zeroed, then receives the sum of all terms
    /// - static bodies keep a zero acceleration
    pub fn accumulate_accels(&self, t: f64, state: &Snapshot, out: &mut [NVec2]) {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, state, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on a [`Snapshot`]
/// Implementations add their contribution into `out[i]` for each non-static body
pub trait Acceleration {
    fn acceleration(&self, t: f64, state: &Snapshot, out: &mut [NVec2]);
}

/// Pairwise electrostatic acceleration.
///
/// For each non-static body i:
///   a_i = (1 / m_i) * sum_j k q_i q_j (x_i - x_j) / d^3
/// where d^2 = `softening.soft_r2(|x_i - x_j|^2)`. Static bodies are
/// skipped as receivers but still act as sources.
pub struct Coulomb {
    pub k: f64, // Coulomb constant
    pub softening: Softening,
}

impl Acceleration for Coulomb {
    fn acceleration(&self, _t: f64, state: &Snapshot, out: &mut [NVec2]) {
        let n = state.len();
        if n < 2 {
            return;
        }

        for i in 0..n {
            if state.fixed[i] {
                continue;
            }
            let xi = state.x[i];
            let kqi = self.k * state.q[i];

            let mut force = NVec2::zeros();
            for j in 0..n {
                if i == j {
                    continue;
                }
                // points from j to i, so like charges push i away
                let r = xi - state.x[j];
                let d2 = self.softening.soft_r2(r.norm_squared());
                let inv_d = d2.sqrt().recip();
                force += kqi * state.q[j] * inv_d * inv_d * inv_d * r;
            }

            out[i] += force / state.m[i];
        }
    }
}
