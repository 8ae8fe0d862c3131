//! Core state types for the point-charge simulation.
//!
//! - `Body`     one point charge with its collision and reset state
//! - `Trail`    bounded position history kept for display layers
//! - `System`   the ordered body collection plus the simulation time `t`
//! - `Snapshot` parallel arrays (x, v, q, m, fixed) handed to force terms
//!
//! The engine mutates a `System` in place; it owns nothing between ticks.

use std::collections::VecDeque;

use nalgebra::Vector2;

use crate::error::SimError;
use crate::simulation::params::Arena;

pub type NVec2 = Vector2<f64>;

/// Number of positions a trail keeps
pub const TRAIL_LENGTH: usize = 40;
/// A trail records one position every `TRAIL_SKIP` calls
pub const TRAIL_SKIP: usize = 2;

/// Fading position history behind a body.
///
/// Owned by the body so `reset` can clear it, but only read by whoever draws it.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<NVec2>,
    counter: usize,
}

impl Trail {
    /// Record `x` every `TRAIL_SKIP` calls. Disabling drops the history.
    pub fn record(&mut self, enabled: bool, x: NVec2) {
        if !enabled {
            self.clear();
            return;
        }
        self.counter += 1;
        if self.counter < TRAIL_SKIP {
            return;
        }
        self.counter = 0;
        if self.points.len() == TRAIL_LENGTH {
            self.points.pop_front();
        }
        self.points.push_back(x);
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.counter = 0;
    }

    /// Oldest first
    pub fn points(&self) -> impl Iterator<Item = &NVec2> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub x0: NVec2, // position restored by reset
    pub v0: NVec2, // velocity restored by reset
    pub q: f64, // signed charge
    pub m: f64, // mass
    pub radius: f64, // collision radius, opaque to the engine
    pub e: f64, // restitution, pairs use the smaller one
    pub fixed: bool, // static: force source and obstacle only
    pub environmental: bool, // survives a system reset
    pub trail: Trail,
}

impl Body {
    /// Movable body at rest at `x`, radius 0 and perfectly elastic
    pub fn new(x: NVec2, q: f64, m: f64) -> Self {
        Self {
            x,
            v: NVec2::zeros(),
            x0: x,
            v0: NVec2::zeros(),
            q,
            m,
            radius: 0.0,
            e: 1.0,
            fixed: false,
            environmental: false,
            trail: Trail::default(),
        }
    }

    /// Set both the current and the reset velocity
    pub fn with_velocity(mut self, v: NVec2) -> Self {
        self.v = v;
        self.v0 = v;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_restitution(mut self, e: f64) -> Self {
        self.e = e;
        self
    }

    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn environmental(mut self, environmental: bool) -> Self {
        self.environmental = environmental;
        self
    }

    /// `0` for static bodies so they behave as infinite mass in impulses
    pub fn inv_mass(&self) -> f64 {
        if self.fixed {
            0.0
        } else {
            1.0 / self.m
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }

    /// Back to the initial position and velocity, trail cleared
    pub fn reset(&mut self) {
        self.x = self.x0;
        self.v = self.v0;
        self.trail.clear();
    }

    /// Check the physical preconditions for body number `index`
    pub fn validate(&self, index: usize) -> Result<(), SimError> {
        // static bodies never divide by their mass but still enter the kinetic sum
        let mass_ok = if self.fixed { self.m >= 0.0 } else { self.m > 0.0 };
        if !(mass_ok && self.m.is_finite()) {
            return Err(SimError::InvalidMass { index, mass: self.m });
        }
        if !(self.radius >= 0.0 && self.radius.is_finite()) {
            return Err(SimError::InvalidRadius { index, radius: self.radius });
        }
        if !(0.0..=2.0).contains(&self.e) {
            return Err(SimError::InvalidRestitution { value: self.e });
        }
        let finite = self.x.iter().chain(self.v.iter()).all(|c| c.is_finite()) && self.q.is_finite();
        if !finite {
            return Err(SimError::NonFiniteState { index });
        }
        Ok(())
    }
}

/// Parallel arrays of the state force terms need.
///
/// Integrators stage intermediate positions here instead of touching the bodies.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub x: Vec<NVec2>, // positions
    pub v: Vec<NVec2>, // velocities
    pub q: Vec<f64>, // charges
    pub m: Vec<f64>, // masses
    pub fixed: Vec<bool>, // static flags
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // ordered body collection
    pub t: f64, // time
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a system, rejecting the first body that violates a precondition
    pub fn from_bodies(bodies: Vec<Body>) -> Result<Self, SimError> {
        for (i, b) in bodies.iter().enumerate() {
            b.validate(i)?;
        }
        Ok(Self { bodies, t: 0.0 })
    }

    /// Append a body, returning its index
    pub fn push(&mut self, body: Body) -> Result<usize, SimError> {
        let index = self.bodies.len();
        body.validate(index)?;
        self.bodies.push(body);
        Ok(index)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            x: self.bodies.iter().map(|b| b.x).collect(),
            v: self.bodies.iter().map(|b| b.v).collect(),
            q: self.bodies.iter().map(|b| b.q).collect(),
            m: self.bodies.iter().map(|b| b.m).collect(),
            fixed: self.bodies.iter().map(|b| b.fixed).collect(),
        }
    }

    /// Drop non-environmental bodies, reset the rest and rewind time
    pub fn reset(&mut self) {
        self.bodies.retain(|b| b.environmental);
        for b in self.bodies.iter_mut() {
            b.reset();
        }
        self.t = 0.0;
    }

    /// True when every body and the walls are perfectly elastic.
    ///
    /// Callers use this to decide whether energy correction may run.
    pub fn all_elastic(&self, wall_restitution: f64) -> bool {
        wall_restitution == 1.0 && self.bodies.iter().all(|b| b.e == 1.0)
    }

    pub fn momentum(&self) -> NVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// First contact found, either between two bodies or with the walls
    pub fn touching(&self, arena: &Arena) -> Option<SimError> {
        for (i, b) in self.bodies.iter().enumerate() {
            if arena.touches(b.x, b.radius) {
                return Some(SimError::TouchingWall { index: i });
            }
            for (j, other) in self.bodies.iter().enumerate().skip(i + 1) {
                if (b.x - other.x).norm() < b.radius + other.radius {
                    return Some(SimError::BodiesTouching { a: i, b: j });
                }
            }
        }
        None
    }
}

/// Collision radii the way the display layer sizes bodies.
///
/// Charge magnitude sets a core of 5 to 20 units and mass a border of 1 to 5,
/// each normalised against the rest of the set (midpoint when all are equal).
pub fn hitbox_radii(charges: &[f64], masses: &[f64]) -> Vec<f64> {
    fn normalise(values: &[f64], value: f64) -> f64 {
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let range = max - min;
        if range == 0.0 {
            0.5
        } else {
            (value - min) / range
        }
    }

    let abs_q: Vec<f64> = charges.iter().map(|q| q.abs()).collect();
    abs_q
        .iter()
        .zip(masses)
        .map(|(&q, &m)| {
            let core = 5.0 + normalise(&abs_q, q) * 15.0;
            let border = 1.0 + normalise(masses, m) * 4.0;
            core + border
        })
        .collect()
}
