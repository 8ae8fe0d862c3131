//! Precondition violations raised by the engine
//!
//! Degenerate geometry (coincident bodies, zero separation) is absorbed
//! locally and never shows up here. Everything in this enum is a caller
//! mistake that would otherwise turn into `NaN`/`Inf` inside a tick.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Non-static bodies divide by their mass every tick
    #[error("body {index}: mass must be finite, and positive unless static, got {mass}")]
    InvalidMass { index: usize, mass: f64 },

    #[error("body {index}: collision radius must be non-negative and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("restitution must be in [0, 2], got {value}")]
    InvalidRestitution { value: f64 },

    #[error("time step must be positive and finite, got {dt}")]
    InvalidTimeStep { dt: f64 },

    #[error("body {index}: position and velocity must be finite")]
    NonFiniteState { index: usize },

    /// Without a positive floor coincident bodies divide by zero
    #[error("separation floor must be finite with min_r2 + eps^2 > 0, got min_r2 = {min_r2}, eps^2 = {eps2}")]
    InvalidSoftening { min_r2: f64, eps2: f64 },

    #[error("{name} must be {expected}, got {value}")]
    InvalidParameter { name: &'static str, expected: &'static str, value: f64 },

    #[error("arena interior is empty (width {width}, height {height}, wall thickness {wall_thickness})")]
    InvalidArena { width: f64, height: f64, wall_thickness: f64 },

    #[error("cannot start a simulation without bodies")]
    NoBodies,

    #[error("bodies {a} and {b} are touching")]
    BodiesTouching { a: usize, b: usize },

    #[error("body {index} is touching the wall")]
    TouchingWall { index: usize },
}
