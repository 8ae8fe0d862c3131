//! Time integrators for the point-charge system
//!
//! Velocity-Verlet (default) and classical RK4, both driven by an `AccelSet`
//! and a caller-supplied `dt`. Intermediate state is staged in a `Snapshot`
//! and only non-static bodies are written back.

use super::engine::IntegrationScheme;
use super::forces::AccelSet;
use super::states::{NVec2, Snapshot, System};

/// Advance `sys` by one step of `dt` with the selected scheme
pub fn advance(scheme: IntegrationScheme, sys: &mut System, forces: &AccelSet, dt: f64) {
    match scheme {
        IntegrationScheme::VelocityVerlet => verlet_integrator(sys, forces, dt),
        IntegrationScheme::Rk4 => rk4_integrator(sys, forces, dt),
    }
}

/// Advance the system by one step using velocity-Verlet
/// Two force evaluations: at x_n and at x_n+1. Coulomb forces do not depend
/// on velocity, so the second evaluation can reuse v_n.
pub fn verlet_integrator(sys: &mut System, forces: &AccelSet, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let half_dt = 0.5 * dt;
    let mut state = sys.snapshot();

    // a_n at the current positions
    let mut a_old = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &state, &mut a_old);

    // x_n+1 = x_n + dt v_n + 1/2 dt^2 a_n, static bodies stay put
    for i in 0..n {
        if !state.fixed[i] {
            state.x[i] += dt * state.v[i] + half_dt * dt * a_old[i];
        }
    }

    // a_n+1 at the new positions
    let mut a_new = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t + dt, &state, &mut a_new);

    // v_n+1 = v_n + 1/2 dt (a_n + a_n+1)
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        if b.fixed {
            continue;
        }
        b.x = state.x[i];
        b.v += half_dt * (a_old[i] + a_new[i]);
    }

    sys.t += dt;
}

/// Advance the system by one step using classical RK4
/// Higher local accuracy than Verlet but not symplectic: energy drifts
/// monotonically over long runs.
pub fn rk4_integrator(sys: &mut System, forces: &AccelSet, dt: f64) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let half_dt = 0.5 * dt;
    let t = sys.t;
    let base = sys.snapshot();
    let mut stage = base.clone();

    // slope 1 at t
    let mut a1 = vec![NVec2::zeros(); n];
    forces.accumulate_accels(t, &base, &mut a1);
    let v1 = base.v.clone();

    // slope 2 at t + dt/2 using slope 1
    stage_from(&base, &v1, &a1, half_dt, &mut stage);
    let v2 = stage.v.clone();
    let mut a2 = vec![NVec2::zeros(); n];
    forces.accumulate_accels(t + half_dt, &stage, &mut a2);

    // slope 3 at t + dt/2 using slope 2
    stage_from(&base, &v2, &a2, half_dt, &mut stage);
    let v3 = stage.v.clone();
    let mut a3 = vec![NVec2::zeros(); n];
    forces.accumulate_accels(t + half_dt, &stage, &mut a3);

    // slope 4 at t + dt using slope 3
    stage_from(&base, &v3, &a3, dt, &mut stage);
    let v4 = stage.v.clone();
    let mut a4 = vec![NVec2::zeros(); n];
    forces.accumulate_accels(t + dt, &stage, &mut a4);

    let sixth = dt / 6.0;
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        if b.fixed {
            continue;
        }
        b.x = base.x[i] + sixth * (v1[i] + 2.0 * v2[i] + 2.0 * v3[i] + v4[i]);
        b.v = base.v[i] + sixth * (a1[i] + 2.0 * a2[i] + 2.0 * a3[i] + a4[i]);
    }

    sys.t += dt;
}

/// stage = base + h * (dx, dv), leaving static bodies at their base state
fn stage_from(base: &Snapshot, dx: &[NVec2], dv: &[NVec2], h: f64, stage: &mut Snapshot) {
    for i in 0..base.len() {
        if base.fixed[i] {
            continue;
        }
        stage.x[i] = base.x[i] + h * dx[i];
        stage.v[i] = base.v[i] + h * dv[i];
    }
}
