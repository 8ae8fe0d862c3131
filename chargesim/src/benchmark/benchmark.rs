use std::time::Instant;

use crate::simulation::engine::{Engine, IntegrationScheme};
use crate::simulation::forces::{Acceleration, Coulomb};
use crate::simulation::params::{Parameters, RunParams};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, NVec2, System};

/// Helper to build a manual System of size `n`, spread over the default arena
/// with alternating charges
fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            750.0 + (i_f * 0.37).sin() * 600.0,
            450.0 + (i_f * 0.13).cos() * 350.0,
        );
        let q = if i % 2 == 0 { 1.0e-6 } else { -1.0e-6 };

        bodies.push(Body::new(x, q, 1.0).with_radius(2.0));
    }

    System { bodies, t: 0.0 }
}

/// Time one direct Coulomb evaluation for growing n
pub fn bench_coulomb() {
    let ns = [25, 50, 100, 200, 400, 800];
    let parameters = Parameters::default();

    for n in ns {
        let state = make_system(n).snapshot();
        let mut out = vec![NVec2::zeros(); n];

        let coulomb = Coulomb {
            k: parameters.k,
            softening: parameters.softening,
        };

        // Warm up
        coulomb.acceleration(0.0, &state, &mut out);

        let t0 = Instant::now();
        coulomb.acceleration(0.0, &state, &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, coulomb = {:8.6} s", dt_direct);
    }
}

/// Full tick cost (integrate + collisions + energy) per scheme.
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick() {
    println!("N,verlet_ms,rk4_ms");

    for n in (25..=400).step_by(25) {
        // Small n: average over a few ticks to smooth noise
        let steps = if n <= 100 { 20 } else { 5 };

        let mut row = Vec::with_capacity(2);
        for scheme in [IntegrationScheme::VelocityVerlet, IntegrationScheme::Rk4] {
            let engine = Engine { scheme, ..Engine::default() };
            let mut scenario = Scenario::new(engine, Parameters::default(), RunParams::default(), make_system(n));
            let tick = scenario.next_tick();

            // Warm-up one tick
            scenario.tick(tick);

            let t0 = Instant::now();
            for _ in 0..steps {
                scenario.tick(tick);
            }
            row.push(t0.elapsed().as_secs_f64() * 1000.0 / steps as f64);
        }

        println!("{},{:.6},{:.6}", n, row[0], row[1]);
    }
}
