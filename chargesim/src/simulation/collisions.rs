//! Contact resolution: body against body, body against the arena walls
//!
//! Both passes do nothing when nothing overlaps. Body pairs are visited once
//! per relaxation pass in index order, so a cluster of simultaneous contacts
//! is only approximately separated after a single pass.

use log::trace;

use super::params::Arena;
use super::states::{Body, NVec2, System};

/// Resolve one overlapping pair in place.
///
/// 1. Push the bodies apart along the contact normal, split by inverse mass
///    and scaled by `correction_damping` (1.0 removes the whole overlap).
/// 2. If they are still approaching, exchange an impulse
///    j = -(1 + e) (v_rel . n) / (1/m_a + 1/m_b) with e = min(e_a, e_b).
///
/// A static body has zero inverse mass, so the other side takes the full
/// correction and the full impulse.
pub fn resolve_pair(a: &mut Body, b: &mut Body, correction_damping: f64) {
    if a.fixed && b.fixed {
        return;
    }

    let r = a.x - b.x;
    let dist2 = r.norm_squared();
    let min_dist = a.radius + b.radius;
    if dist2 >= min_dist * min_dist {
        return;
    }

    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        return;
    }

    // coincident centres get an arbitrary but fixed normal
    let (normal, overlap) = if dist2 == 0.0 {
        (NVec2::new(1.0, 0.0), min_dist)
    } else {
        let dist = dist2.sqrt();
        (r / dist, min_dist - dist)
    };

    let push = overlap * correction_damping / inv_sum;
    a.x += normal * (push * inv_a);
    b.x -= normal * (push * inv_b);

    let v_along = (a.v - b.v).dot(&normal);
    if v_along > 0.0 { // already separating
        return;
    }

    let e = a.e.min(b.e);
    let j = -(1.0 + e) * v_along / inv_sum;
    let impulse = j * normal;
    a.v += impulse * inv_a;
    b.v -= impulse * inv_b;
}

/// Sweep every unordered pair `passes` times (at least once)
pub fn resolve_body_collisions(sys: &mut System, passes: usize, correction_damping: f64) {
    let n = sys.bodies.len();
    for _ in 0..passes.max(1) {
        for i in 0..n {
            // split so body i and body j can be borrowed mutably together
            let (head, tail) = sys.bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                resolve_pair(a, b, correction_damping);
            }
        }
    }
}

/// Keep every non-static body inside the arena interior.
///
/// Each axis is handled on its own: a crossing clamps the position to the
/// wall offset by the body radius and reflects that velocity component,
/// scaled by `wall_restitution`.
pub fn resolve_walls(sys: &mut System, arena: &Arena, wall_restitution: f64) {
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        if b.fixed {
            continue;
        }

        let left = arena.left + b.radius;
        let right = arena.right - b.radius;
        if b.x.x < left {
            b.x.x = left;
            b.v.x *= -wall_restitution;
            trace!("body {i} hit the left wall");
        } else if b.x.x > right {
            b.x.x = right;
            b.v.x *= -wall_restitution;
            trace!("body {i} hit the right wall");
        }

        let top = arena.top + b.radius;
        let bottom = arena.bottom - b.radius;
        if b.x.y < top {
            b.x.y = top;
            b.v.y *= -wall_restitution;
            trace!("body {i} hit the top wall");
        } else if b.x.y > bottom {
            b.x.y = bottom;
            b.v.y *= -wall_restitution;
            trace!("body {i} hit the bottom wall");
        }
    }
}
