//! Simulation phases for one physics step.
//!
//! A step runs, in order:
//! 1. [`integration_phase`] — gravity, then explicit position update.
//! 2. [`boundary_phase`] — clamp-and-reflect against floor, ceiling and walls.
//! 3. [`collision_phase`] — pairwise AABB separation with a velocity
//!    exchange heuristic.
//!
//! Dragged bodies are skipped by every write in every phase. They still
//! take part in collisions as immovable obstacles at their current position.

use crate::{body::Body, config::Config, types::Bounds};
use tracing::trace;

/// Applies gravity and advances positions of all non-dragged bodies.
///
/// Velocity is updated before position (semi-implicit Euler):
/// `vy += g * dt`, then `pos += vel * dt`.
///
/// ### Parameters
/// - `bodies` - Body list in id order.
/// - `cfg` - Supplies `gravity`.
/// - `dt` - Step length in seconds, already clamped by the caller.
pub fn integration_phase(bodies: &mut [Body], cfg: &Config, dt: f32) {
    for b in bodies.iter_mut().filter(|b| !b.is_dragged) {
        b.vel.y += cfg.gravity * dt;
        b.pos += b.vel * dt;
    }
}

/// Keeps non-dragged bodies inside the container.
///
/// For each body, in order:
///
/// 1. **Floor** at `bounds.height - floor_padding`: clamp the bottom, flip
///    a downward `vy` scaled by `restitution`, and damp `vx` by `friction`.
/// 2. **Ceiling** at `0`: clamp the top and flip an upward `vy`.
/// 3. **Left/right walls**: clamp and flip `vx` if it points into the wall.
///
/// ### Parameters
/// - `bodies` - Body list in id order.
/// - `cfg` - Supplies `floor_padding`, `restitution` and `friction`.
/// - `bounds` - Container size queried for this step.
pub fn boundary_phase(bodies: &mut [Body], cfg: &Config, bounds: Bounds) {
    let floor = bounds.height - cfg.floor_padding;
    let r = cfg.restitution;

    for b in bodies.iter_mut().filter(|b| !b.is_dragged) {
        if b.bottom() > floor {
            b.pos.y = floor - b.size.y;
            if b.vel.y > 0.0 {
                b.vel.y = -b.vel.y * r;
            }
            b.vel.x *= cfg.friction;
        }

        if b.pos.y < 0.0 {
            b.pos.y = 0.0;
            if b.vel.y < 0.0 {
                b.vel.y = -b.vel.y * r;
            }
        }

        if b.pos.x < 0.0 {
            b.pos.x = 0.0;
            if b.vel.x < 0.0 {
                b.vel.x = -b.vel.x * r;
            }
        }
        if b.right() > bounds.width {
            b.pos.x = bounds.width - b.size.x;
            if b.vel.x > 0.0 {
                b.vel.x = -b.vel.x * r;
            }
        }
    }
}

/// Separation axis picked for an overlapping pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Picks the axis of least penetration.
///
/// X is chosen only when its penetration is strictly smaller; ties go to Y.
#[inline]
pub fn separation_axis(px: f32, py: f32) -> Axis {
    if px < py { Axis::X } else { Axis::Y }
}

/// Resolves every overlapping pair once, scanning `i < j` in id order.
///
/// For each pair with at least one non-dragged body whose boxes overlap:
///
/// 1. Compute penetration on both axes and pick the separation axis with
///    [`separation_axis`].
/// 2. Push the bodies apart along that axis. Two free bodies move half the
///    penetration each; a free body next to a dragged one moves the full
///    penetration.
/// 3. Replace each free body's velocity component on that axis with
///    `(other - self) * restitution + other * collision_carry`, using the
///    velocities from before the exchange.
/// 4. Damp each free body's `vx` by `friction`, whichever axis separated.
///
/// ### Parameters
/// - `bodies` - Body list in id order.
/// - `cfg` - Supplies `restitution`, `collision_carry` and `friction`.
///
/// ### Returns
/// The number of pairs that were resolved.
pub fn collision_phase(bodies: &mut [Body], cfg: &Config) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if a.is_dragged && b.is_dragged {
                continue;
            }
            if !a.overlaps(b) {
                continue;
            }
            resolve_pair(a, b, cfg);
            resolved += 1;
        }
    }
    if resolved > 0 {
        trace!(resolved, "collision pairs resolved");
    }
    resolved
}

fn resolve_pair(a: &mut Body, b: &mut Body, cfg: &Config) {
    let pen = a.penetration(b);
    let axis = separation_axis(pen.x, pen.y);
    let (depth, a_first) = match axis {
        Axis::X => (pen.x, a.pos.x < b.pos.x),
        Axis::Y => (pen.y, a.pos.y < b.pos.y),
    };

    // Positive `dir` pushes `a` toward +axis and `b` toward -axis.
    let dir = if a_first { -1.0 } else { 1.0 };
    let (a_share, b_share) = match (a.is_dragged, b.is_dragged) {
        (false, false) => (depth / 2.0, depth / 2.0),
        (false, true) => (depth, 0.0),
        (true, false) => (0.0, depth),
        (true, true) => (0.0, 0.0),
    };

    let (av, bv) = match axis {
        Axis::X => {
            a.pos.x += dir * a_share;
            b.pos.x -= dir * b_share;
            (a.vel.x, b.vel.x)
        }
        Axis::Y => {
            a.pos.y += dir * a_share;
            b.pos.y -= dir * b_share;
            (a.vel.y, b.vel.y)
        }
    };

    let respond =
        |own: f32, other: f32| (other - own) * cfg.restitution + other * cfg.collision_carry;
    for (body, own, other) in [(a, av, bv), (b, bv, av)] {
        if body.is_dragged {
            continue;
        }
        match axis {
            Axis::X => body.vel.x = respond(own, other),
            Axis::Y => body.vel.y = respond(own, other),
        }
        body.vel.x *= cfg.friction;
    }
}
