//! # Pose Interpolation
//!
//! Blends a bracketing snapshot pair into one renderable pose.
//!
//! Position uses a cubic Hermite with the snapshots' velocities as
//! tangents, scaled by the bracket duration - motion curves through a
//! corner instead of cutting it. Rotation always takes the shortest arc.
//!
//! ## Zero-velocity degeneracy
//!
//! When both velocities are exactly zero the blend is a **plain lerp**,
//! bit-for-bit. This is an explicit branch, not a property of the basis
//! functions: a Hermite with zero tangents is a smoothstep, and callers
//! that rely on pure linear motion (stationary-velocity servers) must see
//! results identical to a direct lerp.

use mirage_core::{angle, Position};

use crate::snapshot::Snapshot;

/// Blends between `prev` and `next` with factor `t` in `[0, 1]`.
///
/// Returns the interpolated position and rotation (radians, wrapped to
/// `[0, 2*PI)`).
#[must_use]
pub fn blend(prev: &Snapshot, next: &Snapshot, t: f32) -> (Position, f32) {
    let position = if prev.velocity.is_zero() && next.velocity.is_zero() {
        prev.position.lerp(next.position, t)
    } else {
        let duration_secs = ((next.server_time_ms - prev.server_time_ms) / 1_000.0) as f32;
        hermite(prev, next, t, duration_secs)
    };
    let rotation = angle::lerp_shortest(prev.rotation, next.rotation, t);
    (position, rotation)
}

/// Cubic Hermite through the endpoint positions with velocity tangents.
///
/// Tangents are velocities (units/sec) scaled by the bracket duration so
/// the curve's parametric speed matches the reported motion.
fn hermite(prev: &Snapshot, next: &Snapshot, t: f32, duration_secs: f32) -> Position {
    let tangent_from_x = prev.velocity.x * duration_secs;
    let tangent_from_y = prev.velocity.y * duration_secs;
    let tangent_to_x = next.velocity.x * duration_secs;
    let tangent_to_y = next.velocity.y * duration_secs;

    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    Position::new(
        prev.position.x * h00 + tangent_from_x * h10 + next.position.x * h01 + tangent_to_x * h11,
        prev.position.y * h00 + tangent_from_y * h10 + next.position.y * h01 + tangent_to_y * h11,
    )
}
