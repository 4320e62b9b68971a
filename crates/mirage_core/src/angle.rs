//! # Angle Math
//!
//! Rotation helpers for interpolating headings without ever taking the
//! long way around the circle.
//!
//! All angles are radians. Interpolation results are wrapped to
//! `[0, 2*PI)` so downstream transforms see a canonical range.

use std::f32::consts::{PI, TAU};

/// Wraps an angle difference into `[-PI, PI)`.
#[inline]
#[must_use]
pub fn wrap_signed(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Wraps an angle into `[0, 2*PI)`.
#[inline]
#[must_use]
pub fn wrap_tau(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Interpolates between two headings along the shortest arc.
///
/// The blend crosses the 0/2*PI seam when that is the shorter way, so
/// a turn from 10 degrees to 350 degrees sweeps through 0, not 180.
#[inline]
#[must_use]
pub fn lerp_shortest(from: f32, to: f32, t: f32) -> f32 {
    let diff = wrap_signed(to - from);
    wrap_tau(from + diff * t)
}
