//! # Extrapolation
//!
//! Projects position past the newest snapshot when the buffer is
//! exhausted (network starvation). This is a designed playback mode, not
//! an error: brief dead-reckoning beats freezing mid-stride.
//!
//! The overrun is capped so a long stall cannot launch an entity across
//! the map; past the cap the entity holds at the projected pose until
//! fresh data arrives. Rotation is never extrapolated - angular velocity
//! is not part of the wire state, and a spinning guess looks worse than a
//! held heading.

use mirage_core::Position;

use crate::snapshot::Snapshot;

/// Projects `last` forward by `overrun_ms`, clamped to
/// `[0, max_extrapolation_ms]`.
///
/// A zero-velocity snapshot yields a held (frozen) position - intended,
/// not a bug.
#[must_use]
pub fn project(last: &Snapshot, overrun_ms: f64, max_extrapolation_ms: f64) -> Position {
    let clamped_secs = (overrun_ms.clamp(0.0, max_extrapolation_ms) / 1_000.0) as f32;
    Position::new(
        last.position.x + last.velocity.x * clamped_secs,
        last.position.y + last.velocity.y * clamped_secs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirage_core::Velocity;

    fn moving(vx: f32, vy: f32) -> Snapshot {
        Snapshot::new(
            Position::new(10.0, 10.0),
            0.0,
            Velocity::new(vx, vy),
            1_100.0,
        )
    }

    #[test]
    fn test_velocity_projection() {
        // 100ms overrun at 1000 units/sec: 100 units of travel.
        let pos = project(&moving(1_000.0, 0.0), 100.0, 250.0);
        assert!((pos.x - 110.0).abs() < 1e-3);
        assert!((pos.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_overrun_is_capped() {
        // A 5 second stall projects no further than the cap allows.
        let pos = project(&moving(1_000.0, 0.0), 5_000.0, 250.0);
        assert!((pos.x - 260.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_velocity_freezes() {
        let pos = project(&moving(0.0, 0.0), 10_000.0, 250.0);
        assert_eq!(pos, Position::new(10.0, 10.0));
    }

    #[test]
    fn test_negative_overrun_holds() {
        // Negative overrun clamps to zero: never projects backward.
        let pos = project(&moving(1_000.0, 0.0), -50.0, 250.0);
        assert_eq!(pos, Position::new(10.0, 10.0));
    }
}
