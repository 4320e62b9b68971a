//! # Teleport Detection
//!
//! Respawns and portal transitions arrive on the wire looking exactly
//! like any other pose update. Interpolating through one drags the entity
//! across the map in a visible streak, so displacements beyond a
//! configured threshold bypass buffering entirely and snap.
//!
//! Fast-but-continuous motion stays under the threshold and interpolates
//! normally; tune the threshold above the fastest legitimate per-update
//! displacement for the entity class.

use mirage_core::Position;

/// Distance-threshold teleport detector.
#[derive(Clone, Copy, Debug)]
pub struct TeleportGuard {
    /// Squared threshold; comparisons skip the sqrt.
    threshold_squared: f32,
}

impl TeleportGuard {
    /// Creates a guard with the given world-unit threshold.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold_squared: threshold * threshold,
        }
    }

    /// Returns true if the incoming position is far enough from the last
    /// rendered position to be a teleport rather than motion.
    #[inline]
    #[must_use]
    pub fn should_snap(&self, last_render: Position, incoming: Position) -> bool {
        last_render.distance_squared(incoming) > self.threshold_squared
    }
}
