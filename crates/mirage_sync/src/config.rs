//! # Sync Configuration
//!
//! Tuning constants for the per-entity engine. Hosts typically keep one
//! `SyncConfig` per entity class (players, NPCs, projectiles) and load
//! overrides from a config table at startup.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_BUFFER_SIZE, DEFAULT_RENDER_DELAY_MS};

/// Configuration for an [`EntityInterpolator`](crate::EntityInterpolator).
///
/// All fields are plain data; the same struct parameterizes every entity
/// kind rather than duplicating the engine per class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum snapshots buffered per entity. Oldest entries are evicted
    /// past this bound.
    pub max_buffer_size: usize,
    /// Fixed playback delay behind the estimated server clock, in
    /// milliseconds. Deliberate constant lag traded for smoothness.
    pub render_delay_ms: f64,
    /// Clock error beyond which the offset re-locks immediately instead
    /// of smoothing, in milliseconds. Models tab suspend/resume.
    pub hard_snap_ms: f64,
    /// Clock error beyond which the fast EMA coefficient applies, in
    /// milliseconds.
    pub soft_threshold_ms: f64,
    /// EMA coefficient used above `soft_threshold_ms` - converges quickly
    /// after moderate drift.
    pub fast_alpha: f64,
    /// EMA coefficient used in steady state - rejects pure jitter.
    pub slow_alpha: f64,
    /// Displacement in world units beyond which an incoming snapshot is
    /// treated as a teleport and snapped instead of interpolated.
    pub teleport_distance: f32,
    /// Cap on velocity extrapolation past the newest snapshot, in
    /// milliseconds. Prevents runaway projection during long stalls.
    pub max_extrapolation_ms: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            render_delay_ms: DEFAULT_RENDER_DELAY_MS,
            hard_snap_ms: 300.0,
            soft_threshold_ms: 50.0,
            fast_alpha: 0.1,
            slow_alpha: 0.005,
            teleport_distance: 300.0,
            max_extrapolation_ms: 250.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sane() {
        let config = SyncConfig::default();
        assert!(config.max_buffer_size >= 2);
        assert!(config.render_delay_ms > 0.0);
        assert!(config.hard_snap_ms > config.soft_threshold_ms);
        assert!(config.fast_alpha > config.slow_alpha);
        assert!(config.teleport_distance > 0.0);
    }
}
