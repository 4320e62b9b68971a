//! # Clock Synchronization
//!
//! Per-entity estimate of the server/local clock offset such that
//! `server_time ≈ local_time + offset`.
//!
//! Each remote source may sit behind its own network path, so the offset
//! is deliberately per-entity rather than process-wide.
//!
//! The estimator has three regimes, keyed by the instantaneous error:
//!
//! ```text
//! |delta| > hard_snap_ms   -> re-lock immediately (suspend/resume, clock jump)
//! |delta| > soft_threshold -> fast EMA, converge after moderate drift
//! otherwise                -> slow EMA, reject pure jitter
//! ```

use crate::config::SyncConfig;

/// Server/local clock offset estimator.
///
/// Seeds exactly on the first observation, then tracks drift with an
/// adaptive EMA. Outside the hard-snap case, no single sample moves the
/// estimate by more than one EMA step.
#[derive(Clone, Debug)]
pub struct ClockSync {
    /// Current offset estimate in milliseconds; `None` until seeded.
    offset_ms: Option<f64>,
    /// Error beyond which the estimate re-locks immediately.
    hard_snap_ms: f64,
    /// Error beyond which the fast coefficient applies.
    soft_threshold_ms: f64,
    /// EMA coefficient above the soft threshold.
    fast_alpha: f64,
    /// EMA coefficient in steady state.
    slow_alpha: f64,
    /// Number of hard re-locks since construction.
    hard_snaps: u64,
}

impl ClockSync {
    /// Creates an estimator from the engine configuration.
    #[must_use]
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            offset_ms: None,
            hard_snap_ms: config.hard_snap_ms,
            soft_threshold_ms: config.soft_threshold_ms,
            fast_alpha: config.fast_alpha,
            slow_alpha: config.slow_alpha,
            hard_snaps: 0,
        }
    }

    /// Feeds one `(server_time, local_time)` observation and returns the
    /// updated offset estimate.
    pub fn observe(&mut self, server_time_ms: f64, local_time_ms: f64) -> f64 {
        let instantaneous = server_time_ms - local_time_ms;

        let Some(offset) = self.offset_ms else {
            // First observation: exact seed, no smoothing.
            self.offset_ms = Some(instantaneous);
            return instantaneous;
        };

        let delta = instantaneous - offset;
        let updated = if delta.abs() > self.hard_snap_ms {
            // Clock jumped (tab suspend, long stall): chasing it with an
            // EMA would smear the error over seconds. Re-lock.
            self.hard_snaps += 1;
            tracing::debug!(delta_ms = delta, "clock offset hard snap");
            instantaneous
        } else if delta.abs() > self.soft_threshold_ms {
            offset + delta * self.fast_alpha
        } else {
            offset + delta * self.slow_alpha
        };

        self.offset_ms = Some(updated);
        updated
    }

    /// Returns the current offset estimate, or `None` before the first
    /// observation.
    #[inline]
    #[must_use]
    pub const fn offset_ms(&self) -> Option<f64> {
        self.offset_ms
    }

    /// Returns true once at least one observation has been made.
    #[inline]
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.offset_ms.is_some()
    }

    /// Number of hard re-locks since construction.
    #[inline]
    #[must_use]
    pub const fn hard_snaps(&self) -> u64 {
        self.hard_snaps
    }

    /// Forgets the estimate; the next observation seeds exactly.
    pub fn reset(&mut self) {
        self.offset_ms = None;
    }
}
