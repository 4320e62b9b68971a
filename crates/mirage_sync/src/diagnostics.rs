//! # Diagnostics
//!
//! Structured counters and outcome reports the host can surface for
//! telemetry. The engine performs no I/O of its own beyond `tracing`
//! events; these types replace any console side channel.
//!
//! Counters are for dashboards and tests, **not** for control flow.

use thiserror::Error;

/// Why an ingested update was discarded.
///
/// Network data is untrusted; a malformed update is dropped locally and
/// the previous target retained. These are never fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Position contained a NaN or infinity.
    #[error("non-finite position in update")]
    NonFinitePosition,

    /// Rotation was NaN or infinite.
    #[error("non-finite rotation in update")]
    NonFiniteRotation,

    /// Velocity contained a NaN or infinity.
    #[error("non-finite velocity in update")]
    NonFiniteVelocity,

    /// Server timestamp was NaN or infinite.
    #[error("non-finite server timestamp in update")]
    NonFiniteTimestamp,
}

/// What [`ingest`](crate::EntityInterpolator::ingest) did with an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Appended to the snapshot buffer for normal playback.
    Buffered,
    /// Displacement exceeded the teleport threshold: buffer reset and
    /// render pose snapped to the update.
    Teleported,
    /// Update was discarded; previous target retained.
    Rejected(RejectReason),
}

/// Running counters for one engine instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Updates accepted into the buffer.
    pub snapshots_buffered: u64,
    /// Updates discarded as malformed.
    pub snapshots_rejected: u64,
    /// Teleport snaps triggered on ingest.
    pub teleport_snaps: u64,
    /// Frames rendered in extrapolation mode.
    pub extrapolated_frames: u64,
    /// Frames snapped because the target predated all history.
    pub snapped_frames: u64,
}
