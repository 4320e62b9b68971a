//! # Entity Interpolator
//!
//! The per-entity engine: one instance per tracked remote entity, owning
//! its snapshot buffer, clock estimate, teleport guard, and stats.
//!
//! ## State machine
//!
//! ```text
//!             ingest (normal)                render_at: no bracket ahead
//!  Seeded ────────────────────▶ Buffering ◀─────────────▶ Extrapolating
//!    ▲                              │
//!    │   ingest (teleport) / snap_to│
//!    └──────────────────────────────┘
//! ```
//!
//! Teleport snapping is instantaneous: a teleporting ingest resets
//! straight back to `Seeded` and reports [`IngestOutcome::Teleported`]
//! instead of storing a transient state.
//!
//! Both `ingest` and `render_at` are synchronous, allocation-free, and
//! O(buffer size). Time is always supplied by the caller so the engine
//! stays deterministic and testable. One instance must be owned by one
//! thread at a time; hand off through a queue, never share.

use mirage_core::{angle, Position, Velocity};

use crate::clock::ClockSync;
use crate::config::SyncConfig;
use crate::diagnostics::{IngestOutcome, RejectReason, SyncStats};
use crate::snapshot::{Snapshot, SnapshotBuffer};
use crate::teleport::TeleportGuard;
use crate::timeline::{self, RenderInstruction};
use crate::{extrapolate, interpolate};

/// A timestamped pose update from the transport layer.
///
/// Velocity defaults to zero; transports that carry it attach it with
/// [`PoseUpdate::with_velocity`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseUpdate {
    /// X position in world units.
    pub x: f32,
    /// Y position in world units.
    pub y: f32,
    /// Heading in radians.
    pub rotation: f32,
    /// X velocity in world units per second.
    pub velocity_x: f32,
    /// Y velocity in world units per second.
    pub velocity_y: f32,
    /// Server timestamp in milliseconds.
    pub server_time_ms: f64,
}

impl PoseUpdate {
    /// Creates an update with zero velocity.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, rotation: f32, server_time_ms: f64) -> Self {
        Self {
            x,
            y,
            rotation,
            velocity_x: 0.0,
            velocity_y: 0.0,
            server_time_ms,
        }
    }

    /// Attaches a velocity to the update.
    #[inline]
    #[must_use]
    pub const fn with_velocity(mut self, velocity_x: f32, velocity_y: f32) -> Self {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
        self
    }

    /// Validates that every field is finite.
    fn validate(&self) -> Result<(), RejectReason> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(RejectReason::NonFinitePosition);
        }
        if !self.rotation.is_finite() {
            return Err(RejectReason::NonFiniteRotation);
        }
        if !(self.velocity_x.is_finite() && self.velocity_y.is_finite()) {
            return Err(RejectReason::NonFiniteVelocity);
        }
        if !self.server_time_ms.is_finite() {
            return Err(RejectReason::NonFiniteTimestamp);
        }
        Ok(())
    }

    /// Converts into an immutable snapshot.
    fn into_snapshot(self) -> Snapshot {
        Snapshot::new(
            Position::new(self.x, self.y),
            self.rotation,
            Velocity::new(self.velocity_x, self.velocity_y),
            self.server_time_ms,
        )
    }
}

/// The per-frame output pose. Read by the render loop, written only by
/// the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPose {
    /// Position to render at.
    pub position: Position,
    /// Heading to render at, radians in `[0, 2*PI)`.
    pub rotation: f32,
}

impl RenderPose {
    const fn new(position: Position, rotation: f32) -> Self {
        Self { position, rotation }
    }
}

/// Playback state of one engine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// Exactly one snapshot buffered; render pose equals it.
    Seeded,
    /// Normal buffered playback between bracketing snapshots.
    Buffering,
    /// Buffer exhausted; projecting from the newest snapshot.
    Extrapolating,
}

/// State-synchronization engine for one remote entity.
///
/// Lives for the entity's lifetime; reset or dropped by the owner on
/// despawn. See the [crate docs](crate) for the data flow.
#[derive(Clone, Debug)]
pub struct EntityInterpolator {
    /// Tuning constants.
    config: SyncConfig,
    /// Time-ordered pose history.
    buffer: SnapshotBuffer,
    /// Server/local clock offset estimate.
    clock: ClockSync,
    /// Teleport detector.
    guard: TeleportGuard,
    /// Current output pose.
    pose: RenderPose,
    /// Playback state.
    state: SyncState,
    /// Telemetry counters.
    stats: SyncStats,
}

impl EntityInterpolator {
    /// Creates an engine seeded with the entity's spawn pose.
    ///
    /// The spawn message is server-authoritative, so `seed` carries the
    /// spawn timestamp; a render target that predates later updates snaps
    /// to this pose instead of extrapolating backward.
    #[must_use]
    pub fn new(seed: PoseUpdate) -> Self {
        Self::with_config(SyncConfig::default(), seed)
    }

    /// Creates an engine with explicit tuning constants.
    #[must_use]
    pub fn with_config(config: SyncConfig, seed: PoseUpdate) -> Self {
        let snapshot = seed.into_snapshot();
        Self {
            buffer: SnapshotBuffer::new(config.max_buffer_size, snapshot),
            clock: ClockSync::new(&config),
            guard: TeleportGuard::new(config.teleport_distance),
            pose: RenderPose::new(snapshot.position, angle::wrap_tau(snapshot.rotation)),
            state: SyncState::Seeded,
            stats: SyncStats::default(),
            config,
        }
    }

    /// Feeds one update from the transport layer.
    ///
    /// `local_now_ms` is a monotonic local clock reading taken at receive
    /// time. Malformed updates are discarded (never fatal); displacements
    /// beyond the teleport threshold reset the buffer and snap the render
    /// pose immediately.
    pub fn ingest(&mut self, update: PoseUpdate, local_now_ms: f64) -> IngestOutcome {
        if let Err(reason) = update.validate() {
            self.stats.snapshots_rejected += 1;
            tracing::warn!(%reason, "discarding malformed pose update");
            return IngestOutcome::Rejected(reason);
        }

        self.clock.observe(update.server_time_ms, local_now_ms);

        let snapshot = update.into_snapshot();
        if self.guard.should_snap(self.pose.position, snapshot.position) {
            self.buffer.reset(snapshot);
            self.pose = RenderPose::new(snapshot.position, angle::wrap_tau(snapshot.rotation));
            self.state = SyncState::Seeded;
            self.stats.teleport_snaps += 1;
            tracing::debug!(
                x = snapshot.position.x,
                y = snapshot.position.y,
                "teleport snap"
            );
            return IngestOutcome::Teleported;
        }

        self.buffer.push(snapshot);
        self.stats.snapshots_buffered += 1;
        self.state = SyncState::Buffering;
        IngestOutcome::Buffered
    }

    /// Computes the pose to render at `local_now_ms` and updates internal
    /// state as a side effect.
    ///
    /// Always returns a finite pose: before the first ingest it holds the
    /// seed; past the newest snapshot it extrapolates (capped); between
    /// snapshots it interpolates. Exactly one smoothing pass is applied -
    /// the output is never re-smoothed frame to frame.
    pub fn render_at(&mut self, local_now_ms: f64) -> RenderPose {
        let Some(offset_ms) = self.clock.offset_ms() else {
            // No server observation yet: hold the seed pose.
            return self.pose;
        };

        let target_ms = local_now_ms + offset_ms - self.config.render_delay_ms;

        match timeline::resolve(&mut self.buffer, target_ms) {
            RenderInstruction::Snap(next) => {
                self.pose = RenderPose::new(next.position, angle::wrap_tau(next.rotation));
                self.state = SyncState::Buffering;
                self.stats.snapped_frames += 1;
            }
            RenderInstruction::Interpolate { prev, next, t } => {
                let (position, rotation) = interpolate::blend(&prev, &next, t);
                self.pose = RenderPose::new(position, rotation);
                self.state = SyncState::Buffering;
            }
            RenderInstruction::Extrapolate { last, overrun_ms } => {
                let position =
                    extrapolate::project(&last, overrun_ms, self.config.max_extrapolation_ms);
                self.pose = RenderPose::new(position, angle::wrap_tau(last.rotation));
                self.state = SyncState::Extrapolating;
                self.stats.extrapolated_frames += 1;
            }
        }

        self.pose
    }

    /// Immediately repositions the entity, clearing all buffered history.
    ///
    /// Used for owner-driven respawn/portal transitions. The reseeded
    /// snapshot inherits the newest buffered timestamp so later ingests
    /// interpolate forward from the snap point.
    pub fn snap_to(&mut self, x: f32, y: f32, rotation: f32) {
        let server_time_ms = self
            .buffer
            .newest()
            .map_or(0.0, |snap| snap.server_time_ms);
        let snapshot = Snapshot::new(
            Position::new(x, y),
            rotation,
            Velocity::ZERO,
            server_time_ms,
        );
        self.buffer.reset(snapshot);
        self.pose = RenderPose::new(snapshot.position, angle::wrap_tau(rotation));
        self.state = SyncState::Seeded;
    }

    /// Number of buffered snapshots.
    #[inline]
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Current clock offset estimate, `None` before the first ingest.
    #[inline]
    #[must_use]
    pub const fn clock_offset_ms(&self) -> Option<f64> {
        self.clock.offset_ms()
    }

    /// True while the last rendered frame was extrapolated.
    ///
    /// Telemetry only - consumers must not branch gameplay on this.
    #[inline]
    #[must_use]
    pub fn is_extrapolating(&self) -> bool {
        self.state == SyncState::Extrapolating
    }

    /// Current playback state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> SyncState {
        self.state
    }

    /// Telemetry counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// The engine's tuning constants.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The current output pose without advancing playback.
    #[inline]
    #[must_use]
    pub const fn pose(&self) -> RenderPose {
        self.pose
    }
}
