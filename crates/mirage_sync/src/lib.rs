//! # MIRAGE Sync - The Mirage Layer
//!
//! Client-side state synchronization and interpolation for remote entities.
//!
//! Every remote entity (players, NPCs, pets, projectiles) is driven by
//! intermittent, jittery, possibly out-of-order pose updates from the
//! authoritative server, yet must render as smooth continuous motion at
//! any frame rate. This crate answers exactly one question per frame:
//! *where should this remote entity visually be right now?*
//!
//! ## Architecture
//!
//! ```text
//! Network recv ──▶ ingest(update, local_now) ──▶ ┌──────────────────┐
//!                                                │ EntityInterpolator│
//!   TeleportGuard ─ intercepts before buffering  │  SnapshotBuffer   │
//!   ClockSync ────── offset = server - local     │  ClockSync        │
//!                                                └────────┬─────────┘
//! Render loop ──▶ render_at(local_now) ──▶ RenderTimeline │
//!                      │                                  │
//!                      ▼                                  ▼
//!            Interpolate / Extrapolate / Snap ──▶ RenderPose
//! ```
//!
//! The timeline renders a fixed `render_delay_ms` behind the estimated
//! server clock. That deliberate, constant lag buys freedom from jitter:
//! bracketing snapshots are almost always available, and a single
//! interpolation pass is the only smoothing ever applied. The engine
//! never re-smooths its own output.
//!
//! ## Guarantees
//!
//! - `render_at` always returns a finite pose, for any input sequence
//! - No heap allocations in the per-frame path (buffer capacity is
//!   reserved up front)
//! - One engine instance per tracked entity; no shared mutable state
//!
//! ## Example
//!
//! ```rust
//! use mirage_sync::{EntityInterpolator, PoseUpdate};
//!
//! // Spawn message from the server seeds the engine.
//! let mut engine = EntityInterpolator::new(PoseUpdate::new(0.0, 0.0, 0.0, 1_000.0));
//!
//! // Network thread hands over timestamped updates.
//! engine.ingest(PoseUpdate::new(4.0, 2.0, 0.1, 1_050.0), 1_050.0);
//!
//! // Render loop asks for the current pose once per frame.
//! let pose = engine.render_at(1_060.0);
//! assert!(pose.position.is_finite());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod extrapolate;
pub mod interpolate;
pub mod snapshot;
pub mod teleport;
pub mod timeline;

// Re-exports for convenience
pub use clock::ClockSync;
pub use config::SyncConfig;
pub use diagnostics::{IngestOutcome, RejectReason, SyncStats};
pub use engine::{EntityInterpolator, PoseUpdate, RenderPose, SyncState};
pub use snapshot::{Snapshot, SnapshotBuffer};
pub use teleport::TeleportGuard;
pub use timeline::RenderInstruction;

/// Default render delay in milliseconds.
///
/// The timeline plays back this far behind the estimated server clock so
/// that a bracketing snapshot pair is normally available. Raising it
/// trades latency for tolerance of network jitter.
pub const DEFAULT_RENDER_DELAY_MS: f64 = 120.0;

/// Default snapshot buffer capacity per entity.
///
/// At a 20 Hz server send rate, 8 snapshots cover 400ms of history -
/// well past the render delay plus worst-case jitter.
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 8;
