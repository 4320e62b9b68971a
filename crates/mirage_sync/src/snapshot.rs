//! # Snapshot Buffer
//!
//! Bounded, oldest-first store of authoritative poses for one entity.
//!
//! ```text
//! Server sends:   [t=100] [t=150] [t=200] [t=250]
//!                    │       │       │       │
//! Network jitter:  ~~~~~~~~~~~~~~~~~~~~~~~~~~~
//!                        │       │
//! Buffer (cap 8):     [100]   [150]  ... head evicts past the cap
//!                        │
//! Render target:       ▼  target = local + offset - render_delay
//! ```
//!
//! ## Out-of-order policy
//!
//! Updates older than the current tail are **still appended** (append-only
//! FIFO). Silently rejecting a late retransmit can starve a legitimate
//! bracketing pair; the render timeline's prune and scan absorb momentary
//! disorder instead. See [`SnapshotBuffer::push`].

use std::collections::VecDeque;

use mirage_core::{Position, Velocity};

/// One timestamped authoritative pose received from the server.
///
/// Immutable once created; destroyed only by buffer eviction or reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    /// Position at the server instant.
    pub position: Position,
    /// Heading in radians at the server instant.
    pub rotation: f32,
    /// Velocity at the server instant, world units per second.
    pub velocity: Velocity,
    /// Server timestamp in milliseconds.
    pub server_time_ms: f64,
}

impl Snapshot {
    /// Creates a new snapshot.
    #[inline]
    #[must_use]
    pub const fn new(
        position: Position,
        rotation: f32,
        velocity: Velocity,
        server_time_ms: f64,
    ) -> Self {
        Self {
            position,
            rotation,
            velocity,
            server_time_ms,
        }
    }
}

/// Bounded, oldest-first snapshot store for one entity.
///
/// Invariants:
/// - `len() <= capacity` after every push
/// - at least one snapshot is present from construction onward
#[derive(Clone, Debug)]
pub struct SnapshotBuffer {
    /// Snapshots in arrival order (oldest first).
    snapshots: VecDeque<Snapshot>,
    /// Maximum number of buffered snapshots.
    capacity: usize,
}

impl SnapshotBuffer {
    /// Creates a buffer seeded with the entity's spawn pose.
    ///
    /// Capacity is clamped to at least 2 so a bracketing pair can exist.
    #[must_use]
    pub fn new(capacity: usize, seed: Snapshot) -> Self {
        let capacity = capacity.max(2);
        let mut snapshots = VecDeque::with_capacity(capacity + 1);
        snapshots.push_back(seed);
        Self {
            snapshots,
            capacity,
        }
    }

    /// Appends a snapshot at the tail and evicts from the head while the
    /// bound is exceeded.
    ///
    /// Appends unconditionally: an out-of-order `server_time_ms` is kept
    /// (see module docs for the policy rationale).
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Removes snapshots with `server_time_ms` strictly less than
    /// `before_ms`, but never reduces the buffer below 2 entries while
    /// more than one exists.
    ///
    /// The floor keeps a bracketing pair available mid-prune: the entry
    /// just behind the render target is exactly the `prev` the
    /// interpolator needs.
    pub fn prune_older_than(&mut self, before_ms: f64) {
        while self.snapshots.len() > 2 {
            match self.snapshots.front() {
                Some(front) if front.server_time_ms < before_ms => {
                    self.snapshots.pop_front();
                }
                _ => break,
            }
        }
    }

    /// Clears the buffer and reseeds it with exactly one snapshot.
    pub fn reset(&mut self, seed: Snapshot) {
        self.snapshots.clear();
        self.snapshots.push_back(seed);
    }

    /// Returns the number of buffered snapshots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if the buffer holds no snapshots.
    ///
    /// Never true in practice (the buffer is seeded at construction and
    /// reseeded on reset); provided for completeness.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns the newest snapshot **by server time**.
    ///
    /// Under the FIFO append policy arrival order can lag time order, so
    /// the tail is not necessarily the newest instant. Extrapolation must
    /// project from the newest instant, not the newest arrival.
    #[must_use]
    pub fn newest(&self) -> Option<&Snapshot> {
        self.snapshots
            .iter()
            .max_by(|a, b| a.server_time_ms.total_cmp(&b.server_time_ms))
    }

    /// Iterates snapshots oldest-arrival-first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Returns the snapshot at `index` in arrival order.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }
}
