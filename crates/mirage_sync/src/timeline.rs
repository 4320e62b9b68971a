//! # Render Timeline
//!
//! Resolves a render-time instant against the snapshot buffer into one of
//! three playback modes. This single decision function is the crux of
//! smooth playback:
//!
//! ```text
//! target = local_now + clock_offset - render_delay
//!
//!  buffer:   [prev]······[next]          ──▶ Interpolate(prev, next, t)
//!  buffer:   [a] [b] ... all <= target   ──▶ Extrapolate(newest, overrun)
//!  buffer:   target < oldest             ──▶ Snap(next)   (cannot go back)
//! ```
//!
//! The fixed render delay trades a small constant latency for freedom
//! from double-smoothing artifacts: interpolation is the **only**
//! smoothing pass, and the output is never smoothed again frame-to-frame.

use crate::snapshot::{Snapshot, SnapshotBuffer};

/// What the renderer should do for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderInstruction {
    /// Jump directly to a snapshot (render target predates all history).
    Snap(Snapshot),
    /// Blend between a bracketing pair with factor `t` in `[0, 1]`.
    Interpolate {
        /// Snapshot just behind the render target.
        prev: Snapshot,
        /// Snapshot just ahead of the render target.
        next: Snapshot,
        /// Blend factor, clamped; `0.0` for a zero-duration bracket.
        t: f32,
    },
    /// Project past the newest snapshot using its velocity.
    Extrapolate {
        /// Newest snapshot by server time.
        last: Snapshot,
        /// How far past it the target sits, in milliseconds (unclamped;
        /// the extrapolator applies the cap).
        overrun_ms: f64,
    },
}

/// Resolves the playback mode for `target_server_time_ms`.
///
/// Prunes strictly-older snapshots first (keeping at least a bracketing
/// pair), then scans arrival order for the first snapshot ahead of the
/// target.
pub fn resolve(buffer: &mut SnapshotBuffer, target_server_time_ms: f64) -> RenderInstruction {
    buffer.prune_older_than(target_server_time_ms);

    let ahead = buffer
        .iter()
        .position(|snap| snap.server_time_ms > target_server_time_ms);

    match ahead {
        None => {
            // Buffer exhausted: everything is at or behind the target.
            // Newest-by-time, not newest-by-arrival (FIFO append policy).
            let last = *buffer.newest().expect("buffer is never empty");
            RenderInstruction::Extrapolate {
                last,
                overrun_ms: target_server_time_ms - last.server_time_ms,
            }
        }
        Some(0) => {
            // Target predates the oldest snapshot; extrapolating backward
            // would invent history.
            let next = *buffer.get(0).expect("buffer is never empty");
            RenderInstruction::Snap(next)
        }
        Some(i) => {
            let prev = *buffer.get(i - 1).expect("index validated by scan");
            let next = *buffer.get(i).expect("index validated by scan");
            let span_ms = next.server_time_ms - prev.server_time_ms;
            // Zero-duration bracket (duplicate timestamps): hold at prev.
            let t = if span_ms > 0.0 {
                ((target_server_time_ms - prev.server_time_ms) / span_ms).clamp(0.0, 1.0) as f32
            } else {
                0.0
            };
            RenderInstruction::Interpolate { prev, next, t }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirage_core::{Position, Velocity};

    fn snap(t: f64) -> Snapshot {
        Snapshot::new(Position::new(t as f32, 0.0), 0.0, Velocity::ZERO, t)
    }

    fn buffer(times: &[f64]) -> SnapshotBuffer {
        let mut buffer = SnapshotBuffer::new(8, snap(times[0]));
        for &t in &times[1..] {
            buffer.push(snap(t));
        }
        buffer
    }

    #[test]
    fn test_bracketed_interpolation() {
        let mut buffer = buffer(&[100.0, 200.0]);
        match resolve(&mut buffer, 150.0) {
            RenderInstruction::Interpolate { prev, next, t } => {
                assert_eq!(prev.server_time_ms, 100.0);
                assert_eq!(next.server_time_ms, 200.0);
                assert!((t - 0.5).abs() < 1e-6);
            }
            other => panic!("expected interpolation, got {other:?}"),
        }
    }

    #[test]
    fn test_exhausted_buffer_extrapolates() {
        let mut buffer = buffer(&[100.0, 200.0]);
        match resolve(&mut buffer, 350.0) {
            RenderInstruction::Extrapolate { last, overrun_ms } => {
                assert_eq!(last.server_time_ms, 200.0);
                assert!((overrun_ms - 150.0).abs() < f64::EPSILON);
            }
            other => panic!("expected extrapolation, got {other:?}"),
        }
    }

    #[test]
    fn test_target_before_history_snaps() {
        let mut buffer = buffer(&[100.0, 200.0]);
        match resolve(&mut buffer, 50.0) {
            RenderInstruction::Snap(next) => assert_eq!(next.server_time_ms, 100.0),
            other => panic!("expected snap, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_bracket_holds_at_prev() {
        let mut buffer = SnapshotBuffer::new(8, snap(100.0));
        let mut twin = snap(100.0);
        twin.position = Position::new(999.0, 0.0);
        // Force a pair at the same instant behind a future target... the
        // second 100.0 is "ahead" of a 99.0 target with the first as prev.
        buffer.push(twin);
        match resolve(&mut buffer, 99.0) {
            // Both entries are ahead of the target: snap to the oldest.
            RenderInstruction::Snap(next) => assert_eq!(next.server_time_ms, 100.0),
            other => panic!("expected snap, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_timestamp_bracket_is_t_zero() {
        // prev at 100, two entries both at 200: target between the twins
        // never divides by zero.
        let mut buffer = buffer(&[100.0, 200.0, 200.0]);
        match resolve(&mut buffer, 200.0) {
            RenderInstruction::Interpolate { t, .. } => assert_eq!(t, 0.0),
            RenderInstruction::Extrapolate { overrun_ms, .. } => {
                assert_eq!(overrun_ms, 0.0);
            }
            other => panic!("unexpected instruction {other:?}"),
        }
    }

    #[test]
    fn test_prune_runs_before_scan() {
        let mut buffer = buffer(&[0.0, 100.0, 200.0, 300.0]);
        let _ = resolve(&mut buffer, 250.0);
        // 0 and 100 are strictly older and not needed for the bracket.
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0).unwrap().server_time_ms, 200.0);
    }

    #[test]
    fn test_out_of_order_tail_is_absorbed() {
        // A late retransmit at the tail never panics or produces a
        // non-finite factor; the prune/scan resolves it to a snap at the
        // oldest ahead entry.
        let mut buffer = buffer(&[100.0, 250.0, 200.0]);
        match resolve(&mut buffer, 220.0) {
            RenderInstruction::Snap(next) => assert_eq!(next.server_time_ms, 250.0),
            RenderInstruction::Interpolate { t, .. } => {
                assert!((0.0..=1.0).contains(&t));
            }
            RenderInstruction::Extrapolate { overrun_ms, .. } => {
                assert!(overrun_ms.is_finite());
            }
        }
    }
}
