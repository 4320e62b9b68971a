//! End-to-end playback scenarios for the per-entity engine.
//!
//! Local and server clocks are kept in the same domain (offset zero)
//! unless a test says otherwise, so render targets are easy to reason
//! about: `target = local_now - render_delay`.

use mirage_core::Position;
use mirage_sync::{EntityInterpolator, IngestOutcome, PoseUpdate, SyncConfig};

/// Render delay used by every scenario.
const DELAY: f64 = 120.0;

fn config() -> SyncConfig {
    SyncConfig {
        render_delay_ms: DELAY,
        ..SyncConfig::default()
    }
}

/// Calls `render_at` with the local time whose render target is
/// `target_ms`, assuming a zero clock offset.
fn render_target(engine: &mut EntityInterpolator, target_ms: f64) -> Position {
    engine.render_at(target_ms + DELAY).position
}

#[test]
fn midpoint_then_snap_then_hold() {
    // Seed (0,0,0) at t0, one update (100,100) at t0+100.
    let t0 = 10_000.0;
    let mut engine =
        EntityInterpolator::with_config(config(), PoseUpdate::new(0.0, 0.0, 0.0, t0));
    engine.ingest(PoseUpdate::new(100.0, 100.0, 0.0, t0 + 100.0), t0 + 100.0);

    // Midpoint target: exact linear midpoint under zero velocity.
    let pos = render_target(&mut engine, t0 + 50.0);
    assert!((pos.x - 50.0).abs() < 1e-3);
    assert!((pos.y - 50.0).abs() < 1e-3);

    // Target before all history: snap to the oldest pose.
    let pos = render_target(&mut engine, t0 - 25.0);
    assert_eq!(pos, Position::new(0.0, 0.0));

    // Target far past the newest update: zero velocity holds exactly.
    let pos = render_target(&mut engine, t0 + 5_000.0);
    assert_eq!(pos, Position::new(100.0, 100.0));
}

#[test]
fn extrapolates_with_velocity() {
    let mut engine =
        EntityInterpolator::with_config(config(), PoseUpdate::new(10.0, 10.0, 0.0, 1_000.0));
    engine.ingest(
        PoseUpdate::new(10.0, 10.0, 0.0, 1_100.0).with_velocity(1_000.0, 0.0),
        1_100.0,
    );

    // 100ms past the newest snapshot at 1000 units/sec.
    let pos = render_target(&mut engine, 1_200.0);
    assert!((pos.x - 110.0).abs() < 1e-2);
    assert!((pos.y - 10.0).abs() < 1e-2);
    assert!(engine.is_extrapolating());
}

#[test]
fn underrun_freeze_has_no_drift() {
    let mut engine =
        EntityInterpolator::with_config(config(), PoseUpdate::new(0.0, 0.0, 0.0, 1_000.0));
    engine.ingest(PoseUpdate::new(42.0, 7.0, 0.0, 1_100.0), 1_100.0);

    // Repeated far-future frames hold the newest pose bit-for-bit.
    for frame in 0..100 {
        let pos = render_target(&mut engine, 2_000.0 + f64::from(frame) * 16.0);
        assert_eq!(pos, Position::new(42.0, 7.0));
    }
}

#[test]
fn buffer_bound_holds_for_any_ingest_sequence() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let cfg = config();
    let mut engine = EntityInterpolator::with_config(cfg, PoseUpdate::new(0.0, 0.0, 0.0, 0.0));
    let mut rng = StdRng::seed_from_u64(0x4d49_5241);

    for i in 0..10_000 {
        // Jittered, sometimes out-of-order timestamps; small displacements
        // so the teleport guard stays out of the way.
        let server = f64::from(i) * 50.0 + rng.gen_range(-80.0..80.0);
        let x = (f64::from(i) * 0.01) as f32;
        engine.ingest(PoseUpdate::new(x, 0.0, 0.0, server), server + 30.0);
        assert!(engine.buffer_len() <= cfg.max_buffer_size);
    }
}

#[test]
fn out_of_order_update_is_buffered_not_rejected() {
    let mut engine =
        EntityInterpolator::with_config(config(), PoseUpdate::new(0.0, 0.0, 0.0, 1_000.0));
    engine.ingest(PoseUpdate::new(10.0, 0.0, 0.0, 1_100.0), 1_100.0);

    // Late retransmit with an older server timestamp: appended, by policy.
    let outcome = engine.ingest(PoseUpdate::new(5.0, 0.0, 0.0, 1_050.0), 1_110.0);
    assert_eq!(outcome, IngestOutcome::Buffered);
    assert_eq!(engine.buffer_len(), 3);
}

#[test]
fn teleport_mid_stream_snaps_without_sliding() {
    let mut engine =
        EntityInterpolator::with_config(config(), PoseUpdate::new(0.0, 0.0, 0.0, 1_000.0));
    engine.ingest(PoseUpdate::new(5.0, 0.0, 0.0, 1_050.0), 1_050.0);
    engine.ingest(PoseUpdate::new(10.0, 0.0, 0.0, 1_100.0), 1_100.0);

    // Respawn across the map.
    let outcome = engine.ingest(PoseUpdate::new(4_000.0, 4_000.0, 0.0, 1_150.0), 1_150.0);
    assert_eq!(outcome, IngestOutcome::Teleported);
    assert_eq!(engine.buffer_len(), 1);

    // The very next frame renders at the respawn point - no streaking
    // back toward the old position.
    let pos = render_target(&mut engine, 1_150.0);
    assert_eq!(pos, Position::new(4_000.0, 4_000.0));
}

#[test]
fn streamed_playback_is_monotone_along_a_line() {
    // An entity moving +x at a constant rate, updates every 50ms; the
    // rendered x must never move backwards across frames.
    let mut engine =
        EntityInterpolator::with_config(config(), PoseUpdate::new(0.0, 0.0, 0.0, 1_000.0));

    let mut last_x = f32::MIN;
    let mut next_update = 1_050.0;
    let mut sent = 1;
    for frame in 0..200 {
        let local = 1_000.0 + f64::from(frame) * 16.0;
        while local >= next_update {
            let x = ((next_update - 1_000.0) / 10.0) as f32;
            engine.ingest(
                PoseUpdate::new(x, 0.0, 0.0, next_update).with_velocity(100.0, 0.0),
                next_update,
            );
            sent += 1;
            next_update += 50.0;
        }
        let pos = engine.render_at(local).position;
        assert!(
            pos.x >= last_x - 1e-3,
            "x went backwards at frame {frame}: {last_x} -> {}",
            pos.x
        );
        last_x = pos.x;
    }
    assert!(sent > 50, "scenario should stream a real update load");
}

#[test]
fn clock_offset_is_transparent_to_playback() {
    // Server clock 5 seconds ahead of local: the same midpoint scenario
    // must behave identically once the offset is learned.
    let offset = 5_000.0;
    let t0 = 20_000.0;
    let mut engine =
        EntityInterpolator::with_config(config(), PoseUpdate::new(0.0, 0.0, 0.0, t0));
    engine.ingest(
        PoseUpdate::new(100.0, 100.0, 0.0, t0 + 100.0),
        t0 + 100.0 - offset,
    );
    assert!((engine.clock_offset_ms().unwrap() - offset).abs() < 1e-6);

    // Local time whose target lands on the midpoint t0+50.
    let local = t0 + 50.0 - offset + DELAY;
    let pos = engine.render_at(local).position;
    assert!((pos.x - 50.0).abs() < 1e-3);
    assert!((pos.y - 50.0).abs() < 1e-3);
}
