use flipbook::core::ManualClock;
use flipbook::{FrameTiming, Playback, PlaybackState};

fn playback(frames: usize, fps: f64) -> (Playback<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let timing = FrameTiming::new(frames, fps).unwrap();
    (Playback::with_clock(timing, clock.clone()), clock)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Playing to the end
// ============================================================================

#[test]
fn test_full_duration_stops_on_last_frame() {
    for (frames, fps) in [(1, 1.0), (5, 0.2), (12, 24.0), (3, 7.5)] {
        let (mut pb, clock) = playback(frames, fps);
        pb.start();

        let total_ms = pb.timing().total_duration_ms().ceil() as u64;
        clock.advance_ms(total_ms);
        pb.tick();

        assert!(!pb.is_playing(), "{frames} frames @ {fps} fps still playing");
        assert_eq!(pb.current_frame_index(), frames - 1);
        assert_close(pb.progress_percent(), 100.0);
    }
}

#[test]
fn test_end_of_sequence_releases_timer() {
    let (mut pb, clock) = playback(2, 10.0);
    pb.start();
    clock.advance_ms(1000);

    assert!(pb.poll());
    assert_eq!(pb.state(), PlaybackState::Stopped);
    assert_eq!(pb.next_refresh(), None);

    // No further ticks once stopped
    clock.advance_ms(1000);
    assert!(!pb.poll());
}

#[test]
fn test_does_not_loop() {
    let (mut pb, clock) = playback(3, 1.0);
    pb.start();
    clock.advance_ms(10_000);
    pb.tick();
    clock.advance_ms(1_500);
    pb.tick();

    assert_eq!(pb.current_frame_index(), 2);
    assert!(!pb.is_playing());
}

// ============================================================================
// Scrubbing
// ============================================================================

#[test]
fn test_scrub_sets_progress_and_frame() {
    let frames = 5;
    for percent in [0.0, 10.0, 20.0, 48.0, 50.0, 99.0, 100.0] {
        let (mut pb, _) = playback(frames, 0.2);
        pb.scrub(percent);

        let expected = ((percent / 100.0 * frames as f64).floor() as usize).min(frames - 1);
        assert_close(pb.progress_percent(), percent);
        assert_eq!(pb.current_frame_index(), expected, "scrub to {percent}%");
    }
}

#[test]
fn test_scrub_clamps_out_of_range() {
    let (mut pb, _) = playback(4, 2.0);

    pb.scrub(150.0);
    assert_eq!(pb.current_frame_index(), 3);
    assert_close(pb.progress_percent(), 100.0);

    pb.scrub(-20.0);
    assert_eq!(pb.current_frame_index(), 0);
    assert_close(pb.progress_percent(), 0.0);
}

#[test]
fn test_scrub_does_not_change_play_state() {
    let (mut pb, _) = playback(5, 1.0);

    pb.scrub(40.0);
    assert_eq!(pb.state(), PlaybackState::Stopped);

    pb.start();
    pb.scrub(60.0);
    assert_eq!(pb.state(), PlaybackState::Playing);
}

#[test]
fn test_playback_continues_from_scrubbed_position() {
    let (mut pb, clock) = playback(10, 1.0);
    pb.start();
    clock.advance_ms(1_000);
    pb.tick();
    assert_eq!(pb.current_frame_index(), 1);

    pb.scrub(50.0);
    clock.advance_ms(2_000);
    pb.tick();

    assert_eq!(pb.current_frame_index(), 7);
    assert_close(pb.elapsed_seconds(), 7.0);
}

// ============================================================================
// Start / stop
// ============================================================================

#[test]
fn test_stop_while_stopped_is_idempotent() {
    let (mut pb, _) = playback(5, 1.0);
    pb.scrub(30.0);
    let before = pb.position();

    pb.stop();
    pb.stop();

    assert_eq!(pb.position(), before);
    assert_eq!(pb.state(), PlaybackState::Stopped);
}

#[test]
fn test_elapsed_is_monotonic_while_playing() {
    let (mut pb, clock) = playback(8, 2.0);
    pb.start();

    let mut last = pb.elapsed_seconds();
    for _ in 0..50 {
        clock.advance_ms(100);
        pb.poll();
        assert!(pb.elapsed_seconds() >= last);
        last = pb.elapsed_seconds();
    }
}

#[test]
fn test_start_rewinds_to_beginning() {
    let (mut pb, clock) = playback(5, 1.0);
    pb.scrub(80.0);
    pb.start();
    clock.advance_ms(500);
    pb.tick();

    assert_eq!(pb.current_frame_index(), 0);
    assert_close(pb.elapsed_seconds(), 0.5);
}

#[test]
fn test_empty_sequence_cannot_play() {
    let (mut pb, _) = playback(0, 1.0);
    pb.start();
    assert!(!pb.is_playing());

    pb.scrub(50.0);
    assert_eq!(pb.current_frame_index(), 0);
    assert_eq!(pb.time_label(), "0.00s / 0.00s");
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_a_five_frames_at_fifth_fps() {
    let (mut pb, clock) = playback(5, 0.2);
    assert_eq!(pb.timing().frame_duration_ms(), 5000.0);
    assert_eq!(pb.timing().total_duration_ms(), 25000.0);

    pb.start();
    pb.tick();
    assert_eq!(pb.current_frame_index(), 0);

    clock.advance_ms(12_000);
    pb.tick();
    assert_eq!(pb.current_frame_index(), 2);
    assert_close(pb.progress_percent(), 48.0);
    assert_eq!(pb.time_label(), "12.00s / 25.00s");
}

#[test]
fn test_scenario_b_scrub_to_end_while_playing() {
    let (mut pb, clock) = playback(5, 0.2);
    pb.start();
    pb.scrub(100.0);

    assert_eq!(pb.current_frame_index(), 4);
    assert_close(pb.elapsed_seconds(), 25.0);
    assert!(pb.is_playing());

    clock.advance_ms(100);
    assert!(pb.poll());
    assert!(!pb.is_playing());
    assert_eq!(pb.current_frame_index(), 4);
}

#[test]
fn test_scenario_c_stop_before_first_tick() {
    let (mut pb, clock) = playback(5, 0.2);
    pb.start();
    clock.advance_ms(50);
    pb.stop();

    clock.advance_ms(5_000);
    pb.poll();

    assert_eq!(pb.current_frame_index(), 0);
    assert_close(pb.progress_percent(), 0.0);
}
