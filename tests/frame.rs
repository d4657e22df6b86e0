use std::time::{Duration, Instant};

use modeset::frame::*;

#[test]
fn target_fps_sets_interval() {
    let t0 = Instant::now();
    let clock = FrameClock::new(50.0, t0);
    assert_eq!(clock.interval(), Some(Duration::from_millis(20)));
    assert!(clock.is_due(t0));
}

#[test]
fn invalid_target_is_uncapped() {
    let t0 = Instant::now();
    for fps in [0.0, -30.0, f32::NAN, f32::INFINITY, 1e-40] {
        assert_eq!(FrameClock::new(fps, t0).interval(), None, "target {fps}");
    }
}

#[test]
fn frame_schedules_next_redraw() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new(50.0, t0);
    clock.frame(t0);
    assert_eq!(clock.next_frame(), t0 + Duration::from_millis(20));
    assert!(!clock.is_due(t0 + Duration::from_millis(19)));
    assert!(clock.is_due(t0 + Duration::from_millis(20)));
}

#[test]
fn uncapped_clock_is_always_due() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new(0.0, t0);
    clock.frame(t0);
    assert!(clock.is_due(t0));
}

#[test]
fn fps_averages_frame_times() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new(60.0, t0);
    assert_eq!(clock.fps(), 0.0);
    for i in 0..=10 {
        clock.frame(t0 + Duration::from_millis(25 * i));
    }
    assert!((clock.fps() - 40.0).abs() < 0.01, "got {}", clock.fps());
}

#[test]
fn fps_ignores_stalls_beyond_quarter_second() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new(60.0, t0);
    clock.frame(t0);
    clock.frame(t0 + Duration::from_secs(5));
    assert!((clock.fps() - 4.0).abs() < 0.01);
}
