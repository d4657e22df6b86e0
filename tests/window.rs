use modeset::error::TransitionError;
use modeset::geometry::Rect;
use modeset::platform::sim::sim_mode;
use modeset::platform::*;
use modeset::window::*;

fn two_displays() -> SimPlatform {
    SimPlatform::new(vec![
        SimDisplay::new(1, "Primary", Rect::new(0, 0, 1920, 1080))
            .with_mode(1920, 1080, 60_000, 1000)
            .with_mode(1280, 720, 60_000, 1000),
        SimDisplay::new(2, "Secondary", Rect::new(1920, 0, 2560, 1440))
            .with_mode(2560, 1440, 144_000, 1000),
    ])
}

fn windowed(x: i32, y: i32, width: i32, height: i32) -> DisplaySettings {
    DisplaySettings {
        x,
        y,
        width,
        height,
        ..DisplaySettings::default()
    }
}

fn windowed_mode(x: i32, y: i32, width: i32, height: i32) -> VideoModeSettings {
    VideoModeSettings {
        display_mode: DisplayMode::Windowed,
        display_id: 0,
        display_settings: windowed(x, y, width, height),
    }
}

fn borderless_on(display_id: u32) -> VideoModeSettings {
    VideoModeSettings {
        display_mode: DisplayMode::BorderlessFullscreen,
        display_id,
        ..VideoModeSettings::default()
    }
}

// ── DisplayMode / DisplaySettings ─────────────────────────────────────────────

#[test]
fn display_mode_codes() {
    for mode in DisplayMode::ALL {
        assert_eq!(DisplayMode::try_from(mode.code()), Ok(mode));
    }
    assert_eq!(DisplayMode::BorderlessFullscreen.code(), 2);
    assert_eq!(
        DisplayMode::try_from(7),
        Err(TransitionError::UnknownDisplayMode(7))
    );
}

#[test]
fn display_settings_equality_ignores_float_rate() {
    let a = sim_mode(1920, 1080, 60_000, 1001);
    let mut b = a;
    b.refresh_rate = 60.0;
    assert_eq!(a, b);
    b.refresh_rate_denominator = 1000;
    assert_ne!(a, b);
}

#[test]
fn resolution_label_format() {
    assert_eq!(
        sim_mode(1920, 1080, 60_000, 1001).resolution_label(),
        "1920x1080 @ 59.94Hz"
    );
}

#[test]
fn pixel_format_from_bit_depth() {
    assert_eq!(PixelFormat::from_bit_depth(32), PixelFormat::XRGB8888);
    assert_eq!(PixelFormat::from_bit_depth(16), PixelFormat::RGB565);
    assert_eq!(PixelFormat::from_bit_depth(12), PixelFormat::UNKNOWN);
}

// ── Reading live state ────────────────────────────────────────────────────────

#[test]
fn read_current_windowed() {
    let p = SimPlatform::single_display();
    let current = read_current(&p);
    assert_eq!(current.display_mode, DisplayMode::Windowed);
    assert_eq!(current.display_id, 1);
    assert_eq!(current.display_settings, windowed(100, 100, 800, 600));
    assert_eq!(current.display_settings.refresh_rate_numerator, 0);
}

#[test]
fn read_current_reports_bound_mode() {
    let mut p = SimPlatform::single_display();
    let target = VideoModeSettings::fullscreen(1, sim_mode(1280, 720, 60_000, 1000));
    apply(&mut p, &target).unwrap();

    let current = read_current(&p);
    assert_eq!(current_display_mode(&p), DisplayMode::Fullscreen);
    assert_eq!(current, target);
    assert_eq!(current.display_settings.pixel_format, PixelFormat::XRGB8888);
}

// ── Windowed clamping ─────────────────────────────────────────────────────────

#[test]
fn clamp_pulls_far_off_screen_window_back() {
    let p = SimPlatform::single_display();
    let rect = clamp_windowed_rect(&p, &windowed(-50_000, -50_000, 800, 600));
    assert_eq!(rect, Rect::new(0, 1, 800, 600));
}

#[test]
fn clamp_keeps_title_bar_below_usable_top() {
    let p = SimPlatform::new(vec![
        SimDisplay::new(1, "Laptop", Rect::new(0, 0, 1440, 900))
            .with_usable(Rect::new(0, 25, 1440, 875)),
    ]);
    let rect = clamp_windowed_rect(&p, &windowed(200, 0, 800, 600));
    assert_eq!(rect, Rect::new(200, 26, 800, 600));
}

#[test]
fn clamp_shrinks_oversized_window() {
    let p = SimPlatform::single_display();
    let rect = clamp_windowed_rect(&p, &windowed(0, 0, 5000, 5000));
    assert_eq!(rect, Rect::new(0, 1, 1920, 1039));
}

#[test]
fn clamp_limits_dimensions() {
    let p = SimPlatform::new(Vec::new());
    let rect = clamp_windowed_rect(&p, &windowed(5, 5, 1, 1_000_000));
    assert_eq!(rect, Rect::new(5, 5, MIN_WINDOW_DIMENSION, MAX_WINDOW_DIMENSION));
}

#[test]
fn clamp_centers_undefined_position() {
    let p = SimPlatform::single_display();
    let rect = clamp_windowed_rect(&p, &windowed(POSITION_UNDEFINED, POSITION_UNDEFINED, 800, 600));
    assert_eq!(rect, Rect::new(560, 220, 800, 600));
}

#[test]
fn clamp_uses_display_the_window_overlaps() {
    let p = two_displays();
    let rect = clamp_windowed_rect(&p, &windowed(4400, 1000, 800, 600));
    // Right edge of the secondary display, above its taskbar.
    assert_eq!(rect, Rect::new(3680, 800, 800, 600));
}

// ── Applying ──────────────────────────────────────────────────────────────────

#[test]
fn apply_same_mode_makes_no_calls() {
    let mut p = two_displays();
    let live = read_current(&p);
    assert_eq!(apply(&mut p, &live), Ok(()));
    assert_eq!(p.mutation_count(), 0);

    apply(&mut p, &borderless_on(2)).unwrap();
    p.clear_calls();
    let live = read_current(&p);
    assert_eq!(apply(&mut p, &live), Ok(()));
    assert_eq!(p.mutation_count(), 0);

    apply(&mut p, &VideoModeSettings::fullscreen(1, sim_mode(1920, 1080, 60_000, 1000))).unwrap();
    p.clear_calls();
    let live = read_current(&p);
    assert_eq!(apply(&mut p, &live), Ok(()));
    assert_eq!(p.mutation_count(), 0);
}

#[test]
fn apply_windowed_call_order() {
    let mut p = SimPlatform::single_display();
    apply(&mut p, &windowed_mode(300, 200, 1024, 768)).unwrap();
    assert_eq!(
        p.calls(),
        [
            "set_fullscreen",
            "set_bordered",
            "restore",
            "set_fullscreen_mode",
            "set_position",
            "set_size",
            "sync",
        ]
    );
    assert_eq!(p.window_position(), (300, 200));
    assert_eq!(p.window_size(), (1024, 768));
}

#[test]
fn apply_windowed_maximized() {
    let mut p = SimPlatform::single_display();
    let mut target = windowed_mode(300, 200, 1024, 768);
    target.display_settings.maximized = true;
    apply(&mut p, &target).unwrap();

    assert!(p.calls().contains(&"maximize"));
    assert!(p.is_maximized());
    assert_eq!(p.window_size(), (1920, 1040));
}

#[test]
fn apply_windowed_leaves_fullscreen() {
    let mut p = SimPlatform::single_display();
    apply(&mut p, &VideoModeSettings::fullscreen(1, sim_mode(1280, 720, 60_000, 1000))).unwrap();
    apply(&mut p, &windowed_mode(100, 100, 640, 480)).unwrap();

    assert!(!p.is_fullscreen());
    assert!(p.is_bordered());
    assert_eq!(p.window_fullscreen_mode(), None);
    assert_eq!(read_current(&p).display_settings, windowed(100, 100, 640, 480));
}

#[test]
fn apply_fullscreen_binds_matching_mode() {
    let mut p = SimPlatform::single_display();
    // A rate the display no longer offers still finds the resolution.
    let mut desired = sim_mode(1920, 1080, 59_940, 1000);
    desired.pixel_format = PixelFormat::UNKNOWN;
    apply(&mut p, &VideoModeSettings::fullscreen(1, desired)).unwrap();

    assert_eq!(p.calls(), ["set_fullscreen", "sync", "set_fullscreen_mode"]);
    assert_eq!(
        p.window_fullscreen_mode(),
        Some(sim_mode(1920, 1080, 60_000, 1000))
    );
}

#[test]
fn apply_fullscreen_unresolved_display_uses_primary() {
    let mut p = two_displays();
    apply(&mut p, &VideoModeSettings::fullscreen(0, sim_mode(1280, 720, 60_000, 1000))).unwrap();
    assert_eq!(read_current(&p).display_id, 1);
    assert_eq!(p.window_size(), (1280, 720));
}

#[test]
fn apply_fullscreen_without_modes_fails_untouched() {
    let mut p = SimPlatform::new(vec![SimDisplay::new(1, "Virtual", Rect::new(0, 0, 1024, 768))]);
    let result = apply(&mut p, &VideoModeSettings::fullscreen(1, sim_mode(1024, 768, 60, 1)));
    assert_eq!(result, Err(TransitionError::NoFullscreenModes(1)));
    assert_eq!(p.mutation_count(), 0);
}

#[test]
fn apply_fullscreen_without_match_fails_untouched() {
    let mut p = SimPlatform::single_display();
    let result = apply(&mut p, &VideoModeSettings::fullscreen(1, sim_mode(1024, 768, 60_000, 1000)));
    assert_eq!(
        result,
        Err(TransitionError::NoMatchingMode {
            display: 1,
            width: 1024,
            height: 768
        })
    );
    assert_eq!(p.mutation_count(), 0);
    assert!(!p.is_fullscreen());
}

#[test]
fn apply_fullscreen_rejected_by_platform() {
    let mut p = SimPlatform::single_display();
    p.reject_fullscreen = true;
    let result = apply(&mut p, &VideoModeSettings::fullscreen(1, sim_mode(1920, 1080, 60_000, 1000)));
    assert!(matches!(result, Err(TransitionError::PlatformRejected(_))));

    p.reject_fullscreen = false;
    p.reject_modes = true;
    let result = apply(&mut p, &VideoModeSettings::fullscreen(1, sim_mode(1920, 1080, 60_000, 1000)));
    assert!(matches!(result, Err(TransitionError::PlatformRejected(_))));
}

#[test]
fn apply_borderless_call_order() {
    let mut p = SimPlatform::single_display();
    apply(&mut p, &borderless_on(1)).unwrap();
    assert_eq!(
        p.calls(),
        [
            "set_fullscreen",
            "set_position",
            "set_bordered",
            "set_fullscreen",
            "set_fullscreen_mode",
            "sync",
        ]
    );
    assert!(p.is_fullscreen());
    assert!(!p.is_bordered());
    assert_eq!(current_display_mode(&p), DisplayMode::BorderlessFullscreen);
    assert_eq!(p.window_size(), (1920, 1080));
}

#[test]
fn apply_borderless_moves_to_other_display() {
    let mut p = two_displays();
    apply(&mut p, &borderless_on(2)).unwrap();
    assert_eq!(p.window_display(), 2);
    assert_eq!(p.window_position(), (1920, 0));
    assert_eq!(p.window_size(), (2560, 1440));
}

#[test]
fn apply_borderless_unknown_display_skips_move() {
    let mut p = SimPlatform::single_display();
    apply(&mut p, &borderless_on(9)).unwrap();
    assert!(!p.calls().contains(&"set_position"));
    assert!(p.is_fullscreen());
}

#[test]
fn apply_borderless_rejected_by_platform() {
    let mut p = SimPlatform::single_display();
    p.reject_fullscreen = true;
    assert!(matches!(
        apply(&mut p, &borderless_on(1)),
        Err(TransitionError::PlatformRejected(_))
    ));
}
