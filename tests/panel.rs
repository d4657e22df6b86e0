use std::time::{Duration, Instant};

use modeset::confirm::{PopupInput, Verdict};
use modeset::geometry::Rect;
use modeset::panel::*;
use modeset::platform::sim::sim_mode;
use modeset::platform::{SimDisplay, SimPlatform, WindowBackend};
use modeset::settings::Settings;
use modeset::window::{DisplayMode, read_current};

const HIDDEN: PopupInput = PopupInput {
    open: false,
    keep: false,
    revert: false,
};
const SHOWN: PopupInput = PopupInput {
    open: true,
    keep: false,
    revert: false,
};

fn opened(p: &SimPlatform) -> VideoSettingsPanel {
    let mut panel = VideoSettingsPanel::new();
    panel.open(p);
    panel
}

#[test]
fn open_mirrors_live_window() {
    let p = SimPlatform::single_display();
    let panel = opened(&p);
    assert_eq!(*panel.edited(), read_current(&p));
    assert!(!panel.shows_display_picker());
    assert!(!panel.shows_resolution_picker());
}

#[test]
fn display_mode_options_mark_selection() {
    let p = SimPlatform::single_display();
    let panel = opened(&p);
    let options = panel.display_mode_options();
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["Windowed", "Fullscreen", "Borderless Fullscreen"]);
    assert!(options[0].selected);
    assert!(!options[1].selected);
}

#[test]
fn choosing_fullscreen_picks_best_mode() {
    let p = SimPlatform::single_display();
    let mut panel = opened(&p);
    panel.select_display_mode(&p, DisplayMode::Fullscreen);

    assert!(panel.shows_display_picker());
    assert!(panel.shows_resolution_picker());
    assert_eq!(panel.edited().display_settings, sim_mode(1920, 1080, 144_000, 1000));
    assert_eq!(panel.resolution_label(), "1920x1080 @ 144.00Hz");

    let options = panel.resolution_options(&p);
    assert_eq!(options.len(), 3);
    assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    assert!(options[1].selected);
}

#[test]
fn changing_display_repicks_mode() {
    let p = SimPlatform::new(vec![
        SimDisplay::new(1, "Primary", Rect::new(0, 0, 1920, 1080)).with_mode(1920, 1080, 60, 1),
        SimDisplay::new(2, "Projector", Rect::new(1920, 0, 1024, 768)).with_mode(1024, 768, 60, 1),
    ]);
    let mut panel = opened(&p);
    panel.select_display_mode(&p, DisplayMode::Fullscreen);
    panel.select_display(&p, 2);

    assert_eq!(panel.current_display(&p).name, "Projector");
    assert_eq!(panel.edited().display_settings.width, 1024);
    let displays = panel.display_options(&p);
    assert_eq!(displays.len(), 2);
    assert!(displays[1].selected);
}

#[test]
fn set_without_changes_does_nothing() {
    let mut p = SimPlatform::single_display();
    let mut panel = opened(&p);
    assert!(!panel.press_set(&mut p, &Settings::default(), Instant::now()));
    assert_eq!(p.mutation_count(), 0);
    assert!(!panel.confirmation().is_pending());
}

#[test]
fn set_then_keep_saves() {
    let mut p = SimPlatform::single_display();
    let mut settings = Settings::default();
    let mut panel = opened(&p);
    panel.select_display_mode(&p, DisplayMode::Fullscreen);
    panel.select_resolution(sim_mode(1280, 720, 60_000, 1000));

    let t0 = Instant::now();
    assert!(panel.press_set(&mut p, &settings, t0));
    assert!(panel.confirmation().is_pending());
    assert_eq!(p.window_size(), (1280, 720));

    assert_eq!(panel.tick(&mut p, &mut settings, t0, HIDDEN), Verdict::Continue);
    assert!(panel.confirmation().wants_popup());
    let keep = PopupInput { keep: true, ..SHOWN };
    assert_eq!(
        panel.tick(&mut p, &mut settings, t0 + Duration::from_secs(2), keep),
        Verdict::Keep
    );

    assert_eq!(settings.display_mode, DisplayMode::Fullscreen.code());
    assert_eq!(settings.fullscreen_width, 1280);
    assert_eq!(*panel.edited(), read_current(&p));
}

#[test]
fn set_then_timeout_reverts() {
    let mut p = SimPlatform::single_display();
    let mut settings = Settings::default();
    let mut panel = opened(&p);
    let before = read_current(&p);
    panel.select_display_mode(&p, DisplayMode::BorderlessFullscreen);

    let t0 = Instant::now();
    assert!(panel.press_set(&mut p, &settings, t0));
    assert!(p.is_fullscreen());

    panel.tick(&mut p, &mut settings, t0, HIDDEN);
    let verdict = panel.tick(&mut p, &mut settings, t0 + Duration::from_secs(10), SHOWN);
    assert_eq!(verdict, Verdict::Revert(before));
    assert_eq!(read_current(&p), before);
    assert_eq!(settings, Settings::default());
    assert_eq!(panel.edited().display_mode, DisplayMode::Windowed);
}

#[test]
fn failed_set_does_not_start_confirmation() {
    let mut p = SimPlatform::single_display();
    p.reject_fullscreen = true;
    let mut panel = opened(&p);
    panel.select_display_mode(&p, DisplayMode::Fullscreen);
    assert!(!panel.press_set(&mut p, &Settings::default(), Instant::now()));
    assert!(!panel.confirmation().is_pending());
}

#[test]
fn back_to_windowed_restores_saved_geometry() {
    let mut p = SimPlatform::single_display();
    let settings = Settings {
        windowed_x: 50,
        windowed_y: 60,
        windowed_width: 1024,
        windowed_height: 768,
        ..Settings::default()
    };
    let mut panel = opened(&p);
    panel.select_display_mode(&p, DisplayMode::Fullscreen);
    assert!(panel.press_set(&mut p, &settings, Instant::now()));

    // The user keeps it, then later goes back.
    let mut panel = opened(&p);
    panel.select_display_mode(&p, DisplayMode::Windowed);
    let target = panel.merged_target(&p, &settings);
    assert_eq!(target.display_settings.width, 1024);

    assert!(panel.press_set(&mut p, &settings, Instant::now()));
    assert_eq!(p.window_position(), (50, 60));
    assert_eq!(p.window_size(), (1024, 768));
}

#[test]
fn second_set_while_pending_is_refused() {
    let mut p = SimPlatform::single_display();
    let mut settings = Settings::default();
    let mut panel = opened(&p);
    let before = read_current(&p);

    let t0 = Instant::now();
    panel.select_display_mode(&p, DisplayMode::Fullscreen);
    assert!(panel.press_set(&mut p, &settings, t0));
    let calls = p.mutation_count();

    panel.select_display_mode(&p, DisplayMode::BorderlessFullscreen);
    assert!(!panel.press_set(&mut p, &settings, t0 + Duration::from_secs(1)));
    assert_eq!(p.mutation_count(), calls);
    assert!(p.window_fullscreen_mode().is_some());

    panel.tick(&mut p, &mut settings, t0 + Duration::from_secs(1), HIDDEN);
    let verdict = panel.tick(&mut p, &mut settings, t0 + Duration::from_secs(30), SHOWN);
    assert_eq!(verdict, Verdict::Revert(before));
    assert_eq!(read_current(&p).display_mode, DisplayMode::Windowed);
    assert_eq!(read_current(&p), before);
}
