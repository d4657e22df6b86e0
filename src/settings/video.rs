//! Mapping between the live window's video mode and the persisted settings.

use tracing::info;

use super::Settings;
use crate::display::{display_info, resolve};
use crate::error::Result;
use crate::platform::{DisplayBackend, WindowBackend};
use crate::window::{self, DisplayMode, DisplaySettings, PixelFormat, VideoModeSettings};

/// Record the window's current video mode into `settings`.
///
/// Only the group belonging to the current mode is touched, so the last
/// windowed geometry survives a session spent in fullscreen.  Fullscreen
/// fields are written only while an exclusive mode is actually bound.
pub fn save_window_video_settings(settings: &mut Settings, window: &impl WindowBackend) {
    let current = window::read_current(window);
    settings.display_mode = current.display_mode.code();

    match current.display_mode {
        DisplayMode::Windowed => {
            let ds = &current.display_settings;
            settings.windowed_x = ds.x;
            settings.windowed_y = ds.y;
            settings.windowed_width = ds.width;
            settings.windowed_height = ds.height;
            settings.windowed_maximized = ds.maximized;
        }
        DisplayMode::Fullscreen => {
            if let Some(mode) = window.window_fullscreen_mode() {
                settings.fullscreen_width = mode.width;
                settings.fullscreen_height = mode.height;
                settings.fullscreen_refresh_rate_numerator = mode.refresh_rate_numerator;
                settings.fullscreen_refresh_rate_denominator = mode.refresh_rate_denominator;
                settings.fullscreen_pixel_format = mode.pixel_format.0;
                settings.fullscreen_pixel_density = mode.pixel_density;
                settings.fullscreen_display = display_info(window, current.display_id).to_memo();
            }
        }
        DisplayMode::BorderlessFullscreen => {
            settings.fullscreen_display = display_info(window, current.display_id).to_memo();
        }
    }
}

/// Build the `VideoModeSettings` the persisted settings ask for, resolving
/// the display memo against the displays connected right now.
///
/// Fails only on an unknown `display_mode` code.
pub fn video_mode_from_settings(
    settings: &Settings,
    backend: &impl DisplayBackend,
) -> Result<VideoModeSettings> {
    let display_mode = DisplayMode::try_from(settings.display_mode)?;
    let mut target = VideoModeSettings {
        display_mode,
        ..VideoModeSettings::default()
    };

    match display_mode {
        DisplayMode::Windowed => {
            target.display_settings = DisplaySettings {
                x: settings.windowed_x,
                y: settings.windowed_y,
                width: settings.windowed_width,
                height: settings.windowed_height,
                maximized: settings.windowed_maximized,
                ..DisplaySettings::default()
            };
        }
        DisplayMode::Fullscreen => {
            target.display_settings = DisplaySettings {
                width: settings.fullscreen_width,
                height: settings.fullscreen_height,
                refresh_rate_numerator: settings.fullscreen_refresh_rate_numerator,
                refresh_rate_denominator: settings.fullscreen_refresh_rate_denominator,
                pixel_format: PixelFormat(settings.fullscreen_pixel_format),
                pixel_density: settings.fullscreen_pixel_density,
                ..DisplaySettings::default()
            };
            target.display_id = resolve(backend, &settings.fullscreen_display);
        }
        DisplayMode::BorderlessFullscreen => {
            target.display_id = resolve(backend, &settings.fullscreen_display);
        }
    }
    Ok(target)
}

/// Apply the persisted video mode to `window`.
pub fn load_window_video_settings(settings: &Settings, window: &mut impl WindowBackend) -> Result<()> {
    let target = video_mode_from_settings(settings, window)?;
    info!(
        mode = target.display_mode.label(),
        display_id = target.display_id,
        "restoring saved video mode"
    );
    window::apply(window, &target)
}
