pub mod config;

pub use config::{DisplayMode, DisplaySettings, PixelFormat, POSITION_UNDEFINED, VideoModeSettings};

use tracing::{debug, info, warn};

use crate::display::{DisplayId, UNRESOLVED_DISPLAY, list_fullscreen_modes, select_best_match};
use crate::error::{Result, TransitionError};
use crate::geometry::Rect;
use crate::platform::{DisplayBackend, WindowBackend};

/// Smallest window edge the transitioner will create.
pub const MIN_WINDOW_DIMENSION: i32 = 10;
/// Largest window edge the transitioner will create.  Anything bigger comes
/// from a corrupted config and would wreck the render surface.
pub const MAX_WINDOW_DIMENSION: i32 = 20_000;

// ── Reading live state ────────────────────────────────────────────────────────

/// Mode the window is in right now, read from the platform.
pub fn current_display_mode(window: &impl WindowBackend) -> DisplayMode {
    if !window.is_fullscreen() {
        DisplayMode::Windowed
    } else if window.window_fullscreen_mode().is_some() {
        DisplayMode::Fullscreen
    } else {
        DisplayMode::BorderlessFullscreen
    }
}

/// Reconstruct the window's `VideoModeSettings` from live platform state.
///
/// Refresh rate and pixel format are only filled in while an exclusive mode
/// is bound; otherwise they are zero / unknown.
pub fn read_current(window: &impl WindowBackend) -> VideoModeSettings {
    let (x, y) = window.window_position();
    let (width, height) = window.window_size();
    let display_mode = current_display_mode(window);
    let mut display_settings = DisplaySettings {
        x,
        y,
        width,
        height,
        maximized: window.is_maximized(),
        ..DisplaySettings::default()
    };
    let bound_mode = match display_mode {
        DisplayMode::Fullscreen => window.window_fullscreen_mode(),
        _ => None,
    };
    if let Some(mode) = bound_mode {
        display_settings.pixel_format = mode.pixel_format;
        display_settings.pixel_density = mode.pixel_density;
        display_settings.refresh_rate = mode.refresh_rate;
        display_settings.refresh_rate_numerator = mode.refresh_rate_numerator;
        display_settings.refresh_rate_denominator = mode.refresh_rate_denominator;
    }
    VideoModeSettings {
        display_mode,
        display_id: window.window_display(),
        display_settings,
    }
}

// ── Applying ──────────────────────────────────────────────────────────────────

/// Apply `target` to `window`.
///
/// # Windowed
/// Clamps the requested rectangle onto the usable area of the display it
/// would occupy (see [`clamp_windowed_rect`]), leaves fullscreen, restores
/// decorations and un-maximizes, then positions and sizes the window and
/// re-maximizes if asked to.
///
/// # Fullscreen
/// Looks the requested mode up among the target display's current modes with
/// [`select_best_match`] and binds the winner.  Fails without touching the
/// window when the display has no modes or none match.
///
/// # Borderless
/// Moves the window onto the target display (leaving fullscreen first, since
/// a fullscreen window is not guaranteed to move across displays), removes
/// decorations and enters fullscreen without a bound mode.  Unknown display
/// bounds only skip the move.
///
/// A `target` equal to the live state is a no-op and makes no platform calls.
pub fn apply(window: &mut impl WindowBackend, target: &VideoModeSettings) -> Result<()> {
    if *target == read_current(window) {
        debug!(mode = target.display_mode.label(), "video mode unchanged, skipping");
        return Ok(());
    }
    match target.display_mode {
        DisplayMode::Windowed => {
            apply_windowed(window, &target.display_settings);
            Ok(())
        }
        DisplayMode::Fullscreen => apply_fullscreen(window, target),
        DisplayMode::BorderlessFullscreen => apply_borderless(window, target.display_id),
    }
}

fn resolve_display(backend: &impl DisplayBackend, display_id: DisplayId) -> DisplayId {
    if display_id == UNRESOLVED_DISPLAY {
        backend.primary_display()
    } else {
        display_id
    }
}

fn apply_windowed(window: &mut impl WindowBackend, settings: &DisplaySettings) {
    let rect = clamp_windowed_rect(window, settings);
    info!(x = rect.x, y = rect.y, w = rect.w, h = rect.h, "switching to windowed");

    window.set_fullscreen(false);
    window.set_bordered(true);
    window.restore();
    window.set_fullscreen_mode(None);
    window.set_position(rect.x, rect.y);
    window.set_size(rect.w, rect.h);
    if settings.maximized {
        window.maximize();
    }
    window.sync();
}

fn apply_fullscreen(window: &mut impl WindowBackend, target: &VideoModeSettings) -> Result<()> {
    let display_id = resolve_display(window, target.display_id);
    let available = list_fullscreen_modes(window, display_id);
    if available.is_empty() {
        return Err(TransitionError::NoFullscreenModes(display_id));
    }

    let desired = &target.display_settings;
    let mode = select_best_match(desired, &available).ok_or(TransitionError::NoMatchingMode {
        display: display_id,
        width: desired.width,
        height: desired.height,
    })?;

    info!(
        display_id,
        mode = %mode.display_settings.resolution_label(),
        "switching to fullscreen"
    );
    if !window.set_fullscreen(true) {
        return Err(TransitionError::PlatformRejected("entering fullscreen"));
    }
    window.sync();
    if !window.set_fullscreen_mode(Some(&mode)) {
        return Err(TransitionError::PlatformRejected("binding the fullscreen mode"));
    }
    Ok(())
}

fn apply_borderless(window: &mut impl WindowBackend, requested: DisplayId) -> Result<()> {
    let display_id = resolve_display(window, requested);
    match window.display_bounds(display_id) {
        Some(bounds) => {
            window.set_fullscreen(false);
            window.set_position(bounds.x, bounds.y);
        }
        None => warn!(display_id, "display bounds unavailable, not repositioning"),
    }

    info!(display_id, "switching to borderless fullscreen");
    window.set_bordered(false);
    if !window.set_fullscreen(true) {
        return Err(TransitionError::PlatformRejected("entering borderless fullscreen"));
    }
    window.set_fullscreen_mode(None);
    window.sync();
    Ok(())
}

// ── Geometry clamping ─────────────────────────────────────────────────────────

/// Keep a windowed rectangle usable no matter what the settings file said.
///
/// Width and height are clamped to
/// `[MIN_WINDOW_DIMENSION, MAX_WINDOW_DIMENSION]`.  The rectangle is then
/// pulled onto the usable bounds of the display it overlaps most (the primary
/// display if none, or if the position is undefined): horizontally fully
/// inside, vertically with the top edge at least 1px below the usable top so
/// the title bar stays reachable.  If it still overflows to the right or
/// bottom it is shrunk, never below the minimum dimension.  An undefined
/// position is centered.
///
/// Without any display information the size-clamped rectangle is returned
/// as-is.
pub fn clamp_windowed_rect(backend: &impl DisplayBackend, settings: &DisplaySettings) -> Rect {
    let w = settings.width.clamp(MIN_WINDOW_DIMENSION, MAX_WINDOW_DIMENSION);
    let h = settings.height.clamp(MIN_WINDOW_DIMENSION, MAX_WINDOW_DIMENSION);
    let x_undefined = settings.x == POSITION_UNDEFINED;
    let y_undefined = settings.y == POSITION_UNDEFINED;
    let mut rect = Rect::new(settings.x, settings.y, w, h);

    let mut display = if x_undefined || y_undefined {
        UNRESOLVED_DISPLAY
    } else {
        backend.display_for_rect(&rect)
    };
    if display == UNRESOLVED_DISPLAY {
        display = backend.primary_display();
    }
    let Some(usable) = (display != UNRESOLVED_DISPLAY)
        .then(|| backend.display_usable_bounds(display))
        .flatten()
    else {
        return rect;
    };

    if x_undefined {
        rect.x = usable.x + (usable.w - w) / 2;
    }
    if y_undefined {
        rect.y = usable.y + (usable.h - h) / 2;
    }

    let top = usable.y.saturating_add(1);
    rect.x = rect.x.clamp(usable.x, usable.x.max(usable.right() - rect.w));
    rect.y = rect.y.clamp(top, top.max(usable.bottom() - rect.h));

    if rect.right() > usable.right() {
        rect.w = (usable.right() - rect.x).max(MIN_WINDOW_DIMENSION);
    }
    if rect.bottom() > usable.bottom() {
        rect.h = (usable.bottom() - rect.y).max(MIN_WINDOW_DIMENSION);
    }
    rect
}
