//! Choosing a fullscreen mode from what a display actually offers.
//!
//! Persisted modes go stale (driver updates shift refresh fractions, a new
//! monitor lacks a pixel format), so matching degrades tier by tier instead of
//! rejecting the request outright.

use tracing::debug;

use super::DisplayId;
use super::catalog::list_fullscreen_modes;
use crate::platform::WindowBackend;
use crate::window::{DisplayMode, DisplaySettings, VideoModeSettings, read_current};

/// The mode with the largest width, then height, then refresh rate.
///
/// Ties keep the first candidate.  An empty list yields
/// `VideoModeSettings::default()`, which callers must treat as "no modes".
pub fn pick_best(modes: &[VideoModeSettings]) -> VideoModeSettings {
    let Some(first) = modes.first() else {
        return VideoModeSettings::default();
    };
    let mut best = first;
    for mode in &modes[1..] {
        let m = &mode.display_settings;
        let b = &best.display_settings;
        let better = m.width > b.width
            || (m.width == b.width && m.height > b.height)
            || (m.width == b.width && m.height == b.height && m.refresh_rate > b.refresh_rate);
        if better {
            best = mode;
        }
    }
    *best
}

/// Width, height, pixel format, pixel density and refresh fraction all equal.
pub fn is_exact_match(mode: &DisplaySettings, desired: &DisplaySettings) -> bool {
    is_resolution_and_refresh_match(mode, desired)
        && mode.pixel_format == desired.pixel_format
        && mode.pixel_density == desired.pixel_density
}

fn is_resolution_and_refresh_match(mode: &DisplaySettings, desired: &DisplaySettings) -> bool {
    is_resolution_match(mode, desired)
        && mode.refresh_rate_numerator == desired.refresh_rate_numerator
        && mode.refresh_rate_denominator == desired.refresh_rate_denominator
}

fn is_resolution_match(mode: &DisplaySettings, desired: &DisplaySettings) -> bool {
    mode.width == desired.width && mode.height == desired.height
}

/// Find the available mode closest to `desired`.
///
/// Tiers, first with any hit wins:
/// 1. exact (resolution, pixel format, pixel density, refresh fraction);
/// 2. resolution and refresh fraction;
/// 3. resolution only.
///
/// Within a tier the first candidate in `available` order wins.
pub fn select_best_match(
    desired: &DisplaySettings,
    available: &[VideoModeSettings],
) -> Option<VideoModeSettings> {
    let tiers: [fn(&DisplaySettings, &DisplaySettings) -> bool; 3] = [
        is_exact_match,
        is_resolution_and_refresh_match,
        is_resolution_match,
    ];
    for (tier, matches) in tiers.iter().enumerate() {
        if let Some(mode) = available
            .iter()
            .find(|mode| matches(&mode.display_settings, desired))
        {
            debug!(
                tier = tier + 1,
                mode = %mode.display_settings.resolution_label(),
                "matched fullscreen mode"
            );
            return Some(*mode);
        }
    }
    None
}

/// Best fullscreen mode for putting `window` on `display_id`.
///
/// When the window is already exclusive-fullscreen on that display, the mode
/// it currently uses is kept if the display still offers it, avoiding a
/// needless mode switch.  Otherwise the best mode by `pick_best`.
pub fn best_fullscreen_for(window: &impl WindowBackend, display_id: DisplayId) -> VideoModeSettings {
    let available = list_fullscreen_modes(window, display_id);
    let current = read_current(window);

    if current.display_mode == DisplayMode::Fullscreen && current.display_id == display_id {
        if let Some(mode) = available
            .iter()
            .find(|mode| is_exact_match(&mode.display_settings, &current.display_settings))
        {
            return *mode;
        }
    }

    pick_best(&available)
}
