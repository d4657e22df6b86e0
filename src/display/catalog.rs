//! Enumeration of connected displays and their fullscreen modes.
//!
//! Everything here is a pure query over the backend.  Results are rebuilt on
//! every call and must not be kept past the decision they were fetched for.

use super::{DisplayId, DisplayInfo, UNKNOWN_DISPLAY_NAME, UNRESOLVED_DISPLAY};
use crate::platform::DisplayBackend;
use crate::window::VideoModeSettings;

/// Name and id of one display.  Unnamed (or unknown) displays are reported
/// as `"Unknown Display"`.
pub fn display_info(backend: &impl DisplayBackend, id: DisplayId) -> DisplayInfo {
    DisplayInfo {
        id,
        name: backend
            .display_name(id)
            .unwrap_or_else(|| UNKNOWN_DISPLAY_NAME.to_string()),
    }
}

/// All connected displays in platform order.
pub fn list_displays(backend: &impl DisplayBackend) -> Vec<DisplayInfo> {
    backend
        .display_ids()
        .into_iter()
        .map(|id| display_info(backend, id))
        .collect()
}

/// Every fullscreen mode `display_id` supports, tagged `Fullscreen` with that
/// display.  Empty means the display offers no exclusive modes.
pub fn list_fullscreen_modes(
    backend: &impl DisplayBackend,
    display_id: DisplayId,
) -> Vec<VideoModeSettings> {
    backend
        .fullscreen_modes(display_id)
        .into_iter()
        .map(|mode| VideoModeSettings::fullscreen(display_id, mode))
        .collect()
}

/// First display whose name equals `name` exactly, or `0`.
pub fn find_display_by_name(backend: &impl DisplayBackend, name: &str) -> DisplayId {
    list_displays(backend)
        .into_iter()
        .find(|info| info.name == name)
        .map_or(UNRESOLVED_DISPLAY, |info| info.id)
}
