pub mod catalog;
pub mod matcher;
pub mod memo;

pub use catalog::{display_info, find_display_by_name, list_displays, list_fullscreen_modes};
pub use matcher::{best_fullscreen_for, pick_best, select_best_match};
pub use memo::{DisplayIdMemo, resolve};

use serde::{Deserialize, Serialize};

/// Opaque platform display handle.  `0` means unresolved.
pub type DisplayId = u32;

/// Sentinel id for "no display / use the primary one".
pub const UNRESOLVED_DISPLAY: DisplayId = 0;

/// Name used when the platform does not report one, and by the memo sentinel.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown Display";

/// A connected display, valid for the query that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub id: DisplayId,
    pub name: String,
}

impl DisplayInfo {
    /// Durable stand-in for this display, for the settings file.
    pub fn to_memo(&self) -> DisplayIdMemo {
        DisplayIdMemo {
            id: self.id,
            name: self.name.clone(),
        }
    }
}
