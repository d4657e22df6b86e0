pub mod desktop;
pub mod sim;

pub use desktop::{PositionRequests, WinitPlatform};
pub use sim::{SimDisplay, SimPlatform};

use crate::display::DisplayId;
use crate::geometry::Rect;
use crate::window::{DisplaySettings, VideoModeSettings};

/// Read-only queries over the connected displays.
///
/// Every call reflects the platform at the moment it is made; displays can be
/// hot-plugged between calls, so results must not be cached across decisions.
pub trait DisplayBackend {
    /// Ids of all connected displays in platform order.  Empty when the
    /// platform cannot enumerate.
    fn display_ids(&self) -> Vec<DisplayId>;

    /// Human-readable name, if the platform reports one.
    fn display_name(&self, id: DisplayId) -> Option<String>;

    /// Primary display id, or `0` when there is none.
    fn primary_display(&self) -> DisplayId;

    /// Full desktop area of a display.
    fn display_bounds(&self, id: DisplayId) -> Option<Rect>;

    /// Desktop area minus OS furniture (taskbars, docks).
    fn display_usable_bounds(&self, id: DisplayId) -> Option<Rect>;

    /// Display a rectangle lives on, or `0` if undeterminable.
    fn display_for_rect(&self, rect: &Rect) -> DisplayId;

    /// Raw fullscreen modes supported by a display.  Empty when the display
    /// is virtual, disconnected, or unknown.
    fn fullscreen_modes(&self, id: DisplayId) -> Vec<DisplaySettings>;
}

/// The single application window.
///
/// Queries read live window state; mutations are requests that the platform
/// may honour asynchronously until `sync` is called.
pub trait WindowBackend: DisplayBackend {
    fn window_display(&self) -> DisplayId;
    fn window_position(&self) -> (i32, i32);
    fn window_size(&self) -> (i32, i32);
    fn is_fullscreen(&self) -> bool;
    fn is_maximized(&self) -> bool;

    /// The exclusive mode bound to the window, if any.  A fullscreen window
    /// without a bound mode is borderless.
    fn window_fullscreen_mode(&self) -> Option<DisplaySettings>;

    /// Returns `false` if the platform refused.
    fn set_fullscreen(&mut self, fullscreen: bool) -> bool;
    fn set_bordered(&mut self, bordered: bool);
    /// Un-maximize and un-minimize.
    fn restore(&mut self);
    fn maximize(&mut self);
    /// Bind (or with `None`, clear) the exclusive mode.  Returns `false` if
    /// the platform refused.
    fn set_fullscreen_mode(&mut self, mode: Option<&VideoModeSettings>) -> bool;
    fn set_position(&mut self, x: i32, y: i32);
    fn set_size(&mut self, width: i32, height: i32);
    /// Block until pending window changes have taken effect.
    fn sync(&mut self);
}
