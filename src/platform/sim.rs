//! In-memory displays and window.
//!
//! Behaves like a desktop with a fixed set of monitors: fullscreen windows
//! cover their display, maximized windows cover the usable area, and every
//! mutation call is recorded so callers can assert on exactly what was done.

use super::{DisplayBackend, WindowBackend};
use crate::display::{DisplayId, UNRESOLVED_DISPLAY};
use crate::geometry::{self, Rect};
use crate::window::{DisplaySettings, PixelFormat, VideoModeSettings};

/// One simulated monitor.
#[derive(Clone, Debug)]
pub struct SimDisplay {
    pub id: DisplayId,
    /// `None` simulates a display the platform cannot name.
    pub name: Option<String>,
    pub bounds: Rect,
    pub usable: Rect,
    pub modes: Vec<DisplaySettings>,
}

impl SimDisplay {
    /// A display with a 40px taskbar along the bottom and no fullscreen modes.
    pub fn new(id: DisplayId, name: &str, bounds: Rect) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            bounds,
            usable: Rect::new(bounds.x, bounds.y, bounds.w, (bounds.h - 40).max(0)),
            modes: Vec::new(),
        }
    }

    pub fn with_usable(mut self, usable: Rect) -> Self {
        self.usable = usable;
        self
    }

    /// Add a fullscreen mode at `width × height`, `numerator / denominator` Hz.
    pub fn with_mode(mut self, width: i32, height: i32, numerator: i32, denominator: i32) -> Self {
        self.modes.push(sim_mode(width, height, numerator, denominator));
        self
    }
}

/// A 32-bit, density-1 fullscreen mode.
pub fn sim_mode(width: i32, height: i32, numerator: i32, denominator: i32) -> DisplaySettings {
    let refresh_rate = if denominator != 0 {
        numerator as f32 / denominator as f32
    } else {
        0.0
    };
    DisplaySettings {
        x: 0,
        y: 0,
        width,
        height,
        pixel_format: PixelFormat::XRGB8888,
        refresh_rate,
        refresh_rate_numerator: numerator,
        refresh_rate_denominator: denominator,
        ..DisplaySettings::default()
    }
}

/// Simulated desktop.  The first display is the primary one.
#[derive(Clone, Debug)]
pub struct SimPlatform {
    pub displays: Vec<SimDisplay>,
    /// Refuse every `set_fullscreen(true)`.
    pub reject_fullscreen: bool,
    /// Refuse every attempt to bind an exclusive mode.
    pub reject_modes: bool,
    position: (i32, i32),
    size: (i32, i32),
    fullscreen: bool,
    bordered: bool,
    maximized: bool,
    bound_mode: Option<VideoModeSettings>,
    calls: Vec<&'static str>,
}

impl SimPlatform {
    /// A decorated 800×600 window at `(100, 100)`.
    pub fn new(displays: Vec<SimDisplay>) -> Self {
        Self {
            displays,
            reject_fullscreen: false,
            reject_modes: false,
            position: (100, 100),
            size: (800, 600),
            fullscreen: false,
            bordered: true,
            maximized: false,
            bound_mode: None,
            calls: Vec::new(),
        }
    }

    /// One 1920×1080 display named "Primary" with 60 Hz and 144 Hz modes at
    /// two resolutions.
    pub fn single_display() -> Self {
        Self::new(vec![
            SimDisplay::new(1, "Primary", Rect::new(0, 0, 1920, 1080))
                .with_mode(1920, 1080, 60_000, 1000)
                .with_mode(1920, 1080, 144_000, 1000)
                .with_mode(1280, 720, 60_000, 1000),
        ])
    }

    /// Mutation calls made so far, in order.
    pub fn calls(&self) -> &[&'static str] {
        &self.calls
    }

    pub fn mutation_count(&self) -> usize {
        self.calls.len()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn is_bordered(&self) -> bool {
        self.bordered
    }

    /// Move and resize the window without recording a call, as if the user
    /// dragged it.
    pub fn place_window(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.position = (x, y);
        self.size = (width, height);
    }

    /// Remove a display, as if it was unplugged.
    pub fn unplug(&mut self, id: DisplayId) {
        self.displays.retain(|d| d.id != id);
    }

    fn display(&self, id: DisplayId) -> Option<&SimDisplay> {
        self.displays.iter().find(|d| d.id == id)
    }

    fn windowed_rect(&self) -> Rect {
        Rect::new(self.position.0, self.position.1, self.size.0, self.size.1)
    }

    /// Area the window actually covers given its flags.
    fn covered_rect(&self) -> Rect {
        let on = self.display_for_rect(&self.windowed_rect());
        let display = match self.bound_mode {
            Some(mode) if self.fullscreen => self.display(mode.display_id),
            _ => self.display(on),
        };
        match (display, self.fullscreen, self.bound_mode) {
            (Some(d), true, Some(mode)) => Rect::new(
                d.bounds.x,
                d.bounds.y,
                mode.display_settings.width,
                mode.display_settings.height,
            ),
            (Some(d), true, None) => d.bounds,
            (Some(d), false, _) if self.maximized => d.usable,
            _ => self.windowed_rect(),
        }
    }
}

impl DisplayBackend for SimPlatform {
    fn display_ids(&self) -> Vec<DisplayId> {
        self.displays.iter().map(|d| d.id).collect()
    }

    fn display_name(&self, id: DisplayId) -> Option<String> {
        self.display(id).and_then(|d| d.name.clone())
    }

    fn primary_display(&self) -> DisplayId {
        self.displays.first().map_or(UNRESOLVED_DISPLAY, |d| d.id)
    }

    fn display_bounds(&self, id: DisplayId) -> Option<Rect> {
        self.display(id).map(|d| d.bounds)
    }

    fn display_usable_bounds(&self, id: DisplayId) -> Option<Rect> {
        self.display(id).map(|d| d.usable)
    }

    fn display_for_rect(&self, rect: &Rect) -> DisplayId {
        geometry::display_for_rect(rect, self.displays.iter().map(|d| (d.id, d.bounds)))
    }

    fn fullscreen_modes(&self, id: DisplayId) -> Vec<DisplaySettings> {
        self.display(id).map(|d| d.modes.clone()).unwrap_or_default()
    }
}

impl WindowBackend for SimPlatform {
    fn window_display(&self) -> DisplayId {
        self.display_for_rect(&self.covered_rect())
    }

    fn window_position(&self) -> (i32, i32) {
        let r = self.covered_rect();
        (r.x, r.y)
    }

    fn window_size(&self) -> (i32, i32) {
        let r = self.covered_rect();
        (r.w, r.h)
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn is_maximized(&self) -> bool {
        self.maximized
    }

    fn window_fullscreen_mode(&self) -> Option<DisplaySettings> {
        self.bound_mode
            .filter(|_| self.fullscreen)
            .map(|mode| mode.display_settings)
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        self.calls.push("set_fullscreen");
        if fullscreen && self.reject_fullscreen {
            return false;
        }
        self.fullscreen = fullscreen;
        true
    }

    fn set_bordered(&mut self, bordered: bool) {
        self.calls.push("set_bordered");
        self.bordered = bordered;
    }

    fn restore(&mut self) {
        self.calls.push("restore");
        self.maximized = false;
    }

    fn maximize(&mut self) {
        self.calls.push("maximize");
        self.maximized = true;
    }

    fn set_fullscreen_mode(&mut self, mode: Option<&VideoModeSettings>) -> bool {
        self.calls.push("set_fullscreen_mode");
        match mode {
            None => {
                self.bound_mode = None;
                true
            }
            Some(_) if self.reject_modes => false,
            Some(mode) => {
                let offered = self
                    .display(mode.display_id)
                    .is_some_and(|d| d.modes.iter().any(|m| *m == mode.display_settings));
                if offered {
                    self.bound_mode = Some(*mode);
                }
                offered
            }
        }
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.calls.push("set_position");
        self.position = (x, y);
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.calls.push("set_size");
        self.size = (width, height);
    }

    fn sync(&mut self) {
        self.calls.push("sync");
    }
}
