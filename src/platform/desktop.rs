//! winit-backed displays and window.
//!
//! winit has no notion of a "fullscreen flag" separate from the bound mode,
//! so the two are tracked here and folded into a single
//! `Fullscreen::Exclusive` / `Fullscreen::Borderless` request.

use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::monitor::{MonitorHandle, VideoModeHandle};
use winit::window::{Fullscreen, Window};

use super::{DisplayBackend, WindowBackend};
use crate::display::{DisplayId, UNRESOLVED_DISPLAY};
use crate::geometry::{self, Rect};
use crate::window::{DisplaySettings, PixelFormat, VideoModeSettings};

/// Denominator used for winit's millihertz refresh rates.
const MILLIHERTZ: i32 = 1000;

/// Displays and window of a running winit application.
///
/// Display ids are 1-based positions in `available_monitors()`.  They are
/// stable only while the set of monitors is; the display memo exists for
/// exactly that reason.
pub struct WinitPlatform {
    window: Arc<Window>,
    fullscreen: bool,
    /// Exclusive mode to use while fullscreen; `None` means borderless.
    mode: Option<VideoModeSettings>,
    positions: PositionRequests,
}

/// Window moves requested through [`WindowBackend::set_position`].
///
/// winit applies moves asynchronously and Wayland never reports a window
/// position, so the last request stands in for the real one.  A move is only
/// *pending* until the next `sync`; after that the window's own monitor is
/// authoritative again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionRequests {
    last: Option<(i32, i32)>,
    pending: Option<(i32, i32)>,
}

impl PositionRequests {
    pub fn request(&mut self, x: i32, y: i32) {
        self.last = Some((x, y));
        self.pending = Some((x, y));
    }

    /// Requested since the last [`synced`](Self::synced).
    pub fn pending(&self) -> Option<(i32, i32)> {
        self.pending
    }

    pub fn synced(&mut self) {
        self.pending = None;
    }

    /// Position to report given what the platform said, if anything.
    pub fn reported(&self, actual: Option<(i32, i32)>) -> (i32, i32) {
        actual.or(self.last).unwrap_or((0, 0))
    }
}

impl WinitPlatform {
    pub fn new(window: Arc<Window>) -> Self {
        let mut platform = Self {
            window,
            fullscreen: false,
            mode: None,
            positions: PositionRequests::default(),
        };
        match platform.window.fullscreen() {
            Some(Fullscreen::Exclusive(handle)) => {
                platform.fullscreen = true;
                platform.mode = platform.describe_handle(&handle);
            }
            Some(Fullscreen::Borderless(_)) => platform.fullscreen = true,
            None => {}
        }
        platform
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    fn monitors(&self) -> Vec<MonitorHandle> {
        self.window.available_monitors().collect()
    }

    fn monitor(&self, id: DisplayId) -> Option<MonitorHandle> {
        let index = (id as usize).checked_sub(1)?;
        self.monitors().into_iter().nth(index)
    }

    fn id_of(&self, monitor: &MonitorHandle) -> DisplayId {
        self.monitors()
            .iter()
            .position(|m| m == monitor)
            .map_or(UNRESOLVED_DISPLAY, |i| i as DisplayId + 1)
    }

    fn describe_handle(&self, handle: &VideoModeHandle) -> Option<VideoModeSettings> {
        let id = self.id_of(&handle.monitor());
        (id != UNRESOLVED_DISPLAY).then(|| {
            VideoModeSettings::fullscreen(id, describe_mode(handle, handle.monitor().scale_factor()))
        })
    }

    fn find_handle(&self, mode: &VideoModeSettings) -> Option<VideoModeHandle> {
        let monitor = self.monitor(mode.display_id)?;
        let density = monitor.scale_factor();
        monitor
            .video_modes()
            .find(|handle| describe_mode(handle, density) == mode.display_settings)
    }

    /// Monitor the window is (or is about to be) on.
    fn target_monitor(&self) -> Option<MonitorHandle> {
        match self.positions.pending() {
            Some((x, y)) => {
                let spot = Rect::new(x, y, 1, 1);
                self.monitor(self.display_for_rect(&spot))
            }
            None => self.window.current_monitor(),
        }
    }

    fn push_fullscreen(&mut self) -> bool {
        if !self.fullscreen {
            self.window.set_fullscreen(None);
            return true;
        }
        let request = match self.mode.as_ref() {
            Some(mode) => match self.find_handle(mode) {
                Some(handle) => Fullscreen::Exclusive(handle),
                None => return false,
            },
            None => Fullscreen::Borderless(self.target_monitor()),
        };
        self.window.set_fullscreen(Some(request));
        true
    }
}

fn monitor_rect(monitor: &MonitorHandle) -> Rect {
    let pos = monitor.position();
    let size = monitor.size();
    Rect::new(pos.x, pos.y, size.width as i32, size.height as i32)
}

fn describe_mode(handle: &VideoModeHandle, scale_factor: f64) -> DisplaySettings {
    let size = handle.size();
    let millihertz = handle.refresh_rate_millihertz();
    DisplaySettings {
        x: 0,
        y: 0,
        width: size.width as i32,
        height: size.height as i32,
        pixel_format: PixelFormat::from_bit_depth(handle.bit_depth()),
        pixel_density: scale_factor as f32,
        refresh_rate: millihertz as f32 / MILLIHERTZ as f32,
        refresh_rate_numerator: millihertz as i32,
        refresh_rate_denominator: MILLIHERTZ,
        ..DisplaySettings::default()
    }
}

impl DisplayBackend for WinitPlatform {
    fn display_ids(&self) -> Vec<DisplayId> {
        (1..=self.monitors().len() as DisplayId).collect()
    }

    fn display_name(&self, id: DisplayId) -> Option<String> {
        self.monitor(id)?.name()
    }

    fn primary_display(&self) -> DisplayId {
        match self.window.primary_monitor() {
            Some(primary) => self.id_of(&primary),
            // Some platforms (Wayland) have no notion of a primary monitor.
            None if !self.monitors().is_empty() => 1,
            None => UNRESOLVED_DISPLAY,
        }
    }

    fn display_bounds(&self, id: DisplayId) -> Option<Rect> {
        self.monitor(id).map(|m| monitor_rect(&m))
    }

    // winit does not expose the work area; the whole display is usable.
    fn display_usable_bounds(&self, id: DisplayId) -> Option<Rect> {
        self.display_bounds(id)
    }

    fn display_for_rect(&self, rect: &Rect) -> DisplayId {
        let rects = self
            .monitors()
            .iter()
            .enumerate()
            .map(|(i, m)| (i as DisplayId + 1, monitor_rect(m)))
            .collect::<Vec<_>>();
        geometry::display_for_rect(rect, rects)
    }

    fn fullscreen_modes(&self, id: DisplayId) -> Vec<DisplaySettings> {
        let Some(monitor) = self.monitor(id) else {
            return Vec::new();
        };
        let density = monitor.scale_factor();
        monitor
            .video_modes()
            .map(|handle| describe_mode(&handle, density))
            .collect()
    }
}

impl WindowBackend for WinitPlatform {
    fn window_display(&self) -> DisplayId {
        self.window
            .current_monitor()
            .map_or(UNRESOLVED_DISPLAY, |m| self.id_of(&m))
    }

    fn window_position(&self) -> (i32, i32) {
        let actual = self.window.outer_position().ok().map(|pos| (pos.x, pos.y));
        self.positions.reported(actual)
    }

    fn window_size(&self) -> (i32, i32) {
        let size = self.window.inner_size();
        (size.width as i32, size.height as i32)
    }

    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    fn is_maximized(&self) -> bool {
        self.window.is_maximized()
    }

    fn window_fullscreen_mode(&self) -> Option<DisplaySettings> {
        match self.window.fullscreen() {
            Some(Fullscreen::Exclusive(handle)) => {
                Some(describe_mode(&handle, handle.monitor().scale_factor()))
            }
            _ => None,
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        self.fullscreen = fullscreen;
        self.push_fullscreen()
    }

    fn set_bordered(&mut self, bordered: bool) {
        self.window.set_decorations(bordered);
    }

    fn restore(&mut self) {
        self.window.set_minimized(false);
        self.window.set_maximized(false);
    }

    fn maximize(&mut self) {
        self.window.set_maximized(true);
    }

    fn set_fullscreen_mode(&mut self, mode: Option<&VideoModeSettings>) -> bool {
        self.mode = mode.copied();
        if self.fullscreen {
            self.push_fullscreen()
        } else {
            mode.is_none_or(|m| self.find_handle(m).is_some())
        }
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.positions.request(x, y);
        self.window.set_outer_position(PhysicalPosition::new(x, y));
    }

    fn set_size(&mut self, width: i32, height: i32) {
        let size = PhysicalSize::new(width.max(1) as u32, height.max(1) as u32);
        // `None` means the resize arrives later as `WindowEvent::Resized`.
        let _ = self.window.request_inner_size(size);
    }

    // winit applies window requests on the event loop; nothing to flush.
    fn sync(&mut self) {
        self.positions.synced();
    }
}
