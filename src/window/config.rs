use serde::{Deserialize, Serialize};

use crate::display::DisplayId;
use crate::error::TransitionError;

// ── DisplayMode ───────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
///
/// The discriminants are the integer codes stored in the settings file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum DisplayMode {
    /// Standard decorated window at the configured position and size.
    #[default]
    Windowed = 0,
    /// Exclusive fullscreen bound to one of the display's video modes.
    Fullscreen = 1,
    /// Undecorated fullscreen window at the display's desktop resolution.
    BorderlessFullscreen = 2,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Windowed,
        DisplayMode::Fullscreen,
        DisplayMode::BorderlessFullscreen,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Windowed => "Windowed",
            DisplayMode::Fullscreen => "Fullscreen",
            DisplayMode::BorderlessFullscreen => "Borderless Fullscreen",
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for DisplayMode {
    type Error = TransitionError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DisplayMode::Windowed),
            1 => Ok(DisplayMode::Fullscreen),
            2 => Ok(DisplayMode::BorderlessFullscreen),
            other => Err(TransitionError::UnknownDisplayMode(other)),
        }
    }
}

// ── PixelFormat ───────────────────────────────────────────────────────────────

/// Integer pixel format code of a fullscreen mode.
///
/// Platforms report formats with varying precision, so any code is accepted;
/// the named constants cover what the winit backend can distinguish.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelFormat(pub u32);

impl PixelFormat {
    pub const UNKNOWN: Self = Self(0);
    pub const RGB565: Self = Self(1);
    pub const RGB888: Self = Self(2);
    pub const XRGB8888: Self = Self(3);
    pub const XRGB2101010: Self = Self(4);

    /// Map a platform-reported bit depth onto a format code.
    pub fn from_bit_depth(bits: u16) -> Self {
        match bits {
            16 => Self::RGB565,
            24 => Self::RGB888,
            32 => Self::XRGB8888,
            30 => Self::XRGB2101010,
            _ => Self::UNKNOWN,
        }
    }
}

// ── DisplaySettings ───────────────────────────────────────────────────────────

/// Position value meaning "no preference": the transitioner centers the
/// window on the resolved display.
pub const POSITION_UNDEFINED: i32 = i32::MIN;

/// One concrete video mode or window geometry.
///
/// `width`/`height` are either both zero (unset) or both positive.
/// `refresh_rate` is informational; the exact rate is the
/// `refresh_rate_numerator / refresh_rate_denominator` fraction, and equality
/// ignores the float.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub maximized: bool,
    pub pixel_format: PixelFormat,
    pub pixel_density: f32,
    pub refresh_rate: f32,
    pub refresh_rate_numerator: i32,
    pub refresh_rate_denominator: i32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            x: POSITION_UNDEFINED,
            y: POSITION_UNDEFINED,
            width: 0,
            height: 0,
            maximized: false,
            pixel_format: PixelFormat::UNKNOWN,
            pixel_density: 1.0,
            refresh_rate: 0.0,
            refresh_rate_numerator: 0,
            refresh_rate_denominator: 0,
        }
    }
}

impl PartialEq for DisplaySettings {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
            && self.maximized == other.maximized
            && self.pixel_format == other.pixel_format
            && self.pixel_density == other.pixel_density
            && self.refresh_rate_numerator == other.refresh_rate_numerator
            && self.refresh_rate_denominator == other.refresh_rate_denominator
    }
}

impl DisplaySettings {
    /// `"<w>x<h> @ <rate>Hz"`, as shown in the resolution picker.
    pub fn resolution_label(&self) -> String {
        format!("{}x{} @ {:.2}Hz", self.width, self.height, self.refresh_rate)
    }

    /// True when both dimensions are set.
    pub fn has_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

// ── VideoModeSettings ─────────────────────────────────────────────────────────

/// What the window should look like: mode, display and geometry/mode.
///
/// `display_id == 0` means "unresolved, use the primary display".
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoModeSettings {
    pub display_mode: DisplayMode,
    pub display_id: DisplayId,
    pub display_settings: DisplaySettings,
}

impl VideoModeSettings {
    /// A fullscreen mode entry as reported by a display's mode list.
    pub fn fullscreen(display_id: DisplayId, display_settings: DisplaySettings) -> Self {
        Self {
            display_mode: DisplayMode::Fullscreen,
            display_id,
            display_settings,
        }
    }
}
