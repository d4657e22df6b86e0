pub mod properties;
pub mod video;

pub use properties::{Property, read_properties, write_properties};
pub use video::{load_window_video_settings, save_window_video_settings, video_mode_from_settings};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::display::DisplayIdMemo;
use crate::error::SettingsError;
use crate::window::POSITION_UNDEFINED;

// ── Value ─────────────────────────────────────────────────────────────────────

/// A setting value as stored on disk, converted on access.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Value(String);

impl Value {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true`, `yes`, `on` (any case) or a non-zero integer.
    pub fn as_bool(&self) -> Option<bool> {
        match self.0.to_lowercase().as_str() {
            "true" | "yes" | "on" => Some(true),
            "false" | "no" | "off" => Some(false),
            _ => self.as_i64().map(|v| v != 0),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.0.trim().parse().ok()
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.0.trim().parse().ok()
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.0.trim().parse().ok().filter(|v: &f32| v.is_finite())
    }

    /// `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn as_color(&self) -> Option<[f32; 4]> {
        let hex = self.0.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            let byte = u8::from_str_radix(hex.get(i * 2..i * 2 + 2)?, 16).ok()?;
            Some(byte as f32 / 255.0)
        };
        let alpha = if hex.len() == 8 { channel(3)? } else { 1.0 };
        Some([channel(0)?, channel(1)?, channel(2)?, alpha])
    }

    pub fn as_display_memo(&self) -> DisplayIdMemo {
        DisplayIdMemo::decode(&self.0)
    }

    pub fn from_color(color: [f32; 4]) -> Self {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self(format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(color[0]),
            byte(color[1]),
            byte(color[2]),
            byte(color[3])
        ))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self(b.to_string())
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self(i.to_string())
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self(i.to_string())
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self(f.to_string())
    }
}

impl From<&DisplayIdMemo> for Value {
    fn from(memo: &DisplayIdMemo) -> Self {
        Self(memo.encode())
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Everything the harness persists between runs.
///
/// The `windowed_*` and `fullscreen_*` groups are kept independently so that
/// switching back to windowed mode restores the last windowed geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub display_mode: i32,
    pub windowed_x: i32,
    pub windowed_y: i32,
    pub windowed_width: i32,
    pub windowed_height: i32,
    pub windowed_maximized: bool,
    pub fullscreen_width: i32,
    pub fullscreen_height: i32,
    pub fullscreen_refresh_rate_numerator: i32,
    pub fullscreen_refresh_rate_denominator: i32,
    pub fullscreen_pixel_format: u32,
    pub fullscreen_pixel_density: f32,
    pub fullscreen_display: DisplayIdMemo,

    pub show_fps: bool,
    pub show_settings_at_start: bool,
    pub target_fps: f32,
    pub background_color: [f32; 4],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_mode: 0,
            windowed_x: POSITION_UNDEFINED,
            windowed_y: POSITION_UNDEFINED,
            windowed_width: 800,
            windowed_height: 600,
            windowed_maximized: false,
            fullscreen_width: 0,
            fullscreen_height: 0,
            fullscreen_refresh_rate_numerator: 0,
            fullscreen_refresh_rate_denominator: 0,
            fullscreen_pixel_format: 0,
            fullscreen_pixel_density: 1.0,
            fullscreen_display: DisplayIdMemo::unknown(),
            show_fps: true,
            show_settings_at_start: false,
            target_fps: 60.0,
            background_color: [0.0, 0.2, 0.0, 1.0],
        }
    }
}

/// Overwrite `slot` with the parsed value, keeping the old one if unparsable.
fn assign<T>(slot: &mut T, name: &str, value: &Value, parse: impl FnOnce(&Value) -> Option<T>) {
    match parse(value) {
        Some(v) => *slot = v,
        None => warn!(key = name, value = value.as_str(), "ignoring malformed setting"),
    }
}

impl Settings {
    /// Update fields from parsed properties.  Unknown keys are skipped.
    pub fn import_properties(&mut self, properties: &[Property]) {
        for Property { name, value } in properties {
            let name = name.as_str();
            match name {
                "display_mode" => assign(&mut self.display_mode, name, value, Value::as_i32),
                "windowed_x" => assign(&mut self.windowed_x, name, value, Value::as_i32),
                "windowed_y" => assign(&mut self.windowed_y, name, value, Value::as_i32),
                "windowed_width" => assign(&mut self.windowed_width, name, value, Value::as_i32),
                "windowed_height" => assign(&mut self.windowed_height, name, value, Value::as_i32),
                "windowed_maximized" => {
                    assign(&mut self.windowed_maximized, name, value, Value::as_bool)
                }
                "fullscreen_width" => assign(&mut self.fullscreen_width, name, value, Value::as_i32),
                "fullscreen_height" => {
                    assign(&mut self.fullscreen_height, name, value, Value::as_i32)
                }
                "fullscreen_refresh_rate_numerator" => assign(
                    &mut self.fullscreen_refresh_rate_numerator,
                    name,
                    value,
                    Value::as_i32,
                ),
                "fullscreen_refresh_rate_denominator" => assign(
                    &mut self.fullscreen_refresh_rate_denominator,
                    name,
                    value,
                    Value::as_i32,
                ),
                "fullscreen_pixel_format" => {
                    assign(&mut self.fullscreen_pixel_format, name, value, Value::as_u32)
                }
                "fullscreen_pixel_density" => {
                    assign(&mut self.fullscreen_pixel_density, name, value, Value::as_f32)
                }
                "fullscreen_display" => self.fullscreen_display = value.as_display_memo(),
                "show_fps" => assign(&mut self.show_fps, name, value, Value::as_bool),
                "show_settings_at_start" => {
                    assign(&mut self.show_settings_at_start, name, value, Value::as_bool)
                }
                "target_fps" => assign(&mut self.target_fps, name, value, Value::as_f32),
                "background_color" => {
                    assign(&mut self.background_color, name, value, Value::as_color)
                }
                _ => debug!(key = name, "unknown setting"),
            }
        }
    }

    pub fn export_properties(&self) -> Vec<Property> {
        vec![
            Property::new("display_mode", self.display_mode),
            Property::new("windowed_x", self.windowed_x),
            Property::new("windowed_y", self.windowed_y),
            Property::new("windowed_width", self.windowed_width),
            Property::new("windowed_height", self.windowed_height),
            Property::new("windowed_maximized", self.windowed_maximized),
            Property::new("fullscreen_width", self.fullscreen_width),
            Property::new("fullscreen_height", self.fullscreen_height),
            Property::new(
                "fullscreen_refresh_rate_numerator",
                self.fullscreen_refresh_rate_numerator,
            ),
            Property::new(
                "fullscreen_refresh_rate_denominator",
                self.fullscreen_refresh_rate_denominator,
            ),
            Property::new("fullscreen_pixel_format", self.fullscreen_pixel_format),
            Property::new("fullscreen_pixel_density", self.fullscreen_pixel_density),
            Property::new("fullscreen_display", &self.fullscreen_display),
            Property::new("show_fps", self.show_fps),
            Property::new("show_settings_at_start", self.show_settings_at_start),
            Property::new("target_fps", self.target_fps),
            Property {
                name: "background_color".to_string(),
                value: Value::from_color(self.background_color),
            },
        ]
    }

    pub fn from_text(text: &str) -> Self {
        let mut settings = Self::default();
        settings.import_properties(&read_properties(text));
        settings
    }

    pub fn to_text(&self) -> String {
        write_properties(&self.export_properties())
    }
}

// ── SettingsFile ──────────────────────────────────────────────────────────────

/// Settings persisted as a properties file on disk.
#[derive(Clone, Debug)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.  A missing file is an error; callers that
    /// want defaults on first run fall back to `Settings::default()`.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(Settings::from_text(&text))
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        fs::write(&self.path, settings.to_text()).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
