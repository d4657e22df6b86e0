pub mod confirm;
pub mod display;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod panel;
pub mod platform;
pub mod settings;
pub mod window;

/// Title of the harness window.
pub const APP_TITLE: &str = "Input Test";

/// Default settings file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "modeset.cfg";
