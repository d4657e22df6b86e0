//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::display::DisplayId;

/// Why a video mode transition could not be applied.
///
/// None of these are fatal: the window is left in whatever state the
/// platform reports and the caller logs and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("display {0} reports no fullscreen modes")]
    NoFullscreenModes(DisplayId),

    #[error("no fullscreen mode on display {display} matches {width}x{height}")]
    NoMatchingMode {
        display: DisplayId,
        width: i32,
        height: i32,
    },

    #[error("platform rejected {0}")]
    PlatformRejected(&'static str),

    #[error("unknown display mode code {0}")]
    UnknownDisplayMode(i32),
}

/// Settings file I/O failures.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write settings to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for window transitions.
pub type Result<T> = std::result::Result<T, TransitionError>;
