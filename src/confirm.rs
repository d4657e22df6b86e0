//! Keep-or-revert confirmation after a video mode change.
//!
//! A mode the display cannot show leaves the user staring at a black screen,
//! unable to click anything.  Every change therefore starts a countdown; only
//! an explicit "Keep" stops it, and anything else (timeout, "Revert", closing
//! the popup) restores the previous mode.
//!
//! The machine is plain data owned by the UI tick and driven with an injected
//! clock, so it never runs on its own.

use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::platform::WindowBackend;
use crate::settings::{Settings, save_window_video_settings};
use crate::window::{self, VideoModeSettings};

/// How long the user has to keep a new mode before it is reverted.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(10);

pub const POPUP_TITLE: &str = "Resolution Confirmation";
pub const POPUP_MESSAGE: &str = "Do you want to keep the new resolution?";

/// What the widget layer observed for the confirmation popup this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PopupInput {
    /// The popup is currently shown.
    pub open: bool,
    /// "Keep" was pressed.
    pub keep: bool,
    /// "Revert" was pressed.
    pub revert: bool,
}

/// Result of one confirmation tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Verdict {
    /// Still waiting.
    Continue,
    /// The user accepted the new mode.
    Keep,
    /// Go back to this mode.
    Revert(VideoModeSettings),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Confirmation {
    #[default]
    Idle,
    Pending {
        deadline: Instant,
        /// Mode in effect before the change.
        snapshot: VideoModeSettings,
        /// The popup has been requested at least once.
        popup_open: bool,
    },
}

impl Confirmation {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Start confirming a change away from `snapshot`, with the default timeout.
    pub fn begin(&mut self, snapshot: VideoModeSettings, now: Instant) {
        self.begin_with_timeout(snapshot, now, CONFIRMATION_TIMEOUT);
    }

    pub fn begin_with_timeout(&mut self, snapshot: VideoModeSettings, now: Instant, timeout: Duration) {
        *self = Self::Pending {
            deadline: now + timeout,
            snapshot,
            popup_open: false,
        };
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// True while the widget layer should be showing the popup.
    pub fn wants_popup(&self) -> bool {
        matches!(self, Self::Pending { popup_open: true, .. })
    }

    /// Time left before the automatic revert, for the countdown label.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self {
            Self::Idle => None,
            Self::Pending { deadline, .. } => Some(deadline.saturating_duration_since(now)),
        }
    }

    /// Advance the machine by one UI tick.
    ///
    /// The first tick of a pending confirmation opens the popup.  On later
    /// ticks a popup that is no longer open, without Keep or Revert pressed,
    /// was dismissed and counts as Revert.  Reaching the deadline reverts.
    /// Any verdict other than `Continue` returns the machine to `Idle`.
    pub fn tick(&mut self, now: Instant, input: PopupInput) -> Verdict {
        let Self::Pending {
            deadline,
            snapshot,
            popup_open,
        } = self
        else {
            return Verdict::Continue;
        };

        let verdict = if input.keep {
            info!("accepted new resolution");
            Verdict::Keep
        } else if input.revert {
            info!("revert requested");
            Verdict::Revert(*snapshot)
        } else if !input.open && *popup_open {
            info!("resolution confirmation popup was closed");
            Verdict::Revert(*snapshot)
        } else {
            if !input.open {
                info!("opening resolution confirmation popup");
                *popup_open = true;
            }
            if now >= *deadline {
                info!("confirmation timed out, resetting resolution to original settings");
                Verdict::Revert(*snapshot)
            } else {
                Verdict::Continue
            }
        };

        if verdict != Verdict::Continue {
            *self = Self::Idle;
        }
        verdict
    }
}

/// Carry out a verdict: persist the kept mode, or re-apply the snapshot.
pub fn resolve_confirmation(window: &mut impl WindowBackend, settings: &mut Settings, verdict: Verdict) {
    match verdict {
        Verdict::Continue => {}
        Verdict::Keep => save_window_video_settings(settings, window),
        Verdict::Revert(snapshot) => {
            info!("reverting to original resolution");
            if let Err(e) = window::apply(window, &snapshot) {
                error!("failed to reset display mode to original settings: {e}");
            }
        }
    }
}
