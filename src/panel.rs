//! Display section of the settings window, without the widgets.
//!
//! The widget layer asks this model for labels and option lists every frame,
//! forwards clicks as method calls, and reports what it saw of the
//! confirmation popup.  Nothing here is cached across frames except the
//! user's in-progress choice: displays and modes are re-queried on each call.

use std::time::Instant;

use tracing::{error, info, warn};

use crate::confirm::{Confirmation, PopupInput, Verdict, resolve_confirmation};
use crate::display::{
    DisplayId, DisplayInfo, UNRESOLVED_DISPLAY, best_fullscreen_for, display_info, list_displays,
    list_fullscreen_modes,
};
use crate::platform::WindowBackend;
use crate::settings::Settings;
use crate::window::{self, DisplayMode, DisplaySettings, VideoModeSettings};

/// One entry of a combo box.
#[derive(Clone, Debug, PartialEq)]
pub struct ComboOption<T> {
    pub value: T,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Default)]
pub struct VideoSettingsPanel {
    /// What the user has picked but not yet applied.
    edited: VideoModeSettings,
    confirmation: Confirmation,
}

impl VideoSettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edited(&self) -> &VideoModeSettings {
        &self.edited
    }

    pub fn confirmation(&self) -> &Confirmation {
        &self.confirmation
    }

    /// Called when the settings window appears.
    pub fn open(&mut self, window: &impl WindowBackend) {
        info!("settings window opened");
        self.reset_to_live(window);
    }

    /// The "Reload" button: discard edits and mirror the live window.
    pub fn reload(&mut self, window: &impl WindowBackend) {
        self.reset_to_live(window);
        info!("reloaded factual display settings");
    }

    fn reset_to_live(&mut self, window: &impl WindowBackend) {
        self.edited = window::read_current(window);
    }

    // ── Display mode ──────────────────────────────────────────────────────────

    pub fn display_mode_options(&self) -> Vec<ComboOption<DisplayMode>> {
        DisplayMode::ALL
            .iter()
            .map(|&mode| ComboOption {
                value: mode,
                label: mode.label().to_string(),
                selected: mode == self.edited.display_mode,
            })
            .collect()
    }

    /// Switching into fullscreen picks the best mode of the chosen display.
    pub fn select_display_mode(&mut self, window: &impl WindowBackend, mode: DisplayMode) {
        let changed = mode != self.edited.display_mode;
        self.edited.display_mode = mode;
        if changed && mode == DisplayMode::Fullscreen {
            self.pick_best_fullscreen(window);
        }
    }

    // ── Display ───────────────────────────────────────────────────────────────

    /// Whether the display picker is shown at all.
    pub fn shows_display_picker(&self) -> bool {
        self.edited.display_mode != DisplayMode::Windowed
    }

    pub fn current_display(&self, window: &impl WindowBackend) -> DisplayInfo {
        display_info(window, self.edited.display_id)
    }

    pub fn display_options(&self, window: &impl WindowBackend) -> Vec<ComboOption<DisplayId>> {
        list_displays(window)
            .into_iter()
            .map(|info| ComboOption {
                value: info.id,
                selected: info.id == self.edited.display_id,
                label: info.name,
            })
            .collect()
    }

    /// Changing display while in fullscreen re-picks the best mode for it.
    pub fn select_display(&mut self, window: &impl WindowBackend, display_id: DisplayId) {
        let changed = display_id != self.edited.display_id;
        self.edited.display_id = display_id;
        if changed && self.edited.display_mode == DisplayMode::Fullscreen {
            self.pick_best_fullscreen(window);
        }
    }

    fn pick_best_fullscreen(&mut self, window: &impl WindowBackend) {
        let display = self.mode_display(window);
        let best = best_fullscreen_for(window, display);
        if best.display_settings.has_size() {
            self.edited = best;
        } else {
            // No modes on that display; keep the choice so "Set" reports it.
            self.edited.display_id = display;
        }
    }

    // ── Resolution ────────────────────────────────────────────────────────────

    pub fn shows_resolution_picker(&self) -> bool {
        self.edited.display_mode == DisplayMode::Fullscreen
    }

    pub fn resolution_label(&self) -> String {
        self.edited.display_settings.resolution_label()
    }

    /// Display whose modes are offered; an unresolved choice means the
    /// window's current display.
    fn mode_display(&self, window: &impl WindowBackend) -> DisplayId {
        if self.edited.display_id == UNRESOLVED_DISPLAY {
            window.window_display()
        } else {
            self.edited.display_id
        }
    }

    pub fn resolution_options(&self, window: &impl WindowBackend) -> Vec<ComboOption<DisplaySettings>> {
        list_fullscreen_modes(window, self.mode_display(window))
            .into_iter()
            .map(|mode| ComboOption {
                label: mode.display_settings.resolution_label(),
                selected: mode.display_settings == self.edited.display_settings,
                value: mode.display_settings,
            })
            .collect()
    }

    pub fn select_resolution(&mut self, display_settings: DisplaySettings) {
        self.edited.display_settings = display_settings;
    }

    // ── Set / confirm ─────────────────────────────────────────────────────────

    /// The live state with the user's choice laid over it.
    ///
    /// Leaving fullscreen for windowed restores the persisted windowed
    /// geometry rather than keeping the fullscreen-sized rectangle.
    pub fn merged_target(&self, window: &impl WindowBackend, settings: &Settings) -> VideoModeSettings {
        let live = window::read_current(window);
        let mut target = live;
        target.display_mode = self.edited.display_mode;
        match self.edited.display_mode {
            DisplayMode::Windowed => {
                if live.display_mode != DisplayMode::Windowed {
                    target.display_settings = DisplaySettings {
                        x: settings.windowed_x,
                        y: settings.windowed_y,
                        width: settings.windowed_width,
                        height: settings.windowed_height,
                        maximized: settings.windowed_maximized,
                        ..DisplaySettings::default()
                    };
                }
            }
            DisplayMode::Fullscreen => {
                target.display_id = self.edited.display_id;
                target.display_settings = self.edited.display_settings;
            }
            DisplayMode::BorderlessFullscreen => {
                target.display_id = self.edited.display_id;
            }
        }
        target
    }

    /// The "Set" button.  Returns `true` if a change was applied and is now
    /// awaiting confirmation.
    ///
    /// Refused while an earlier change is still unconfirmed: the live mode is
    /// then the unconfirmed one and must not replace the snapshot to revert to.
    pub fn press_set(&mut self, window: &mut impl WindowBackend, settings: &Settings, now: Instant) -> bool {
        if self.confirmation.is_pending() {
            warn!("a display mode change is still awaiting confirmation");
            return false;
        }
        let live = window::read_current(window);
        let target = self.merged_target(window, settings);
        if target == live {
            return false;
        }

        let label = target.display_mode.label();
        info!("changing display mode to {label}");
        if target.display_id != live.display_id {
            info!("changing display to {}", display_info(window, target.display_id).name);
        }
        if target.display_settings != live.display_settings {
            info!("changing resolution to {}", target.display_settings.resolution_label());
        }

        match window::apply(window, &target) {
            Ok(()) => {
                self.confirmation.begin(live, now);
                true
            }
            Err(e) => {
                error!("failed to set display mode to {label}: {e}");
                false
            }
        }
    }

    /// Drive the confirmation popup for this frame.
    ///
    /// Once it resolves, the kept mode is saved into `settings` (or the old
    /// mode is re-applied) and the panel mirrors the live window again.
    pub fn tick(
        &mut self,
        window: &mut impl WindowBackend,
        settings: &mut Settings,
        now: Instant,
        popup: PopupInput,
    ) -> Verdict {
        let verdict = self.confirmation.tick(now, popup);
        if verdict != Verdict::Continue {
            resolve_confirmation(window, settings, verdict);
            self.reset_to_live(window);
        }
        verdict
    }
}
