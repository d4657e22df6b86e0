use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use serde::Serialize;
use softbuffer::{Context, Surface};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use modeset::confirm::{POPUP_MESSAGE, PopupInput};
use modeset::display::{DisplayInfo, list_displays, list_fullscreen_modes};
use modeset::frame::FrameClock;
use modeset::geometry::Rect;
use modeset::panel::VideoSettingsPanel;
use modeset::platform::{DisplayBackend, SimDisplay, SimPlatform, WinitPlatform};
use modeset::settings::{
    Settings, SettingsFile, load_window_video_settings, save_window_video_settings,
};
use modeset::window::{DisplayMode, VideoModeSettings, read_current};
use modeset::{APP_TITLE, DEFAULT_CONFIG_FILE, logging};

// ── Command line ─────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "modeset")]
#[command(about = "Window and display mode test harness", long_about = None)]
#[command(version)]
struct Options {
    /// Settings file to load on start and save on exit
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Print connected displays and their fullscreen modes as JSON, then exit
    #[arg(long)]
    list_displays: bool,
    /// Restore the saved mode on a simulated desk instead of opening a window
    #[arg(long)]
    headless: bool,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    debug: bool,
}

// ── Diagnostics ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DisplayReport {
    display: DisplayInfo,
    bounds: Option<[i32; 4]>,
    modes: Vec<VideoModeSettings>,
}

fn display_report(backend: &impl DisplayBackend) -> Vec<DisplayReport> {
    list_displays(backend)
        .into_iter()
        .map(|display| DisplayReport {
            bounds: backend.display_bounds(display.id).map(|r| [r.x, r.y, r.w, r.h]),
            modes: list_fullscreen_modes(backend, display.id),
            display,
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to encode report: {e}"),
    }
}

/// Restore the saved mode on a simulated two-monitor desk and print what the
/// window ended up as.  Useful for checking a settings file without a display.
fn run_headless(settings: &Settings) {
    let mut platform = SimPlatform::new(vec![
        SimDisplay::new(1, "Primary", Rect::new(0, 0, 1920, 1080))
            .with_mode(1920, 1080, 60_000, 1000)
            .with_mode(1280, 720, 60_000, 1000),
        SimDisplay::new(2, "Secondary", Rect::new(1920, 0, 2560, 1440))
            .with_mode(2560, 1440, 144_000, 1000),
    ]);
    if let Err(e) = load_window_video_settings(settings, &mut platform) {
        warn!("saved video mode not applied: {e}");
    }
    print_json(&read_current(&platform));
}

// ── Harness ──────────────────────────────────────────────────────────────────

struct Live {
    platform: WinitPlatform,
    panel: VideoSettingsPanel,
    surface: Option<Surface<Arc<Window>, Arc<Window>>>,
    /// Kept alive for the surface.
    _context: Option<Context<Arc<Window>>>,
}

struct Harness {
    options: Options,
    file: SettingsFile,
    settings: Settings,
    live: Option<Live>,
    clock: FrameClock,
    modifiers: ModifiersState,
    /// Popup buttons pressed since the last redraw.
    popup_keep: bool,
    popup_revert: bool,
    popup_dismissed: bool,
}

impl Harness {
    fn new(options: Options, settings: Settings) -> Self {
        Self {
            file: SettingsFile::new(options.config.clone()),
            options,
            clock: FrameClock::new(settings.target_fps, Instant::now()),
            settings,
            live: None,
            modifiers: ModifiersState::empty(),
            popup_keep: false,
            popup_revert: false,
            popup_dismissed: false,
        }
    }

    fn request_mode(&mut self, mode: DisplayMode) {
        let Some(live) = self.live.as_mut() else { return };
        if live.panel.confirmation().is_pending() {
            warn!("a mode change is already awaiting confirmation");
            return;
        }
        live.panel.reload(&live.platform);
        live.panel.select_display_mode(&live.platform, mode);
        live.panel.press_set(&mut live.platform, &self.settings, Instant::now());
    }

    fn toggle_fullscreen(&mut self) {
        let Some(live) = self.live.as_ref() else { return };
        let next = match read_current(&live.platform).display_mode {
            DisplayMode::Windowed => DisplayMode::BorderlessFullscreen,
            _ => DisplayMode::Windowed,
        };
        self.request_mode(next);
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        let pending = self
            .live
            .as_ref()
            .is_some_and(|live| live.panel.confirmation().is_pending());
        match code {
            KeyCode::Escape if pending => self.popup_dismissed = true,
            KeyCode::Escape => self.quit(event_loop),
            KeyCode::KeyQ if self.modifiers.control_key() => self.quit(event_loop),
            KeyCode::Enter if self.modifiers.alt_key() => self.toggle_fullscreen(),
            KeyCode::F2 => self.request_mode(DisplayMode::Windowed),
            KeyCode::F3 => self.request_mode(DisplayMode::Fullscreen),
            KeyCode::F4 => self.request_mode(DisplayMode::BorderlessFullscreen),
            KeyCode::F5 => {
                if let Some(live) = self.live.as_mut() {
                    live.panel.reload(&live.platform);
                }
            }
            KeyCode::KeyY if pending => self.popup_keep = true,
            KeyCode::KeyN if pending => self.popup_revert = true,
            _ => {}
        }
    }

    /// One UI tick: drive the confirmation and repaint.
    fn redraw(&mut self) {
        let Some(live) = self.live.as_mut() else { return };
        let popup = PopupInput {
            open: live.panel.confirmation().wants_popup() && !self.popup_dismissed,
            keep: self.popup_keep,
            revert: self.popup_revert,
        };
        self.popup_keep = false;
        self.popup_revert = false;
        self.popup_dismissed = false;

        let now = Instant::now();
        self.clock.frame(now);
        live.panel.tick(&mut live.platform, &mut self.settings, now, popup);

        let mut title = APP_TITLE.to_string();
        if self.settings.show_fps {
            title.push_str(&format!(" | FPS: {:.1}", self.clock.fps()));
        }
        if let Some(left) = live.panel.confirmation().remaining(now) {
            title.push_str(&format!(" - {POPUP_MESSAGE} [Y/N] {}s", left.as_secs() + 1));
        }
        live.platform.window().set_title(&title);

        if let Some(surface) = live.surface.as_mut() {
            fill(surface, self.settings.background_color);
        }
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(live) = self.live.as_mut() {
            // Never persist a mode the user has not confirmed.
            if live.panel.confirmation().is_pending() {
                let revert = PopupInput { open: true, keep: false, revert: true };
                live.panel.tick(&mut live.platform, &mut self.settings, Instant::now(), revert);
            }
            save_window_video_settings(&mut self.settings, &live.platform);
        }
        match self.file.save(&self.settings) {
            Ok(()) => info!(path = %self.file.path().display(), "settings saved"),
            Err(e) => error!("{e}"),
        }
        event_loop.exit();
    }
}

fn fill(surface: &mut Surface<Arc<Window>, Arc<Window>>, color: [f32; 4]) {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    let pixel = (channel(color[0]) << 16) | (channel(color[1]) << 8) | channel(color[2]);
    match surface.buffer_mut() {
        Ok(mut buffer) => {
            buffer.fill(pixel);
            if let Err(e) = buffer.present() {
                warn!("present failed: {e}");
            }
        }
        Err(e) => warn!("no frame buffer: {e}"),
    }
}

fn resize_surface(surface: &mut Surface<Arc<Window>, Arc<Window>>, width: u32, height: u32) {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return;
    };
    if let Err(e) = surface.resize(w, h) {
        warn!("surface resize failed: {e}");
    }
}

fn create_surface(
    window: &Arc<Window>,
) -> Option<(Context<Arc<Window>>, Surface<Arc<Window>, Arc<Window>>)> {
    let context = Context::new(window.clone())
        .map_err(|e| warn!("no software renderer: {e}"))
        .ok()?;
    let mut surface = Surface::new(&context, window.clone())
        .map_err(|e| warn!("no software surface: {e}"))
        .ok()?;
    let size = window.inner_size();
    resize_surface(&mut surface, size.width, size.height);
    Some((context, surface))
}

impl ApplicationHandler for Harness {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.live.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(APP_TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(800, 600))
            .with_resizable(true)
            .with_visible(!self.options.list_displays);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let mut platform = WinitPlatform::new(window.clone());

        if self.options.list_displays {
            print_json(&display_report(&platform));
            event_loop.exit();
            return;
        }

        if let Err(e) = load_window_video_settings(&self.settings, &mut platform) {
            warn!("saved video mode not applied: {e}");
        }

        let mut panel = VideoSettingsPanel::new();
        if self.settings.show_settings_at_start {
            panel.open(&platform);
        } else {
            panel.reload(&platform);
        }

        let (context, surface) = match create_surface(&window) {
            Some((context, surface)) => (Some(context), Some(surface)),
            None => (None, None),
        };
        self.live = Some(Live {
            platform,
            panel,
            surface,
            _context: context,
        });
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(live) = self.live.as_ref() else { return };
        if self.clock.is_due(Instant::now()) {
            live.platform.window().request_redraw();
        }
        match self.clock.interval() {
            Some(_) => event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_frame())),
            None => event_loop.set_control_flow(ControlFlow::Poll),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.quit(event_loop),

            WindowEvent::Resized(size) => {
                if let Some(surface) = self.live.as_mut().and_then(|l| l.surface.as_mut()) {
                    resize_surface(surface, size.width, size.height);
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.on_key(event_loop, code),

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }
}

fn main() {
    let options = Options::parse();
    logging::init(options.debug);

    let file = SettingsFile::new(options.config.clone());
    let settings = match file.load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{e}; using defaults");
            Settings::default()
        }
    };

    if options.headless {
        run_headless(&settings);
        return;
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("failed to start event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut harness = Harness::new(options, settings);
    if let Err(e) = event_loop.run_app(&mut harness) {
        error!("event loop error: {e}");
    }
}
