//! The overlay window's lifecycle: settings application, media loading,
//! placement, drag, visibility, and timer routing.
//!
//! `Overlay` owns all mutable overlay state. It is driven from the single
//! UI thread that owns the native window, so nothing here is shared.

use std::collections::VecDeque;
use std::path::Path;

use crate::error::OverlayError;
use crate::media::{MediaKind, MediaSize, MediaSurface, RenderParams};
use crate::placement::{resolve_position, window_dimensions};
use crate::platform::{TimerKind, WindowHandle, WindowSystem};
use crate::rect::{Point, Rect};
use crate::settings::{Settings, SettingsStore};
use crate::slideshow::SlideshowEngine;
use crate::style::WindowStyleController;
use crate::zorder::{WATCHDOG_INTERVAL, ZOrderEnforcer, ZOrderMode};

/// How many of the overlay's own recent saves are remembered to tell
/// their file-watcher echoes apart from external edits.
const RECENT_SAVES: usize = 4;

pub struct Overlay<W: WindowSystem, M: MediaSurface, S: SettingsStore> {
    system: W,
    surface: M,
    store: S,
    window: Option<WindowHandle>,
    settings: Settings,
    visible: bool,
    media_size: Option<MediaSize>,
    bounds: Option<Rect>,
    zorder: ZOrderEnforcer,
    watchdog_running: bool,
    slideshow: SlideshowEngine,
    dragging: bool,
    shut_down: bool,
    recent_saves: VecDeque<Settings>,
}

impl<W: WindowSystem, M: MediaSurface, S: SettingsStore> Overlay<W, M, S> {
    /// Creates the overlay state from the persisted settings.
    ///
    /// Nothing is shown until [`Overlay::start`] attaches a window.
    pub fn new(system: W, surface: M, mut store: S) -> Self {
        let mut settings = store.load();
        settings.validate();
        Self {
            system,
            surface,
            store,
            window: None,
            settings,
            visible: false,
            media_size: None,
            bounds: None,
            zorder: ZOrderEnforcer::new(),
            watchdog_running: false,
            slideshow: SlideshowEngine::new(),
            dragging: false,
            shut_down: false,
            recent_saves: VecDeque::with_capacity(RECENT_SAVES),
        }
    }

    /// Attaches the native window, applies the settings, shows the
    /// window, and restores the last media file.
    ///
    /// Errors are returned after the window is already up.
    pub fn start(&mut self, window: WindowHandle) -> Result<(), OverlayError> {
        self.window = Some(window);
        let applied = self.apply_settings(self.settings.clone());
        self.show(true)?;
        crate::log_info!("overlay started");
        if let Some(path) = self.settings.last_file_path.clone() {
            self.load_media(&path)?;
        }
        applied
    }

    /// Brings the window into line with `settings`.
    ///
    /// Idempotent: applying the same settings twice issues no extra
    /// timer restarts, style writes, or moves.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), OverlayError> {
        let mut settings = settings;
        settings.validate();
        self.settings = settings;
        let window = self.window.ok_or(OverlayError::NoWindow)?;

        // Later steps still run when a native call fails.
        let styled = WindowStyleController::set_click_through(
            &mut self.system,
            Some(window),
            !self.settings.is_interactive,
        );
        let placed = self.position_window();
        self.render();
        self.surface
            .set_volume(self.settings.volume, self.settings.is_muted);
        let stacked = self
            .zorder
            .apply(&mut self.system, window, self.settings.z_order);
        self.sync_timers();

        styled?;
        placed?;
        stacked?;
        Ok(())
    }

    /// Applies settings edited outside the process.
    ///
    /// Returns `false` when nothing changed or when `settings` matches one
    /// of the overlay's own recent saves echoing back through the file
    /// watcher, possibly after the state has already moved on. If the new
    /// media file cannot be shown, the previous one stays on screen and
    /// in the settings.
    pub fn reload_settings(&mut self, settings: Settings) -> Result<bool, OverlayError> {
        let mut settings = settings;
        settings.validate();
        if settings == self.settings || self.recent_saves.contains(&settings) {
            return Ok(false);
        }
        // Anything older than an external edit is no longer an echo.
        self.recent_saves.clear();

        let previous_media = self.settings.last_file_path.clone();
        let media_changed = settings.last_file_path != previous_media;
        let applied = self.apply_settings(settings);
        if media_changed && let Some(path) = self.settings.last_file_path.clone() {
            let loaded = self.load_media(&path);
            if let Err(OverlayError::MediaLoad { .. }) = loaded {
                self.settings.last_file_path = previous_media;
            }
            loaded?;
        }
        applied?;
        Ok(true)
    }

    /// Displays a media file without persisting it.
    ///
    /// On failure the previous media stays on screen and the window keeps
    /// its size.
    pub fn load_media(&mut self, path: &Path) -> Result<(), OverlayError> {
        self.display_media(path)?;
        self.fit_media()
    }

    /// Displays a media file, remembers it, and shows the window.
    ///
    /// Only a file that could not be displayed leaves the remembered path
    /// untouched, and that is the only case reported as
    /// [`OverlayError::MediaLoad`].
    pub fn load_media_with_persistence(&mut self, path: &Path) -> Result<(), OverlayError> {
        self.display_media(path)?;
        self.settings.last_file_path = Some(path.to_path_buf());
        let placed = self.fit_media();
        let saved = self.persist();
        self.show(true)?;
        placed?;
        saved
    }

    fn display_media(&mut self, path: &Path) -> Result<(), OverlayError> {
        let kind = MediaKind::from_path(path);
        let failed = |reason: String| OverlayError::MediaLoad {
            path: path.to_path_buf(),
            reason,
        };
        if !self.surface.supports(kind) {
            return Err(failed(format!("{kind:?} media cannot be displayed")));
        }
        let size = self.surface.display(path, kind).map_err(|e| failed(e.0))?;
        crate::log_info!(
            "loaded {} ({}x{}, {kind:?})",
            path.display(),
            size.width,
            size.height
        );
        self.media_size = Some(size);
        Ok(())
    }

    /// Resizes and redraws the window around freshly displayed media.
    fn fit_media(&mut self) -> Result<(), OverlayError> {
        self.surface
            .set_volume(self.settings.volume, self.settings.is_muted);
        let placed = self.position_window();
        self.render();
        placed
    }

    /// Sizes the window and moves it to its saved or default position.
    pub fn position_window(&mut self) -> Result<(), OverlayError> {
        let window = self.window.ok_or(OverlayError::NoWindow)?;
        let (width, height) = window_dimensions(
            self.settings.window_size,
            self.settings.lock_aspect_ratio,
            self.media_size,
            self.settings.rotation,
        );
        let work_area = self.system.primary_work_area()?;
        let origin = resolve_position(
            self.settings.position,
            width,
            height,
            self.system.virtual_screen(),
            work_area,
        );
        let bounds = Rect::at(origin, width, height);
        if self.bounds == Some(bounds) {
            return Ok(());
        }
        self.system.set_bounds(window, bounds)?;
        self.bounds = Some(bounds);
        Ok(())
    }

    /// Re-runs placement after the monitor layout changed.
    pub fn on_display_change(&mut self) -> Result<(), OverlayError> {
        self.bounds = None;
        let placed = self.position_window();
        self.render();
        placed
    }

    fn render(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        self.surface.render(&RenderParams {
            width: bounds.width,
            height: bounds.height,
            rotation: self.settings.rotation,
            opacity: self.settings.opacity,
        });
    }

    /// Starts a drag. Only allowed while the overlay is interactive.
    pub fn begin_drag(&mut self) -> bool {
        self.dragging = self.settings.is_interactive && self.window.is_some();
        self.dragging
    }

    /// Records where a drag ended and persists it immediately.
    pub fn finish_drag(&mut self, top_left: Point) -> Result<(), OverlayError> {
        if !std::mem::take(&mut self.dragging) {
            return Ok(());
        }
        self.settings.position = Some(top_left);
        if let Some(bounds) = self.bounds {
            self.bounds = Some(Rect::at(top_left, bounds.width, bounds.height));
        }
        crate::log_debug!("dragged to ({}, {})", top_left.x, top_left.y);
        self.persist()
    }

    /// Shows the overlay if hidden, hides it if shown.
    ///
    /// Returns the new visibility.
    pub fn toggle_visibility(&mut self) -> Result<bool, OverlayError> {
        self.show(!self.visible)?;
        Ok(self.visible)
    }

    fn show(&mut self, visible: bool) -> Result<(), OverlayError> {
        let window = self.window.ok_or(OverlayError::NoWindow)?;
        if visible == self.visible {
            return Ok(());
        }
        self.system.set_visible(window, visible)?;
        self.visible = visible;
        let stacked = if visible {
            self.zorder
                .apply(&mut self.system, window, self.settings.z_order)
        } else {
            Ok(())
        };
        self.sync_timers();
        stacked?;
        Ok(())
    }

    /// Swaps the displayed media for `path` and remembers it.
    pub fn change_media(&mut self, path: &Path) -> Result<(), OverlayError> {
        self.load_media_with_persistence(path)
    }

    /// Rotates the media a quarter turn clockwise.
    pub fn rotate_90(&mut self) -> Result<i32, OverlayError> {
        self.settings.rotation = (self.settings.rotation + 90) % 360;
        let placed = self.position_window();
        self.render();
        let saved = self.persist();
        placed?;
        saved?;
        Ok(self.settings.rotation)
    }

    /// Flushes the current settings so an external editor opens them as
    /// they are on screen.
    pub fn open_settings(&mut self) -> Result<(), OverlayError> {
        self.persist()
    }

    /// Switches between click-through and draggable.
    ///
    /// Returns `true` when the overlay is now interactive.
    pub fn toggle_interactive(&mut self) -> Result<bool, OverlayError> {
        self.settings.is_interactive = !self.settings.is_interactive;
        if !self.settings.is_interactive {
            self.dragging = false;
        }
        let styled = WindowStyleController::set_click_through(
            &mut self.system,
            self.window,
            !self.settings.is_interactive,
        );
        let saved = self.persist();
        styled?;
        saved?;
        Ok(self.settings.is_interactive)
    }

    /// Changes the stacking mode and starts or stops the watchdog.
    pub fn set_z_order(&mut self, mode: ZOrderMode) -> Result<(), OverlayError> {
        self.settings.z_order = mode;
        let stacked = match self.window {
            Some(window) => self.zorder.apply(&mut self.system, window, mode),
            None => Ok(()),
        };
        self.sync_timers();
        let saved = self.persist();
        stacked?;
        saved
    }

    /// Routes a timer tick.
    pub fn on_timer(&mut self, kind: TimerKind) -> Result<(), OverlayError> {
        match kind {
            TimerKind::ZOrder => {
                let window = self.window.ok_or(OverlayError::NoWindow)?;
                self.zorder
                    .tick(&mut self.system, window, self.settings.z_order)?;
                Ok(())
            }
            TimerKind::Slideshow => self.advance_slideshow(),
        }
    }

    fn advance_slideshow(&mut self) -> Result<(), OverlayError> {
        let Some(current) = self.settings.last_file_path.clone() else {
            return Ok(());
        };
        let surface = &self.surface;
        let next = self
            .slideshow
            .next_media(&current, |kind| surface.supports(kind))
            .map_err(|e| OverlayError::Scan {
                dir: current.parent().unwrap_or(&current).to_path_buf(),
                reason: e.to_string(),
            })?;
        let Some(next) = next else {
            return Ok(());
        };
        let loaded = self.load_media_with_persistence(&next);
        if let Err(OverlayError::MediaLoad { .. }) = loaded {
            self.slideshow.skip_failed(&current);
        }
        loaded
    }

    /// Starts or stops both timers to match the current state.
    fn sync_timers(&mut self) {
        let watchdog =
            self.visible && self.window.is_some() && self.settings.z_order.needs_watchdog();
        if watchdog != self.watchdog_running {
            if watchdog {
                self.system.start_timer(TimerKind::ZOrder, WATCHDOG_INTERVAL);
            } else {
                self.system.stop_timer(TimerKind::ZOrder);
            }
            self.watchdog_running = watchdog;
        }
        self.slideshow.set_enabled(
            &mut self.system,
            self.settings.slideshow.enabled,
            self.settings.slideshow.interval_secs,
        );
    }

    fn persist(&mut self) -> Result<(), OverlayError> {
        self.store
            .save(&self.settings)
            .map_err(OverlayError::Settings)?;
        if self.recent_saves.len() == RECENT_SAVES {
            self.recent_saves.pop_front();
        }
        self.recent_saves.push_back(self.settings.clone());
        Ok(())
    }

    /// Stops timers and playback and writes the settings one last time.
    ///
    /// Safe to call more than once; only the first call does anything.
    pub fn shutdown(&mut self) {
        if std::mem::replace(&mut self.shut_down, true) {
            return;
        }
        self.system.stop_timer(TimerKind::ZOrder);
        self.watchdog_running = false;
        self.slideshow.set_enabled(&mut self.system, false, 0);
        self.surface.stop();
        if let Err(e) = self.persist() {
            crate::log_warn!("final save failed: {e}");
        }
        crate::log_info!("overlay shut down");
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn media_size(&self) -> Option<MediaSize> {
        self.media_size
    }

    pub fn system(&self) -> &W {
        &self.system
    }

    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
