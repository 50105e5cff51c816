//! In-memory stand-ins for the native window system, the media surface,
//! and the settings store.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::media::{MediaError, MediaKind, MediaSize, MediaSurface, RenderParams};
use crate::platform::{ExStyle, StackSlot, TimerKind, WindowHandle, WindowResult, WindowSystem};
use crate::rect::Rect;
use crate::settings::{Settings, SettingsStore};

/// Records every call and answers from plain fields.
pub struct FakeSystem {
    pub overlay: WindowHandle,
    pub live: HashSet<WindowHandle>,
    pub rects: HashMap<WindowHandle, Rect>,
    pub styles: HashMap<WindowHandle, ExStyle>,
    pub style_writes: usize,
    pub stack_calls: Vec<(WindowHandle, StackSlot)>,
    pub fail_stack_calls: bool,
    pub bounds_calls: Vec<Rect>,
    pub visible: bool,
    pub foreground: Option<WindowHandle>,
    pub monitor: Rect,
    pub work_area: Rect,
    pub screen: Rect,
    pub timers: HashMap<TimerKind, Duration>,
    pub timer_starts: usize,
    pub timer_stops: usize,
}

impl FakeSystem {
    /// One 1920x1080 monitor with a 40 px taskbar and a live overlay.
    pub fn new() -> Self {
        let overlay = WindowHandle(1);
        let monitor = Rect::new(0, 0, 1920, 1080);
        Self {
            overlay,
            live: HashSet::from([overlay]),
            rects: HashMap::new(),
            styles: HashMap::new(),
            style_writes: 0,
            stack_calls: Vec::new(),
            fail_stack_calls: false,
            bounds_calls: Vec::new(),
            visible: false,
            foreground: None,
            monitor,
            work_area: Rect::new(0, 0, 1920, 1040),
            screen: monitor,
            timers: HashMap::new(),
            timer_starts: 0,
            timer_stops: 0,
        }
    }

    pub fn add_window(&mut self, window: WindowHandle, rect: Rect) {
        self.live.insert(window);
        self.rects.insert(window, rect);
    }

    pub fn style_of(&self, window: WindowHandle) -> ExStyle {
        self.styles.get(&window).copied().unwrap_or_default()
    }

    pub fn timer_running(&self, kind: TimerKind) -> bool {
        self.timers.contains_key(&kind)
    }

    fn check(&self, window: WindowHandle) -> WindowResult<()> {
        if self.live.contains(&window) {
            Ok(())
        } else {
            Err(format!("invalid window 0x{:X}", window.0).into())
        }
    }
}

impl WindowSystem for FakeSystem {
    fn is_window(&self, window: WindowHandle) -> bool {
        self.live.contains(&window)
    }

    fn ex_style(&self, window: WindowHandle) -> WindowResult<ExStyle> {
        self.check(window)?;
        Ok(self.style_of(window))
    }

    fn set_ex_style(&mut self, window: WindowHandle, style: ExStyle) -> WindowResult<()> {
        self.check(window)?;
        self.styles.insert(window, style);
        self.style_writes += 1;
        Ok(())
    }

    fn set_stack_position(&mut self, window: WindowHandle, slot: StackSlot) -> WindowResult<()> {
        if self.fail_stack_calls {
            return Err("SetWindowPos failed".into());
        }
        self.check(window)?;
        self.stack_calls.push((window, slot));
        Ok(())
    }

    fn set_bounds(&mut self, window: WindowHandle, bounds: Rect) -> WindowResult<()> {
        self.check(window)?;
        self.rects.insert(window, bounds);
        self.bounds_calls.push(bounds);
        Ok(())
    }

    fn set_visible(&mut self, window: WindowHandle, visible: bool) -> WindowResult<()> {
        self.check(window)?;
        self.visible = visible;
        Ok(())
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        self.foreground
    }

    fn window_rect(&self, window: WindowHandle) -> WindowResult<Rect> {
        self.check(window)?;
        Ok(self.rects.get(&window).copied().unwrap_or_default())
    }

    fn monitor_rect(&self, window: WindowHandle) -> WindowResult<Rect> {
        self.check(window)?;
        Ok(self.monitor)
    }

    fn primary_work_area(&self) -> WindowResult<Rect> {
        Ok(self.work_area)
    }

    fn virtual_screen(&self) -> Rect {
        self.screen
    }

    fn start_timer(&mut self, kind: TimerKind, interval: Duration) {
        self.timers.insert(kind, interval);
        self.timer_starts += 1;
    }

    fn stop_timer(&mut self, kind: TimerKind) {
        if self.timers.remove(&kind).is_some() {
            self.timer_stops += 1;
        }
    }
}

/// Media surface that "decodes" by looking up a fixed size per file.
#[derive(Default)]
pub struct FakeSurface {
    pub sizes: HashMap<PathBuf, MediaSize>,
    pub displayed: Vec<(PathBuf, MediaKind)>,
    pub renders: Vec<RenderParams>,
    pub volume: Option<(f64, bool)>,
    pub stopped: bool,
    pub unsupported: Vec<MediaKind>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file the surface can display.
    pub fn with_media(mut self, path: impl Into<PathBuf>, size: MediaSize) -> Self {
        self.sizes.insert(path.into(), size);
        self
    }

    pub fn current(&self) -> Option<&Path> {
        self.displayed.last().map(|(p, _)| p.as_path())
    }
}

impl MediaSurface for FakeSurface {
    fn display(&mut self, path: &Path, kind: MediaKind) -> Result<MediaSize, MediaError> {
        let size = self
            .sizes
            .get(path)
            .copied()
            .ok_or_else(|| MediaError(format!("cannot decode {}", path.display())))?;
        self.displayed.push((path.to_path_buf(), kind));
        Ok(size)
    }

    fn supports(&self, kind: MediaKind) -> bool {
        !self.unsupported.contains(&kind)
    }

    fn render(&mut self, params: &RenderParams) {
        self.renders.push(*params);
    }

    fn set_volume(&mut self, volume: f64, muted: bool) {
        self.volume = Some((volume, muted));
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// Settings store kept in memory.
#[derive(Default)]
pub struct MemoryStore {
    pub settings: Settings,
    pub saves: usize,
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn with(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&mut self) -> Settings {
        self.settings.clone()
    }

    fn save(&mut self, settings: &Settings) -> Result<(), String> {
        if self.fail_saves {
            return Err("disk full".into());
        }
        self.settings = settings.clone();
        self.saves += 1;
        Ok(())
    }
}
