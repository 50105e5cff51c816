use std::ops::{BitOr, BitOrAssign};
use std::time::Duration;

use crate::Rect;

/// A boxed error type for native window operations.
///
/// Platform calls fail for reasons the core cannot act on (stale handles,
/// access denied), so callers only need to know that a call failed.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// An opaque native window handle (a pointer-sized integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub usize);

/// Extended window style bits.
///
/// Values match the Win32 `WS_EX_*` constants so the platform crate can
/// pass them straight through `SetWindowLongPtrW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExStyle(pub u32);

impl ExStyle {
    /// Always-above-normal-windows category.
    pub const TOPMOST: Self = Self(0x0000_0008);
    /// Mouse hit-testing falls through to the windows below.
    pub const TRANSPARENT: Self = Self(0x0000_0020);
    /// Excluded from the taskbar and Alt+Tab.
    pub const TOOLWINDOW: Self = Self(0x0000_0080);
    /// Forces a taskbar button; conflicts with `TOOLWINDOW`.
    pub const APPWINDOW: Self = Self(0x0004_0000);
    /// Composited with per-pixel alpha.
    pub const LAYERED: Self = Self(0x0008_0000);
    /// Never receives input focus.
    pub const NOACTIVATE: Self = Self(0x0800_0000);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for ExStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ExStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Where in the desktop's window stack the overlay should sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackSlot {
    /// Above every other window, including other topmost windows.
    Topmost,
    /// At the very bottom of the stack, behind other applications.
    Bottom,
    /// Ordinary stacking; topmost status is relinquished.
    NotTopmost,
}

/// The recurring timers the overlay schedules on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Z-order watchdog.
    ZOrder,
    /// Slideshow advancement.
    Slideshow,
}

/// Narrow boundary between the reconciliation logic and the native
/// window system.
///
/// `overlay-windows` implements it over Win32; tests use an in-memory
/// fake that records every call.
pub trait WindowSystem {
    /// Returns whether the handle still refers to a live window.
    fn is_window(&self, window: WindowHandle) -> bool;

    /// Reads the window's extended style bits.
    fn ex_style(&self, window: WindowHandle) -> WindowResult<ExStyle>;

    /// Replaces the window's extended style bits.
    fn set_ex_style(&mut self, window: WindowHandle, style: ExStyle) -> WindowResult<()>;

    /// Moves the window to a stack slot without moving, resizing, or
    /// activating it.
    fn set_stack_position(&mut self, window: WindowHandle, slot: StackSlot) -> WindowResult<()>;

    /// Moves and resizes the window.
    fn set_bounds(&mut self, window: WindowHandle, bounds: Rect) -> WindowResult<()>;

    /// Shows (without activating) or hides the window.
    fn set_visible(&mut self, window: WindowHandle, visible: bool) -> WindowResult<()>;

    /// Returns the window currently holding input focus.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Returns the window's bounding rectangle.
    fn window_rect(&self, window: WindowHandle) -> WindowResult<Rect>;

    /// Returns the full rectangle of the monitor nearest to the window.
    fn monitor_rect(&self, window: WindowHandle) -> WindowResult<Rect>;

    /// Returns the primary monitor's work area (excludes the taskbar).
    fn primary_work_area(&self) -> WindowResult<Rect>;

    /// Returns the bounding rectangle of all monitors.
    fn virtual_screen(&self) -> Rect;

    /// Starts (or restarts) a recurring timer on the UI thread.
    fn start_timer(&mut self, kind: TimerKind, interval: Duration);

    /// Stops a recurring timer. Stopping an inactive timer is a no-op.
    fn stop_timer(&mut self, kind: TimerKind);
}
