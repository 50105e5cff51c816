use std::time::Duration;

use overlay_core::{ExStyle, Rect, StackSlot, TimerKind, WindowHandle, WindowResult, WindowSystem};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetForegroundWindow, GetWindowLongPtrW, GetWindowRect, HWND_BOTTOM,
    HWND_NOTOPMOST, HWND_TOPMOST, IsWindow, KillTimer, SW_HIDE, SW_SHOWNOACTIVATE,
    SWP_ASYNCWINDOWPOS, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    SetTimer, SetWindowLongPtrW, SetWindowPos, ShowWindow,
};

use crate::monitor;

/// Timer id of the z-order watchdog on the overlay window.
pub const ZORDER_TIMER_ID: usize = 1;
/// Timer id of the slideshow on the overlay window.
pub const SLIDESHOW_TIMER_ID: usize = 2;

/// Maps a `WM_TIMER` id back to the core timer it belongs to.
pub fn timer_kind(id: usize) -> Option<TimerKind> {
    match id {
        ZORDER_TIMER_ID => Some(TimerKind::ZOrder),
        SLIDESHOW_TIMER_ID => Some(TimerKind::Slideshow),
        _ => None,
    }
}

fn timer_id(kind: TimerKind) -> usize {
    match kind {
        TimerKind::ZOrder => ZORDER_TIMER_ID,
        TimerKind::Slideshow => SLIDESHOW_TIMER_ID,
    }
}

pub(crate) fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as *mut _)
}

pub(crate) fn handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as usize)
}

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without it Windows scales coordinates by the primary monitor's DPI
/// and the fullscreen check compares mismatched rectangles. Must run
/// before any window is created.
pub fn enable_dpi_awareness() {
    // SAFETY: called once at startup. Fails harmlessly when a manifest
    // already set the awareness.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// The Win32 desktop as seen from the overlay window.
///
/// Timers are attached to the overlay window so their `WM_TIMER`
/// messages arrive on the thread that owns it.
pub struct Win32Desktop {
    timer_window: HWND,
}

impl Win32Desktop {
    pub fn new(timer_window: HWND) -> Self {
        Self { timer_window }
    }
}

impl WindowSystem for Win32Desktop {
    fn is_window(&self, window: WindowHandle) -> bool {
        // SAFETY: IsWindow accepts any value and only reports validity.
        unsafe { IsWindow(Some(hwnd(window))).as_bool() }
    }

    fn ex_style(&self, window: WindowHandle) -> WindowResult<ExStyle> {
        // SAFETY: reading a window long on a handle checked by the caller.
        let style = unsafe { GetWindowLongPtrW(hwnd(window), GWL_EXSTYLE) };
        Ok(ExStyle(style as u32))
    }

    fn set_ex_style(&mut self, window: WindowHandle, style: ExStyle) -> WindowResult<()> {
        let hwnd = hwnd(window);
        // SAFETY: GWL_EXSTYLE accepts any WS_EX_* combination. The frame
        // change notification makes the new bits take effect.
        unsafe {
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, style.0 as isize);
            SetWindowPos(
                hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )?;
        }
        Ok(())
    }

    fn set_stack_position(&mut self, window: WindowHandle, slot: StackSlot) -> WindowResult<()> {
        let insert_after = match slot {
            StackSlot::Topmost => HWND_TOPMOST,
            StackSlot::Bottom => HWND_BOTTOM,
            StackSlot::NotTopmost => HWND_NOTOPMOST,
        };
        // SAFETY: z-order only. ASYNCWINDOWPOS keeps a hung foreground
        // window from blocking the overlay's thread.
        unsafe {
            SetWindowPos(
                hwnd(window),
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE | SWP_ASYNCWINDOWPOS,
            )?;
        }
        Ok(())
    }

    fn set_bounds(&mut self, window: WindowHandle, bounds: Rect) -> WindowResult<()> {
        // SAFETY: moves and resizes without touching z-order or focus.
        unsafe {
            SetWindowPos(
                hwnd(window),
                None,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    fn set_visible(&mut self, window: WindowHandle, visible: bool) -> WindowResult<()> {
        let command = if visible { SW_SHOWNOACTIVATE } else { SW_HIDE };
        // SAFETY: ShowWindow returns the previous visibility, not an error.
        unsafe {
            let _ = ShowWindow(hwnd(window), command);
        }
        Ok(())
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        // SAFETY: no arguments; may return null while focus is changing.
        let fg = unsafe { GetForegroundWindow() };
        (!fg.is_invalid()).then(|| handle(fg))
    }

    fn window_rect(&self, window: WindowHandle) -> WindowResult<Rect> {
        let mut rect = RECT::default();
        // SAFETY: GetWindowRect writes into a stack RECT.
        unsafe { GetWindowRect(hwnd(window), &mut rect)? };
        Ok(monitor::to_rect(rect))
    }

    fn monitor_rect(&self, window: WindowHandle) -> WindowResult<Rect> {
        monitor::monitor_rect(hwnd(window))
    }

    fn primary_work_area(&self) -> WindowResult<Rect> {
        monitor::primary_work_area()
    }

    fn virtual_screen(&self) -> Rect {
        monitor::virtual_screen()
    }

    fn start_timer(&mut self, kind: TimerKind, interval: Duration) {
        let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);
        // SAFETY: SetTimer with an existing id replaces that timer.
        unsafe {
            SetTimer(Some(self.timer_window), timer_id(kind), millis, None);
        }
    }

    fn stop_timer(&mut self, kind: TimerKind) {
        // SAFETY: killing a timer that is not running just fails.
        unsafe {
            let _ = KillTimer(Some(self.timer_window), timer_id(kind));
        }
    }
}
