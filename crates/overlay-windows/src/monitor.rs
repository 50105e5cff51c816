use std::mem;

use overlay_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, HMONITOR, MONITOR_DEFAULTTONEAREST, MONITOR_DEFAULTTOPRIMARY, MONITORINFO,
    MonitorFromWindow,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN,
    SM_YVIRTUALSCREEN,
};

/// Returns the work area of the primary monitor.
///
/// The work area excludes the taskbar and any docked toolbars.
pub fn primary_work_area() -> WindowResult<Rect> {
    // SAFETY: takes no pointers; a null HWND with MONITOR_DEFAULTTOPRIMARY
    // yields the primary monitor.
    let monitor = unsafe { MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY) };
    Ok(to_rect(monitor_info(monitor)?.rcWork))
}

/// Returns the full bounds (taskbar included) of the monitor nearest to
/// the window. This is what a fullscreen window covers exactly.
pub fn monitor_rect(hwnd: HWND) -> WindowResult<Rect> {
    // SAFETY: takes no pointers; a stale HWND falls back to the nearest
    // monitor instead of failing.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    Ok(to_rect(monitor_info(monitor)?.rcMonitor))
}

/// Returns the bounding rectangle of all monitors combined.
pub fn virtual_screen() -> Rect {
    // SAFETY: GetSystemMetrics only reads system values.
    unsafe {
        Rect::new(
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    }
}

fn monitor_info(monitor: HMONITOR) -> WindowResult<MONITORINFO> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the struct; cbSize is set as required.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        return Err("Failed to get monitor info".into());
    }
    Ok(info)
}

pub(crate) fn to_rect(rc: RECT) -> Rect {
    Rect::new(rc.left, rc.top, rc.right - rc.left, rc.bottom - rc.top)
}
