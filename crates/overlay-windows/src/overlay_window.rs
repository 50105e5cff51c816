use std::sync::Once;

use overlay_core::WindowResult;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, IDC_SIZEALL, LoadCursorW, MA_NOACTIVATE,
    PostMessageW, PostQuitMessage, RegisterClassW, WM_APP, WM_DESTROY, WM_DISPLAYCHANGE,
    WM_MOUSEACTIVATE, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
    WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::w;

/// Posted to the overlay window when the monitor layout changes.
pub const WM_DISPLAY_CHANGED: u32 = WM_APP + 2;

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        // SAFETY: the cursor and module handles are process-global.
        unsafe {
            let instance = GetModuleHandleW(None).unwrap_or_default();
            let wc = WNDCLASSW {
                lpfnWndProc: Some(overlay_wnd_proc),
                hInstance: instance.into(),
                hCursor: LoadCursorW(None, IDC_SIZEALL).unwrap_or_default(),
                lpszClassName: w!("OverlayPlayerWindow"),
                ..Default::default()
            };
            RegisterClassW(&wc);
        }
    });
}

/// # Safety
///
/// Called by the system with the arguments of a message for `hwnd`.
unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // Clicking an interactive overlay must not steal focus.
        WM_MOUSEACTIVATE => LRESULT(MA_NOACTIVATE as isize),
        // Sent, not posted: forward it to the pump.
        WM_DISPLAYCHANGE => {
            // SAFETY: posting to our own live window.
            unsafe {
                let _ = PostMessageW(Some(hwnd), WM_DISPLAY_CHANGED, WPARAM(0), LPARAM(0));
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            // SAFETY: called on the thread that owns the window.
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        // SAFETY: forwards the arguments received from the system.
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Creates the hidden, borderless, click-through overlay window.
///
/// Must be called on the thread that will run the message pump.
pub fn create() -> WindowResult<HWND> {
    ensure_class_registered();

    let ex =
        WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE | WS_EX_TOPMOST | WS_EX_TRANSPARENT;
    // SAFETY: the class is registered above; the window starts hidden
    // and is sized by the overlay once settings are applied.
    let hwnd = unsafe {
        CreateWindowExW(
            ex,
            w!("OverlayPlayerWindow"),
            w!("Overlay Player"),
            WS_POPUP,
            0,
            0,
            1,
            1,
            None,
            None,
            None,
            None,
        )?
    };
    Ok(hwnd)
}

/// Destroys the overlay window. Errors are ignored.
pub fn destroy(hwnd: HWND) {
    // SAFETY: destroying an already destroyed window just fails.
    unsafe {
        let _ = DestroyWindow(hwnd);
    }
}
