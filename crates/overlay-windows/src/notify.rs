use windows::Win32::UI::WindowsAndMessaging::{
    MB_ICONWARNING, MB_OK, MB_SETFOREGROUND, MB_TOPMOST, MessageBoxW,
};
use windows::core::HSTRING;

/// Shows a warning box without blocking the caller.
///
/// The box runs its own modal loop on a short-lived thread so the
/// overlay keeps pumping messages while it is open.
pub fn show(title: &str, text: &str) {
    let title = HSTRING::from(title);
    let text = HSTRING::from(text);
    let spawned = std::thread::Builder::new()
        .name("overlay-notify".into())
        .spawn(move || {
            // SAFETY: no owner window; both strings live on this thread.
            unsafe {
                let style = MB_OK | MB_ICONWARNING | MB_TOPMOST | MB_SETFOREGROUND;
                MessageBoxW(None, &text, &title, style);
            }
        });
    if let Err(e) = spawned {
        overlay_core::log_warn!("could not show notification: {e}");
    }
}
