use std::panic::{self, AssertUnwindSafe};

use overlay_core::ipc::{Command, Response};
use overlay_core::{Action, Effect, OverlayError, Point, Settings, TimerKind};
use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::ReleaseCapture;
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowRect, HTCAPTION, SendMessageW, WM_NCLBUTTONDOWN,
};

use crate::hotkey::HotkeyManager;
use crate::{notify, process};

use super::daemon_types::OverlayApp;

const NOTIFY_TITLE: &str = "Overlay Player";

/// Whether the daemon keeps running after a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Exit,
}

/// Runs a handler, turning a panic into a log entry.
pub(super) fn guarded(what: &str, f: impl FnOnce() -> Flow) -> Flow {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        overlay_core::log_error!("{what} handler panicked; continuing");
        Flow::Continue
    })
}

/// Logs an error and shows it to the user when it warrants that.
pub(super) fn report(app: &mut OverlayApp, error: &OverlayError) {
    if let Some(message) = app.report(error) {
        notify::show(NOTIFY_TITLE, &message);
    }
}

pub(super) fn handle_command(app: &mut OverlayApp, command: Command) -> (Response, Flow) {
    match command {
        Command::Stop => {
            overlay_core::log_info!("stop command received, shutting down");
            (Response::ok_with_message("Daemon stopping"), Flow::Exit)
        }
        Command::Status => (Response::ok_with_message(app.status()), Flow::Continue),
        Command::Action { action } => match run_action(app, action) {
            Ok((message, flow)) => {
                let response = match message {
                    Some(text) => Response::ok_with_message(text),
                    None => Response::ok(),
                };
                (response, flow)
            }
            Err(e) => {
                let text = e.to_string();
                report(app, &e);
                (Response::error(text), Flow::Continue)
            }
        },
    }
}

/// Runs an action from the hotkey. Messages are only logged.
pub(super) fn handle_action(app: &mut OverlayApp, action: Action) -> Flow {
    match run_action(app, action) {
        Ok((message, flow)) => {
            if let Some(text) = message {
                overlay_core::log_info!("{text}");
            }
            flow
        }
        Err(e) => {
            report(app, &e);
            Flow::Continue
        }
    }
}

fn run_action(
    app: &mut OverlayApp,
    action: Action,
) -> Result<(Option<String>, Flow), OverlayError> {
    Ok(match app.dispatch(action)? {
        Effect::None => (None, Flow::Continue),
        Effect::Message(text) => (Some(text), Flow::Continue),
        Effect::OpenSettings => {
            process::open_in_editor(app.overlay.store().path())?;
            (None, Flow::Continue)
        }
        Effect::Exit => (Some("Overlay closing".into()), Flow::Exit),
    })
}

pub(super) fn handle_reload(
    app: &mut OverlayApp,
    hotkeys: &mut HotkeyManager,
    settings: Settings,
) {
    match app.reload_settings(settings) {
        Ok(false) => {}
        Ok(true) => {
            if let Err(e) = hotkeys.bind(&app.overlay.settings().hotkey) {
                overlay_core::log_warn!("{e}");
            }
        }
        Err(e) => report(app, &e),
    }
}

pub(super) fn handle_timer(app: &mut OverlayApp, kind: TimerKind) {
    if let Err(e) = app.overlay.on_timer(kind) {
        report(app, &e);
    }
}

pub(super) fn handle_display_change(app: &mut OverlayApp) {
    overlay_core::log_info!("display layout changed");
    if let Err(e) = app.overlay.on_display_change() {
        report(app, &e);
    }
}

/// Lets the user drag an interactive overlay.
///
/// Hands the click to the system move loop as a caption click, which
/// returns once the button is released.
pub(super) fn handle_drag(app: &mut OverlayApp, hwnd: HWND) {
    if !app.overlay.begin_drag() {
        return;
    }
    // SAFETY: hwnd is the overlay window owned by this thread.
    unsafe {
        let _ = ReleaseCapture();
        SendMessageW(
            hwnd,
            WM_NCLBUTTONDOWN,
            Some(WPARAM(HTCAPTION as usize)),
            Some(LPARAM(0)),
        );
    }

    let mut rect = RECT::default();
    // SAFETY: writes into a stack RECT.
    let dropped_at =
        unsafe { GetWindowRect(hwnd, &mut rect) }.map(|_| Point::new(rect.left, rect.top));
    let finished = match dropped_at {
        Ok(top_left) => app.overlay.finish_drag(top_left),
        Err(e) => Err(OverlayError::Native(e.to_string())),
    };
    if let Err(e) = finished {
        report(app, &e);
    }
}
