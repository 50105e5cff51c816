use std::sync::atomic::Ordering;
use std::sync::mpsc;

use overlay_core::i18n::Text;
use overlay_core::settings::FileStore;
use overlay_core::{App, Overlay, WindowResult};
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, TranslateMessage, WM_HOTKEY, WM_LBUTTONDOWN, WM_TIMER,
};

use crate::desktop::{self, Win32Desktop};
use crate::hotkey::HotkeyManager;
use crate::notify;
use crate::overlay_window::{self, WM_DISPLAY_CHANGED};
use crate::surface::{ANIMATION_TIMER_ID, LayeredSurface};

use super::daemon_handlers::{self as handlers, Flow, guarded};
use super::daemon_threads;
use super::daemon_types::{Bridge, DaemonMsg, OverlayApp, WM_APP_WAKE};

/// The inner daemon loop, separated so cleanup always runs in `run()`.
pub(super) fn daemon_loop() -> WindowResult<()> {
    let store = FileStore::open_default().ok_or("could not determine settings path")?;
    let hwnd = overlay_window::create()?;

    let overlay = Overlay::new(
        Win32Desktop::new(hwnd),
        LayeredSurface::new(hwnd),
        store,
    );
    overlay_core::log::init(&overlay.settings().logging);
    overlay_core::log_info!("daemon started (PID: {})", std::process::id());
    let mut app = App::new(overlay);

    if let Err(e) = app.overlay.start(desktop::handle(hwnd)) {
        let message = format!("{}{e}", app.localizer().get(Text::InitError));
        overlay_core::log_error!("{message}");
        notify::show("Overlay Player", &message);
    }

    let mut hotkeys = HotkeyManager::new();
    if let Err(e) = hotkeys.bind(&app.overlay.settings().hotkey) {
        overlay_core::log_warn!("{e}");
    }

    let (tx, rx) = mpsc::channel::<DaemonMsg>();
    // SAFETY: no arguments; identifies the thread that owns the queue.
    let bridge = Bridge::new(tx, unsafe { GetCurrentThreadId() });
    let ipc_thread = daemon_threads::spawn_ipc_listener(bridge.clone())?;
    let (watcher_stop, watcher_thread) = daemon_threads::spawn_settings_watcher(bridge)?;

    let stopped_by_client = pump(&mut app, &mut hotkeys, hwnd, &rx);

    app.overlay.shutdown();
    drop(hotkeys);
    watcher_stop.store(true, Ordering::Relaxed);
    let _ = watcher_thread.join();
    overlay_window::destroy(hwnd);
    // The listener only returns after relaying a stop; otherwise it is
    // blocked waiting for a client and ends with the process.
    if stopped_by_client {
        let _ = ipc_thread.join();
    }
    overlay_core::log_info!("daemon stopped");
    Ok(())
}

/// Runs the message pump until an exit is requested or the window
/// goes away. Returns `true` when a CLI client asked to stop.
fn pump(
    app: &mut OverlayApp,
    hotkeys: &mut HotkeyManager,
    hwnd: HWND,
    rx: &mpsc::Receiver<DaemonMsg>,
) -> bool {
    let mut msg = MSG::default();
    loop {
        // SAFETY: blocks until a message for this thread arrives.
        let got = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if got.0 <= 0 {
            // WM_QUIT or an invalid queue.
            return false;
        }

        let flow = match msg.message {
            WM_APP_WAKE if msg.hwnd.is_invalid() => {
                match drain(app, hotkeys, rx) {
                    Flow::Exit => return true,
                    Flow::Continue => continue,
                }
            }
            WM_HOTKEY => match hotkeys.action_for(msg.wParam.0 as i32) {
                Some(action) => guarded("hotkey", || handlers::handle_action(app, action)),
                None => Flow::Continue,
            },
            WM_TIMER if msg.hwnd == hwnd => guarded("timer", || {
                match msg.wParam.0 {
                    ANIMATION_TIMER_ID => app.overlay.surface_mut().advance_frame(),
                    id => {
                        if let Some(kind) = desktop::timer_kind(id) {
                            handlers::handle_timer(app, kind);
                        }
                    }
                }
                Flow::Continue
            }),
            WM_LBUTTONDOWN if msg.hwnd == hwnd => guarded("drag", || {
                handlers::handle_drag(app, hwnd);
                Flow::Continue
            }),
            WM_DISPLAY_CHANGED if msg.hwnd == hwnd => guarded("display change", || {
                handlers::handle_display_change(app);
                Flow::Continue
            }),
            _ => {
                // SAFETY: standard translate/dispatch of a retrieved message.
                unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
                Flow::Continue
            }
        };

        if flow == Flow::Exit {
            return false;
        }
    }
}

/// Handles everything queued by the background threads.
fn drain(
    app: &mut OverlayApp,
    hotkeys: &mut HotkeyManager,
    rx: &mpsc::Receiver<DaemonMsg>,
) -> Flow {
    while let Ok(msg) = rx.try_recv() {
        let flow = match msg {
            DaemonMsg::Command(command, reply_tx) => guarded("command", || {
                let (response, flow) = handlers::handle_command(app, command);
                let _ = reply_tx.send(response);
                flow
            }),
            DaemonMsg::Reload(settings) => guarded("reload", || {
                handlers::handle_reload(app, hotkeys, *settings);
                Flow::Continue
            }),
        };
        if flow == Flow::Exit {
            return Flow::Exit;
        }
    }
    Flow::Continue
}
