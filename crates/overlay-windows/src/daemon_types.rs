use std::sync::mpsc;

use overlay_core::ipc::{Command, Response};
use overlay_core::settings::FileStore;
use overlay_core::{App, Settings};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_APP};

use crate::desktop::Win32Desktop;
use crate::surface::LayeredSurface;

/// Thread message that tells the pump the channel has work.
pub(super) const WM_APP_WAKE: u32 = WM_APP + 1;

/// The application as wired up on Windows.
pub(super) type OverlayApp = App<Win32Desktop, LayeredSurface, FileStore>;

/// Work handed to the UI thread by the background threads.
pub(super) enum DaemonMsg {
    /// A CLI command with a callback to send the response.
    Command(Command, ResponseSender),
    /// A validated settings file edited on disk.
    Reload(Box<Settings>),
}

/// Sends a response back to the IPC thread for the connected client.
pub(super) type ResponseSender = mpsc::Sender<Response>;

/// Sending half of the daemon channel.
///
/// The UI thread sleeps in `GetMessageW`, so every send is followed by a
/// wake-up message to its queue.
#[derive(Clone)]
pub(super) struct Bridge {
    tx: mpsc::Sender<DaemonMsg>,
    ui_thread: u32,
}

impl Bridge {
    pub(super) fn new(tx: mpsc::Sender<DaemonMsg>, ui_thread: u32) -> Self {
        Self { tx, ui_thread }
    }

    /// Queues a message. Returns `false` once the UI thread is gone.
    pub(super) fn send(&self, msg: DaemonMsg) -> bool {
        if self.tx.send(msg).is_err() {
            return false;
        }
        // SAFETY: posting to a thread queue; fails only if the thread exited.
        unsafe { PostThreadMessageW(self.ui_thread, WM_APP_WAKE, WPARAM(0), LPARAM(0)) }.is_ok()
    }
}
