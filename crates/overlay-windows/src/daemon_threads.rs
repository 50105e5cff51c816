use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread;

use super::daemon_ipc;
use super::daemon_types::{Bridge, DaemonMsg};

/// Spawns the IPC listener thread.
pub(super) fn spawn_ipc_listener(bridge: Bridge) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("overlay-ipc".into())
        .spawn(move || daemon_ipc::ipc_loop(bridge))
}

/// Spawns the settings watcher. Set the returned flag to stop it.
pub(super) fn spawn_settings_watcher(
    bridge: Bridge,
) -> io::Result<(Arc<AtomicBool>, thread::JoinHandle<()>)> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();
    let handle = thread::Builder::new()
        .name("overlay-settings-watcher".into())
        .spawn(move || {
            crate::settings_watcher::watch(stop_flag, |settings| {
                bridge.send(DaemonMsg::Reload(Box::new(settings)))
            });
        })?;
    Ok((stop, handle))
}
