use overlay_core::WindowResult;
use overlay_core::pid;

use crate::desktop;

#[path = "daemon_handlers.rs"]
mod daemon_handlers;
#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_threads.rs"]
mod daemon_threads;
#[path = "daemon_types.rs"]
mod daemon_types;

/// Runs the overlay daemon until it is told to stop.
///
/// The calling thread owns the overlay window and runs its message
/// pump. The IPC listener and the settings watcher run on their own
/// threads and hand work to the pump through a channel.
pub fn run() -> WindowResult<()> {
    desktop::enable_dpi_awareness();
    pid::write_pid_file()?;
    install_panic_hook();
    eprintln!("Overlay Player daemon started.");

    let result = daemon_loop::daemon_loop();

    let _ = pid::remove_pid_file();
    if let Err(e) = &result {
        overlay_core::log_error!("daemon exited with error: {e}");
    }
    result
}

/// Sends panic reports to the log file. Handlers are wrapped in
/// `catch_unwind`, so the daemon keeps running afterwards.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        overlay_core::log_error!("panic: {info}");
        default_hook(info);
    }));
}
