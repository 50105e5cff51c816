use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};

use overlay_core::pid;
use overlay_windows::{ipc, process};

/// `CREATE_NO_WINDOW | CREATE_NEW_PROCESS_GROUP`: the daemon gets no
/// console and ignores Ctrl+C in the terminal that started it.
const DETACH_FLAGS: u32 = 0x0800_0000 | 0x0000_0200;

pub fn execute() {
    if ipc::is_daemon_running() {
        println!("Overlay Player is already running.");
        return;
    }

    // A PID file without a pipe is either a hung daemon or a leftover
    // from one that was killed.
    if let Ok(Some(pid)) = pid::read_pid_file() {
        if process::is_process_alive(pid) {
            println!("Overlay Player process exists (PID: {pid}) but is not responding.");
            return;
        }
        let _ = pid::remove_pid_file();
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not resolve executable path: {e}");
            std::process::exit(1);
        }
    };

    let spawned = Command::new(exe)
        .arg("daemon")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn();

    match spawned {
        Ok(mut child) => {
            let _ = child.try_wait();
            println!("Overlay Player started (PID: {}).", child.id());
            if let Some(path) = overlay_core::settings::settings_path() {
                println!("Settings: {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    }
}
