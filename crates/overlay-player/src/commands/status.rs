use overlay_core::{Command, pid};
use overlay_windows::{ipc, process};

pub fn execute() {
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Status) {
            Ok(response) if response.is_ok() => {
                println!("Overlay Player is running.");
                if let Some(summary) = response.message {
                    println!("  {summary}");
                }
            }
            _ => println!("Overlay Player is running (no status available)."),
        }
        return;
    }

    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => {
            println!("Overlay Player process exists (PID: {pid}) but is not responding.");
        }
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("Overlay Player is not running (cleaned up stale PID file).");
        }
        _ => println!("Overlay Player is not running."),
    }
}
