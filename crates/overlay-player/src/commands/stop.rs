use overlay_core::{Command, pid};
use overlay_windows::{ipc, process};

pub fn execute() {
    // Graceful shutdown over IPC saves the overlay's state.
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Stop) {
            Ok(response) if response.is_ok() => {
                println!("Overlay Player stopped. {}", response.message.unwrap_or_default());
                let _ = pid::remove_pid_file();
                return;
            }
            Ok(response) => {
                eprintln!("Error: {}", response.message.unwrap_or("unknown error".into()));
                std::process::exit(1);
            }
            Err(e) => eprintln!("IPC failed: {e}"),
        }
    }

    // No pipe: the process may still be alive with a dead IPC thread.
    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => {
            if process::kill_process(pid) {
                let _ = pid::remove_pid_file();
                println!("Overlay Player stopped (killed PID {pid}).");
            } else {
                eprintln!("Failed to kill process {pid}.");
                std::process::exit(1);
            }
        }
        _ => println!("Overlay Player is not running."),
    }
}
