use overlay_core::{Action, Command};
use overlay_windows::ipc;

/// Sends an action to the running daemon and prints its reply.
pub fn execute(action: Action) {
    if !ipc::is_daemon_running() {
        eprintln!("Overlay Player is not running. Start it with `overlay-player start`.");
        std::process::exit(1);
    }

    match ipc::send_command(&Command::Action { action }) {
        Ok(response) if response.is_ok() => {
            if let Some(message) = response.message {
                println!("{message}");
            }
        }
        Ok(response) => {
            eprintln!("Error: {}", response.message.unwrap_or("unknown error".into()));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to send action: {e}");
            std::process::exit(1);
        }
    }
}
