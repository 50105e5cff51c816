use std::sync::mpsc;

use overlay_core::Action;
use overlay_core::ipc::{Command, Response};

use crate::ipc::PipeServer;

use super::daemon_types::{Bridge, DaemonMsg, ResponseSender};

/// Accepts CLI connections and forwards each command to the UI thread.
/// Runs on a dedicated thread; returns after relaying a stop.
pub(super) fn ipc_loop(bridge: Bridge) {
    let server = match PipeServer::create() {
        Ok(s) => s,
        Err(e) => {
            overlay_core::log_error!("IPC unavailable: {e}");
            return;
        }
    };

    loop {
        let command = match server.accept_command() {
            Ok(cmd) => cmd,
            Err(e) => {
                overlay_core::log_warn!("bad IPC request: {e}");
                continue;
            }
        };

        let stops = is_stop(&command);
        let (reply_tx, reply_rx): (ResponseSender, _) = mpsc::channel();
        if !bridge.send(DaemonMsg::Command(command, reply_tx)) {
            let _ = server.send_response(&Response::error("daemon is shutting down"));
            return;
        }

        let response = reply_rx
            .recv()
            .unwrap_or_else(|_| Response::error("daemon dropped the request"));
        if let Err(e) = server.send_response(&response) {
            overlay_core::log_warn!("could not answer IPC client: {e}");
        }

        if stops {
            return;
        }
    }
}

fn is_stop(command: &Command) -> bool {
    matches!(
        command,
        Command::Stop
            | Command::Action {
                action: Action::Exit
            }
    )
}
