use std::path::Path;

use overlay_core::WindowResult;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_TERMINATE, TerminateProcess,
};
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
use windows::core::{HSTRING, w};

/// Checks whether a process with the given PID is still alive.
///
/// Used to tell a stale PID file (daemon killed without cleanup) from a
/// running daemon.
pub fn is_process_alive(pid: u32) -> bool {
    // SAFETY: least-privilege open; the handle is closed right away.
    match unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) } {
        Ok(handle) => {
            unsafe {
                let _ = CloseHandle(handle);
            }
            true
        }
        Err(_) => false,
    }
}

/// Forcefully ends a process. Returns `true` if it was terminated.
///
/// Last resort for a daemon that no longer answers on its pipe.
pub fn kill_process(pid: u32) -> bool {
    // SAFETY: the handle is only used for TerminateProcess and closed after.
    let Ok(handle) = (unsafe { OpenProcess(PROCESS_TERMINATE, false, pid) }) else {
        return false;
    };
    // SAFETY: handle was opened above with PROCESS_TERMINATE.
    let killed = unsafe { TerminateProcess(handle, 1) }.is_ok();
    // SAFETY: handle is not used after this point.
    unsafe {
        let _ = CloseHandle(handle);
    }
    killed
}

/// Opens a text file in Notepad without blocking.
pub fn open_in_editor(path: &Path) -> WindowResult<()> {
    let quoted = HSTRING::from(format!("\"{}\"", path.display()));
    // SAFETY: all strings outlive the call; ShellExecuteW does not keep them.
    let result = unsafe {
        ShellExecuteW(
            None,
            w!("open"),
            w!("notepad.exe"),
            &quoted,
            None,
            SW_SHOWNORMAL,
        )
    };
    // Values above 32 mean success.
    if result.0 as isize <= 32 {
        return Err(format!("could not open {} in an editor", path.display()).into());
    }
    Ok(())
}
