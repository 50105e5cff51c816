//! Reloads `settings.toml` when it changes on disk.
//!
//! Watches the config directory with `FindFirstChangeNotificationW` and
//! compares the file's mtime so unrelated writes in the directory are
//! ignored. Only files that parse are handed on; a broken edit keeps
//! the running settings.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use overlay_core::Settings;
use overlay_core::settings;
use windows::Win32::Foundation::WAIT_OBJECT_0;
use windows::Win32::Storage::FileSystem::{
    FILE_NOTIFY_CHANGE_FILE_NAME, FILE_NOTIFY_CHANGE_LAST_WRITE, FindCloseChangeNotification,
    FindFirstChangeNotificationW, FindNextChangeNotification,
};
use windows::Win32::System::Threading::WaitForSingleObject;
use windows::core::HSTRING;

/// How often the stop flag is checked while the directory is quiet (ms).
const POLL_INTERVAL_MS: u32 = 1000;

/// Runs until `stop` is set or `on_reload` returns `false`.
pub fn watch(stop: Arc<AtomicBool>, mut on_reload: impl FnMut(Settings) -> bool) {
    let (Some(dir), Some(path)) = (settings::config_dir(), settings::settings_path()) else {
        overlay_core::log_warn!("config dir not found, settings watcher exiting");
        return;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        overlay_core::log_warn!("could not create {}: {e}", dir.display());
        return;
    }

    // SAFETY: the directory exists; the handle is closed below.
    let handle = unsafe {
        FindFirstChangeNotificationW(
            &HSTRING::from(dir.as_os_str()),
            false,
            FILE_NOTIFY_CHANGE_LAST_WRITE | FILE_NOTIFY_CHANGE_FILE_NAME,
        )
    };
    let Ok(handle) = handle else {
        overlay_core::log_warn!("cannot watch {}, settings watcher exiting", dir.display());
        return;
    };

    let mut last_seen = mtime(&path);
    while !stop.load(Ordering::Relaxed) {
        // SAFETY: waits on the change handle with a timeout.
        let signalled = unsafe { WaitForSingleObject(handle, POLL_INTERVAL_MS) } == WAIT_OBJECT_0;
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if !signalled {
            continue;
        }

        let current = mtime(&path);
        if current != last_seen {
            last_seen = current;
            if let Some(settings) = reload(&path)
                && !on_reload(settings)
            {
                break;
            }
        }

        // SAFETY: re-arms the notification on the same handle.
        let _ = unsafe { FindNextChangeNotification(handle) };
    }

    // SAFETY: closes the handle opened above.
    let _ = unsafe { FindCloseChangeNotification(handle) };
}

fn reload(path: &Path) -> Option<Settings> {
    if !path.exists() {
        return None;
    }
    match settings::try_load() {
        Ok(settings) => {
            overlay_core::log_info!("settings.toml changed, reloading");
            Some(settings)
        }
        Err(e) => {
            overlay_core::log_warn!("settings.toml invalid, keeping current settings: {e}");
            None
        }
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}
