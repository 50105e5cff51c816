#![cfg(windows)]

/// Registry Run-key autostart.
pub mod autostart;

/// Daemon main loop.
pub mod daemon;

/// `WindowSystem` implementation over Win32.
pub mod desktop;

/// Global toggle hotkey.
pub mod hotkey;

/// IPC via Named Pipes.
pub mod ipc;

/// Key name to virtual-key translation.
pub mod keys;

/// Monitor geometry queries.
pub mod monitor;

/// Message boxes shown off the UI thread.
pub mod notify;

/// The overlay's native window class.
pub mod overlay_window;

/// Process utilities (alive check, kill, editor launch).
pub mod process;

/// Watches `settings.toml` for edits.
pub mod settings_watcher;

/// Layered-window media surface.
pub mod surface;

pub use desktop::Win32Desktop;
pub use surface::LayeredSurface;
