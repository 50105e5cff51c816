pub mod init;

#[cfg(windows)]
pub mod action;
#[cfg(windows)]
pub mod autostart;
#[cfg(windows)]
pub mod daemon;
#[cfg(windows)]
pub mod start;
#[cfg(windows)]
pub mod status;
#[cfg(windows)]
pub mod stop;

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub use unsupported::{action, autostart, daemon, start, status, stop};
