//! File-based logger with size-based rotation.
//!
//! Logs are written to `~/.config/overlay-player/logs/overlay-player.log`.
//! When the file exceeds the configured max size it is renamed to
//! `overlay-player.log.1` (one backup kept) and a fresh file is started.
//! The minimum level can be changed at runtime when settings reload.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "overlay-player.log";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parses a level name; anything unknown means `Info`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

struct Logger {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

/// Initialises the global logger under the config directory.
///
/// Does nothing if `config.enabled` is `false` or the logger is already
/// running (use [`reconfigure`] to change the level later).
pub fn init(config: &LogConfig) {
    let Some(dir) = crate::settings::config_dir() else {
        return;
    };
    init_in(&dir.join("logs"), config);
}

/// Initialises the global logger in an explicit directory.
pub fn init_in(log_dir: &Path, config: &LogConfig) {
    if !config.enabled || LOGGER.get().is_some() {
        return;
    }
    if fs::create_dir_all(log_dir).is_err() {
        return;
    }
    let path = log_dir.join(LOG_FILE_NAME);
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let written = file.metadata().map(|m| m.len()).unwrap_or(0);

    let _ = LOGGER.set(Mutex::new(Logger {
        file,
        path,
        min_level: Level::parse(&config.level),
        max_bytes: config.max_file_mb * 1024 * 1024,
        written,
    }));
}

/// Applies a new level and size limit to a running logger.
pub fn reconfigure(config: &LogConfig) {
    let Some(mutex) = LOGGER.get() else {
        init(config);
        return;
    };
    if let Ok(mut logger) = mutex.lock() {
        logger.min_level = if config.enabled {
            Level::parse(&config.level)
        } else {
            // Disabled after start: keep only errors.
            Level::Error
        };
        logger.max_bytes = config.max_file_mb * 1024 * 1024;
    }
}

/// Writes a log line if the level is at or above the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    if level < logger.min_level {
        return;
    }
    let line = format!("{} [{level}] {args}\n", timestamp());
    if logger.file.write_all(line.as_bytes()).is_ok() {
        logger.written += line.len() as u64;
    }
    if logger.max_bytes > 0 && logger.written >= logger.max_bytes {
        logger.rotate();
    }
}

impl Logger {
    fn rotate(&mut self) {
        let backup = backup_path(&self.path);
        let _ = fs::rename(&self.path, &backup);
        if let Ok(f) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            self.file = f;
        }
        self.written = 0;
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".1");
    path.with_file_name(name)
}

/// UTC wall-clock time of day. No chrono dependency.
fn timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}.{:03}", dur.subsec_millis())
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_names_mean_info() {
        // Act / Assert
        assert_eq!(Level::parse("DEBUG"), Level::Debug);
        assert_eq!(Level::parse("warning"), Level::Warn);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn backup_keeps_original_name_with_suffix() {
        // Act
        let backup = backup_path(Path::new("/logs/overlay-player.log"));

        // Assert
        assert_eq!(backup, PathBuf::from("/logs/overlay-player.log.1"));
    }
}
