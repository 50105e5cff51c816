use std::io;
use std::path::{Path, PathBuf};

use super::Settings;

/// Returns the config directory: `~/.config/overlay-player/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("overlay-player"))
}

/// Returns the settings file path: `~/.config/overlay-player/settings.toml`.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("settings.toml"))
}

/// Tries to read and parse a settings file.
///
/// Returns the validated settings, or an error string naming the file
/// and what went wrong.
pub fn try_load_from(path: &Path) -> Result<Settings, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Tries to load `settings.toml` from the config directory.
pub fn try_load() -> Result<Settings, String> {
    let path = settings_path().ok_or("could not determine settings path")?;
    try_load_from(&path)
}

/// Loads the settings, falling back to defaults.
///
/// A missing file silently yields defaults; a corrupt one is logged and
/// replaced by defaults so the overlay still starts.
pub fn load() -> Settings {
    let Some(path) = settings_path() else {
        return Settings::default();
    };
    load_or_default(&path)
}

pub(crate) fn load_or_default(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    match try_load_from(path) {
        Ok(settings) => settings,
        Err(e) => {
            crate::log_warn!("settings unreadable, using defaults: {e}");
            Settings::default()
        }
    }
}

/// Parses TOML text into validated settings.
pub fn parse(content: &str) -> Result<Settings, toml::de::Error> {
    let mut settings: Settings = toml::from_str(content)?;
    settings.validate();
    Ok(settings)
}

/// Writes settings atomically: a sibling temp file is written first and
/// then renamed over the target.
pub(crate) fn write_atomic(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let text = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, text)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let settings = load_or_default(&dir.path().join("settings.toml"));

        // Assert
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "window_size = [not toml").unwrap();

        // Act
        let settings = load_or_default(&path);

        // Assert
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn loaded_values_are_clamped() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "window_size = 9000.0\n").unwrap();

        // Act
        let settings = try_load_from(&path).unwrap();

        // Assert
        assert_eq!(settings.window_size, 4000.0);
    }

    #[test]
    fn atomic_write_replaces_file_and_leaves_no_temp() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = Settings {
            window_size: 640.0,
            ..Default::default()
        };

        // Act
        write_atomic(&path, &settings).unwrap();

        // Assert
        assert_eq!(try_load_from(&path).unwrap().window_size, 640.0);
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
