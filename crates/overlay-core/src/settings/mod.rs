mod loader;
pub mod store;
pub mod template;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::rect::Point;
use crate::zorder::ZOrderMode;

pub use loader::{config_dir, load, settings_path, try_load};
pub use store::{FileStore, SettingsStore};

/// Smallest accepted window edge, in pixels.
pub const MIN_WINDOW_SIZE: f64 = 50.0;
/// Largest accepted window edge, in pixels.
pub const MAX_WINDOW_SIZE: f64 = 4000.0;
/// Window edge used when none (or garbage) is stored.
pub const DEFAULT_WINDOW_SIZE: f64 = 300.0;

const MIN_OPACITY: f64 = 0.1;
const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;
const LANGUAGES: &[&str] = &["en", "tr"];

/// Persisted user settings.
///
/// Loaded from `~/.config/overlay-player/settings.toml`. Missing keys fall
/// back to defaults thanks to `#[serde(default)]`. Tables are declared
/// after plain values so the TOML serializer can emit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The media file currently displayed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_file_path: Option<PathBuf>,
    /// Constant window opacity (0.1–1.0).
    pub opacity: f64,
    /// Long edge of the window in pixels (50–4000).
    pub window_size: f64,
    /// Scale the short edge by the media's aspect ratio.
    pub lock_aspect_ratio: bool,
    /// Accept mouse input (drag to move). `false` means click-through.
    pub is_interactive: bool,
    /// Stacking behaviour relative to other windows.
    pub z_order: ZOrderMode,
    /// Clockwise rotation: 0, 90, 180, or 270 degrees.
    pub rotation: i32,
    /// Audio volume (0.0–1.0) for media with sound.
    pub volume: f64,
    pub is_muted: bool,
    /// UI language code ("en" or "tr").
    pub language: String,
    /// Key for the remote media search service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Last top-left corner the user dragged the window to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Automatic advancement through the media folder.
    pub slideshow: SlideshowConfig,
    /// Global key combination that toggles visibility.
    pub hotkey: HotkeyConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Slideshow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    pub enabled: bool,
    /// Seconds between advances (minimum 1).
    pub interval_secs: u64,
}

/// The toggle-visibility hotkey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Key name (e.g. "H", "F8", "Space").
    pub key: String,
    /// Modifier keys (e.g. ["ctrl", "shift"]).
    pub modifiers: Vec<Modifier>,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_file_path: None,
            opacity: 1.0,
            window_size: DEFAULT_WINDOW_SIZE,
            lock_aspect_ratio: true,
            is_interactive: false,
            z_order: ZOrderMode::AlwaysOnTop,
            rotation: 0,
            volume: 0.5,
            is_muted: false,
            language: "en".into(),
            api_key: None,
            position: None,
            slideshow: SlideshowConfig::default(),
            hotkey: HotkeyConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 10,
        }
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            key: "H".into(),
            modifiers: vec![Modifier::Ctrl, Modifier::Shift],
        }
    }
}

impl Settings {
    /// Clamps numeric values to safe ranges.
    ///
    /// Corrupt persisted values are never rejected, only pulled back into
    /// range so the overlay can always start.
    pub fn validate(&mut self) {
        self.window_size = clamp_window_size(self.window_size);
        self.opacity = clamp_unit(self.opacity, 1.0).max(MIN_OPACITY);
        self.volume = clamp_unit(self.volume, 0.5);
        self.rotation = normalize_rotation(self.rotation);
        self.slideshow.interval_secs = self
            .slideshow
            .interval_secs
            .clamp(crate::slideshow::MIN_INTERVAL_SECS, MAX_INTERVAL_SECS);
        if !LANGUAGES.contains(&self.language.as_str()) {
            self.language = "en".into();
        }
    }
}

/// Clamps a window edge to `[MIN_WINDOW_SIZE, MAX_WINDOW_SIZE]`.
///
/// Non-finite values fall back to the default size.
pub fn clamp_window_size(size: f64) -> f64 {
    if !size.is_finite() {
        return DEFAULT_WINDOW_SIZE;
    }
    size.clamp(MIN_WINDOW_SIZE, MAX_WINDOW_SIZE)
}

/// Snaps any angle to the nearest lower multiple of 90 in `0..360`.
pub fn normalize_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(360) / 90 * 90
}

fn clamp_unit(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_expected_values() {
        // Arrange / Act
        let settings = Settings::default();

        // Assert
        assert_eq!(settings.window_size, 300.0);
        assert_eq!(settings.z_order, ZOrderMode::AlwaysOnTop);
        assert!(settings.lock_aspect_ratio);
        assert!(!settings.is_interactive);
        assert_eq!(settings.slideshow.interval_secs, 10);
    }

    #[test]
    fn window_size_is_clamped_at_both_ends() {
        // Act / Assert
        assert_eq!(clamp_window_size(10.0), 50.0);
        assert_eq!(clamp_window_size(9000.0), 4000.0);
        assert_eq!(clamp_window_size(420.0), 420.0);
        assert_eq!(clamp_window_size(f64::NAN), DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn validate_clamps_corrupt_values() {
        // Arrange
        let mut settings = Settings {
            window_size: -5.0,
            opacity: 7.0,
            volume: -1.0,
            rotation: 450,
            language: "xx".into(),
            slideshow: SlideshowConfig {
                enabled: true,
                interval_secs: 0,
            },
            ..Default::default()
        };

        // Act
        settings.validate();

        // Assert
        assert_eq!(settings.window_size, MIN_WINDOW_SIZE);
        assert_eq!(settings.opacity, 1.0);
        assert_eq!(settings.volume, 0.0);
        assert_eq!(settings.rotation, 90);
        assert_eq!(settings.language, "en");
        assert_eq!(settings.slideshow.interval_secs, 1);
    }

    #[test]
    fn rotation_normalizes_negative_and_odd_angles() {
        // Act / Assert
        assert_eq!(normalize_rotation(-90), 270);
        assert_eq!(normalize_rotation(359), 270);
        assert_eq!(normalize_rotation(360), 0);
        assert_eq!(normalize_rotation(180), 180);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_keys() {
        // Arrange
        let toml_str = "window_size = 420.0\nz_order = \"wallpaper\"\n\n[slideshow]\nenabled = true\n";

        // Act
        let settings: Settings = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(settings.window_size, 420.0);
        assert_eq!(settings.z_order, ZOrderMode::Wallpaper);
        assert!(settings.slideshow.enabled);
        assert_eq!(settings.slideshow.interval_secs, 10);
        assert_eq!(settings.hotkey.key, "H");
    }

    #[test]
    fn settings_survive_a_toml_round_trip() {
        // Arrange
        let settings = Settings {
            last_file_path: Some(PathBuf::from("C:/media/cat.gif")),
            position: Some(Point::new(12, 640)),
            ..Default::default()
        };

        // Act
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();

        // Assert
        assert_eq!(parsed, settings);
    }
}
