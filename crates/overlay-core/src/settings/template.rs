/// Generates the default `settings.toml` contents with explanatory comments.
///
/// Used by `overlay-player init` to create a starter file that users can
/// edit by hand while the overlay is running (changes are picked up live).
pub fn generate_settings() -> String {
    r##"# Overlay Player settings
# Location: ~/.config/overlay-player/settings.toml
# Edits are applied live while the overlay is running.

# Media file to display. Set with `overlay-player action change-media <path>`.
# last_file_path = "C:/Users/me/Pictures/cat.gif"

# Window opacity from 0.1 (faint) to 1.0 (solid).
opacity = 1.0
# Long edge of the window in pixels (50 to 4000).
window_size = 300.0
# Scale the short edge by the media's aspect ratio.
lock_aspect_ratio = true
# Accept mouse input so the window can be dragged.
# false = click-through (mouse events pass to the windows below).
is_interactive = false
# Stacking: "always_on_top", "wallpaper" (behind other apps), or "normal".
z_order = "always_on_top"
# Clockwise rotation in degrees: 0, 90, 180, or 270.
rotation = 0
# Audio volume from 0.0 to 1.0.
volume = 0.5
is_muted = false
# Message language: "en" or "tr".
language = "en"

[slideshow]
# Advance through the other media files in the same folder.
enabled = false
# Seconds between advances (minimum 1).
interval_secs = 10

[hotkey]
# Global key combination that shows or hides the overlay.
key = "H"
modifiers = ["ctrl", "shift"]

[logging]
# Enable file logging to ~/.config/overlay-player/logs/overlay-player.log.
enabled = true
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
