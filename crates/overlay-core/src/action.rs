use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::zorder::ZOrderMode;

/// A user-initiated operation on the overlay.
///
/// Actions arrive from the CLI (over IPC) or the global hotkey. They are
/// the same commands the original tray menu exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Show the overlay if hidden, hide it if shown.
    ToggleVisibility,
    /// Display a different media file and remember it.
    ChangeMedia { path: PathBuf },
    /// Rotate the media a quarter turn clockwise.
    Rotate90,
    /// Open `settings.toml` in the default text editor.
    OpenSettings,
    /// Switch between click-through and draggable.
    ToggleInteractive,
    /// Change how the overlay stacks against other windows.
    SetZOrder { mode: ZOrderMode },
    /// Persist state and shut the daemon down.
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_with_type_tag() {
        // Arrange
        let action = Action::SetZOrder {
            mode: ZOrderMode::Wallpaper,
        };

        // Act
        let json = serde_json::to_string(&action).unwrap();

        // Assert
        assert_eq!(json, r#"{"type":"set_z_order","mode":"wallpaper"}"#);
    }

    #[test]
    fn change_media_deserializes_path() {
        // Act
        let action: Action =
            serde_json::from_str(r#"{"type":"change_media","path":"C:/media/cat.gif"}"#).unwrap();

        // Assert
        assert_eq!(
            action,
            Action::ChangeMedia {
                path: PathBuf::from("C:/media/cat.gif")
            }
        );
    }
}
