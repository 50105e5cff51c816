//! Application context: the overlay plus the localizer and error
//! reporter, and the mapping from actions to overlay operations.

use std::time::Instant;

use crate::action::Action;
use crate::error::{ErrorReporter, OverlayError};
use crate::i18n::{Localizer, Text};
use crate::media::MediaSurface;
use crate::overlay::Overlay;
use crate::platform::WindowSystem;
use crate::settings::{Settings, SettingsStore};

/// What the platform layer must do after an action ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Text for the CLI response (or a notification).
    Message(String),
    /// Open `settings.toml` in an editor.
    OpenSettings,
    /// Tear down the daemon.
    Exit,
}

pub struct App<W: WindowSystem, M: MediaSurface, S: SettingsStore> {
    pub overlay: Overlay<W, M, S>,
    localizer: Localizer,
    reporter: ErrorReporter,
}

impl<W: WindowSystem, M: MediaSurface, S: SettingsStore> App<W, M, S> {
    pub fn new(overlay: Overlay<W, M, S>) -> Self {
        let localizer = Localizer::new(&overlay.settings().language);
        Self {
            overlay,
            localizer,
            reporter: ErrorReporter::new(),
        }
    }

    /// Runs an action against the overlay.
    pub fn dispatch(&mut self, action: Action) -> Result<Effect, OverlayError> {
        crate::log_debug!("action: {action:?}");
        let effect = match action {
            Action::ToggleVisibility => {
                let text = if self.overlay.toggle_visibility()? {
                    Text::Shown
                } else {
                    Text::Hidden
                };
                Effect::Message(self.localizer.get(text).into())
            }
            Action::ChangeMedia { path } => {
                self.overlay.change_media(&path)?;
                Effect::None
            }
            Action::Rotate90 => {
                self.overlay.rotate_90()?;
                Effect::Message(self.localizer.get(Text::Rotated).into())
            }
            Action::OpenSettings => {
                self.overlay.open_settings()?;
                Effect::OpenSettings
            }
            Action::ToggleInteractive => {
                let text = if self.overlay.toggle_interactive()? {
                    Text::EditModeActive
                } else {
                    Text::Locked
                };
                Effect::Message(self.localizer.get(text).into())
            }
            Action::SetZOrder { mode } => {
                self.overlay.set_z_order(mode)?;
                Effect::None
            }
            Action::Exit => {
                self.overlay.shutdown();
                Effect::Exit
            }
        };
        Ok(effect)
    }

    /// Applies settings edited on disk, including language and log level.
    pub fn reload_settings(&mut self, settings: Settings) -> Result<bool, OverlayError> {
        let changed = self.overlay.reload_settings(settings);
        let current = self.overlay.settings();
        self.localizer.set_language(&current.language);
        crate::log::reconfigure(&current.logging);
        changed
    }

    /// Logs an error and returns the message to show the user, if any.
    pub fn report(&mut self, error: &OverlayError) -> Option<String> {
        self.reporter.report(error, &self.localizer, Instant::now())
    }

    /// One-line summary for the `status` command.
    pub fn status(&self) -> String {
        let settings = self.overlay.settings();
        let media = match &settings.last_file_path {
            Some(path) => path.display().to_string(),
            None => self.localizer.get(Text::NoMedia).to_string(),
        };
        format!(
            "{}, {:?}, {}, rotation {}°, {}",
            if self.overlay.is_visible() { "visible" } else { "hidden" },
            settings.z_order,
            if settings.is_interactive { "interactive" } else { "locked" },
            settings.rotation,
            media
        )
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }
}
