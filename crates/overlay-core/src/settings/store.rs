use std::path::PathBuf;

use super::Settings;
use super::loader;

/// Where settings are read from at startup and written on every mutation.
pub trait SettingsStore {
    /// Reads the persisted settings, falling back to defaults.
    fn load(&mut self) -> Settings;

    /// Persists the settings. Best effort: callers log failures.
    fn save(&mut self, settings: &Settings) -> Result<(), String>;
}

/// TOML file store under the user's config directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default `settings.toml` location.
    pub fn open_default() -> Option<Self> {
        loader::settings_path().map(Self::new)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&mut self) -> Settings {
        loader::load_or_default(&self.path)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), String> {
        loader::write_atomic(&self.path, settings)
            .map_err(|e| format!("{}: {e}", self.path.display()))
    }
}
