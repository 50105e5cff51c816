use overlay_core::Action;
use overlay_core::settings::{HotkeyConfig, Modifier};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey,
    UnregisterHotKey,
};

use crate::keys;

const TOGGLE_HOTKEY_ID: i32 = 1;

/// The global show/hide hotkey.
///
/// Registered on the calling thread's message queue, so `WM_HOTKEY`
/// arrives in the daemon's pump. Unregistered on drop.
pub struct HotkeyManager {
    bound: Option<HotkeyConfig>,
}

impl HotkeyManager {
    pub fn new() -> Self {
        Self { bound: None }
    }

    /// Registers `config`, replacing any previous binding.
    ///
    /// Rebinding to the same combination is a no-op.
    pub fn bind(&mut self, config: &HotkeyConfig) -> Result<(), String> {
        if self.bound.as_ref() == Some(config) {
            return Ok(());
        }
        self.unbind();

        let vk = keys::vk_from_name(&config.key)
            .ok_or_else(|| format!("unknown hotkey key name: {:?}", config.key))?;
        let modifiers = config
            .modifiers
            .iter()
            .fold(MOD_NOREPEAT, |flags, m| flags | modifier_flag(*m));

        // SAFETY: RegisterHotKey binds to this thread's queue; the id is
        // unique within the process.
        unsafe { RegisterHotKey(None, TOGGLE_HOTKEY_ID, modifiers, vk) }.map_err(|e| {
            format!("could not register {} (in use by another app?): {e}", keys::describe(config))
        })?;

        overlay_core::log_info!("hotkey {} registered", keys::describe(config));
        self.bound = Some(config.clone());
        Ok(())
    }

    /// Maps a `WM_HOTKEY` id to the action it triggers.
    pub fn action_for(&self, hotkey_id: i32) -> Option<Action> {
        (self.bound.is_some() && hotkey_id == TOGGLE_HOTKEY_ID).then_some(Action::ToggleVisibility)
    }

    fn unbind(&mut self) {
        if self.bound.take().is_some() {
            // SAFETY: removes the registration made in `bind`.
            unsafe {
                let _ = UnregisterHotKey(None, TOGGLE_HOTKEY_ID);
            }
        }
    }
}

impl Default for HotkeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        self.unbind();
    }
}

fn modifier_flag(modifier: Modifier) -> HOT_KEY_MODIFIERS {
    match modifier {
        Modifier::Alt => MOD_ALT,
        Modifier::Shift => MOD_SHIFT,
        Modifier::Ctrl => MOD_CONTROL,
        Modifier::Win => MOD_WIN,
    }
}
