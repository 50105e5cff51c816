//! Start-on-logon registration.
//!
//! Stores `"<exe>" start` as the `OverlayPlayer` value under
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Run`. HKCU is per-user,
//! so no elevation is needed.

use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_SAM_FLAGS, REG_SZ, RegCloseKey,
    RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW,
};
use windows::core::{PCWSTR, w};

fn value_name() -> PCWSTR {
    w!("OverlayPlayer")
}

/// An open handle to the Run key, closed on drop.
struct RunKey(HKEY);

impl RunKey {
    fn open(access: REG_SAM_FLAGS) -> Result<Self, String> {
        let mut key = HKEY::default();
        // SAFETY: the out pointer is a local; the key is closed on drop.
        let status = unsafe {
            RegOpenKeyExW(
                HKEY_CURRENT_USER,
                w!(r"Software\Microsoft\Windows\CurrentVersion\Run"),
                None,
                access,
                &mut key,
            )
        };
        if status.is_err() {
            return Err(format!("could not open the Run registry key: {status:?}"));
        }
        Ok(Self(key))
    }

    fn set(&self, value: &str) -> Result<(), String> {
        let wide: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
        let bytes: Vec<u8> = wide.iter().flat_map(|c| c.to_le_bytes()).collect();
        // SAFETY: REG_SZ data is the UTF-16 string including its terminator.
        let status = unsafe { RegSetValueExW(self.0, value_name(), None, REG_SZ, Some(&bytes)) };
        if status.is_err() {
            return Err(format!("could not write the autostart value: {status:?}"));
        }
        Ok(())
    }

    fn delete(&self) -> Result<(), String> {
        // SAFETY: deletes a named value under an open key.
        let status = unsafe { RegDeleteValueW(self.0, value_name()) };
        if status.is_err() && status != ERROR_FILE_NOT_FOUND {
            return Err(format!("could not remove the autostart value: {status:?}"));
        }
        Ok(())
    }

    fn has_value(&self) -> bool {
        // SAFETY: a null data buffer only checks existence.
        unsafe { RegQueryValueExW(self.0, value_name(), None, None, None, None) }.is_ok()
    }
}

impl Drop for RunKey {
    fn drop(&mut self) {
        // SAFETY: the key was opened by `RunKey::open`.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Registers the overlay to start on logon.
pub fn enable() -> Result<(), String> {
    let exe = std::env::current_exe().map_err(|e| format!("could not resolve exe path: {e}"))?;
    let command = format!("\"{}\" start", exe.display());
    RunKey::open(KEY_SET_VALUE)?.set(&command)?;
    overlay_core::log_info!("autostart enabled: {command}");
    Ok(())
}

/// Removes the logon entry. Succeeds when there was none.
pub fn disable() -> Result<(), String> {
    RunKey::open(KEY_SET_VALUE)?.delete()
}

/// Whether the logon entry exists.
pub fn is_enabled() -> bool {
    RunKey::open(KEY_QUERY_VALUE).is_ok_and(|key| key.has_value())
}
