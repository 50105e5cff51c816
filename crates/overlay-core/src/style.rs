//! Click-through and always-above style bits for the overlay window.

use crate::platform::{ExStyle, WindowHandle, WindowResult, WindowSystem};

/// Bits that keep the overlay out of the taskbar and away from focus.
/// They stay set in both locked and editable states.
const SHELL_HIDDEN: ExStyle = ExStyle(ExStyle::TOOLWINDOW.0 | ExStyle::NOACTIVATE.0);

/// Computes the extended style for the requested click-through state.
///
/// Enabling adds mouse transparency, the layered and topmost categories,
/// and the shell-hidden bits. Disabling clears only `TRANSPARENT`.
pub fn click_through_style(current: ExStyle, enabled: bool) -> ExStyle {
    let base = current.without(ExStyle::APPWINDOW) | SHELL_HIDDEN;
    if enabled {
        base | ExStyle::TRANSPARENT | ExStyle::LAYERED | ExStyle::TOPMOST
    } else {
        base.without(ExStyle::TRANSPARENT)
    }
}

/// Applies and removes window style attributes on the overlay handle.
pub struct WindowStyleController;

impl WindowStyleController {
    /// Makes the window click-through (`enabled`) or editable.
    ///
    /// Skipped when the window has not been materialized yet or the
    /// handle is stale. Writes only when the bits actually change.
    pub fn set_click_through(
        system: &mut impl WindowSystem,
        window: Option<WindowHandle>,
        enabled: bool,
    ) -> WindowResult<()> {
        let Some(window) = live(system, window) else {
            return Ok(());
        };
        let current = system.ex_style(window)?;
        let desired = click_through_style(current, enabled);
        if desired != current {
            system.set_ex_style(window, desired)?;
        }
        Ok(())
    }

    /// Restores the always-above style category.
    ///
    /// Some fullscreen transitions reset extended styles on other windows,
    /// so the z-order watchdog calls this after detecting one.
    pub fn reassert_always_above(
        system: &mut impl WindowSystem,
        window: Option<WindowHandle>,
    ) -> WindowResult<()> {
        let Some(window) = live(system, window) else {
            return Ok(());
        };
        let current = system.ex_style(window)?;
        let desired = current | SHELL_HIDDEN | ExStyle::TOPMOST;
        if desired != current {
            system.set_ex_style(window, desired)?;
        }
        Ok(())
    }
}

fn live(system: &impl WindowSystem, window: Option<WindowHandle>) -> Option<WindowHandle> {
    window.filter(|&w| system.is_window(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSystem;

    #[test]
    fn enabling_adds_all_click_through_bits() {
        // Act
        let style = click_through_style(ExStyle::default(), true);

        // Assert
        assert!(style.contains(ExStyle::TRANSPARENT));
        assert!(style.contains(ExStyle::TOOLWINDOW));
        assert!(style.contains(ExStyle::NOACTIVATE));
        assert!(style.contains(ExStyle::TOPMOST));
        assert!(style.contains(ExStyle::LAYERED));
    }

    #[test]
    fn disabling_keeps_taskbar_exclusion_and_no_activate() {
        // Arrange
        let locked = click_through_style(ExStyle::default(), true);

        // Act
        let editable = click_through_style(locked, false);

        // Assert
        assert!(!editable.contains(ExStyle::TRANSPARENT));
        assert!(editable.contains(ExStyle::TOOLWINDOW));
        assert!(editable.contains(ExStyle::NOACTIVATE));
        assert_eq!(editable, locked.without(ExStyle::TRANSPARENT));
    }

    #[test]
    fn enabling_twice_matches_enabling_once() {
        // Arrange
        let mut system = FakeSystem::new();
        let window = Some(system.overlay);

        // Act
        WindowStyleController::set_click_through(&mut system, window, true).unwrap();
        let once = system.style_of(system.overlay);
        WindowStyleController::set_click_through(&mut system, window, true).unwrap();
        let twice = system.style_of(system.overlay);

        // Assert
        assert_eq!(once, twice);
        assert_eq!(system.style_writes, 1);
    }

    #[test]
    fn missing_window_is_skipped() {
        // Arrange
        let mut system = FakeSystem::new();

        // Act
        let result = WindowStyleController::set_click_through(&mut system, None, true);

        // Assert
        assert!(result.is_ok());
        assert_eq!(system.style_writes, 0);
    }

    #[test]
    fn stale_handle_is_skipped() {
        // Arrange
        let mut system = FakeSystem::new();
        let stale = WindowHandle(0xDEAD);

        // Act
        let result = WindowStyleController::set_click_through(&mut system, Some(stale), true);

        // Assert
        assert!(result.is_ok());
        assert_eq!(system.style_writes, 0);
    }

    #[test]
    fn reassert_restores_topmost_bit() {
        // Arrange
        let mut system = FakeSystem::new();
        let window = system.overlay;
        system.styles.insert(window, ExStyle::LAYERED);

        // Act
        WindowStyleController::reassert_always_above(&mut system, Some(window)).unwrap();

        // Assert
        let style = system.style_of(window);
        assert!(style.contains(ExStyle::TOPMOST | ExStyle::TOOLWINDOW | ExStyle::NOACTIVATE));
        assert!(style.contains(ExStyle::LAYERED));
    }
}
