//! Z-order watchdog: keeps the overlay in its configured stack slot.
//!
//! Other applications steal the top (or bottom) slot all the time and
//! there is no notification when they do. The watchdog polls the
//! foreground window on a short timer and re-asserts the overlay's
//! position whenever the desktop changes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::platform::{StackSlot, WindowHandle, WindowResult, WindowSystem};
use crate::style::WindowStyleController;

/// How often the watchdog checks the foreground window.
pub const WATCHDOG_INTERVAL: Duration = Duration::from_millis(300);

/// Where the overlay lives in the desktop's window stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZOrderMode {
    /// Ordinary window stacking.
    Normal,
    /// Above every other window, fullscreen applications included.
    #[default]
    AlwaysOnTop,
    /// Behind every other application window.
    Wallpaper,
}

impl ZOrderMode {
    /// The stack slot this mode converges to.
    pub fn slot(self) -> StackSlot {
        match self {
            Self::Normal => StackSlot::NotTopmost,
            Self::AlwaysOnTop => StackSlot::Topmost,
            Self::Wallpaper => StackSlot::Bottom,
        }
    }

    /// Whether the watchdog timer has anything to enforce.
    pub fn needs_watchdog(self) -> bool {
        self != Self::Normal
    }
}

/// What the desktop looked like at one watchdog tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForegroundSnapshot {
    pub foreground: Option<WindowHandle>,
    /// Another window covers an entire monitor.
    pub fullscreen: bool,
}

impl ForegroundSnapshot {
    /// Reads the foreground window and classifies it.
    ///
    /// The overlay itself never counts as a fullscreen intruder.
    pub fn capture(system: &impl WindowSystem, overlay: WindowHandle) -> Self {
        let foreground = system.foreground_window();
        let fullscreen = foreground
            .filter(|&fg| fg != overlay)
            .is_some_and(|fg| covers_monitor(system, fg));
        Self {
            foreground,
            fullscreen,
        }
    }
}

/// Exact-match fullscreen heuristic.
///
/// A borderless window inset by even one pixel is not detected.
pub fn is_fullscreen(window: Rect, monitor: Rect) -> bool {
    window == monitor
}

fn covers_monitor(system: &impl WindowSystem, window: WindowHandle) -> bool {
    match (system.window_rect(window), system.monitor_rect(window)) {
        (Ok(rect), Ok(monitor)) => is_fullscreen(rect, monitor),
        _ => false,
    }
}

/// Result of a single watchdog tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed since the last tick; no native calls issued.
    Idle,
    /// The stack position was re-asserted once.
    Asserted,
    /// A fullscreen window was detected; style and position were
    /// re-asserted twice.
    AssertedOverFullscreen,
}

/// Converges the overlay's stack position to the configured mode.
#[derive(Debug, Default)]
pub struct ZOrderEnforcer {
    /// Foreground seen at the last successful assert. Only meaningful
    /// while `primed` is set, since `None` is a valid foreground.
    last_foreground: Option<WindowHandle>,
    primed: bool,
}

impl ZOrderEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asserts the stack slot for `mode` immediately.
    ///
    /// Forgets the remembered foreground window so the next tick takes
    /// the full path even if focus has not moved.
    pub fn apply(
        &mut self,
        system: &mut impl WindowSystem,
        window: WindowHandle,
        mode: ZOrderMode,
    ) -> WindowResult<()> {
        self.primed = false;
        system.set_stack_position(window, mode.slot())
    }

    /// Runs one watchdog pass.
    pub fn tick(
        &mut self,
        system: &mut impl WindowSystem,
        window: WindowHandle,
        mode: ZOrderMode,
    ) -> WindowResult<TickOutcome> {
        if !mode.needs_watchdog() {
            return Ok(TickOutcome::Idle);
        }

        let foreground = system.foreground_window();
        if self.primed && foreground == self.last_foreground {
            return Ok(TickOutcome::Idle);
        }
        system.set_stack_position(window, mode.slot())?;
        // Only a successful assert is remembered.
        self.last_foreground = foreground;
        self.primed = true;

        let snapshot = ForegroundSnapshot::capture(system, window);
        if !snapshot.fullscreen {
            return Ok(TickOutcome::Asserted);
        }

        crate::log_debug!(
            "fullscreen window 0x{:X} detected, re-asserting {:?}",
            snapshot.foreground.map_or(0, |w| w.0),
            mode
        );
        WindowStyleController::reassert_always_above(system, Some(window))?;
        system.set_stack_position(window, mode.slot())?;
        Ok(TickOutcome::AssertedOverFullscreen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSystem;

    #[test]
    fn unchanged_foreground_issues_no_stack_call() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        system.foreground = Some(WindowHandle(42));
        let mut enforcer = ZOrderEnforcer::new();
        enforcer.tick(&mut system, overlay, ZOrderMode::AlwaysOnTop).unwrap();
        let calls_after_first = system.stack_calls.len();

        // Act
        let outcome = enforcer
            .tick(&mut system, overlay, ZOrderMode::AlwaysOnTop)
            .unwrap();

        // Assert
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(system.stack_calls.len(), calls_after_first);
    }

    #[test]
    fn changed_foreground_reasserts_slot() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        let mut enforcer = ZOrderEnforcer::new();
        system.foreground = Some(WindowHandle(42));
        enforcer.tick(&mut system, overlay, ZOrderMode::Wallpaper).unwrap();

        // Act
        system.foreground = Some(WindowHandle(43));
        let outcome = enforcer
            .tick(&mut system, overlay, ZOrderMode::Wallpaper)
            .unwrap();

        // Assert
        assert_eq!(outcome, TickOutcome::Asserted);
        assert_eq!(
            system.stack_calls.last(),
            Some(&(overlay, StackSlot::Bottom))
        );
    }

    #[test]
    fn normal_mode_tick_is_idle() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        system.foreground = Some(WindowHandle(42));
        let mut enforcer = ZOrderEnforcer::new();

        // Act
        let outcome = enforcer
            .tick(&mut system, overlay, ZOrderMode::Normal)
            .unwrap();

        // Assert
        assert_eq!(outcome, TickOutcome::Idle);
        assert!(system.stack_calls.is_empty());
    }

    #[test]
    fn fullscreen_foreground_asserts_twice_and_restores_style() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        let game = WindowHandle(7);
        system.add_window(game, system.monitor);
        system.foreground = Some(game);
        let mut enforcer = ZOrderEnforcer::new();

        // Act
        let outcome = enforcer
            .tick(&mut system, overlay, ZOrderMode::AlwaysOnTop)
            .unwrap();

        // Assert
        assert_eq!(outcome, TickOutcome::AssertedOverFullscreen);
        assert_eq!(system.stack_calls.len(), 2);
        assert!(system.style_of(overlay).contains(crate::ExStyle::TOPMOST));
    }

    #[test]
    fn inset_window_is_not_fullscreen() {
        // Arrange
        let monitor = Rect::new(0, 0, 1920, 1080);
        let inset = Rect::new(1, 0, 1919, 1080);

        // Act / Assert
        assert!(is_fullscreen(monitor, monitor));
        assert!(!is_fullscreen(inset, monitor));
    }

    #[test]
    fn overlay_as_foreground_is_not_fullscreen() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        let monitor = system.monitor;
        system.add_window(overlay, monitor);
        system.foreground = Some(overlay);

        // Act
        let snapshot = ForegroundSnapshot::capture(&system, overlay);

        // Assert
        assert!(!snapshot.fullscreen);
    }

    #[test]
    fn failed_stack_call_is_retried_next_tick() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        system.foreground = Some(WindowHandle(42));
        system.fail_stack_calls = true;
        let mut enforcer = ZOrderEnforcer::new();
        assert!(enforcer.tick(&mut system, overlay, ZOrderMode::AlwaysOnTop).is_err());

        // Act
        system.fail_stack_calls = false;
        let outcome = enforcer
            .tick(&mut system, overlay, ZOrderMode::AlwaysOnTop)
            .unwrap();

        // Assert
        assert_eq!(outcome, TickOutcome::Asserted);
    }

    #[test]
    fn apply_forces_full_pass_on_next_tick() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        system.foreground = Some(WindowHandle(42));
        let mut enforcer = ZOrderEnforcer::new();
        enforcer.tick(&mut system, overlay, ZOrderMode::AlwaysOnTop).unwrap();

        // Act
        enforcer
            .apply(&mut system, overlay, ZOrderMode::Wallpaper)
            .unwrap();
        let outcome = enforcer
            .tick(&mut system, overlay, ZOrderMode::Wallpaper)
            .unwrap();

        // Assert
        assert_eq!(outcome, TickOutcome::Asserted);
    }

    #[test]
    fn missing_foreground_counts_as_unchanged() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        system.foreground = None;
        let mut enforcer = ZOrderEnforcer::new();
        enforcer.tick(&mut system, overlay, ZOrderMode::AlwaysOnTop).unwrap();
        let calls_after_first = system.stack_calls.len();

        // Act
        let second = enforcer
            .tick(&mut system, overlay, ZOrderMode::AlwaysOnTop)
            .unwrap();
        let third = enforcer
            .tick(&mut system, overlay, ZOrderMode::AlwaysOnTop)
            .unwrap();

        // Assert
        assert_eq!(calls_after_first, 1);
        assert_eq!((second, third), (TickOutcome::Idle, TickOutcome::Idle));
        assert_eq!(system.stack_calls.len(), calls_after_first);
    }

    #[test]
    fn first_tick_asserts_even_without_foreground() {
        // Arrange
        let mut system = FakeSystem::new();
        let overlay = system.overlay;
        let mut enforcer = ZOrderEnforcer::new();

        // Act
        let outcome = enforcer
            .tick(&mut system, overlay, ZOrderMode::Wallpaper)
            .unwrap();

        // Assert
        assert_eq!(outcome, TickOutcome::Asserted);
        assert_eq!(system.stack_calls, vec![(overlay, StackSlot::Bottom)]);
    }
}
