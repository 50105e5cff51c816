pub mod action;
pub mod app;
pub mod error;
pub mod i18n;
pub mod ipc;
pub mod log;
pub mod media;
pub mod overlay;
pub mod pid;
pub mod placement;
pub mod platform;
pub mod rect;
pub mod settings;
pub mod slideshow;
pub mod style;
pub mod zorder;

#[cfg(test)]
mod testing;

pub use action::Action;
pub use app::{App, Effect};
pub use error::{Disposition, ErrorReporter, OverlayError};
pub use ipc::{Command, PIPE_NAME, Response};
pub use media::{MediaError, MediaKind, MediaSize, MediaSurface, RenderParams};
pub use overlay::Overlay;
pub use platform::{ExStyle, StackSlot, TimerKind, WindowHandle, WindowResult, WindowSystem};
pub use rect::{Point, Rect};
pub use settings::Settings;
pub use zorder::ZOrderMode;
