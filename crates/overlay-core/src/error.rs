//! Error taxonomy and the single place that decides what to do with
//! each kind of failure.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::i18n::{Localizer, Text};

/// Same user-facing message is shown at most once per this window.
pub const NOTIFY_COOLDOWN: Duration = Duration::from_secs(5);

/// Everything that can go wrong inside the overlay core.
///
/// None of these are fatal: the overlay is a best-effort visual aid and
/// keeps running after any individual failure.
#[derive(Debug)]
pub enum OverlayError {
    /// A native window call failed (stale handle, access denied).
    Native(String),
    /// A media file could not be displayed.
    MediaLoad { path: PathBuf, reason: String },
    /// Scanning the slideshow folder failed.
    Scan { dir: PathBuf, reason: String },
    /// Settings could not be read or written.
    Settings(String),
    /// The overlay window has not been created yet.
    NoWindow,
}

/// How the top-level handler treats an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Retried implicitly on the next cycle; debug log only.
    Ignore,
    /// Worth a warning in the log file.
    Log,
    /// Shown to the user as a localized message.
    NotifyUser,
}

impl OverlayError {
    pub fn disposition(&self) -> Disposition {
        match self {
            Self::Native(_) | Self::Scan { .. } | Self::NoWindow => Disposition::Ignore,
            Self::Settings(_) => Disposition::Log,
            Self::MediaLoad { .. } => Disposition::NotifyUser,
        }
    }

    /// Localized text for the user, if this error is ever shown.
    pub fn user_message(&self, localizer: &Localizer) -> Option<String> {
        match self {
            Self::MediaLoad { path, reason } => Some(format!(
                "{}{} ({reason})",
                localizer.get(Text::MediaLoadError),
                path.display()
            )),
            _ => None,
        }
    }
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(e) => write!(f, "native call failed: {e}"),
            Self::MediaLoad { path, reason } => {
                write!(f, "could not load {}: {reason}", path.display())
            }
            Self::Scan { dir, reason } => write!(f, "could not scan {}: {reason}", dir.display()),
            Self::Settings(e) => write!(f, "settings: {e}"),
            Self::NoWindow => f.write_str("overlay window not created yet"),
        }
    }
}

impl std::error::Error for OverlayError {}

impl From<Box<dyn std::error::Error>> for OverlayError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        Self::Native(e.to_string())
    }
}

/// Routes errors to the log or the user, suppressing repeats.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    last_notified: Option<(String, Instant)>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the error and returns the message to show the user, if any.
    ///
    /// An identical message shown within [`NOTIFY_COOLDOWN`] is suppressed.
    pub fn report(
        &mut self,
        error: &OverlayError,
        localizer: &Localizer,
        now: Instant,
    ) -> Option<String> {
        match error.disposition() {
            Disposition::Ignore => {
                crate::log_debug!("ignored: {error}");
                None
            }
            Disposition::Log => {
                crate::log_warn!("{error}");
                None
            }
            Disposition::NotifyUser => {
                crate::log_error!("{error}");
                let message = error.user_message(localizer)?;
                if self.recently_shown(&message, now) {
                    return None;
                }
                self.last_notified = Some((message.clone(), now));
                Some(message)
            }
        }
    }

    fn recently_shown(&self, message: &str, now: Instant) -> bool {
        self.last_notified.as_ref().is_some_and(|(last, at)| {
            last == message && now.saturating_duration_since(*at) < NOTIFY_COOLDOWN
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_error() -> OverlayError {
        OverlayError::MediaLoad {
            path: PathBuf::from("C:/media/broken.png"),
            reason: "bad header".into(),
        }
    }

    #[test]
    fn dispositions_follow_the_taxonomy() {
        // Act / Assert
        assert_eq!(
            OverlayError::Native("x".into()).disposition(),
            Disposition::Ignore
        );
        assert_eq!(
            OverlayError::Scan {
                dir: PathBuf::from("/gone"),
                reason: "x".into()
            }
            .disposition(),
            Disposition::Ignore
        );
        assert_eq!(
            OverlayError::Settings("x".into()).disposition(),
            Disposition::Log
        );
        assert_eq!(media_error().disposition(), Disposition::NotifyUser);
    }

    #[test]
    fn media_error_is_localized() {
        // Arrange
        let localizer = Localizer::new("tr");

        // Act
        let message = media_error().user_message(&localizer).unwrap();

        // Assert
        assert!(message.starts_with("Medya yükleme hatası: "));
        assert!(message.contains("broken.png"));
    }

    #[test]
    fn repeated_message_is_suppressed_within_cooldown() {
        // Arrange
        let mut reporter = ErrorReporter::new();
        let localizer = Localizer::default();
        let start = Instant::now();

        // Act
        let first = reporter.report(&media_error(), &localizer, start);
        let second = reporter.report(&media_error(), &localizer, start + Duration::from_secs(1));
        let third = reporter.report(&media_error(), &localizer, start + Duration::from_secs(6));

        // Assert
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(third.is_some());
    }

    #[test]
    fn ignored_errors_produce_no_message() {
        // Arrange
        let mut reporter = ErrorReporter::new();

        // Act
        let message = reporter.report(
            &OverlayError::Native("stale handle".into()),
            &Localizer::default(),
            Instant::now(),
        );

        // Assert
        assert!(message.is_none());
    }
}
