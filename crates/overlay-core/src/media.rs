use std::fmt;
use std::path::Path;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv"];
const ANIMATED_EXTENSIONS: &[&str] = &["gif"];
const STILL_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Media category, decided purely by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    AnimatedImage,
    StillImage,
    Unrecognized,
}

impl MediaKind {
    /// Classifies a path by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Self::Unrecognized;
        };
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();

        if VIDEO_EXTENSIONS.contains(&ext) {
            Self::Video
        } else if ANIMATED_EXTENSIONS.contains(&ext) {
            Self::AnimatedImage
        } else if STILL_EXTENSIONS.contains(&ext) {
            Self::StillImage
        } else {
            Self::Unrecognized
        }
    }

    pub fn is_recognized(self) -> bool {
        self != Self::Unrecognized
    }
}

/// Intrinsic pixel dimensions reported by the media surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSize {
    pub width: u32,
    pub height: u32,
}

impl MediaSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or `None` for degenerate sizes.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

/// How the surface should draw the current media.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub width: i32,
    pub height: i32,
    /// Clockwise rotation in degrees: 0, 90, 180, or 270.
    pub rotation: i32,
    /// Constant opacity in `0.0..=1.0`.
    pub opacity: f64,
}

/// A media file could not be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaError(pub String);

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for MediaError {}

/// The component that actually decodes and draws media.
///
/// Treated as a black box: the core only needs a success/failure signal
/// and the intrinsic dimensions for aspect-locked sizing.
pub trait MediaSurface {
    /// Starts displaying `path`.
    ///
    /// On failure the previously displayed media must stay on screen.
    fn display(&mut self, path: &Path, kind: MediaKind) -> Result<MediaSize, MediaError>;

    /// Whether this surface can display media of `kind` at all.
    ///
    /// Files of unsupported kinds are rejected before `display` and left
    /// out of slideshow rotation.
    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    /// Redraws the current media with new geometry or opacity.
    fn render(&mut self, params: &RenderParams);

    /// Applies audio settings to media that has a soundtrack.
    fn set_volume(&mut self, volume: f64, muted: bool);

    /// Stops playback and releases decoder resources.
    fn stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension_case_insensitively() {
        // Act / Assert
        assert_eq!(MediaKind::from_path(Path::new("clip.MP4")), MediaKind::Video);
        assert_eq!(
            MediaKind::from_path(Path::new("cat.gif")),
            MediaKind::AnimatedImage
        );
        assert_eq!(
            MediaKind::from_path(Path::new("photo.JPeG")),
            MediaKind::StillImage
        );
        assert_eq!(
            MediaKind::from_path(Path::new("notes.txt")),
            MediaKind::Unrecognized
        );
        assert_eq!(
            MediaKind::from_path(Path::new("no_extension")),
            MediaKind::Unrecognized
        );
    }

    #[test]
    fn degenerate_size_has_no_aspect_ratio() {
        // Act / Assert
        assert_eq!(MediaSize::new(0, 100).aspect_ratio(), None);
        assert_eq!(MediaSize::new(200, 100).aspect_ratio(), Some(2.0));
    }
}
