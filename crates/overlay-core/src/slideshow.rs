//! Timer-driven advancement through the media files of one folder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::media::MediaKind;
use crate::platform::{TimerKind, WindowSystem};

/// Shortest allowed slideshow interval, in seconds.
pub const MIN_INTERVAL_SECS: u64 = 1;

/// Lists the recognized media files directly inside `dir`, sorted by
/// full path.
pub fn scan_folder(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && MediaKind::from_path(&path).is_recognized() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Cached folder listing and position within it.
///
/// The listing is rebuilt only when the folder changes, so files added
/// or removed mid-session are not seen until then.
#[derive(Debug, Default)]
pub struct SlideshowCursor {
    cached_folder: Option<PathBuf>,
    cached_files: Vec<PathBuf>,
    current_index: Option<usize>,
    /// File that was showing when the file at `current_index` failed to
    /// load. The next advance from it continues past the failed file.
    failed_from: Option<PathBuf>,
}

impl SlideshowCursor {
    /// Picks the file after `current`, wrapping at the end.
    ///
    /// `scan` is only invoked when the folder differs from the cached one.
    /// A current file that is missing from the listing restarts at the
    /// first file. After [`SlideshowCursor::mark_failed`], advancing from
    /// the same file continues after the one that failed. Returns `None`
    /// when there is nothing to advance to.
    pub fn advance(
        &mut self,
        current: &Path,
        scan: impl FnOnce(&Path) -> io::Result<Vec<PathBuf>>,
    ) -> io::Result<Option<PathBuf>> {
        let Some(folder) = current.parent() else {
            return Ok(None);
        };

        if self.cached_folder.as_deref() != Some(folder) {
            let files = scan(folder)?;
            crate::log_debug!(
                "slideshow: cached {} file(s) from {}",
                files.len(),
                folder.display()
            );
            self.cached_files = files;
            self.cached_folder = Some(folder.to_path_buf());
            self.current_index = None;
            self.failed_from = None;
        }

        let count = self.cached_files.len();
        if count <= 1 {
            return Ok(None);
        }

        let resume = match (self.failed_from.take(), self.current_index) {
            (Some(from), Some(index)) if from == current && index < count => Some(index),
            _ => None,
        };
        let from = resume.or_else(|| self.cached_files.iter().position(|p| p == current));
        let next = from.map_or(0, |index| (index + 1) % count);
        self.current_index = Some(next);
        Ok(Some(self.cached_files[next].clone()))
    }

    /// Records that the file last returned by `advance` could not be
    /// shown, so `current` is still on screen.
    pub fn mark_failed(&mut self, current: &Path) {
        self.failed_from = self.current_index.map(|_| current.to_path_buf());
    }

    pub fn cached_folder(&self) -> Option<&Path> {
        self.cached_folder.as_deref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }
}

/// Owns the slideshow timer and cursor.
#[derive(Debug, Default)]
pub struct SlideshowEngine {
    running: Option<Duration>,
    cursor: SlideshowCursor,
}

impl SlideshowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts or stops the recurring timer.
    ///
    /// The timer is only touched when the enabled state or the interval
    /// changes, so repeated calls with the same arguments are no-ops.
    pub fn set_enabled(
        &mut self,
        system: &mut impl WindowSystem,
        enabled: bool,
        interval_secs: u64,
    ) {
        let desired =
            enabled.then(|| Duration::from_secs(interval_secs.max(MIN_INTERVAL_SECS)));
        if desired == self.running {
            return;
        }

        match desired {
            Some(interval) => {
                crate::log_info!("slideshow started ({}s)", interval.as_secs());
                system.start_timer(TimerKind::Slideshow, interval);
            }
            None => {
                crate::log_info!("slideshow stopped");
                system.stop_timer(TimerKind::Slideshow);
            }
        }
        self.running = desired;
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Computes the next file for a tick, scanning the real filesystem.
    ///
    /// Files whose kind `accepts` rejects never enter the rotation.
    pub fn next_media(
        &mut self,
        current: &Path,
        accepts: impl Fn(MediaKind) -> bool,
    ) -> io::Result<Option<PathBuf>> {
        self.cursor.advance(current, |dir| {
            let mut files = scan_folder(dir)?;
            files.retain(|p| accepts(MediaKind::from_path(p)));
            Ok(files)
        })
    }

    /// Skips the file returned by the last `next_media` on the next tick.
    pub fn skip_failed(&mut self, current: &Path) {
        crate::log_debug!("slideshow: skipping file that failed to load");
        self.cursor.mark_failed(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSystem;

    fn listing(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| Path::new("/media").join(n)).collect()
    }

    #[test]
    fn advances_to_next_file_in_sorted_order() {
        // Arrange
        let mut cursor = SlideshowCursor::default();
        let files = listing(&["a.gif", "b.png", "c.mp4"]);

        // Act
        let next = cursor
            .advance(Path::new("/media/b.png"), |_| Ok(files))
            .unwrap();

        // Assert
        assert_eq!(next, Some(PathBuf::from("/media/c.mp4")));
        assert_eq!(cursor.current_index(), Some(2));
    }

    #[test]
    fn wraps_from_last_to_first() {
        // Arrange
        let mut cursor = SlideshowCursor::default();
        let files = listing(&["a.gif", "b.png", "c.mp4"]);

        // Act
        let next = cursor
            .advance(Path::new("/media/c.mp4"), |_| Ok(files))
            .unwrap();

        // Assert
        assert_eq!(next, Some(PathBuf::from("/media/a.gif")));
    }

    #[test]
    fn missing_current_file_restarts_at_first() {
        // Arrange
        let mut cursor = SlideshowCursor::default();
        let files = listing(&["a.gif", "b.png", "c.mp4"]);

        // Act
        let next = cursor
            .advance(Path::new("/media/deleted.png"), |_| Ok(files))
            .unwrap();

        // Assert
        assert_eq!(next, Some(PathBuf::from("/media/a.gif")));
    }

    #[test]
    fn single_file_folder_does_nothing() {
        // Arrange
        let mut cursor = SlideshowCursor::default();

        // Act
        let next = cursor
            .advance(Path::new("/media/a.gif"), |_| Ok(listing(&["a.gif"])))
            .unwrap();

        // Assert
        assert_eq!(next, None);
    }

    #[test]
    fn cache_is_reused_within_same_folder() {
        // Arrange
        let mut cursor = SlideshowCursor::default();
        let files = listing(&["a.gif", "b.png"]);
        cursor.advance(Path::new("/media/a.gif"), |_| Ok(files)).unwrap();

        // Act
        let next = cursor
            .advance(Path::new("/media/b.png"), |_| {
                panic!("folder should not be rescanned")
            })
            .unwrap();

        // Assert
        assert_eq!(next, Some(PathBuf::from("/media/a.gif")));
    }

    #[test]
    fn folder_change_rebuilds_cache() {
        // Arrange
        let mut cursor = SlideshowCursor::default();
        cursor
            .advance(Path::new("/media/a.gif"), |_| Ok(listing(&["a.gif", "b.png"])))
            .unwrap();

        // Act
        let next = cursor
            .advance(Path::new("/other/x.png"), |_| {
                Ok(vec![PathBuf::from("/other/x.png"), PathBuf::from("/other/y.png")])
            })
            .unwrap();

        // Assert
        assert_eq!(next, Some(PathBuf::from("/other/y.png")));
        assert_eq!(cursor.cached_folder(), Some(Path::new("/other")));
    }

    #[test]
    fn scan_error_is_propagated_and_cache_kept() {
        // Arrange
        let mut cursor = SlideshowCursor::default();

        // Act
        let result = cursor.advance(Path::new("/gone/a.gif"), |_| {
            Err(io::Error::new(io::ErrorKind::NotFound, "folder deleted"))
        });

        // Assert
        assert!(result.is_err());
        assert_eq!(cursor.cached_folder(), None);
    }

    #[test]
    fn failed_file_is_skipped_on_next_advance() {
        // Arrange
        let mut cursor = SlideshowCursor::default();
        let files = listing(&["a.png", "b.mp4", "c.png"]);
        let current = Path::new("/media/a.png");
        let first = cursor.advance(current, |_| Ok(files)).unwrap();
        cursor.mark_failed(current);

        // Act
        let second = cursor
            .advance(current, |_| panic!("folder should not be rescanned"))
            .unwrap();

        // Assert
        assert_eq!(first, Some(PathBuf::from("/media/b.mp4")));
        assert_eq!(second, Some(PathBuf::from("/media/c.png")));
        assert_eq!(cursor.current_index(), Some(2));
    }

    #[test]
    fn failure_marker_is_dropped_once_media_moves_on() {
        // Arrange
        let mut cursor = SlideshowCursor::default();
        let files = listing(&["a.png", "b.png", "c.png"]);
        cursor.advance(Path::new("/media/a.png"), |_| Ok(files)).unwrap();
        cursor.mark_failed(Path::new("/media/a.png"));

        // Act
        let next = cursor
            .advance(Path::new("/media/c.png"), |_| unreachable!())
            .unwrap();

        // Assert
        assert_eq!(next, Some(PathBuf::from("/media/a.png")));
    }

    #[test]
    fn next_media_leaves_out_rejected_kinds() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.mp4", "c.gif"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let mut engine = SlideshowEngine::new();

        // Act
        let next = engine
            .next_media(&dir.path().join("a.png"), |kind| kind != MediaKind::Video)
            .unwrap();

        // Assert
        assert_eq!(next, Some(dir.path().join("c.gif")));
    }

    #[test]
    fn scan_folder_filters_and_sorts() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.mp4", "a.gif", "notes.txt", "b.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        // Act
        let files = scan_folder(dir.path()).unwrap();

        // Assert
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.gif", "b.png", "c.mp4"]);
    }

    #[test]
    fn set_enabled_is_idempotent() {
        // Arrange
        let mut system = FakeSystem::new();
        let mut engine = SlideshowEngine::new();

        // Act
        engine.set_enabled(&mut system, true, 10);
        engine.set_enabled(&mut system, true, 10);

        // Assert
        assert!(engine.is_running());
        assert_eq!(system.timer_starts, 1);
        assert_eq!(
            system.timers.get(&TimerKind::Slideshow),
            Some(&Duration::from_secs(10))
        );
    }

    #[test]
    fn zero_interval_is_raised_to_minimum() {
        // Arrange
        let mut system = FakeSystem::new();
        let mut engine = SlideshowEngine::new();

        // Act
        engine.set_enabled(&mut system, true, 0);

        // Assert
        assert_eq!(
            system.timers.get(&TimerKind::Slideshow),
            Some(&Duration::from_secs(MIN_INTERVAL_SECS))
        );
    }

    #[test]
    fn disabling_stops_timer() {
        // Arrange
        let mut system = FakeSystem::new();
        let mut engine = SlideshowEngine::new();
        engine.set_enabled(&mut system, true, 5);

        // Act
        engine.set_enabled(&mut system, false, 5);

        // Assert
        assert!(!engine.is_running());
        assert!(!system.timers.contains_key(&TimerKind::Slideshow));
    }
}
