//! Window sizing and on-screen placement.

use crate::media::MediaSize;
use crate::rect::{Point, Rect};
use crate::settings::clamp_window_size;

/// Pixels of the window that must stay on the virtual screen, on each
/// axis, for a saved position to be trusted.
pub const SAFETY_MARGIN: i32 = 48;

/// Computes the window's width and height.
///
/// With `lock_aspect` the long edge equals `window_size` and the short
/// edge follows the media's aspect ratio (swapped for quarter-turn
/// rotations). Otherwise, or when no media size is known yet, the
/// window is square.
pub fn window_dimensions(
    window_size: f64,
    lock_aspect: bool,
    media: Option<MediaSize>,
    rotation: i32,
) -> (i32, i32) {
    let size = clamp_window_size(window_size);
    let aspect = media
        .filter(|_| lock_aspect)
        .and_then(|m| m.aspect_ratio())
        .map(|ratio| if rotation % 180 == 90 { 1.0 / ratio } else { ratio });

    let (width, height) = match aspect {
        Some(ratio) if ratio >= 1.0 => (size, size / ratio),
        Some(ratio) => (size * ratio, size),
        None => (size, size),
    };
    (round_edge(width), round_edge(height))
}

fn round_edge(edge: f64) -> i32 {
    (edge.round() as i32).max(1)
}

/// Bottom-left corner of the primary work area, clear of the taskbar.
pub fn default_anchor(work_area: Rect, height: i32) -> Point {
    Point::new(work_area.x, work_area.bottom() - height)
}

/// Returns whether a window at `position` would be reachable on screen.
pub fn is_position_visible(position: Point, width: i32, height: i32, screen: Rect) -> bool {
    let window = Rect::at(position, width, height);
    let margin_x = SAFETY_MARGIN.min(width);
    let margin_y = SAFETY_MARGIN.min(height);
    window.horizontal_overlap(&screen) >= margin_x && window.vertical_overlap(&screen) >= margin_y
}

/// Picks the window's top-left corner.
///
/// A saved position is used only when enough of the window would be on
/// the virtual screen; otherwise the default anchor applies.
pub fn resolve_position(
    saved: Option<Point>,
    width: i32,
    height: i32,
    screen: Rect,
    work_area: Rect,
) -> Point {
    match saved {
        Some(position) if is_position_visible(position, width, height, screen) => position,
        _ => default_anchor(work_area, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    };
    const WORK_AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 1920,
        height: 1040,
    };

    #[test]
    fn landscape_media_scales_height() {
        // Act
        let dims = window_dimensions(400.0, true, Some(MediaSize::new(1920, 1080)), 0);

        // Assert
        assert_eq!(dims, (400, 225));
    }

    #[test]
    fn portrait_media_scales_width() {
        // Act
        let dims = window_dimensions(400.0, true, Some(MediaSize::new(1080, 1920)), 0);

        // Assert
        assert_eq!(dims, (225, 400));
    }

    #[test]
    fn quarter_turn_swaps_aspect() {
        // Act
        let dims = window_dimensions(400.0, true, Some(MediaSize::new(1920, 1080)), 90);

        // Assert
        assert_eq!(dims, (225, 400));
    }

    #[test]
    fn unlocked_aspect_is_square() {
        // Act
        let dims = window_dimensions(400.0, false, Some(MediaSize::new(1920, 1080)), 0);

        // Assert
        assert_eq!(dims, (400, 400));
    }

    #[test]
    fn unknown_media_size_is_square() {
        // Act / Assert
        assert_eq!(window_dimensions(300.0, true, None, 0), (300, 300));
        assert_eq!(
            window_dimensions(300.0, true, Some(MediaSize::new(0, 10)), 0),
            (300, 300)
        );
    }

    #[test]
    fn size_is_clamped_before_scaling() {
        // Act / Assert
        assert_eq!(window_dimensions(10.0, false, None, 0), (50, 50));
        assert_eq!(window_dimensions(9000.0, false, None, 0), (4000, 4000));
    }

    #[test]
    fn default_anchor_sits_on_work_area_bottom() {
        // Act
        let anchor = default_anchor(WORK_AREA, 300);

        // Assert
        assert_eq!(anchor, Point::new(0, 740));
    }

    #[test]
    fn visible_saved_position_is_kept() {
        // Act
        let position = resolve_position(Some(Point::new(500, 200)), 300, 300, SCREEN, WORK_AREA);

        // Assert
        assert_eq!(position, Point::new(500, 200));
    }

    #[test]
    fn off_screen_position_falls_back_to_anchor() {
        // Act
        let position = resolve_position(Some(Point::new(5000, 200)), 300, 300, SCREEN, WORK_AREA);

        // Assert
        assert_eq!(position, Point::new(0, 740));
    }

    #[test]
    fn sliver_on_screen_is_not_enough() {
        // Arrange
        let barely = Point::new(1920 - 20, 200);

        // Act / Assert
        assert!(!is_position_visible(barely, 300, 300, SCREEN));
        assert!(is_position_visible(Point::new(1920 - 48, 200), 300, 300, SCREEN));
    }
}
