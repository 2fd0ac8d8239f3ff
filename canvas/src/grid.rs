//! Visible-range grid culling.
//!
//! Only the grid lines that intersect the world rectangle currently on screen
//! are produced, so the line count depends on the viewport size and scale and
//! never on where the camera sits on the infinite plane.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::{Camera, Point, Viewport};
use crate::consts::GRID_SIZE;

/// A straight world-space line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

/// Grid lines covering the visible world rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// Lines of constant `x`, spanning the padded visible `y` range.
    pub vertical: Vec<LineSegment>,
    /// Lines of constant `y`, spanning the padded visible `x` range.
    pub horizontal: Vec<LineSegment>,
}

impl GridLines {
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Compute the grid lines visible through `viewport` with the default spacing.
#[must_use]
pub fn visible_grid(camera: &Camera, viewport: Viewport) -> GridLines {
    visible_grid_with_spacing(camera, viewport, GRID_SIZE)
}

/// Compute the grid lines visible through `viewport` for an arbitrary spacing.
///
/// Lines start at the last multiple of `spacing` at or before the top-left
/// corner and run until one full `spacing` past the bottom-right corner.
#[must_use]
pub fn visible_grid_with_spacing(camera: &Camera, viewport: Viewport, spacing: f64) -> GridLines {
    if viewport.is_empty() || !(spacing.is_finite() && spacing > 0.0) {
        return GridLines::default();
    }

    let rect = camera.visible_world_rect(viewport);
    let (x_positions, start_x, end_x) =
        axis_positions(rect.top_left.x, rect.bottom_right.x, viewport.width / camera.scale(), spacing);
    let (y_positions, start_y, end_y) =
        axis_positions(rect.top_left.y, rect.bottom_right.y, viewport.height / camera.scale(), spacing);

    let vertical = x_positions
        .iter()
        .map(|&x| LineSegment { from: Point::new(x, start_y), to: Point::new(x, end_y) })
        .collect();
    let horizontal = y_positions
        .iter()
        .map(|&y| LineSegment { from: Point::new(start_x, y), to: Point::new(end_x, y) })
        .collect();

    GridLines { vertical, horizontal }
}

/// Line positions along one axis plus the padded `[start, end]` span.
///
/// `extent` is the visible world length along the axis. The line count is
/// capped at `ceil(extent / spacing) + 2`, which also holds far from the
/// origin where `min` and `max` lose precision.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn axis_positions(min: f64, max: f64, extent: f64, spacing: f64) -> (Vec<f64>, f64, f64) {
    let start = (min / spacing).floor() * spacing;
    let end = max + spacing;
    let limit = (extent / spacing).ceil() + 2.0;
    // NaN (from an overflowed world rect) casts to zero lines.
    let count = ((end - start) / spacing).ceil().clamp(0.0, limit) as usize;

    let mut positions: Vec<f64> = (0..count)
        .map(|i| start + i as f64 * spacing)
        .take_while(|&pos| pos < end)
        .collect();
    // Past 2^53 grid units neighbouring lines round to the same position.
    positions.dedup();
    (positions, start, end)
}
