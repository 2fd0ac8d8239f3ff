#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or world space.
///
/// The type carries no unit tag; callers track which space a value lives in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel dimensions of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A viewport with no drawable area (zero, negative, or non-finite size).
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned world-space rectangle covered by the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub top_left: Point,
    pub bottom_right: Point,
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `offset` is the screen-space translation (CSS pixels) applied before
/// scaling, so `screen = world * scale + offset`. `scale` always stays inside
/// [`MIN_SCALE`, `MAX_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    scale: f64,
    offset: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, offset: Point::default() }
    }
}

impl Camera {
    /// Build a camera from an explicit view. `scale` is clamped into bounds;
    /// a non-finite scale falls back to `1.0` and a non-finite offset to the origin.
    #[must_use]
    pub fn with_view(scale: f64, offset: Point) -> Self {
        let scale = if scale.is_finite() { scale.clamp(MIN_SCALE, MAX_SCALE) } else { 1.0 };
        let offset = if offset.is_finite() { offset } else { Point::default() };
        Self { scale, offset }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Translate the view by a screen-space delta. A pan that would leave the
    /// offset non-finite is dropped.
    pub fn pan_by(&mut self, delta: Point) {
        let next = Point::new(self.offset.x + delta.x, self.offset.y + delta.y);
        // A finite delta can still overflow the offset.
        if next.is_finite() {
            self.offset = next;
        }
    }

    /// Multiply the scale by `factor` while keeping the world point under
    /// `anchor` (screen space) fixed on screen.
    ///
    /// The offset shift is derived from the scale change that survives
    /// clamping, so a zoom that is fully absorbed at a bound moves nothing.
    /// A zoom whose offset would overflow is dropped whole.
    pub fn zoom_around(&mut self, factor: f64, anchor: Point) {
        if !(factor.is_finite() && factor > 0.0) || !anchor.is_finite() {
            return;
        }
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let f = new_scale / self.scale - 1.0;
        let offset = Point::new(
            self.offset.x - (anchor.x - self.offset.x) * f,
            self.offset.y - (anchor.y - self.offset.y) * f,
        );
        if !offset.is_finite() {
            return;
        }
        self.offset = offset;
        self.scale = new_scale;
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset.x) / self.scale,
            y: (screen.y - self.offset.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset.x,
            y: world.y * self.scale + self.offset.y,
        }
    }

    /// The world rectangle currently visible through a viewport of the given size.
    #[must_use]
    pub fn visible_world_rect(&self, viewport: Viewport) -> WorldRect {
        WorldRect {
            top_left: self.screen_to_world(Point::new(0.0, 0.0)),
            bottom_right: self.screen_to_world(Point::new(viewport.width, viewport.height)),
        }
    }
}
