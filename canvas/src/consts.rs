//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed camera scale (zoomed all the way out).
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed camera scale (zoomed all the way in).
pub const MAX_SCALE: f64 = 5.0;

/// Scale multiplier for one wheel notch towards the user (zoom in).
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale multiplier for one wheel notch away from the user (zoom out).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Grid ────────────────────────────────────────────────────────

/// Spacing between grid lines, in world units.
pub const GRID_SIZE: f64 = 50.0;

pub const GRID_STROKE: &str = "#eee";

/// Grid line width in world units (scales with zoom).
pub const GRID_LINE_WIDTH: f64 = 0.5;

// ── Layout ──────────────────────────────────────────────────────

/// Number of cards per layout row.
pub const LAYOUT_COLUMNS: usize = 5;

/// Distance between the origins of neighbouring cells, in world units.
pub const CELL_PITCH: f64 = 200.0;

pub const CARD_WIDTH: f64 = 150.0;
pub const CARD_HEIGHT: f64 = 100.0;
pub const CARD_CORNER_RADIUS: f64 = 5.0;

// ── Card styling ────────────────────────────────────────────────

pub const CARD_FILL: &str = "#f0f0f0";
pub const CARD_STROKE: &str = "#ddd";
pub const CARD_LINE_WIDTH: f64 = 1.0;
pub const LABEL_COLOR: &str = "#333";
pub const LABEL_FONT: &str = "14px Arial";
