//! Rendering: draws the full scene (grid + cards) to a [`Surface`].
//!
//! This module receives read-only views of camera state and the record
//! snapshot and produces draw calls. It never mutates application state.
//!
//! Fallible surface calls propagate their error to the caller
//! ([`crate::scheduler::RenderLoop::tick`]), which logs it and keeps the loop alive.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::Camera;
use crate::consts::{
    CARD_CORNER_RADIUS, CARD_FILL, CARD_LINE_WIDTH, CARD_STROKE, GRID_LINE_WIDTH, GRID_STROKE, LABEL_COLOR,
    LABEL_FONT,
};
use crate::grid::{self, GridLines};
use crate::layout::{LayoutCell, layout_cells};
use crate::record::Record;
use crate::surface::{Surface, TextAlign, TextBaseline};

/// Draw the full scene for one frame.
///
/// The viewport is read from the surface on every call so a resize between
/// frames is picked up immediately.
///
/// # Errors
///
/// Returns the surface error if any transform, arc or text call fails.
pub fn draw_scene<S: Surface>(surface: &mut S, camera: &Camera, records: &[Record]) -> Result<(), S::Error> {
    let viewport = surface.viewport();

    // Layer 1: clear in screen space.
    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    // Layer 2: world space under the camera transform.
    surface.save();
    let result = draw_world(surface, camera, records);
    surface.restore();
    result
}

fn draw_world<S: Surface>(surface: &mut S, camera: &Camera, records: &[Record]) -> Result<(), S::Error> {
    let offset = camera.offset();
    surface.translate(offset.x, offset.y)?;
    surface.scale(camera.scale(), camera.scale())?;

    let lines = grid::visible_grid(camera, surface.viewport());
    draw_grid(surface, &lines);

    for (cell, record) in layout_cells(records.len()).zip(records) {
        draw_card(surface, &cell, record)?;
    }
    Ok(())
}

// =============================================================
// Grid
// =============================================================

/// Stroke all grid lines as a single path.
pub fn draw_grid<S: Surface>(surface: &mut S, lines: &GridLines) {
    if lines.is_empty() {
        return;
    }
    surface.set_stroke_style(GRID_STROKE);
    surface.set_line_width(GRID_LINE_WIDTH);
    surface.begin_path();
    for line in lines.vertical.iter().chain(&lines.horizontal) {
        surface.move_to(line.from.x, line.from.y);
        surface.line_to(line.to.x, line.to.y);
    }
    surface.stroke();
}

// =============================================================
// Cards
// =============================================================

/// Draw one record's card: rounded background, border, centered label.
///
/// # Errors
///
/// Returns the surface error if the outline or label cannot be drawn.
pub fn draw_card<S: Surface>(surface: &mut S, cell: &LayoutCell, record: &Record) -> Result<(), S::Error> {
    surface.set_fill_style(CARD_FILL);
    surface.set_stroke_style(CARD_STROKE);
    surface.set_line_width(CARD_LINE_WIDTH);
    round_rect_path(surface, cell.origin.x, cell.origin.y, cell.width, cell.height, CARD_CORNER_RADIUS)?;
    surface.fill();
    surface.stroke();

    let center = cell.center();
    surface.set_fill_style(LABEL_COLOR);
    surface.set_font(LABEL_FONT);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.fill_text(&record.label(), center.x, center.y)
}

/// Build a closed rounded-rectangle path with corner radius `r`.
fn round_rect_path<S: Surface>(surface: &mut S, x: f64, y: f64, w: f64, h: f64, r: f64) -> Result<(), S::Error> {
    surface.begin_path();
    surface.move_to(x + r, y);
    surface.arc_to(x + w, y, x + w, y + h, r)?;
    surface.arc_to(x + w, y + h, x, y + h, r)?;
    surface.arc_to(x, y + h, x, y, r)?;
    surface.arc_to(x, y, x + w, y, r)?;
    surface.close_path();
    Ok(())
}
