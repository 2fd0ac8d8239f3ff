//! Deterministic card layout: record index → world-space cell.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::camera::Point;
use crate::consts::{CARD_HEIGHT, CARD_WIDTH, CELL_PITCH, LAYOUT_COLUMNS};

/// Placement of one record's card. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCell {
    pub index: usize,
    pub col: usize,
    pub row: usize,
    /// Top-left corner of the card in world space.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl LayoutCell {
    /// The cell for the record at `index` in the snapshot.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_index(index: usize) -> Self {
        let col = index % LAYOUT_COLUMNS;
        let row = index / LAYOUT_COLUMNS;
        Self {
            index,
            col,
            row,
            origin: Point::new(col as f64 * CELL_PITCH, row as f64 * CELL_PITCH),
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
        }
    }

    /// Center of the card, where its label is drawn.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.origin.x + self.width / 2.0, self.origin.y + self.height / 2.0)
    }
}

/// Cells for the first `count` records, in snapshot order.
pub fn layout_cells(count: usize) -> impl Iterator<Item = LayoutCell> {
    (0..count).map(LayoutCell::for_index)
}

/// Number of layout rows needed for `count` records.
#[must_use]
pub fn row_count(count: usize) -> usize {
    count.div_ceil(LAYOUT_COLUMNS)
}
