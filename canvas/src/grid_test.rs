#![allow(clippy::float_cmp, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use super::*;
use crate::consts::{MAX_SCALE, MIN_SCALE};

fn vertical_bound(width: f64, scale: f64) -> usize {
    (width / (GRID_SIZE * scale)).ceil() as usize + 2
}

#[test]
fn identity_camera_starts_at_origin() {
    let grid = visible_grid(&Camera::default(), Viewport::new(200.0, 100.0));
    let xs: Vec<f64> = grid.vertical.iter().map(|l| l.from.x).collect();
    assert_eq!(xs, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
    let ys: Vec<f64> = grid.horizontal.iter().map(|l| l.from.y).collect();
    assert_eq!(ys, vec![0.0, 50.0, 100.0]);
}

#[test]
fn vertical_lines_span_padded_y_range() {
    let grid = visible_grid(&Camera::default(), Viewport::new(200.0, 100.0));
    for line in &grid.vertical {
        assert_eq!(line.from.x, line.to.x);
        assert_eq!(line.from.y, 0.0);
        assert_eq!(line.to.y, 150.0);
    }
    for line in &grid.horizontal {
        assert_eq!(line.from.y, line.to.y);
        assert_eq!(line.from.x, 0.0);
        assert_eq!(line.to.x, 250.0);
    }
}

#[test]
fn start_snaps_down_to_grid_multiple() {
    // Offset (30, 70) at scale 1: top-left world is (-30, -70).
    let cam = Camera::with_view(1.0, Point::new(30.0, 70.0));
    let grid = visible_grid(&cam, Viewport::new(100.0, 100.0));
    assert_eq!(grid.vertical.first().map(|l| l.from.x), Some(-50.0));
    assert_eq!(grid.horizontal.first().map(|l| l.from.y), Some(-100.0));
}

#[test]
fn lines_cover_the_whole_visible_rect() {
    let cam = Camera::with_view(0.37, Point::new(-1234.5, 987.6));
    let viewport = Viewport::new(1024.0, 768.0);
    let rect = cam.visible_world_rect(viewport);
    let grid = visible_grid(&cam, viewport);

    let first_x = grid.vertical.first().map(|l| l.from.x).unwrap_or(f64::NAN);
    let last_x = grid.vertical.last().map(|l| l.from.x).unwrap_or(f64::NAN);
    assert!(first_x <= rect.top_left.x);
    assert!(last_x + GRID_SIZE >= rect.bottom_right.x);

    let first_y = grid.horizontal.first().map(|l| l.from.y).unwrap_or(f64::NAN);
    let last_y = grid.horizontal.last().map(|l| l.from.y).unwrap_or(f64::NAN);
    assert!(first_y <= rect.top_left.y);
    assert!(last_y + GRID_SIZE >= rect.bottom_right.y);
}

#[test]
fn line_count_is_bounded_for_any_camera() {
    let viewports = [Viewport::new(1280.0, 720.0), Viewport::new(333.0, 999.0), Viewport::new(1.0, 1.0)];
    let offsets = [Point::new(0.0, 0.0), Point::new(17.3, -4000.0), Point::new(-1e6, 1e6)];
    for scale in [MIN_SCALE, 0.25, 1.0, 2.7, MAX_SCALE] {
        for offset in offsets {
            for viewport in viewports {
                let cam = Camera::with_view(scale, offset);
                let grid = visible_grid(&cam, viewport);
                assert!(
                    grid.vertical.len() <= vertical_bound(viewport.width, scale),
                    "too many vertical lines: {} at scale {scale}",
                    grid.vertical.len()
                );
                assert!(
                    grid.horizontal.len() <= vertical_bound(viewport.height, scale),
                    "too many horizontal lines: {} at scale {scale}",
                    grid.horizontal.len()
                );
            }
        }
    }
}

#[test]
fn line_count_does_not_depend_on_pan_position() {
    let viewport = Viewport::new(800.0, 600.0);
    let near = visible_grid(&Camera::with_view(1.0, Point::new(0.0, 0.0)), viewport);
    let far = visible_grid(&Camera::with_view(1.0, Point::new(-5e7, 5e7)), viewport);
    assert_eq!(near.len(), far.len());
}

#[test]
fn far_from_origin_grid_stays_bounded() {
    let viewport = Viewport::new(1280.0, 720.0);
    let offsets = [
        Point::new(-1e21, 0.0),
        Point::new(1e21, -1e21),
        Point::new(-4.7e20, 3e25),
        Point::new(f64::MAX, -f64::MAX),
    ];
    for scale in [MIN_SCALE, 1.0, MAX_SCALE] {
        for offset in offsets {
            let grid = visible_grid(&Camera::with_view(scale, offset), viewport);
            assert!(
                grid.vertical.len() <= vertical_bound(viewport.width, scale),
                "{} vertical lines at offset {offset:?}, scale {scale}",
                grid.vertical.len()
            );
            assert!(
                grid.horizontal.len() <= vertical_bound(viewport.height, scale),
                "{} horizontal lines at offset {offset:?}, scale {scale}",
                grid.horizontal.len()
            );
        }
    }
}

#[test]
fn far_from_origin_lines_are_distinct_and_ordered() {
    // World x near 1e17, where f64 spacing is 16 units.
    let grid = visible_grid(&Camera::with_view(1.0, Point::new(-1e17, 0.0)), Viewport::new(1280.0, 720.0));
    assert!(!grid.vertical.is_empty());
    assert!(grid.vertical.len() <= vertical_bound(1280.0, 1.0));
    assert!(grid.vertical.windows(2).all(|pair| pair[0].from.x < pair[1].from.x));
    // The y axis is near the origin, so it keeps the full line set.
    assert_eq!(grid.horizontal.len(), 16);
}

#[test]
fn zoomed_out_grid_stays_small() {
    let grid = visible_grid(&Camera::with_view(MIN_SCALE, Point::default()), Viewport::new(1920.0, 1080.0));
    // 1920 / (50 * 0.1) = 384 columns, 1080 / 5 = 216 rows.
    assert!(grid.vertical.len() <= 386);
    assert!(grid.horizontal.len() <= 218);
    assert!(grid.vertical.len() >= 384);
}

#[test]
fn empty_viewport_yields_no_lines() {
    assert!(visible_grid(&Camera::default(), Viewport::new(0.0, 500.0)).is_empty());
    assert!(visible_grid(&Camera::default(), Viewport::new(500.0, f64::NAN)).is_empty());
}

#[test]
fn invalid_spacing_yields_no_lines() {
    let viewport = Viewport::new(100.0, 100.0);
    assert!(visible_grid_with_spacing(&Camera::default(), viewport, 0.0).is_empty());
    assert!(visible_grid_with_spacing(&Camera::default(), viewport, -5.0).is_empty());
}

#[test]
fn custom_spacing_is_respected() {
    let grid = visible_grid_with_spacing(&Camera::default(), Viewport::new(100.0, 100.0), 25.0);
    let xs: Vec<f64> = grid.vertical.iter().map(|l| l.from.x).collect();
    assert_eq!(xs, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
}
