#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn fractional_client_position_is_kept() {
    let point = fractional_or(Some(100.75), Some(40.25), Point::new(100.0, 40.0));
    assert_eq!(point, Point::new(100.75, 40.25));
}

#[test]
fn missing_coordinate_falls_back_to_whole_pixels() {
    let whole = Point::new(12.0, 7.0);
    assert_eq!(fractional_or(None, Some(7.5), whole), whole);
    assert_eq!(fractional_or(Some(12.5), None, whole), whole);
}

#[test]
fn non_finite_coordinate_falls_back_to_whole_pixels() {
    let whole = Point::new(3.0, 4.0);
    assert_eq!(fractional_or(Some(f64::NAN), Some(4.5), whole), whole);
    assert_eq!(fractional_or(Some(3.5), Some(f64::INFINITY), whole), whole);
}

#[test]
fn sub_pixel_anchor_keeps_its_world_point_under_the_cursor() {
    let mut engine = EngineCore::new();
    let cursor = fractional_or(Some(310.6), Some(95.3), Point::new(310.0, 95.0));
    let before = engine.camera().screen_to_world(cursor);
    engine.handle_input(InputEvent::Wheel { position: cursor, delta_y: -1.0 });
    let after = engine.camera().screen_to_world(cursor);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}
