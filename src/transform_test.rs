#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(Point::new(x, y), Size::new(w, h))
}

// --- drag ---

#[test]
fn free_drag_adds_delta() {
    let p = drag_to(Point::new(10.0, 10.0), Size::new(50.0, 50.0), Point::new(-30.0, 5.0), None);
    assert_eq!(p, Point::new(-20.0, 15.0));
}

#[test]
fn bounded_drag_stays_inside_parent() {
    let bounds = Some(Size::new(300.0, 300.0));
    let size = Size::new(100.0, 50.0);
    assert_eq!(drag_to(Point::new(50.0, 50.0), size, Point::new(500.0, 500.0), bounds), Point::new(200.0, 250.0));
    assert_eq!(drag_to(Point::new(50.0, 50.0), size, Point::new(-500.0, -500.0), bounds), Point::ORIGIN);
    assert_eq!(drag_to(Point::new(50.0, 50.0), size, Point::new(10.0, 10.0), bounds), Point::new(60.0, 60.0));
}

#[test]
fn oversized_child_pins_to_origin() {
    let p = clamp_into(Point::new(40.0, 40.0), Size::new(400.0, 400.0), Size::new(300.0, 300.0));
    assert_eq!(p, Point::ORIGIN);
}

// --- resize ---

#[test]
fn south_east_grows_size_only() {
    let r = resize(rect(10.0, 10.0, 100.0, 100.0), ResizeAnchor::Se, Point::new(20.0, 30.0), 50.0, None);
    assert_eq!(r, rect(10.0, 10.0, 120.0, 130.0));
}

#[test]
fn north_west_moves_origin() {
    let r = resize(rect(10.0, 10.0, 100.0, 100.0), ResizeAnchor::Nw, Point::new(-10.0, -20.0), 50.0, None);
    assert_eq!(r, rect(0.0, -10.0, 110.0, 120.0));
}

#[test]
fn east_ignores_vertical_delta() {
    let r = resize(rect(0.0, 0.0, 100.0, 100.0), ResizeAnchor::E, Point::new(10.0, 999.0), 50.0, None);
    assert_eq!(r, rect(0.0, 0.0, 110.0, 100.0));
}

#[test]
fn minimum_floor_holds_opposite_edge() {
    let r = resize(rect(0.0, 0.0, 100.0, 100.0), ResizeAnchor::Se, Point::new(-500.0, -500.0), 50.0, None);
    assert_eq!(r, rect(0.0, 0.0, 50.0, 50.0));

    let r = resize(rect(0.0, 0.0, 100.0, 100.0), ResizeAnchor::Nw, Point::new(500.0, 500.0), 50.0, None);
    assert_eq!(r, rect(50.0, 50.0, 50.0, 50.0));
}

#[test]
fn bounded_resize_stops_at_parent_edges() {
    let bounds = Some(Size::new(300.0, 300.0));
    let r = resize(rect(200.0, 200.0, 80.0, 80.0), ResizeAnchor::Se, Point::new(100.0, 100.0), 50.0, bounds);
    assert_eq!(r, rect(200.0, 200.0, 100.0, 100.0));

    let r = resize(rect(20.0, 20.0, 80.0, 80.0), ResizeAnchor::Nw, Point::new(-100.0, -100.0), 50.0, bounds);
    assert_eq!(r, rect(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn bounded_resize_of_overhanging_child_keeps_floor() {
    let bounds = Some(Size::new(300.0, 300.0));
    let r = resize(rect(280.0, 0.0, 100.0, 100.0), ResizeAnchor::E, Point::ORIGIN, 50.0, bounds);
    assert_eq!(r, rect(200.0, 0.0, 100.0, 100.0));

    let r = resize(rect(280.0, 250.0, 100.0, 100.0), ResizeAnchor::Se, Point::new(-80.0, -80.0), 50.0, bounds);
    assert_eq!(r, rect(200.0, 200.0, 50.0, 50.0));
    assert!(r.size.width >= 50.0 && r.size.height >= 50.0);
}

#[test]
fn parent_narrower_than_floor_caps_size() {
    let bounds = Some(Size::new(40.0, 300.0));
    let r = resize(rect(0.0, 0.0, 100.0, 100.0), ResizeAnchor::E, Point::new(-90.0, 0.0), 50.0, bounds);
    assert_eq!(r, rect(0.0, 0.0, 40.0, 100.0));
}

#[test]
fn anchors_map_to_edges() {
    assert!(ResizeAnchor::N.moves_north() && !ResizeAnchor::N.moves_south());
    assert!(ResizeAnchor::Sw.moves_south() && ResizeAnchor::Sw.moves_west());
    assert!(!ResizeAnchor::Sw.moves_east());
    assert!(ResizeAnchor::Ne.moves_north() && ResizeAnchor::Ne.moves_east());
}

// --- rotation ---

#[test]
fn rotate_by_wraps() {
    assert_eq!(rotate_by(350.0, 15.0), 5.0);
    assert_eq!(rotate_by(0.0, -90.0), 270.0);
    assert_eq!(rotate_by(90.0, 90.0), 180.0);
}

#[test]
fn rotated_bounds_quarter_turn_swaps_dimensions() {
    let b = rotated_bounds(rect(0.0, 0.0, 200.0, 100.0), 90.0);
    assert!(approx_eq(b.size.width, 100.0));
    assert!(approx_eq(b.size.height, 200.0));
    assert!(approx_eq(b.center().x, 100.0));
    assert!(approx_eq(b.center().y, 50.0));
}

#[test]
fn rotated_bounds_keeps_center() {
    let r = rect(10.0, 20.0, 100.0, 40.0);
    let b = rotated_bounds(r, 33.0);
    assert!(approx_eq(b.center().x, r.center().x));
    assert!(approx_eq(b.center().y, r.center().y));
    assert!(b.size.width >= r.size.width);
}

#[test]
fn rotated_bounds_zero_is_identity() {
    let r = rect(10.0, 20.0, 100.0, 40.0);
    let b = rotated_bounds(r, 0.0);
    assert!(approx_eq(b.origin.x, 10.0) && approx_eq(b.origin.y, 20.0));
    assert!(approx_eq(b.size.width, 100.0) && approx_eq(b.size.height, 40.0));
}
