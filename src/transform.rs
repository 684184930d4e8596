//! Drag, resize and rotation math for a single element.
//!
//! These are pure functions over canvas-space geometry. The engine feeds them
//! the screen-space pointer travel already divided by the viewport scale, so
//! an element follows the pointer one-to-one at every zoom level.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::element::normalize_degrees;
use crate::geom::{Point, Rect, Size};
use crate::input::ResizeAnchor;

/// Clamp a top-left corner so a box of `size` stays inside `bounds`
/// (a parent rectangle in its own local space, origin at zero). A box larger
/// than the bounds pins to the bounds' top-left corner.
#[must_use]
pub fn clamp_into(corner: Point, size: Size, bounds: Size) -> Point {
    let max_x = (bounds.width - size.width).max(0.0);
    let max_y = (bounds.height - size.height).max(0.0);
    Point::new(corner.x.clamp(0.0, max_x), corner.y.clamp(0.0, max_y))
}

/// New top-left corner after dragging by a canvas-space `delta`.
///
/// With `bounds`, the corner is relative to a parent and is kept inside it.
#[must_use]
pub fn drag_to(origin: Point, size: Size, delta: Point, bounds: Option<Size>) -> Point {
    let moved = origin + delta;
    match bounds {
        Some(bounds) => clamp_into(moved, size, bounds),
        None => moved,
    }
}

/// New rectangle after dragging the `anchor` handle by a canvas-space `delta`.
///
/// Only the edges named by the anchor move. Each dimension is floored at
/// `min_size` by holding the opposite edge fixed. With `bounds`, the starting
/// rectangle is first pulled inside the parent's local rectangle and the
/// moving edges are kept there; a parent narrower than `min_size` caps the
/// size at the parent's.
#[must_use]
pub fn resize(orig: Rect, anchor: ResizeAnchor, delta: Point, min_size: f64, bounds: Option<Size>) -> Rect {
    let start = match bounds {
        Some(bounds) => clamp_into(orig.origin, orig.size, bounds),
        None => orig.origin,
    };
    let mut left = start.x;
    let mut top = start.y;
    let mut right = start.x + orig.size.width;
    let mut bottom = start.y + orig.size.height;

    if anchor.moves_west() {
        left = (left + delta.x).min(right - min_size);
    }
    if anchor.moves_east() {
        right = (right + delta.x).max(left + min_size);
    }
    if anchor.moves_north() {
        top = (top + delta.y).min(bottom - min_size);
    }
    if anchor.moves_south() {
        bottom = (bottom + delta.y).max(top + min_size);
    }

    if let Some(bounds) = bounds {
        if anchor.moves_west() {
            left = left.max(0.0);
            right = right.max((left + min_size).min(bounds.width));
        }
        if anchor.moves_east() {
            right = right.min(bounds.width);
            left = left.min((right - min_size).max(0.0));
        }
        if anchor.moves_north() {
            top = top.max(0.0);
            bottom = bottom.max((top + min_size).min(bounds.height));
        }
        if anchor.moves_south() {
            bottom = bottom.min(bounds.height);
            top = top.min((bottom - min_size).max(0.0));
        }
    }

    Rect::new(Point::new(left, top), Size::new(right - left, bottom - top))
}

/// Rotation after applying a signed step, normalized to `[0, 360)`.
#[must_use]
pub fn rotate_by(rotation: f64, step: f64) -> f64 {
    normalize_degrees(rotation + step)
}

/// Axis-aligned bounds of `rect` rotated by `degrees` about its own center.
#[must_use]
pub fn rotated_bounds(rect: Rect, degrees: f64) -> Rect {
    let rad = normalize_degrees(degrees).to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let w = rect.size.width * cos + rect.size.height * sin;
    let h = rect.size.width * sin + rect.size.height * cos;
    let c = rect.center();
    Rect::new(Point::new(c.x - w * 0.5, c.y - h * 0.5), Size::new(w, h))
}
