//! Rectangle helpers for quadtree geometry
//!
//! Rectangles are plain `geo::Rect<f64>` values. `geo` normalizes corners on
//! construction, so raw coordinates coming from callers are validated by
//! [`try_rect`], and a root must pass [`check_splittable`] before
//! [`quadrants`] is applied to it or any of its descendants.

use crate::{QuadtreeError, Result};
use geo::{Coord, Point, Rect};

/// Build a rectangle from raw `(min_x, min_y, max_x, max_y)` coordinates
///
/// Fails instead of silently swapping corners when the minimum exceeds the
/// maximum on either axis, or when any coordinate is NaN or infinite.
pub fn try_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Rect<f64>> {
    if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
        return Err(QuadtreeError::InvalidGeometry(format!(
            "non-finite coordinates ({min_x}, {min_y}, {max_x}, {max_y})"
        )));
    }
    if min_x > max_x {
        return Err(QuadtreeError::InvalidGeometry(format!(
            "min_x {min_x} is greater than max_x {max_x}"
        )));
    }
    if min_y > max_y {
        return Err(QuadtreeError::InvalidGeometry(format!(
            "min_y {min_y} is greater than max_y {max_y}"
        )));
    }

    Ok(Rect::new(
        Coord { x: min_x, y: min_y },
        Coord { x: max_x, y: max_y },
    ))
}

/// Check that an existing rectangle only holds finite coordinates
pub fn validate(rect: &Rect<f64>) -> Result<()> {
    let min = rect.min();
    let max = rect.max();
    try_rect(min.x, min.y, max.x, max.y).map(|_| ())
}

/// Reject roots whose quadrants would escape them
///
/// The vertical split is derived from the width, so a rectangle shorter than
/// it is wide eventually puts a split point above its top edge. Square and
/// taller rectangles keep every quadrant, at every depth, inside the parent.
pub fn check_splittable(rect: &Rect<f64>) -> Result<()> {
    if rect.height() < rect.width() && !is_square(rect) {
        return Err(QuadtreeError::InvalidGeometry(format!(
            "height {} is smaller than width {}; quadrants would fall outside the root",
            rect.height(),
            rect.width()
        )));
    }
    Ok(())
}

/// Split a rectangle into its four quadrants
///
/// The split point is `(x0 + h, y0 + h)` with `h = width / 2`, so the vertical
/// split is derived from the width as well. Square rectangles produce four
/// equal squares; taller ones produce quadrants of differing heights. Callers
/// must have passed the rectangle through [`check_splittable`].
///
/// Order: bottom-left, top-left, top-right, bottom-right.
#[inline]
pub fn quadrants(rect: &Rect<f64>) -> [Rect<f64>; 4] {
    let min = rect.min();
    let max = rect.max();
    let h = (max.x - min.x) / 2.0;
    let mid_x = min.x + h;
    let mid_y = min.y + h;

    [
        Rect::new(Coord { x: min.x, y: min.y }, Coord { x: mid_x, y: mid_y }),
        Rect::new(Coord { x: min.x, y: mid_y }, Coord { x: mid_x, y: max.y }),
        Rect::new(Coord { x: mid_x, y: mid_y }, Coord { x: max.x, y: max.y }),
        Rect::new(Coord { x: mid_x, y: min.y }, Coord { x: max.x, y: mid_y }),
    ]
}

/// Inclusive containment test on all four sides
///
/// A point lying exactly on an edge shared by two sibling quadrants is
/// reported as contained by both.
#[inline(always)]
pub fn contains(rect: &Rect<f64>, x: f64, y: f64) -> bool {
    let min = rect.min();
    let max = rect.max();
    x >= min.x && x <= max.x && y >= min.y && y <= max.y
}

/// Inclusive containment test for a point
#[inline(always)]
pub fn contains_point(rect: &Rect<f64>, point: &Point<f64>) -> bool {
    contains(rect, point.x(), point.y())
}

/// Whether width and height agree within a relative tolerance
pub(crate) fn is_square(rect: &Rect<f64>) -> bool {
    let (w, h) = (rect.width(), rect.height());
    (w - h).abs() <= f64::EPSILON * w.abs().max(h.abs()).max(1.0)
}
