// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space polygon helpers.

use core::cmp::Ordering;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Screen-space polygon: an ordered point sequence, usually 4 points.
pub type ScreenPolygon = SmallVec<[Point; 8]>;

/// Smallest axis-aligned rectangle containing every point.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn bounding_rect(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let mut rect = Rect::from_points(*first, *first);
    for p in rest {
        rect.x0 = rect.x0.min(p.x);
        rect.y0 = rect.y0.min(p.y);
        rect.x1 = rect.x1.max(p.x);
        rect.y1 = rect.y1.max(p.y);
    }
    Some(rect)
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a - o).cross(b - o)
}

fn lexicographic(a: &Point, b: &Point) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Replaces `points` with their convex hull in counter-clockwise order.
///
/// Collinear points on the hull boundary are dropped. Fewer than three input
/// points are left as they are.
pub fn convex_hull_in_place(points: &mut ScreenPolygon) {
    if points.len() < 3 {
        return;
    }
    points.sort_by(lexicographic);

    let mut hull = ScreenPolygon::new();
    // Lower chain, left to right.
    for &p in points.iter() {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    // Upper chain, right to left.
    let lower_len = hull.len() + 1;
    for &p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    // The last point repeats the first.
    hull.pop();

    *points = hull;
}
