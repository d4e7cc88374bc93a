// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boolean overlap tests between two screen-space polygons.
//!
//! Both strategies treat the polygons as closed sets: shapes that only touch
//! along an edge or at a corner overlap.
//!
//! - [`AxisAligned`] compares bounding rectangles. It is fast and exact for
//!   unrotated rectangles, and conservative otherwise: rotated shapes whose
//!   bounding rectangles meet are reported as overlapping even if the shapes
//!   themselves do not.
//! - [`SeparatingAxis`] is exact for convex polygons, rotated or not.

use alloc::boxed::Box;
use core::fmt::Debug;

use kurbo::{Point, Vec2};

use crate::polygon::bounding_rect;

/// Decides whether two screen-space polygons overlap.
pub trait OverlapStrategy: Debug {
    /// Returns `true` if polygons `a` and `b` overlap.
    ///
    /// Points are in order around each polygon; the winding direction does not
    /// matter. An empty polygon overlaps nothing.
    fn overlaps(&self, a: &[Point], b: &[Point]) -> bool;
}

/// Bounding-rectangle overlap test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisAligned;

impl OverlapStrategy for AxisAligned {
    fn overlaps(&self, a: &[Point], b: &[Point]) -> bool {
        let (Some(ra), Some(rb)) = (bounding_rect(a), bounding_rect(b)) else {
            return false;
        };
        ra.x1 >= rb.x0 && rb.x1 >= ra.x0 && ra.y1 >= rb.y0 && rb.y1 >= ra.y0
    }
}

/// Separating axis test over the screen axes and the edges of both polygons.
///
/// Besides each edge normal, the screen x/y axes and each edge direction are
/// candidate axes. For polygons with area they add nothing, but collapsed
/// polygons (segments and points) have no usable normal along their length.
/// A consequence is that this test never overlaps where [`AxisAligned`]
/// does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeparatingAxis;

impl SeparatingAxis {
    fn separated_on(axis: Vec2, a: &[Point], b: &[Point]) -> bool {
        let (min_a, max_a) = project(a, axis);
        let (min_b, max_b) = project(b, axis);
        max_a < min_b || max_b < min_a
    }

    /// Returns `true` if a normal or direction of some edge of `edges_of`
    /// separates `a` from `b`.
    fn any_separating_edge(edges_of: &[Point], a: &[Point], b: &[Point]) -> bool {
        let n = edges_of.len();
        for i in 0..n {
            let edge = edges_of[(i + 1) % n] - edges_of[i];
            let len = edge.hypot();
            if len == 0.0 || !len.is_finite() {
                continue;
            }
            let dir = edge / len;
            if Self::separated_on(Vec2::new(-dir.y, dir.x), a, b)
                || Self::separated_on(dir, a, b)
            {
                return true;
            }
        }
        false
    }
}

fn project(points: &[Point], axis: Vec2) -> (f64, f64) {
    points
        .iter()
        .map(|p| p.to_vec2().dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}

impl OverlapStrategy for SeparatingAxis {
    fn overlaps(&self, a: &[Point], b: &[Point]) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        let separated = Self::separated_on(Vec2::new(1.0, 0.0), a, b)
            || Self::separated_on(Vec2::new(0.0, 1.0), a, b)
            || Self::any_separating_edge(a, a, b)
            || Self::any_separating_edge(b, a, b);
        !separated
    }
}

/// The built-in strategies, as a plain configuration value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// [`AxisAligned`].
    #[default]
    AxisAligned,
    /// [`SeparatingAxis`].
    SeparatingAxis,
}

impl StrategyKind {
    /// Picks [`SeparatingAxis`] when rotation must be respected.
    #[must_use]
    pub const fn from_rotation_aware(rotation_aware: bool) -> Self {
        if rotation_aware {
            Self::SeparatingAxis
        } else {
            Self::AxisAligned
        }
    }

    /// Instantiates the strategy.
    #[must_use]
    pub fn into_strategy(self) -> Box<dyn OverlapStrategy> {
        match self {
            Self::AxisAligned => Box::new(AxisAligned),
            Self::SeparatingAxis => Box::new(SeparatingAxis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> [Point; 4] {
        [
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    /// A square turned 45 degrees, given by its center and half-diagonal.
    fn diamond(cx: f64, cy: f64, half_diagonal: f64) -> [Point; 4] {
        [
            Point::new(cx, cy - half_diagonal),
            Point::new(cx + half_diagonal, cy),
            Point::new(cx, cy + half_diagonal),
            Point::new(cx - half_diagonal, cy),
        ]
    }

    fn both(a: &[Point], b: &[Point]) -> (bool, bool) {
        (AxisAligned.overlaps(a, b), SeparatingAxis.overlaps(a, b))
    }

    #[test]
    fn overlapping_squares() {
        assert_eq!(both(&square(0.0, 0.0, 10.0), &square(5.0, 5.0, 10.0)), (true, true));
    }

    #[test]
    fn disjoint_squares() {
        assert_eq!(
            both(&square(0.0, 0.0, 10.0), &square(20.0, 20.0, 10.0)),
            (false, false)
        );
    }

    #[test]
    fn touching_edges_and_corners_overlap() {
        let a = square(0.0, 0.0, 10.0);
        assert_eq!(both(&a, &square(10.0, 0.0, 10.0)), (true, true));
        assert_eq!(both(&a, &square(10.0, 10.0, 10.0)), (true, true));
        assert_eq!(both(&a, &square(10.0 + 1e-9, 0.0, 10.0)), (false, false));
    }

    #[test]
    fn rotated_shape_is_a_false_positive_only_for_axis_aligned() {
        // Diamond centered at (17, 17) with half-diagonal 8: its bounding box
        // (9..25) reaches into the square, but its closest edge stays beyond
        // the square's corner at (10, 10).
        let a = square(0.0, 0.0, 10.0);
        let b = diamond(17.0, 17.0, 8.0);
        assert_eq!(both(&a, &b), (true, false));
        assert_eq!(both(&b, &a), (true, false));
    }

    #[test]
    fn rotated_shapes_that_truly_overlap() {
        let a = square(0.0, 0.0, 10.0);
        let b = diamond(12.0, 5.0, 4.0);
        assert_eq!(both(&a, &b), (true, true));
    }

    #[test]
    fn strategies_are_commutative_and_agree_on_unrotated_rects() {
        let rects = [
            square(0.0, 0.0, 10.0),
            square(5.0, -3.0, 4.0),
            square(10.0, 10.0, 1.0),
            square(-20.0, 4.0, 5.0),
            square(2.0, 2.0, 1.0),
            square(11.0, 0.0, 3.0),
        ];
        for a in &rects {
            for b in &rects {
                let aabb = AxisAligned.overlaps(a, b);
                assert_eq!(aabb, AxisAligned.overlaps(b, a));
                assert_eq!(aabb, SeparatingAxis.overlaps(a, b));
                assert_eq!(SeparatingAxis.overlaps(a, b), SeparatingAxis.overlaps(b, a));
            }
        }
    }

    #[test]
    fn winding_direction_does_not_matter() {
        let a = square(0.0, 0.0, 10.0);
        let mut reversed = diamond(17.0, 17.0, 8.0);
        reversed.reverse();
        assert!(!SeparatingAxis.overlaps(&a, &reversed));
        reversed = diamond(12.0, 5.0, 4.0);
        reversed.reverse();
        assert!(SeparatingAxis.overlaps(&a, &reversed));
    }

    #[test]
    fn zero_length_edges_are_skipped() {
        // A quad with a repeated vertex still behaves like a triangle.
        let tri = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        assert!(SeparatingAxis.overlaps(&tri, &square(4.0, 4.0, 1.0)));
        assert!(!SeparatingAxis.overlaps(&tri, &square(6.0, 6.0, 1.0)));
        // Fully degenerate: a single repeated point.
        let dot = [Point::new(1.0, 1.0); 4];
        assert!(SeparatingAxis.overlaps(&dot, &square(0.0, 0.0, 2.0)));
        assert!(!SeparatingAxis.overlaps(&dot, &square(3.0, 3.0, 2.0)));
    }

    #[test]
    fn collapsed_polygons_are_separated_along_their_length() {
        let seg = |x0: f64, y0: f64, x1: f64, y1: f64| [Point::new(x0, y0), Point::new(x1, y1)];

        // Collinear segments on a screen axis and on a diagonal.
        assert_eq!(
            both(&seg(0.0, 0.0, 1.0, 0.0), &seg(2.0, 0.0, 3.0, 0.0)),
            (false, false)
        );
        assert!(!SeparatingAxis.overlaps(&seg(0.0, 0.0, 1.0, 1.0), &seg(2.0, 2.0, 3.0, 3.0)));
        assert!(SeparatingAxis.overlaps(&seg(0.0, 0.0, 2.0, 2.0), &seg(1.0, 1.0, 3.0, 3.0)));

        // A point against a segment it lies beyond, and one it lies on.
        let dot = [Point::new(5.0, 0.0)];
        assert_eq!(both(&dot, &seg(0.0, 0.0, 1.0, 0.0)), (false, false));
        assert!(SeparatingAxis.overlaps(&[Point::new(0.5, 0.0)], &seg(0.0, 0.0, 1.0, 0.0)));

        // Distinct and coincident points.
        assert!(!SeparatingAxis.overlaps(&[Point::new(1.0, 1.0)], &[Point::new(2.0, 2.0)]));
        assert!(SeparatingAxis.overlaps(&[Point::new(1.0, 1.0)], &[Point::new(1.0, 1.0)]));
    }

    #[test]
    fn zero_height_rect_agrees_with_axis_aligned() {
        let flat = [
            Point::new(0.0, 5.0),
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
            Point::new(10.0, 5.0),
        ];
        for other in [
            square(20.0, 0.0, 10.0),
            square(2.0, 0.0, 10.0),
            square(2.0, 6.0, 3.0),
            square(-8.0, 5.0, 2.0),
        ] {
            assert_eq!(
                SeparatingAxis.overlaps(&flat, &other),
                AxisAligned.overlaps(&flat, &other)
            );
        }
    }

    #[test]
    fn empty_polygons_never_overlap() {
        let a = square(0.0, 0.0, 10.0);
        assert_eq!(both(&a, &[]), (false, false));
        assert_eq!(both(&[], &a), (false, false));
    }

    #[test]
    fn strategy_kind_selection() {
        assert_eq!(StrategyKind::from_rotation_aware(true), StrategyKind::SeparatingAxis);
        assert_eq!(StrategyKind::from_rotation_aware(false), StrategyKind::AxisAligned);
        let sat = StrategyKind::SeparatingAxis.into_strategy();
        assert!(!sat.overlaps(&square(0.0, 0.0, 10.0), &diamond(17.0, 17.0, 8.0)));
    }
}
