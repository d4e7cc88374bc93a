// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default [`BoundsProvider`]s for the kinds in [`crate::kinds`].
//!
//! | Provider | Kind | Priority | Polygon |
//! |---|---|---|---|
//! | [`SpriteQuadProvider`] | [`Sprite`] | 200 | quad |
//! | [`LineQuadProvider`] | [`LineStrip`] | 150 | quad |
//! | [`MeshBoundsProvider`] | [`MeshRenderer`] | 100 | box |
//! | [`Collider2DQuadProvider`] | [`Collider2D`] | 90 | quad |
//! | [`ColliderBoundsProvider`] | [`Collider`] | 80 | box |
//! | [`RendererQuadProvider`] | any [`Renderer`] | 50 | quad |
//!
//! The renderer quad is the fallback for drawable kinds whose own provider
//! has no geometry, for example a closed [`LineStrip`] whose first and last
//! points coincide.

use core::any::Any;

use glam::DVec3;

use crate::bounds::{BoundsProvider, WorldPolygon};
use crate::kinds::{Collider, Collider2D, LineStrip, MeshRenderer, Renderer, Sprite};

/// Quad for a [`Sprite`]'s image bounds at local depth zero.
///
/// Fails when the sprite has no image.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpriteQuadProvider;

impl BoundsProvider for SpriteQuadProvider {
    fn priority(&self) -> i32 {
        200
    }

    fn recognizes(&self, object: &dyn Any) -> bool {
        object.is::<Sprite>()
    }

    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        let Some(sprite) = object.downcast_ref::<Sprite>() else {
            return false;
        };
        let Some(asset) = &sprite.asset else {
            return false;
        };
        out.extend(
            asset
                .bounds
                .quad_at(0.0)
                .map(|p| sprite.transform.transform_point3(p)),
        );
        true
    }
}

/// Quad covering a [`LineStrip`] from its first to its last point.
///
/// The quad is as wide as the wider end of the line and lies in the plane
/// spanned by the line direction and its perpendicular around +Z. Fails for
/// lines with fewer than two points or coincident endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineQuadProvider;

impl BoundsProvider for LineQuadProvider {
    fn priority(&self) -> i32 {
        150
    }

    fn recognizes(&self, object: &dyn Any) -> bool {
        object.is::<LineStrip>()
    }

    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        let Some(line) = object.downcast_ref::<LineStrip>() else {
            return false;
        };
        let (Some(&first), Some(&last)) = (line.positions.first(), line.positions.last()) else {
            return false;
        };
        if line.positions.len() < 2 {
            return false;
        }

        let (start, end) = if line.world_space {
            (first, last)
        } else {
            (
                line.transform.transform_point3(first),
                line.transform.transform_point3(last),
            )
        };

        let dir = (end - start).normalize_or_zero();
        if dir == DVec3::ZERO {
            return false;
        }
        // Lines parallel to Z have no screen-facing side.
        let side = dir.cross(DVec3::Z).normalize_or_zero() * (line.max_width() * 0.5);

        out.extend([start + side, start - side, end - side, end + side]);
        true
    }
}

/// Box around a [`MeshRenderer`]'s local bounds.
///
/// Fails when no bounds are available.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshBoundsProvider;

impl BoundsProvider for MeshBoundsProvider {
    fn priority(&self) -> i32 {
        100
    }

    fn recognizes(&self, object: &dyn Any) -> bool {
        object.is::<MeshRenderer>()
    }

    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        let Some(mesh) = object.downcast_ref::<MeshRenderer>() else {
            return false;
        };
        let Some(bounds) = mesh.local_bounds else {
            return false;
        };
        out.extend(
            bounds
                .corners()
                .map(|p| mesh.transform.transform_point3(p)),
        );
        true
    }
}

/// Quad for a [`Collider2D`]'s world bounds at the bounds' center depth.
#[derive(Clone, Copy, Debug, Default)]
pub struct Collider2DQuadProvider;

impl BoundsProvider for Collider2DQuadProvider {
    fn priority(&self) -> i32 {
        90
    }

    fn recognizes(&self, object: &dyn Any) -> bool {
        object.is::<Collider2D>()
    }

    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        let Some(collider) = object.downcast_ref::<Collider2D>() else {
            return false;
        };
        let bounds = collider.bounds;
        out.extend(bounds.quad_at(bounds.center.z));
        true
    }
}

/// Box for a [`Collider`]'s world bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColliderBoundsProvider;

impl BoundsProvider for ColliderBoundsProvider {
    fn priority(&self) -> i32 {
        80
    }

    fn recognizes(&self, object: &dyn Any) -> bool {
        object.is::<Collider>()
    }

    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        let Some(collider) = object.downcast_ref::<Collider>() else {
            return false;
        };
        out.extend(collider.bounds.corners());
        true
    }
}

/// Quad for any [`Renderer`] kind: its local bounds at local depth zero.
///
/// Recognizes [`Sprite`], [`LineStrip`] and [`MeshRenderer`]. Fails when the
/// renderer has no local bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct RendererQuadProvider;

impl RendererQuadProvider {
    fn as_renderer(object: &dyn Any) -> Option<&dyn Renderer> {
        if let Some(sprite) = object.downcast_ref::<Sprite>() {
            Some(sprite as &dyn Renderer)
        } else if let Some(line) = object.downcast_ref::<LineStrip>() {
            Some(line as &dyn Renderer)
        } else if let Some(mesh) = object.downcast_ref::<MeshRenderer>() {
            Some(mesh as &dyn Renderer)
        } else {
            None
        }
    }
}

impl BoundsProvider for RendererQuadProvider {
    fn priority(&self) -> i32 {
        50
    }

    fn recognizes(&self, object: &dyn Any) -> bool {
        Self::as_renderer(object).is_some()
    }

    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        let Some(renderer) = Self::as_renderer(object) else {
            return false;
        };
        let Some(bounds) = renderer.local_bounds() else {
            return false;
        };
        let to_world = renderer.local_to_world();
        out.extend(bounds.quad_at(0.0).map(|p| to_world.transform_point3(p)));
        true
    }
}
