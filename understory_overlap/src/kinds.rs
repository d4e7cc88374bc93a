// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in spatial object kinds understood by the default providers.
//!
//! Hosts either store these types directly in their scene and hand them out
//! through [`OverlapScene::spatial_object`](crate::OverlapScene::spatial_object),
//! or register their own kinds with a custom [`BoundsProvider`](crate::BoundsProvider).
//! The engine recognizes a kind purely by downcasting the `&dyn Any` it is
//! given, so there is no central list of kinds to extend.

use alloc::vec::Vec;

use glam::{DAffine3, DVec3};

/// A 3D axis-aligned box stored as center and half-extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
    /// Center of the box.
    pub center: DVec3,
    /// Half-size along each axis. Components are expected to be non-negative.
    pub extents: DVec3,
}

impl Aabb3 {
    /// Creates a box from its center and half-extents.
    #[must_use]
    pub const fn new(center: DVec3, extents: DVec3) -> Self {
        Self { center, extents }
    }

    /// Creates a box spanning two opposite corners, in any order.
    #[must_use]
    pub fn from_min_max(a: DVec3, b: DVec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> DVec3 {
        self.center - self.extents
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> DVec3 {
        self.center + self.extents
    }

    /// The four corners of the box's cross-section at depth `z`.
    ///
    /// Order: `(-x, -y)`, `(+x, -y)`, `(+x, +y)`, `(-x, +y)`.
    #[must_use]
    pub fn quad_at(&self, z: f64) -> [DVec3; 4] {
        let (c, e) = (self.center, self.extents);
        [
            DVec3::new(c.x - e.x, c.y - e.y, z),
            DVec3::new(c.x + e.x, c.y - e.y, z),
            DVec3::new(c.x + e.x, c.y + e.y, z),
            DVec3::new(c.x - e.x, c.y + e.y, z),
        ]
    }

    /// All eight corners: the near face (`-z`) then the far face (`+z`), each
    /// in [`quad_at`](Self::quad_at) order.
    #[must_use]
    pub fn corners(&self) -> [DVec3; 8] {
        let near = self.quad_at(self.center.z - self.extents.z);
        let far = self.quad_at(self.center.z + self.extents.z);
        [
            near[0], near[1], near[2], near[3], far[0], far[1], far[2], far[3],
        ]
    }
}

/// Visual data attached to a [`Sprite`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteAsset {
    /// Bounds of the sprite image in the sprite's local space.
    pub bounds: Aabb3,
}

/// A flat textured quad placed in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    /// Local-to-world transform.
    pub transform: DAffine3,
    /// The assigned image, if any. A sprite without one has no footprint.
    pub asset: Option<SpriteAsset>,
}

impl Sprite {
    /// Creates a sprite whose image spans `size` centered on its origin.
    #[must_use]
    pub fn new(transform: DAffine3, size: glam::DVec2) -> Self {
        Self {
            transform,
            asset: Some(SpriteAsset {
                bounds: Aabb3::new(DVec3::ZERO, (size * 0.5).extend(0.0)),
            }),
        }
    }
}

/// A polyline drawn with a width.
///
/// Only the first and last positions contribute to its footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStrip {
    /// Local-to-world transform, applied when `world_space` is `false`.
    pub transform: DAffine3,
    /// Points along the line.
    pub positions: Vec<DVec3>,
    /// Whether `positions` are already in world space.
    pub world_space: bool,
    /// Width at the first point.
    pub start_width: f64,
    /// Width at the last point.
    pub end_width: f64,
    /// Scale applied to both widths.
    pub width_multiplier: f64,
}

impl LineStrip {
    /// Creates a world-space line of uniform `width` through `positions`.
    #[must_use]
    pub fn world(positions: Vec<DVec3>, width: f64) -> Self {
        Self {
            transform: DAffine3::IDENTITY,
            positions,
            world_space: true,
            start_width: width,
            end_width: width,
            width_multiplier: 1.0,
        }
    }

    /// The widest extent of the line after applying the multiplier.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.start_width.max(self.end_width) * self.width_multiplier
    }
}

/// A generic mesh with local-space bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshRenderer {
    /// Local-to-world transform.
    pub transform: DAffine3,
    /// Bounds of the mesh in local space; `None` while no mesh is assigned.
    pub local_bounds: Option<Aabb3>,
}

/// Common view of the drawable kinds: a transform plus local-space bounds.
///
/// [`RendererQuadProvider`](crate::providers::RendererQuadProvider) builds its
/// fallback quad from this when the kind-specific provider has no geometry.
pub trait Renderer {
    /// Local-to-world transform.
    fn local_to_world(&self) -> DAffine3;

    /// Bounds in local space, or `None` if nothing is drawn.
    fn local_bounds(&self) -> Option<Aabb3>;
}

impl Renderer for Sprite {
    fn local_to_world(&self) -> DAffine3 {
        self.transform
    }

    fn local_bounds(&self) -> Option<Aabb3> {
        self.asset.map(|asset| asset.bounds)
    }
}

impl Renderer for LineStrip {
    fn local_to_world(&self) -> DAffine3 {
        if self.world_space {
            DAffine3::IDENTITY
        } else {
            self.transform
        }
    }

    /// Box around every position, widened by half the line width in x and y.
    fn local_bounds(&self) -> Option<Aabb3> {
        let (&first, rest) = self.positions.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        let pad = DVec3::new(self.max_width() * 0.5, self.max_width() * 0.5, 0.0);
        Some(Aabb3::from_min_max(min - pad, max + pad))
    }
}

impl Renderer for MeshRenderer {
    fn local_to_world(&self) -> DAffine3 {
        self.transform
    }

    fn local_bounds(&self) -> Option<Aabb3> {
        self.local_bounds
    }
}

/// A 3D physics collider; its bounds are already in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    /// World-space bounds.
    pub bounds: Aabb3,
}

/// A 2D physics collider; its bounds are already in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider2D {
    /// World-space bounds. Only x/y extents are used.
    pub bounds: Aabb3,
}
