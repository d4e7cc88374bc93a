// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-to-screen projection.
//!
//! Screen space is shared by everything the engine compares: x grows to the
//! right and y grows upward from the bottom-left corner of the camera
//! viewport. Overlay canvases already lay their rectangles out in that space,
//! which is why [`OverlayProjector`] is the identity on x and y.

use glam::{DAffine3, DMat4, DVec3};
use kurbo::{Point, Rect};

use crate::polygon::ScreenPolygon;

/// Maps a world-space point to a screen-space point.
///
/// Implementations hold whatever they need to project (typically a camera)
/// and have no side effects.
pub trait ScreenProjector {
    /// Projects one point.
    fn world_to_screen(&self, point: DVec3) -> Point;

    /// Projects every point of `points` into `out`, replacing its contents.
    fn project_into(&self, points: &[DVec3], out: &mut ScreenPolygon) {
        out.clear();
        out.extend(points.iter().map(|p| self.world_to_screen(*p)));
    }
}

/// Camera lens model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f64,
        /// Near clip distance (positive).
        near: f64,
        /// Far clip distance.
        far: f64,
    },
    /// Orthographic projection.
    Orthographic {
        /// Half of the visible world height; the width follows the viewport aspect.
        half_height: f64,
        /// Near clip distance.
        near: f64,
        /// Far clip distance.
        far: f64,
    },
}

/// A camera: where it looks from, how it projects, and which screen region it fills.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-to-camera transform. The camera looks down its local -Z with +Y up.
    pub view: DAffine3,
    /// Lens model.
    pub projection: Projection,
    /// Screen-space region the camera renders to, in pixels.
    pub viewport: Rect,
}

impl Camera {
    /// Creates a perspective camera from a world-to-camera transform.
    #[must_use]
    pub fn perspective(view: DAffine3, fov_y: f64, near: f64, far: f64, viewport: Rect) -> Self {
        Self {
            view,
            projection: Projection::Perspective { fov_y, near, far },
            viewport,
        }
    }

    /// Creates an orthographic camera from a world-to-camera transform.
    #[must_use]
    pub fn orthographic(
        view: DAffine3,
        half_height: f64,
        near: f64,
        far: f64,
        viewport: Rect,
    ) -> Self {
        Self {
            view,
            projection: Projection::Orthographic {
                half_height,
                near,
                far,
            },
            viewport,
        }
    }

    /// Creates a camera at `eye` looking at `target`.
    #[must_use]
    pub fn look_at(eye: DVec3, target: DVec3, up: DVec3, projection: Projection, viewport: Rect) -> Self {
        Self {
            view: DAffine3::look_at_rh(eye, target, up),
            projection,
            viewport,
        }
    }

    /// Viewport width over height, or `1.0` for an empty viewport.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        let (w, h) = (self.viewport.width(), self.viewport.height());
        if w > 0.0 && h > 0.0 { w / h } else { 1.0 }
    }

    /// The combined world-to-clip matrix.
    #[must_use]
    pub fn clip_from_world(&self) -> DMat4 {
        let aspect = self.aspect();
        let proj = match self.projection {
            Projection::Perspective { fov_y, near, far } => {
                DMat4::perspective_rh(fov_y, aspect, near, far)
            }
            Projection::Orthographic {
                half_height,
                near,
                far,
            } => {
                let half_width = half_height * aspect;
                DMat4::orthographic_rh(-half_width, half_width, -half_height, half_height, near, far)
            }
        };
        proj * DMat4::from(self.view)
    }
}

/// Projects through a [`Camera`], for both perspective and orthographic lenses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraProjector {
    clip_from_world: DMat4,
    viewport: Rect,
}

impl CameraProjector {
    /// Creates a projector for `camera`.
    #[must_use]
    pub fn new(camera: &Camera) -> Self {
        Self {
            clip_from_world: camera.clip_from_world(),
            viewport: camera.viewport,
        }
    }
}

impl ScreenProjector for CameraProjector {
    fn world_to_screen(&self, point: DVec3) -> Point {
        let clip = self.clip_from_world * point.extend(1.0);
        // Points in the camera plane have w == 0 and no finite projection;
        // keep them on the clip-space ray instead of producing infinities.
        let ndc = if clip.w != 0.0 {
            clip.truncate() / clip.w
        } else {
            clip.truncate()
        };
        let vp = self.viewport;
        Point::new(
            vp.x0 + (ndc.x * 0.5 + 0.5) * vp.width(),
            vp.y0 + (ndc.y * 0.5 + 0.5) * vp.height(),
        )
    }
}

/// Identity projection used for rectangles on overlay canvases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayProjector;

impl ScreenProjector for OverlayProjector {
    fn world_to_screen(&self, point: DVec3) -> Point {
        Point::new(point.x, point.y)
    }
}
