// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the engine and the host's scene.
//!
//! The engine never owns scene objects. It stores small copyable ids and
//! resolves them through an [`OverlapScene`] once per frame; an id that no
//! longer resolves is treated as destroyed and dropped from tracking.

use core::any::Any;
use core::fmt::Debug;
use core::hash::Hash;

use glam::DVec3;

use crate::projector::Camera;

/// How a canvas maps its rectangles to the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CanvasMode {
    /// Rectangles are laid out directly in screen pixels; no camera is involved.
    #[default]
    ScreenSpaceOverlay,
    /// The canvas is drawn in front of a camera and projected through it.
    ScreenSpaceCamera,
    /// The canvas is an object in the world and projected like one.
    WorldSpace,
}

impl CanvasMode {
    /// Returns `true` if rectangles on this canvas are projected by a camera.
    #[must_use]
    pub const fn uses_camera(self) -> bool {
        !matches!(self, Self::ScreenSpaceOverlay)
    }
}

/// A UI rectangle as seen by the engine: four world-space corners and its canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiRect<C> {
    /// World-space corners, in order around the rectangle
    /// (bottom-left, top-left, top-right, bottom-right).
    pub corners: [DVec3; 4],
    /// Canvas the rectangle belongs to, if the host tracks one per rectangle.
    ///
    /// When `None`, the engine falls back to
    /// [`OverlapConfig::canvas`](crate::OverlapConfig::canvas).
    pub canvas: Option<C>,
}

impl<C> UiRect<C> {
    /// Creates an axis-aligned rectangle in the z = 0 plane spanning
    /// `(x0, y0)`–`(x1, y1)`.
    #[must_use]
    pub fn from_bounds(x0: f64, y0: f64, x1: f64, y1: f64, canvas: Option<C>) -> Self {
        Self {
            corners: [
                DVec3::new(x0, y0, 0.0),
                DVec3::new(x0, y1, 0.0),
                DVec3::new(x1, y1, 0.0),
                DVec3::new(x1, y0, 0.0),
            ],
            canvas,
        }
    }
}

/// Host scene queried by [`OverlapEngine`](crate::OverlapEngine) every frame.
///
/// Lookups returning `None` mean the object has been destroyed.
pub trait OverlapScene {
    /// Handle for a spatial object.
    type ObjectId: Copy + Eq + Hash + Debug;
    /// Handle for a UI rectangle.
    type RectId: Copy + Eq + Hash + Debug;
    /// Handle for a camera.
    type CameraId: Copy + Eq + Debug;
    /// Handle for a canvas.
    type CanvasId: Copy + Eq + Debug;

    /// Resolves a spatial object to its concrete kind.
    ///
    /// The returned value is what [`BoundsProvider`](crate::BoundsProvider)s
    /// downcast to recognize the object.
    fn spatial_object(&self, id: Self::ObjectId) -> Option<&dyn Any>;

    /// Resolves a UI rectangle.
    fn ui_rect(&self, id: Self::RectId) -> Option<UiRect<Self::CanvasId>>;

    /// Resolves a camera.
    fn camera(&self, id: Self::CameraId) -> Option<Camera>;

    /// The camera to use when none is configured, if the scene has one.
    fn main_camera(&self) -> Option<Camera> {
        None
    }

    /// The projection mode of a canvas.
    fn canvas_mode(&self, id: Self::CanvasId) -> Option<CanvasMode>;
}
