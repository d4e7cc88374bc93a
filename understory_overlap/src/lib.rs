// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlap --heading-base-level=0

//! Understory Overlap: screen-space overlap tracking between UI rectangles and world objects.
//!
//! Every frame, this crate projects two groups into the same 2D screen space
//! and reports which members overlap, as enter/stay/exit transitions per
//! pair, the way a physics engine reports trigger events:
//!
//! - **Spatial objects** (sprites, lines, meshes, colliders, or any kind you
//!   register) get a world-space bounding polygon from a
//!   [`BoundsProvider`] and are projected through a [`Camera`].
//! - **UI rectangles** expose their four world corners directly. On overlay
//!   canvases those corners already are screen coordinates; on other canvases
//!   they go through the camera as well.
//!
//! It answers only "do these projections overlap". There is no penetration
//! depth, contact normal or response.
//!
//! ## Pieces
//!
//! - [`BoundsRegistry`]: priority-ordered [`BoundsProvider`]s. The first one
//!   that recognizes an object's kind and has geometry for it wins. See
//!   [`providers`] for the defaults and [`bounds_fn`] for adding kinds.
//! - [`ScreenProjector`]: [`CameraProjector`] for perspective and orthographic
//!   cameras, [`OverlayProjector`] for overlay canvases.
//! - [`OverlapStrategy`]: [`AxisAligned`] (bounding rectangles, conservative
//!   under rotation) or [`SeparatingAxis`] (exact for convex polygons).
//! - [`OverlapEngine`]: owns the above plus the tracked ids and the pair sets
//!   of the last two frames, and drives the per-frame update.
//!
//! The engine never owns scene objects. It keeps copyable ids and resolves
//! them through your [`OverlapScene`] each frame; an id that stops resolving
//! is treated as destroyed, and its pairs exit exactly once.
//!
//! ## Example
//!
//! ```rust
//! use core::any::Any;
//!
//! use glam::{DAffine3, DVec2, DVec3};
//! use kurbo::Rect;
//! use understory_overlap::kinds::Sprite;
//! use understory_overlap::{
//!     Camera, CanvasMode, OverlapConfig, OverlapEngine, OverlapEvent, OverlapPair, OverlapScene,
//!     Projection, UiRect,
//! };
//!
//! struct Scene {
//!     sprites: Vec<Option<Sprite>>,
//!     panels: Vec<UiRect<()>>,
//!     camera: Camera,
//! }
//!
//! impl OverlapScene for Scene {
//!     type ObjectId = usize;
//!     type RectId = usize;
//!     type CameraId = ();
//!     type CanvasId = ();
//!
//!     fn spatial_object(&self, id: usize) -> Option<&dyn Any> {
//!         self.sprites.get(id)?.as_ref().map(|s| s as &dyn Any)
//!     }
//!
//!     fn ui_rect(&self, id: usize) -> Option<UiRect<()>> {
//!         self.panels.get(id).copied()
//!     }
//!
//!     fn camera(&self, _id: ()) -> Option<Camera> {
//!         Some(self.camera)
//!     }
//!
//!     fn canvas_mode(&self, _id: ()) -> Option<CanvasMode> {
//!         Some(CanvasMode::ScreenSpaceOverlay)
//!     }
//! }
//!
//! // An orthographic camera showing world (0, 0)..(800, 600) on an 800x600 screen.
//! let camera = Camera::look_at(
//!     DVec3::new(400.0, 300.0, 10.0),
//!     DVec3::new(400.0, 300.0, 0.0),
//!     DVec3::Y,
//!     Projection::Orthographic { half_height: 300.0, near: 0.1, far: 100.0 },
//!     Rect::new(0.0, 0.0, 800.0, 600.0),
//! );
//! let mut scene = Scene {
//!     sprites: vec![Some(Sprite::new(
//!         DAffine3::from_translation(DVec3::new(100.0, 100.0, 0.0)),
//!         DVec2::new(50.0, 50.0),
//!     ))],
//!     panels: vec![UiRect::from_bounds(80.0, 80.0, 200.0, 160.0, None)],
//!     camera,
//! };
//!
//! let mut engine: OverlapEngine<Scene> =
//!     OverlapEngine::new(OverlapConfig::default().with_camera(()).with_canvas(()));
//! assert!(engine.add_object(&scene, 0));
//! assert!(engine.add_rect(&scene, 0));
//!
//! let pair = OverlapPair::new(0, 0);
//! assert_eq!(engine.update_events(&scene), Ok(vec![OverlapEvent::Enter(pair)]));
//! assert_eq!(engine.update_events(&scene), Ok(vec![OverlapEvent::Stay(pair)]));
//!
//! // Destroying the sprite ends the overlap.
//! scene.sprites[0] = None;
//! assert_eq!(engine.update_events(&scene), Ok(vec![OverlapEvent::Exit(pair)]));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`, `glam` and `tracing`.
//! - `libm`: math backend for `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`) when built with `libm`
//! instead of `std`.
//!
//! Diagnostics go through [`tracing`]; install a subscriber to see them.

#![no_std]

extern crate alloc;

mod bounds;
mod engine;
pub mod kinds;
mod pair;
mod polygon;
mod projector;
pub mod providers;
mod scene;
mod strategy;

pub use bounds::{BoundsProvider, BoundsRegistry, FnBoundsProvider, WorldPolygon, bounds_fn};
pub use engine::{
    FnListener, FrameError, FrameReport, OverlapConfig, OverlapEngine, OverlapEvent,
    OverlapListener,
};
pub use pair::{OverlapPair, PairSet};
pub use polygon::{ScreenPolygon, bounding_rect, convex_hull_in_place};
pub use projector::{Camera, CameraProjector, OverlayProjector, Projection, ScreenProjector};
pub use scene::{CanvasMode, OverlapScene, UiRect};
pub use strategy::{AxisAligned, OverlapStrategy, SeparatingAxis, StrategyKind};
