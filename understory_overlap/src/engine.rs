// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame overlap engine and its enter/stay/exit state machine.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace, warn};

use crate::bounds::{BoundsProvider, BoundsRegistry, WorldPolygon};
use crate::pair::{OverlapPair, PairSet};
use crate::polygon::{ScreenPolygon, convex_hull_in_place};
use crate::projector::{CameraProjector, OverlayProjector, ScreenProjector};
use crate::scene::OverlapScene;
use crate::strategy::{OverlapStrategy, StrategyKind};

/// Runtime configuration of an [`OverlapEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapConfig<Cam, Can> {
    /// Use the rotation-aware [`SeparatingAxis`](crate::SeparatingAxis) test
    /// instead of [`AxisAligned`](crate::AxisAligned).
    pub rotation_aware: bool,
    /// Camera used for projection. Falls back to
    /// [`OverlapScene::main_camera`] when `None` or unresolvable.
    pub camera: Option<Cam>,
    /// Canvas used for rectangles that do not name their own.
    pub canvas: Option<Can>,
}

impl<Cam, Can> Default for OverlapConfig<Cam, Can> {
    fn default() -> Self {
        Self {
            rotation_aware: false,
            camera: None,
            canvas: None,
        }
    }
}

impl<Cam, Can> OverlapConfig<Cam, Can> {
    /// Sets [`rotation_aware`](Self::rotation_aware).
    #[must_use]
    pub fn with_rotation_aware(mut self, rotation_aware: bool) -> Self {
        self.rotation_aware = rotation_aware;
        self
    }

    /// Sets [`camera`](Self::camera).
    #[must_use]
    pub fn with_camera(mut self, camera: Cam) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Sets [`canvas`](Self::canvas).
    #[must_use]
    pub fn with_canvas(mut self, canvas: Can) -> Self {
        self.canvas = Some(canvas);
        self
    }
}

/// A transition of one (object, rectangle) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlapEvent<O, R> {
    /// The pair started overlapping this frame.
    Enter(OverlapPair<O, R>),
    /// The pair overlapped last frame and still does.
    Stay(OverlapPair<O, R>),
    /// The pair overlapped last frame and no longer does.
    Exit(OverlapPair<O, R>),
}

impl<O: Copy, R: Copy> OverlapEvent<O, R> {
    /// The pair this event is about.
    #[must_use]
    pub fn pair(&self) -> OverlapPair<O, R> {
        match *self {
            Self::Enter(p) | Self::Stay(p) | Self::Exit(p) => p,
        }
    }
}

/// Receives transition callbacks during [`OverlapEngine::update`].
///
/// All methods default to doing nothing, so listeners only implement the
/// transitions they care about.
pub trait OverlapListener<O, R> {
    /// `object` and `rect` started overlapping.
    fn on_enter(&mut self, object: O, rect: R) {
        let _ = (object, rect);
    }

    /// `object` and `rect` are still overlapping.
    fn on_stay(&mut self, object: O, rect: R) {
        let _ = (object, rect);
    }

    /// `object` and `rect` stopped overlapping, or one of them went away.
    fn on_exit(&mut self, object: O, rect: R) {
        let _ = (object, rect);
    }
}

impl<O, R> OverlapListener<O, R> for () {}

impl<O, R> OverlapListener<O, R> for Vec<OverlapEvent<O, R>> {
    fn on_enter(&mut self, object: O, rect: R) {
        self.push(OverlapEvent::Enter(OverlapPair::new(object, rect)));
    }

    fn on_stay(&mut self, object: O, rect: R) {
        self.push(OverlapEvent::Stay(OverlapPair::new(object, rect)));
    }

    fn on_exit(&mut self, object: O, rect: R) {
        self.push(OverlapEvent::Exit(OverlapPair::new(object, rect)));
    }
}

/// Adapts a closure taking [`OverlapEvent`]s into an [`OverlapListener`].
pub struct FnListener<F>(pub F);

impl<F> fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

impl<O, R, F> OverlapListener<O, R> for FnListener<F>
where
    F: FnMut(OverlapEvent<O, R>),
{
    fn on_enter(&mut self, object: O, rect: R) {
        (self.0)(OverlapEvent::Enter(OverlapPair::new(object, rect)));
    }

    fn on_stay(&mut self, object: O, rect: R) {
        (self.0)(OverlapEvent::Stay(OverlapPair::new(object, rect)));
    }

    fn on_exit(&mut self, object: O, rect: R) {
        (self.0)(OverlapEvent::Exit(OverlapPair::new(object, rect)));
    }
}

/// Counters describing one successful frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Enter events fired.
    pub entered: usize,
    /// Stay events fired.
    pub stayed: usize,
    /// Exit events fired.
    pub exited: usize,
    /// Spatial objects dropped because they no longer resolve.
    pub pruned_objects: usize,
    /// UI rectangles dropped because they no longer resolve.
    pub pruned_rects: usize,
    /// Spatial objects with no geometry this frame.
    pub skipped_objects: usize,
    /// UI rectangles with no resolvable canvas this frame.
    pub skipped_rects: usize,
    /// Strategy evaluations performed.
    pub tested_pairs: usize,
}

/// Reasons a whole frame could not be evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Neither the configured camera nor the scene's main camera is available.
    NoCamera,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCamera => f.write_str("no camera available to project the frame"),
        }
    }
}

impl core::error::Error for FrameError {}

/// Tracks overlaps between spatial objects and UI rectangles across frames.
///
/// ## Frame algorithm
///
/// Each call to [`OverlapEngine::update`]:
///
/// 1. Resolves the camera (configured camera, else the scene's main camera).
///    Without one the frame is abandoned with [`FrameError::NoCamera`] and no
///    state changes.
/// 2. Drops ids that no longer resolve in the scene.
/// 3. Projects every spatial object: provider registry → world polygon →
///    camera → screen polygon. Objects without geometry are skipped.
/// 4. Projects every UI rectangle: overlay canvases use corner x/y directly,
///    other canvases go through the camera. Rectangles without a resolvable
///    canvas are skipped.
/// 5. Tests every (object, rectangle) combination with the active strategy.
/// 6. Reports `current − previous` as enters, `current ∩ previous` as stays and
///    `previous − current` as exits.
/// 7. Keeps the current pairs as the previous pairs for the next frame.
///
/// Per pair, this is a two-state machine driven only by membership in two
/// consecutive frames:
///
/// | previous | current | event |
/// |---|---|---|
/// | absent | overlapping | enter |
/// | overlapping | overlapping | stay |
/// | overlapping | absent | exit |
/// | absent | absent | none |
pub struct OverlapEngine<S: OverlapScene> {
    registry: BoundsRegistry,
    strategy: Box<dyn OverlapStrategy>,
    config: OverlapConfig<S::CameraId, S::CanvasId>,
    objects: Vec<S::ObjectId>,
    rects: Vec<S::RectId>,
    previous: PairSet<S::ObjectId, S::RectId>,
    current: PairSet<S::ObjectId, S::RectId>,
    world_scratch: WorldPolygon,
    object_polygons: Vec<(S::ObjectId, ScreenPolygon)>,
    rect_polygons: Vec<(S::RectId, ScreenPolygon)>,
}

impl<S: OverlapScene> fmt::Debug for OverlapEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlapEngine")
            .field("registry", &self.registry)
            .field("strategy", &self.strategy)
            .field("config", &self.config)
            .field("objects", &self.objects)
            .field("rects", &self.rects)
            .field("overlapping", &self.previous.len())
            .finish_non_exhaustive()
    }
}

impl<S: OverlapScene> Default for OverlapEngine<S> {
    fn default() -> Self {
        Self::new(OverlapConfig::default())
    }
}

impl<S: OverlapScene> OverlapEngine<S> {
    /// Creates an engine with the default bounds providers.
    #[must_use]
    pub fn new(config: OverlapConfig<S::CameraId, S::CanvasId>) -> Self {
        Self::with_registry(BoundsRegistry::with_defaults(), config)
    }

    /// Creates an engine with a caller-assembled provider registry.
    #[must_use]
    pub fn with_registry(
        registry: BoundsRegistry,
        config: OverlapConfig<S::CameraId, S::CanvasId>,
    ) -> Self {
        Self {
            registry,
            strategy: StrategyKind::from_rotation_aware(config.rotation_aware).into_strategy(),
            config,
            objects: Vec::new(),
            rects: Vec::new(),
            previous: PairSet::new(),
            current: PairSet::new(),
            world_scratch: WorldPolygon::new(),
            object_polygons: Vec::new(),
            rect_polygons: Vec::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &OverlapConfig<S::CameraId, S::CanvasId> {
        &self.config
    }

    /// Switches between the axis-aligned and the rotation-aware strategy.
    pub fn set_rotation_aware(&mut self, rotation_aware: bool) {
        self.config.rotation_aware = rotation_aware;
        self.strategy = StrategyKind::from_rotation_aware(rotation_aware).into_strategy();
    }

    /// Installs a custom overlap strategy.
    ///
    /// It stays active until the next call to this method or to
    /// [`set_rotation_aware`](Self::set_rotation_aware).
    pub fn set_strategy(&mut self, strategy: Box<dyn OverlapStrategy>) {
        self.strategy = strategy;
    }

    /// The active overlap strategy.
    pub fn strategy(&self) -> &dyn OverlapStrategy {
        &*self.strategy
    }

    /// Sets the camera used for projection.
    pub fn set_camera(&mut self, camera: Option<S::CameraId>) {
        self.config.camera = camera;
    }

    /// Sets the fallback canvas for rectangles that do not name one.
    pub fn set_canvas(&mut self, canvas: Option<S::CanvasId>) {
        self.config.canvas = canvas;
    }

    /// The bounds provider registry.
    pub fn registry(&self) -> &BoundsRegistry {
        &self.registry
    }

    /// Mutable access to the bounds provider registry.
    pub fn registry_mut(&mut self) -> &mut BoundsRegistry {
        &mut self.registry
    }

    /// Registers an additional bounds provider.
    pub fn register_provider(&mut self, provider: Box<dyn BoundsProvider>) {
        self.registry.register(provider);
    }

    /// Tracked spatial objects, in insertion order.
    pub fn objects(&self) -> &[S::ObjectId] {
        &self.objects
    }

    /// Tracked UI rectangles, in insertion order.
    pub fn rects(&self) -> &[S::RectId] {
        &self.rects
    }

    /// Starts tracking a spatial object.
    ///
    /// Returns `false`, without tracking it, if it is already tracked, does not
    /// resolve in `scene`, or is of a kind no registered provider recognizes.
    pub fn add_object(&mut self, scene: &S, id: S::ObjectId) -> bool {
        if self.objects.contains(&id) {
            return false;
        }
        let Some(object) = scene.spatial_object(id) else {
            return false;
        };
        if !self.registry.recognizes(object) {
            debug!(?id, "no bounds provider recognizes this object's kind; not tracking it");
            return false;
        }
        self.objects.push(id);
        true
    }

    /// Stops tracking a spatial object. Returns `false` if it was not tracked.
    ///
    /// Pairs involving the object exit on the next update.
    pub fn remove_object(&mut self, id: S::ObjectId) -> bool {
        match self.objects.iter().position(|o| *o == id) {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Starts tracking a UI rectangle.
    ///
    /// Returns `false`, without tracking it, if it is already tracked or does
    /// not resolve in `scene`.
    pub fn add_rect(&mut self, scene: &S, id: S::RectId) -> bool {
        if self.rects.contains(&id) || scene.ui_rect(id).is_none() {
            return false;
        }
        self.rects.push(id);
        true
    }

    /// Stops tracking a UI rectangle. Returns `false` if it was not tracked.
    ///
    /// Pairs involving the rectangle exit on the next update.
    pub fn remove_rect(&mut self, id: S::RectId) -> bool {
        match self.rects.iter().position(|r| *r == id) {
            Some(index) => {
                self.rects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the pair overlapped in the last successful frame.
    pub fn is_overlapping(&self, object: S::ObjectId, rect: S::RectId) -> bool {
        self.previous.contains(&OverlapPair::new(object, rect))
    }

    /// Pairs that overlapped in the last successful frame.
    pub fn overlapping(&self) -> impl Iterator<Item = &OverlapPair<S::ObjectId, S::RectId>> + '_ {
        self.previous.iter()
    }

    /// Evaluates one frame, calling `listener` for every transition.
    ///
    /// Objects or rectangles that cannot be projected are left out of this
    /// frame, which only ever makes their pairs exit. The only error is a
    /// missing camera; in that case no callbacks fire and the overlap state
    /// from the previous frame is kept.
    pub fn update<L>(&mut self, scene: &S, listener: &mut L) -> Result<FrameReport, FrameError>
    where
        L: OverlapListener<S::ObjectId, S::RectId> + ?Sized,
    {
        let camera = self
            .config
            .camera
            .and_then(|id| scene.camera(id))
            .or_else(|| scene.main_camera());
        let Some(camera) = camera else {
            warn!(configured = ?self.config.camera, "no camera available; skipping overlap frame");
            return Err(FrameError::NoCamera);
        };
        let projector = CameraProjector::new(&camera);
        let mut report = FrameReport::default();

        let before = self.objects.len();
        self.objects.retain(|id| scene.spatial_object(*id).is_some());
        report.pruned_objects = before - self.objects.len();
        let before = self.rects.len();
        self.rects.retain(|id| scene.ui_rect(*id).is_some());
        report.pruned_rects = before - self.rects.len();

        self.object_polygons.clear();
        for &id in &self.objects {
            let Some(object) = scene.spatial_object(id) else {
                continue;
            };
            if !self.registry.world_polygon(object, &mut self.world_scratch) {
                trace!(?id, "no geometry for spatial object this frame");
                report.skipped_objects += 1;
                continue;
            }
            let mut polygon = ScreenPolygon::new();
            projector.project_into(&self.world_scratch, &mut polygon);
            if polygon.len() > 4 {
                // Projected boxes: test against their outline only.
                convex_hull_in_place(&mut polygon);
            }
            self.object_polygons.push((id, polygon));
        }

        self.rect_polygons.clear();
        for &id in &self.rects {
            let Some(rect) = scene.ui_rect(id) else {
                continue;
            };
            let mode = rect
                .canvas
                .or(self.config.canvas)
                .and_then(|canvas| scene.canvas_mode(canvas));
            let Some(mode) = mode else {
                trace!(?id, "no canvas for UI rect this frame");
                report.skipped_rects += 1;
                continue;
            };
            let mut polygon = ScreenPolygon::new();
            if mode.uses_camera() {
                projector.project_into(&rect.corners, &mut polygon);
            } else {
                OverlayProjector.project_into(&rect.corners, &mut polygon);
            }
            self.rect_polygons.push((id, polygon));
        }

        self.current.clear();
        for (object, a) in &self.object_polygons {
            for (rect, b) in &self.rect_polygons {
                report.tested_pairs += 1;
                if self.strategy.overlaps(a, b) {
                    self.current.insert(OverlapPair::new(*object, *rect));
                }
            }
        }

        for pair in self.current.difference(&self.previous) {
            listener.on_enter(pair.object, pair.rect);
            report.entered += 1;
        }
        for pair in self.current.intersection(&self.previous) {
            listener.on_stay(pair.object, pair.rect);
            report.stayed += 1;
        }
        for pair in self.previous.difference(&self.current) {
            listener.on_exit(pair.object, pair.rect);
            report.exited += 1;
        }

        core::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();

        trace!(
            entered = report.entered,
            stayed = report.stayed,
            exited = report.exited,
            tested = report.tested_pairs,
            "overlap frame done"
        );
        Ok(report)
    }

    /// Like [`update`](Self::update), collecting the transitions into a vector.
    ///
    /// Enters come first, then stays, then exits.
    pub fn update_events(
        &mut self,
        scene: &S,
    ) -> Result<Vec<OverlapEvent<S::ObjectId, S::RectId>>, FrameError> {
        let mut events = Vec::new();
        self.update(scene, &mut events)?;
        Ok(events)
    }

    /// Forgets all overlap state, reporting an exit for every pair that
    /// overlapped in the last frame.
    ///
    /// Tracked objects and rectangles are kept. Returns the number of exits.
    pub fn reset<L>(&mut self, listener: &mut L) -> usize
    where
        L: OverlapListener<S::ObjectId, S::RectId> + ?Sized,
    {
        let exited = self.previous.len();
        for pair in self.previous.iter() {
            listener.on_exit(pair.object, pair.rect);
        }
        self.previous.clear();
        exited
    }
}
