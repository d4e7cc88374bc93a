// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-geometry providers and the priority-ordered registry that picks one.
//!
//! A [`BoundsProvider`] knows how to turn one kind of spatial object into a
//! world-space [`WorldPolygon`]. The [`BoundsRegistry`] holds any number of
//! them, ordered by descending [`BoundsProvider::priority`], and asks each in
//! turn until one succeeds. More specific providers declare higher priorities
//! so they win over generic ones without any inheritance between them.
//!
//! ## Adding a kind
//!
//! ```rust
//! use glam::DVec3;
//! use understory_overlap::{BoundsRegistry, WorldPolygon, bounds_fn};
//!
//! struct Marker {
//!     position: DVec3,
//!     radius: f64,
//! }
//!
//! let mut registry = BoundsRegistry::with_defaults();
//! registry.register(Box::new(bounds_fn::<Marker, _>(120, |m, out| {
//!     let r = m.radius;
//!     out.extend([
//!         m.position + DVec3::new(-r, -r, 0.0),
//!         m.position + DVec3::new(r, -r, 0.0),
//!         m.position + DVec3::new(r, r, 0.0),
//!         m.position + DVec3::new(-r, r, 0.0),
//!     ]);
//!     true
//! })));
//!
//! let marker = Marker { position: DVec3::ZERO, radius: 2.0 };
//! let mut poly = WorldPolygon::new();
//! assert!(registry.world_polygon(&marker, &mut poly));
//! assert_eq!(poly.len(), 4);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::cmp::Reverse;
use core::fmt;
use core::marker::PhantomData;

use glam::DVec3;
use smallvec::SmallVec;

use crate::providers::{
    Collider2DQuadProvider, ColliderBoundsProvider, LineQuadProvider, MeshBoundsProvider,
    RendererQuadProvider, SpriteQuadProvider,
};

/// World-space bounding polygon: 4 points for a quad, 8 for a box.
pub type WorldPolygon = SmallVec<[DVec3; 8]>;

/// Produces a world-space bounding polygon for the spatial object kinds it recognizes.
pub trait BoundsProvider {
    /// Ordering key. Higher priorities are consulted first.
    fn priority(&self) -> i32;

    /// Returns `true` if `object` is a kind this provider handles.
    ///
    /// This must be cheap; it is used both per frame and when objects are
    /// added to an engine.
    fn recognizes(&self, object: &dyn Any) -> bool;

    /// Writes the world-space polygon for `object` into `out`.
    ///
    /// `out` is empty on entry. Returns `false` if the object is not
    /// recognized or its geometry is unavailable (for example a sprite with no
    /// image); the contents of `out` are then unspecified.
    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool;

    /// A short name for diagnostics.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Priority-ordered set of [`BoundsProvider`]s.
///
/// The registry is an ordinary value: construct one with [`new`](Self::new)
/// for a custom provider set or [`with_defaults`](Self::with_defaults) for the
/// built-in kinds, and hand it to an [`OverlapEngine`](crate::OverlapEngine).
#[derive(Default)]
pub struct BoundsRegistry {
    providers: Vec<Box<dyn BoundsProvider>>,
}

impl fmt::Debug for BoundsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| (p.name(), p.priority())))
            .finish()
    }
}

impl BoundsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Creates a registry holding the providers for the kinds in [`crate::kinds`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SpriteQuadProvider));
        registry.register(Box::new(LineQuadProvider));
        registry.register(Box::new(MeshBoundsProvider));
        registry.register(Box::new(Collider2DQuadProvider));
        registry.register(Box::new(ColliderBoundsProvider));
        registry.register(Box::new(RendererQuadProvider));
        registry
    }

    /// Adds a provider, keeping the registry sorted by descending priority.
    ///
    /// Providers with equal priority keep their registration order.
    pub fn register(&mut self, provider: Box<dyn BoundsProvider>) {
        self.providers.push(provider);
        // Stable sort, so earlier registrations stay ahead on ties.
        self.providers.sort_by_key(|p| Reverse(p.priority()));
    }

    /// Like [`register`](Self::register), but does nothing for `None`.
    pub fn register_opt(&mut self, provider: Option<Box<dyn BoundsProvider>>) {
        if let Some(provider) = provider {
            self.register(provider);
        }
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` if no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names and priorities of the providers, in consultation order.
    pub fn providers(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.providers.iter().map(|p| (p.name(), p.priority()))
    }

    /// Returns `true` if any provider recognizes `object`'s kind.
    #[must_use]
    pub fn recognizes(&self, object: &dyn Any) -> bool {
        self.providers.iter().any(|p| p.recognizes(object))
    }

    /// Computes the world-space polygon for `object`.
    ///
    /// Providers that recognize the object are tried in priority order and the
    /// first success wins. Returns `false`, leaving `out` empty, if no provider
    /// recognizes the object or none of those that do could produce geometry.
    pub fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        for provider in &self.providers {
            if !provider.recognizes(object) {
                continue;
            }
            out.clear();
            if provider.world_polygon(object, out) {
                return true;
            }
        }
        out.clear();
        false
    }
}

/// A [`BoundsProvider`] for a single concrete type `T`, backed by a closure.
///
/// Usually created with [`bounds_fn`].
pub struct FnBoundsProvider<T, F> {
    priority: i32,
    build: F,
    _kind: PhantomData<fn(&T)>,
}

impl<T, F> fmt::Debug for FnBoundsProvider<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBoundsProvider")
            .field("kind", &core::any::type_name::<T>())
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Creates a provider that recognizes objects of type `T` and builds their
/// polygon with `build`.
///
/// `build` receives an empty polygon and returns `false` when the object's
/// geometry is unavailable.
pub fn bounds_fn<T, F>(priority: i32, build: F) -> FnBoundsProvider<T, F>
where
    T: Any,
    F: Fn(&T, &mut WorldPolygon) -> bool,
{
    FnBoundsProvider {
        priority,
        build,
        _kind: PhantomData,
    }
}

impl<T, F> BoundsProvider for FnBoundsProvider<T, F>
where
    T: Any,
    F: Fn(&T, &mut WorldPolygon) -> bool,
{
    fn priority(&self) -> i32 {
        self.priority
    }

    fn recognizes(&self, object: &dyn Any) -> bool {
        object.is::<T>()
    }

    fn world_polygon(&self, object: &dyn Any, out: &mut WorldPolygon) -> bool {
        match object.downcast_ref::<T>() {
            Some(object) => (self.build)(object, out),
            None => false,
        }
    }

    fn name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}
