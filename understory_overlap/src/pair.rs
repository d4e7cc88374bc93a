// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap pair identity and the per-frame pair sets.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

/// An overlapping (spatial object, UI rectangle) pair, identified by ids only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlapPair<O, R> {
    /// The spatial object.
    pub object: O,
    /// The UI rectangle.
    pub rect: R,
}

impl<O, R> OverlapPair<O, R> {
    /// Creates a pair.
    pub const fn new(object: O, rect: R) -> Self {
        Self { object, rect }
    }
}

/// A set of pairs that remembers insertion order.
///
/// Membership is hashed; iteration follows insertion order so transition
/// events come out in a deterministic order for a given sequence of frames.
#[derive(Clone, Debug)]
pub struct PairSet<O, R> {
    order: Vec<OverlapPair<O, R>>,
    members: HashSet<OverlapPair<O, R>>,
}

impl<O, R> Default for PairSet<O, R> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            members: HashSet::new(),
        }
    }
}

impl<O, R> PairSet<O, R>
where
    O: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair. Returns `false` if it was already present.
    pub fn insert(&mut self, pair: OverlapPair<O, R>) -> bool {
        if self.members.insert(pair) {
            self.order.push(pair);
            true
        } else {
            false
        }
    }

    /// Returns `true` if the pair is present.
    #[must_use]
    pub fn contains(&self, pair: &OverlapPair<O, R>) -> bool {
        self.members.contains(pair)
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every pair, keeping allocations.
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OverlapPair<O, R>> + '_ {
        self.order.iter()
    }

    /// Pairs of `self` that are not in `other`, in `self`'s order.
    pub fn difference<'a>(
        &'a self,
        other: &'a Self,
    ) -> impl Iterator<Item = &'a OverlapPair<O, R>> + 'a {
        self.order.iter().filter(move |p| !other.contains(p))
    }

    /// Pairs of `self` that are also in `other`, in `self`'s order.
    pub fn intersection<'a>(
        &'a self,
        other: &'a Self,
    ) -> impl Iterator<Item = &'a OverlapPair<O, R>> + 'a {
        self.order.iter().filter(move |p| other.contains(p))
    }
}

impl<O, R> PartialEq for PairSet<O, R>
where
    O: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
    /// Set equality; insertion order is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl<O, R> Eq for PairSet<O, R>
where
    O: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
}

impl<O, R> Extend<OverlapPair<O, R>> for PairSet<O, R>
where
    O: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
    fn extend<I: IntoIterator<Item = OverlapPair<O, R>>>(&mut self, iter: I) {
        for pair in iter {
            self.insert(pair);
        }
    }
}

impl<O, R> FromIterator<OverlapPair<O, R>> for PairSet<O, R>
where
    O: Copy + Eq + Hash,
    R: Copy + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = OverlapPair<O, R>>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
