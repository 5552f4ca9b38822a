// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made [`DragHost`](crate::DragHost): views plus their regions.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use super::arena::{ViewArena, ViewKey};
use super::region::RegionProbe;
use crate::capability::{DragView, Draggable, Droppable};
use crate::host::{GeometryProbe, ViewLookup};

/// Views stored in a [`ViewArena`], hit tested through a [`RegionProbe`].
///
/// Useful for tests, demos and small toolkits without a view tree of their own.
#[derive(Debug)]
pub struct Scene<V> {
    views: ViewArena<V>,
    regions: RegionProbe<ViewKey>,
}

impl<V> Default for Scene<V> {
    fn default() -> Self {
        Self {
            views: ViewArena::new(),
            regions: RegionProbe::default(),
        }
    }
}

impl<V> Scene<V> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view covering `bounds` at depth `z` (higher is nearer).
    pub fn insert(&mut self, view: V, bounds: Rect, z: i32) -> ViewKey {
        let key = self.views.insert(view);
        self.regions.set(key, bounds, z);
        key
    }

    /// Remove a view and its region.
    ///
    /// Call [`DragController::view_detached`](crate::DragController::view_detached)
    /// first if a drag may be in flight.
    pub fn remove(&mut self, key: ViewKey) -> Option<V> {
        self.regions.remove(key);
        self.views.remove(key)
    }

    /// Move or restack a live view. Returns `false` for a stale key.
    pub fn set_bounds(&mut self, key: ViewKey, bounds: Rect, z: i32) -> bool {
        if !self.views.contains(key) {
            return false;
        }
        self.regions.set(key, bounds, z);
        true
    }

    /// Bounds of a live view.
    pub fn bounds(&self, key: ViewKey) -> Option<Rect> {
        if !self.views.contains(key) {
            return None;
        }
        self.regions.bounds(key)
    }

    /// Borrow a view.
    pub fn get(&self, key: ViewKey) -> Option<&V> {
        self.views.get(key)
    }

    /// Mutably borrow a view.
    pub fn get_mut(&mut self, key: ViewKey) -> Option<&mut V> {
        self.views.get_mut(key)
    }

    /// The underlying view storage.
    pub fn views(&self) -> &ViewArena<V> {
        &self.views
    }
}

impl<V> GeometryProbe<ViewKey> for Scene<V> {
    fn hit_test(&self, point: Point, out: &mut Vec<ViewKey>) {
        self.regions.hit_test(point, out);
        out.retain(|key| self.views.contains(*key));
    }
}

impl<V: DragView<ViewKey>> ViewLookup<ViewKey> for Scene<V> {
    fn is_attached(&self, view: &ViewKey) -> bool {
        self.views.is_attached(view)
    }

    fn draggable(&mut self, view: &ViewKey) -> Option<&mut dyn Draggable<ViewKey>> {
        self.views.draggable(view)
    }

    fn droppable(&mut self, view: &ViewKey) -> Option<&mut dyn Droppable<ViewKey>> {
        self.views.droppable(view)
    }
}
