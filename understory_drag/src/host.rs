// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces the controller consumes from the surrounding view tree.
//!
//! The controller never owns views. It keeps small `Copy` handles and asks the
//! host, on every use, whether a handle still refers to an attached view and
//! which capabilities that view exposes.

use alloc::vec::Vec;

use kurbo::Point;

use crate::capability::{Draggable, Droppable};

/// Point queries against the view tree.
pub trait GeometryProbe<K> {
    /// Append the views whose region contains `point` to `out`, topmost first.
    ///
    /// `out` is empty on entry.
    fn hit_test(&self, point: Point, out: &mut Vec<K>);
}

/// Capability resolution and liveness checks for view handles.
pub trait ViewLookup<K> {
    /// Whether `view` is still attached to the tree.
    fn is_attached(&self, view: &K) -> bool;

    /// The draggable behavior of `view`, if it has one.
    fn draggable(&mut self, view: &K) -> Option<&mut dyn Draggable<K>>;

    /// The droppable behavior of `view`, if it has one.
    fn droppable(&mut self, view: &K) -> Option<&mut dyn Droppable<K>>;
}

/// Everything the controller needs while a drag is in flight.
///
/// Blanket-implemented for any type implementing both halves.
pub trait DragHost<K>: GeometryProbe<K> + ViewLookup<K> {}

impl<K, T: GeometryProbe<K> + ViewLookup<K> + ?Sized> DragHost<K> for T {}
