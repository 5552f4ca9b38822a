// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat list of axis-aligned regions with z ordering.
//!
//! Good enough for toolkits that keep world-space bounds per view and do not
//! need clipping. Higher `z` is nearer; among equal `z`, the region added last
//! is nearer.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::host::GeometryProbe;

#[derive(Clone, Debug)]
struct Region<K> {
    key: K,
    bounds: Rect,
    z: i32,
}

/// A [`GeometryProbe`] over rectangles.
#[derive(Clone, Debug)]
pub struct RegionProbe<K> {
    regions: Vec<Region<K>>,
}

impl<K> Default for RegionProbe<K> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> RegionProbe<K> {
    /// Create an empty probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bounds and z of `key`, adding it if absent.
    ///
    /// Updating an existing region keeps its insertion order.
    pub fn set(&mut self, key: K, bounds: Rect, z: i32) {
        if let Some(region) = self.regions.iter_mut().find(|r| r.key == key) {
            region.bounds = bounds;
            region.z = z;
        } else {
            self.regions.push(Region { key, bounds, z });
        }
    }

    /// Remove the region of `key`. Returns whether it existed.
    pub fn remove(&mut self, key: K) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| r.key != key);
        self.regions.len() != before
    }

    /// Bounds of `key`, if present.
    pub fn bounds(&self, key: K) -> Option<Rect> {
        self.regions.iter().find(|r| r.key == key).map(|r| r.bounds)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<K: Copy + Eq> GeometryProbe<K> for RegionProbe<K> {
    fn hit_test(&self, point: Point, out: &mut Vec<K>) {
        // Newest first, so the stable sort keeps later insertions ahead on equal z.
        let mut hits: SmallVec<[&Region<K>; 8]> = self
            .regions
            .iter()
            .rev()
            .filter(|r| r.bounds.contains(point))
            .collect();
        hits.sort_by(|a, b| b.z.cmp(&a.z));
        out.extend(hits.iter().map(|r| r.key));
    }
}
