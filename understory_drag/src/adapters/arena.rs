// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational view storage.
//!
//! [`ViewArena`] hands out [`ViewKey`] handles. Removing a view bumps its slot
//! generation, so an old handle never resolves to a view inserted later in the
//! same slot. This is what makes stale handles in a drag session detectable.

use alloc::vec::Vec;
use core::fmt;

use crate::capability::{DragView, Draggable, Droppable};
use crate::host::ViewLookup;

/// Handle to a view in a [`ViewArena`] (generational).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewKey(u32, u32);

impl ViewKey {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Slot storage for views, addressed by [`ViewKey`].
pub struct ViewArena<V> {
    views: Vec<Option<V>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl<V> fmt::Debug for ViewArena<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewArena")
            .field("len", &self.len())
            .field("slots", &self.views.len())
            .field("free_list", &self.free_list.len())
            .finish()
    }
}

impl<V> Default for ViewArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ViewArena<V> {
    /// Create an empty arena.
    pub const fn new() -> Self {
        Self {
            views: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a view and return its handle.
    pub fn insert(&mut self, view: V) -> ViewKey {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.views[idx] = Some(view);
            (idx, generation)
        } else {
            self.views.push(Some(view));
            self.generations.push(1);
            (self.views.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ViewKey uses 32-bit indices."
        )]
        let idx = idx as u32;
        ViewKey::new(idx, generation)
    }

    /// Remove a view. Returns `None` if `key` is stale.
    pub fn remove(&mut self, key: ViewKey) -> Option<V> {
        if !self.contains(key) {
            return None;
        }
        let view = self.views[key.idx()].take();
        self.free_list.push(key.idx());
        view
    }

    /// Whether `key` refers to a live view.
    pub fn contains(&self, key: ViewKey) -> bool {
        self.views.get(key.idx()).is_some_and(Option::is_some)
            && self.generations.get(key.idx()) == Some(&key.1)
    }

    /// Borrow a live view.
    pub fn get(&self, key: ViewKey) -> Option<&V> {
        if !self.contains(key) {
            return None;
        }
        self.views[key.idx()].as_ref()
    }

    /// Mutably borrow a live view.
    pub fn get_mut(&mut self, key: ViewKey) -> Option<&mut V> {
        if !self.contains(key) {
            return None;
        }
        self.views[key.idx()].as_mut()
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.views.len() - self.free_list.len()
    }

    /// Whether the arena holds no live views.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate live views with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewKey, &V)> + '_ {
        self.views.iter().enumerate().filter_map(|(idx, view)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ViewKey uses 32-bit indices."
            )]
            let slot = idx as u32;
            view.as_ref()
                .map(|v| (ViewKey::new(slot, self.generations[idx]), v))
        })
    }
}

impl<V: DragView<ViewKey>> ViewLookup<ViewKey> for ViewArena<V> {
    fn is_attached(&self, view: &ViewKey) -> bool {
        self.contains(*view)
    }

    fn draggable(&mut self, view: &ViewKey) -> Option<&mut dyn Draggable<ViewKey>> {
        self.get_mut(*view)?.as_draggable()
    }

    fn droppable(&mut self, view: &ViewKey) -> Option<&mut dyn Droppable<ViewKey>> {
        self.get_mut(*view)?.as_droppable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DropEffects;
    use crate::error::HookResult;
    use crate::payload::DragPayload;
    use crate::session::DragSession;
    use alloc::string::String;

    #[test]
    fn removed_key_goes_stale_and_slot_is_reused() {
        let mut arena = ViewArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.remove(a), Some("a"));
        assert!(!arena.contains(a));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);

        let c = arena.insert("c");
        assert_eq!(c.0, a.0, "freed slot is reused");
        assert!(c.1 > a.1, "generation must increase on reuse");
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(c), Some(&"c"));
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn iter_skips_free_slots() {
        let mut arena = ViewArena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        let c = arena.insert(3);
        arena.remove(b);
        let live: Vec<_> = arena.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(live, [(a, 1), (c, 3)]);
    }

    struct Handle;

    impl Draggable<ViewKey> for Handle {
        fn payload(&self) -> DragPayload {
            DragPayload::new()
        }
        fn allowed_effects(&self) -> DropEffects {
            DropEffects::MOVE
        }
    }

    struct Slot(Vec<String>);

    impl Droppable<ViewKey> for Slot {
        fn accepted_types(&self) -> &[String] {
            &self.0
        }
        fn accepted_effects(&self) -> DropEffects {
            DropEffects::MOVE
        }
        fn drop_accepted(&mut self, _session: &DragSession<ViewKey>) -> HookResult {
            Ok(())
        }
    }

    enum Widget {
        Handle(Handle),
        Slot(Slot),
        Label,
    }

    impl DragView<ViewKey> for Widget {
        fn as_draggable(&mut self) -> Option<&mut dyn Draggable<ViewKey>> {
            match self {
                Self::Handle(h) => Some(h),
                _ => None,
            }
        }
        fn as_droppable(&mut self) -> Option<&mut dyn Droppable<ViewKey>> {
            match self {
                Self::Slot(s) => Some(s),
                _ => None,
            }
        }
    }

    #[test]
    fn lookup_resolves_capabilities_of_live_views() {
        let mut arena = ViewArena::new();
        let handle = arena.insert(Widget::Handle(Handle));
        let slot = arena.insert(Widget::Slot(Slot(Vec::new())));
        let label = arena.insert(Widget::Label);

        assert!(arena.draggable(&handle).is_some());
        assert!(arena.droppable(&handle).is_none());
        assert!(arena.droppable(&slot).is_some());
        assert!(arena.draggable(&label).is_none());
        assert!(arena.droppable(&label).is_none());

        arena.remove(slot);
        assert!(!arena.is_attached(&slot));
        assert!(arena.droppable(&slot).is_none());
    }
}
