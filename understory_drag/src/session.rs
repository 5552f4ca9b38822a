// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session: state of one drag gesture.

use core::cell::Cell;
use core::num::NonZeroU64;

use kurbo::Point;
use smallvec::SmallVec;

use crate::PointerId;
use crate::effect::{DropEffect, DropEffects};
use crate::payload::DragPayload;

/// Opaque identifier of a drag session, unique for the controller's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(NonZeroU64);

impl SessionId {
    pub(crate) const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// The raw identifier value.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

/// Lifecycle state of a gesture.
///
/// `Pending → Active → Ending`; there is no way back from `Ending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Pointer is down on a draggable view; the movement threshold was not crossed yet.
    Pending,
    /// Threshold crossed; hooks fire on every move.
    Active,
    /// Released or cancelled; terminal hooks are running.
    Ending,
}

/// Hover stack storage; most drags hover only a few nested targets.
pub(crate) type HoverStack<K> = SmallVec<[K; 4]>;

/// One drag gesture, from threshold crossing to release or cancellation.
///
/// Sessions are created and owned by [`DragController`](crate::DragController).
/// Hooks receive a shared reference; the only thing a hook can change is the
/// cancellation request ([`DragSession::request_cancel`]).
#[derive(Debug)]
pub struct DragSession<K> {
    pub(crate) id: SessionId,
    pub(crate) pointer: PointerId,
    pub(crate) source: K,
    pub(crate) payload: DragPayload,
    pub(crate) allowed_effects: DropEffects,
    pub(crate) current_effect: DropEffect,
    pub(crate) origin: Point,
    pub(crate) position: Point,
    pub(crate) hover_stack: HoverStack<K>,
    pub(crate) target: Option<K>,
    pub(crate) state: SessionState,
    pub(crate) cancel_requested: Cell<bool>,
}

impl<K: Copy + Eq> DragSession<K> {
    pub(crate) fn new(
        id: SessionId,
        pointer: PointerId,
        source: K,
        payload: DragPayload,
        allowed_effects: DropEffects,
        origin: Point,
        position: Point,
    ) -> Self {
        Self {
            id,
            pointer,
            source,
            payload,
            allowed_effects,
            current_effect: DropEffect::None,
            origin,
            position,
            hover_stack: SmallVec::new(),
            target: None,
            state: SessionState::Active,
            cancel_requested: Cell::new(false),
        }
    }

    /// The view that started the drag.
    pub fn source(&self) -> K {
        self.source
    }

    /// Whether `view` is currently in the hover stack.
    pub fn is_hovering(&self, view: K) -> bool {
        self.hover_stack.contains(&view)
    }

    /// The view receiving `drop_moved`/`drop_accepted`, if any.
    pub fn target(&self) -> Option<K> {
        self.target
    }
}

impl<K> DragSession<K> {
    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The pointer driving this gesture.
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// The dragged data.
    pub fn payload(&self) -> &DragPayload {
        &self.payload
    }

    /// Effects the source allows.
    pub fn allowed_effects(&self) -> DropEffects {
        self.allowed_effects
    }

    /// Effect negotiated with the current target, or [`DropEffect::None`].
    pub fn current_effect(&self) -> DropEffect {
        self.current_effect
    }

    /// Where the pointer went down.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Last known pointer position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Hovered droppable views, innermost (topmost) first.
    pub fn hover_stack(&self) -> &[K] {
        &self.hover_stack
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ask the controller to cancel this session once the current event step is done.
    ///
    /// Requests made while the session is [`SessionState::Ending`] are ignored.
    pub fn request_cancel(&self) {
        if self.state != SessionState::Ending {
            self.cancel_requested.set(true);
        }
    }

    /// Whether cancellation was requested.
    pub fn is_cancel_requested(&self) -> bool {
        self.cancel_requested.get()
    }
}
