// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable and droppable capabilities.
//!
//! Any view may implement either or both traits. Views expose them to the
//! controller through [`ViewLookup`](crate::ViewLookup), typically by
//! delegating from a [`DragView`] implementation to a field that holds the
//! actual behavior.
//!
//! All hooks are side-effect hooks. Their `Ok` value carries nothing; an `Err`
//! is logged with the view identity and otherwise ignored.

use alloc::string::String;

use crate::effect::{DropEffect, DropEffects, negotiate};
use crate::error::HookResult;
use crate::payload::DragPayload;
use crate::session::DragSession;

/// A view that can start drags.
///
/// `is_draggable` may change between gestures. It is read once, on pointer down.
pub trait Draggable<K> {
    /// Whether a pointer down on this view may start a drag.
    fn is_draggable(&self) -> bool {
        true
    }

    /// Data to carry for the drag about to start.
    ///
    /// Called once, right before [`drag_started`](Self::drag_started). The
    /// payload is frozen afterwards.
    fn payload(&self) -> DragPayload;

    /// Effects this source allows.
    fn allowed_effects(&self) -> DropEffects;

    /// The movement threshold was crossed and the session is active.
    fn drag_started(&mut self, session: &DragSession<K>) -> HookResult {
        let _ = session;
        Ok(())
    }

    /// The pointer moved while dragging.
    fn drag_moved(&mut self, session: &DragSession<K>) -> HookResult {
        let _ = session;
        Ok(())
    }

    /// The session ended, by drop or by cancellation.
    ///
    /// [`DragSession::current_effect`] tells which effect, if any, was applied.
    fn drag_ended(&mut self, session: &DragSession<K>) -> HookResult {
        let _ = session;
        Ok(())
    }
}

/// A view that can receive drops.
pub trait Droppable<K> {
    /// Payload types this view accepts.
    fn accepted_types(&self) -> &[String];

    /// Effects this view accepts.
    fn accepted_effects(&self) -> DropEffects;

    /// Whether this view currently accepts at least one type of `payload`.
    ///
    /// Used to select the drop target among overlapping views.
    fn accepts_payload(&self, payload: &DragPayload) -> bool {
        payload.contains_any(self.accepted_types())
    }

    /// Whether a drop of `session` would be accepted.
    ///
    /// Must be pure. The default accepts when the payload carries an accepted
    /// type and the allowed and accepted effect sets overlap.
    fn can_drop(&self, session: &DragSession<K>) -> bool {
        self.accepts_payload(session.payload())
            && !(session.allowed_effects() & self.accepted_effects()).is_empty()
    }

    /// The pointer entered this view while dragging.
    fn drop_entered(&mut self, session: &DragSession<K>) -> HookResult {
        let _ = session;
        Ok(())
    }

    /// The pointer moved while this view is the drop target.
    fn drop_moved(&mut self, session: &DragSession<K>) -> HookResult {
        let _ = session;
        Ok(())
    }

    /// The pointer left this view, or the drag ended while over it.
    fn drop_left(&mut self, session: &DragSession<K>) -> HookResult {
        let _ = session;
        Ok(())
    }

    /// Apply the drop.
    ///
    /// Only called right after [`can_drop`](Self::can_drop) returned `true` for
    /// the same session state. [`DragSession::current_effect`] holds the
    /// negotiated effect.
    fn drop_accepted(&mut self, session: &DragSession<K>) -> HookResult;
}

/// Negotiate the effect between a session's source and `target`.
pub fn negotiate_with<K, D>(session: &DragSession<K>, target: &D, priority: &[DropEffect]) -> DropEffect
where
    D: Droppable<K> + ?Sized,
{
    negotiate(session.allowed_effects(), target.accepted_effects(), priority)
}

/// Capability access for a view stored in a container.
///
/// Implement this on your view type and return the behaviors it composes.
/// [`ViewArena`](crate::adapters::arena::ViewArena) uses it to implement
/// [`ViewLookup`](crate::ViewLookup).
pub trait DragView<K> {
    /// The draggable behavior of this view, if it has one.
    fn as_draggable(&mut self) -> Option<&mut dyn Draggable<K>> {
        None
    }

    /// The droppable behavior of this view, if it has one.
    fn as_droppable(&mut self) -> Option<&mut dyn Droppable<K>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DEFAULT_EFFECT_PRIORITY;
    use crate::session::SessionId;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::num::NonZeroU64;
    use kurbo::Point;

    struct Target {
        types: Vec<String>,
        effects: DropEffects,
    }

    impl Droppable<u32> for Target {
        fn accepted_types(&self) -> &[String] {
            &self.types
        }
        fn accepted_effects(&self) -> DropEffects {
            self.effects
        }
        fn drop_accepted(&mut self, _session: &DragSession<u32>) -> HookResult {
            Ok(())
        }
    }

    fn session(allowed: DropEffects) -> DragSession<u32> {
        DragSession::new(
            SessionId::new(NonZeroU64::new(1).unwrap()),
            NonZeroU64::new(1).unwrap(),
            1,
            DragPayload::new().with_text("text/plain", "item"),
            allowed,
            Point::ZERO,
            Point::ZERO,
        )
    }

    #[test]
    fn copy_move_source_onto_move_link_target() {
        let target = Target {
            types: vec![String::from("text/plain")],
            effects: DropEffects::MOVE | DropEffects::LINK,
        };
        let s = session(DropEffects::COPY | DropEffects::MOVE);
        assert!(target.can_drop(&s));
        assert_eq!(
            negotiate_with(&s, &target, &DEFAULT_EFFECT_PRIORITY),
            DropEffect::Move
        );
    }

    #[test]
    fn link_source_onto_copy_move_target_is_refused() {
        let target = Target {
            types: vec![String::from("text/plain")],
            effects: DropEffects::COPY | DropEffects::MOVE,
        };
        let s = session(DropEffects::LINK);
        assert!(!target.can_drop(&s));
        assert_eq!(
            negotiate_with(&s, &target, &DEFAULT_EFFECT_PRIORITY),
            DropEffect::None
        );
    }

    #[test]
    fn can_drop_requires_a_shared_type() {
        let target = Target {
            types: vec![String::from("image/png")],
            effects: DropEffects::all(),
        };
        let s = session(DropEffects::all());
        assert!(!target.accepts_payload(s.payload()));
        assert!(!target.can_drop(&s));
    }

    #[test]
    fn can_drop_is_repeatable() {
        let target = Target {
            types: vec![String::from("text/plain")],
            effects: DropEffects::COPY,
        };
        let s = session(DropEffects::COPY);
        let first = target.can_drop(&s);
        for _ in 0..3 {
            assert_eq!(target.can_drop(&s), first);
        }
        assert_eq!(s.current_effect(), DropEffect::None);
    }
}
