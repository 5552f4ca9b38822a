// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop effects and effect negotiation.
//!
//! A drag source declares the set of effects it allows ([`DropEffects`]); a drop
//! target declares the set it accepts. The negotiated effect is a single
//! [`DropEffect`] taken from the intersection of both sets, picked by walking a
//! fixed priority order (by default move, then copy, then link).
//!
//! ```
//! use understory_drag::{DropEffect, DropEffects, negotiate, DEFAULT_EFFECT_PRIORITY};
//!
//! let allowed = DropEffects::COPY | DropEffects::MOVE;
//! let accepted = DropEffects::MOVE | DropEffects::LINK;
//! assert_eq!(negotiate(allowed, accepted, &DEFAULT_EFFECT_PRIORITY), DropEffect::Move);
//!
//! // No overlap: nothing can happen.
//! assert_eq!(
//!     negotiate(DropEffects::LINK, DropEffects::COPY | DropEffects::MOVE, &DEFAULT_EFFECT_PRIORITY),
//!     DropEffect::None,
//! );
//! ```

use core::fmt;

bitflags::bitflags! {
    /// Set of drop effects a source allows or a target accepts.
    ///
    /// The empty set stands for "none".
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DropEffects: u8 {
        /// The dragged data is copied to the drop location.
        const COPY = 0b001;
        /// The dragged data is moved to the drop location.
        const MOVE = 0b010;
        /// A link or reference to the source is created at the drop location.
        const LINK = 0b100;
    }
}

impl Default for DropEffects {
    fn default() -> Self {
        Self::empty()
    }
}

impl DropEffects {
    /// Count of effects in the set.
    pub fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Whether `effect` is a member of this set.
    ///
    /// [`DropEffect::None`] is never a member.
    pub fn allows(self, effect: DropEffect) -> bool {
        effect.as_flag().is_some_and(|f| self.contains(f))
    }
}

/// A single negotiated drop effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropEffect {
    /// Nothing happens on drop.
    #[default]
    None,
    /// Copy the data.
    Copy,
    /// Move the data.
    Move,
    /// Link to the data.
    Link,
}

impl DropEffect {
    /// The flag for this effect, or `None` for [`DropEffect::None`].
    pub const fn as_flag(self) -> Option<DropEffects> {
        match self {
            Self::None => None,
            Self::Copy => Some(DropEffects::COPY),
            Self::Move => Some(DropEffects::MOVE),
            Self::Link => Some(DropEffects::LINK),
        }
    }

    /// Whether this is [`DropEffect::None`].
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for DropEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Link => "link",
        })
    }
}

/// Default negotiation order: move > copy > link.
pub const DEFAULT_EFFECT_PRIORITY: [DropEffect; 3] =
    [DropEffect::Move, DropEffect::Copy, DropEffect::Link];

/// Pick the first effect in `priority` that both sides agree on.
///
/// Entries of `priority` equal to [`DropEffect::None`] are skipped. Effects
/// missing from `priority` rank after the listed ones, in
/// [`DEFAULT_EFFECT_PRIORITY`] order. The result is [`DropEffect::None`] only
/// when `allowed` and `accepted` are disjoint.
pub fn negotiate(allowed: DropEffects, accepted: DropEffects, priority: &[DropEffect]) -> DropEffect {
    let common = allowed & accepted;
    priority
        .iter()
        .chain(&DEFAULT_EFFECT_PRIORITY)
        .copied()
        .find(|e| common.allows(*e))
        .unwrap_or(DropEffect::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sole_intersection_wins() {
        let allowed = DropEffects::COPY | DropEffects::MOVE;
        let accepted = DropEffects::MOVE | DropEffects::LINK;
        assert_eq!(
            negotiate(allowed, accepted, &DEFAULT_EFFECT_PRIORITY),
            DropEffect::Move
        );
    }

    #[test]
    fn disjoint_sets_negotiate_none() {
        let allowed = DropEffects::LINK;
        let accepted = DropEffects::COPY | DropEffects::MOVE;
        assert_eq!(
            negotiate(allowed, accepted, &DEFAULT_EFFECT_PRIORITY),
            DropEffect::None
        );
    }

    #[test]
    fn default_priority_prefers_move_then_copy_then_link() {
        let all = DropEffects::all();
        assert_eq!(negotiate(all, all, &DEFAULT_EFFECT_PRIORITY), DropEffect::Move);
        let no_move = DropEffects::COPY | DropEffects::LINK;
        assert_eq!(
            negotiate(all, no_move, &DEFAULT_EFFECT_PRIORITY),
            DropEffect::Copy
        );
        assert_eq!(
            negotiate(DropEffects::LINK, all, &DEFAULT_EFFECT_PRIORITY),
            DropEffect::Link
        );
    }

    #[test]
    fn custom_priority_is_respected() {
        let all = DropEffects::all();
        let priority = [DropEffect::Link, DropEffect::None, DropEffect::Copy];
        assert_eq!(negotiate(all, all, &priority), DropEffect::Link);
        assert_eq!(
            negotiate(DropEffects::COPY | DropEffects::MOVE, all, &priority),
            DropEffect::Copy
        );
    }

    #[test]
    fn unlisted_common_effect_still_negotiates() {
        let priority = [DropEffect::Move, DropEffect::Link, DropEffect::None];
        assert_eq!(
            negotiate(DropEffects::COPY, DropEffects::COPY, &priority),
            DropEffect::Copy
        );
        let degenerate = [DropEffect::None; 3];
        assert_eq!(
            negotiate(DropEffects::LINK, DropEffects::all(), &degenerate),
            DropEffect::Link
        );
        assert_eq!(
            negotiate(DropEffects::LINK, DropEffects::COPY, &degenerate),
            DropEffect::None
        );
    }

    #[test]
    fn none_is_never_allowed() {
        assert!(!DropEffects::all().allows(DropEffect::None));
        assert!(DropEffects::COPY.allows(DropEffect::Copy));
        assert_eq!(DropEffects::empty().len(), 0);
        assert_eq!((DropEffects::COPY | DropEffects::LINK).len(), 2);
    }
}
