// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! None of these escape the controller's entry points. They are logged through
//! the [`log`] facade and kept in a bounded diagnostics buffer, see
//! [`DragController::drain_diagnostics`](crate::DragController::drain_diagnostics).

use alloc::string::String;
use core::fmt;

use crate::PointerId;

/// Which capability hook an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// [`Draggable::drag_started`](crate::Draggable::drag_started).
    DragStarted,
    /// [`Draggable::drag_moved`](crate::Draggable::drag_moved).
    DragMoved,
    /// [`Draggable::drag_ended`](crate::Draggable::drag_ended).
    DragEnded,
    /// [`Droppable::drop_entered`](crate::Droppable::drop_entered).
    DropEntered,
    /// [`Droppable::drop_moved`](crate::Droppable::drop_moved).
    DropMoved,
    /// [`Droppable::drop_left`](crate::Droppable::drop_left).
    DropLeft,
    /// [`Droppable::drop_accepted`](crate::Droppable::drop_accepted).
    DropAccepted,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DragStarted => "drag_started",
            Self::DragMoved => "drag_moved",
            Self::DragEnded => "drag_ended",
            Self::DropEntered => "drop_entered",
            Self::DropMoved => "drop_moved",
            Self::DropLeft => "drop_left",
            Self::DropAccepted => "drop_accepted",
        })
    }
}

/// Failure reported by a capability hook.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type returned by capability hooks.
pub type HookResult = Result<(), HookError>;

/// Problems encountered while processing a gesture.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DragError<K: fmt::Debug> {
    /// A pointer-up arrived without a matching pointer-down.
    #[error("pointer {pointer} released without a matching press")]
    InvalidGesture {
        /// The pointer that was released.
        pointer: PointerId,
    },
    /// A hook failed; the gesture continued.
    #[error("{hook} failed on view {view:?}: {source}")]
    HookFailure {
        /// The view whose hook failed.
        view: K,
        /// The hook that failed.
        hook: Hook,
        /// What the hook reported.
        source: HookError,
    },
    /// A view was detached before its hook could run; the hook was skipped.
    #[error("view {view:?} was detached before {hook}")]
    StaleTarget {
        /// The detached view.
        view: K,
        /// The hook that was skipped.
        hook: Hook,
    },
}

impl<K: fmt::Debug> DragError<K> {
    /// The view this error concerns, if any.
    pub fn view(&self) -> Option<&K> {
        match self {
            Self::InvalidGesture { .. } => None,
            Self::HookFailure { view, .. } | Self::StaleTarget { view, .. } => Some(view),
        }
    }
}
