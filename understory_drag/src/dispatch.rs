// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hook invocation boundary.
//!
//! Every hook call goes through [`invoke`], which re-validates the view,
//! resolves the capability, runs the hook and converts any failure into a
//! [`DragError`]. With the `std` feature a panicking hook is caught here too.

use core::fmt;

use crate::capability::{Draggable, Droppable};
use crate::error::{DragError, Hook, HookError, HookResult};
use crate::host::ViewLookup;
use crate::session::DragSession;

/// Whether attachment is checked before the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Liveness {
    /// Skip the hook when the view is detached.
    Checked,
    /// The host is detaching this view right now; deliver if it still resolves.
    Detaching,
}

/// What happened to a single hook call.
#[derive(Debug)]
pub(crate) enum Delivery<K: fmt::Debug> {
    /// The hook ran and returned `Ok`.
    Delivered,
    /// The view has no capability for this hook; nothing ran.
    Unsupported,
    /// The hook did not run or failed.
    Failed(DragError<K>),
}

impl Hook {
    const fn is_source_hook(self) -> bool {
        matches!(self, Self::DragStarted | Self::DragMoved | Self::DragEnded)
    }
}

/// Run `hook` for `view`.
pub(crate) fn invoke<K, L>(
    views: &mut L,
    view: K,
    hook: Hook,
    session: &DragSession<K>,
    liveness: Liveness,
) -> Delivery<K>
where
    K: Copy + fmt::Debug,
    L: ViewLookup<K> + ?Sized,
{
    if liveness == Liveness::Checked && !views.is_attached(&view) {
        return Delivery::Failed(DragError::StaleTarget { view, hook });
    }
    let result = if hook.is_source_hook() {
        let Some(d) = views.draggable(&view) else {
            return Delivery::Unsupported;
        };
        guard(|| call_draggable(d, hook, session))
    } else {
        let Some(d) = views.droppable(&view) else {
            return Delivery::Unsupported;
        };
        guard(|| call_droppable(d, hook, session))
    };
    match result {
        Ok(()) => Delivery::Delivered,
        Err(source) => Delivery::Failed(DragError::HookFailure { view, hook, source }),
    }
}

fn call_draggable<K>(d: &mut dyn Draggable<K>, hook: Hook, session: &DragSession<K>) -> HookResult {
    match hook {
        Hook::DragStarted => d.drag_started(session),
        Hook::DragMoved => d.drag_moved(session),
        Hook::DragEnded => d.drag_ended(session),
        _ => Ok(()),
    }
}

fn call_droppable<K>(d: &mut dyn Droppable<K>, hook: Hook, session: &DragSession<K>) -> HookResult {
    match hook {
        Hook::DropEntered => d.drop_entered(session),
        Hook::DropMoved => d.drop_moved(session),
        Hook::DropLeft => d.drop_left(session),
        Hook::DropAccepted => d.drop_accepted(session),
        _ => Ok(()),
    }
}

#[cfg(feature = "std")]
fn guard(f: impl FnOnce() -> HookResult) -> HookResult {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| alloc::string::String::from(*s))
                .or_else(|| payload.downcast_ref::<alloc::string::String>().cloned())
                .unwrap_or_else(|| alloc::string::String::from("hook panicked"));
            Err(HookError::new(alloc::format!("panicked: {message}")))
        }
    }
}

#[cfg(not(feature = "std"))]
fn guard(f: impl FnOnce() -> HookResult) -> HookResult {
    f()
}
