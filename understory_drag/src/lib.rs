// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag --heading-base-level=0

//! Understory Drag: a deterministic, `no_std` drag-and-drop controller for UI.
//!
//! ## Overview
//!
//! This crate turns normalized pointer events into drag sessions and dispatches drag
//! lifecycle hooks to the views involved. It does not own views, render drag images or
//! talk to the platform clipboard. Instead, the host exposes its views through
//! [`ViewLookup`] and [`GeometryProbe`], and the [`DragController`] decides what happens.
//!
//! ## Capabilities
//!
//! Views opt in by implementing [`Draggable`] (can start a drag) and/or [`Droppable`]
//! (can receive one). A view may be both, for example a reorderable list row.
//!
//! ## Gesture
//!
//! A press on a draggable view arms a candidate. Once the pointer moves strictly further
//! than [`DragConfig::threshold`] from the press position, a [`DragSession`] starts and
//! the source's `drag_started` runs. Releasing before that is a plain click.
//!
//! At most one session exists per controller. While it is active, presses and moves of
//! other pointers are ignored.
//!
//! ## Hover and target
//!
//! On every move the controller probes the point and keeps the droppable views under it
//! as the hover stack, innermost first. Enter/leave transitions are dispatched for the
//! minimal difference between the old and new stacks: leaves inner→outer, then enters
//! outer→inner. The topmost hovered view that accepts one of the payload types is the
//! target; it alone receives `drop_moved` and, on release, `drop_accepted`.
//!
//! ## Effects
//!
//! Sources allow and targets accept a set of [`DropEffects`]. The applied [`DropEffect`]
//! is the first entry of [`DragConfig::effect_priority`] present in both sets
//! (move, copy, link by default), see [`negotiate`]. A release only drops when some
//! effect is common to both sides.
//!
//! ## Ending
//!
//! A release over an accepting target calls `drop_accepted` right after `can_drop`
//! returned `true`. Every ending, dropped or cancelled, then sends `drop_left` to the
//! hovered views and `drag_ended` to the source exactly once.
//!
//! ## Failures
//!
//! Hooks return [`HookResult`]. Failures, panics (with `std`), stale view handles and
//! unmatched releases are contained: they are logged through the [`log`] facade and
//! buffered as [`DragError`] values until [`DragController::drain_diagnostics`].
//!
//! ## Adapters
//!
//! The [`adapters`] module provides a generational view arena, a rectangle probe and a
//! [`Scene`](adapters::scene::Scene) combining both into a complete host.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag::adapters::arena::ViewKey;
//! use understory_drag::adapters::scene::Scene;
//! use understory_drag::{
//!     DragController, DragPayload, DragView, Draggable, DropEffects, MoveOutcome,
//! };
//!
//! struct Row(&'static str);
//!
//! impl Draggable<ViewKey> for Row {
//!     fn payload(&self) -> DragPayload {
//!         DragPayload::new().with_text("text/plain", self.0)
//!     }
//!     fn allowed_effects(&self) -> DropEffects {
//!         DropEffects::COPY | DropEffects::MOVE
//!     }
//! }
//!
//! impl DragView<ViewKey> for Row {
//!     fn as_draggable(&mut self) -> Option<&mut dyn Draggable<ViewKey>> {
//!         Some(self)
//!     }
//! }
//!
//! let mut scene = Scene::new();
//! let row = scene.insert(Row("first"), Rect::new(0.0, 0.0, 100.0, 20.0), 0);
//!
//! let mut drag = DragController::new();
//! drag.pointer_down(&mut scene, None, row, Point::new(10.0, 10.0));
//! assert_eq!(drag.pointer_move(&mut scene, None, Point::new(12.0, 10.0)), MoveOutcome::Pending);
//! assert!(matches!(
//!     drag.pointer_move(&mut scene, None, Point::new(30.0, 10.0)),
//!     MoveOutcome::Started(_)
//! ));
//! assert_eq!(drag.session().unwrap().payload().types().count(), 1);
//! drag.cancel(&mut scene);
//! assert!(!drag.is_dragging());
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The default `std` feature also contains
//! panicking hooks at the dispatch boundary.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use core::num::NonZeroU64;

pub mod adapters;
pub mod capability;
pub mod config;
pub mod controller;
mod dispatch;
pub mod effect;
pub mod error;
pub mod host;
pub mod payload;
pub mod session;

pub use capability::{DragView, Draggable, Droppable, negotiate_with};
pub use config::DragConfig;
pub use controller::{DragController, MoveOutcome, ReleaseOutcome};
pub use effect::{DEFAULT_EFFECT_PRIORITY, DropEffect, DropEffects, negotiate};
pub use error::{DragError, Hook, HookError, HookResult};
pub use host::{DragHost, GeometryProbe, ViewLookup};
pub use payload::{DragData, DragPayload};
pub use session::{DragSession, SessionId, SessionState};

/// Pointer identifier.
///
/// Multi-pointer input assigns one per contact. Single-pointer input may pass
/// `None` to entry points, which means [`PRIMARY_POINTER`].
pub type PointerId = NonZeroU64;

/// The pointer used when an entry point receives `None`.
pub const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;
