// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag controller: turns pointer events into drag sessions.
//!
//! ## Overview
//!
//! [`DragController`] is the only place that starts, updates and ends drag
//! sessions, and the only caller of [`Draggable`](crate::Draggable) and
//! [`Droppable`](crate::Droppable) hooks. Feed it normalized pointer events
//! from your input layer; it queries the host for geometry and capabilities
//! and dispatches hooks in a fixed order.
//!
//! ## Gesture lifecycle
//!
//! - [`pointer_down`](DragController::pointer_down) on a draggable view arms a
//!   candidate. Nothing is dispatched yet.
//! - [`pointer_move`](DragController::pointer_move) promotes the candidate to a
//!   session once the pointer is further than [`DragConfig::threshold`] from the
//!   press position, then processes every move of the owning pointer.
//! - [`pointer_up`](DragController::pointer_up) drops on the current target
//!   (if it accepts) and ends the session. A candidate that never crossed the
//!   threshold ends as a plain click.
//! - [`cancel`](DragController::cancel) and
//!   [`source_detached`](DragController::source_detached) end the session
//!   without dropping.
//!
//! ## Dispatch order
//!
//! For one move: `drop_left` for views that left the hover stack (innermost
//! first), `drop_entered` for views that joined it (outermost first),
//! `drop_moved` on the target, then `drag_moved` on the source.
//!
//! When a session ends: `drop_accepted` on the target (only on an accepted
//! release), `drop_left` for every hovered view (innermost first), then
//! `drag_ended` on the source exactly once.
//!
//! ## Target selection
//!
//! The target is the topmost hovered droppable that accepts at least one
//! payload type. Other hovered views only see enter/leave transitions.
//!
//! ## Failures
//!
//! Hook failures, stale views and mismatched pointer streams never escape an
//! entry point. They are logged and kept for [`DragController::drain_diagnostics`].

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::mem;
use core::num::NonZeroU64;

use kurbo::Point;
use smallvec::SmallVec;

use crate::capability::negotiate_with;
use crate::config::DragConfig;
use crate::dispatch::{self, Delivery, Liveness};
use crate::effect::DropEffect;
use crate::error::{DragError, Hook};
use crate::host::{DragHost, ViewLookup};
use crate::session::{DragSession, HoverStack, SessionId, SessionState};
use crate::{PRIMARY_POINTER, PointerId};

/// Result of [`DragController::pointer_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No gesture belongs to this pointer.
    Ignored,
    /// A press is armed but the threshold was not crossed.
    Pending,
    /// This move crossed the threshold and started a session.
    Started(SessionId),
    /// The session processed this move.
    Dragging(SessionId),
    /// The session was cancelled while processing this move.
    Cancelled(SessionId),
}

/// Result of [`DragController::pointer_up`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome<K> {
    /// Nothing to do for this pointer.
    Ignored,
    /// The press never turned into a drag.
    Click(K),
    /// The target accepted the drop.
    Dropped {
        /// The ended session.
        session: SessionId,
        /// The view that accepted the drop.
        target: K,
        /// The applied effect.
        effect: DropEffect,
    },
    /// The session ended without a drop.
    NotDropped {
        /// The ended session.
        session: SessionId,
    },
}

#[derive(Clone, Copy, Debug)]
struct Candidate<K> {
    pointer: PointerId,
    view: K,
    origin: Point,
}

#[derive(Debug)]
enum Gesture<K> {
    Idle,
    Pending(Candidate<K>),
    Active(DragSession<K>),
}

/// Arbiter of drag gestures.
///
/// Own one controller per window (or per input context) at the root of your
/// application and route every normalized pointer event through it.
///
/// ## Example
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_drag::adapters::arena::ViewKey;
/// use understory_drag::adapters::scene::Scene;
/// use understory_drag::{
///     DragController, DragPayload, DragSession, DragView, Draggable, DropEffect, DropEffects,
///     Droppable, HookResult, ReleaseOutcome,
/// };
///
/// struct Card;
///
/// impl Draggable<ViewKey> for Card {
///     fn payload(&self) -> DragPayload {
///         DragPayload::new().with_text("text/plain", "card")
///     }
///     fn allowed_effects(&self) -> DropEffects {
///         DropEffects::MOVE
///     }
/// }
///
/// struct Bin {
///     types: Vec<String>,
///     dropped: usize,
/// }
///
/// impl Droppable<ViewKey> for Bin {
///     fn accepted_types(&self) -> &[String] {
///         &self.types
///     }
///     fn accepted_effects(&self) -> DropEffects {
///         DropEffects::all()
///     }
///     fn drop_accepted(&mut self, _session: &DragSession<ViewKey>) -> HookResult {
///         self.dropped += 1;
///         Ok(())
///     }
/// }
///
/// enum View {
///     Card(Card),
///     Bin(Bin),
/// }
///
/// impl DragView<ViewKey> for View {
///     fn as_draggable(&mut self) -> Option<&mut dyn Draggable<ViewKey>> {
///         match self {
///             Self::Card(card) => Some(card),
///             Self::Bin(_) => None,
///         }
///     }
///     fn as_droppable(&mut self) -> Option<&mut dyn Droppable<ViewKey>> {
///         match self {
///             Self::Bin(bin) => Some(bin),
///             Self::Card(_) => None,
///         }
///     }
/// }
///
/// let mut scene = Scene::new();
/// let card = scene.insert(View::Card(Card), Rect::new(0.0, 0.0, 10.0, 10.0), 1);
/// let bin = scene.insert(
///     View::Bin(Bin { types: vec!["text/plain".into()], dropped: 0 }),
///     Rect::new(100.0, 0.0, 200.0, 100.0),
///     0,
/// );
///
/// let mut drag = DragController::new();
/// assert!(drag.pointer_down(&mut scene, None, card, Point::new(5.0, 5.0)));
/// drag.pointer_move(&mut scene, None, Point::new(150.0, 50.0));
/// let outcome = drag.pointer_up(&mut scene, None, Point::new(150.0, 50.0));
/// assert!(matches!(
///     outcome,
///     ReleaseOutcome::Dropped { target, effect: DropEffect::Move, .. } if target == bin
/// ));
/// ```
#[derive(Debug)]
pub struct DragController<K: Copy + Eq + fmt::Debug> {
    config: DragConfig,
    gesture: Gesture<K>,
    /// Pointers currently pressed, in press order.
    pressed: SmallVec<[PointerId; 4]>,
    sessions_issued: u64,
    /// Probe output buffer, reused across moves.
    scratch: Vec<K>,
    diagnostics: VecDeque<DragError<K>>,
}

impl<K: Copy + Eq + fmt::Debug> Default for DragController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + fmt::Debug> DragController<K> {
    /// Create a controller with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    /// Create a controller with a custom configuration.
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            config,
            gesture: Gesture::Idle,
            pressed: SmallVec::new(),
            sessions_issued: 0,
            scratch: Vec::new(),
            diagnostics: VecDeque::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Takes effect for the next decision; an active session keeps its payload
    /// and allowed effects.
    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession<K>> {
        match &self.gesture {
            Gesture::Active(s) => Some(s),
            _ => None,
        }
    }

    /// Lifecycle state of the current gesture, or `None` when idle.
    pub fn state(&self) -> Option<SessionState> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Pending(_) => Some(SessionState::Pending),
            Gesture::Active(s) => Some(s.state),
        }
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Active(_))
    }

    /// The view of an armed press that has not become a drag yet.
    pub fn pending_view(&self) -> Option<K> {
        match &self.gesture {
            Gesture::Pending(c) => Some(c.view),
            _ => None,
        }
    }

    /// Take the errors recorded since the last call, oldest first.
    pub fn drain_diagnostics(&mut self) -> Vec<DragError<K>> {
        self.diagnostics.drain(..).collect()
    }

    /// Record a pointer press on `view`.
    ///
    /// Arms a drag candidate when `view` is attached and draggable. Returns
    /// whether a candidate was armed. Presses are ignored for drag purposes
    /// while a session is active or another pointer's press is armed.
    pub fn pointer_down<L>(
        &mut self,
        views: &mut L,
        pointer: Option<PointerId>,
        view: K,
        position: Point,
    ) -> bool
    where
        L: ViewLookup<K> + ?Sized,
    {
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        if !self.pressed.contains(&pointer) {
            self.pressed.push(pointer);
        }

        match &self.gesture {
            Gesture::Active(s) => {
                log::trace!(
                    "press of pointer {pointer} ignored during drag session {}",
                    s.id.get()
                );
                return false;
            }
            Gesture::Pending(c) if c.pointer != pointer => return false,
            _ => {}
        }

        let draggable = views.is_attached(&view)
            && views.draggable(&view).is_some_and(|d| d.is_draggable());
        self.gesture = if draggable {
            Gesture::Pending(Candidate {
                pointer,
                view,
                origin: position,
            })
        } else {
            Gesture::Idle
        };
        draggable
    }

    /// Record a pointer move.
    ///
    /// Starts a session once an armed press moves past the threshold, and
    /// updates hover state and dispatches move hooks while a session is active.
    pub fn pointer_move<H>(
        &mut self,
        host: &mut H,
        pointer: Option<PointerId>,
        position: Point,
    ) -> MoveOutcome
    where
        H: DragHost<K> + ?Sized,
    {
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => MoveOutcome::Ignored,
            Gesture::Pending(c) => {
                if c.pointer != pointer {
                    self.gesture = Gesture::Pending(c);
                    return MoveOutcome::Ignored;
                }
                let threshold = self.config.threshold.max(0.0);
                if c.origin.distance_squared(position) <= threshold * threshold {
                    self.gesture = Gesture::Pending(c);
                    return MoveOutcome::Pending;
                }
                self.start(host, c, position)
            }
            Gesture::Active(session) => {
                if session.pointer != pointer {
                    self.gesture = Gesture::Active(session);
                    return MoveOutcome::Ignored;
                }
                self.drag_to(host, session, position, MoveOutcome::Dragging)
            }
        }
    }

    /// Record a pointer release.
    ///
    /// Ends an active session, dropping on the current target when it accepts.
    /// A release of a press that never became a drag is reported as a click.
    pub fn pointer_up<L>(
        &mut self,
        views: &mut L,
        pointer: Option<PointerId>,
        position: Point,
    ) -> ReleaseOutcome<K>
    where
        L: ViewLookup<K> + ?Sized,
    {
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        let Some(pressed_at) = self.pressed.iter().position(|p| *p == pointer) else {
            self.report(DragError::InvalidGesture { pointer });
            return ReleaseOutcome::Ignored;
        };
        self.pressed.remove(pressed_at);

        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => ReleaseOutcome::Ignored,
            Gesture::Pending(c) if c.pointer != pointer => {
                self.gesture = Gesture::Pending(c);
                ReleaseOutcome::Ignored
            }
            Gesture::Pending(c) => ReleaseOutcome::Click(c.view),
            Gesture::Active(session) if session.pointer != pointer => {
                self.gesture = Gesture::Active(session);
                ReleaseOutcome::Ignored
            }
            Gesture::Active(mut session) => {
                session.position = position;
                self.release(views, session)
            }
        }
    }

    /// Cancel the current gesture.
    ///
    /// An active session ends without a drop: hovered views get `drop_left`,
    /// the source gets `drag_ended`, and [`DragSession::current_effect`] is
    /// [`DropEffect::None`]. An armed press is discarded without hooks.
    /// Returns the cancelled session, or `None` when there was none.
    pub fn cancel<L>(&mut self, views: &mut L) -> Option<SessionId>
    where
        L: ViewLookup<K> + ?Sized,
    {
        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => None,
            Gesture::Pending(c) => {
                log::trace!("armed press on {:?} discarded", c.view);
                None
            }
            Gesture::Active(session) => {
                Some(self.end_cancelled(views, session, Liveness::Checked))
            }
        }
    }

    /// Notify that `view` is being removed from the tree.
    ///
    /// Cancels the gesture if `view` is its source. Returns whether it was.
    /// The host should call this before the view stops resolving through
    /// [`ViewLookup`], so that `drag_ended` can still be delivered.
    pub fn source_detached<L>(&mut self, views: &mut L, view: K) -> bool
    where
        L: ViewLookup<K> + ?Sized,
    {
        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Pending(c) if c.view == view => {
                log::trace!("armed press on {view:?} discarded");
                true
            }
            Gesture::Active(session) if session.source == view => {
                log::debug!(
                    "source {view:?} of drag session {} detached",
                    session.id.get()
                );
                self.end_cancelled(views, session, Liveness::Detaching);
                true
            }
            other => {
                self.gesture = other;
                false
            }
        }
    }

    /// Notify that any `view` is being removed from the tree.
    ///
    /// Handles source removal like [`source_detached`](Self::source_detached).
    /// A hovered view is removed from the hover stack and receives a final
    /// `drop_left`; if it was the target, the next accepting view takes over.
    pub fn view_detached<L>(&mut self, views: &mut L, view: K)
    where
        L: ViewLookup<K> + ?Sized,
    {
        if self.source_detached(views, view) {
            return;
        }
        let hovered =
            matches!(&self.gesture, Gesture::Active(s) if s.hover_stack.contains(&view));
        if !hovered {
            return;
        }
        let Gesture::Active(mut session) = mem::replace(&mut self.gesture, Gesture::Idle) else {
            return;
        };
        session.hover_stack.retain(|v| *v != view);
        if session.target == Some(view) {
            self.retarget(views, &mut session);
        }
        self.emit(views, view, Hook::DropLeft, &session, Liveness::Detaching);
        self.settle(views, session);
    }

    /// Tear down the controller, cancelling an active session first.
    pub fn shutdown<L>(mut self, views: &mut L)
    where
        L: ViewLookup<K> + ?Sized,
    {
        self.cancel(views);
    }

    fn start<H>(&mut self, host: &mut H, c: Candidate<K>, position: Point) -> MoveOutcome
    where
        H: DragHost<K> + ?Sized,
    {
        if !host.is_attached(&c.view) {
            self.report(DragError::StaleTarget {
                view: c.view,
                hook: Hook::DragStarted,
            });
            return MoveOutcome::Ignored;
        }
        let Some(source) = host.draggable(&c.view) else {
            return MoveOutcome::Ignored;
        };
        let payload = source.payload();
        let allowed = source.allowed_effects();

        let id = SessionId::new(NonZeroU64::MIN.saturating_add(self.sessions_issued));
        self.sessions_issued += 1;
        let session = DragSession::new(
            id, c.pointer, c.view, payload, allowed, c.origin, position,
        );
        log::debug!(
            "drag session {} started from {:?} (effects {:?})",
            id.get(),
            c.view,
            allowed
        );

        self.emit(host, c.view, Hook::DragStarted, &session, Liveness::Checked);
        self.drag_to(host, session, position, MoveOutcome::Started)
    }

    /// Process a move of the owning pointer and store the session back.
    fn drag_to<H>(
        &mut self,
        host: &mut H,
        mut session: DragSession<K>,
        position: Point,
        outcome: fn(SessionId) -> MoveOutcome,
    ) -> MoveOutcome
    where
        H: DragHost<K> + ?Sized,
    {
        let id = session.id;
        if session.is_cancel_requested() {
            self.end_cancelled(host, session, Liveness::Checked);
            return MoveOutcome::Cancelled(id);
        }
        if !host.is_attached(&session.source) {
            log::debug!(
                "source {:?} of drag session {} is gone",
                session.source,
                id.get()
            );
            self.end_cancelled(host, session, Liveness::Checked);
            return MoveOutcome::Cancelled(id);
        }

        session.position = position;

        self.scratch.clear();
        host.hit_test(position, &mut self.scratch);
        let mut stack = HoverStack::new();
        for view in &self.scratch {
            if !stack.contains(view) && host.is_attached(view) && host.droppable(view).is_some()
            {
                stack.push(*view);
            }
        }
        let previous = mem::replace(&mut session.hover_stack, stack);
        self.retarget(host, &mut session);

        for view in previous.iter().filter(|v| !session.hover_stack.contains(*v)) {
            self.emit(host, *view, Hook::DropLeft, &session, Liveness::Checked);
        }
        let entered: HoverStack<K> = session
            .hover_stack
            .iter()
            .rev()
            .filter(|v| !previous.contains(*v))
            .copied()
            .collect();
        for view in entered {
            self.emit(host, view, Hook::DropEntered, &session, Liveness::Checked);
        }
        if let Some(target) = session.target {
            self.emit(host, target, Hook::DropMoved, &session, Liveness::Checked);
        }
        self.emit(host, session.source, Hook::DragMoved, &session, Liveness::Checked);

        if self.settle(host, session) {
            MoveOutcome::Cancelled(id)
        } else {
            outcome(id)
        }
    }

    /// Pick the target from the hover stack and renegotiate the effect.
    fn retarget<L>(&self, views: &mut L, session: &mut DragSession<K>)
    where
        L: ViewLookup<K> + ?Sized,
    {
        let mut target = None;
        let mut effect = DropEffect::None;
        for view in &session.hover_stack {
            if !views.is_attached(view) {
                continue;
            }
            let Some(d) = views.droppable(view) else {
                continue;
            };
            if d.accepts_payload(&session.payload) {
                target = Some(*view);
                if d.can_drop(&*session) {
                    effect = negotiate_with(&*session, &*d, &self.config.effect_priority);
                }
                break;
            }
        }
        session.target = target;
        session.current_effect = effect;
    }

    /// Store `session` back, or cancel it if a hook asked to. Returns whether it was cancelled.
    fn settle<L>(&mut self, views: &mut L, session: DragSession<K>) -> bool
    where
        L: ViewLookup<K> + ?Sized,
    {
        if session.is_cancel_requested() {
            log::debug!("drag session {} cancelled by request", session.id.get());
            self.end_cancelled(views, session, Liveness::Checked);
            true
        } else {
            self.gesture = Gesture::Active(session);
            false
        }
    }

    fn release<L>(&mut self, views: &mut L, mut session: DragSession<K>) -> ReleaseOutcome<K>
    where
        L: ViewLookup<K> + ?Sized,
    {
        session.state = SessionState::Ending;
        let id = session.id;

        let mut dropped_on = None;
        if let Some(target) = session.target {
            if views.is_attached(&target) {
                let accepted = match views.droppable(&target) {
                    Some(d) => {
                        session.current_effect =
                            negotiate_with(&session, &*d, &self.config.effect_priority);
                        // A drop always applies an effect.
                        d.can_drop(&session) && !session.current_effect.is_none()
                    }
                    None => false,
                };
                if accepted {
                    self.emit(
                        views,
                        target,
                        Hook::DropAccepted,
                        &session,
                        Liveness::Checked,
                    );
                    dropped_on = Some(target);
                }
            } else {
                self.report(DragError::StaleTarget {
                    view: target,
                    hook: Hook::DropAccepted,
                });
            }
        }
        if dropped_on.is_none() {
            session.current_effect = DropEffect::None;
        }

        self.finish(views, &session, Liveness::Checked);
        match dropped_on {
            Some(target) => {
                log::debug!(
                    "drag session {} dropped on {target:?} ({})",
                    id.get(),
                    session.current_effect
                );
                ReleaseOutcome::Dropped {
                    session: id,
                    target,
                    effect: session.current_effect,
                }
            }
            None => {
                log::debug!("drag session {} released without a drop", id.get());
                ReleaseOutcome::NotDropped { session: id }
            }
        }
    }

    fn end_cancelled<L>(
        &mut self,
        views: &mut L,
        mut session: DragSession<K>,
        source: Liveness,
    ) -> SessionId
    where
        L: ViewLookup<K> + ?Sized,
    {
        session.state = SessionState::Ending;
        session.current_effect = DropEffect::None;
        self.finish(views, &session, source);
        log::debug!("drag session {} cancelled", session.id.get());
        session.id
    }

    /// Terminal hooks: leave every hovered view, then end on the source.
    fn finish<L>(&mut self, views: &mut L, session: &DragSession<K>, source: Liveness)
    where
        L: ViewLookup<K> + ?Sized,
    {
        for view in &session.hover_stack {
            self.emit(views, *view, Hook::DropLeft, session, Liveness::Checked);
        }
        self.emit(views, session.source, Hook::DragEnded, session, source);
    }

    fn emit<L>(
        &mut self,
        views: &mut L,
        view: K,
        hook: Hook,
        session: &DragSession<K>,
        liveness: Liveness,
    ) where
        L: ViewLookup<K> + ?Sized,
    {
        match dispatch::invoke(views, view, hook, session, liveness) {
            Delivery::Delivered => {}
            Delivery::Unsupported => log::trace!("{view:?} does not handle {hook}"),
            Delivery::Failed(err) => self.report(err),
        }
    }

    fn report(&mut self, err: DragError<K>) {
        match &err {
            DragError::StaleTarget { .. } => log::debug!("{err}"),
            DragError::InvalidGesture { .. } | DragError::HookFailure { .. } => {
                log::warn!("{err}");
            }
        }
        if self.config.max_diagnostics == 0 {
            return;
        }
        while self.diagnostics.len() >= self.config.max_diagnostics {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(err);
    }
}
