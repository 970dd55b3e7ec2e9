// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The container stack.
//!
//! [`ContainerStack`] owns an ordered list of [`ContentEntry`]s (index 0 is
//! the root, the last entry is the visible top) and keeps three things
//! consistent across every structural change:
//!
//! - **Lifecycle**: each entry's [`VisualState`] only moves through the
//!   [`lifecycle`] table, and only the visible top is told it appears.
//! - **Materialization**: views are loaded lazily, right before an entry
//!   takes part in a transition or is shown, and unloaded by the
//!   [`CapacityPolicy`] once they are buried deep enough.
//! - **Animation**: each top change yields one [`AnimationDescription`],
//!   handed to the [`AnimationPlayer`]. At most one animated change is in
//!   flight; structural operations fail with [`StackError::Busy`] until the
//!   player reports completion through [`animation_did_finish`].
//!
//! Structural operations only animate while the stack is *displaying*: a
//! display surface is set and the host itself is appearing or visible.
//! Otherwise they just edit the entry list, and the top is shown when the
//! host forwards [`view_will_appear`] and [`view_did_appear`].
//!
//! [`animation_did_finish`]: ContainerStack::animation_did_finish
//! [`view_will_appear`]: ContainerStack::view_will_appear
//! [`view_did_appear`]: ContainerStack::view_did_appear

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::Rect;

use crate::animation::{
    AnimationDescription, AnimationTag, OperationKind, Participant, build_rotation,
    build_transition,
};
use crate::capacity::CapacityPolicy;
use crate::config::StackConfig;
use crate::delegate::StackDelegate;
use crate::entry::ContentEntry;
use crate::error::StackError;
use crate::forwarding::{PropertyForwarder, PropertyKey, PropertyValue};
use crate::lifecycle::{self, LifecycleEvent, VisualState};
use crate::player::AnimationPlayer;
use crate::surface::DisplaySurface;
use crate::transition::{Placement, TransitionSpec};
use crate::unit::{Orientation, PresentationUnit, UnitId};

/// The animated change currently being played.
#[derive(Debug)]
struct Transaction<U> {
    tag: AnimationTag,
    animated: bool,
    incoming: Option<UnitId>,
    outgoing: Option<UnitId>,
    /// Outgoing entry already taken out of the stack, released on completion.
    detached: Option<ContentEntry<U>>,
}

/// Manages the children of one container.
pub struct ContainerStack<U: PresentationUnit> {
    host: UnitId,
    config: StackConfig,
    entries: Vec<ContentEntry<U>>,
    surface: Option<DisplaySurface>,
    /// Frame that resting placements were last resolved against.
    layout_frame: Rect,
    host_state: VisualState,
    delegate: Option<Box<dyn StackDelegate<U>>>,
    player: Box<dyn AnimationPlayer>,
    properties: PropertyForwarder<U>,
    in_flight: Option<Transaction<U>>,
    next_tag: u64,
}

impl<U: PresentationUnit> fmt::Debug for ContainerStack<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerStack")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("ids", &self.ids())
            .field("surface", &self.surface)
            .field("host_state", &self.host_state)
            .field("in_flight", &self.in_flight_tag())
            .finish_non_exhaustive()
    }
}

impl<U: PresentationUnit> ContainerStack<U> {
    /// Creates an empty stack for the container `host`.
    ///
    /// The host is only referenced by id; the stack never controls its
    /// lifetime.
    #[must_use]
    pub fn new(host: UnitId, config: StackConfig, player: Box<dyn AnimationPlayer>) -> Self {
        Self {
            host,
            config,
            entries: Vec::new(),
            surface: None,
            layout_frame: Rect::ZERO,
            host_state: VisualState::Materialized,
            delegate: None,
            player,
            properties: PropertyForwarder::new(),
            in_flight: None,
            next_tag: 1,
        }
    }

    // -- Collaborators --

    /// Returns the id of the owning container.
    #[inline]
    #[must_use]
    pub fn host(&self) -> UnitId {
        self.host
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Sets or clears the observer notified of show/hide transitions.
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn StackDelegate<U>>>) {
        self.delegate = delegate;
    }

    /// Returns the display surface, if one is attached.
    #[inline]
    #[must_use]
    pub fn display_surface(&self) -> Option<DisplaySurface> {
        self.surface
    }

    /// Attaches or detaches the display surface.
    ///
    /// The stack can be populated before any surface exists; views are only
    /// materialized once one is set. Attaching a surface to a host that has
    /// already appeared shows the top right away, and detaching it hides the
    /// top.
    pub fn set_display_surface(&mut self, surface: Option<DisplaySurface>) {
        if let Some(s) = surface {
            if !self.entries.iter().any(|e| e.state.is_materialized()) {
                self.layout_frame = s.frame;
            }
        }
        log::debug!("{:?}: display surface set to {surface:?}", self.host);
        self.surface = surface;
        self.sync_top();
    }

    /// Records a new frame for the attached surface.
    ///
    /// Off-surface views keep their old position until [`rotate`](Self::rotate)
    /// is called.
    pub fn set_surface_frame(&mut self, frame: Rect) {
        if let Some(surface) = self.surface.as_mut() {
            surface.frame = frame;
        }
    }

    /// Returns the registry of forwardable property getters.
    pub fn properties_mut(&mut self) -> &mut PropertyForwarder<U> {
        &mut self.properties
    }

    /// Enables or disables property forwarding.
    pub fn set_forwarding_properties(&mut self, forwarding: bool) {
        self.config.forwarding_properties = forwarding;
    }

    /// Returns the top unit's value for `key`, if forwarding is enabled.
    #[must_use]
    pub fn forwarded_property(&self, key: PropertyKey) -> Option<PropertyValue> {
        if !self.config.forwarding_properties {
            return None;
        }
        self.properties.get(self.top()?, key)
    }

    /// Returns every forwarded property of the top unit.
    #[must_use]
    pub fn forwarded_properties(&self) -> Vec<(PropertyKey, PropertyValue)> {
        match self.top() {
            Some(top) if self.config.forwarding_properties => self.properties.snapshot(top),
            _ => Vec::new(),
        }
    }

    // -- Read accessors --

    /// Returns the bottommost unit.
    #[must_use]
    pub fn root(&self) -> Option<&U> {
        self.entries.first().map(|e| &e.unit)
    }

    /// Returns the topmost (visible) unit.
    #[must_use]
    pub fn top(&self) -> Option<&U> {
        self.entries.last().map(|e| &e.unit)
    }

    /// Returns every unit, root first.
    #[must_use]
    pub fn units(&self) -> Vec<&U> {
        self.entries.iter().map(|e| &e.unit).collect()
    }

    /// Returns every unit id, root first.
    #[must_use]
    pub fn ids(&self) -> Vec<UnitId> {
        self.entries.iter().map(ContentEntry::id).collect()
    }

    /// Returns the entries, root first.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ContentEntry<U>] {
        &self.entries
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the stack holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether `unit` is in the stack.
    #[must_use]
    pub fn contains(&self, unit: UnitId) -> bool {
        self.index_of(unit).is_some()
    }

    /// Returns the position of `unit`, root being 0.
    #[must_use]
    pub fn index_of(&self, unit: UnitId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == unit)
    }

    /// Returns the visual state of `unit`.
    #[must_use]
    pub fn state_of(&self, unit: UnitId) -> Option<VisualState> {
        self.entries.iter().find(|e| e.id() == unit).map(|e| e.state)
    }

    /// Returns the host's own visual state, as forwarded by the host.
    #[inline]
    #[must_use]
    pub fn host_state(&self) -> VisualState {
        self.host_state
    }

    /// Returns whether an animated change is in flight.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the tag of the animated change in flight.
    #[must_use]
    pub fn in_flight_tag(&self) -> Option<AnimationTag> {
        self.in_flight.as_ref().map(|t| t.tag)
    }

    /// Returns whether structural changes are currently shown on screen.
    #[must_use]
    pub fn is_displaying(&self) -> bool {
        self.surface.is_some()
            && matches!(
                self.host_state,
                VisualState::Appearing | VisualState::Appeared
            )
    }

    // -- Structural operations --

    /// Pushes `unit` on top of the stack.
    ///
    /// Pushing a unit that is already present is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight.
    pub fn push(&mut self, unit: U, transition: TransitionSpec) -> Result<(), StackError> {
        let len = self.entries.len();
        self.insert(unit, len, transition)
    }

    /// Inserts `unit` at `index` (0 = new root, `len()` = new top).
    ///
    /// Insertion below the top is invisible: nothing is materialized and no
    /// delegate call is made. Inserting at the top behaves like
    /// [`push`](Self::push). Inserting a unit that is already present is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight, and
    /// [`StackError::IndexOutOfRange`] if `index > len()`.
    pub fn insert(
        &mut self,
        mut unit: U,
        index: usize,
        transition: TransitionSpec,
    ) -> Result<(), StackError> {
        self.ensure_idle()?;
        let len = self.entries.len();
        if index > len {
            return Err(StackError::IndexOutOfRange { index, len });
        }
        let id = unit.id();
        if self.contains(id) {
            log::warn!("{:?}: {id:?} is already in the stack, ignoring", self.host);
            return Ok(());
        }
        unit.did_move_to_container(Some(self.host));

        if index < len {
            log::debug!("{:?}: insert {id:?} at {index}", self.host);
            let mut entry = ContentEntry::new(unit, transition, false);
            // Rest where the entry above would have moved it.
            entry.placement = self.entries[index].transition.style.disappearing_to();
            self.entries.insert(index, entry);
            self.reclaim(false);
            return Ok(());
        }

        let displaying = self.is_displaying();
        log::debug!(
            "{:?}: push {id:?} with {:?} (displaying: {displaying})",
            self.host,
            transition.style
        );
        self.entries.push(ContentEntry::new(
            unit,
            transition,
            displaying && transition.is_animated(),
        ));
        if !displaying {
            self.reclaim(false);
            return Ok(());
        }

        let top = self.entries.len() - 1;
        lifecycle::materialize(&mut self.entries[top]);
        let outgoing = top.checked_sub(1).map(|i| self.participant(i));
        let tag = self.take_tag();
        let description = build_transition(
            tag,
            OperationKind::Push,
            outgoing,
            Some(self.participant(top)),
            transition,
            self.frame(),
        );
        self.begin(description, Some(id), outgoing.map(|p| p.unit), None);
        Ok(())
    }

    /// Removes the top entry, revealing the one below.
    ///
    /// The root is never popped; popping a stack of fewer than two entries is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight.
    pub fn pop(&mut self) -> Result<(), StackError> {
        self.ensure_idle()?;
        if self.entries.len() < 2 {
            log::debug!("{:?}: pop ignored, the root is never popped", self.host);
            return Ok(());
        }
        self.truncate(self.entries.len() - 1);
        Ok(())
    }

    /// Removes every entry above `unit` in a single transition.
    ///
    /// With `None`, every entry above the root is removed. Unknown units and
    /// units already on top are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight.
    pub fn pop_to(&mut self, unit: Option<UnitId>) -> Result<(), StackError> {
        self.ensure_idle()?;
        let target = match unit {
            Some(id) => {
                let Some(index) = self.index_of(id) else {
                    log::warn!("{:?}: pop_to unknown {id:?}, ignoring", self.host);
                    return Ok(());
                };
                index
            }
            None => 0,
        };
        if target + 1 >= self.entries.len() {
            return Ok(());
        }
        self.truncate(target + 1);
        Ok(())
    }

    /// Removes every entry above the root in a single transition.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight.
    pub fn pop_to_root(&mut self) -> Result<(), StackError> {
        self.pop_to(None)
    }

    /// Removes the entry at `index`.
    ///
    /// Removing the top animates like [`pop`](Self::pop), and is allowed even
    /// for a lone root. Removing a buried entry is structural only; its view
    /// is released if it had one.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight, and
    /// [`StackError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<(), StackError> {
        self.ensure_idle()?;
        let len = self.entries.len();
        if index >= len {
            return Err(StackError::IndexOutOfRange { index, len });
        }
        if index + 1 == len {
            self.truncate(index);
        } else {
            let entry = self.entries.remove(index);
            log::debug!("{:?}: remove buried {:?}", self.host, entry.id());
            self.discard(entry);
        }
        Ok(())
    }

    /// Repositions off-surface views after the display surface frame changed.
    ///
    /// Returns the description for the host to play alongside its own
    /// rotation animation. Call it from the host's `will_animate_rotation`
    /// after [`set_surface_frame`](Self::set_surface_frame).
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight.
    pub fn rotate(&mut self, duration: Duration) -> Result<AnimationDescription, StackError> {
        self.ensure_idle()?;
        let new_frame = self.frame();
        let views: Vec<Participant> = self
            .entries
            .iter()
            .filter(|e| e.state.is_materialized())
            .map(|e| Participant {
                unit: e.id(),
                placement: e.placement,
            })
            .collect();
        let tag = self.take_tag();
        let description = build_rotation(tag, &views, self.layout_frame, new_frame, duration);
        self.layout_frame = new_frame;
        Ok(description)
    }

    /// Releases every view and detaches the display surface.
    ///
    /// Used when the surface itself is discarded. Units stay in the stack; the
    /// top is materialized again once a surface is attached and the host
    /// appears. A top still on screen is hidden first, with the matching
    /// delegate calls.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Busy`] while an animated change is in flight.
    pub fn release_views(&mut self) -> Result<(), StackError> {
        self.ensure_idle()?;
        self.top_will_disappear(false);
        self.top_did_disappear(false);
        for entry in &mut self.entries {
            if lifecycle::force_unload(entry) {
                self.player.discard_view(entry.id());
            }
        }
        if self.host_state.is_materialized() {
            self.host_state = VisualState::Materialized;
        }
        self.surface = None;
        log::debug!("{:?}: released all views", self.host);
        Ok(())
    }

    /// Completes the animated change tagged `tag`.
    ///
    /// Called by the host when its player finished a description. Unknown or
    /// stale tags are ignored.
    pub fn animation_did_finish(&mut self, tag: AnimationTag) {
        match self.in_flight.take() {
            Some(txn) if txn.tag == tag => self.complete(txn),
            other => {
                self.in_flight = other;
                log::warn!("{:?}: ignoring completion of {tag:?}", self.host);
            }
        }
    }

    // -- Host lifecycle forwarding --

    /// Forwards the host's `view_will_appear` to the top unit.
    pub fn view_will_appear(&mut self, animated: bool) {
        if !self.advance_host(LifecycleEvent::WillAppear(animated)) || !self.may_forward() {
            return;
        }
        self.top_will_appear(animated);
    }

    /// Forwards the host's `view_did_appear` to the top unit.
    pub fn view_did_appear(&mut self, animated: bool) {
        if !self.advance_host(LifecycleEvent::DidAppear(animated)) || !self.may_forward() {
            return;
        }
        if self
            .entries
            .last()
            .is_some_and(|e| e.state != VisualState::Appearing)
        {
            self.top_will_appear(animated);
        }
        self.top_did_appear(animated);
    }

    /// Forwards the host's `view_will_disappear` to the top unit.
    pub fn view_will_disappear(&mut self, animated: bool) {
        if !self.advance_host(LifecycleEvent::WillDisappear(animated)) || self.is_busy() {
            return;
        }
        self.top_will_disappear(animated);
    }

    /// Forwards the host's `view_did_disappear` to the top unit.
    pub fn view_did_disappear(&mut self, animated: bool) {
        if !self.advance_host(LifecycleEvent::DidDisappear(animated)) || self.is_busy() {
            return;
        }
        self.top_did_disappear(animated);
    }

    /// Returns whether the container may rotate to `orientation`.
    ///
    /// Every unit in the stack must agree, so that revealing a buried unit
    /// never shows it in an orientation it refused. Rotation is refused while
    /// a transition is in flight.
    #[must_use]
    pub fn should_autorotate(&self, orientation: Orientation) -> bool {
        !self.is_busy()
            && self
                .entries
                .iter()
                .all(|e| e.unit.should_autorotate(orientation))
    }

    /// Forwards the host's `will_rotate` to the visible top unit.
    pub fn will_rotate(&mut self, to: Orientation, duration: Duration) {
        if let Some(top) = self.rotating_top() {
            top.unit.will_rotate(to, duration);
        }
    }

    /// Forwards the host's `will_animate_rotation` to the visible top unit.
    pub fn will_animate_rotation(&mut self, to: Orientation, duration: Duration) {
        if let Some(top) = self.rotating_top() {
            top.unit.will_animate_rotation(to, duration);
        }
    }

    /// Forwards the host's `did_rotate` to the visible top unit.
    pub fn did_rotate(&mut self, from: Orientation) {
        if let Some(top) = self.rotating_top() {
            top.unit.did_rotate(from);
        }
    }

    // -- Internal helpers --

    fn ensure_idle(&self) -> Result<(), StackError> {
        match &self.in_flight {
            Some(txn) => Err(StackError::Busy { tag: txn.tag }),
            None => Ok(()),
        }
    }

    fn take_tag(&mut self) -> AnimationTag {
        let tag = AnimationTag(self.next_tag);
        self.next_tag += 1;
        tag
    }

    fn frame(&self) -> Rect {
        self.surface.map_or(self.layout_frame, |s| s.frame)
    }

    fn participant(&self, index: usize) -> Participant {
        let entry = &self.entries[index];
        Participant {
            unit: entry.id(),
            placement: entry.placement,
        }
    }

    fn may_forward(&self) -> bool {
        self.surface.is_some() && !self.is_busy()
    }

    fn advance_host(&mut self, event: LifecycleEvent) -> bool {
        match self.host_state.next(event) {
            Some(next) => {
                self.host_state = next;
                true
            }
            None => {
                log::trace!(
                    "{:?}: swallowed host {event:?} in state {:?}",
                    self.host,
                    self.host_state
                );
                false
            }
        }
    }

    fn rotating_top(&mut self) -> Option<&mut ContentEntry<U>> {
        self.entries
            .last_mut()
            .filter(|e| e.state.accepts_rotation())
    }

    /// Materializes the top, places it full-frame, and runs the will-appear
    /// phase.
    fn top_will_appear(&mut self, animated: bool) {
        let Some(index) = self.entries.len().checked_sub(1) else {
            return;
        };
        let top = &mut self.entries[index];
        lifecycle::materialize(top);
        top.placement = Placement::IDENTITY;
        if !lifecycle::forward(top, LifecycleEvent::WillAppear(animated)) {
            return;
        }
        let tag = self.take_tag();
        let description = build_transition(
            tag,
            OperationKind::Push,
            None,
            Some(self.participant(index)),
            TransitionSpec::NONE,
            self.frame(),
        );
        self.player.play(&description);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.will_show(&self.entries[index].unit, animated);
        }
    }

    fn top_did_appear(&mut self, animated: bool) {
        let Some(top) = self.entries.last_mut() else {
            return;
        };
        if lifecycle::forward(top, LifecycleEvent::DidAppear(animated)) {
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_show(&top.unit, animated);
            }
        }
    }

    fn top_will_disappear(&mut self, animated: bool) {
        let Some(top) = self.entries.last_mut() else {
            return;
        };
        if lifecycle::forward(top, LifecycleEvent::WillDisappear(animated)) {
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.will_hide(&top.unit, animated);
            }
        }
    }

    fn top_did_disappear(&mut self, animated: bool) {
        let Some(top) = self.entries.last_mut() else {
            return;
        };
        if lifecycle::forward(top, LifecycleEvent::DidDisappear(animated)) {
            if let Some(delegate) = self.delegate.as_mut() {
                delegate.did_hide(&top.unit, animated);
            }
        }
    }

    /// Catches the top up with host hooks and surface changes it missed.
    ///
    /// Only acts when nothing is in flight. The top is walked as far as the
    /// host got: up to `Appearing` or `Appeared` while displaying, down to
    /// `Disappearing` or `Disappeared` otherwise.
    fn sync_top(&mut self) {
        if self.is_busy() {
            return;
        }
        let Some(state) = self.entries.last().map(ContentEntry::state) else {
            return;
        };
        if self.is_displaying() {
            if !matches!(state, VisualState::Appearing | VisualState::Appeared) {
                self.top_will_appear(false);
            }
            if self.host_state == VisualState::Appeared {
                self.top_did_appear(false);
            }
        } else if state.is_visible() {
            self.top_will_disappear(false);
            if self.host_state != VisualState::Disappearing {
                self.top_did_disappear(false);
            }
        }
    }

    /// Removes every entry from `keep` upward, animating the old top out and
    /// the new top in.
    fn truncate(&mut self, keep: usize) {
        let Some(outgoing) = self.entries.pop() else {
            return;
        };
        let buried: Vec<_> = self.entries.drain(keep..).collect();
        for entry in buried.into_iter().rev() {
            self.discard(entry);
        }
        log::debug!(
            "{:?}: remove top {:?}, {} entries left",
            self.host,
            outgoing.id(),
            self.entries.len()
        );

        if !self.is_displaying() {
            self.discard(outgoing);
            self.reclaim(false);
            return;
        }

        let incoming = keep.checked_sub(1);
        if let Some(i) = incoming {
            lifecycle::materialize(&mut self.entries[i]);
        }
        let spec = if outgoing.added_animated {
            outgoing.transition
        } else {
            TransitionSpec::with_duration(outgoing.transition.style, Duration::ZERO)
        };
        let leaving = Participant {
            unit: outgoing.id(),
            placement: outgoing.placement,
        };
        let arriving = incoming.map(|i| self.participant(i));
        let tag = self.take_tag();
        let description = build_transition(
            tag,
            OperationKind::Pop,
            Some(leaving),
            arriving,
            spec,
            self.frame(),
        );
        self.begin(
            description,
            arriving.map(|p| p.unit),
            Some(leaving.unit),
            Some(outgoing),
        );
    }

    /// Runs the will phase, hands the description to the player, and either
    /// completes immediately or records the change as in flight.
    fn begin(
        &mut self,
        description: AnimationDescription,
        incoming: Option<UnitId>,
        outgoing: Option<UnitId>,
        mut detached: Option<ContentEntry<U>>,
    ) {
        let animated = description.animated;
        for effect in description.steps.iter().flat_map(|s| s.effects.iter()) {
            if let Some(entry) = locate(&mut self.entries, detached.as_mut(), effect.unit) {
                entry.placement = effect.settles_at;
            }
        }

        let hiding = forward_to(
            &mut self.entries,
            detached.as_mut(),
            outgoing,
            LifecycleEvent::WillDisappear(animated),
        );
        let showing = forward_to(
            &mut self.entries,
            detached.as_mut(),
            incoming,
            LifecycleEvent::WillAppear(animated),
        );

        if let Some(delegate) = self.delegate.as_mut() {
            if showing {
                if let Some(unit) = find(&self.entries, detached.as_ref(), incoming) {
                    delegate.will_show(unit, animated);
                }
            }
            if hiding {
                if let Some(unit) = find(&self.entries, detached.as_ref(), outgoing) {
                    delegate.will_hide(unit, animated);
                }
            }
        }

        self.player.play(&description);
        let txn = Transaction {
            tag: description.tag,
            animated,
            incoming,
            outgoing,
            detached,
        };
        if animated {
            log::debug!("{:?}: {:?} in flight", self.host, txn.tag);
            self.in_flight = Some(txn);
            self.reclaim(true);
        } else {
            self.complete(txn);
        }
    }

    /// Runs the did phase of `txn` and settles the stack.
    fn complete(&mut self, txn: Transaction<U>) {
        let Transaction {
            tag,
            animated,
            incoming,
            outgoing,
            mut detached,
        } = txn;

        let hidden = forward_to(
            &mut self.entries,
            detached.as_mut(),
            outgoing,
            LifecycleEvent::DidDisappear(animated),
        );
        let shown = forward_to(
            &mut self.entries,
            detached.as_mut(),
            incoming,
            LifecycleEvent::DidAppear(animated),
        );

        if let Some(delegate) = self.delegate.as_mut() {
            if shown {
                if let Some(unit) = find(&self.entries, detached.as_ref(), incoming) {
                    delegate.did_show(unit, animated);
                }
            }
            if hidden {
                if let Some(unit) = find(&self.entries, detached.as_ref(), outgoing) {
                    delegate.did_hide(unit, animated);
                }
            }
        }

        if let Some(entry) = detached {
            self.discard(entry);
        }
        log::debug!("{:?}: {tag:?} complete", self.host);
        self.sync_top();
        self.reclaim(false);
    }

    /// Releases an entry that left the stack, dropping its unit.
    fn discard(&mut self, mut entry: ContentEntry<U>) {
        let id = entry.id();
        if lifecycle::force_unload(&mut entry) {
            self.player.discard_view(id);
        }
        entry.unit.did_move_to_container(None);
        log::debug!("{:?}: released {id:?}", self.host);
    }

    /// Applies the capacity policy.
    fn reclaim(&mut self, in_flight: bool) {
        let policy = CapacityPolicy::new(self.config.capacity, self.config.removing_beyond_capacity);
        let plan = policy.plan(self.entries.len(), in_flight);
        if plan.is_empty() {
            return;
        }

        for entry in &mut self.entries[plan.unload] {
            // Views on screen are never torn down mid-show.
            if entry.state.is_visible() {
                continue;
            }
            if lifecycle::forward(entry, LifecycleEvent::Unload) {
                log::debug!("{:?}: unloaded {:?} beyond capacity", self.host, entry.id());
                self.player.discard_view(entry.id());
            }
        }

        if !plan.remove.is_empty() {
            let removed: Vec<_> = self.entries.drain(plan.remove).collect();
            for entry in removed.into_iter().rev() {
                log::debug!("{:?}: removing {:?} beyond capacity", self.host, entry.id());
                self.discard(entry);
            }
        }
    }
}

fn locate<'a, U: PresentationUnit>(
    entries: &'a mut [ContentEntry<U>],
    detached: Option<&'a mut ContentEntry<U>>,
    id: UnitId,
) -> Option<&'a mut ContentEntry<U>> {
    match detached {
        Some(entry) if entry.id() == id => Some(entry),
        _ => entries.iter_mut().find(|e| e.id() == id),
    }
}

/// Forwards `event` to the entry for `id`, returning whether it was legal.
fn forward_to<U: PresentationUnit>(
    entries: &mut [ContentEntry<U>],
    detached: Option<&mut ContentEntry<U>>,
    id: Option<UnitId>,
    event: LifecycleEvent,
) -> bool {
    let Some(id) = id else {
        return false;
    };
    locate(entries, detached, id).is_some_and(|e| lifecycle::forward(e, event))
}

fn find<'a, U: PresentationUnit>(
    entries: &'a [ContentEntry<U>],
    detached: Option<&'a ContentEntry<U>>,
    id: Option<UnitId>,
) -> Option<&'a U> {
    let id = id?;
    match detached {
        Some(entry) if entry.id() == id => Some(&entry.unit),
        _ => entries.iter().find(|e| e.id() == id).map(|e| &e.unit),
    }
}
