// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording doubles sharing one event log.
//!
//! [`RecordingUnit`], [`RecordingDelegate`], and [`RecordingPlayer`] append
//! to the same [`EventLog`], so a test (or a post-mortem dump) sees unit
//! hooks, delegate notifications, and animation playback interleaved in the
//! order the stack produced them.
//!
//! The log carries a virtual clock. It only moves when
//! [`RecordingPlayer::finish`] completes an animation, advancing by that
//! animation's duration, which gives [`chrome::export`](crate::chrome::export)
//! meaningful timestamps without depending on wall time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use lamina_core::animation::{AnimationDescription, AnimationTag, OperationKind};
use lamina_core::delegate::StackDelegate;
use lamina_core::lifecycle::LifecycleEvent;
use lamina_core::player::AnimationPlayer;
use lamina_core::stack::ContainerStack;
use lamina_core::unit::{Orientation, PresentationUnit, UnitId};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Whether a notification precedes or follows the change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Sent before the change.
    Will,
    /// Sent once the change is complete.
    Did,
}

/// Which rotation hook a unit received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotationHook {
    /// `will_rotate`.
    Will,
    /// `will_animate_rotation`.
    WillAnimate,
    /// `did_rotate`.
    Did,
}

/// Something the stack did.
#[derive(Clone, Debug, PartialEq)]
pub enum StackEvent {
    /// A unit lifecycle hook was called.
    Lifecycle {
        /// Receiving unit.
        unit: UnitId,
        /// The hook.
        event: LifecycleEvent,
    },
    /// A unit rotation hook was called.
    Rotation {
        /// Receiving unit.
        unit: UnitId,
        /// The hook.
        hook: RotationHook,
        /// Target orientation, or the previous one for [`RotationHook::Did`].
        orientation: Orientation,
    },
    /// The delegate was told a unit is shown.
    Show {
        /// The unit becoming the top.
        unit: UnitId,
        /// Before or after.
        phase: Phase,
        /// Whether the change is animated.
        animated: bool,
    },
    /// The delegate was told a unit is hidden.
    Hide {
        /// The unit leaving the top.
        unit: UnitId,
        /// Before or after.
        phase: Phase,
        /// Whether the change is animated.
        animated: bool,
    },
    /// The player received a description.
    Play {
        /// Description tag.
        tag: AnimationTag,
        /// Operation that produced it.
        kind: OperationKind,
        /// Whether it takes time.
        animated: bool,
        /// Total duration.
        duration: Duration,
    },
    /// The player reported an animation as finished.
    Finish {
        /// Description tag.
        tag: AnimationTag,
    },
    /// The player was told to drop a view.
    Discard {
        /// Unit whose view was released.
        unit: UnitId,
    },
}

/// A [`StackEvent`] with its position in the log.
#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    /// Zero-based sequence number.
    pub seq: u64,
    /// Virtual time at which the event was recorded.
    pub at: Duration,
    /// The event.
    pub event: StackEvent,
}

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct LogInner {
    events: Vec<Recorded>,
    now: Duration,
    next_seq: u64,
}

/// A shared, append-only event log.
///
/// Cloning yields another handle to the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    inner: Rc<RefCell<LogInner>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event` at the current virtual time.
    pub fn record(&self, event: StackEvent) {
        let mut inner = self.inner.borrow_mut();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let at = inner.now;
        inner.events.push(Recorded { seq, at, event });
    }

    /// Moves the virtual clock forward.
    pub fn advance(&self, by: Duration) {
        self.inner.borrow_mut().now += by;
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Returns a copy of every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<Recorded> {
        self.inner.borrow().events.clone()
    }

    /// Removes and returns the recorded events, keeping the clock.
    pub fn take(&self) -> Vec<StackEvent> {
        let mut inner = self.inner.borrow_mut();
        inner.events.drain(..).map(|r| r.event).collect()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().events.len()
    }

    /// Returns whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().events.is_empty()
    }

    /// Returns how many recorded events satisfy `pred`.
    #[must_use]
    pub fn count(&self, pred: impl Fn(&StackEvent) -> bool) -> usize {
        self.inner
            .borrow()
            .events
            .iter()
            .filter(|r| pred(&r.event))
            .count()
    }
}

// ---------------------------------------------------------------------------
// RecordingUnit
// ---------------------------------------------------------------------------

/// A [`PresentationUnit`] that records every hook it receives.
#[derive(Clone, Debug)]
pub struct RecordingUnit {
    id: UnitId,
    log: EventLog,
    autorotate: bool,
    title: Option<String>,
}

impl RecordingUnit {
    /// Creates a unit that accepts every orientation.
    #[must_use]
    pub fn new(id: u64, log: &EventLog) -> Self {
        Self {
            id: UnitId(id),
            log: log.clone(),
            autorotate: true,
            title: None,
        }
    }

    /// Sets whether the unit accepts rotation.
    #[must_use]
    pub fn with_autorotate(mut self, autorotate: bool) -> Self {
        self.autorotate = autorotate;
        self
    }

    /// Sets the title exposed through property forwarding.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn lifecycle(&self, event: LifecycleEvent) {
        self.log.record(StackEvent::Lifecycle {
            unit: self.id,
            event,
        });
    }

    fn rotation(&self, hook: RotationHook, orientation: Orientation) {
        self.log.record(StackEvent::Rotation {
            unit: self.id,
            hook,
            orientation,
        });
    }
}

impl PresentationUnit for RecordingUnit {
    fn id(&self) -> UnitId {
        self.id
    }

    fn load_view(&mut self) {
        self.lifecycle(LifecycleEvent::Load);
    }

    fn unload_view(&mut self) {
        self.lifecycle(LifecycleEvent::Unload);
    }

    fn view_will_appear(&mut self, animated: bool) {
        self.lifecycle(LifecycleEvent::WillAppear(animated));
    }

    fn view_did_appear(&mut self, animated: bool) {
        self.lifecycle(LifecycleEvent::DidAppear(animated));
    }

    fn view_will_disappear(&mut self, animated: bool) {
        self.lifecycle(LifecycleEvent::WillDisappear(animated));
    }

    fn view_did_disappear(&mut self, animated: bool) {
        self.lifecycle(LifecycleEvent::DidDisappear(animated));
    }

    fn should_autorotate(&self, _orientation: Orientation) -> bool {
        self.autorotate
    }

    fn will_rotate(&mut self, to: Orientation, _duration: Duration) {
        self.rotation(RotationHook::Will, to);
    }

    fn will_animate_rotation(&mut self, to: Orientation, _duration: Duration) {
        self.rotation(RotationHook::WillAnimate, to);
    }

    fn did_rotate(&mut self, from: Orientation) {
        self.rotation(RotationHook::Did, from);
    }
}

// ---------------------------------------------------------------------------
// RecordingDelegate
// ---------------------------------------------------------------------------

/// A [`StackDelegate`] that records show/hide notifications.
#[derive(Clone, Debug)]
pub struct RecordingDelegate {
    log: EventLog,
}

impl RecordingDelegate {
    /// Creates a delegate recording into `log`.
    #[must_use]
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl<U: PresentationUnit> StackDelegate<U> for RecordingDelegate {
    fn will_show(&mut self, unit: &U, animated: bool) {
        self.log.record(StackEvent::Show {
            unit: unit.id(),
            phase: Phase::Will,
            animated,
        });
    }

    fn did_show(&mut self, unit: &U, animated: bool) {
        self.log.record(StackEvent::Show {
            unit: unit.id(),
            phase: Phase::Did,
            animated,
        });
    }

    fn will_hide(&mut self, unit: &U, animated: bool) {
        self.log.record(StackEvent::Hide {
            unit: unit.id(),
            phase: Phase::Will,
            animated,
        });
    }

    fn did_hide(&mut self, unit: &U, animated: bool) {
        self.log.record(StackEvent::Hide {
            unit: unit.id(),
            phase: Phase::Did,
            animated,
        });
    }
}

// ---------------------------------------------------------------------------
// RecordingPlayer
// ---------------------------------------------------------------------------

/// An [`AnimationPlayer`] that records descriptions instead of rendering.
///
/// Clones share the recorded descriptions: box one clone into the stack and
/// keep the other to inspect playback and drive completion.
#[derive(Clone, Debug)]
pub struct RecordingPlayer {
    log: EventLog,
    played: Rc<RefCell<Vec<AnimationDescription>>>,
}

impl RecordingPlayer {
    /// Creates a player recording into `log`.
    #[must_use]
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            played: Rc::default(),
        }
    }

    /// Returns every description played so far.
    #[must_use]
    pub fn descriptions(&self) -> Vec<AnimationDescription> {
        self.played.borrow().clone()
    }

    /// Returns the most recent description.
    #[must_use]
    pub fn last(&self) -> Option<AnimationDescription> {
        self.played.borrow().last().cloned()
    }

    /// Returns the number of descriptions played.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.played.borrow().len()
    }

    /// Finishes the animation `stack` is waiting for.
    ///
    /// Advances the virtual clock by the animation's duration and reports
    /// completion. Returns the finished tag, or `None` if nothing was in
    /// flight.
    pub fn finish<U: PresentationUnit>(
        &self,
        stack: &mut ContainerStack<U>,
    ) -> Option<AnimationTag> {
        let tag = stack.in_flight_tag()?;
        let duration = self
            .played
            .borrow()
            .iter()
            .rev()
            .find(|d| d.tag == tag)
            .map_or(Duration::ZERO, AnimationDescription::duration);
        self.log.advance(duration);
        self.log.record(StackEvent::Finish { tag });
        stack.animation_did_finish(tag);
        Some(tag)
    }
}

impl AnimationPlayer for RecordingPlayer {
    fn play(&mut self, animation: &AnimationDescription) {
        self.log.record(StackEvent::Play {
            tag: animation.tag,
            kind: animation.kind,
            animated: animation.animated,
            duration: animation.duration(),
        });
        self.played.borrow_mut().push(animation.clone());
    }

    fn discard_view(&mut self, unit: UnitId) {
        self.log.record(StackEvent::Discard { unit });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
