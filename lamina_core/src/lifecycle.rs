// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View lifecycle state machine.
//!
//! Every [`ContentEntry`] carries a [`VisualState`]. The stack never mutates it
//! directly; every change is an applied [`LifecycleEvent`], looked up in
//! [`VisualState::next`], and the unit hook is only called when the
//! transition is legal. Illegal calls are swallowed, which lets hosts forward
//! their own hooks defensively.
//!
//! ```text
//!   NotMaterialized ──Load──► Materialized ──WillAppear──► Appearing
//!         ▲                        │                           │
//!         │                        │                       DidAppear
//!       Unload                     │                           ▼
//!         │                        │          ┌─WillDisappear─ Appeared
//!         │                        ▼          ▼
//!         └──────────────── Disappeared ◄─DidDisappear── Disappearing
//! ```
//!
//! `WillAppear` is also legal from `Disappeared` (an entry revealed again)
//! and `WillDisappear` from `Appearing` (a show cut short by a hide).

use crate::entry::ContentEntry;
use crate::unit::PresentationUnit;

/// Visual state of one stack entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// No view exists.
    #[default]
    NotMaterialized,
    /// The view exists but has never been shown.
    Materialized,
    /// `view_will_appear` was forwarded.
    Appearing,
    /// `view_did_appear` was forwarded.
    Appeared,
    /// `view_will_disappear` was forwarded.
    Disappearing,
    /// `view_did_disappear` was forwarded.
    Disappeared,
}

/// A lifecycle call the stack may forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Materialize the view.
    Load,
    /// Forward `view_will_appear(animated)`.
    WillAppear(bool),
    /// Forward `view_did_appear(animated)`.
    DidAppear(bool),
    /// Forward `view_will_disappear(animated)`.
    WillDisappear(bool),
    /// Forward `view_did_disappear(animated)`.
    DidDisappear(bool),
    /// Release the view.
    Unload,
}

impl VisualState {
    /// Returns the state reached by applying `event`, or `None` if the event
    /// is not legal in this state.
    #[must_use]
    pub const fn next(self, event: LifecycleEvent) -> Option<Self> {
        use LifecycleEvent as E;
        match (self, event) {
            (Self::NotMaterialized, E::Load) => Some(Self::Materialized),
            (Self::Materialized | Self::Disappeared, E::WillAppear(_)) => Some(Self::Appearing),
            (Self::Appearing, E::DidAppear(_)) => Some(Self::Appeared),
            (Self::Appearing | Self::Appeared, E::WillDisappear(_)) => Some(Self::Disappearing),
            (Self::Disappearing, E::DidDisappear(_)) => Some(Self::Disappeared),
            (Self::Materialized | Self::Disappeared, E::Unload) => Some(Self::NotMaterialized),
            _ => None,
        }
    }

    /// Returns whether a view exists in this state.
    #[inline]
    #[must_use]
    pub const fn is_materialized(self) -> bool {
        !matches!(self, Self::NotMaterialized)
    }

    /// Returns whether the view is on screen or on its way there.
    #[inline]
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Appearing | Self::Appeared | Self::Disappearing)
    }

    /// Returns whether rotation hooks may be forwarded in this state.
    #[inline]
    #[must_use]
    pub const fn accepts_rotation(self) -> bool {
        matches!(self, Self::Appeared)
    }
}

/// Applies `event` to `entry`, calling the matching unit hook if legal.
///
/// Returns whether the event was forwarded.
pub(crate) fn forward<U: PresentationUnit>(
    entry: &mut ContentEntry<U>,
    event: LifecycleEvent,
) -> bool {
    let Some(next) = entry.state.next(event) else {
        log::trace!(
            "swallowed {event:?} for {:?} in state {:?}",
            entry.unit.id(),
            entry.state
        );
        return false;
    };
    match event {
        LifecycleEvent::Load => entry.unit.load_view(),
        LifecycleEvent::WillAppear(animated) => entry.unit.view_will_appear(animated),
        LifecycleEvent::DidAppear(animated) => entry.unit.view_did_appear(animated),
        LifecycleEvent::WillDisappear(animated) => entry.unit.view_will_disappear(animated),
        LifecycleEvent::DidDisappear(animated) => entry.unit.view_did_disappear(animated),
        LifecycleEvent::Unload => entry.unit.unload_view(),
    }
    entry.state = next;
    true
}

/// Materializes the entry's view if it does not exist yet.
pub(crate) fn materialize<U: PresentationUnit>(entry: &mut ContentEntry<U>) {
    if !entry.state.is_materialized() {
        forward(entry, LifecycleEvent::Load);
    }
}

/// Releases the entry's view regardless of its visibility.
///
/// Visible entries are first walked through the disappear hooks so the unit
/// sees a coherent sequence. Returns whether a view was released.
pub(crate) fn force_unload<U: PresentationUnit>(entry: &mut ContentEntry<U>) -> bool {
    if matches!(entry.state, VisualState::Appearing | VisualState::Appeared) {
        forward(entry, LifecycleEvent::WillDisappear(false));
    }
    if entry.state == VisualState::Disappearing {
        forward(entry, LifecycleEvent::DidDisappear(false));
    }
    forward(entry, LifecycleEvent::Unload)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::transition::TransitionSpec;
    use crate::unit::UnitId;

    #[derive(Default)]
    struct HookLog {
        calls: Vec<&'static str>,
    }

    impl PresentationUnit for HookLog {
        fn id(&self) -> UnitId {
            UnitId(7)
        }
        fn load_view(&mut self) {
            self.calls.push("load");
        }
        fn unload_view(&mut self) {
            self.calls.push("unload");
        }
        fn view_will_appear(&mut self, _animated: bool) {
            self.calls.push("will_appear");
        }
        fn view_did_appear(&mut self, _animated: bool) {
            self.calls.push("did_appear");
        }
        fn view_will_disappear(&mut self, _animated: bool) {
            self.calls.push("will_disappear");
        }
        fn view_did_disappear(&mut self, _animated: bool) {
            self.calls.push("did_disappear");
        }
    }

    fn entry() -> ContentEntry<HookLog> {
        ContentEntry::new(HookLog::default(), TransitionSpec::NONE, false)
    }

    #[test]
    fn full_cycle_forwards_every_hook() {
        let mut e = entry();
        for event in [
            LifecycleEvent::Load,
            LifecycleEvent::WillAppear(true),
            LifecycleEvent::DidAppear(true),
            LifecycleEvent::WillDisappear(true),
            LifecycleEvent::DidDisappear(true),
            LifecycleEvent::Unload,
        ] {
            assert!(forward(&mut e, event), "{event:?} should be legal");
        }
        assert_eq!(
            e.unit.calls,
            [
                "load",
                "will_appear",
                "did_appear",
                "will_disappear",
                "did_disappear",
                "unload"
            ]
        );
        assert_eq!(e.state, VisualState::NotMaterialized);
    }

    #[test]
    fn out_of_order_calls_are_swallowed() {
        let mut e = entry();
        assert!(!forward(&mut e, LifecycleEvent::WillAppear(false)));
        materialize(&mut e);
        assert!(!forward(&mut e, LifecycleEvent::DidAppear(false)));
        assert!(!forward(&mut e, LifecycleEvent::WillDisappear(false)));
        assert_eq!(e.state, VisualState::Materialized);
        assert_eq!(e.unit.calls, ["load"]);
    }

    #[test]
    fn disappeared_entry_can_appear_again() {
        assert_eq!(
            VisualState::Disappeared.next(LifecycleEvent::WillAppear(false)),
            Some(VisualState::Appearing)
        );
        assert_eq!(
            VisualState::Appeared.next(LifecycleEvent::Unload),
            None,
            "visible views are not unloaded by the table"
        );
    }

    #[test]
    fn materialize_is_idempotent() {
        let mut e = entry();
        materialize(&mut e);
        materialize(&mut e);
        assert_eq!(e.unit.calls, ["load"]);
    }

    #[test]
    fn force_unload_walks_visible_entry_through_disappear() {
        let mut e = entry();
        materialize(&mut e);
        forward(&mut e, LifecycleEvent::WillAppear(false));
        forward(&mut e, LifecycleEvent::DidAppear(false));
        assert!(force_unload(&mut e));
        assert_eq!(
            &e.unit.calls[3..],
            ["will_disappear", "did_disappear", "unload"]
        );
        assert!(!force_unload(&mut e), "nothing left to release");
    }
}
