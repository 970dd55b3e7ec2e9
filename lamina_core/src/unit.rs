// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation unit contract.
//!
//! A *presentation unit* is a child component with its own view lifecycle,
//! analogous to a screen or panel. The stack owns the units pushed onto it and
//! drives their hooks; it never inspects their contents beyond [`UnitId`].

use core::fmt;
use core::time::Duration;

/// Identifies a presentation unit.
///
/// Hosts assign unit ids. The stack uses them for duplicate detection and to
/// tag the views an [`AnimationDescription`](crate::animation::AnimationDescription)
/// refers to; it never interprets the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UnitId(pub u64);

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

/// Interface orientation reported by the host during rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Device upright.
    #[default]
    Portrait,
    /// Device upside down.
    PortraitUpsideDown,
    /// Device rotated with the home side on the left.
    LandscapeLeft,
    /// Device rotated with the home side on the right.
    LandscapeRight,
}

impl Orientation {
    /// Returns whether this is one of the two landscape orientations.
    #[inline]
    #[must_use]
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }
}

/// A child managed by a [`ContainerStack`](crate::stack::ContainerStack).
///
/// All hooks default to no-ops, so a unit only overrides the events it cares
/// about. Hooks are only ever called by the stack, in the order allowed by the
/// [`lifecycle`](crate::lifecycle) state table.
pub trait PresentationUnit {
    /// Returns the identity of this unit.
    ///
    /// Two units with the same id are considered the same unit; the stack
    /// refuses to hold both.
    fn id(&self) -> UnitId;

    /// Builds the unit's visual representation.
    fn load_view(&mut self) {}

    /// Releases the unit's visual representation, keeping its other state.
    fn unload_view(&mut self) {}

    /// Called when the unit joins a container, with that container's id, and
    /// with `None` when it leaves.
    ///
    /// Units that need to reach their enclosing container keep the id.
    fn did_move_to_container(&mut self, container: Option<UnitId>) {
        _ = container;
    }

    /// Called before the view becomes visible.
    fn view_will_appear(&mut self, animated: bool) {
        _ = animated;
    }

    /// Called once the view is visible.
    fn view_did_appear(&mut self, animated: bool) {
        _ = animated;
    }

    /// Called before the view stops being visible.
    fn view_will_disappear(&mut self, animated: bool) {
        _ = animated;
    }

    /// Called once the view is no longer visible.
    fn view_did_disappear(&mut self, animated: bool) {
        _ = animated;
    }

    /// Returns whether the unit supports the given orientation.
    fn should_autorotate(&self, orientation: Orientation) -> bool {
        _ = orientation;
        true
    }

    /// Called before an orientation change starts.
    fn will_rotate(&mut self, to: Orientation, duration: Duration) {
        _ = (to, duration);
    }

    /// Called inside the host's rotation animation block.
    fn will_animate_rotation(&mut self, to: Orientation, duration: Duration) {
        _ = (to, duration);
    }

    /// Called after an orientation change completed.
    fn did_rotate(&mut self, from: Orientation) {
        _ = from;
    }
}
