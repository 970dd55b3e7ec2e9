// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-slot stack content.

use crate::lifecycle::VisualState;
use crate::transition::{Placement, TransitionSpec};
use crate::unit::{PresentationUnit, UnitId};

/// One slot of a [`ContainerStack`](crate::stack::ContainerStack).
///
/// The entry owns its unit from the moment it is added until it is removed,
/// at which point the unit is dropped. Only the stack mutates entries, and it
/// changes [`state`](Self::state) exclusively through
/// [`lifecycle::forward`](crate::lifecycle::forward).
#[derive(Debug)]
pub struct ContentEntry<U> {
    pub(crate) unit: U,
    pub(crate) state: VisualState,
    pub(crate) transition: TransitionSpec,
    pub(crate) added_animated: bool,
    pub(crate) placement: Placement,
}

impl<U: PresentationUnit> ContentEntry<U> {
    pub(crate) fn new(unit: U, transition: TransitionSpec, added_animated: bool) -> Self {
        Self {
            unit,
            state: VisualState::NotMaterialized,
            transition,
            added_animated,
            placement: Placement::IDENTITY,
        }
    }

    /// Returns the id of the managed unit.
    #[inline]
    #[must_use]
    pub fn id(&self) -> UnitId {
        self.unit.id()
    }
}

impl<U> ContentEntry<U> {
    /// Returns the managed unit.
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &U {
        &self.unit
    }

    /// Returns the current visual state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// Returns the transition the entry was added with.
    #[inline]
    #[must_use]
    pub fn transition(&self) -> TransitionSpec {
        self.transition
    }

    /// Returns whether the insertion of this entry was animated.
    #[inline]
    #[must_use]
    pub fn added_animated(&self) -> bool {
        self.added_animated
    }

    /// Returns where the entry's view currently rests.
    #[inline]
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Consumes the entry, returning the unit.
    #[inline]
    #[must_use]
    pub fn into_unit(self) -> U {
        self.unit
    }
}
