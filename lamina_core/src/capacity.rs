// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capacity-driven reclamation of buried entries.
//!
//! The [`CapacityPolicy`] decides, from the stack depth alone, which entries
//! are too deep to keep their views. Depth is counted from the top: the top
//! entry has depth 0. With a capacity of `n`, entries at depth `>= n` are
//! reclaimed.
//!
//! While a transition is in flight one extra entry is tolerated, so that the
//! outgoing view is never torn down before its exit animation finishes.
//!
//! Reclaimed entries either have their view unloaded (the unit stays in the
//! stack) or, with [`StackConfig::removing_beyond_capacity`], are dropped from
//! the stack altogether. The root entry is never dropped.
//!
//! [`StackConfig::removing_beyond_capacity`]: crate::config::StackConfig::removing_beyond_capacity

use core::num::NonZeroUsize;
use core::ops::Range;

/// Number of entries whose views are kept at steady state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capacity {
    /// Keep at most this many views.
    Limited(NonZeroUsize),
    /// Never reclaim by depth.
    Unlimited,
}

impl Default for Capacity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Capacity {
    /// Only the top view is kept.
    pub const MINIMAL: Self = Self::Limited(NonZeroUsize::MIN);

    /// The top view and the one directly below it are kept.
    pub const DEFAULT: Self = match NonZeroUsize::new(2) {
        Some(n) => Self::Limited(n),
        None => Self::Unlimited,
    };

    /// No reclamation ever happens.
    pub const UNLIMITED: Self = Self::Unlimited;

    /// Creates a limited capacity, clamping zero to [`MINIMAL`](Self::MINIMAL).
    #[inline]
    #[must_use]
    pub const fn limited(n: usize) -> Self {
        match NonZeroUsize::new(n) {
            Some(n) => Self::Limited(n),
            None => Self::MINIMAL,
        }
    }

    /// Returns the limit, or `None` when unlimited.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Option<usize> {
        match self {
            Self::Limited(n) => Some(n.get()),
            Self::Unlimited => None,
        }
    }
}

/// What to do with the entries a [`CapacityPolicy`] selected.
///
/// Ranges are stack indices (0 = root). At most one of the two is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reclaim {
    /// Entries whose views must be unloaded.
    pub unload: Range<usize>,
    /// Entries that must be dropped from the stack.
    pub remove: Range<usize>,
}

impl Reclaim {
    /// Returns whether nothing needs to be reclaimed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unload.is_empty() && self.remove.is_empty()
    }
}

/// Selects entries beyond capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityPolicy {
    capacity: Capacity,
    removing: bool,
}

impl CapacityPolicy {
    /// Creates a policy for the given capacity.
    ///
    /// With `removing`, reclaimed entries are dropped instead of unloaded.
    #[inline]
    #[must_use]
    pub const fn new(capacity: Capacity, removing: bool) -> Self {
        Self { capacity, removing }
    }

    /// Returns the number of views tolerated for the current phase.
    #[inline]
    #[must_use]
    pub const fn threshold(&self, in_flight: bool) -> Option<usize> {
        match self.capacity.get() {
            Some(n) if in_flight => Some(n + 1),
            other => other,
        }
    }

    /// Plans reclamation for a stack of `len` entries.
    #[must_use]
    pub fn plan(&self, len: usize, in_flight: bool) -> Reclaim {
        let Some(threshold) = self.threshold(in_flight) else {
            return Reclaim::default();
        };
        // Entries below this index are deeper than the threshold.
        let boundary = len.saturating_sub(threshold);
        if self.removing {
            Reclaim {
                unload: 0..0,
                remove: 1.min(boundary)..boundary,
            }
        } else {
            Reclaim {
                unload: 0..boundary,
                remove: 0..0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(Capacity::MINIMAL.get(), Some(1));
        assert_eq!(Capacity::DEFAULT.get(), Some(2));
        assert_eq!(Capacity::UNLIMITED.get(), None);
        assert_eq!(Capacity::limited(0), Capacity::MINIMAL);
        assert_eq!(Capacity::default(), Capacity::DEFAULT);
    }

    #[test]
    fn unloads_everything_deeper_than_capacity() {
        let policy = CapacityPolicy::new(Capacity::DEFAULT, false);
        let plan = policy.plan(5, false);
        assert_eq!(plan.unload, 0..3);
        assert!(plan.remove.is_empty());
    }

    #[test]
    fn tolerates_one_extra_view_in_flight() {
        let policy = CapacityPolicy::new(Capacity::DEFAULT, false);
        assert_eq!(policy.plan(5, true).unload, 0..2);
        assert!(policy.plan(3, true).is_empty());
    }

    #[test]
    fn removal_never_touches_root() {
        let policy = CapacityPolicy::new(Capacity::MINIMAL, true);
        let plan = policy.plan(4, false);
        assert_eq!(plan.remove, 1..3);
        assert!(plan.unload.is_empty());

        // Root plus top: the root would be the only candidate.
        assert!(policy.plan(2, false).remove.is_empty());
    }

    #[test]
    fn shallow_stacks_are_left_alone() {
        let policy = CapacityPolicy::new(Capacity::limited(3), true);
        assert!(policy.plan(0, false).is_empty());
        assert!(policy.plan(3, false).is_empty());
    }

    #[test]
    fn unlimited_never_reclaims() {
        let policy = CapacityPolicy::new(Capacity::UNLIMITED, false);
        assert!(policy.plan(10_000, false).is_empty());
    }
}
