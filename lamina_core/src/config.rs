// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack configuration.

use crate::capacity::Capacity;

/// Configuration for a [`ContainerStack`](crate::stack::ContainerStack).
///
/// Capacity settings are fixed at construction time; forwarding can be
/// toggled later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackConfig {
    /// How many views are kept at steady state.
    pub capacity: Capacity,
    /// Drop entries beyond capacity instead of unloading their views.
    pub removing_beyond_capacity: bool,
    /// Expose the top unit's properties through the host.
    pub forwarding_properties: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StackConfig {
    /// [`Capacity::DEFAULT`], unloading, not forwarding.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: Capacity::DEFAULT,
            removing_beyond_capacity: false,
            forwarding_properties: false,
        }
    }

    /// Keeps only the top view; deeper entries are dropped.
    ///
    /// Suited to containers where returning to a buried unit is rare and
    /// units are cheap to rebuild.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            capacity: Capacity::MINIMAL,
            removing_beyond_capacity: true,
            forwarding_properties: false,
        }
    }

    /// Never reclaims anything.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            capacity: Capacity::UNLIMITED,
            removing_beyond_capacity: false,
            forwarding_properties: false,
        }
    }

    /// Sets the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets whether entries beyond capacity are dropped.
    #[must_use]
    pub const fn with_removing(mut self, removing: bool) -> Self {
        self.removing_beyond_capacity = removing;
        self
    }

    /// Sets whether the top unit's properties are forwarded.
    #[must_use]
    pub const fn with_forwarding(mut self, forwarding: bool) -> Self {
        self.forwarding_properties = forwarding;
        self
    }
}
