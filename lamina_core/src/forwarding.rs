// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwarding of the top unit's display properties through the host.
//!
//! Hosts that sit inside a larger navigation hierarchy often want the visible
//! child's title or toolbar to show up as their own. Rather than mirroring
//! arbitrary properties, the set of forwardable keys is closed
//! ([`PropertyKey`]) and the host registers one getter per key it supports.

use alloc::string::String;
use alloc::vec::Vec;

/// A property that can be forwarded through the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyKey {
    /// Generic title.
    Title,
    /// Title shown in a navigation bar.
    NavigationTitle,
    /// Title of the back button leading to this unit.
    BackButtonTitle,
    /// Toolbar item labels, newline-separated.
    ToolbarItems,
    /// Whether the toolbar is hidden.
    ToolbarHidden,
}

/// The value of a forwarded property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// Textual value.
    Text(String),
    /// Boolean value.
    Flag(bool),
}

/// Reads a property from a unit, or `None` if the unit does not set it.
pub type PropertyGetter<U> = fn(&U) -> Option<PropertyValue>;

/// Registry of property getters, one per [`PropertyKey`].
pub struct PropertyForwarder<U> {
    getters: Vec<(PropertyKey, PropertyGetter<U>)>,
}

impl<U> core::fmt::Debug for PropertyForwarder<U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.getters.iter().map(|(key, _)| key))
            .finish()
    }
}

impl<U> Default for PropertyForwarder<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> PropertyForwarder<U> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            getters: Vec::new(),
        }
    }

    /// Registers `getter` for `key`, replacing any previous one.
    pub fn register(&mut self, key: PropertyKey, getter: PropertyGetter<U>) {
        match self.getters.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(i) => self.getters[i].1 = getter,
            Err(i) => self.getters.insert(i, (key, getter)),
        }
    }

    /// Removes the getter for `key`.
    pub fn unregister(&mut self, key: PropertyKey) {
        self.getters.retain(|(k, _)| *k != key);
    }

    /// Returns whether a getter is registered for `key`.
    #[must_use]
    pub fn is_registered(&self, key: PropertyKey) -> bool {
        self.getters.iter().any(|(k, _)| *k == key)
    }

    /// Reads `key` from `unit`.
    #[must_use]
    pub fn get(&self, unit: &U, key: PropertyKey) -> Option<PropertyValue> {
        self.getters
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, getter)| getter(unit))
    }

    /// Reads every registered key from `unit`, in key order.
    #[must_use]
    pub fn snapshot(&self, unit: &U) -> Vec<(PropertyKey, PropertyValue)> {
        self.getters
            .iter()
            .filter_map(|(key, getter)| getter(unit).map(|v| (*key, v)))
            .collect()
    }
}
