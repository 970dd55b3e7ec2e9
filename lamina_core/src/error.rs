// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by stack operations.
//!
//! Only precondition failures the caller must handle are errors. Misuse that
//! hosts commonly commit defensively (re-adding a unit, popping the root,
//! forwarding a hook out of order) is ignored and logged instead.

use crate::animation::AnimationTag;

/// Error returned by structural stack operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    /// A position was outside the valid range for the operation.
    #[error("index {index} out of range for stack of {len} entries")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries at the time of the call.
        len: usize,
    },
    /// An animated operation is still in flight.
    #[error("stack busy: animation {tag:?} has not finished")]
    Busy {
        /// Tag of the in-flight animation.
        tag: AnimationTag,
    },
}
