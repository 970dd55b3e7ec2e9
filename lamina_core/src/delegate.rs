// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Show/hide notifications for an external observer.
//!
//! A [`StackDelegate`] hears about every change of the visible top. For each
//! change the stack emits, in order:
//!
//! ```text
//!   will_show(new) ─► will_hide(old) ─► [animation plays] ─► did_show(new) ─► did_hide(old)
//! ```
//!
//! `did_*` calls always follow the completion of the corresponding animation.
//! All methods default to no-ops.

use crate::unit::PresentationUnit;

/// Receives show/hide notifications from a stack.
pub trait StackDelegate<U: PresentationUnit> {
    /// Called before `unit` becomes the visible top.
    fn will_show(&mut self, unit: &U, animated: bool) {
        _ = (unit, animated);
    }

    /// Called once `unit` is the visible top.
    fn did_show(&mut self, unit: &U, animated: bool) {
        _ = (unit, animated);
    }

    /// Called before `unit` stops being visible.
    fn will_hide(&mut self, unit: &U, animated: bool) {
        _ = (unit, animated);
    }

    /// Called once `unit` is no longer visible.
    fn did_hide(&mut self, unit: &U, animated: bool) {
        _ = (unit, animated);
    }
}

/// A [`StackDelegate`] that discards all notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDelegate;

impl<U: PresentationUnit> StackDelegate<U> for NoopDelegate {}
