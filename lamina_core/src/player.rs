// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation player contract.
//!
//! Lamina splits container work in two. `lamina_core` owns the content model,
//! lifecycle forwarding, reclamation, and animation descriptions. The host
//! provides an [`AnimationPlayer`] that turns descriptions into motion on a
//! platform-native tree (e.g. `CALayer`s, DOM elements, a retained scene).
//!
//! # Completion
//!
//! The player reports exactly one completion per animated description by
//! calling [`ContainerStack::animation_did_finish`] with the description's
//! [`tag`](AnimationDescription::tag). Non-animated descriptions are complete
//! as soon as [`play`](AnimationPlayer::play) returns; the stack does not wait
//! for them.
//!
//! ```rust,ignore
//! fn on_animation_end(stack: &mut ContainerStack<Screen>, tag: AnimationTag) {
//!     stack.animation_did_finish(tag);
//! }
//! ```
//!
//! [`ContainerStack::animation_did_finish`]: crate::stack::ContainerStack::animation_did_finish

use crate::animation::AnimationDescription;
use crate::unit::UnitId;

/// Plays animation descriptions on the host's display surface.
///
/// Both real players and test doubles implement this trait.
pub trait AnimationPlayer {
    /// Starts playing `animation`.
    ///
    /// Views named in the description that are not yet on the display surface
    /// must be inserted, full-frame, before the first step.
    fn play(&mut self, animation: &AnimationDescription);

    /// Called after the view of `unit` was unloaded or its unit removed.
    ///
    /// The player must drop whatever it holds for that view.
    fn discard_view(&mut self, unit: UnitId) {
        _ = unit;
    }
}

/// An [`AnimationPlayer`] that ignores every description.
///
/// Useful for stacks that are populated before any display exists. Animated
/// transitions still wait for [`animation_did_finish`].
///
/// [`animation_did_finish`]: crate::stack::ContainerStack::animation_did_finish
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPlayer;

impl AnimationPlayer for NoopPlayer {
    fn play(&mut self, animation: &AnimationDescription) {
        _ = animation;
    }
}
