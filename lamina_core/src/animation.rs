// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative animation descriptions.
//!
//! The stack never animates anything itself. For every transition it builds
//! an [`AnimationDescription`]: an ordered list of [`AnimationStep`]s, each
//! moving a set of views between two [`ViewPose`]s, plus playback settings.
//! An [`AnimationPlayer`](crate::player::AnimationPlayer) interpolates it.
//!
//! The builders in this module are pure: they read participant placements
//! and the container frame, and never touch entry state. The stack copies
//! [`ViewEffect::settles_at`] back into its entries once it schedules the
//! description.
//!
//! # Step layout
//!
//! ```text
//!   setup       (duration 0)   appearing view placed at its start pose
//!   transition  (spec duration, 0 if not animated)
//!                              every participant moved to its end pose
//! ```
//!
//! Rotation descriptions have a single step that re-resolves off-surface
//! placements against the new frame.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Rect, Size};

use crate::transition::{Placement, TransitionSpec, ViewPose};
use crate::unit::UnitId;

/// Identifies one scheduled animation.
///
/// The player reports completion with the tag of the description it played.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AnimationTag(pub u64);

impl fmt::Debug for AnimationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationTag({})", self.0)
    }
}

/// The structural change an animation accompanies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// A view is added on top (push, or insert at the top).
    Push,
    /// The top view is removed (pop, pop-to, or removal of the top).
    Pop,
    /// The container frame changed.
    Rotate,
}

/// One view's movement inside a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewEffect {
    /// The unit whose view moves.
    pub unit: UnitId,
    /// Pose at the start of the step.
    pub from: ViewPose,
    /// Pose at the end of the step.
    pub to: ViewPose,
    /// Frame-relative placement the view rests at once the step ends.
    pub settles_at: Placement,
}

/// A group of effects played together.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationStep {
    /// How long the step takes.
    pub duration: Duration,
    /// Effects applied during the step.
    pub effects: Vec<ViewEffect>,
}

/// A complete animation, ready to be handed to a player.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDescription {
    /// Tag used to report completion.
    pub tag: AnimationTag,
    /// What the animation accompanies.
    pub kind: OperationKind,
    /// Container frame every view is laid out in.
    pub frame: Rect,
    /// Steps, in playback order.
    pub steps: Vec<AnimationStep>,
    /// Participating views, back to front.
    pub z_order: Vec<UnitId>,
    /// Whether playback takes any time at all.
    pub animated: bool,
    /// Whether user interaction is blocked during playback.
    pub locks_interaction: bool,
    /// Whether views are resized to fill [`frame`](Self::frame).
    pub resizes_views: bool,
    /// Whether views are raised in [`z_order`](Self::z_order) before playing.
    pub brings_to_front: bool,
}

impl AnimationDescription {
    /// Returns the total playback time.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Returns every effect touching `unit`, in playback order.
    pub fn effects_for(&self, unit: UnitId) -> impl Iterator<Item = &ViewEffect> + '_ {
        self.steps
            .iter()
            .flat_map(|s| s.effects.iter())
            .filter(move |e| e.unit == unit)
    }

    /// Returns whether the description moves nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|s| s.effects.is_empty())
    }
}

/// A view taking part in a transition, with the placement it currently has.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Participant {
    /// The participating unit.
    pub unit: UnitId,
    /// Where its view rests before the transition.
    pub placement: Placement,
}

/// Builds the description for a push, pop, or equivalent top change.
///
/// `outgoing` is the view that stops being the top, `incoming` the one that
/// becomes the top. For [`OperationKind::Push`], `spec` is the transition of
/// the incoming entry; for [`OperationKind::Pop`], that of the outgoing one,
/// replayed in reverse.
#[must_use]
pub fn build_transition(
    tag: AnimationTag,
    kind: OperationKind,
    outgoing: Option<Participant>,
    incoming: Option<Participant>,
    spec: TransitionSpec,
    frame: Rect,
) -> AnimationDescription {
    let size = frame.size();
    let style = spec.style;

    // (participant, start, end), back to front.
    let mut moves: Vec<(Participant, Placement, Placement)> = Vec::with_capacity(2);
    match kind {
        OperationKind::Push => {
            if let Some(out) = outgoing {
                moves.push((out, out.placement, style.disappearing_to()));
            }
            if let Some(inc) = incoming {
                moves.push((inc, style.appearing_from(), Placement::IDENTITY));
            }
        }
        OperationKind::Pop | OperationKind::Rotate => {
            if let Some(inc) = incoming {
                moves.push((inc, inc.placement, Placement::IDENTITY));
            }
            if let Some(out) = outgoing {
                moves.push((out, out.placement, style.appearing_from()));
            }
        }
    }

    let mut steps = Vec::with_capacity(2);
    if let Some(inc) = incoming {
        let start = moves
            .iter()
            .find(|(p, ..)| p.unit == inc.unit)
            .map_or(inc.placement, |(_, start, _)| *start);
        steps.push(AnimationStep {
            duration: Duration::ZERO,
            effects: vec![effect(inc.unit, start, start, size)],
        });
    }

    let animated = spec.is_animated();
    steps.push(AnimationStep {
        duration: if animated { spec.duration } else { Duration::ZERO },
        effects: moves
            .iter()
            .filter(|(_, start, end)| start != end)
            .map(|(p, start, end)| effect(p.unit, *start, *end, size))
            .collect(),
    });

    AnimationDescription {
        tag,
        kind,
        frame,
        steps,
        z_order: moves.iter().map(|(p, ..)| p.unit).collect(),
        animated,
        locks_interaction: true,
        resizes_views: false,
        brings_to_front: true,
    }
}

/// Builds the description repositioning off-surface views after the
/// container frame changed from `old_frame` to `new_frame`.
///
/// `views` lists every materialized entry, back to front. Entries resting
/// inside the frame are left alone.
#[must_use]
pub fn build_rotation(
    tag: AnimationTag,
    views: &[Participant],
    old_frame: Rect,
    new_frame: Rect,
    duration: Duration,
) -> AnimationDescription {
    let old_size = old_frame.size();
    let new_size = new_frame.size();
    let effects: Vec<ViewEffect> = views
        .iter()
        .filter(|p| p.placement.is_off_surface())
        .map(|p| ViewEffect {
            unit: p.unit,
            from: p.placement.resolve(old_size),
            to: p.placement.resolve(new_size),
            settles_at: p.placement,
        })
        .collect();

    AnimationDescription {
        tag,
        kind: OperationKind::Rotate,
        frame: new_frame,
        steps: vec![AnimationStep { duration, effects }],
        z_order: views.iter().map(|p| p.unit).collect(),
        animated: !duration.is_zero(),
        locks_interaction: true,
        resizes_views: true,
        brings_to_front: true,
    }
}

fn effect(unit: UnitId, start: Placement, end: Placement, size: Size) -> ViewEffect {
    ViewEffect {
        unit,
        from: start.resolve(size),
        to: end.resolve(size),
        settles_at: end,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;
    use crate::transition::TransitionStyle;

    const FRAME: Rect = Rect::new(0.0, 0.0, 320.0, 480.0);

    fn at_rest(id: u64) -> Participant {
        Participant {
            unit: UnitId(id),
            placement: Placement::IDENTITY,
        }
    }

    #[test]
    fn push_from_right_slides_both_views() {
        let desc = build_transition(
            AnimationTag(1),
            OperationKind::Push,
            Some(at_rest(1)),
            Some(at_rest(2)),
            TransitionSpec::new(TransitionStyle::PushFromRight),
            FRAME,
        );
        assert!(desc.animated);
        assert!(!desc.resizes_views);
        assert!(desc.locks_interaction);
        assert_eq!(desc.steps.len(), 2);
        assert_eq!(desc.steps[0].duration, Duration::ZERO);
        assert_eq!(desc.z_order, [UnitId(1), UnitId(2)]);

        let incoming: Vec<_> = desc.effects_for(UnitId(2)).collect();
        assert_eq!(incoming.len(), 2, "setup plus transition");
        assert_eq!(incoming[0].to.offset, Vec2::new(320.0, 0.0));
        assert_eq!(incoming[1].to.offset, Vec2::ZERO);

        let outgoing: Vec<_> = desc.effects_for(UnitId(1)).collect();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].to.offset, Vec2::new(-320.0, 0.0));
        assert_eq!(outgoing[0].settles_at, Placement::shifted(-1.0, 0.0));
    }

    #[test]
    fn pop_replays_push_in_reverse() {
        let spec = TransitionSpec::new(TransitionStyle::PushFromBottom);
        let revealed = Participant {
            unit: UnitId(1),
            placement: TransitionStyle::PushFromBottom.disappearing_to(),
        };
        let desc = build_transition(
            AnimationTag(2),
            OperationKind::Pop,
            Some(at_rest(2)),
            Some(revealed),
            spec,
            FRAME,
        );
        assert_eq!(desc.z_order, [UnitId(1), UnitId(2)], "removed view stays in front");

        let removed: Vec<_> = desc.effects_for(UnitId(2)).collect();
        assert_eq!(removed[0].to.offset, Vec2::new(0.0, 480.0));

        let back: Vec<_> = desc.effects_for(UnitId(1)).collect();
        assert_eq!(back[0].from.offset, Vec2::new(0.0, -480.0), "setup keeps current pose");
        assert_eq!(back[1].settles_at, Placement::IDENTITY);
    }

    #[test]
    fn cover_leaves_covered_view_untouched() {
        let desc = build_transition(
            AnimationTag(3),
            OperationKind::Push,
            Some(at_rest(1)),
            Some(at_rest(2)),
            TransitionSpec::new(TransitionStyle::CoverFromBottom),
            FRAME,
        );
        assert_eq!(desc.effects_for(UnitId(1)).count(), 0);
    }

    #[test]
    fn non_animated_transition_has_zero_duration() {
        let desc = build_transition(
            AnimationTag(4),
            OperationKind::Push,
            None,
            Some(at_rest(1)),
            TransitionSpec::NONE,
            FRAME,
        );
        assert!(!desc.animated);
        assert_eq!(desc.duration(), Duration::ZERO);
        assert!(desc.steps[1].effects.is_empty());
    }

    #[test]
    fn removing_last_view_has_no_setup_step() {
        let desc = build_transition(
            AnimationTag(5),
            OperationKind::Pop,
            Some(at_rest(1)),
            None,
            TransitionSpec::new(TransitionStyle::CrossDissolve),
            FRAME,
        );
        assert_eq!(desc.steps.len(), 1);
        assert_eq!(desc.steps[0].effects[0].to.alpha, 0.0);
    }

    #[test]
    fn rotation_only_moves_off_surface_views() {
        let views = [
            Participant {
                unit: UnitId(1),
                placement: Placement::shifted(-1.0, 0.0),
            },
            Participant {
                unit: UnitId(2),
                placement: Placement::faded(0.0),
            },
            at_rest(3),
        ];
        let landscape = Rect::new(0.0, 0.0, 480.0, 320.0);
        let desc = build_rotation(
            AnimationTag(6),
            &views,
            FRAME,
            landscape,
            Duration::from_millis(300),
        );
        assert!(desc.resizes_views);
        assert_eq!(desc.kind, OperationKind::Rotate);
        assert_eq!(desc.steps.len(), 1);
        let effects = &desc.steps[0].effects;
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].from.offset, Vec2::new(-320.0, 0.0));
        assert_eq!(effects[0].to.offset, Vec2::new(-480.0, 0.0));
        assert_eq!(desc.frame, landscape);
    }
}
