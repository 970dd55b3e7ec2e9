// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios driving a stack with the recording doubles.

use std::time::Duration;

use kurbo::Rect;
use lamina_core::animation::AnimationTag;
use lamina_core::capacity::Capacity;
use lamina_core::config::StackConfig;
use lamina_core::error::StackError;
use lamina_core::forwarding::{PropertyKey, PropertyValue};
use lamina_core::lifecycle::{LifecycleEvent, VisualState};
use lamina_core::stack::ContainerStack;
use lamina_core::surface::{DisplaySurface, SurfaceId};
use lamina_core::transition::{TransitionSpec, TransitionStyle};
use lamina_core::unit::{Orientation, PresentationUnit, UnitId};

use crate::recorder::{
    EventLog, Phase, RecordingDelegate, RecordingPlayer, RecordingUnit, StackEvent,
};

const PORTRAIT: Rect = Rect::new(0.0, 0.0, 320.0, 480.0);
const LANDSCAPE: Rect = Rect::new(0.0, 0.0, 480.0, 320.0);

struct Harness {
    log: EventLog,
    player: RecordingPlayer,
    stack: ContainerStack<RecordingUnit>,
}

impl Harness {
    fn new(config: StackConfig) -> Self {
        let log = EventLog::new();
        let player = RecordingPlayer::new(&log);
        let mut stack = ContainerStack::new(UnitId(0), config, Box::new(player.clone()));
        stack.set_delegate(Some(Box::new(RecordingDelegate::new(&log))));
        Self { log, player, stack }
    }

    fn unit(&self, id: u64) -> RecordingUnit {
        RecordingUnit::new(id, &self.log)
    }

    fn attach(&mut self) {
        self.stack
            .set_display_surface(Some(DisplaySurface::new(SurfaceId(1), PORTRAIT)));
        self.stack.view_will_appear(false);
        self.stack.view_did_appear(false);
    }

    /// Pushes and plays the animation to completion.
    fn push(&mut self, id: u64, spec: TransitionSpec) {
        let unit = self.unit(id);
        self.stack.push(unit, spec).unwrap();
        self.player.finish(&mut self.stack);
    }

    fn pop(&mut self) {
        self.stack.pop().unwrap();
        self.player.finish(&mut self.stack);
    }

    fn notifications(&self) -> Vec<StackEvent> {
        self.log
            .events()
            .into_iter()
            .map(|r| r.event)
            .filter(|e| matches!(e, StackEvent::Show { .. } | StackEvent::Hide { .. }))
            .collect()
    }

    fn did_shows(&self) -> Vec<UnitId> {
        self.notifications()
            .into_iter()
            .filter_map(|e| match e {
                StackEvent::Show {
                    unit,
                    phase: Phase::Did,
                    ..
                } => Some(unit),
                _ => None,
            })
            .collect()
    }

    fn did_hides(&self) -> Vec<UnitId> {
        self.notifications()
            .into_iter()
            .filter_map(|e| match e {
                StackEvent::Hide {
                    unit,
                    phase: Phase::Did,
                    ..
                } => Some(unit),
                _ => None,
            })
            .collect()
    }

    fn states(&self) -> Vec<VisualState> {
        self.stack.entries().iter().map(|e| e.state()).collect()
    }
}

fn slide() -> TransitionSpec {
    TransitionSpec::new(TransitionStyle::PushFromRight)
}

#[test]
fn n_pushes_and_n_pops_restore_the_stack_in_lifo_order() {
    let mut h = Harness::new(StackConfig::new());
    h.push(1, TransitionSpec::NONE);
    h.attach();
    let original = h.stack.ids();
    h.log.take();

    let pushed = [10, 11, 12, 13];
    for id in pushed {
        h.push(id, slide());
    }
    for _ in pushed {
        h.pop();
    }

    assert_eq!(h.stack.ids(), original);
    let shows: Vec<u64> = h.did_shows().iter().map(|u| u.0).collect();
    let hides: Vec<u64> = h.did_hides().iter().map(|u| u.0).collect();
    assert_eq!(shows, [10, 11, 12, 13, 12, 11, 10, 1]);
    assert_eq!(hides, [1, 10, 11, 12, 13, 12, 11, 10]);
}

#[test]
fn show_and_hide_notifications_bracket_the_animation() {
    let mut h = Harness::new(StackConfig::unlimited());
    h.push(1, TransitionSpec::NONE);
    h.attach();
    h.log.take();

    let unit = h.unit(2);
    h.stack.push(unit, slide()).unwrap();
    h.player.finish(&mut h.stack);

    let kinds: Vec<&'static str> = h
        .log
        .take()
        .into_iter()
        .filter_map(|e| match e {
            StackEvent::Show {
                phase: Phase::Will, ..
            } => Some("will_show"),
            StackEvent::Hide {
                phase: Phase::Will, ..
            } => Some("will_hide"),
            StackEvent::Play { .. } => Some("play"),
            StackEvent::Finish { .. } => Some("finish"),
            StackEvent::Show {
                phase: Phase::Did, ..
            } => Some("did_show"),
            StackEvent::Hide {
                phase: Phase::Did, ..
            } => Some("did_hide"),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        ["will_show", "will_hide", "play", "finish", "did_show", "did_hide"]
    );
}

#[test]
fn pop_to_a_deep_unit_plays_one_transition() {
    let mut h = Harness::new(StackConfig::unlimited());
    h.attach();
    for id in 1..=5 {
        h.push(id, slide());
    }
    h.log.take();
    let plays_before = h.player.play_count();

    h.stack.pop_to(Some(UnitId(2))).unwrap();
    h.player.finish(&mut h.stack);

    assert_eq!(h.stack.ids(), [UnitId(1), UnitId(2)]);
    assert_eq!(h.player.play_count(), plays_before + 1);
    assert_eq!(h.did_shows(), [UnitId(2)]);
    assert_eq!(h.did_hides(), [UnitId(5)]);
    let discarded = h
        .log
        .count(|e| matches!(e, StackEvent::Discard { .. }));
    assert_eq!(discarded, 3);
}

#[test]
fn capacity_two_unloads_all_but_the_top_two() {
    let mut h = Harness::new(StackConfig::new().with_capacity(Capacity::limited(2)));
    h.attach();
    for id in 1..=5 {
        h.push(id, slide());
    }

    assert_eq!(
        h.states(),
        [
            VisualState::NotMaterialized,
            VisualState::NotMaterialized,
            VisualState::NotMaterialized,
            VisualState::Disappeared,
            VisualState::Appeared,
        ]
    );
    let ids: Vec<u64> = h.stack.units().iter().map(|u| u.id().0).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5]);
}

#[test]
fn unlimited_capacity_never_unloads() {
    let mut h = Harness::new(StackConfig::unlimited());
    h.attach();
    for id in 1..=12 {
        h.push(id, slide());
    }
    let unloads = h.log.count(|e| {
        matches!(
            e,
            StackEvent::Lifecycle {
                event: LifecycleEvent::Unload,
                ..
            }
        )
    });
    assert_eq!(unloads, 0);
    assert!(h.states().iter().all(|s| s.is_materialized()));
}

#[test]
fn insert_at_the_bottom_is_invisible() {
    let mut h = Harness::new(StackConfig::new());
    h.push(1, TransitionSpec::NONE);
    h.attach();
    h.push(2, slide());
    h.log.take();

    let unit = h.unit(9);
    h.stack.insert(unit, 0, slide()).unwrap();

    assert!(h.log.is_empty());
    assert_eq!(h.stack.root().map(|u| u.id()), Some(UnitId(9)));
    assert!(!h.stack.is_busy());
}

#[test]
fn released_views_return_with_one_show_pair() {
    let mut h = Harness::new(StackConfig::new());
    h.push(1, TransitionSpec::NONE);
    h.attach();
    h.push(2, slide());

    h.stack.view_will_disappear(false);
    h.stack.view_did_disappear(false);
    h.stack.release_views().unwrap();
    assert!(h.states().iter().all(|s| !s.is_materialized()));
    h.log.take();

    h.attach();
    let shows = h
        .log
        .count(|e| matches!(e, StackEvent::Show { .. }));
    assert_eq!(shows, 2);
    assert_eq!(h.did_shows(), [UnitId(2)]);
    assert_eq!(h.stack.state_of(UnitId(2)), Some(VisualState::Appeared));
}

#[test]
fn insert_during_push_is_busy_until_completion() {
    let mut h = Harness::new(StackConfig::new());
    h.push(1, TransitionSpec::NONE);
    h.attach();

    let unit = h.unit(2);
    h.stack.push(unit, slide()).unwrap();
    let tag = h.stack.in_flight_tag().unwrap();

    let early = h.unit(3);
    assert_eq!(
        h.stack.insert(early, 0, slide()),
        Err(StackError::Busy { tag })
    );

    h.stack.animation_did_finish(AnimationTag(tag.0 + 100));
    assert!(h.stack.is_busy());

    h.player.finish(&mut h.stack);
    let late = h.unit(3);
    assert_eq!(h.stack.insert(late, 0, slide()), Ok(()));
    assert_eq!(h.stack.len(), 3);
}

#[test]
fn rotation_resizes_parked_views_and_reaches_the_top() {
    let mut h = Harness::new(StackConfig::unlimited());
    h.push(1, TransitionSpec::NONE);
    h.attach();
    h.push(2, slide());
    h.log.take();

    assert!(h.stack.should_autorotate(Orientation::LandscapeRight));
    let duration = Duration::from_millis(300);
    h.stack.will_rotate(Orientation::LandscapeRight, duration);
    h.stack.set_surface_frame(LANDSCAPE);
    let rotation = h.stack.rotate(duration).unwrap();
    h.stack
        .will_animate_rotation(Orientation::LandscapeRight, duration);
    h.stack.did_rotate(Orientation::Portrait);

    assert!(rotation.resizes_views);
    assert_eq!(rotation.frame, LANDSCAPE);
    assert_eq!(rotation.effects_for(UnitId(1)).count(), 1);
    let hooks = h
        .log
        .count(|e| matches!(e, StackEvent::Rotation { unit: UnitId(2), .. }));
    assert_eq!(hooks, 3);

    let refusing = h.unit(3).with_autorotate(false);
    h.stack.insert(refusing, 0, slide()).unwrap();
    assert!(!h.stack.should_autorotate(Orientation::LandscapeLeft));
}

#[test]
fn forwarded_title_tracks_the_top() {
    fn title(unit: &RecordingUnit) -> Option<PropertyValue> {
        unit.title().map(|t| PropertyValue::Text(t.to_owned()))
    }

    let mut h = Harness::new(StackConfig::new().with_forwarding(true));
    h.stack.properties_mut().register(PropertyKey::Title, title);
    h.attach();
    let inbox = h.unit(1).with_title("Inbox");
    h.stack.push(inbox, TransitionSpec::NONE).unwrap();
    let message = h.unit(2).with_title("Message");
    h.stack.push(message, slide()).unwrap();

    assert_eq!(
        h.stack.forwarded_property(PropertyKey::Title),
        Some(PropertyValue::Text("Message".to_owned()))
    );
    h.player.finish(&mut h.stack);
    h.pop();
    assert_eq!(
        h.stack.forwarded_property(PropertyKey::Title),
        Some(PropertyValue::Text("Inbox".to_owned()))
    );
}
