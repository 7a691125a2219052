use super::*;
use crate::config::{HoldConfig, SwipeConfig, TapConfig};

const LIFTED: &[TouchPoint] = &[];

fn region() -> Area {
    Area::from_origin(0.0, 0.0, 200.0, 200.0)
}

fn gesture(kind: GestureKindConfig) -> Gesture {
    Gesture::new(&GestureConfig::new(region(), kind)).expect("valid gesture config")
}

fn touch(x: f32, y: f32) -> [TouchPoint; 1] {
    [TouchPoint::new(0, x, y)]
}

fn drain(output: GestureOutput, out: &mut Vec<GestureEvent>) {
    out.extend(output.events.iter().copied());
}

fn swipe_gesture() -> Gesture {
    gesture(GestureKindConfig::Swipe(SwipeConfig {
        threshold: Vec2::new(20.0, 20.0),
        deadline_ms: 1_000,
    }))
}

#[test]
fn tap_completes_on_quick_lift() {
    let mut tap = gesture(GestureKindConfig::Tap(TapConfig::default()));
    let mut events = Vec::new();

    drain(tap.on_input(0, &touch(10.0, 10.0)), &mut events);
    drain(tap.on_input(50, &touch(11.0, 10.5)), &mut events);
    drain(tap.on_input(120, LIFTED), &mut events);

    assert_eq!(
        events,
        vec![
            GestureEvent::Started {
                start_position: Vec2::new(10.0, 10.0)
            },
            GestureEvent::Activated,
            GestureEvent::Completed,
            GestureEvent::Ended { completed: true },
        ]
    );
    assert_eq!(tap.phase(), GesturePhase::Completed);
}

#[test]
fn tap_moving_beyond_threshold_fails() {
    let mut tap = gesture(GestureKindConfig::Tap(TapConfig::default()));

    tap.on_input(0, &touch(10.0, 10.0));
    let out = tap.on_input(40, &touch(20.0, 10.0));

    assert!(out.changed.ended);
    assert!(!out.changed.completed);
    let flags = tap.flags();
    assert!(flags.ended && !flags.completed && !flags.activated);
}

#[test]
fn deadline_expiry_on_late_frame_ends_without_completing() {
    let config = TapConfig {
        deadline_ms: 500,
        ..TapConfig::default()
    };

    let mut held = gesture(GestureKindConfig::Tap(config));
    held.on_input(0, &touch(10.0, 10.0));
    let out = held.on_input(600, &touch(10.0, 10.0));
    assert_eq!(out.events.iter().copied().collect::<Vec<_>>(), vec![
        GestureEvent::Ended { completed: false }
    ]);

    // A lift that only arrives after the deadline does not rescue the tap.
    let mut lifted_late = gesture(GestureKindConfig::Tap(config));
    lifted_late.on_input(0, &touch(10.0, 10.0));
    lifted_late.on_input(600, LIFTED);
    assert_eq!(lifted_late.phase(), GesturePhase::Failed);
}

#[test]
fn end_is_idempotent() {
    let mut tap = gesture(GestureKindConfig::Tap(TapConfig::default()));
    tap.on_input(0, &touch(10.0, 10.0));

    let first = tap.end();
    let second = tap.end();

    assert!(first.changed.ended);
    assert_eq!(first.events.len(), 1);
    assert!(first
        .events
        .contains(|e| matches!(e, GestureEvent::Ended { completed: false })));
    assert_eq!(second, GestureOutput::default());
    assert!(tap.tracked_contacts().is_empty());
}

#[test]
fn end_on_idle_gesture_ends_it_once() {
    let mut hold = gesture(GestureKindConfig::Hold(HoldConfig::default()));

    let out = hold.end();

    assert!(out.changed.ended && !out.changed.started);
    assert_eq!(hold.phase(), GesturePhase::Failed);
    assert_eq!(hold.end(), GestureOutput::default());
}

#[test]
fn terminal_flags_clear_on_next_input() {
    let mut tap = gesture(GestureKindConfig::Tap(TapConfig::default()));
    tap.on_input(0, &touch(10.0, 10.0));
    tap.on_input(100, LIFTED);
    assert!(tap.flags().completed);

    let out = tap.on_input(200, LIFTED);

    assert!(!out.changed.any());
    assert_eq!(tap.phase(), GesturePhase::Idle);
}

#[test]
fn spent_contact_does_not_restart_until_lifted() {
    let mut tap = gesture(GestureKindConfig::Tap(TapConfig::default()));
    tap.on_input(0, &touch(10.0, 10.0));
    tap.on_input(40, &touch(30.0, 10.0));
    assert_eq!(tap.phase(), GesturePhase::Failed);

    let still_down = tap.on_input(80, &touch(30.0, 10.0));
    assert!(still_down.events.is_empty());
    assert_eq!(tap.phase(), GesturePhase::Idle);

    tap.on_input(120, LIFTED);
    let again = tap.on_input(160, &touch(30.0, 10.0));
    assert!(again.changed.started);
}

#[test]
fn finger_down_when_tap_ends_is_not_claimed() {
    let mut tap = gesture(GestureKindConfig::Tap(TapConfig::default()));
    let first = TouchPoint::new(0, 10.0, 10.0);
    let second = TouchPoint::new(1, 60.0, 60.0);
    tap.on_input(0, &[first]);
    tap.on_input(20, &[first, second]);

    let lifted = tap.on_input(60, &[second]);
    assert!(lifted.changed.completed);

    let still_down = tap.on_input(100, &[second]);
    assert!(!still_down.changed.started);
    assert!(tap.tracked_contacts().is_empty());

    tap.on_input(140, LIFTED);
    let again = tap.on_input(180, &[TouchPoint::new(2, 60.0, 60.0)]);
    assert!(again.changed.started);
}

#[test]
fn hold_activates_after_duration_and_completes_on_lift() {
    let mut hold = gesture(GestureKindConfig::Hold(HoldConfig::default()));
    let mut events = Vec::new();

    drain(hold.on_input(0, &touch(50.0, 50.0)), &mut events);
    drain(hold.on_input(300, &touch(50.5, 50.0)), &mut events);
    assert!(!hold.flags().activated);
    drain(hold.on_input(720, &touch(51.0, 50.0)), &mut events);
    assert_eq!(hold.phase(), GesturePhase::Activated);
    drain(hold.on_input(900, &touch(80.0, 50.0)), &mut events);
    drain(hold.on_input(950, LIFTED), &mut events);

    assert_eq!(
        events,
        vec![
            GestureEvent::Started {
                start_position: Vec2::new(50.0, 50.0)
            },
            GestureEvent::Activated,
            GestureEvent::Completed,
            GestureEvent::Ended { completed: true },
        ]
    );
}

#[test]
fn hold_released_early_fails() {
    let mut hold = gesture(GestureKindConfig::Hold(HoldConfig::default()));
    hold.on_input(0, &touch(50.0, 50.0));

    let out = hold.on_input(400, LIFTED);

    assert!(out.changed.ended);
    assert!(!hold.flags().activated);
}

#[test]
fn hold_moving_before_activation_fails() {
    let mut hold = gesture(GestureKindConfig::Hold(HoldConfig::default()));
    hold.on_input(0, &touch(50.0, 50.0));

    let out = hold.on_input(300, &touch(55.0, 50.0));

    assert!(out.changed.ended);
    assert!(!hold.flags().activated);
    assert!(!hold.flags().completed);
    assert_eq!(hold.phase(), GesturePhase::Failed);
}

#[test]
fn swipe_right_is_recognised() {
    let mut swipe = swipe_gesture();
    let mut events = Vec::new();

    drain(swipe.on_input(0, &touch(10.0, 100.0)), &mut events);
    drain(swipe.on_input(60, &touch(25.0, 100.0)), &mut events);
    drain(swipe.on_input(120, &touch(60.0, 100.0)), &mut events);

    assert_eq!(
        events,
        vec![
            GestureEvent::Started {
                start_position: Vec2::new(10.0, 100.0)
            },
            GestureEvent::Activated,
            GestureEvent::Swiped {
                direction: SwipeDirection::Right
            },
            GestureEvent::Completed,
            GestureEvent::Ended { completed: true },
        ]
    );
    assert_eq!(swipe.swipe_direction(), Some(SwipeDirection::Right));
}

#[test]
fn swipe_on_exact_diagonal_is_down_right() {
    let mut swipe = swipe_gesture();

    swipe.on_input(0, &touch(10.0, 10.0));
    swipe.on_input(100, &touch(45.0, 45.0));

    assert!(swipe.flags().completed);
    assert_eq!(swipe.swipe_direction(), Some(SwipeDirection::DownRight));
}

#[test]
fn swipe_lifted_short_fails() {
    let mut swipe = swipe_gesture();

    swipe.on_input(0, &touch(10.0, 10.0));
    swipe.on_input(50, &touch(20.0, 10.0));
    swipe.on_input(90, LIFTED);

    assert_eq!(swipe.phase(), GesturePhase::Failed);
    assert_eq!(swipe.swipe_direction(), None);
}

#[test]
fn swipe_after_deadline_fails() {
    let mut swipe = swipe_gesture();

    swipe.on_input(0, &touch(10.0, 10.0));
    swipe.on_input(1_100, &touch(90.0, 10.0));

    assert_eq!(swipe.phase(), GesturePhase::Failed);
}

#[test]
fn completion_always_implies_activation_and_end() {
    let mut gestures = [
        gesture(GestureKindConfig::Tap(TapConfig::default())),
        gesture(GestureKindConfig::Hold(HoldConfig::default())),
        swipe_gesture(),
    ];
    let frames = [
        (0, touch(10.0, 10.0).to_vec()),
        (100, touch(10.0, 10.0).to_vec()),
        (800, touch(40.0, 10.0).to_vec()),
        (850, Vec::new()),
    ];

    for g in &mut gestures {
        for (now_ms, points) in &frames {
            g.on_input(*now_ms, points);
            let flags = g.flags();
            if flags.completed {
                assert!(flags.activated && flags.ended);
            }
        }
    }
}

#[cfg(test)]
mod part2;
