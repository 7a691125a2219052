use super::*;
use crate::config::{NodeBasedConfig, PanConfig, PinchConfig, RotateConfig};
use crate::error::Error;

fn node(index: usize, x: f32, timestamp_ms: u64, tolerance_ms: u64) -> GestureNode {
    GestureNode::new(
        index,
        NodeShape::Rectangle,
        Vec2::new(x, 20.0),
        Vec2::new(10.0, 10.0),
    )
    .at(timestamp_ms, tolerance_ms)
}

fn sequence(nodes: Vec<GestureNode>) -> Gesture {
    gesture(GestureKindConfig::NodeBased(NodeBasedConfig { nodes }))
}

fn three_nodes() -> Gesture {
    sequence(vec![
        node(0, 20.0, 0, 100).start(),
        node(1, 60.0, 200, 100),
        node(2, 100.0, 400, 100).end(),
    ])
}

fn at(x: f32) -> [TouchPoint; 1] {
    touch(x, 20.0)
}

fn pair(a: (f32, f32), b: (f32, f32)) -> [TouchPoint; 2] {
    [TouchPoint::new(0, a.0, a.1), TouchPoint::new(1, b.0, b.1)]
}

fn node_progress(events: &[GestureEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            GestureEvent::Progress(GestureProgress::Node {
                last_completed_node_index,
            }) => Some(*last_completed_node_index),
            _ => None,
        })
        .collect()
}

#[test]
fn node_sequence_in_order_completes() {
    let mut g = three_nodes();
    let mut events = Vec::new();

    drain(g.on_input(0, &at(20.0)), &mut events);
    drain(g.on_input(100, &at(40.0)), &mut events);
    drain(g.on_input(200, &at(60.0)), &mut events);
    drain(g.on_input(300, &at(80.0)), &mut events);
    drain(g.on_input(400, &at(100.0)), &mut events);

    assert_eq!(node_progress(&events), vec![0, 1, 2]);
    assert_eq!(
        events[events.len() - 3..],
        [
            GestureEvent::Activated,
            GestureEvent::Completed,
            GestureEvent::Ended { completed: true },
        ]
    );
    assert_eq!(g.current_node_index(), Some(2));
    assert!(g.flags().completed);
}

#[test]
fn node_sequence_skipping_a_waypoint_fails() {
    let mut g = sequence(vec![
        node(0, 20.0, 0, 100),
        node(1, 60.0, 200, 200),
        node(2, 100.0, 400, 100),
    ]);
    let mut events = Vec::new();

    drain(g.on_input(0, &at(20.0)), &mut events);
    drain(g.on_input(350, &at(100.0)), &mut events);

    assert_eq!(node_progress(&events), vec![0]);
    assert_eq!(events.last(), Some(&GestureEvent::Ended { completed: false }));
    assert!(!g.flags().completed);
    assert_eq!(g.current_node_index(), None);
}

#[test]
fn node_window_missed_while_in_transit_fails() {
    let mut g = three_nodes();

    g.on_input(0, &at(20.0));
    g.on_input(200, &at(40.0));
    assert!(g.is_active());
    g.on_input(350, &at(45.0));

    assert_eq!(g.phase(), GesturePhase::Failed);
}

#[test]
fn lift_mid_sequence_fails() {
    let mut g = three_nodes();

    g.on_input(0, &at(20.0));
    g.on_input(200, &at(60.0));
    let out = g.on_input(250, LIFTED);

    assert!(out.changed.ended && !out.changed.completed);
}

#[test]
fn sequence_waits_for_first_node() {
    let mut g = three_nodes();

    let out = g.on_input(0, &at(60.0));

    assert!(out.events.is_empty());
    assert_eq!(g.phase(), GesturePhase::Idle);
}

#[test]
fn hold_node_requires_dwell() {
    let mut g = sequence(vec![
        node(0, 20.0, 0, 100),
        node(1, 60.0, 200, 100).hold(300),
        node(2, 100.0, 600, 100),
    ]);
    let mut events = Vec::new();

    drain(g.on_input(0, &at(20.0)), &mut events);
    drain(g.on_input(200, &at(60.0)), &mut events);
    drain(g.on_input(300, &at(61.0)), &mut events);
    assert_eq!(node_progress(&events), vec![0]);
    drain(g.on_input(500, &at(59.0)), &mut events);
    assert_eq!(node_progress(&events), vec![0, 1]);
    drain(g.on_input(600, &at(100.0)), &mut events);

    assert_eq!(node_progress(&events), vec![0, 1, 2]);
    assert!(g.flags().completed);
}

#[test]
fn leaving_hold_node_early_fails() {
    let mut g = sequence(vec![
        node(0, 20.0, 0, 100),
        node(1, 60.0, 200, 100).hold(300),
        node(2, 100.0, 600, 100),
    ]);

    g.on_input(0, &at(20.0));
    g.on_input(200, &at(60.0));
    g.on_input(300, &at(80.0));

    assert_eq!(g.phase(), GesturePhase::Failed);
    assert_eq!(g.current_node_index(), None);
}

#[test]
fn sequence_past_its_deadline_fails_even_mid_dwell() {
    let mut g = sequence(vec![
        node(0, 20.0, 0, 100),
        node(1, 60.0, 200, 100).hold(300),
        node(2, 100.0, 600, 100),
    ]);
    let mut events = Vec::new();

    drain(g.on_input(0, &at(20.0)), &mut events);
    drain(g.on_input(200, &at(60.0)), &mut events);
    drain(g.on_input(750, &at(60.0)), &mut events);

    assert_eq!(node_progress(&events), vec![0]);
    assert_eq!(g.phase(), GesturePhase::Failed);
    assert_eq!(g.current_node_index(), None);
}

#[test]
fn empty_node_sequence_is_rejected() {
    let config = GestureConfig::new(
        region(),
        GestureKindConfig::NodeBased(NodeBasedConfig::default()),
    );

    assert!(matches!(
        Gesture::new(&config),
        Err(Error::EmptyNodeSequence)
    ));
}

#[test]
fn pan_activates_past_threshold_and_completes_on_release() {
    let mut pan = gesture(GestureKindConfig::Pan(PanConfig::default()));
    let mut events = Vec::new();

    drain(pan.on_input(0, &pair((50.0, 50.0), (70.0, 50.0))), &mut events);
    drain(pan.on_input(50, &pair((53.0, 50.0), (73.0, 50.0))), &mut events);
    assert_eq!(pan.phase(), GesturePhase::Started);
    drain(pan.on_input(100, &pair((60.0, 50.0), (80.0, 50.0))), &mut events);
    assert_eq!(pan.tracked_contacts(), &[0, 1]);
    drain(pan.on_input(150, &touch(62.0, 50.0)), &mut events);

    assert_eq!(
        events,
        vec![
            GestureEvent::Started {
                start_position: Vec2::new(60.0, 50.0)
            },
            GestureEvent::Activated,
            GestureEvent::Progress(GestureProgress::Pan {
                delta: Vec2::new(7.0, 0.0),
                total: Vec2::new(10.0, 0.0),
            }),
            GestureEvent::Completed,
            GestureEvent::Ended { completed: true },
        ]
    );
}

#[test]
fn pan_needs_two_contacts() {
    let mut pan = gesture(GestureKindConfig::Pan(PanConfig::default()));

    pan.on_input(0, &touch(50.0, 50.0));
    pan.on_input(50, &touch(90.0, 50.0));

    assert_eq!(pan.phase(), GesturePhase::Idle);
}

#[test]
fn pan_released_before_threshold_fails() {
    let mut pan = gesture(GestureKindConfig::Pan(PanConfig::default()));

    pan.on_input(0, &pair((50.0, 50.0), (70.0, 50.0)));
    pan.on_input(50, LIFTED);

    let flags = pan.flags();
    assert!(flags.ended && !flags.activated && !flags.completed);
}

#[test]
fn pinch_reports_scale() {
    let mut pinch = gesture(GestureKindConfig::Pinch(PinchConfig::default()));

    pinch.on_input(0, &pair((50.0, 50.0), (70.0, 50.0)));
    let out = pinch.on_input(60, &pair((45.0, 50.0), (75.0, 50.0)));

    assert!(out.changed.activated);
    assert!(out.events.contains(|e| matches!(
        e,
        GestureEvent::Progress(GestureProgress::Pinch { scale, .. }) if (scale - 1.5).abs() < 1e-4
    )));
}

#[test]
fn rotate_accumulates_angle() {
    let mut rotate = gesture(GestureKindConfig::Rotate(RotateConfig::default()));
    let turned = 20.0_f32.to_radians();

    rotate.on_input(0, &pair((50.0, 50.0), (70.0, 50.0)));
    let out = rotate.on_input(
        80,
        &pair(
            (50.0, 50.0),
            (50.0 + 20.0 * turned.cos(), 50.0 + 20.0 * turned.sin()),
        ),
    );

    assert!(out.changed.activated);
    assert!(out.events.contains(|e| matches!(
        e,
        GestureEvent::Progress(GestureProgress::Rotate { angle_deg, .. }) if (angle_deg - 20.0).abs() < 0.01
    )));

    rotate.on_input(120, &touch(50.0, 50.0));
    assert_eq!(rotate.phase(), GesturePhase::Completed);
}
