use super::*;

fn area(x: f32, y: f32, w: f32, h: f32) -> Area {
    Area::from_origin(x, y, w, h)
}

#[test]
fn edges_follow_center_and_half_extent() {
    let a = Area::new(Vec2::new(50.0, 40.0), 20.0, 10.0);
    assert_eq!(a.left(), 40.0);
    assert_eq!(a.right(), 60.0);
    assert_eq!(a.top(), 35.0);
    assert_eq!(a.bottom(), 45.0);
}

#[test]
fn containment_is_closed_on_every_edge() {
    let a = area(0.0, 0.0, 100.0, 50.0);
    assert!(a.contains(Vec2::new(0.0, 0.0)));
    assert!(a.contains(Vec2::new(100.0, 50.0)));
    assert!(a.contains(Vec2::new(100.0, 10.0)));
    assert!(a.contains(Vec2::new(30.0, 50.0)));
    assert!(!a.contains(Vec2::new(100.01, 10.0)));
    assert!(!a.contains(Vec2::new(30.0, -0.01)));
}

#[test]
fn rotated_area_tests_in_its_own_frame() {
    // A 40x4 bar turned upright covers a vertical strip instead.
    let bar = Area::new(Vec2::new(0.0, 0.0), 40.0, 4.0).with_rotation(90.0);
    assert!(bar.contains(Vec2::new(0.0, 15.0)));
    assert!(bar.contains(Vec2::new(1.5, -19.0)));
    assert!(!bar.contains(Vec2::new(15.0, 0.0)));
}

#[test]
fn local_coordinates_start_at_top_left() {
    let a = area(10.0, 20.0, 30.0, 30.0);
    let local = a.to_local(Vec2::new(15.0, 45.0));
    assert_eq!(local, Vec2::new(5.0, 25.0));
}

#[test]
fn degenerate_areas_are_invalid() {
    assert!(!area(0.0, 0.0, 0.0, 10.0).is_valid());
    assert!(!area(0.0, 0.0, 10.0, -1.0).is_valid());
    assert!(!Area::new(Vec2::new(f32::NAN, 0.0), 1.0, 1.0).is_valid());
    assert!(area(0.0, 0.0, 1.0, 1.0).is_valid());
}

#[test]
fn threshold_exceeded_per_axis() {
    let threshold = Vec2::new(20.0, 20.0);
    assert!(Vec2::new(20.5, 0.0).exceeds(threshold));
    assert!(Vec2::new(0.0, -21.0).exceeds(threshold));
    assert!(!Vec2::new(20.0, 19.0).exceeds(threshold));
}

#[test]
fn angle_uses_screen_orientation() {
    assert!((Vec2::new(1.0, 1.0).angle_deg() - 45.0).abs() < 1e-4);
    assert!((Vec2::new(0.0, -1.0).angle_deg() + 90.0).abs() < 1e-4);
}
