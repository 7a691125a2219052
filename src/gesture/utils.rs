use super::types::SwipeDirection;
use crate::geometry::Vec2;

// Half of one compass bucket.
const AXIS_HALF_SPAN_DEG: f32 = 22.5;
// Angles this close to a bucket boundary resolve to the axis-aligned bucket.
pub(crate) const DIRECTION_TIE_TOLERANCE_DEG: f32 = 0.01;

/// Nearest of the eight compass buckets for a displacement, with +y down.
pub(crate) fn classify_direction(delta: Vec2) -> SwipeDirection {
    let angle = normalize_deg(delta.angle_deg());
    let axis_index = ((angle / 90.0).round() as i32).rem_euclid(4);
    let axis_angle = axis_index as f32 * 90.0;
    let from_axis = wrap_deg(angle - axis_angle);

    if from_axis.abs() <= AXIS_HALF_SPAN_DEG + DIRECTION_TIE_TOLERANCE_DEG {
        return match axis_index {
            0 => SwipeDirection::Right,
            1 => SwipeDirection::Down,
            2 => SwipeDirection::Left,
            _ => SwipeDirection::Up,
        };
    }

    let diagonal_index = ((angle - 45.0) / 90.0).round() as i32;
    match diagonal_index.rem_euclid(4) {
        0 => SwipeDirection::DownRight,
        1 => SwipeDirection::DownLeft,
        2 => SwipeDirection::UpLeft,
        _ => SwipeDirection::UpRight,
    }
}

/// Angle in [0, 360).
pub(crate) fn normalize_deg(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Angle difference in (-180, 180].
pub(crate) fn wrap_deg(angle: f32) -> f32 {
    let wrapped = normalize_deg(angle);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
