//! Geometry helpers for landmark computations.

use crate::constants::EPSILON;
use crate::landmarks::Point2;
use std::f32::consts::PI;

/// Angle at `joint` between the segments towards `prev` and `next`, in radians
///
/// A straight chain gives π, a chain folded back onto itself gives 0.
/// Returns `None` if either segment has (near) zero length.
pub fn joint_angle(prev: Point2, joint: Point2, next: Point2) -> Option<f32> {
    let to_prev = prev.to_vector() - joint.to_vector();
    let to_next = next.to_vector() - joint.to_vector();

    let norms = to_prev.norm() * to_next.norm();
    if norms < EPSILON {
        return None;
    }

    let cos = (to_prev.dot(&to_next) / norms).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Bend of one joint mapped to [0, 1]: 0 for straight, 1 for fully folded
pub fn joint_bend(prev: Point2, joint: Point2, next: Point2) -> f32 {
    joint_angle(prev, joint, next).map_or(0.0, |angle| ((PI - angle) / PI).max(0.0))
}

/// Mean of a slice, 0 for an empty slice
#[allow(clippy::cast_precision_loss)] // Slice lengths here are tiny
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Clamp to [0, 1], mapping NaN to 0
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_angle_straight_and_folded() {
        let straight = joint_angle(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(0.0, 2.0)).unwrap();
        assert!((straight - PI).abs() < 1e-3);

        let folded = joint_angle(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(0.0, 0.0)).unwrap();
        assert!(folded.abs() < 1e-3);

        let right = joint_angle(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(1.0, 1.0)).unwrap();
        assert!((right - PI / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_joint_angle_degenerate_segment() {
        let p = Point2::new(0.3, 0.3);
        assert!(joint_angle(p, p, Point2::new(0.5, 0.5)).is_none());
        assert_eq!(joint_bend(p, p, Point2::new(0.5, 0.5)), 0.0);
    }

    #[test]
    fn test_joint_bend_range() {
        let bend = joint_bend(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(1.0, 1.0));
        assert!((bend - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_mean_and_clamp() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-6);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.5), 0.0);
    }
}
