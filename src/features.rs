//! Geometric hand features computed from one smoothed hand pose.

use crate::constants::{FINGER_CHAINS, INDEX_TIP, NEUTRAL_PINCH_DISTANCE, THUMB_MCP, THUMB_TIP, WRIST};
use crate::landmarks::{HandObservation, Point2};
use crate::utils::{clamp_unit, joint_bend, mean};
use serde::{Deserialize, Serialize};

/// Finger order used by the per-finger arrays
pub const THUMB: usize = 0;
pub const INDEX: usize = 1;
pub const MIDDLE: usize = 2;
pub const RING: usize = 3;
pub const PINKY: usize = 4;

/// Shape features of one hand in one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureFeatures {
    /// Thumb tip to index tip distance in normalized space
    pub pinch_distance: f32,
    /// Mean curl of the four non-thumb fingers (0.0-1.0)
    pub grab_strength: f32,
    /// Per-finger curl, thumb first (0.0-1.0)
    pub finger_curls: [f32; 5],
    /// Per-finger extension, thumb first (0.0-1.0)
    pub finger_extensions: [f32; 5],
    /// Mean of the five extensions
    pub hand_openness: f32,
}

impl GestureFeatures {
    /// Features reported for a hand without a full landmark set
    pub const fn neutral() -> Self {
        Self {
            pinch_distance: NEUTRAL_PINCH_DISTANCE,
            grab_strength: 0.0,
            finger_curls: [0.0; 5],
            finger_extensions: [0.0; 5],
            hand_openness: 0.0,
        }
    }

    /// Extract features from one hand
    ///
    /// Hands with fewer than 21 landmarks yield [`GestureFeatures::neutral`].
    #[must_use]
    pub fn extract(hand: &HandObservation) -> Self {
        if !hand.has_full_landmarks() {
            return Self::neutral();
        }
        let points = &hand.landmarks;

        let mut finger_curls = [0.0; 5];
        for (curl, chain) in finger_curls.iter_mut().zip(FINGER_CHAINS.iter()) {
            *curl = finger_curl(points, *chain);
        }

        let mut finger_extensions = [0.0; 5];
        finger_extensions[THUMB] = thumb_extension(points);
        for finger in INDEX..=PINKY {
            finger_extensions[finger] = 1.0 - finger_curls[finger];
        }

        Self {
            pinch_distance: points[THUMB_TIP].distance(&points[INDEX_TIP]),
            grab_strength: mean(&finger_curls[INDEX..=PINKY]),
            finger_curls,
            finger_extensions,
            hand_openness: mean(&finger_extensions),
        }
    }

    /// Index finger extension
    pub fn index_extension(&self) -> f32 {
        self.finger_extensions[INDEX]
    }
}

impl Default for GestureFeatures {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Mean bend over the two inner joints of a four-point finger chain
fn finger_curl(points: &[Point2], chain: [usize; 4]) -> f32 {
    let [base, middle, distal, tip] = chain.map(|i| points[i]);
    let bends = [joint_bend(base, middle, distal), joint_bend(middle, distal, tip)];
    clamp_unit(mean(&bends))
}

/// Wrist-to-tip over wrist-to-MCP distance; the thumb does not curl like the other fingers
fn thumb_extension(points: &[Point2]) -> f32 {
    let wrist = points[WRIST];
    let base = wrist.distance(&points[THUMB_MCP]);
    if base <= f32::EPSILON {
        return 0.0;
    }
    clamp_unit(wrist.distance(&points[THUMB_TIP]) / base)
}
