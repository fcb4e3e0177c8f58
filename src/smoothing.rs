//! Frame-to-frame landmark smoothing.
//!
//! Blends each hand's landmarks with the previous frame's smoothed output to
//! remove detector jitter, and holds the previous output when the hand has
//! only moved by sub-threshold noise.

use crate::config::SmoothingConfig;
use crate::landmarks::{HandObservation, Point2};

/// Owned smoothing context for one camera session
#[derive(Debug, Clone)]
pub struct LandmarkSmoother {
    current_weight: f32,
    jitter_threshold: f32,
    previous: Option<Vec<HandObservation>>,
}

impl LandmarkSmoother {
    /// Create a new smoother
    ///
    /// # Panics
    ///
    /// Panics if `current_weight` is not in [0, 1] or `jitter_threshold` is negative
    pub fn new(current_weight: f32, jitter_threshold: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&current_weight),
            "Current weight must be in [0, 1]"
        );
        assert!(jitter_threshold >= 0.0, "Jitter threshold must not be negative");
        Self {
            current_weight,
            jitter_threshold,
            previous: None,
        }
    }

    /// Create a smoother from configuration
    pub fn from_config(config: &SmoothingConfig) -> Self {
        Self::new(config.current_weight, config.jitter_threshold)
    }

    /// Smooth the hands of one frame against the previous smoothed frame
    ///
    /// A changed hand count (or no previous frame) passes `current` through
    /// unchanged and makes it the new baseline.
    pub fn smooth(&mut self, current: &[HandObservation]) -> Vec<HandObservation> {
        let smoothed: Vec<HandObservation> = match &self.previous {
            Some(previous) if previous.len() == current.len() => previous
                .iter()
                .zip(current)
                .map(|(prev, cur)| self.smooth_hand(prev, cur))
                .collect(),
            _ => current.to_vec(),
        };

        self.previous = Some(smoothed.clone());
        smoothed
    }

    /// Drop the baseline; the next frame passes through unchanged
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Whether a baseline frame is stored
    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }

    fn smooth_hand(&self, previous: &HandObservation, current: &HandObservation) -> HandObservation {
        if previous.landmarks.len() != current.landmarks.len() || current.landmarks.is_empty() {
            return current.clone();
        }

        if self.is_jitter(&previous.landmarks, &current.landmarks) {
            return HandObservation {
                landmarks: previous.landmarks.clone(),
                pixel_landmarks: previous.pixel_landmarks.clone(),
                bounding_box: previous.bounding_box,
                ..current.clone()
            };
        }

        let mut blended = current.clone();
        blended.landmarks = self.blend_points(&previous.landmarks, &current.landmarks);
        if previous.pixel_landmarks.len() == current.pixel_landmarks.len() {
            blended.pixel_landmarks = self.blend_points(&previous.pixel_landmarks, &current.pixel_landmarks);
        }
        blended.refresh_bounding_box();
        blended
    }

    fn is_jitter(&self, previous: &[Point2], current: &[Point2]) -> bool {
        previous.iter().zip(current).all(|(p, c)| {
            (c.x - p.x).abs() < self.jitter_threshold && (c.y - p.y).abs() < self.jitter_threshold
        })
    }

    fn blend_points(&self, previous: &[Point2], current: &[Point2]) -> Vec<Point2> {
        previous
            .iter()
            .zip(current)
            .map(|(p, c)| p.blend(c, self.current_weight))
            .collect()
    }
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::from_config(&SmoothingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUM_HAND_LANDMARKS;
    use crate::landmarks::Handedness;

    fn hand_at(x: f32, y: f32) -> HandObservation {
        let landmarks = (0..NUM_HAND_LANDMARKS)
            .map(|i| Point2::new(x + i as f32 * 0.01, y))
            .collect();
        HandObservation::new(landmarks, Handedness::Right, 0)
    }

    #[test]
    fn test_first_frame_passes_through() {
        let mut smoother = LandmarkSmoother::default();
        let frame = vec![hand_at(0.2, 0.3)];
        assert_eq!(smoother.smooth(&frame), frame);
        assert!(smoother.has_baseline());
    }

    #[test]
    fn test_blend_weights() {
        let mut smoother = LandmarkSmoother::default();
        smoother.smooth(&[hand_at(0.2, 0.3)]);
        let out = smoother.smooth(&[hand_at(0.3, 0.3)]);

        // 0.3 * 0.2 + 0.7 * 0.3
        assert!((out[0].landmarks[0].x - 0.27).abs() < 1e-5);
        assert!((out[0].landmarks[0].y - 0.3).abs() < 1e-5);
        assert!((out[0].bounding_box.min_x - 0.27).abs() < 1e-5);
    }

    #[test]
    fn test_sub_threshold_motion_holds_previous() {
        let mut smoother = LandmarkSmoother::default();
        let first = smoother.smooth(&[hand_at(0.2, 0.3)]);
        let second = smoother.smooth(&[hand_at(0.202, 0.301)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_jitter_hold_keeps_current_metadata() {
        let mut smoother = LandmarkSmoother::default();
        let first = smoother.smooth(&[hand_at(0.2, 0.3)]);

        let mut next = hand_at(0.202, 0.301);
        next.timestamp_ms = 33;
        next.handedness = Handedness::Left;
        next.confidence = 0.4;
        next.handedness_confidence = 0.6;
        let held = smoother.smooth(&[next]);

        assert_eq!(held[0].landmarks, first[0].landmarks);
        assert_eq!(held[0].bounding_box, first[0].bounding_box);
        assert_eq!(held[0].timestamp_ms, 33);
        assert_eq!(held[0].handedness, Handedness::Left);
        assert!((held[0].confidence - 0.4).abs() < 1e-6);
        assert!((held[0].handedness_confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_hand_count_change_resets_baseline() {
        let mut smoother = LandmarkSmoother::default();
        smoother.smooth(&[hand_at(0.2, 0.3)]);

        let two = vec![hand_at(0.6, 0.6), hand_at(0.1, 0.1)];
        assert_eq!(smoother.smooth(&two), two);

        let none: Vec<HandObservation> = Vec::new();
        assert!(smoother.smooth(&none).is_empty());
    }

    #[test]
    fn test_reset() {
        let mut smoother = LandmarkSmoother::default();
        smoother.smooth(&[hand_at(0.2, 0.3)]);
        smoother.reset();
        assert!(!smoother.has_baseline());

        let frame = vec![hand_at(0.5, 0.5)];
        assert_eq!(smoother.smooth(&frame), frame);
    }

    #[test]
    fn test_partial_hand_passes_through() {
        let mut smoother = LandmarkSmoother::default();
        smoother.smooth(&[hand_at(0.2, 0.3)]);
        let partial = HandObservation::default();
        assert_eq!(smoother.smooth(&[partial.clone()]), vec![partial]);
    }

    #[test]
    #[should_panic(expected = "Current weight must be in [0, 1]")]
    fn test_invalid_weight() {
        let _ = LandmarkSmoother::new(1.2, 0.005);
    }
}
