//! Per-hand gesture state across frames.

use crate::classifier::Gesture;
use crate::constants::DEFAULT_POSITION_HISTORY;
use crate::landmarks::Point2;
use std::collections::VecDeque;

/// Gesture history and recent wrist positions of one tracked hand
#[derive(Debug, Clone)]
pub struct GestureState {
    current_gesture: Gesture,
    previous_gesture: Gesture,
    current_confidence: f32,
    positions: VecDeque<Point2>,
    capacity: usize,
}

impl GestureState {
    /// Create an empty state keeping up to `capacity` wrist positions
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Position history capacity must be greater than 0");
        Self {
            current_gesture: Gesture::None,
            previous_gesture: Gesture::None,
            current_confidence: 0.0,
            positions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record this frame's gesture, shifting the current one to previous
    pub fn update_gesture(&mut self, gesture: Gesture, confidence: f32) {
        self.previous_gesture = self.current_gesture;
        self.current_gesture = gesture;
        self.current_confidence = confidence;
    }

    /// Append a wrist position, evicting the oldest when full
    pub fn update_hand_position(&mut self, position: Point2) {
        if self.positions.len() >= self.capacity {
            self.positions.pop_front();
        }
        self.positions.push_back(position);
    }

    /// Clear gestures and position history
    pub fn reset(&mut self) {
        self.current_gesture = Gesture::None;
        self.previous_gesture = Gesture::None;
        self.current_confidence = 0.0;
        self.positions.clear();
    }

    /// Gesture of the latest frame
    pub const fn current_gesture(&self) -> Gesture {
        self.current_gesture
    }

    /// Gesture of the frame before the latest
    pub const fn previous_gesture(&self) -> Gesture {
        self.previous_gesture
    }

    /// Confidence of the latest gesture
    pub const fn current_confidence(&self) -> f32 {
        self.current_confidence
    }

    /// Recent wrist positions, oldest first
    pub const fn positions(&self) -> &VecDeque<Point2> {
        &self.positions
    }

    /// Maximum number of positions kept
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION_HISTORY)
    }
}
