//! Per-frame gesture pipeline.
//!
//! Runs smoothing, feature extraction, classification, motion correlation
//! and action resolution for every hand of a frame, keeping one
//! [`GestureState`] per hand identity.

use crate::action::{ActionResolver, ActionType};
use crate::classifier::{Gesture, GestureClassifier};
use crate::config::Config;
use crate::features::GestureFeatures;
use crate::gesture_state::GestureState;
use crate::hand_identity::{HandId, HandIdentityTracker};
use crate::landmarks::{HandObservation, Handedness, Point2};
use crate::motion::{DeviceMotionSignal, MotionCorrelator};
use crate::smoothing::LandmarkSmoother;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Gesture analysis of one hand in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureResult {
    /// Tracked hand identity
    pub hand_id: HandId,
    /// Handedness label of the observation
    pub handedness: Handedness,
    /// Classified gesture
    pub primary_gesture: Gesture,
    /// Confidence of the gesture (0.0-1.0)
    pub gesture_confidence: f32,
    /// Thumb tip to index tip distance
    pub pinch_distance: f32,
    /// Mean non-thumb finger curl
    pub grab_strength: f32,
    /// Per-finger extension, thumb first
    pub finger_extensions: [f32; 5],
    /// Mean finger extension
    pub hand_openness: f32,
    /// Hand/device motion correlation (0.0-1.0)
    pub motion_correlation: f32,
    /// Action resolved for this frame
    pub action_type: ActionType,
    /// Wrist position, normalized
    pub wrist: Option<Point2>,
    /// Index fingertip position, normalized
    pub index_tip: Option<Point2>,
    /// Thumb tip position, normalized
    pub thumb_tip: Option<Point2>,
    /// Frame timestamp in milliseconds
    pub timestamp_ms: u64,
}

/// Owns all per-session gesture state
pub struct GestureService {
    config: Config,
    smoother: LandmarkSmoother,
    classifier: GestureClassifier,
    correlator: MotionCorrelator,
    resolver: ActionResolver,
    identities: HandIdentityTracker,
    states: HashMap<HandId, GestureState>,
    device_motion: DeviceMotionSignal,
}

impl GestureService {
    /// Create a service from configuration
    pub fn new(config: Config) -> Self {
        Self::with_motion_signal(config, DeviceMotionSignal::new())
    }

    /// Create a service reading device motion from an existing signal
    pub fn with_motion_signal(config: Config, device_motion: DeviceMotionSignal) -> Self {
        Self {
            smoother: LandmarkSmoother::from_config(&config.smoothing),
            classifier: GestureClassifier::new(config.gesture.clone()),
            correlator: MotionCorrelator::new(config.motion.history_size),
            resolver: ActionResolver::new(config.action.clone()),
            identities: HandIdentityTracker::new(&config.identity),
            states: HashMap::new(),
            device_motion,
            config,
        }
    }

    /// Handle for the motion sensor side; clones share the value
    pub fn motion_signal(&self) -> DeviceMotionSignal {
        self.device_motion.clone()
    }

    /// Configuration in use
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// State of one tracked hand
    pub fn state(&self, hand_id: HandId) -> Option<&GestureState> {
        self.states.get(&hand_id)
    }

    /// Number of hands with live state
    pub fn tracked_hands(&self) -> usize {
        self.states.len()
    }

    /// Process the hands of one frame
    pub fn process_frame(&mut self, hands: &[HandObservation], timestamp_ms: u64) -> Vec<GestureResult> {
        let max_hands = self.config.identity.max_hands;
        if hands.len() > max_hands {
            debug!("Ignoring {} hands beyond the limit of {}", hands.len() - max_hands, max_hands);
        }
        let hands = &hands[..hands.len().min(max_hands)];

        let smoothed = if self.config.smoothing.enabled {
            self.smoother.smooth(hands)
        } else {
            hands.to_vec()
        };

        let ids = self.identities.assign(&smoothed, timestamp_ms);
        let device_motion = self.device_motion.latest();

        let mut results = Vec::with_capacity(smoothed.len());
        for (hand, hand_id) in smoothed.iter().zip(ids) {
            let result = self.process_hand(hand, hand_id, device_motion, timestamp_ms);
            if result.action_type != ActionType::None {
                debug!(
                    "{} {}: {} ({:.2}) corr {:.2} -> {}",
                    timestamp_ms,
                    hand_id,
                    result.primary_gesture,
                    result.gesture_confidence,
                    result.motion_correlation,
                    result.action_type
                );
            }
            results.push(result);
        }

        for hand_id in self.identities.expire(timestamp_ms) {
            if let Some(mut state) = self.states.remove(&hand_id) {
                state.reset();
            }
        }

        results
    }

    /// Drop all smoothing, identity and gesture state
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.identities.reset();
        for state in self.states.values_mut() {
            state.reset();
        }
        self.states.clear();
    }

    fn process_hand(
        &mut self,
        hand: &HandObservation,
        hand_id: HandId,
        device_motion: f32,
        timestamp_ms: u64,
    ) -> GestureResult {
        let features = GestureFeatures::extract(hand);
        let (gesture, confidence) = self.classifier.classify(&features);

        let history = self.config.motion.history_size;
        let state = self.states.entry(hand_id).or_insert_with(|| GestureState::new(history));
        if let Some(wrist) = hand.wrist() {
            state.update_hand_position(wrist);
        }
        state.update_gesture(gesture, confidence);

        let motion_correlation = self.correlator.correlate(state, device_motion);
        let action_type = self
            .resolver
            .resolve(gesture, confidence, motion_correlation, device_motion, state);

        GestureResult {
            hand_id,
            handedness: hand.handedness,
            primary_gesture: gesture,
            gesture_confidence: confidence,
            pinch_distance: features.pinch_distance,
            grab_strength: features.grab_strength,
            finger_extensions: features.finger_extensions,
            hand_openness: features.hand_openness,
            motion_correlation,
            action_type,
            wrist: hand.wrist(),
            index_tip: hand.index_tip(),
            thumb_tip: hand.thumb_tip(),
            timestamp_ms,
        }
    }
}

impl Default for GestureService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
