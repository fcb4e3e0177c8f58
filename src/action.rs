//! Resolution of gesture transitions into pickup, release and hold actions.

use crate::classifier::Gesture;
use crate::config::ActionConfig;
use crate::gesture_state::GestureState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete action derived from a gesture transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Nothing happened
    #[default]
    None,
    /// Hand closed around an object while moving with the device
    Pickup,
    /// Hand opened after a grasp while moving with the device
    Release,
    /// Grasp sustained while the device is still
    Hold,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Pickup => "pickup",
            Self::Release => "release",
            Self::Hold => "hold",
        };
        f.write_str(name)
    }
}

/// Threshold rules mapping gestures to actions
#[derive(Debug, Clone, Default)]
pub struct ActionResolver {
    config: ActionConfig,
}

impl ActionResolver {
    /// Create a resolver with the given thresholds
    pub const fn new(config: ActionConfig) -> Self {
        Self { config }
    }

    /// Resolve this frame's action for one hand
    ///
    /// `state` must already hold this frame's gesture, so that its
    /// previous gesture is the one from the last frame.
    #[must_use]
    pub fn resolve(
        &self,
        gesture: Gesture,
        confidence: f32,
        motion_correlation: f32,
        device_motion: f32,
        state: &GestureState,
    ) -> ActionType {
        let cfg = &self.config;
        let previous = state.previous_gesture();
        let moving_together = motion_correlation > cfg.min_motion_correlation;

        if matches!(previous, Gesture::Open | Gesture::None)
            && gesture.is_grasp()
            && moving_together
            && confidence > cfg.pickup_confidence
        {
            return ActionType::Pickup;
        }

        if previous.is_grasp() && gesture == Gesture::Open && moving_together && confidence > cfg.release_confidence {
            return ActionType::Release;
        }

        if gesture.is_grasp()
            && previous.is_grasp()
            && confidence > cfg.hold_confidence
            && device_motion < cfg.stillness_threshold
        {
            return ActionType::Hold;
        }

        ActionType::None
    }
}
