//! Rule-based gesture classification from geometric hand features.

use crate::config::GestureConfig;
use crate::features::{GestureFeatures, MIDDLE, PINKY, RING};
use crate::utils::clamp_unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete hand shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    /// No recognised shape
    #[default]
    None,
    /// Flat open hand
    Open,
    /// Thumb and index tips together
    Pinch,
    /// Fingers curled around an object
    Grab,
    /// Index extended, other fingers folded
    Pointing,
}

impl Gesture {
    /// Pinch or grab
    pub const fn is_grasp(self) -> bool {
        matches!(self, Self::Pinch | Self::Grab)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Open => "open",
            Self::Pinch => "pinch",
            Self::Grab => "grab",
            Self::Pointing => "pointing",
        };
        f.write_str(name)
    }
}

/// Maps features to a gesture and confidence
///
/// Rules are tried in priority order (pinch, grab, open, pointing) and the
/// first match wins. Results below the confidence floor become `(None, 0.0)`.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    /// Create a classifier with the given thresholds
    pub const fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify one hand
    #[must_use]
    pub fn classify(&self, features: &GestureFeatures) -> (Gesture, f32) {
        let (gesture, confidence) = self.match_rules(features);

        if confidence < self.config.min_confidence {
            return (Gesture::None, 0.0);
        }
        (gesture, confidence)
    }

    fn match_rules(&self, features: &GestureFeatures) -> (Gesture, f32) {
        let cfg = &self.config;

        if features.pinch_distance < cfg.pinch_threshold {
            let confidence = (1.0 - features.pinch_distance / cfg.pinch_threshold).max(0.0);
            return (Gesture::Pinch, confidence);
        }

        if features.grab_strength > cfg.grab_threshold {
            let confidence = (features.grab_strength / cfg.grab_saturation).min(1.0);
            return (Gesture::Grab, confidence);
        }

        if features.hand_openness > cfg.open_threshold {
            return (Gesture::Open, clamp_unit(features.hand_openness));
        }

        let index = features.index_extension();
        let others_folded = features.finger_extensions[MIDDLE..=PINKY]
            .iter()
            .all(|&ext| ext < cfg.pointing_folded);
        if index > cfg.pointing_extension && others_folded {
            return (Gesture::Pointing, clamp_unit(index));
        }

        (Gesture::None, 0.0)
    }
}
