//! Configuration management for the hand action tracking pipeline

use crate::constants::{
    DEFAULT_CARRY_GRACE_MS, DEFAULT_CORRELATION_WINDOW_MS, DEFAULT_GRAB_SATURATION, DEFAULT_GRAB_THRESHOLD,
    DEFAULT_HOLD_CONFIDENCE, DEFAULT_JITTER_THRESHOLD, DEFAULT_MAX_HANDS, DEFAULT_MAX_MATCH_DISTANCE,
    DEFAULT_MIN_GESTURE_CONFIDENCE, DEFAULT_MIN_MOTION_CORRELATION, DEFAULT_OPEN_THRESHOLD, DEFAULT_PICKUP_CONFIDENCE,
    DEFAULT_PINCH_THRESHOLD, DEFAULT_POINTING_EXTENSION, DEFAULT_POINTING_FOLDED, DEFAULT_POSITION_HISTORY,
    DEFAULT_RELEASE_CONFIDENCE, DEFAULT_SLOT_TIMEOUT_MS, DEFAULT_SMOOTHING_CURRENT_WEIGHT, DEFAULT_STATE_TIMEOUT_MS,
    DEFAULT_STILLNESS_THRESHOLD,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Landmark smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Gesture classification thresholds
    pub gesture: GestureConfig,

    /// Motion correlation configuration
    pub motion: MotionConfig,

    /// Action resolution thresholds
    pub action: ActionConfig,

    /// Hand identity tracking configuration
    pub identity: IdentityConfig,

    /// Object tracking state machine configuration
    pub tracking: TrackingConfig,
}

/// Landmark smoothing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Smooth landmarks across frames
    pub enabled: bool,

    /// Weight of the current frame in the blend (0.0-1.0)
    pub current_weight: f32,

    /// Per-coordinate change below which the previous frame is kept
    pub jitter_threshold: f32,
}

/// Gesture classification thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-index distance below which the hand pinches
    pub pinch_threshold: f32,

    /// Grab strength above which the hand grabs
    pub grab_threshold: f32,

    /// Grab strength at which grab confidence saturates
    pub grab_saturation: f32,

    /// Openness above which the hand is open
    pub open_threshold: f32,

    /// Index extension required for pointing
    pub pointing_extension: f32,

    /// Maximum extension of the other fingers while pointing
    pub pointing_folded: f32,

    /// Classifications below this confidence are reported as none
    pub min_confidence: f32,
}

/// Motion correlation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Number of wrist positions kept per hand
    pub history_size: usize,
}

/// Action resolution thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Confidence required for a pickup
    pub pickup_confidence: f32,

    /// Confidence required for a release
    pub release_confidence: f32,

    /// Confidence required for a hold
    pub hold_confidence: f32,

    /// Motion correlation required for pickup and release
    pub min_motion_correlation: f32,

    /// Device motion magnitude below which the device counts as still
    pub stillness_threshold: f32,
}

/// Hand identity tracking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Maximum number of hands processed per frame
    pub max_hands: usize,

    /// Maximum wrist displacement (normalized) for a hand to keep its identity
    pub max_match_distance: f32,

    /// Identities unseen for longer than this are dropped
    pub slot_timeout_ms: u64,
}

/// Object tracking state machine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Maximum gap between a pickup gesture and an item leaving the detector
    pub correlation_window_ms: u64,

    /// Time an item stays picked up before it counts as carried
    pub carry_grace_ms: u64,

    /// Items without a supporting signal for this long are dropped
    pub state_timeout_ms: u64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            current_weight: DEFAULT_SMOOTHING_CURRENT_WEIGHT,
            jitter_threshold: DEFAULT_JITTER_THRESHOLD,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            grab_threshold: DEFAULT_GRAB_THRESHOLD,
            grab_saturation: DEFAULT_GRAB_SATURATION,
            open_threshold: DEFAULT_OPEN_THRESHOLD,
            pointing_extension: DEFAULT_POINTING_EXTENSION,
            pointing_folded: DEFAULT_POINTING_FOLDED,
            min_confidence: DEFAULT_MIN_GESTURE_CONFIDENCE,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_POSITION_HISTORY,
        }
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            pickup_confidence: DEFAULT_PICKUP_CONFIDENCE,
            release_confidence: DEFAULT_RELEASE_CONFIDENCE,
            hold_confidence: DEFAULT_HOLD_CONFIDENCE,
            min_motion_correlation: DEFAULT_MIN_MOTION_CORRELATION,
            stillness_threshold: DEFAULT_STILLNESS_THRESHOLD,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            max_hands: DEFAULT_MAX_HANDS,
            max_match_distance: DEFAULT_MAX_MATCH_DISTANCE,
            slot_timeout_ms: DEFAULT_SLOT_TIMEOUT_MS,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            correlation_window_ms: DEFAULT_CORRELATION_WINDOW_MS,
            carry_grace_ms: DEFAULT_CARRY_GRACE_MS,
            state_timeout_ms: DEFAULT_STATE_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid setting
    pub fn validate(&self) -> Result<()> {
        // Smoothing
        if !(0.0..=1.0).contains(&self.smoothing.current_weight) {
            return Err(Error::ConfigError(
                "Smoothing current weight must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(self.smoothing.jitter_threshold >= 0.0) {
            return Err(Error::ConfigError("Jitter threshold must not be negative".to_string()));
        }

        // Gesture thresholds
        let unit_thresholds = [
            ("pinch_threshold", self.gesture.pinch_threshold),
            ("grab_threshold", self.gesture.grab_threshold),
            ("open_threshold", self.gesture.open_threshold),
            ("pointing_extension", self.gesture.pointing_extension),
            ("pointing_folded", self.gesture.pointing_folded),
            ("min_confidence", self.gesture.min_confidence),
            ("pickup_confidence", self.action.pickup_confidence),
            ("release_confidence", self.action.release_confidence),
            ("hold_confidence", self.action.hold_confidence),
            ("min_motion_correlation", self.action.min_motion_correlation),
        ];
        for (name, value) in unit_thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::ConfigError(format!("{name} must be between 0.0 and 1.0")));
            }
        }
        if self.gesture.pinch_threshold <= 0.0 {
            return Err(Error::ConfigError("pinch_threshold must be greater than 0".to_string()));
        }
        if !(self.gesture.grab_saturation > 0.0) {
            return Err(Error::ConfigError("grab_saturation must be greater than 0".to_string()));
        }
        if !(self.action.stillness_threshold >= 0.0) {
            return Err(Error::ConfigError("stillness_threshold must not be negative".to_string()));
        }

        // Motion history
        if self.motion.history_size < 2 {
            return Err(Error::ConfigError(
                "Motion history size must be at least 2".to_string(),
            ));
        }

        // Identity tracking
        if self.identity.max_hands == 0 {
            return Err(Error::ConfigError("max_hands must be greater than 0".to_string()));
        }
        if !(self.identity.max_match_distance > 0.0) {
            return Err(Error::ConfigError("max_match_distance must be greater than 0".to_string()));
        }

        // Object tracking windows
        if self.tracking.correlation_window_ms == 0 {
            return Err(Error::ConfigError(
                "correlation_window_ms must be greater than 0".to_string(),
            ));
        }
        if self.tracking.state_timeout_ms == 0 {
            return Err(Error::ConfigError("state_timeout_ms must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r"# Hand Action Tracking Configuration

# Landmark smoothing
smoothing:
  enabled: true
  current_weight: 0.7
  jitter_threshold: 0.005

# Gesture classification
gesture:
  pinch_threshold: 0.05
  grab_threshold: 0.08
  grab_saturation: 0.3
  open_threshold: 0.7
  pointing_extension: 0.7
  pointing_folded: 0.3
  min_confidence: 0.7

# Motion correlation
motion:
  history_size: 10

# Action resolution
action:
  pickup_confidence: 0.8
  release_confidence: 0.7
  hold_confidence: 0.7
  min_motion_correlation: 0.3
  stillness_threshold: 0.5

# Hand identity tracking
identity:
  max_hands: 2
  max_match_distance: 0.25
  slot_timeout_ms: 250

# Object tracking
tracking:
  correlation_window_ms: 500
  carry_grace_ms: 1000
  state_timeout_ms: 5000
";
