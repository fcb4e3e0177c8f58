//! Constants used throughout the library

/// Number of landmarks in the hand model
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Hand landmark indices (21-point hand model)
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Joint chains (base, middle, distal, tip) for thumb, index, middle, ring, pinky
pub const FINGER_CHAINS: [[usize; 4]; 5] = [
    [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
    [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// Landmark smoothing defaults
pub const DEFAULT_SMOOTHING_CURRENT_WEIGHT: f32 = 0.7;
pub const DEFAULT_JITTER_THRESHOLD: f32 = 0.005;

/// Gesture classification defaults
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.05;
pub const DEFAULT_GRAB_THRESHOLD: f32 = 0.08;
pub const DEFAULT_GRAB_SATURATION: f32 = 0.3;
pub const DEFAULT_OPEN_THRESHOLD: f32 = 0.7;
pub const DEFAULT_POINTING_EXTENSION: f32 = 0.7;
pub const DEFAULT_POINTING_FOLDED: f32 = 0.3;
pub const DEFAULT_MIN_GESTURE_CONFIDENCE: f32 = 0.7;

/// Pinch distance reported for hands without a full landmark set
pub const NEUTRAL_PINCH_DISTANCE: f32 = 1.0;

/// Number of wrist positions kept per hand
pub const DEFAULT_POSITION_HISTORY: usize = 10;

/// Action resolution defaults
pub const DEFAULT_PICKUP_CONFIDENCE: f32 = 0.8;
pub const DEFAULT_RELEASE_CONFIDENCE: f32 = 0.7;
pub const DEFAULT_HOLD_CONFIDENCE: f32 = 0.7;
pub const DEFAULT_MIN_MOTION_CORRELATION: f32 = 0.3;
pub const DEFAULT_STILLNESS_THRESHOLD: f32 = 0.5;

/// Hand identity defaults
pub const DEFAULT_MAX_HANDS: usize = 2;
pub const DEFAULT_MAX_MATCH_DISTANCE: f32 = 0.25;
pub const DEFAULT_SLOT_TIMEOUT_MS: u64 = 250;

/// Object tracking defaults
pub const DEFAULT_CORRELATION_WINDOW_MS: u64 = 500;
pub const DEFAULT_CARRY_GRACE_MS: u64 = 1_000;
pub const DEFAULT_STATE_TIMEOUT_MS: u64 = 5_000;

/// Numeric precision epsilon
pub const EPSILON: f32 = 1e-6;
