//! Device motion signal and hand/device motion correlation.
//!
//! The accelerometer runs independently of the camera. Only its latest
//! magnitude matters, so it is kept in a single atomic word that the sensor
//! side overwrites and the frame pipeline reads without waiting.

use crate::gesture_state::GestureState;
use crate::landmarks::Point2;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Latest device motion magnitude, shared between sensor and frame pipeline
///
/// Clones share the same value. Reads before the first sample return 0.
#[derive(Debug, Clone, Default)]
pub struct DeviceMotionSignal {
    bits: Arc<AtomicU32>,
}

impl DeviceMotionSignal {
    /// Create a signal with no reading yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a motion magnitude; non-finite or negative values store 0
    pub fn store(&self, magnitude: f32) {
        let value = if magnitude.is_finite() && magnitude > 0.0 { magnitude } else { 0.0 };
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Store the L2 norm of a 3-axis acceleration sample
    pub fn record_acceleration(&self, x: f32, y: f32, z: f32) {
        self.store(nalgebra::Vector3::new(x, y, z).norm());
    }

    /// Latest magnitude
    pub fn latest(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Compares hand movement against device movement
#[derive(Debug, Clone, Copy)]
pub struct MotionCorrelator {
    window: usize,
}

impl MotionCorrelator {
    /// Create a correlator averaging over up to `window` wrist positions
    ///
    /// # Panics
    ///
    /// Panics if `window` is less than 2
    pub fn new(window: usize) -> Self {
        assert!(window >= 2, "Correlation window must hold at least 2 positions");
        Self { window }
    }

    /// Mean frame-to-frame wrist displacement over the most recent positions
    #[allow(clippy::cast_precision_loss)] // Window is at most a few dozen samples
    pub fn hand_motion(&self, positions: &VecDeque<Point2>) -> f32 {
        let skip = positions.len().saturating_sub(self.window);
        let recent: Vec<&Point2> = positions.iter().skip(skip).collect();
        if recent.len() < 2 {
            return 0.0;
        }

        let total: f32 = recent.windows(2).map(|pair| pair[0].distance(pair[1])).sum();
        total / (recent.len() - 1) as f32
    }

    /// Similarity of hand and device motion intensity in [0, 1]
    ///
    /// Zero when both are still.
    pub fn correlation(hand_motion: f32, device_motion: f32) -> f32 {
        let peak = hand_motion.max(device_motion);
        if !(peak > 0.0) {
            return 0.0;
        }
        (1.0 - (hand_motion - device_motion).abs() / peak).clamp(0.0, 1.0)
    }

    /// Correlate a hand's recent movement with the device motion magnitude
    #[must_use]
    pub fn correlate(&self, state: &GestureState, device_motion: f32) -> f32 {
        Self::correlation(self.hand_motion(state.positions()), device_motion)
    }
}

impl Default for MotionCorrelator {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_POSITION_HISTORY)
    }
}
