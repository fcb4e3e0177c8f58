//! Hand action tracking library for real-time pickup and disposal detection.
//!
//! This library turns per-frame 21-point hand landmarks and a device motion
//! signal into debounced pickup / hold / release actions, and uses those
//! actions to drive items reported by an object detector through
//! `Detected → PickedUp → Carrying → Disposed`.
//!
//! The per-frame pipeline consists of:
//! 1. Landmark smoothing against the previous frame
//! 2. Geometric feature extraction (pinch distance, finger curls, openness)
//! 3. Rule-based gesture classification
//! 4. Per-hand gesture state and wrist history, keyed by a tracked hand identity
//! 5. Hand/device motion correlation
//! 6. Action resolution from gesture transitions
//! 7. Object tracking state machine
//!
//! # Examples
//!
//! ## Gesture Recognition
//!
//! ```no_run
//! use hand_action_tracking::{config::Config, gesture_service::GestureService, landmarks::HandObservation};
//!
//! # fn next_frame() -> (Vec<HandObservation>, u64) { (Vec::new(), 0) }
//! let mut service = GestureService::new(Config::default());
//!
//! // The motion sensor may live on another thread
//! let motion = service.motion_signal();
//! motion.record_acceleration(0.02, 0.01, 0.0);
//!
//! let (hands, timestamp_ms) = next_frame();
//! for result in service.process_frame(&hands, timestamp_ms) {
//!     println!("{}: {} -> {}", result.hand_id, result.primary_gesture, result.action_type);
//! }
//! ```
//!
//! ## Replaying a Recorded Session
//!
//! ```no_run
//! use hand_action_tracking::{config::Config, pipeline::FramePipeline, session::Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::from_file("session.yaml")?;
//! let mut pipeline = FramePipeline::new(Config::default());
//!
//! let summary = pipeline.run_session(&session, |report| {
//!     for event in &report.item_events {
//!         println!("{event}");
//!     }
//! });
//! println!("{} pickups", summary.pickups);
//! # Ok(())
//! # }
//! ```

/// Action resolution from gesture transitions
pub mod action;

/// Rule-based gesture classification
pub mod classifier;

/// Configuration management
pub mod config;

/// Constants used throughout the library
pub mod constants;

/// Error types and result handling
pub mod error;

/// Geometric hand feature extraction
pub mod features;

/// Per-frame gesture pipeline
pub mod gesture_service;

/// Per-hand gesture state
pub mod gesture_state;

/// Hand identity tracking across frames
pub mod hand_identity;

/// Hand observation types
pub mod landmarks;

/// Device motion signal and motion correlation
pub mod motion;

/// Object tracking state machine
pub mod object_tracking;

/// Frame pipeline joining gestures and object tracking
pub mod pipeline;

/// Recorded session format
pub mod session;

/// Landmark smoothing
pub mod smoothing;

/// Geometry helpers
pub mod utils;

pub use error::{Error, Result};
