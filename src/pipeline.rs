//! Frame pipeline joining gesture recognition with object tracking.

use crate::action::ActionType;
use crate::config::Config;
use crate::gesture_service::{GestureResult, GestureService};
use crate::motion::DeviceMotionSignal;
use crate::object_tracking::{ItemEvent, ItemState, ObjectTracker};
use crate::session::{Session, SessionFrame};
use log::{info, warn};
use serde::Serialize;

/// Output of the pipeline for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frame timestamp in milliseconds
    pub timestamp_ms: u64,
    /// Gesture analysis per hand
    pub gestures: Vec<GestureResult>,
    /// Item state changes caused by this frame
    pub item_events: Vec<ItemEvent>,
}

/// Totals over a processed session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames processed
    pub frames: usize,
    /// Pickup actions emitted
    pub pickups: usize,
    /// Release actions emitted
    pub releases: usize,
    /// Items confirmed disposed
    pub disposed: usize,
    /// Items dropped after a timeout
    pub lost: usize,
}

/// Runs every stage once per frame
pub struct FramePipeline {
    gestures: GestureService,
    tracker: ObjectTracker,
}

impl FramePipeline {
    /// Create a pipeline from configuration
    pub fn new(config: Config) -> Self {
        let tracker = ObjectTracker::new(config.tracking.clone());
        Self {
            gestures: GestureService::new(config),
            tracker,
        }
    }

    /// Handle for feeding device motion from the sensor side
    pub fn motion_signal(&self) -> DeviceMotionSignal {
        self.gestures.motion_signal()
    }

    /// Gesture stage
    pub const fn gesture_service(&self) -> &GestureService {
        &self.gestures
    }

    /// Object tracking stage
    pub const fn object_tracker(&self) -> &ObjectTracker {
        &self.tracker
    }

    /// Process one frame
    pub fn process(&mut self, frame: &SessionFrame) -> FrameReport {
        let timestamp_ms = frame.timestamp_ms;

        if let Some([x, y, z]) = frame.acceleration {
            self.gestures.motion_signal().record_acceleration(x, y, z);
        }

        let gestures = self.gestures.process_frame(&frame.hands, timestamp_ms);

        let mut item_events = self.tracker.observe_actions(&gestures, timestamp_ms);
        item_events.extend(self.tracker.observe_detections(&frame.detections, timestamp_ms));
        for &tracking_id in &frame.disposals {
            match self.tracker.confirm_disposal(tracking_id, timestamp_ms) {
                Ok(event) => item_events.push(event),
                Err(e) => warn!("Disposal of item {} rejected: {}", tracking_id, e),
            }
        }
        item_events.extend(self.tracker.tick(timestamp_ms));

        FrameReport {
            timestamp_ms,
            gestures,
            item_events,
        }
    }

    /// Process a whole session, handing each report to `on_frame`
    pub fn run_session<F>(&mut self, session: &Session, mut on_frame: F) -> SessionSummary
    where
        F: FnMut(&FrameReport),
    {
        let mut summary = SessionSummary::default();
        for frame in &session.frames {
            let report = self.process(frame);

            summary.frames += 1;
            for result in &report.gestures {
                match result.action_type {
                    ActionType::Pickup => summary.pickups += 1,
                    ActionType::Release => summary.releases += 1,
                    ActionType::Hold | ActionType::None => {}
                }
            }
            for event in &report.item_events {
                match event {
                    ItemEvent::StateChanged {
                        to: ItemState::Disposed,
                        ..
                    } => summary.disposed += 1,
                    ItemEvent::Lost { .. } => summary.lost += 1,
                    _ => {}
                }
            }

            on_frame(&report);
        }

        info!(
            "Processed {} frames: {} pickups, {} releases, {} disposed, {} lost",
            summary.frames, summary.pickups, summary.releases, summary.disposed, summary.lost
        );
        summary
    }

    /// Drop all state
    pub fn reset(&mut self) {
        self.gestures.reset();
        self.tracker.reset();
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
