//! Object tracking state machine driven by detections and hand actions.
//!
//! Items move through `Detected → PickedUp → Carrying → Disposed`. An item
//! is picked up when it stops being reported by the object detector within
//! a short window of a pickup action, which tells "taken by the hand" apart
//! from "left the frame". Items without any supporting signal for longer
//! than the state timeout are dropped as lost.

use crate::action::ActionType;
use crate::config::TrackingConfig;
use crate::gesture_service::GestureResult;
use crate::hand_identity::HandId;
use crate::landmarks::{BoundingBox, Point2};
use crate::{Error, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Waste category reported by the object detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    /// Recyclable material
    Recycle,
    /// Compostable material
    Organic,
    /// General waste
    Landfill,
    /// Electronic waste
    Ewaste,
    /// Hazardous waste
    Hazardous,
    /// Any other label
    #[default]
    #[serde(other)]
    Unknown,
}

impl FromStr for ItemCategory {
    type Err = std::convert::Infallible;

    fn from_str(label: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match label.trim().to_lowercase().as_str() {
            "recycle" | "recyclable" => Self::Recycle,
            "organic" | "compost" => Self::Organic,
            "landfill" | "trash" => Self::Landfill,
            "ewaste" | "e-waste" => Self::Ewaste,
            "hazardous" => Self::Hazardous,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recycle => "recycle",
            Self::Organic => "organic",
            Self::Landfill => "landfill",
            Self::Ewaste => "ewaste",
            Self::Hazardous => "hazardous",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a tracked item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemState {
    /// Seen by the object detector
    Detected,
    /// Taken by a hand
    PickedUp,
    /// Held for longer than the grace period
    Carrying,
    /// Confirmed disposed; terminal
    Disposed,
}

impl ItemState {
    /// Whether the state machine allows moving from `self` to `next`
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Detected, Self::PickedUp) | (Self::PickedUp, Self::Carrying) | (Self::Carrying, Self::Disposed)
        )
    }

    /// Whether the state is terminal
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Disposed)
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Detected => "Detected",
            Self::PickedUp => "PickedUp",
            Self::Carrying => "Carrying",
            Self::Disposed => "Disposed",
        };
        f.write_str(name)
    }
}

/// One object detector report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detector tracking id
    pub tracking_id: u64,
    /// Category label
    #[serde(default)]
    pub category: ItemCategory,
    /// Bounding box, normalized
    pub bounding_box: BoundingBox,
    /// Detection confidence (0.0-1.0)
    #[serde(default)]
    pub confidence: f32,
}

/// An item under state machine supervision
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedItem {
    /// Detector tracking id
    pub tracking_id: u64,
    /// Category label
    pub category: ItemCategory,
    /// Current state
    pub state: ItemState,
    /// Where the item was picked up, set on entering `PickedUp`
    pub pickup_location: Option<Point2>,
    /// Hand that picked the item up
    pub carrier: Option<HandId>,
    /// When the current state was entered
    pub state_entered_ms: u64,
    /// Latest supporting signal (detection or carrier action)
    pub last_signal_ms: u64,
    /// When the detector stopped reporting the item, while `Detected`
    pub missing_since_ms: Option<u64>,
    /// Last reported bounding box
    pub bounding_box: BoundingBox,
}

impl TrackedItem {
    /// Create a freshly detected item
    pub fn detected(detection: &Detection, timestamp_ms: u64) -> Self {
        Self {
            tracking_id: detection.tracking_id,
            category: detection.category,
            state: ItemState::Detected,
            pickup_location: None,
            carrier: None,
            state_entered_ms: timestamp_ms,
            last_signal_ms: timestamp_ms,
            missing_since_ms: None,
            bounding_box: detection.bounding_box,
        }
    }

    /// Move to `next`, enforcing the transition rules
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if `next` is not reachable from the current state
    pub fn transition_to(&mut self, next: ItemState, timestamp_ms: u64) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        self.state_entered_ms = timestamp_ms;
        Ok(())
    }
}

/// State change notification for downstream consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ItemEvent {
    /// A new item entered supervision
    Detected {
        /// Detector tracking id
        tracking_id: u64,
        /// Category label
        category: ItemCategory,
        /// Event time
        timestamp_ms: u64,
    },
    /// An item changed state
    StateChanged {
        /// Detector tracking id
        tracking_id: u64,
        /// Previous state
        from: ItemState,
        /// New state
        to: ItemState,
        /// Event time
        timestamp_ms: u64,
    },
    /// An item timed out and was dropped
    Lost {
        /// Detector tracking id
        tracking_id: u64,
        /// State the item was in
        last_state: ItemState,
        /// Event time
        timestamp_ms: u64,
    },
}

impl ItemEvent {
    /// Tracking id the event refers to
    pub const fn tracking_id(&self) -> u64 {
        match self {
            Self::Detected { tracking_id, .. }
            | Self::StateChanged { tracking_id, .. }
            | Self::Lost { tracking_id, .. } => *tracking_id,
        }
    }
}

impl fmt::Display for ItemEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected {
                tracking_id, category, ..
            } => write!(f, "item {tracking_id} detected ({category})"),
            Self::StateChanged {
                tracking_id, from, to, ..
            } => write!(f, "item {tracking_id} {from} -> {to}"),
            Self::Lost {
                tracking_id, last_state, ..
            } => write!(f, "item {tracking_id} lost while {last_state}"),
        }
    }
}

#[derive(Debug, Clone)]
struct PickupSignal {
    hand_id: HandId,
    location: Option<Point2>,
    timestamp_ms: u64,
}

/// Supervises all items reported by the object detector
#[derive(Debug, Clone)]
pub struct ObjectTracker {
    config: TrackingConfig,
    items: BTreeMap<u64, TrackedItem>,
    pickups: VecDeque<PickupSignal>,
}

impl ObjectTracker {
    /// Create a tracker from configuration
    pub const fn new(config: TrackingConfig) -> Self {
        Self {
            config,
            items: BTreeMap::new(),
            pickups: VecDeque::new(),
        }
    }

    /// Item by tracking id
    pub fn get(&self, tracking_id: u64) -> Option<&TrackedItem> {
        self.items.get(&tracking_id)
    }

    /// All supervised items, ordered by tracking id
    pub fn items(&self) -> impl Iterator<Item = &TrackedItem> {
        self.items.values()
    }

    /// Number of supervised items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are supervised
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply one frame of object detector output
    pub fn observe_detections(&mut self, detections: &[Detection], timestamp_ms: u64) -> Vec<ItemEvent> {
        let mut events = Vec::new();
        let mut seen = HashSet::with_capacity(detections.len());

        for detection in detections {
            seen.insert(detection.tracking_id);
            match self.items.get_mut(&detection.tracking_id) {
                // Once taken, only the carrying hand keeps an item alive
                Some(item) if item.state == ItemState::Detected => {
                    item.last_signal_ms = timestamp_ms;
                    item.bounding_box = detection.bounding_box;
                    item.missing_since_ms = None;
                }
                Some(_) => {}
                None => {
                    debug!(
                        "Item {} detected ({}, confidence {:.2})",
                        detection.tracking_id, detection.category, detection.confidence
                    );
                    self.items
                        .insert(detection.tracking_id, TrackedItem::detected(detection, timestamp_ms));
                    events.push(ItemEvent::Detected {
                        tracking_id: detection.tracking_id,
                        category: detection.category,
                        timestamp_ms,
                    });
                }
            }
        }

        for item in self.items.values_mut() {
            if item.state == ItemState::Detected && !seen.contains(&item.tracking_id) && item.missing_since_ms.is_none()
            {
                item.missing_since_ms = Some(timestamp_ms);
            }
        }

        events.extend(self.join_pickups(timestamp_ms));
        events
    }

    /// Apply one frame of gesture results
    pub fn observe_actions(&mut self, results: &[GestureResult], timestamp_ms: u64) -> Vec<ItemEvent> {
        for result in results {
            match result.action_type {
                ActionType::Pickup => {
                    self.pickups.push_back(PickupSignal {
                        hand_id: result.hand_id,
                        location: result.index_tip.or(result.wrist),
                        timestamp_ms,
                    });
                    self.support_carried(result.hand_id, timestamp_ms);
                }
                ActionType::Hold => self.support_carried(result.hand_id, timestamp_ms),
                ActionType::Release | ActionType::None => {}
            }
        }

        self.join_pickups(timestamp_ms)
    }

    /// Confirm that a carried item was disposed; it leaves supervision
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the id is not supervised, or
    /// `InvalidTransition` if the item is not being carried
    pub fn confirm_disposal(&mut self, tracking_id: u64, timestamp_ms: u64) -> Result<ItemEvent> {
        let item = self
            .items
            .get_mut(&tracking_id)
            .ok_or(Error::UnknownItem(tracking_id))?;

        let from = item.state;
        item.transition_to(ItemState::Disposed, timestamp_ms)?;
        info!("Item {} ({}) disposed", tracking_id, item.category);
        self.items.remove(&tracking_id);

        Ok(ItemEvent::StateChanged {
            tracking_id,
            from,
            to: ItemState::Disposed,
            timestamp_ms,
        })
    }

    /// Advance time-based transitions: carry promotion and timeouts
    pub fn tick(&mut self, timestamp_ms: u64) -> Vec<ItemEvent> {
        let mut events = Vec::new();
        let grace = self.config.carry_grace_ms;
        let timeout = self.config.state_timeout_ms;

        let mut lost = Vec::new();
        for item in self.items.values_mut() {
            if timestamp_ms.saturating_sub(item.last_signal_ms) > timeout {
                lost.push((item.tracking_id, item.state));
                continue;
            }

            let held_long_enough = timestamp_ms.saturating_sub(item.state_entered_ms) >= grace;
            let supported_since_pickup = item.last_signal_ms > item.state_entered_ms;
            if item.state == ItemState::PickedUp && held_long_enough && supported_since_pickup {
                let from = item.state;
                if item.transition_to(ItemState::Carrying, timestamp_ms).is_ok() {
                    info!("Item {} ({}) is being carried", item.tracking_id, item.category);
                    events.push(ItemEvent::StateChanged {
                        tracking_id: item.tracking_id,
                        from,
                        to: ItemState::Carrying,
                        timestamp_ms,
                    });
                }
            }
        }

        for (tracking_id, last_state) in lost {
            warn!("Item {} lost while {}", tracking_id, last_state);
            self.items.remove(&tracking_id);
            events.push(ItemEvent::Lost {
                tracking_id,
                last_state,
                timestamp_ms,
            });
        }

        let window = self.config.correlation_window_ms;
        self.pickups
            .retain(|pickup| pickup.timestamp_ms.saturating_add(window) >= timestamp_ms);

        events
    }

    /// Forget all items and pending pickups
    pub fn reset(&mut self) {
        self.items.clear();
        self.pickups.clear();
    }

    fn support_carried(&mut self, hand_id: HandId, timestamp_ms: u64) {
        for item in self.items.values_mut() {
            if item.carrier == Some(hand_id) && matches!(item.state, ItemState::PickedUp | ItemState::Carrying) {
                item.last_signal_ms = timestamp_ms;
            }
        }
    }

    /// Pair pending pickups with items that left the detector around the same time
    fn join_pickups(&mut self, timestamp_ms: u64) -> Vec<ItemEvent> {
        let window = self.config.correlation_window_ms;
        let mut events = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.pickups.len());

        while let Some(pickup) = self.pickups.pop_front() {
            let candidate = self
                .items
                .values()
                .filter(|item| item.state == ItemState::Detected)
                .filter_map(|item| {
                    let missing_since = item.missing_since_ms?;
                    (missing_since.abs_diff(pickup.timestamp_ms) <= window).then_some(item)
                })
                .min_by(|a, b| {
                    let da = pickup.location.map_or(0.0, |p| p.distance(&a.bounding_box.center()));
                    let db = pickup.location.map_or(0.0, |p| p.distance(&b.bounding_box.center()));
                    da.total_cmp(&db)
                })
                .map(|item| item.tracking_id);

            let Some(tracking_id) = candidate else {
                remaining.push_back(pickup);
                continue;
            };

            if let Some(item) = self.items.get_mut(&tracking_id) {
                if item.transition_to(ItemState::PickedUp, timestamp_ms).is_ok() {
                    item.pickup_location = pickup.location.or(Some(item.bounding_box.center()));
                    item.carrier = Some(pickup.hand_id);
                    item.missing_since_ms = None;
                    item.last_signal_ms = timestamp_ms;
                    info!("Item {} ({}) picked up by {}", tracking_id, item.category, pickup.hand_id);
                    events.push(ItemEvent::StateChanged {
                        tracking_id,
                        from: ItemState::Detected,
                        to: ItemState::PickedUp,
                        timestamp_ms,
                    });
                }
            }
        }

        self.pickups = remaining;
        events
    }
}

impl Default for ObjectTracker {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}
