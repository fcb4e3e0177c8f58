//! Short-horizon hand identity tracking.
//!
//! Each active identity remembers where its wrist was last seen. Every frame,
//! observed hands are matched to identities by smallest wrist displacement;
//! hands that match nothing open a new identity, and identities that go
//! unseen for longer than the slot timeout expire.

use crate::config::IdentityConfig;
use crate::landmarks::{HandObservation, Handedness, Point2};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandId(pub u32);

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hand-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct HandSlot {
    id: HandId,
    handedness: Handedness,
    wrist: Option<Point2>,
    last_seen_ms: u64,
}

/// Assigns stable identities to the hands of successive frames
#[derive(Debug, Clone)]
pub struct HandIdentityTracker {
    max_match_distance: f32,
    slot_timeout_ms: u64,
    slots: Vec<HandSlot>,
    next_id: u32,
}

impl HandIdentityTracker {
    /// Create a tracker from configuration
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            max_match_distance: config.max_match_distance,
            slot_timeout_ms: config.slot_timeout_ms,
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Assign an identity to each hand, in input order
    pub fn assign(&mut self, hands: &[HandObservation], timestamp_ms: u64) -> Vec<HandId> {
        let mut assigned: Vec<Option<usize>> = vec![None; hands.len()];
        let mut slot_taken = vec![false; self.slots.len()];

        // Positional matches, closest pairs first
        let mut candidates: Vec<(f32, usize, usize)> = Vec::new();
        for (hand_idx, hand) in hands.iter().enumerate() {
            let Some(wrist) = hand.wrist() else { continue };
            for (slot_idx, slot) in self.slots.iter().enumerate() {
                if let Some(last) = slot.wrist {
                    let distance = wrist.distance(&last);
                    if distance <= self.max_match_distance {
                        candidates.push((distance, hand_idx, slot_idx));
                    }
                }
            }
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, hand_idx, slot_idx) in candidates {
            if assigned[hand_idx].is_none() && !slot_taken[slot_idx] {
                assigned[hand_idx] = Some(slot_idx);
                slot_taken[slot_idx] = true;
            }
        }

        // Hands without landmarks fall back to a free slot of the same handedness
        for (hand_idx, hand) in hands.iter().enumerate() {
            if assigned[hand_idx].is_some() || hand.wrist().is_some() {
                continue;
            }
            let free = self
                .slots
                .iter()
                .enumerate()
                .find(|(slot_idx, slot)| !slot_taken[*slot_idx] && slot.handedness == hand.handedness)
                .map(|(slot_idx, _)| slot_idx);
            if let Some(slot_idx) = free {
                assigned[hand_idx] = Some(slot_idx);
                slot_taken[slot_idx] = true;
            }
        }

        hands
            .iter()
            .zip(assigned)
            .map(|(hand, slot_idx)| match slot_idx {
                Some(slot_idx) => {
                    let slot = &mut self.slots[slot_idx];
                    slot.handedness = hand.handedness;
                    slot.wrist = hand.wrist().or(slot.wrist);
                    slot.last_seen_ms = timestamp_ms;
                    slot.id
                }
                None => self.open_slot(hand, timestamp_ms),
            })
            .collect()
    }

    /// Drop identities unseen for longer than the slot timeout, returning them
    pub fn expire(&mut self, timestamp_ms: u64) -> Vec<HandId> {
        let timeout = self.slot_timeout_ms;
        let mut expired = Vec::new();
        self.slots.retain(|slot| {
            let alive = timestamp_ms.saturating_sub(slot.last_seen_ms) <= timeout;
            if !alive {
                expired.push(slot.id);
            }
            alive
        });
        for id in &expired {
            debug!("Hand identity {} expired", id);
        }
        expired
    }

    /// Number of live identities
    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    /// Forget all identities
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    fn open_slot(&mut self, hand: &HandObservation, timestamp_ms: u64) -> HandId {
        let id = HandId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        debug!("New hand identity {} ({})", id, hand.handedness);
        self.slots.push(HandSlot {
            id,
            handedness: hand.handedness,
            wrist: hand.wrist(),
            last_seen_ms: timestamp_ms,
        });
        id
    }
}

impl Default for HandIdentityTracker {
    fn default() -> Self {
        Self::new(&IdentityConfig::default())
    }
}
