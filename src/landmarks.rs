//! Hand observation types as delivered by the landmark backend.

use crate::constants::{INDEX_TIP, NUM_HAND_LANDMARKS, THUMB_TIP, WRIST};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point, normalized ([0, 1]²) or in pixels depending on context
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct Point2 {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point2 {
    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Self) -> f32 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Point as a nalgebra vector
    pub fn to_vector(self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    /// Linear blend `self * (1 - weight) + other * weight`
    pub fn blend(&self, other: &Self, weight: f32) -> Self {
        Self {
            x: self.x.mul_add(1.0 - weight, other.x * weight),
            y: self.y.mul_add(1.0 - weight, other.y * weight),
        }
    }
}

impl From<(f32, f32)> for Point2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for (f32, f32) {
    fn from(point: Point2) -> Self {
        (point.x, point.y)
    }
}

/// Which hand the backend believes it is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand
    Left,
    /// Right hand
    #[default]
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub min_x: f32,
    /// Top edge
    pub min_y: f32,
    /// Right edge
    pub max_x: f32,
    /// Bottom edge
    pub max_y: f32,
}

impl BoundingBox {
    /// Create a bounding box from its corners
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing all points, or `None` for an empty slice
    #[must_use]
    pub fn enclosing(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(points.iter().fold(init, |bbox, p| Self {
            min_x: bbox.min_x.min(p.x),
            min_y: bbox.min_y.min(p.y),
            max_x: bbox.max_x.max(p.x),
            max_y: bbox.max_y.max(p.y),
        }))
    }

    /// Centre of the box
    pub fn center(&self) -> Point2 {
        Point2::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Box width
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Box height
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// One detected hand in one camera frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandObservation {
    /// Landmarks in normalized image space; empty or exactly 21 points
    pub landmarks: Vec<Point2>,
    /// Same landmarks in pixel space
    pub pixel_landmarks: Vec<Point2>,
    /// Bounding box of the normalized landmarks
    pub bounding_box: BoundingBox,
    /// Overall detection confidence (0.0-1.0)
    pub confidence: f32,
    /// Handedness label
    pub handedness: Handedness,
    /// Confidence of the handedness label (0.0-1.0)
    pub handedness_confidence: f32,
    /// Capture timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl HandObservation {
    /// Build an observation from normalized landmarks, deriving the bounding box
    pub fn new(landmarks: Vec<Point2>, handedness: Handedness, timestamp_ms: u64) -> Self {
        let bounding_box = BoundingBox::enclosing(&landmarks).unwrap_or_default();
        Self {
            landmarks,
            pixel_landmarks: Vec::new(),
            bounding_box,
            confidence: 1.0,
            handedness,
            handedness_confidence: 1.0,
            timestamp_ms,
        }
    }

    /// Whether the full 21-point landmark set is present
    pub fn has_full_landmarks(&self) -> bool {
        self.landmarks.len() == NUM_HAND_LANDMARKS
    }

    /// Normalized landmark at `index`, only for a full landmark set
    pub fn landmark(&self, index: usize) -> Option<Point2> {
        if self.has_full_landmarks() {
            self.landmarks.get(index).copied()
        } else {
            None
        }
    }

    /// Wrist position
    pub fn wrist(&self) -> Option<Point2> {
        self.landmark(WRIST)
    }

    /// Index fingertip position
    pub fn index_tip(&self) -> Option<Point2> {
        self.landmark(INDEX_TIP)
    }

    /// Thumb tip position
    pub fn thumb_tip(&self) -> Option<Point2> {
        self.landmark(THUMB_TIP)
    }

    /// Recompute the bounding box from the normalized landmarks
    pub fn refresh_bounding_box(&mut self) {
        self.bounding_box = BoundingBox::enclosing(&self.landmarks).unwrap_or_default();
    }
}
