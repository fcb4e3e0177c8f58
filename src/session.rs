//! Recorded sessions: per-frame hands, device motion and detections.

use crate::landmarks::HandObservation;
use crate::object_tracking::Detection;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the pipeline receives for one camera frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFrame {
    /// Capture timestamp in milliseconds
    pub timestamp_ms: u64,
    /// Latest 3-axis device acceleration, if a sample arrived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<[f32; 3]>,
    /// Hands reported by the landmark backend
    pub hands: Vec<HandObservation>,
    /// Objects reported by the object detector
    pub detections: Vec<Detection>,
    /// Tracking ids whose disposal was confirmed in this frame
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disposals: Vec<u64>,
}

/// A recorded sequence of frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Frames in capture order
    pub frames: Vec<SessionFrame>,
}

impl Session {
    /// Load a session from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid session
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a session from YAML text
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` for malformed YAML or out-of-order frames
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let session: Self =
            serde_yaml::from_str(content).map_err(|e| Error::SessionError(format!("Failed to parse session: {e}")))?;
        session.validate()?;
        Ok(session)
    }

    /// Serialize the session to YAML
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` if serialization fails
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::SessionError(format!("Failed to serialize session: {e}")))
    }

    /// Check that frame timestamps never go backwards
    ///
    /// # Errors
    ///
    /// Returns a `SessionError` naming the first out-of-order frame
    pub fn validate(&self) -> Result<()> {
        for (index, pair) in self.frames.windows(2).enumerate() {
            if pair[1].timestamp_ms < pair[0].timestamp_ms {
                return Err(Error::SessionError(format!(
                    "Frame {} timestamp {} is earlier than the previous frame ({})",
                    index + 1,
                    pair[1].timestamp_ms,
                    pair[0].timestamp_ms
                )));
            }
        }
        Ok(())
    }

    /// Duration covered by the session in milliseconds
    pub fn duration_ms(&self) -> u64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_tracking::ItemCategory;

    const SESSION: &str = r"
frames:
  - timestamp_ms: 0
    acceleration: [0.0, 0.1, 0.0]
    detections:
      - tracking_id: 4
        category: organic
        bounding_box: { min_x: 0.4, min_y: 0.4, max_x: 0.5, max_y: 0.5 }
        confidence: 0.8
  - timestamp_ms: 33
    hands:
      - handedness: Left
        confidence: 0.9
  - timestamp_ms: 66
    disposals: [4]
";

    #[test]
    fn test_parse_session() {
        let session = Session::from_yaml_str(SESSION).unwrap();
        assert_eq!(session.frames.len(), 3);
        assert_eq!(session.frames[0].acceleration, Some([0.0, 0.1, 0.0]));
        assert_eq!(session.frames[0].detections[0].category, ItemCategory::Organic);
        assert!(session.frames[1].hands[0].landmarks.is_empty());
        assert_eq!(session.frames[2].disposals, vec![4]);
        assert_eq!(session.duration_ms(), 66);
    }

    #[test]
    fn test_out_of_order_frames_rejected() {
        let yaml = "frames:\n  - timestamp_ms: 50\n  - timestamp_ms: 10\n";
        assert!(matches!(Session::from_yaml_str(yaml), Err(Error::SessionError(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let session = Session::from_yaml_str(SESSION).unwrap();
        let yaml = session.to_yaml_string().unwrap();
        assert_eq!(Session::from_yaml_str(&yaml).unwrap(), session);
    }

    #[test]
    fn test_empty_session() {
        let session = Session::from_yaml_str("frames: []").unwrap();
        assert_eq!(session.duration_ms(), 0);
    }
}
