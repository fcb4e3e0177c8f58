//! Error handling tests for configuration, sessions and the item state machine


use hand_action_tracking::{
    config::Config,
    error::{Error, Result},
    gesture_state::GestureState,
    motion::MotionCorrelator,
    object_tracking::{ItemState, ObjectTracker},
    session::Session,
    smoothing::LandmarkSmoother,
};
use test_helpers::detection;

#[test]
fn test_config_validation_errors() {
    let mut config = Config::default();
    config.smoothing.current_weight = 1.5;
    match config.validate() {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("current weight")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let mut config = Config::default();
    config.motion.history_size = 1;
    assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

    let mut config = Config::default();
    config.gesture.pinch_threshold = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.action.min_motion_correlation = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.identity.max_hands = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_parse_errors() {
    assert!(matches!(
        Config::from_yaml_str("gesture: [1, 2"),
        Err(Error::ConfigError(_))
    ));
    assert!(Config::from_yaml_str("gesture:\n  pinch_threshold: \"tight\"\n").is_err());

    // Missing sections fall back to defaults
    let config = Config::from_yaml_str("tracking:\n  carry_grace_ms: 250\n").unwrap();
    assert_eq!(config.tracking.carry_grace_ms, 250);
    assert_eq!(config.gesture, Config::default().gesture);
}

#[test]
fn test_missing_files() {
    let path = std::env::temp_dir().join("hand_action_tracking_does_not_exist.yaml");
    assert!(matches!(Config::from_file(&path), Err(Error::Io(_))));
    assert!(matches!(Session::from_file(&path), Err(Error::Io(_))));
}

#[test]
fn test_session_errors() {
    let out_of_order = "frames:\n  - timestamp_ms: 100\n  - timestamp_ms: 50\n";
    match Session::from_yaml_str(out_of_order) {
        Err(Error::SessionError(msg)) => assert!(msg.contains("Frame 1")),
        other => panic!("Expected SessionError, got {other:?}"),
    }

    assert!(matches!(
        Session::from_yaml_str("frames: 12"),
        Err(Error::SessionError(_))
    ));

    // Equal timestamps are allowed
    let session = Session::from_yaml_str("frames:\n  - timestamp_ms: 5\n  - timestamp_ms: 5\n").unwrap();
    assert_eq!(session.duration_ms(), 0);
}

#[test]
fn test_disposal_errors() -> Result<()> {
    let mut tracker = ObjectTracker::default();
    assert!(matches!(tracker.confirm_disposal(3, 0), Err(Error::UnknownItem(3))));

    tracker.observe_detections(&[detection(3, 0.5)], 0);
    match tracker.confirm_disposal(3, 10) {
        Err(err @ Error::InvalidTransition { .. }) => {
            assert_eq!(err.to_string(), "Invalid transition from Detected to Disposed");
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
    assert_eq!(tracker.get(3).map(|i| i.state), Some(ItemState::Detected));
    Ok(())
}

#[test]
#[should_panic(expected = "Current weight must be in [0, 1]")]
fn test_smoother_rejects_weight() {
    let _ = LandmarkSmoother::new(1.2, 0.005);
}

#[test]
#[should_panic(expected = "Position history capacity must be greater than 0")]
fn test_gesture_state_rejects_zero_capacity() {
    let _ = GestureState::new(0);
}

#[test]
#[should_panic(expected = "Correlation window must hold at least 2 positions")]
fn test_correlator_rejects_short_window() {
    let _ = MotionCorrelator::new(1);
}
