//! Behavioural properties of smoothing, classification and action resolution


use hand_action_tracking::{
    action::{ActionResolver, ActionType},
    classifier::{Gesture, GestureClassifier},
    config::{Config, GestureConfig},
    features::GestureFeatures,
    gesture_service::GestureService,
    gesture_state::GestureState,
    landmarks::Point2,
    object_tracking::{ItemState, TrackedItem},
    smoothing::LandmarkSmoother,
};
use test_helpers::{detection, fist_hand, open_hand, pinch_hand, pointing_hand};

#[test]
fn test_sub_threshold_jitter_is_idempotent() {
    let mut smoother = LandmarkSmoother::default();
    let first = smoother.smooth(&[open_hand(0.0, 0.0)]);

    let mut jittered = open_hand(0.0, 0.0);
    for (i, point) in jittered.landmarks.iter_mut().enumerate() {
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        *point = Point2::new(point.x + sign * 0.004, point.y - sign * 0.003);
    }
    let second = smoother.smooth(&[jittered]);

    assert_eq!(first, second);
}

#[test]
fn test_pinch_saturation() {
    let features = GestureFeatures::extract(&pinch_hand(0.0, 0.0));
    assert_eq!(features.pinch_distance, 0.0);
    assert_eq!(GestureClassifier::default().classify(&features), (Gesture::Pinch, 1.0));
}

#[test]
fn test_fist_saturation() {
    let features = GestureFeatures::extract(&fist_hand(0.0, 0.0));
    assert!(features.grab_strength > 0.99, "grab strength {}", features.grab_strength);

    let (gesture, confidence) = GestureClassifier::default().classify(&features);
    assert_eq!(gesture, Gesture::Grab);
    assert_eq!(confidence, 1.0);
}

#[test]
fn test_open_hand_classification() {
    let features = GestureFeatures::extract(&open_hand(0.1, -0.1));
    let (gesture, confidence) = GestureClassifier::default().classify(&features);
    assert_eq!(gesture, Gesture::Open);
    assert!(confidence > 0.99);
}

#[test]
fn test_pointing_needs_raised_grab_threshold() {
    let features = GestureFeatures::extract(&pointing_hand(0.0, 0.0));
    assert_eq!(GestureClassifier::default().classify(&features).0, Gesture::Grab);

    let classifier = GestureClassifier::new(GestureConfig {
        grab_threshold: 0.8,
        ..GestureConfig::default()
    });
    assert_eq!(classifier.classify(&features).0, Gesture::Pointing);
}

#[test]
fn test_pickup_fires_once_over_open_pinch_pinch() {
    let resolver = ActionResolver::default();
    let mut state = GestureState::default();

    let mut actions = Vec::new();
    for gesture in [Gesture::Open, Gesture::Pinch, Gesture::Pinch] {
        state.update_gesture(gesture, 0.9);
        actions.push(resolver.resolve(gesture, 0.9, 0.5, 0.1, &state));
    }
    assert_eq!(actions, vec![ActionType::None, ActionType::Pickup, ActionType::Hold]);
}

#[test]
fn test_release_requires_grasp_history() {
    let resolver = ActionResolver::default();
    let mut state = GestureState::default();
    state.update_gesture(Gesture::Open, 1.0);
    assert_eq!(state.previous_gesture(), Gesture::None);

    for correlation in [0.0, 0.5, 1.0] {
        assert_ne!(resolver.resolve(Gesture::Open, 1.0, correlation, 0.0, &state), ActionType::Release);
    }
}

#[test]
fn test_release_through_service() {
    let mut config = Config::default();
    config.smoothing.enabled = false;
    let mut service = GestureService::new(config);
    service.motion_signal().store(0.01);

    let frames = [fist_hand(0.0, 0.0), fist_hand(0.01, 0.0), open_hand(0.02, 0.0)];
    let actions: Vec<ActionType> = frames
        .iter()
        .enumerate()
        .map(|(i, hand)| service.process_frame(std::slice::from_ref(hand), i as u64 * 33)[0].action_type)
        .collect();

    // First grab has correlation 0 (single wrist sample), so it is not a pickup
    assert_eq!(actions, vec![ActionType::None, ActionType::Hold, ActionType::Release]);
}

#[test]
fn test_low_confidence_suppression() {
    let classifier = GestureClassifier::default();

    let mut hand = pinch_hand(0.0, 0.0);
    // Thumb 0.03 away from the index tip: pinch rule matches at confidence 0.4
    hand.landmarks[4] = Point2::new(hand.landmarks[8].x + 0.03, hand.landmarks[8].y);
    let features = GestureFeatures::extract(&hand);
    assert!(features.pinch_distance < 0.05);
    assert_eq!(classifier.classify(&features), (Gesture::None, 0.0));
}

#[test]
fn test_carrying_only_via_picked_up() {
    let mut item = TrackedItem::detected(&detection(1, 0.5), 0);
    assert!(item.transition_to(ItemState::Carrying, 1).is_err());
    assert!(item.transition_to(ItemState::Disposed, 1).is_err());

    item.transition_to(ItemState::PickedUp, 2).unwrap();
    item.transition_to(ItemState::Carrying, 3).unwrap();
    assert_eq!(item.state, ItemState::Carrying);
    assert_eq!(item.state_entered_ms, 3);
}
