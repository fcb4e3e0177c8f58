//! Benchmarks for the per-frame gesture pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_action_tracking::{
    classifier::GestureClassifier,
    config::Config,
    constants::{FINGER_CHAINS, NUM_HAND_LANDMARKS, WRIST},
    features::GestureFeatures,
    gesture_service::GestureService,
    landmarks::{BoundingBox, HandObservation, Handedness, Point2},
    object_tracking::{Detection, ItemCategory},
    pipeline::FramePipeline,
    session::SessionFrame,
    smoothing::LandmarkSmoother,
};

/// Open hand with per-landmark noise, wrist drifting along x
fn noisy_hand(frame: usize) -> HandObservation {
    let dx = (frame % 50) as f32 * 0.004;
    let mut points = vec![Point2::default(); NUM_HAND_LANDMARKS];
    points[WRIST] = Point2::new(0.5 + dx, 0.8);
    for (joint, (x, y)) in [(0.45, 0.75), (0.40, 0.70), (0.36, 0.65), (0.32, 0.60)].into_iter().enumerate() {
        points[joint + 1] = Point2::new(x + dx, y);
    }
    for (finger, x) in [(1usize, 0.46f32), (2, 0.50), (3, 0.54), (4, 0.58)] {
        for (joint, y) in FINGER_CHAINS[finger].iter().zip([0.65f32, 0.58, 0.53, 0.48]) {
            points[*joint] = Point2::new(x + dx, y);
        }
    }
    for point in &mut points {
        point.x += (rand::random::<f32>() - 0.5) * 0.01;
        point.y += (rand::random::<f32>() - 0.5) * 0.01;
    }
    HandObservation::new(points, Handedness::Right, frame as u64 * 33)
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let hands: Vec<HandObservation> = (0..100).map(noisy_hand).collect();

    group.bench_function("smooth_sequence_100", |b| {
        let mut smoother = LandmarkSmoother::default();
        b.iter(|| {
            smoother.reset();
            for hand in &hands {
                black_box(smoother.smooth(std::slice::from_ref(hand)));
            }
        });
    });

    group.bench_function("extract_features", |b| {
        b.iter(|| black_box(GestureFeatures::extract(black_box(&hands[0]))));
    });

    let classifier = GestureClassifier::default();
    let features = GestureFeatures::extract(&hands[0]);
    group.bench_function("classify", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&features))));
    });

    group.finish();
}

fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_frame");

    for num_hands in [1usize, 2] {
        let frames: Vec<Vec<HandObservation>> = (0..100)
            .map(|i| {
                (0..num_hands)
                    .map(|h| {
                        let mut hand = noisy_hand(i);
                        for point in &mut hand.landmarks {
                            point.x -= h as f32 * 0.4;
                        }
                        hand
                    })
                    .collect()
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("sequence_100", num_hands), &frames, |b, frames| {
            let mut service = GestureService::new(Config::default());
            service.motion_signal().store(0.02);
            b.iter(|| {
                service.reset();
                for (i, hands) in frames.iter().enumerate() {
                    black_box(service.process_frame(hands, i as u64 * 33));
                }
            });
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let frames: Vec<SessionFrame> = (0..100)
        .map(|i| SessionFrame {
            timestamp_ms: i as u64 * 33,
            acceleration: Some([0.0, 0.02, 0.0]),
            hands: vec![noisy_hand(i)],
            detections: (0..5u64)
                .map(|id| Detection {
                    tracking_id: id,
                    category: ItemCategory::Recycle,
                    bounding_box: BoundingBox::new(0.1 * id as f32, 0.3, 0.1 * id as f32 + 0.08, 0.4),
                    confidence: 0.9,
                })
                .collect(),
            disposals: Vec::new(),
        })
        .collect();

    c.bench_function("pipeline_sequence_100", |b| {
        let mut pipeline = FramePipeline::new(Config::default());
        b.iter(|| {
            pipeline.reset();
            for frame in &frames {
                black_box(pipeline.process(frame));
            }
        });
    });
}

criterion_group!(benches, bench_stages, bench_process_frame, bench_pipeline);
criterion_main!(benches);
