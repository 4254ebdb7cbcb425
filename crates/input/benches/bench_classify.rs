use std::hint::black_box;
use std::time::{Duration, Instant};

use gesturespace_input::pose::HandPose;
use gesturespace_input::{Classifier, FingerMask, InputConfig, LandmarkSnapshot, hand_channel};

fn snapshots() -> Vec<LandmarkSnapshot> {
    (0..32u8)
        .map(|bits| HandPose::new(FingerMask::from_bits(bits)).snapshot())
        .collect()
}

fn bench_classify(iterations: usize) {
    let classifier = Classifier::default();
    let snaps = snapshots();

    let start = Instant::now();
    for i in 0..iterations {
        let snap = &snaps[i % snaps.len()];
        black_box(classifier.classify(Some(black_box(snap))));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  classify ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_pipeline(iterations: usize) {
    let (mut pipeline, reader) = hand_channel(&InputConfig::default());
    let snaps = snapshots();

    let start = Instant::now();
    for i in 0..iterations {
        let snap = snaps[i % snaps.len()].clone();
        black_box(pipeline.ingest_at(Some(snap), Duration::from_millis(i as u64 * 16)));
        if i % 64 == 0 {
            black_box(reader.drain_edges());
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  pipeline ingest ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== gesturespace-input benchmarks ===");
    bench_classify(100_000);
    bench_classify(1_000_000);
    bench_pipeline(100_000);
}
