//! Criterion benchmarks for reparo-pitch detection and correction
//!
//! Run with: cargo bench -p reparo-pitch
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use reparo_core::SampleBuffer;
use reparo_pitch::{
    PitchClass, Scale, apply_pitch_shift, correct_to_scale, detect_notes, estimate_frequency,
};

const SAMPLE_RATE: f32 = 44100.0;

fn generate_test_signal(len: usize) -> SampleBuffer {
    SampleBuffer::from_fn(len, SAMPLE_RATE, |i| {
        let t = i as f32 / SAMPLE_RATE;
        (2.0 * std::f32::consts::PI * 233.0 * t).sin() * 0.5
    })
}

fn bench_estimate(c: &mut Criterion) {
    let window = generate_test_signal(4096);
    c.bench_function("estimate_frequency/4096", |b| {
        b.iter(|| black_box(estimate_frequency(black_box(window.samples()), SAMPLE_RATE)));
    });
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_notes");
    group.sample_size(10);

    for secs in [1_usize, 5] {
        let buffer = generate_test_signal(secs * SAMPLE_RATE as usize);
        group.bench_with_input(BenchmarkId::from_parameter(secs), &secs, |b, _| {
            b.iter(|| black_box(detect_notes(black_box(&buffer))));
        });
    }

    group.finish();
}

fn bench_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("correct_to_scale");
    group.sample_size(10);

    let buffer = generate_test_signal(SAMPLE_RATE as usize);
    group.bench_function("1s_c_major", |b| {
        b.iter(|| black_box(correct_to_scale(&buffer, Scale::Major, PitchClass::C)));
    });

    group.finish();
}

fn bench_shift(c: &mut Criterion) {
    let buffer = generate_test_signal(4096);
    c.bench_function("apply_pitch_shift/4096", |b| {
        b.iter(|| black_box(apply_pitch_shift(black_box(buffer.samples()), 0.7)));
    });
}

criterion_group!(benches, bench_estimate, bench_detect, bench_correct, bench_shift);
criterion_main!(benches);
