//! Criterion benchmarks for echora-core transforms
//!
//! Run with: cargo bench -p echora-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use echora_core::{
    AudioBuffer, ConvolutionEngine, EchoParameters, EchoSynthesizer, ImpulseResponse,
};

const SAMPLE_RATE: u32 = 48000;
const BUFFER_SECONDS: &[usize] = &[1, 5];
const KERNEL_SIZES: &[usize] = &[64, 1024, 16384];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn decaying_kernel(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| (-(i as f32) / (size as f32 / 4.0)).exp())
        .collect()
}

fn bench_echo(c: &mut Criterion) {
    let mut group = c.benchmark_group("Echo");
    let echo = EchoSynthesizer::new(EchoParameters::new(375, 0.5).unwrap());

    for &seconds in BUFFER_SECONDS {
        let buffer = AudioBuffer::stereo(
            generate_test_signal(SAMPLE_RATE as usize * seconds),
            generate_test_signal(SAMPLE_RATE as usize * seconds),
            SAMPLE_RATE,
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("stereo", seconds), &seconds, |b, _| {
            b.iter(|| black_box(echo.apply(black_box(&buffer)).unwrap()));
        });
    }

    group.finish();
}

fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("Convolution");
    group.sample_size(10);

    let buffer =
        AudioBuffer::mono(generate_test_signal(SAMPLE_RATE as usize), SAMPLE_RATE).unwrap();

    for &size in KERNEL_SIZES {
        let ir = ImpulseResponse::new(decaying_kernel(size), SAMPLE_RATE).unwrap();

        group.bench_with_input(BenchmarkId::new("fft", size), &size, |b, _| {
            let engine = ConvolutionEngine::new().with_fft_threshold(0);
            b.iter(|| black_box(engine.apply(black_box(&buffer), Some(&ir)).unwrap()));
        });

        if size <= 1024 {
            group.bench_with_input(BenchmarkId::new("direct", size), &size, |b, _| {
                let engine = ConvolutionEngine::new().with_fft_threshold(usize::MAX);
                b.iter(|| black_box(engine.apply(black_box(&buffer), Some(&ir)).unwrap()));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_echo, bench_convolution);

criterion_main!(benches);
