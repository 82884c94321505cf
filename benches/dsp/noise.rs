//! Benchmarks for noise buffer generation.
//!
//! Buffers are generated on the control thread at every voice start, so
//! this is a latency cost on `play`, not a per-block cost.

use std::hint::black_box;

use ambience::dsp::noise::{generate_noise_buffer, NoiseKind};
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use crate::SAMPLE_RATE;

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");
    let mut rng = StdRng::seed_from_u64(0);

    for seconds in [0.5f32, 2.0] {
        group.bench_with_input(BenchmarkId::new("white", seconds), &seconds, |b, &s| {
            b.iter(|| generate_noise_buffer(NoiseKind::White, black_box(s), SAMPLE_RATE, &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("pink", seconds), &seconds, |b, &s| {
            b.iter(|| generate_noise_buffer(NoiseKind::Pink, black_box(s), SAMPLE_RATE, &mut rng))
        });
    }

    group.finish();
}
