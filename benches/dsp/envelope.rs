//! Benchmarks for one-shot events: the envelope alone and a full tone burst.

use std::hint::black_box;

use ambience::{
    dsp::envelope::TransientEnvelope,
    graph::{burst::ToneBurst, GraphNode, RenderCtx},
};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut env = TransientEnvelope::new(0.01, 2.5, 0.12);
        group.bench_with_input(BenchmarkId::new("transient", size), &size, |b, _| {
            b.iter(|| {
                if !env.is_active() {
                    env.trigger();
                }
                for sample in buffer.iter_mut() {
                    *sample = env.next_sample(black_box(SAMPLE_RATE));
                }
            })
        });

        // Re-created when spent so every iteration does real work
        let mut chirp = ToneBurst::new(650.0, 0.01, 0.15, 0.07).with_sweep(650.0, 1200.0, 0.12);
        group.bench_with_input(BenchmarkId::new("chirp", size), &size, |b, _| {
            b.iter(|| {
                if !chirp.is_active() {
                    chirp = ToneBurst::new(650.0, 0.01, 0.15, 0.07).with_sweep(650.0, 1200.0, 0.12);
                }
                buffer.fill(0.0);
                chirp.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
