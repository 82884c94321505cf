//! Benchmarks for the feedback delay used by chimes.

use std::hint::black_box;

use ambience::graph::{delay::DelayNode, GraphNode, RenderCtx};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| ((i * 7) % 13) as f32 / 13.0 - 0.5).collect();
        let mut buffer = input.clone();

        let mut delay = DelayNode::new(320.0, 0.35).with_dry(1.0).prepared(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("chimes_echo", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                delay.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
