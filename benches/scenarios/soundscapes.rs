//! Benchmarks for every soundscape recipe.
//!
//! Each graph is warmed up for a few seconds first so the periodic layers
//! (forest, chimes) have live events and the ocean/wind LFOs are mid-sweep.

use std::{hint::black_box, sync::Arc};

use ambience::{
    graph::{Activity, GraphNode, RenderCtx},
    soundscapes::{BuildCtx, Soundscape},
};
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const WARMUP_SECONDS: f32 = 3.5;

fn warmed(soundscape: Soundscape, block: usize) -> (Box<dyn GraphNode>, RenderCtx) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut build = BuildCtx::new(SAMPLE_RATE, 2.0, &mut rng, Arc::new(Activity::new()));
    let mut node = soundscape.build(&mut build);

    let mut ctx = RenderCtx::new(SAMPLE_RATE);
    let mut buffer = vec![0.0f32; block];
    let blocks = (WARMUP_SECONDS * SAMPLE_RATE) as usize / block;
    for _ in 0..blocks {
        node.render_block(&mut buffer, &ctx);
        ctx.frame += block as u64;
    }
    (node, ctx)
}

pub fn bench_soundscapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/soundscapes");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for soundscape in Soundscape::ALL {
            let (mut node, ctx) = warmed(soundscape, size);
            group.bench_with_input(BenchmarkId::new(soundscape.name(), size), &size, |b, _| {
                b.iter(|| {
                    node.render_block(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }
    }

    group.finish();
}
