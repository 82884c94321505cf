//! Benchmarks for the full render path: message drain, voice, master gain
//! and stereo fan-out, driven through an offline output.

use std::hint::black_box;

use ambience::{AudioOutput, Engine, EngineConfig, OfflineOutput};
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/renderer");

    for &size in BLOCK_SIZES {
        for sound in ["rain", "chimes"] {
            let output = OfflineOutput::with_channels(SAMPLE_RATE, 2);
            let factory_output = output.clone();
            let mut engine = Engine::builder()
                .config(EngineConfig::default().seed(3))
                .output(move || Ok(Box::new(factory_output.clone()) as Box<dyn AudioOutput>))
                .build();
            engine.play(sound);

            group.bench_with_input(BenchmarkId::new(sound, size), &size, |b, &frames| {
                b.iter(|| black_box(output.render(frames)))
            });

            engine.stop();
        }
    }

    group.finish();
}
