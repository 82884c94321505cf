//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use ambience::dsp::filter::SVFilter;
use criterion::{BenchmarkId, Criterion};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        let filters = [
            ("lowpass", SVFilter::lowpass(1200.0)),
            ("highpass", SVFilter::highpass(500.0)),
            ("bandpass", SVFilter::bandpass(220.0, 0.8)),
        ];
        for (name, mut filter) in filters {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(SAMPLE_RATE));
                })
            });
        }

        // Cutoff moves every block, as under the wind LFO
        let mut filter = SVFilter::lowpass(650.0);
        let mut cutoff = 470.0;
        group.bench_with_input(BenchmarkId::new("lowpass_swept", size), &size, |b, _| {
            b.iter(|| {
                cutoff = if cutoff > 830.0 { 470.0 } else { cutoff + 1.0 };
                filter.set_cutoff(cutoff);
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(SAMPLE_RATE));
            })
        });
    }

    group.finish();
}
