//! Ocean voice.
//!
//! Low, band-limited noise whose loudness rises and falls like waves
//! rolling in. One full swell takes ~12.5 s (0.08 Hz).
//!
//! # How It Works
//!
//! 1. White noise provides the raw wash
//! 2. A wide bandpass around 220 Hz (Q 0.8) keeps the body of the surf
//! 3. A 900 Hz lowpass rounds off what hiss the bandpass lets through
//! 4. The gain (0.45) is pushed ±0.35 by a slow LFO: the swell

use crate::{
    dsp::noise::NoiseKind,
    graph::{
        extensions::NodeExt,
        filter::FilterNode,
        gain::{GainNode, GainParam},
        lfo::LfoNode,
        source::LoopSource,
        GraphNode,
    },
    soundscapes::BuildCtx,
};

pub const SWELL_HZ: f32 = 0.08;
pub const SWELL_DEPTH: f32 = 0.35;

pub fn ocean(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    let swell = GainNode::new(0.45)
        .with_smoothing_ms(20.0, ctx.sample_rate)
        .modulate(LfoNode::sine(SWELL_HZ), GainParam::Level, SWELL_DEPTH);

    LoopSource::noise(NoiseKind::White, ctx.noise_seconds, ctx.sample_rate, ctx.rng)
        .through(FilterNode::bandpass(220.0, 0.8))
        .through(FilterNode::lowpass(900.0))
        .through(swell)
}
