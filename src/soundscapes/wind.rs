//! Wind voice.
//!
//! Noise under a lowpass whose cutoff wanders between ~470 and ~830 Hz
//! over a 20 second cycle, so gusts brighten and fade without the level
//! changing much.

use crate::{
    dsp::noise::NoiseKind,
    graph::{
        extensions::NodeExt,
        filter::{FilterNode, FilterParam},
        gain::GainNode,
        lfo::LfoNode,
        source::LoopSource,
        GraphNode,
    },
    soundscapes::BuildCtx,
};

pub const WANDER_HZ: f32 = 0.05;
pub const WANDER_DEPTH_HZ: f32 = 180.0;

pub fn wind(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    LoopSource::noise(NoiseKind::White, ctx.noise_seconds, ctx.sample_rate, ctx.rng)
        .through(FilterNode::lowpass(650.0).modulate(
            LfoNode::sine(WANDER_HZ),
            FilterParam::Cutoff,
            WANDER_DEPTH_HZ,
        ))
        .through(GainNode::new(0.25))
}
