//! Filtered noise beds.
//!
//! The simplest soundscapes: a looped noise buffer shaped by one or two
//! filters and a fixed gain. White, pink, rain and fireplace are all beds;
//! forest lays its chirps over one.
//!
//! # How It Works
//!
//! 1. A noise buffer (white or pink, ~2 s) is generated once per start
//! 2. A looping source plays it back forever
//! 3. Filters carve out the band that gives each bed its character
//! 4. A fixed gain sets the level before the master stage
//!
//! # Variations
//!
//! - Pink under a 1200 Hz lowpass = soft, even hush (fireplace, forest floor)
//! - Highpass 500 + lowpass 4500 = the hiss of rain on a roof
//! - White under a lowpass = brighter, closer "fan" noise

use crate::{
    dsp::noise::NoiseKind,
    graph::{
        extensions::NodeExt, filter::FilterNode, gain::GainNode, source::LoopSource, GraphNode,
    },
    soundscapes::BuildCtx,
};

/// Lowpass applied to the plain white and pink beds.
pub const BED_CUTOFF_HZ: f32 = 1200.0;

/// Noise through a single lowpass and a gain.
pub fn noise_bed(kind: NoiseKind, cutoff: f32, gain: f32, ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    LoopSource::noise(kind, ctx.noise_seconds, ctx.sample_rate, ctx.rng)
        .through(FilterNode::lowpass(cutoff))
        .through(GainNode::new(gain))
}

/// Plain white-noise bed. Also the fallback for unknown names.
pub fn white(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    noise_bed(NoiseKind::White, BED_CUTOFF_HZ, 0.35, ctx)
}

/// Plain pink-noise bed.
pub fn pink(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    noise_bed(NoiseKind::Pink, BED_CUTOFF_HZ, 0.45, ctx)
}

/// Fireplace reuses the pink bed as-is.
pub fn fireplace(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    pink(ctx)
}

/// Rain: pink noise squeezed into a 500-4500 Hz band.
pub fn rain(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    LoopSource::noise(NoiseKind::Pink, ctx.noise_seconds, ctx.sample_rate, ctx.rng)
        // Drop the rumble
        .through(FilterNode::highpass(500.0))
        // Keep the top from getting harsh
        .through(FilterNode::lowpass(4500.0))
        .through(GainNode::new(0.5))
}
