//! Forest voice.
//!
//! A soft pink-noise floor with the occasional bird. Every 1.6 s a coin is
//! flipped (55% heads) and, on heads, a short upward chirp is sung over the
//! bed.
//!
//! # Chirp
//!
//! - Sine gliding 650 → 1200 Hz in 120 ms (exponential, so it sounds even)
//! - 10 ms linear attack to 0.07, exponential decay, ~150 ms in total

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    dsp::noise::NoiseKind,
    graph::{burst::ToneBurst, extensions::NodeExt, periodic::Periodic, GraphNode},
    soundscapes::{noise_bed::noise_bed, BuildCtx, EVENT_INTERVAL_MS},
};

pub const CHIRP_PROBABILITY: f64 = 0.55;

/// One chirp event.
pub fn chirp() -> ToneBurst {
    ToneBurst::new(650.0, 0.01, 0.15, 0.07).with_sweep(650.0, 1200.0, 0.12)
}

pub fn forest(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    let bed = noise_bed(NoiseKind::Pink, 1200.0, 0.35, ctx);

    let birds = Periodic::new(
        EVENT_INTERVAL_MS,
        StdRng::from_rng(&mut *ctx.rng),
        ctx.activity.clone(),
        |rng: &mut StdRng| rng.random_bool(CHIRP_PROBABILITY).then(chirp),
    );

    bed.mix(birds)
}
