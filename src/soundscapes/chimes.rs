//! Wind chimes.
//!
//! Every 1.6 s one of five tuned bars is struck at random. Each strike
//! rings for ~2.5 s, and a 320 ms feedback delay adds a few fading
//! repeats so the strikes blur into each other.
//!
//! # Signal Flow
//!
//! ```text
//! timer ──▶ strike(random note) ──┬──────────────▶ out
//!                                 └──▶ delay(320 ms, fb 0.35) ──┘
//! ```

use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

use crate::{
    graph::{burst::ToneBurst, delay::DelayNode, extensions::NodeExt, periodic::Periodic, GraphNode},
    soundscapes::{BuildCtx, EVENT_INTERVAL_MS},
};

/// G4 A4 C5 E5 G5.
pub const CHIME_NOTES: [f32; 5] = [392.0, 440.0, 523.25, 659.25, 784.0];

/// One bar, struck.
pub fn strike(frequency: f32) -> ToneBurst {
    ToneBurst::new(frequency, 0.01, 2.5, 0.12)
}

pub fn chimes(ctx: &mut BuildCtx<'_>) -> impl GraphNode {
    let strikes = Periodic::new(
        EVENT_INTERVAL_MS,
        StdRng::from_rng(&mut *ctx.rng),
        ctx.activity.clone(),
        |rng: &mut StdRng| CHIME_NOTES.choose(rng).copied().map(strike),
    );

    strikes.through(
        DelayNode::new(320.0, 0.35)
            .with_dry(1.0)
            .prepared(ctx.sample_rate),
    )
}
