//! Parameter modulation primitives.

/*
Block-Rate Modulation
=====================

Ambient modulators are slow: the ocean swell and meditation breath run at
0.08 Hz, the wind wander at 0.05 Hz. One cycle spans 12-20 seconds, so
within a 512-sample block (~10 ms) the modulator barely moves. We evaluate
the modulator once per block (its average) and hold the target parameter
for that block:

    value = base + average(modulator block) * depth

Gain targets smooth the per-block steps on their own (see GainNode), so the
staircase is inaudible. Targets are responsible for clamping the result to
their valid range.
*/

/// Mean of a modulator block; zero for an empty block.
#[inline]
pub fn block_average(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}
