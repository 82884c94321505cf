//! Noise buffers for the noise-bed soundscapes.

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Noise Colours
=============

White noise has equal energy per hertz: every sample is an independent
uniform draw in [-1, 1]. It sounds bright and hissy.

Pink noise has equal energy per octave (power falls off as ~1/f). It sounds
softer and is the base of rain, fireplace and forest beds.

Pink from White (Paul Kellet)
-----------------------------

A bank of one-pole lowpass filters with staggered poles sums to a response
that tracks -3 dB/octave within ±0.05 dB above ~9 Hz:

    b0 = 0.99886 b0 + w * 0.0555179
    b1 = 0.99332 b1 + w * 0.0750759
    b2 = 0.96900 b2 + w * 0.1538520
    b3 = 0.86650 b3 + w * 0.3104856
    b4 = 0.55000 b4 + w * 0.5329522
    b5 = -0.7616 b5 - w * 0.0168980
    pink = b0 + b1 + b2 + b3 + b4 + b5 + b6 + w * 0.5362
    b6 = w * 0.115926

The sum peaks around 9x the input, so it is scaled by ~0.11 to land in the
same range as the white input.

Looping
-------

A voice generates one buffer (2 s by default) and loops it. At that length the
filter bank has long since settled, so the loop point is inaudible without a
crossfade.
*/

/// Scale applied to the Kellet filter bank output.
pub const PINK_SCALE: f32 = 0.11;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    White,
    Pink,
}

/// Paul Kellet's "refined" pink filter: six one-pole states plus a direct term.
#[derive(Debug, Clone, Default)]
pub struct PinkFilter {
    b: [f32; 7],
}

impl PinkFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_sample(&mut self, white: f32) -> f32 {
        let b = &mut self.b;
        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;
        let pink = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + white * 0.5362;
        b[6] = white * 0.115926;
        pink * PINK_SCALE
    }
}

/// Fill a fresh buffer of `duration_secs` at `sample_rate` with noise.
///
/// Always returns at least one sample so it can be looped.
pub fn generate_noise_buffer<R: Rng + ?Sized>(
    kind: NoiseKind,
    duration_secs: f32,
    sample_rate: f32,
    rng: &mut R,
) -> Vec<f32> {
    let len = (duration_secs.max(0.0) * sample_rate).ceil().max(1.0) as usize;
    let mut buffer = Vec::with_capacity(len);

    match kind {
        NoiseKind::White => {
            buffer.extend((0..len).map(|_| rng.random_range(-1.0f32..=1.0)));
        }
        NoiseKind::Pink => {
            let mut pink = PinkFilter::new();
            buffer.extend((0..len).map(|_| pink.next_sample(rng.random_range(-1.0f32..=1.0))));
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rustfft::{num_complex::Complex, FftPlanner};

    /// Fraction of spectral power that sits below `split_hz`.
    fn low_band_share(buffer: &[f32], sample_rate: f32, split_hz: f32) -> f32 {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(buffer.len());
        let mut bins: Vec<Complex<f32>> = buffer.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut bins);

        let half = buffer.len() / 2;
        let split_bin = (split_hz * buffer.len() as f32 / sample_rate) as usize;
        let power = |c: &Complex<f32>| c.re * c.re + c.im * c.im;
        let low: f32 = bins[1..split_bin].iter().map(power).sum();
        let total: f32 = bins[1..half].iter().map(power).sum();
        low / total
    }

    #[test]
    fn white_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let buffer = generate_noise_buffer(NoiseKind::White, 0.5, 48_000.0, &mut rng);
        assert_eq!(buffer.len(), 24_000);
        assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn pink_amplitude_is_comparable_to_white() {
        let mut rng = StdRng::seed_from_u64(11);
        let buffer = generate_noise_buffer(NoiseKind::Pink, 2.0, 48_000.0, &mut rng);
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();

        assert!(peak <= 1.2, "pink peak too hot: {peak}");
        assert!(rms > 0.02, "pink rms too quiet: {rms}");
    }

    #[test]
    fn zero_duration_still_yields_a_loopable_buffer() {
        let mut rng = StdRng::seed_from_u64(1);
        let buffer = generate_noise_buffer(NoiseKind::Pink, 0.0, 44_100.0, &mut rng);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn pink_spectrum_tilts_toward_low_frequencies() {
        let sample_rate = 48_000.0;
        let len = 1 << 16;
        let duration = len as f32 / sample_rate;

        // Two independent random streams; both must show the tilt.
        for seed in [3, 99] {
            let mut rng = StdRng::seed_from_u64(seed);
            let white = generate_noise_buffer(NoiseKind::White, duration, sample_rate, &mut rng);
            let mut rng = StdRng::seed_from_u64(seed + 1_000);
            let pink = generate_noise_buffer(NoiseKind::Pink, duration, sample_rate, &mut rng);

            let white_low = low_band_share(&white[..len], sample_rate, 1_000.0);
            let pink_low = low_band_share(&pink[..len], sample_rate, 1_000.0);

            // White: ~1/24 of power below 1 kHz. Pink: the majority of it.
            assert!(white_low < 0.1, "white low share {white_low}");
            assert!(pink_low > 0.4, "pink low share {pink_low}");
            assert!(pink_low > white_low * 5.0);
        }
    }
}
