use std::f32::consts::TAU;

/// Phase-accumulating sine oscillator.
///
/// Phase is kept in [0, 1) so it never loses precision on long-running drones
/// and LFOs, which can run for hours.
#[derive(Debug, Clone, Default)]
pub struct OscillatorBlock {
    phase: f32,
}

impl OscillatorBlock {
    pub fn sine() -> Self {
        Self { phase: 0.0 }
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = (TAU * self.phase).sin();
        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        value
    }

    pub fn render(&mut self, destination: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in destination.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
