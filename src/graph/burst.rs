use crate::{
    dsp::{
        envelope::{ExpRamp, TransientEnvelope},
        oscillator::OscillatorBlock,
    },
    graph::node::{GraphNode, RenderCtx},
};

/*
Tone Burst
==========

A single short-lived sine event: one chime strike or one bird chirp.

    sine(freq or sweep) × envelope(attack, decay) ──▶ out

A chime holds one pitch and rings for ~2.5 s. A chirp glides upward
(650 → 1200 Hz in 120 ms) and is over in ~150 ms. Once the envelope reaches
its floor the burst reports inactive and its owner drops it.

Bursts ADD into the output block rather than overwrite it, so any number of
overlapping events can share one buffer.
*/

pub struct ToneBurst {
    osc: OscillatorBlock,
    frequency: f32,
    sweep: Option<ExpRamp>,
    envelope: TransientEnvelope,
    started: bool,
}

impl ToneBurst {
    /// Fixed-pitch burst.
    pub fn new(frequency: f32, attack: f32, duration: f32, peak: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
            sweep: None,
            envelope: TransientEnvelope::new(attack, duration, peak),
            started: false,
        }
    }

    /// Glide the pitch exponentially from `start` to `end` over `time`
    /// seconds, then hold `end`.
    pub fn with_sweep(mut self, start: f32, end: f32, time: f32) -> Self {
        self.frequency = start;
        self.sweep = Some(ExpRamp::new(start, end, time));
        self
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    fn start(&mut self, sample_rate: f32) {
        self.envelope.trigger();
        if let Some(sweep) = self.sweep.as_mut() {
            sweep.trigger(sample_rate);
        }
        self.started = true;
    }
}

impl GraphNode for ToneBurst {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if !self.started {
            self.start(ctx.sample_rate);
        }
        if !self.envelope.is_active() {
            return;
        }

        let sample_rate = ctx.sample_rate;
        for sample in out.iter_mut() {
            let frequency = match self.sweep.as_mut() {
                Some(sweep) => sweep.next_value(),
                None => self.frequency,
            };
            let tone = self.osc.next_sample(frequency, sample_rate);
            *sample += tone * self.envelope.next_sample(sample_rate);
        }
    }

    fn is_active(&self) -> bool {
        !self.started || self.envelope.is_active()
    }
}
