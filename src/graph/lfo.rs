use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, RenderCtx},
};

/*
LFO (Low Frequency Oscillator)
==============================

An oscillator far below hearing range (here 0.05-0.08 Hz, one cycle every
12-20 seconds) whose bipolar output in [-1, +1] drives another node's
parameter through `.modulate()`:

  Ocean swell:       LFO 0.08 Hz → wave gain,    depth 0.35
  Wind wander:       LFO 0.05 Hz → LP cutoff,    depth 180 Hz
  Meditation breath: LFO 0.08 Hz → drone gain,   depth 0.06

The LFO is free-running: it starts at phase 0 when the voice is built and
never resets.
*/

pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32,
}

impl LfoNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }
}
