use crate::{
    dsp::oscillator::OscillatorBlock,
    graph::node::{GraphNode, RenderCtx},
};

/*
Drone Oscillator
================

A continuous sine at a fixed pitch. Ambience uses it for the meditation
drone, where a single low partial (110 Hz, A2) sits under everything else
without drawing attention:

  let drone = OscNode::sine(110.0)
      .through(GainNode::new(0.12).modulate(LfoNode::sine(0.08), GainParam::Level, 0.06));

A pure sine has no harmonics to filter, so the only thing worth animating is
its level; that happens downstream in the gain stage.
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: f32,
}

impl OscNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency: frequency.clamp(20.0, 20_000.0),
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }
}
