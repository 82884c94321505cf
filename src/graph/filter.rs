use crate::{
    dsp::filter::SVFilter,
    graph::node::{GraphNode, Modulatable, RenderCtx},
};

/*
State-Variable Filter (SVF)
===========================

Every noise soundscape is "white or pink noise, minus what we don't want".
The filter decides the character:

Lowpass (LP): passes below the cutoff.
  - 650 Hz:   wind, muffled and airy
  - 1200 Hz:  soft hiss bed (white/pink/fireplace)

Highpass (HP): passes above the cutoff.
  - 500 Hz:   strips the rumble out of rain

Bandpass (BP): passes a band around the cutoff, Q sets its width.
  - 220 Hz, Q 0.8: the low roar of surf

Chaining HP(500) into LP(4500) gives the rain band; chaining BP(220) into
LP(900) keeps the ocean dark.

Cutoff is modulatable, which is how the wind wanders:

  let wind = FilterNode::lowpass(650.0)
      .modulate(LfoNode::sine(0.05), FilterParam::Cutoff, 180.0);
  // Cutoff drifts 470 Hz - 830 Hz over a 20 second cycle
*/

#[derive(Clone, Copy, Debug)]
pub enum FilterParam {
    Cutoff,
    Q,
}

pub struct FilterNode {
    filter: SVFilter,
    base_cutoff: f32,
    base_q: f32,
}

impl FilterNode {
    fn from_filter(filter: SVFilter) -> Self {
        FilterNode {
            base_cutoff: filter.cutoff_hz,
            base_q: filter.q,
            filter,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::from_filter(SVFilter::lowpass(cutoff_hz))
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::from_filter(SVFilter::highpass(cutoff_hz))
    }

    pub fn bandpass(cutoff_hz: f32, q: f32) -> Self {
        Self::from_filter(SVFilter::bandpass(cutoff_hz, q))
    }

    /// Cutoff currently in effect, after modulation.
    pub fn cutoff(&self) -> f32 {
        self.filter.cutoff_hz
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
            FilterParam::Q => self.base_q,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let final_value = base + modulation;
        match param {
            FilterParam::Cutoff => {
                self.base_cutoff = base;
                self.filter.set_cutoff(final_value.clamp(20.0, 20_000.0));
            }
            FilterParam::Q => {
                self.base_q = base;
                self.filter.set_q(final_value.clamp(0.1, 20.0));
            }
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx.sample_rate);
    }
}
