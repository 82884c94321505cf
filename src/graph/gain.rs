use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/*
Gain Stage
==========

Scalar multiply with a one-pole smoother in front of the level:

    smoothed = target + coeff * (smoothed - target)

coeff = 0 jumps instantly; coeff = exp(-1 / samples) reaches ~63% of a new
target after `samples`. Smoothing matters in two places:

  - Modulated gains (ocean swell, meditation breath) only update once per
    block; smoothing turns the staircase into a curve.
  - The master volume: an abrupt jump clicks, a few milliseconds of ramp
    does not.
*/

#[derive(Clone, Copy, Debug)]
pub enum GainParam {
    Level,
}

pub struct GainNode {
    level: f32,
    base_level: f32,
    smoothed: f32,
    smooth_coeff: f32,
}

impl GainNode {
    pub fn new(level: f32) -> Self {
        Self {
            level,
            base_level: level,
            smoothed: level,
            smooth_coeff: 0.0,
        }
    }

    /// Ramp level changes over roughly `ms` milliseconds.
    pub fn with_smoothing_ms(mut self, ms: f32, sample_rate: f32) -> Self {
        let samples = (ms / 1000.0) * sample_rate;
        self.smooth_coeff = if samples > 1.0 {
            (-1.0 / samples).exp()
        } else {
            0.0
        };
        self
    }

    /// Set a new target level; the smoother glides toward it.
    pub fn set_level(&mut self, level: f32) {
        self.level = level;
        self.base_level = level;
    }

    /// Target level.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Level actually applied to the most recent sample.
    pub fn current(&self) -> f32 {
        self.smoothed
    }
}

impl Modulatable for GainNode {
    type Param = GainParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            GainParam::Level => self.base_level,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            GainParam::Level => {
                self.base_level = base;
                self.level = (base + modulation).max(0.0);
            }
        }
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let target = self.level;
        let coeff = self.smooth_coeff;
        let mut gain = self.smoothed;

        for sample in out.iter_mut() {
            gain = target + coeff * (gain - target);
            *sample *= gain;
        }

        self.smoothed = gain;
    }
}
