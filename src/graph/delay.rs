use crate::{
    dsp::delay::DelayLine,
    graph::node::{GraphNode, RenderCtx},
};

/*
Feedback Delay
==============

    input ──┬──────────────────────────▶ (+) ──▶ out   (dry level)
            │                             ▲
            └──▶ (+) ──▶ [delay] ──┬──────┘            (wet level)
                  ▲                │
                  └── feedback ◀───┘

Each trip round the loop is scaled by `feedback` (< 1), so every echo is
quieter than the last and the tail dies away. Chimes use ~320 ms at 0.35
feedback: three or four audible repeats that read as a small reverberant
space.
*/

/// Longest delay any node may request.
pub const MAX_DELAY_SECONDS: f32 = 2.0;

pub struct DelayNode {
    delay_line: Option<DelayLine>,
    delay_ms: f32,
    feedback: f32,
    dry: f32,
    wet: f32,
}

impl DelayNode {
    /// Wet-only delay. Feedback is clamped below 1 so the loop always decays.
    pub fn new(delay_ms: f32, feedback: f32) -> Self {
        Self {
            delay_line: None,
            delay_ms: delay_ms.clamp(0.0, MAX_DELAY_SECONDS * 1000.0),
            feedback: feedback.clamp(0.0, 0.95),
            dry: 0.0,
            wet: 1.0,
        }
    }

    /// Pass the input through alongside the echoes.
    pub fn with_dry(mut self, dry: f32) -> Self {
        self.dry = dry;
        self
    }

    /// Allocate the delay line up front instead of on the first block.
    pub fn prepared(mut self, sample_rate: f32) -> Self {
        self.ensure_line(sample_rate);
        self
    }

    fn ensure_line(&mut self, sample_rate: f32) -> &mut DelayLine {
        self.delay_line
            .get_or_insert_with(|| DelayLine::new((MAX_DELAY_SECONDS * sample_rate) as usize))
    }
}

impl GraphNode for DelayNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let delay_samples = ((self.delay_ms / 1000.0) * ctx.sample_rate) as usize;
        let (feedback, dry, wet) = (self.feedback, self.dry, self.wet);
        let line = self.ensure_line(ctx.sample_rate);

        for sample in out.iter_mut() {
            let delayed = line.tap(delay_samples);
            line.push(*sample + delayed * feedback);
            *sample = *sample * dry + delayed * wet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_response(node: &mut DelayNode, sample_rate: f32, len: usize) -> Vec<f32> {
        let mut buffer = vec![0.0; len];
        buffer[0] = 1.0;
        node.render_block(&mut buffer, &RenderCtx::new(sample_rate));
        buffer
    }

    #[test]
    fn echoes_decay_by_feedback() {
        let sample_rate = 1_000.0;
        let mut node = DelayNode::new(100.0, 0.5).prepared(sample_rate);
        let out = impulse_response(&mut node, sample_rate, 400);

        assert_eq!(out[0], 0.0, "wet-only delay should not pass the dry impulse");
        assert!((out[100] - 1.0).abs() < 1e-6);
        assert!((out[200] - 0.5).abs() < 1e-6);
        assert!((out[300] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn dry_path_passes_input() {
        let sample_rate = 1_000.0;
        let mut node = DelayNode::new(50.0, 0.35).with_dry(1.0).prepared(sample_rate);
        let out = impulse_response(&mut node, sample_rate, 200);

        assert_eq!(out[0], 1.0);
        assert!((out[50] - 1.0).abs() < 1e-6);
        assert!((out[100] - 0.35).abs() < 1e-6);
    }

    #[test]
    fn feedback_is_kept_below_unity() {
        let sample_rate = 1_000.0;
        let mut node = DelayNode::new(10.0, 4.0).prepared(sample_rate);
        let out = impulse_response(&mut node, sample_rate, 2_000);
        assert!(out[1_990].abs() < 1.0);
        assert!(out.iter().all(|s| s.is_finite()));
    }
}
