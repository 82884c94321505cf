use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Processing
=================

`.through()` renders the source into the block, then lets the effect
rewrite that block in place:

    noise ──▶ highpass ──▶ lowpass ──▶ gain

  let rain = LoopSource::noise(NoiseKind::Pink, 2.0, sr, &mut rng)
      .through(FilterNode::highpass(500.0))
      .through(FilterNode::lowpass(4500.0))
      .through(GainNode::new(0.5));

Chains nest left to right, so the innermost source always renders first.
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
