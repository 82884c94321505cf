use crate::{
    dsp::modulate::block_average,
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Parameter Modulation
====================

Wires a slow signal into one parameter of another node:

    value = base + modulator × depth

With the ocean's wave gain (base 0.45, depth 0.35):
    modulator = -1.0  →  gain = 0.10
    modulator =  0.0  →  gain = 0.45
    modulator = +1.0  →  gain = 0.80

The modulator is rendered into scratch space and collapsed to one value per
block (see `dsp/modulate.rs`); the target owns clamping. The base value is
read back from the target every block, so it never drifts with the sweep.
*/

pub struct Modulate<S, M>
where
    S: GraphNode + Modulatable,
    M: GraphNode,
{
    target: S,
    modulator: M,
    param: S::Param,
    depth: f32,
    scratch: Vec<f32>,
}

impl<S, M> Modulate<S, M>
where
    S: GraphNode + Modulatable,
    M: GraphNode,
{
    pub fn new(target: S, modulator: M, param: S::Param, depth: f32) -> Self {
        Self {
            target,
            modulator,
            param,
            depth,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// The node being modulated.
    pub fn source(&self) -> &S {
        &self.target
    }
}

impl<S, M> GraphNode for Modulate<S, M>
where
    S: GraphNode + Modulatable,
    M: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let scratch = &mut self.scratch[..out.len().min(MAX_BLOCK_SIZE)];
        self.modulator.render_block(scratch, ctx);
        let offset = block_average(scratch) * self.depth;

        let base = self.target.get_param(self.param);
        self.target.apply_modulation(self.param, base, offset);
        self.target.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.target.is_active()
    }
}
