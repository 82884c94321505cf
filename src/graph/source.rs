use std::sync::Arc;

use rand::Rng;

use crate::{
    dsp::noise::{generate_noise_buffer, NoiseKind},
    graph::node::{GraphNode, RenderCtx},
};

/// Plays a pre-rendered buffer forever, wrapping at the end.
///
/// The buffer is shared so several voices (or a restart) can reuse one
/// allocation.
pub struct LoopSource {
    buffer: Arc<[f32]>,
    position: usize,
}

impl LoopSource {
    pub fn new(buffer: impl Into<Arc<[f32]>>) -> Self {
        let buffer = buffer.into();
        Self {
            buffer: if buffer.is_empty() {
                Arc::from(vec![0.0])
            } else {
                buffer
            },
            position: 0,
        }
    }

    /// Generate a fresh noise buffer and loop it.
    pub fn noise<R: Rng + ?Sized>(
        kind: NoiseKind,
        duration_secs: f32,
        sample_rate: f32,
        rng: &mut R,
    ) -> Self {
        Self::new(generate_noise_buffer(kind, duration_secs, sample_rate, rng))
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl GraphNode for LoopSource {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let mut written = 0;
        while written < out.len() {
            let run = (self.buffer.len() - self.position).min(out.len() - written);
            out[written..written + run]
                .copy_from_slice(&self.buffer[self.position..self.position + run]);
            written += run;
            self.position = (self.position + run) % self.buffer.len();
        }
    }
}
