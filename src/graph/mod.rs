//! Composable building blocks for constructing soundscape graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a recipe needs:
//! looping sources, block-rate modulation, one-shot events and the periodic
//! timers that spawn them. The `extensions` module adds fluent helpers so
//! recipes read as a single chain.

/// Shared counters the audio thread bumps for observers.
pub mod activity;
/// One-shot enveloped sine events (chime strikes, chirps).
pub mod burst;
/// Feedback delay with an optional dry path.
pub mod delay;
/// Fluent combinators (`.through()`, `.mix()`, etc.).
pub mod extensions;
/// Topology-preserving filter node with multiple responses.
pub mod filter;
/// Smoothed scalar gain.
pub mod gain;
/// Low frequency oscillators for parameter modulation.
pub mod lfo;
/// Additive summing of parallel graphs.
pub mod mix;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;
/// Sample-clock timers that spawn events.
pub mod periodic;
/// Looping buffer playback.
pub mod source;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use activity::Activity;
pub use extensions::NodeExt;
pub use node::{GraphNode, Modulatable, RenderCtx};
