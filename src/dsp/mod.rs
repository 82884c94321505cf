//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! Once constructed these components do not allocate, so they are safe to
//! embed directly inside render-thread node graphs. They stay focused on the
//! signal-processing math; graph nodes layer on block rendering and
//! modulation.

/// Circular delay line.
pub mod delay;
/// One-shot transient envelope and exponential ramps.
pub mod envelope;
/// State-variable filter with low/high/band-pass responses.
pub mod filter;
/// Block-rate modulation helpers.
pub mod modulate;
/// White and pink noise buffers.
pub mod noise;
/// Sine oscillator.
pub mod oscillator;

pub use envelope::EnvelopeState;
pub use noise::NoiseKind;
