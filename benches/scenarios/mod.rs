//! Real-world scenario benchmarks.
//!
//! Complete soundscape graphs as the engine builds them, and the renderer
//! that runs them on the audio thread.

mod renderer;
mod soundscapes;

pub use renderer::bench_renderer;
pub use soundscapes::bench_soundscapes;
