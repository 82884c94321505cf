pub mod dsp;
pub mod engine; // Context, playback and volume control
pub mod graph; // Composable audio graph nodes
pub mod soundscapes; // One recipe per named ambience

pub use engine::{
    AudioContext, AudioOutput, ContextError, CpalOutput, Engine, EngineBuilder, EngineConfig,
    OfflineOutput, PlaybackState, StreamPlayer, StreamResult,
};
pub use soundscapes::Soundscape;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
