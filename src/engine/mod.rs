//! Playback engine: audio context, outputs, voices and the controller that
//! ties them together.

mod config;
mod context;
mod controller;
mod error;
mod output;
mod stream;
mod voice;

pub use config::{clamp_volume, EngineConfig, SoundDescriptor, SoundTable};
pub use context::{AudioContext, ContextState, LiveVoice, RenderMessage, Renderer};
pub use controller::{Engine, EngineBuilder, PlaybackState, STATUS_NOT_PLAYING};
pub use error::ContextError;
pub use output::{AudioOutput, CpalOutput, OfflineOutput};
pub use stream::{NoStreaming, StreamAttempt, StreamPlayer, StreamResolver, StreamResult};
pub use voice::{SynthVoice, Voice};
