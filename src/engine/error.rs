use thiserror::Error;

/// Failures opening or driving the audio context.
///
/// None of these escape `Engine::play`/`stop`/`set_volume`; the engine logs
/// them and degrades to silence.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no default output device available")]
    NoOutputDevice,
    #[error("failed to fetch output config: {0}")]
    DeviceConfig(String),
    #[error("failed to build output stream")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream")]
    Play(#[from] cpal::PlayStreamError),
    #[error("failed to pause output stream")]
    Pause(#[from] cpal::PauseStreamError),
    #[error("audio output refused to resume")]
    ResumeBlocked,
    #[error("render queue full")]
    QueueFull,
    #[error("output already has a renderer")]
    AlreadyStarted,
}

impl From<cpal::DefaultStreamConfigError> for ContextError {
    fn from(value: cpal::DefaultStreamConfigError) -> Self {
        Self::DeviceConfig(value.to_string())
    }
}
