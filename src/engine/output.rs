use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::engine::{context::Renderer, error::ContextError};

/// Where a context's renderer ends up.
pub trait AudioOutput {
    fn sample_rate(&self) -> f32;

    /// Take ownership of the renderer. Output stays paused until `resume`.
    fn start(&mut self, renderer: Renderer) -> Result<(), ContextError>;

    fn resume(&mut self) -> Result<(), ContextError>;

    fn suspend(&mut self) -> Result<(), ContextError>;
}

/// The system's default output device.
pub struct CpalOutput {
    device: cpal::Device,
    config: cpal::StreamConfig,
    stream: Option<cpal::Stream>,
}

impl CpalOutput {
    pub fn open_default() -> Result<Self, ContextError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(ContextError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate = config.sample_rate().0,
            channels = config.channels(),
            "opened output device"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
        })
    }

    pub fn channels(&self) -> usize {
        self.config.channels as usize
    }
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> f32 {
        self.config.sample_rate.0 as f32
    }

    fn start(&mut self, mut renderer: Renderer) -> Result<(), ContextError> {
        if self.stream.is_some() {
            return Err(ContextError::AlreadyStarted);
        }

        let channels = self.channels();
        let stream = self.device.build_output_stream(
            &self.config,
            move |data: &mut [f32], _| renderer.render(data, channels),
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )?;
        // Some hosts start streams as soon as they are built.
        stream.pause()?;

        self.stream = Some(stream);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), ContextError> {
        match self.stream.as_ref() {
            Some(stream) => Ok(stream.play()?),
            None => Err(ContextError::ResumeBlocked),
        }
    }

    fn suspend(&mut self) -> Result<(), ContextError> {
        if let Some(stream) = self.stream.as_ref() {
            stream.pause()?;
        }
        Ok(())
    }
}

/// Output that renders only when asked to.
///
/// Cloning yields another handle to the same output, so a test or an
/// offline bounce can keep one while the engine owns the other. A blocked
/// output refuses to resume, the way a platform does before any user
/// gesture.
#[derive(Clone)]
pub struct OfflineOutput {
    inner: Arc<Mutex<OfflineInner>>,
}

struct OfflineInner {
    sample_rate: f32,
    channels: usize,
    renderer: Option<Renderer>,
    running: bool,
    blocked: bool,
    resume_attempts: usize,
}

impl OfflineOutput {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_channels(sample_rate, 1)
    }

    pub fn with_channels(sample_rate: f32, channels: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(OfflineInner {
                sample_rate,
                channels: channels.max(1),
                renderer: None,
                running: false,
                blocked: false,
                resume_attempts: 0,
            })),
        }
    }

    /// An output that refuses to resume until [`unblock`](Self::unblock).
    pub fn blocked(sample_rate: f32) -> Self {
        let output = Self::new(sample_rate);
        output.lock().blocked = true;
        output
    }

    pub fn unblock(&self) {
        self.lock().blocked = false;
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Whether a context has attached its renderer.
    pub fn is_started(&self) -> bool {
        self.lock().renderer.is_some()
    }

    pub fn resume_attempts(&self) -> usize {
        self.lock().resume_attempts
    }

    /// Render `frames` interleaved frames. Silence while suspended.
    pub fn render(&self, frames: usize) -> Vec<f32> {
        let mut inner = self.lock();
        let channels = inner.channels;
        let mut out = vec![0.0; frames * channels];
        if inner.running {
            if let Some(renderer) = inner.renderer.as_mut() {
                renderer.render(&mut out, channels);
            }
        }
        out
    }

    /// Render `seconds` of audio.
    pub fn render_seconds(&self, seconds: f32) -> Vec<f32> {
        let frames = (seconds * self.lock().sample_rate).round() as usize;
        self.render(frames)
    }

    fn lock(&self) -> MutexGuard<'_, OfflineInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioOutput for OfflineOutput {
    fn sample_rate(&self) -> f32 {
        self.lock().sample_rate
    }

    fn start(&mut self, renderer: Renderer) -> Result<(), ContextError> {
        let mut inner = self.lock();
        if inner.renderer.is_some() {
            return Err(ContextError::AlreadyStarted);
        }
        inner.renderer = Some(renderer);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), ContextError> {
        let mut inner = self.lock();
        inner.resume_attempts += 1;
        if inner.blocked {
            return Err(ContextError::ResumeBlocked);
        }
        inner.running = true;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), ContextError> {
        self.lock().running = false;
        Ok(())
    }
}
