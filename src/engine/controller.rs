//! Playback and volume control.
//!
//! ```text
//!            play(name)                     attempt resolves Succeeded
//!   Idle ──────────────▶ StreamAttempting ──────────────────────────▶ StreamPlaying
//!    ▲                        │
//!    │ stop()                 │ attempt resolves Failed
//!    │                        ▼
//!    └──────────────────── Synthesizing
//! ```
//!
//! Every `play` first tears down whatever is active, streamed or
//! synthesized, and only then starts the next request. A newer request
//! always wins: an older attempt that resolves late is ignored.

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use rtrb::Producer;

use crate::{
    engine::{
        config::{clamp_volume, EngineConfig, SoundDescriptor, SoundTable},
        context::{AudioContext, ContextState},
        error::ContextError,
        output::{AudioOutput, CpalOutput},
        stream::{NoStreaming, StreamAttempt, StreamPlayer, StreamResult},
        voice::{SynthVoice, Voice},
    },
    graph::Activity,
    soundscapes::BuildCtx,
};

pub const STATUS_NOT_PLAYING: &str = "Not playing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaybackState {
    Idle,
    StreamAttempting,
    StreamPlaying,
    Synthesizing,
}

type OutputFactory = Box<dyn FnMut() -> Result<Box<dyn AudioOutput>, ContextError>>;
type StatusSink = Box<dyn FnMut(&str)>;

/// The single voice the engine may have. Either kind, never both.
enum ActiveVoice {
    Streamed {
        sound: String,
        /// `Some` until the player has answered.
        attempt: Option<StreamAttempt>,
    },
    Synth(SynthVoice),
}

impl ActiveVoice {
    fn sound(&self) -> &str {
        match self {
            ActiveVoice::Streamed { sound, .. } => sound,
            ActiveVoice::Synth(voice) => voice.sound(),
        }
    }
}

pub struct EngineBuilder {
    config: EngineConfig,
    player: Box<dyn StreamPlayer>,
    output: OutputFactory,
    scope: Option<Producer<f32>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            player: Box::new(NoStreaming),
            output: Box::new(|| {
                CpalOutput::open_default().map(|o| Box::new(o) as Box<dyn AudioOutput>)
            }),
            scope: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player(mut self, player: impl StreamPlayer + 'static) -> Self {
        self.player = Box::new(player);
        self
    }

    /// How to open an output when synthesis first needs one. Called again
    /// on the next request if it fails.
    pub fn output<F>(mut self, factory: F) -> Self
    where
        F: FnMut() -> Result<Box<dyn AudioOutput>, ContextError> + 'static,
    {
        self.output = Box::new(factory);
        self
    }

    /// Receive a copy of every rendered (mono, post-master) sample.
    pub fn scope(mut self, tap: Producer<f32>) -> Self {
        self.scope = Some(tap);
        self
    }

    pub fn build(self) -> Engine {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let sounds = SoundTable::new(&self.config);
        let volume = clamp_volume(self.config.initial_volume);

        Engine {
            config: self.config,
            sounds,
            player: self.player,
            output: self.output,
            scope: self.scope,
            context: None,
            active: None,
            state: PlaybackState::Idle,
            volume,
            status_sink: None,
            rng,
            activity: Arc::new(Activity::new()),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Plays one ambience at a time, streamed if possible, synthesized if not.
pub struct Engine {
    config: EngineConfig,
    sounds: SoundTable,
    player: Box<dyn StreamPlayer>,
    output: OutputFactory,
    scope: Option<Producer<f32>>,
    context: Option<AudioContext>,
    active: Option<ActiveVoice>,
    state: PlaybackState,
    volume: f32,
    status_sink: Option<StatusSink>,
    rng: StdRng,
    activity: Arc<Activity>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Default output device, no streaming.
    pub fn new(config: EngineConfig) -> Self {
        EngineBuilder::new().config(config).build()
    }

    /// Start playing `name`, replacing whatever is playing.
    ///
    /// Unknown names play white noise. If the player answers at once the
    /// outcome is settled before this returns; otherwise [`poll`](Self::poll)
    /// picks it up.
    pub fn play(&mut self, name: &str) {
        self.teardown();

        if let Some(context) = self.context.as_mut() {
            if let Err(err) = context.resume() {
                tracing::warn!(%err, "could not resume audio context");
            }
        }

        let descriptor = self.sounds.resolve(name);
        self.set_state(PlaybackState::StreamAttempting, name);
        let attempt = self.player.play(&descriptor.locator, self.volume);

        match attempt.try_result() {
            Some(result) => {
                self.active = Some(ActiveVoice::Streamed {
                    sound: descriptor.name.clone(),
                    attempt: None,
                });
                self.settle(result, &descriptor);
            }
            None => {
                self.active = Some(ActiveVoice::Streamed {
                    sound: descriptor.name,
                    attempt: Some(attempt),
                });
            }
        }
    }

    /// Stop everything. Always reports "Not playing".
    pub fn stop(&mut self) {
        self.teardown();
        self.emit(STATUS_NOT_PLAYING);
    }

    /// Clamp to [0, 1] and apply to the master gain and any streamed voice.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.volume = volume;

        if let Some(context) = self.context.as_ref() {
            context.set_master_gain(volume);
        }
        if matches!(self.active, Some(ActiveVoice::Streamed { .. })) {
            self.player.set_volume(volume);
        }
        tracing::debug!(volume, "volume set");
    }

    /// Register the status sink, replacing any previous one.
    pub fn on_status(&mut self, sink: impl FnMut(&str) + 'static) {
        self.status_sink = Some(Box::new(sink));
    }

    /// Pick up a pending stream result and free retired graphs.
    ///
    /// Hosts call this from their own loop; it never blocks.
    pub fn poll(&mut self) {
        if let Some(context) = self.context.as_mut() {
            context.collect_retired();
        }

        let result = match &self.active {
            Some(ActiveVoice::Streamed {
                attempt: Some(attempt),
                ..
            }) => attempt.try_result(),
            _ => None,
        };
        let Some(result) = result else {
            return;
        };

        let Some(ActiveVoice::Streamed { sound, attempt }) = self.active.as_mut() else {
            return;
        };
        *attempt = None;
        let descriptor = self.sounds.resolve(sound);
        self.settle(result, &descriptor);
    }

    /// Retry resuming a suspended context, e.g. after a user gesture.
    pub fn resume_audio(&mut self) -> Result<(), ContextError> {
        match self.context.as_mut() {
            Some(context) => context.resume(),
            None => Ok(()),
        }
    }

    /// Pause audio output, e.g. when the host is backgrounded. The next
    /// [`play`](Self::play) or [`resume_audio`](Self::resume_audio) resumes it.
    pub fn suspend_audio(&mut self) -> Result<(), ContextError> {
        match self.context.as_mut() {
            Some(context) => context.suspend(),
            None => Ok(()),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Name of the sound being played or attempted.
    pub fn active_sound(&self) -> Option<&str> {
        self.active.as_ref().map(ActiveVoice::sound)
    }

    pub fn activity(&self) -> &Arc<Activity> {
        &self.activity
    }

    pub fn sounds(&self) -> &SoundTable {
        &self.sounds
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `None` until synthesis has needed a context.
    pub fn context_state(&self) -> Option<ContextState> {
        self.context.as_ref().map(AudioContext::state)
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.context.as_ref().map(AudioContext::sample_rate)
    }

    fn settle(&mut self, result: StreamResult, descriptor: &SoundDescriptor) {
        match result {
            StreamResult::Succeeded => {
                self.set_state(PlaybackState::StreamPlaying, &descriptor.name);
                self.emit(&format!("Playing ({})", descriptor.name));
            }
            StreamResult::Failed => {
                tracing::debug!(sound = %descriptor.name, "stream unavailable, synthesizing");
                self.player.stop();
                self.active = None;
                self.synthesize(descriptor);
            }
        }
    }

    fn synthesize(&mut self, descriptor: &SoundDescriptor) {
        let voice = match self.start_synth(descriptor) {
            Ok(voice) => voice,
            Err(err) => {
                // Status stays as it was; the next play retries.
                tracing::warn!(%err, sound = %descriptor.name, "synthesis deferred");
                self.set_state(PlaybackState::Idle, &descriptor.name);
                return;
            }
        };

        self.active = Some(ActiveVoice::Synth(voice));
        self.set_state(PlaybackState::Synthesizing, &descriptor.name);
        self.emit(&format!("Playing ({})", descriptor.name));
    }

    fn start_synth(&mut self, descriptor: &SoundDescriptor) -> Result<SynthVoice, ContextError> {
        if self.context.is_none() {
            let output = (self.output)()?;
            let context = AudioContext::new(
                output,
                &self.config,
                self.volume,
                self.activity.clone(),
                self.scope.take(),
            )?;
            self.context = Some(context);
        }
        let Some(context) = self.context.as_mut() else {
            return Err(ContextError::NoOutputDevice);
        };
        context.resume()?;

        let mut ctx = BuildCtx::new(
            context.sample_rate(),
            self.config.noise_seconds,
            &mut self.rng,
            self.activity.clone(),
        );
        let node = descriptor.recipe.build(&mut ctx);
        context.start_voice(node, &descriptor.name)
    }

    fn teardown(&mut self) {
        match self.active.take() {
            Some(ActiveVoice::Synth(mut voice)) => voice.stop(),
            Some(ActiveVoice::Streamed { sound, attempt }) => {
                if attempt.is_some() {
                    tracing::debug!(%sound, "abandoning stream attempt");
                }
                self.player.stop();
            }
            None => {}
        }
        if let Some(context) = self.context.as_mut() {
            context.collect_retired();
        }
        self.state = PlaybackState::Idle;
    }

    fn set_state(&mut self, state: PlaybackState, sound: &str) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, sound, "playback state");
        }
        self.state = state;
    }

    fn emit(&mut self, text: &str) {
        if let Some(sink) = self.status_sink.as_mut() {
            sink(text);
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::output::OfflineOutput;
    use std::{cell::RefCell, rc::Rc};

    fn offline_engine(output: &OfflineOutput) -> Engine {
        let output = output.clone();
        Engine::builder()
            .config(EngineConfig::default().seed(1).noise_seconds(0.1))
            .output(move || Ok(Box::new(output.clone()) as Box<dyn AudioOutput>))
            .build()
    }

    fn status_log(engine: &mut Engine) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        engine.on_status(move |text| sink.borrow_mut().push(text.to_string()));
        log
    }

    #[test]
    fn context_is_created_lazily() {
        let output = OfflineOutput::new(48_000.0);
        let mut engine = offline_engine(&output);
        assert_eq!(engine.context_state(), None);

        engine.set_volume(0.3);
        assert_eq!(engine.context_state(), None);

        engine.play("rain");
        assert_eq!(engine.context_state(), Some(ContextState::Running));
        assert!(output.is_started());
    }

    #[test]
    fn play_synthesizes_without_streaming() {
        let output = OfflineOutput::new(48_000.0);
        let mut engine = offline_engine(&output);
        let log = status_log(&mut engine);

        engine.play("ocean");
        assert_eq!(engine.state(), PlaybackState::Synthesizing);
        assert_eq!(engine.active_sound(), Some("ocean"));
        assert_eq!(log.borrow().as_slice(), ["Playing (ocean)"]);
    }

    #[test]
    fn failed_output_leaves_engine_idle_and_retries() {
        let opened = Rc::new(RefCell::new(0));
        let counter = opened.clone();
        let mut engine = Engine::builder()
            .output(move || {
                *counter.borrow_mut() += 1;
                Err(ContextError::NoOutputDevice)
            })
            .build();
        let log = status_log(&mut engine);

        engine.play("wind");
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert!(log.borrow().is_empty());

        engine.play("wind");
        assert_eq!(*opened.borrow(), 2);
    }

    #[test]
    fn volume_is_clamped() {
        let output = OfflineOutput::new(48_000.0);
        let mut engine = offline_engine(&output);
        engine.set_volume(-1.0);
        assert_eq!(engine.volume(), 0.0);
        engine.set_volume(2.0);
        assert_eq!(engine.volume(), 1.0);
        engine.set_volume(f32::NAN);
        assert_eq!(engine.volume(), 0.0);
    }

    #[test]
    fn suspended_audio_resumes_on_next_play() {
        let output = OfflineOutput::new(48_000.0);
        let mut engine = offline_engine(&output);
        assert!(engine.suspend_audio().is_ok(), "no context yet is fine");

        engine.play("white");
        assert_eq!(engine.context_state(), Some(ContextState::Running));

        assert!(engine.suspend_audio().is_ok());
        assert_eq!(engine.context_state(), Some(ContextState::Suspended));
        assert!(output.render(256).iter().all(|&s| s == 0.0));
        assert_eq!(engine.state(), PlaybackState::Synthesizing);

        engine.play("pink");
        assert_eq!(engine.context_state(), Some(ContextState::Running));
        output.render(4_800);
        assert!(output.render(4_800).iter().any(|&s| s != 0.0));
    }
}
