use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Anything the playback controller can silence.
pub trait Voice {
    /// Stop producing sound. Calling it again does nothing.
    fn stop(&mut self);

    fn is_stopped(&self) -> bool;
}

/// Control-side handle to a synthesized soundscape running on the renderer.
///
/// The handle shares a flag with the render-side slot. Stopping sets the
/// flag; the renderer retires the graph, its timers included, before the
/// next block it renders. Dropping the handle stops the voice.
#[derive(Debug)]
pub struct SynthVoice {
    id: u64,
    sound: String,
    stopped: Arc<AtomicBool>,
}

impl SynthVoice {
    pub(crate) fn new(id: u64, sound: impl Into<String>, stopped: Arc<AtomicBool>) -> Self {
        Self {
            id,
            sound: sound.into(),
            stopped,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn sound(&self) -> &str {
        &self.sound
    }
}

impl Voice for SynthVoice {
    fn stop(&mut self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            tracing::debug!(voice = self.id, sound = %self.sound, "voice stopped");
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl Drop for SynthVoice {
    fn drop(&mut self) {
        self.stop();
    }
}
