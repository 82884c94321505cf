//! Contract with the streamed-asset player.
//!
//! The engine never decodes audio itself. It hands a locator to a
//! [`StreamPlayer`] and gets back a [`StreamAttempt`]: a one-shot slot the
//! player fills with [`StreamResult::Succeeded`] or [`StreamResult::Failed`]
//! whenever it knows, possibly from another thread.
//!
//! Dropping the attempt abandons it. A player that resolves an abandoned
//! attempt is not an error; the result just goes nowhere.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreamResult {
    Succeeded,
    Failed,
}

/// Engine side of one playback attempt.
#[derive(Debug)]
pub struct StreamAttempt {
    rx: Receiver<StreamResult>,
}

/// Player side of one playback attempt. Dropping it unresolved counts as
/// failure.
#[derive(Debug)]
pub struct StreamResolver {
    tx: Sender<StreamResult>,
}

impl StreamAttempt {
    /// An attempt the player will resolve later.
    pub fn pending() -> (StreamAttempt, StreamResolver) {
        let (tx, rx) = bounded(1);
        (StreamAttempt { rx }, StreamResolver { tx })
    }

    /// An attempt that already has its answer.
    pub fn resolved(result: StreamResult) -> Self {
        let (attempt, resolver) = Self::pending();
        resolver.resolve(result);
        attempt
    }

    pub fn succeeded() -> Self {
        Self::resolved(StreamResult::Succeeded)
    }

    pub fn failed() -> Self {
        Self::resolved(StreamResult::Failed)
    }

    /// Non-blocking check. `None` while the player is still working.
    ///
    /// The result is delivered once; callers should stop polling after the
    /// first `Some`.
    pub fn try_result(&self) -> Option<StreamResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(StreamResult::Failed),
        }
    }
}

impl StreamResolver {
    pub fn resolve(self, result: StreamResult) {
        // Receiver gone means the attempt was superseded.
        let _ = self.tx.send(result);
    }
}

/// Something that can loop a pre-recorded asset.
pub trait StreamPlayer {
    /// Begin looping the asset at `locator`. Must not block.
    fn play(&mut self, locator: &str, volume: f32) -> StreamAttempt;

    fn set_volume(&mut self, volume: f32);

    /// Stop playback, including an attempt that has not resolved yet.
    fn stop(&mut self);
}

/// Player with no assets: every attempt fails at once, so the engine always
/// synthesizes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStreaming;

impl StreamPlayer for NoStreaming {
    fn play(&mut self, _locator: &str, _volume: f32) -> StreamAttempt {
        StreamAttempt::failed()
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn stop(&mut self) {}
}
