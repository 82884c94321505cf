use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counters shared between the audio thread and the control side.
///
/// The audio thread only ever increments or decrements; readers get a
/// relaxed snapshot, which is all tests and the UI need.
#[derive(Debug, Default)]
pub struct Activity {
    timer_ticks: AtomicU64,
    events_fired: AtomicU64,
    live_voices: AtomicUsize,
}

impl Activity {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_tick(&self) {
        self.timer_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_event(&self) {
        self.events_fired.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn voice_started(&self) {
        self.live_voices.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn voice_retired(&self) {
        // Never wraps below zero even if a retire is double-counted.
        let _ = self
            .live_voices
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// Periodic timer callbacks run so far, whether or not they spawned an event.
    pub fn timer_ticks(&self) -> u64 {
        self.timer_ticks.load(Ordering::Relaxed)
    }

    /// One-shot events (chirps, strikes) actually spawned.
    pub fn events_fired(&self) -> u64 {
        self.events_fired.load(Ordering::Relaxed)
    }

    /// Synthesized voices the renderer is currently producing.
    pub fn live_voices(&self) -> usize {
        self.live_voices.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_count_saturates_at_zero() {
        let activity = Activity::new();
        activity.voice_started();
        activity.voice_retired();
        activity.voice_retired();
        assert_eq!(activity.live_voices(), 0);
    }

    #[test]
    fn counters_accumulate() {
        let activity = Activity::new();
        activity.record_tick();
        activity.record_tick();
        activity.record_event();
        assert_eq!(activity.timer_ticks(), 2);
        assert_eq!(activity.events_fired(), 1);
    }
}
