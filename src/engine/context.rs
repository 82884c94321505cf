//! The audio context: one per engine, split across two threads.
//!
//! ```text
//!  control thread                         audio thread
//!  ┌──────────────┐  RenderMessage (rtrb)  ┌──────────────┐
//!  │ AudioContext │ ─────────────────────▶ │   Renderer   │ ──▶ device
//!  │              │ ◀───────────────────── │ voices+master│
//!  └──────────────┘  retired graphs (rtrb) └──────────────┘
//! ```
//!
//! The renderer never locks, and never frees a graph on the audio thread:
//! retired graphs travel back to the control side and are dropped in
//! [`AudioContext::collect_retired`]. The master level is not a message at
//! all. It lives in a shared atomic the renderer reads once per block, so
//! the latest volume always wins however many changes were made while the
//! renderer was idle.

use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::{
    engine::{error::ContextError, output::AudioOutput, voice::SynthVoice, EngineConfig},
    graph::{gain::GainNode, Activity, GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Voices the renderer can hold without reallocating.
const VOICE_SLOTS: usize = 8;

/// Retired graphs that can wait for the control side to collect them.
const RETIRED_SLOTS: usize = VOICE_SLOTS * 4;

/// Master level as f32 bits, written by the control side.
#[derive(Debug)]
struct MasterLevel(AtomicU32);

impl MasterLevel {
    fn new(level: f32) -> Self {
        Self(AtomicU32::new(level.to_bits()))
    }

    fn store(&self, level: f32) {
        self.0.store(level.to_bits(), Ordering::Relaxed);
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Suspended,
    Running,
}

/// Render-side slot for one synthesized voice.
pub struct LiveVoice {
    id: u64,
    node: Box<dyn GraphNode>,
    stopped: Arc<AtomicBool>,
}

pub enum RenderMessage {
    StartVoice(LiveVoice),
}

/// Audio-thread half. Owned by the output once started.
pub struct Renderer {
    messages: Consumer<RenderMessage>,
    retired: Producer<Box<dyn GraphNode>>,
    voices: Vec<LiveVoice>,
    master: GainNode,
    master_level: Arc<MasterLevel>,
    block: Vec<f32>,
    voice_buf: Vec<f32>,
    sample_rate: f32,
    frame: u64,
    activity: Arc<Activity>,
    scope: Option<Producer<f32>>,
}

impl Renderer {
    /// Render interleaved output. Mono is copied to every channel.
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

            self.process_messages();
            self.retire_stopped();

            let level = self.master_level.load();
            if level != self.master.level() {
                self.master.set_level(level);
            }

            let ctx = RenderCtx {
                sample_rate: self.sample_rate,
                frame: self.frame,
            };

            let block = &mut self.block[..frames];
            block.fill(0.0);
            for voice in self.voices.iter_mut() {
                // Stopped but still waiting for a retired slot.
                if voice.stopped.load(Ordering::Acquire) {
                    continue;
                }
                let vbuf = &mut self.voice_buf[..frames];
                vbuf.fill(0.0);
                voice.node.render_block(vbuf, &ctx);
                for (out, &sample) in block.iter_mut().zip(vbuf.iter()) {
                    *out += sample;
                }
            }
            self.master.render_block(block, &ctx);

            if let Some(scope) = self.scope.as_mut() {
                for &sample in block.iter() {
                    if scope.push(sample).is_err() {
                        break;
                    }
                }
            }

            let out_off = frames_written * channels;
            for (i, &s) in block.iter().enumerate() {
                for ch in 0..channels {
                    data[out_off + i * channels + ch] = s;
                }
            }

            frames_written += frames;
            self.frame += frames as u64;
        }

        // Trailing samples that don't fill a frame
        for sample in data[total_frames * channels..].iter_mut() {
            *sample = 0.0;
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.messages.pop() {
            match msg {
                RenderMessage::StartVoice(voice) => {
                    self.voices.push(voice);
                    self.activity.voice_started();
                }
            }
        }
    }

    fn retire_stopped(&mut self) {
        let mut i = 0;
        while i < self.voices.len() {
            if self.voices[i].stopped.load(Ordering::Acquire) {
                let LiveVoice { id, node, stopped } = self.voices.swap_remove(i);
                match self.retired.push(node) {
                    Ok(()) => self.activity.voice_retired(),
                    Err(PushError::Full(node)) => {
                        // No room to hand it back yet; parked silent until there is.
                        self.voices.push(LiveVoice { id, node, stopped });
                        return;
                    }
                }
            } else {
                i += 1;
            }
        }
    }
}

/// Control-side half: the one audio context an engine owns.
pub struct AudioContext {
    output: Box<dyn AudioOutput>,
    messages: Producer<RenderMessage>,
    retired: Consumer<Box<dyn GraphNode>>,
    master_level: Arc<MasterLevel>,
    state: ContextState,
    sample_rate: f32,
    next_voice: u64,
}

impl AudioContext {
    /// Hand a fresh renderer to `output`. The context starts suspended.
    pub fn new(
        mut output: Box<dyn AudioOutput>,
        config: &EngineConfig,
        volume: f32,
        activity: Arc<Activity>,
        scope: Option<Producer<f32>>,
    ) -> Result<Self, ContextError> {
        let sample_rate = output.sample_rate();
        let capacity = config.queue_capacity.max(1);
        let (messages, messages_rx) = RingBuffer::new(capacity);
        let (retired_tx, retired) = RingBuffer::new(RETIRED_SLOTS);
        let master_level = Arc::new(MasterLevel::new(volume));

        let renderer = Renderer {
            messages: messages_rx,
            retired: retired_tx,
            voices: Vec::with_capacity(VOICE_SLOTS),
            master: GainNode::new(volume).with_smoothing_ms(config.volume_ramp_ms, sample_rate),
            master_level: master_level.clone(),
            block: vec![0.0; MAX_BLOCK_SIZE],
            voice_buf: vec![0.0; MAX_BLOCK_SIZE],
            sample_rate,
            frame: 0,
            activity,
            scope,
        };
        output.start(renderer)?;

        tracing::info!(sample_rate, "audio context created");
        Ok(Self {
            output,
            messages,
            retired,
            master_level,
            state: ContextState::Suspended,
            sample_rate,
            next_voice: 0,
        })
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// No-op when already running.
    pub fn resume(&mut self) -> Result<(), ContextError> {
        if self.state == ContextState::Running {
            return Ok(());
        }
        self.output.resume()?;
        self.state = ContextState::Running;
        tracing::debug!("audio context resumed");
        Ok(())
    }

    /// Pause the output. Voices keep their place and continue on resume.
    pub fn suspend(&mut self) -> Result<(), ContextError> {
        if self.state == ContextState::Suspended {
            return Ok(());
        }
        self.output.suspend()?;
        self.state = ContextState::Suspended;
        tracing::debug!("audio context suspended");
        Ok(())
    }

    /// Picked up by the next rendered block, whether or not the context is running.
    pub fn set_master_gain(&self, level: f32) {
        self.master_level.store(level);
    }

    pub fn master_gain(&self) -> f32 {
        self.master_level.load()
    }

    /// Send a graph to the renderer. It starts with the next rendered block.
    pub fn start_voice(
        &mut self,
        node: Box<dyn GraphNode>,
        sound: &str,
    ) -> Result<SynthVoice, ContextError> {
        self.collect_retired();

        let id = self.next_voice;
        let stopped = Arc::new(AtomicBool::new(false));
        let live = LiveVoice {
            id,
            node,
            stopped: stopped.clone(),
        };
        self.messages
            .push(RenderMessage::StartVoice(live))
            .map_err(|_| ContextError::QueueFull)?;

        self.next_voice += 1;
        tracing::debug!(voice = id, sound, "voice started");
        Ok(SynthVoice::new(id, sound, stopped))
    }

    /// Drop graphs the renderer has finished with. Returns how many.
    pub fn collect_retired(&mut self) -> usize {
        let mut count = 0;
        while let Ok(node) = self.retired.pop() {
            drop(node);
            count += 1;
        }
        count
    }
}

impl std::fmt::Debug for LiveVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveVoice").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{output::OfflineOutput, voice::Voice};
    use crate::graph::source::LoopSource;

    fn context(output: &OfflineOutput, activity: Arc<Activity>) -> AudioContext {
        let config = EngineConfig::default().volume_ramp_ms(0.0);
        match AudioContext::new(Box::new(output.clone()), &config, 1.0, activity, None) {
            Ok(ctx) => ctx,
            Err(err) => panic!("context: {err}"),
        }
    }

    fn dc(level: f32) -> Box<dyn GraphNode> {
        Box::new(LoopSource::new(vec![level]))
    }

    #[test]
    fn silent_until_resumed() {
        let output = OfflineOutput::new(48_000.0);
        let mut ctx = context(&output, Arc::new(Activity::new()));
        let _voice = ctx.start_voice(dc(0.5), "dc").ok();

        assert_eq!(ctx.state(), ContextState::Suspended);
        assert!(output.render(64).iter().all(|&s| s == 0.0));

        assert!(ctx.resume().is_ok());
        assert_eq!(ctx.state(), ContextState::Running);
        assert!(output.render(64).iter().all(|&s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn stopped_voice_is_retired_before_next_block() {
        let output = OfflineOutput::new(48_000.0);
        let activity = Arc::new(Activity::new());
        let mut ctx = context(&output, activity.clone());
        assert!(ctx.resume().is_ok());

        let Ok(mut first) = ctx.start_voice(dc(0.25), "a") else {
            panic!("start failed");
        };
        output.render(32);
        assert_eq!(activity.live_voices(), 1);

        first.stop();
        let Ok(_second) = ctx.start_voice(dc(0.5), "b") else {
            panic!("start failed");
        };
        let block = output.render(32);
        assert!(block.iter().all(|&s| (s - 0.5).abs() < 1e-6), "old voice leaked");
        assert_eq!(activity.live_voices(), 1);
        assert_eq!(ctx.collect_retired(), 1);
    }

    #[test]
    fn master_gain_scales_output() {
        let output = OfflineOutput::new(48_000.0);
        let mut ctx = context(&output, Arc::new(Activity::new()));
        assert!(ctx.resume().is_ok());
        let _voice = ctx.start_voice(dc(1.0), "dc");
        ctx.set_master_gain(0.2);
        assert!(output.render(16).iter().all(|&s| (s - 0.2).abs() < 1e-6));
    }

    #[test]
    fn interleaves_mono_to_every_channel() {
        let output = OfflineOutput::with_channels(48_000.0, 2);
        let mut ctx = context(&output, Arc::new(Activity::new()));
        assert!(ctx.resume().is_ok());
        let _voice = ctx.start_voice(Box::new(LoopSource::new(vec![0.1, 0.2])), "ramp");
        let out = output.render(2);
        assert_eq!(out.len(), 4);
        assert!((out[0] - 0.1).abs() < 1e-6 && (out[1] - 0.1).abs() < 1e-6);
        assert!((out[2] - 0.2).abs() < 1e-6 && (out[3] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn full_queue_is_reported() {
        let output = OfflineOutput::new(48_000.0);
        let config = EngineConfig::default().queue_capacity(1);
        let Ok(mut ctx) =
            AudioContext::new(Box::new(output.clone()), &config, 1.0, Arc::new(Activity::new()), None)
        else {
            panic!("context");
        };
        assert!(ctx.start_voice(dc(0.1), "a").is_ok());
        assert!(matches!(ctx.start_voice(dc(0.2), "b"), Err(ContextError::QueueFull)));
    }

    #[test]
    fn gain_changes_never_fill_the_queue() {
        let output = OfflineOutput::new(48_000.0);
        let config = EngineConfig::default().queue_capacity(1).volume_ramp_ms(0.0);
        let Ok(mut ctx) =
            AudioContext::new(Box::new(output.clone()), &config, 1.0, Arc::new(Activity::new()), None)
        else {
            panic!("context");
        };

        // Suspended: nothing drains, yet only the last level matters.
        for step in 0..200 {
            ctx.set_master_gain(step as f32 / 200.0);
        }
        ctx.set_master_gain(0.3);
        assert_eq!(ctx.master_gain(), 0.3);

        let Ok(_voice) = ctx.start_voice(dc(1.0), "dc") else {
            panic!("voice queue should still have room");
        };
        assert!(ctx.resume().is_ok());
        assert!(output.render(16).iter().all(|&s| (s - 0.3).abs() < 1e-6));
    }

    #[test]
    fn suspend_silences_until_resumed() {
        let output = OfflineOutput::new(48_000.0);
        let mut ctx = context(&output, Arc::new(Activity::new()));
        assert!(ctx.resume().is_ok());
        let _voice = ctx.start_voice(dc(0.5), "dc");
        assert!(output.render(16).iter().all(|&s| (s - 0.5).abs() < 1e-6));

        assert!(ctx.suspend().is_ok());
        assert_eq!(ctx.state(), ContextState::Suspended);
        assert!(output.render(16).iter().all(|&s| s == 0.0));

        assert!(ctx.resume().is_ok());
        assert!(output.render(16).iter().all(|&s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn stopped_voices_wait_for_a_retired_slot() {
        let activity = Arc::new(Activity::new());
        let (mut messages, messages_rx) = RingBuffer::new(4);
        let (retired_tx, mut retired) = RingBuffer::new(1);
        let mut renderer = Renderer {
            messages: messages_rx,
            retired: retired_tx,
            voices: Vec::with_capacity(VOICE_SLOTS),
            master: GainNode::new(1.0),
            master_level: Arc::new(MasterLevel::new(1.0)),
            block: vec![0.0; MAX_BLOCK_SIZE],
            voice_buf: vec![0.0; MAX_BLOCK_SIZE],
            sample_rate: 48_000.0,
            frame: 0,
            activity: activity.clone(),
            scope: None,
        };

        let flags: Vec<Arc<AtomicBool>> = (0..2).map(|_| Arc::new(AtomicBool::new(false))).collect();
        for (id, stopped) in flags.iter().enumerate() {
            let live = LiveVoice {
                id: id as u64,
                node: dc(0.25),
                stopped: stopped.clone(),
            };
            assert!(messages.push(RenderMessage::StartVoice(live)).is_ok());
        }
        let mut out = vec![0.0; 32];
        renderer.render(&mut out, 1);
        assert!(out.iter().all(|&s| (s - 0.5).abs() < 1e-6));

        for stopped in &flags {
            stopped.store(true, Ordering::Release);
        }
        renderer.render(&mut out, 1);
        assert!(out.iter().all(|&s| s == 0.0), "stopped voice still audible");
        assert_eq!(activity.live_voices(), 1, "one voice parked for lack of room");

        assert!(retired.pop().is_ok());
        renderer.render(&mut out, 1);
        assert_eq!(activity.live_voices(), 0);
        assert!(retired.pop().is_ok());
    }
}
