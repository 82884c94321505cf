use crate::MIN_TIME;

/*
Transient Envelope
==================

Chime strikes and bird chirps are one-shot events: they rise quickly, then
fade away. There is no sustain and no note-off.

  Level
   peak ┐  ╱╲
        │ ╱  ╲
        │╱    ╲_
        │        ‾‾‾‾────___
   0.0  └──────────────────────→ Time
        Attack     Decay

Attack is a LINEAR ramp from 0 to `peak` (10-20 ms is enough to avoid a
click without softening the strike).

Decay is EXPONENTIAL: each sample the level is multiplied by a fixed ratio,
so it falls by the same number of dB per second. That matches how struck
metal and small resonant bodies actually die away. An exponential curve never
reaches zero, so we ramp toward a floor (0.0001, -80 dB relative to full
scale) and go Idle when we get there.

    ratio = (floor / peak) ^ (1 / decay_samples)

The same "multiply by a constant ratio" trick gives exponential frequency
sweeps (ExpRamp), which sound like an even glide in pitch.
*/

/// Level an exponential decay heads toward before the envelope goes idle.
pub const DECAY_FLOOR: f32 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
}

/// One-shot linear-attack, exponential-decay envelope.
#[derive(Debug, Clone)]
pub struct TransientEnvelope {
    attack_time: f32, // seconds to ramp 0 → peak
    decay_time: f32,  // seconds to fall peak → floor
    peak: f32,

    stage: EnvelopeState,
    level: f32,
    decay_ratio: f32,
}

impl TransientEnvelope {
    /// `duration` is the whole event length; decay takes whatever attack leaves.
    pub fn new(attack: f32, duration: f32, peak: f32) -> Self {
        let attack_time = attack.max(MIN_TIME);
        Self {
            attack_time,
            decay_time: (duration - attack_time).max(MIN_TIME),
            peak: peak.max(DECAY_FLOOR * 2.0),
            stage: EnvelopeState::Idle,
            level: 0.0,
            decay_ratio: 1.0,
        }
    }

    pub fn trigger(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
    }

    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                let increment = self.peak / (self.attack_time * sample_rate);
                self.level += increment;

                if self.level >= self.peak {
                    self.level = self.peak;
                    let decay_samples = (self.decay_time * sample_rate).max(1.0);
                    self.decay_ratio = (DECAY_FLOOR / self.peak).powf(1.0 / decay_samples);
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                self.level *= self.decay_ratio;

                if self.level <= DECAY_FLOOR {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }
}

/// Exponential glide from `start` to `end` over a fixed time, then holds `end`.
#[derive(Debug, Clone)]
pub struct ExpRamp {
    start: f32,
    end: f32,
    time: f32,
    value: f32,
    ratio: f32,
    remaining: u32,
}

impl ExpRamp {
    /// Both endpoints must be positive; they are floored to a small epsilon.
    pub fn new(start: f32, end: f32, time: f32) -> Self {
        let start = start.max(1e-6);
        Self {
            start,
            end: end.max(1e-6),
            time: time.max(MIN_TIME),
            value: start,
            ratio: 1.0,
            remaining: 0,
        }
    }

    pub fn trigger(&mut self, sample_rate: f32) {
        let samples = (self.time * sample_rate).round().max(1.0);
        self.value = self.start;
        self.ratio = (self.end / self.start).powf(1.0 / samples);
        self.remaining = samples as u32;
    }

    #[inline]
    pub fn next_value(&mut self) -> f32 {
        let current = self.value;
        if self.remaining > 0 {
            self.value *= self.ratio;
            self.remaining -= 1;
            if self.remaining == 0 {
                self.value = self.end;
            }
        }
        current
    }
}
