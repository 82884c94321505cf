use std::sync::Arc;

use rand::rngs::StdRng;

use crate::graph::{
    activity::Activity,
    node::{GraphNode, RenderCtx},
};

/*
Periodic Event Layer
====================

Forest chirps and chime strikes come from a timer that fires every
`interval_ms` for as long as the sound is playing:

    |-- interval --|-- interval --|-- interval --|
                   ▲              ▲              ▲
                 tick           tick           tick
                   │              │
                 spawn?         spawn?   (spawner decides, may return None)

The timer counts SAMPLES, not wall-clock time, and lives inside the voice
graph. When a voice is retired its timer goes with it: there is nothing left
to cancel and no callback can fire into a sound that has stopped.

Events are sample-accurate: a tick landing in the middle of a block starts
its event at that exact sample. The first tick happens one full interval
after the layer starts rendering.

Live events are held in a pool reserved up front. A tick that finds the pool
full is still counted, but its event is skipped rather than allocating on
the audio thread.
*/

/// Events a layer can have sounding at once.
pub const EVENT_POOL_SIZE: usize = 8;

pub struct Periodic<E, F>
where
    E: GraphNode,
    F: FnMut(&mut StdRng) -> Option<E> + Send,
{
    interval_ms: f32,
    countdown: Option<u64>,
    spawn: F,
    rng: StdRng,
    events: Vec<E>,
    activity: Arc<Activity>,
}

impl<E, F> Periodic<E, F>
where
    E: GraphNode,
    F: FnMut(&mut StdRng) -> Option<E> + Send,
{
    pub fn new(interval_ms: f32, rng: StdRng, activity: Arc<Activity>, spawn: F) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            countdown: None,
            spawn,
            rng,
            events: Vec::with_capacity(EVENT_POOL_SIZE),
            activity,
        }
    }

    /// Events currently sounding.
    pub fn live_events(&self) -> usize {
        self.events.len()
    }

    fn interval_samples(&self, sample_rate: f32) -> u64 {
        ((self.interval_ms / 1000.0) * sample_rate).round().max(1.0) as u64
    }

    fn tick(&mut self) {
        self.activity.record_tick();
        let Some(event) = (self.spawn)(&mut self.rng) else {
            return;
        };
        if self.events.len() >= EVENT_POOL_SIZE {
            self.events.retain(|e| e.is_active());
        }
        if self.events.len() < EVENT_POOL_SIZE {
            self.events.push(event);
            self.activity.record_event();
        }
    }
}

impl<E, F> GraphNode for Periodic<E, F>
where
    E: GraphNode,
    F: FnMut(&mut StdRng) -> Option<E> + Send,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);

        let interval = self.interval_samples(ctx.sample_rate);
        let mut countdown = self.countdown.unwrap_or(interval);
        let mut pos = 0;

        while pos < out.len() {
            if countdown == 0 {
                self.tick();
                countdown = interval;
            }

            let run = (countdown.min((out.len() - pos) as u64)) as usize;
            let segment = &mut out[pos..pos + run];
            for event in self.events.iter_mut() {
                event.render_block(segment, ctx);
            }

            countdown -= run as u64;
            pos += run;
        }

        self.countdown = Some(countdown);
        self.events.retain(|e| e.is_active());
    }
}
