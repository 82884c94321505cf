//! Named ambiences.
//!
//! Each soundscape is a recipe: a function that wires noise sources,
//! oscillators, filters and timers into one graph. `Soundscape` is the
//! lookup table from a sound name to its recipe.
//!
//! # Example
//!
//! ```ignore
//! use ambience::soundscapes::{BuildCtx, Soundscape};
//!
//! let mut ctx = BuildCtx::new(48_000.0, 2.0, &mut rng, activity);
//! let ocean = Soundscape::from_name("ocean").unwrap_or_default().build(&mut ctx);
//! ```

use std::sync::Arc;

use rand::rngs::StdRng;

use crate::graph::{Activity, GraphNode, NodeExt};

mod chimes;
mod forest;
mod meditation;
mod noise_bed;
mod ocean;
mod wind;

pub use chimes::{chimes, strike, CHIME_NOTES};
pub use forest::{chirp, forest, CHIRP_PROBABILITY};
pub use meditation::meditation;
pub use noise_bed::{fireplace, noise_bed, pink, rain, white};
pub use ocean::ocean;
pub use wind::wind;

/// Tick period shared by the forest chirps and chime strikes.
pub const EVENT_INTERVAL_MS: f32 = 1600.0;

/// Everything a recipe needs at construction time.
pub struct BuildCtx<'a> {
    pub sample_rate: f32,
    /// Length of each generated noise buffer.
    pub noise_seconds: f32,
    pub rng: &'a mut StdRng,
    pub activity: Arc<Activity>,
}

impl<'a> BuildCtx<'a> {
    pub fn new(
        sample_rate: f32,
        noise_seconds: f32,
        rng: &'a mut StdRng,
        activity: Arc<Activity>,
    ) -> Self {
        Self {
            sample_rate,
            noise_seconds,
            rng,
            activity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Soundscape {
    #[default]
    White,
    Pink,
    Rain,
    Ocean,
    Wind,
    Forest,
    Fireplace,
    Chimes,
    Meditation,
}

impl Soundscape {
    pub const ALL: [Soundscape; 9] = [
        Soundscape::White,
        Soundscape::Pink,
        Soundscape::Rain,
        Soundscape::Ocean,
        Soundscape::Wind,
        Soundscape::Forest,
        Soundscape::Fireplace,
        Soundscape::Chimes,
        Soundscape::Meditation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Soundscape::White => "white",
            Soundscape::Pink => "pink",
            Soundscape::Rain => "rain",
            Soundscape::Ocean => "ocean",
            Soundscape::Wind => "wind",
            Soundscape::Forest => "forest",
            Soundscape::Fireplace => "fireplace",
            Soundscape::Chimes => "chimes",
            Soundscape::Meditation => "meditation",
        }
    }

    /// Exact, case-sensitive match on the sound name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Wire up a fresh graph for this recipe.
    pub fn build(self, ctx: &mut BuildCtx<'_>) -> Box<dyn GraphNode> {
        match self {
            Soundscape::White => white(ctx).boxed(),
            Soundscape::Pink => pink(ctx).boxed(),
            Soundscape::Rain => rain(ctx).boxed(),
            Soundscape::Ocean => ocean(ctx).boxed(),
            Soundscape::Wind => wind(ctx).boxed(),
            Soundscape::Forest => forest(ctx).boxed(),
            Soundscape::Fireplace => fireplace(ctx).boxed(),
            Soundscape::Chimes => chimes(ctx).boxed(),
            Soundscape::Meditation => meditation(ctx.sample_rate).boxed(),
        }
    }
}

impl std::fmt::Display for Soundscape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
