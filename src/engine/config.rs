use crate::soundscapes::Soundscape;

/// Engine settings. Every field has a sensible default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Directory streamed assets are looked up in.
    pub asset_dir: String,
    /// File extension of streamed assets, without the dot.
    pub asset_extension: String,
    /// Length of each noise buffer generated at voice start.
    pub noise_seconds: f32,
    pub initial_volume: f32,
    /// Master gain ramp length; 0 jumps immediately.
    pub volume_ramp_ms: f32,
    /// Depth of the control → audio thread message queue.
    pub queue_capacity: usize,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            asset_dir: "sounds".to_string(),
            asset_extension: "mp3".to_string(),
            noise_seconds: 2.0,
            initial_volume: 0.5,
            volume_ramp_ms: 5.0,
            queue_capacity: 64,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn asset_dir(mut self, dir: impl Into<String>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn asset_extension(mut self, extension: impl Into<String>) -> Self {
        self.asset_extension = extension.into();
        self
    }

    pub fn noise_seconds(mut self, seconds: f32) -> Self {
        self.noise_seconds = seconds.max(0.0);
        self
    }

    pub fn initial_volume(mut self, volume: f32) -> Self {
        self.initial_volume = clamp_volume(volume);
        self
    }

    pub fn volume_ramp_ms(mut self, ms: f32) -> Self {
        self.volume_ramp_ms = ms.max(0.0);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Where the streamed asset for `name` lives.
    pub fn locator(&self, name: &str) -> String {
        format!("{}/{}.{}", self.asset_dir, name, self.asset_extension)
    }
}

/// Clamp to [0, 1]; NaN is treated as silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Where to stream a sound from, and what to synthesize if that fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundDescriptor {
    pub name: String,
    pub locator: String,
    pub recipe: Soundscape,
}

/// The fixed set of known sounds, built once from the config.
#[derive(Debug, Clone)]
pub struct SoundTable {
    descriptors: Vec<SoundDescriptor>,
    config: EngineConfig,
}

impl SoundTable {
    pub fn new(config: &EngineConfig) -> Self {
        let descriptors = Soundscape::ALL
            .into_iter()
            .map(|recipe| SoundDescriptor {
                name: recipe.name().to_string(),
                locator: config.locator(recipe.name()),
                recipe,
            })
            .collect();

        Self {
            descriptors,
            config: config.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SoundDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Known descriptor, or white noise under the derived locator.
    pub fn resolve(&self, name: &str) -> SoundDescriptor {
        match self.get(name) {
            Some(descriptor) => descriptor.clone(),
            None => SoundDescriptor {
                name: name.to_string(),
                locator: self.config.locator(name),
                recipe: Soundscape::default(),
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_uses_dir_and_extension() {
        let config = EngineConfig::default().asset_dir("assets/ambient").asset_extension("ogg");
        assert_eq!(config.locator("rain"), "assets/ambient/rain.ogg");
    }

    #[test]
    fn table_covers_every_soundscape() {
        let table = SoundTable::new(&EngineConfig::default());
        assert_eq!(table.len(), Soundscape::ALL.len());
        let ocean = table.get("ocean").map(|d| d.recipe);
        assert_eq!(ocean, Some(Soundscape::Ocean));
        assert_eq!(table.resolve("chimes").locator, "sounds/chimes.mp3");
    }

    #[test]
    fn unknown_names_fall_back_to_white_noise() {
        let table = SoundTable::new(&EngineConfig::default());
        let descriptor = table.resolve("thunder");
        assert_eq!(descriptor.name, "thunder");
        assert_eq!(descriptor.locator, "sounds/thunder.mp3");
        assert_eq!(descriptor.recipe, Soundscape::White);
    }

    #[test]
    fn known_and_unknown_locators_follow_the_config() {
        let config = EngineConfig::default().asset_dir("cdn/loops").asset_extension("ogg");
        let table = SoundTable::new(&config);
        assert_eq!(table.resolve("rain").locator, config.locator("rain"));
        assert_eq!(table.resolve("thunder").locator, "cdn/loops/thunder.ogg");
    }

    #[test]
    fn volume_clamping() {
        assert_eq!(clamp_volume(-1.0), 0.0);
        assert_eq!(clamp_volume(2.0), 1.0);
        assert_eq!(clamp_volume(0.3), 0.3);
        assert_eq!(clamp_volume(f32::NAN), 0.0);
        assert_eq!(EngineConfig::default().initial_volume(7.0).initial_volume, 1.0);
    }
}
