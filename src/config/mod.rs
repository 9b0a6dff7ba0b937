//! Visualizer configuration with YAML schema and validation.
//!
//! Mistake-proofing happens in two layers:
//! - schema validation via serde + validator when a YAML file is loaded;
//! - silent clamping of bounded numeric inputs inside each producer
//!   (out-of-range values are never surfaced as errors to the user).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::error::VizResult;
use crate::playback::{MAX_SPEED, MIN_SPEED};

/// Top-level visualizer configuration.
///
/// Loaded from YAML files with schema validation, or built
/// programmatically via [`VizConfig::builder`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Visualizer metadata.
    #[validate(nested)]
    #[serde(default)]
    pub visualizer: VisualizerMeta,

    /// Playback settings.
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Master seed for producers with pseudo-random inputs.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_seed() -> u64 {
    42
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, YAML parsing fails,
    /// or schema validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            visualizer: VisualizerMeta::default(),
            playback: PlaybackConfig::default(),
            seed: default_seed(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    seed: Option<u64>,
    base_step_ms: Option<u64>,
    speed: Option<f64>,
}

impl VizConfigBuilder {
    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the base step duration in milliseconds.
    #[must_use]
    pub const fn base_step_ms(mut self, ms: u64) -> Self {
        self.base_step_ms = Some(ms);
        self
    }

    /// Set the initial speed multiplier.
    #[must_use]
    pub const fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ms) = self.base_step_ms {
            config.playback.base_step_ms = Some(ms);
        }
        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }
        config.playback = config.playback.clamped();
        config
    }
}

/// Visualizer metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VisualizerMeta {
    /// Visualizer name.
    #[serde(default)]
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Playback settings shared by CLI and TUI hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Base step duration override in milliseconds.
    ///
    /// `None` defers to the producer's own base duration (sort bars are
    /// faster than Hanoi moves by design).
    #[serde(default)]
    pub base_step_ms: Option<u64>,

    /// Initial speed multiplier; clamped to `[0.25, 4.0]` on use.
    #[serde(default = "default_speed")]
    pub speed: f64,
}

const fn default_speed() -> f64 {
    1.0
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_step_ms: None,
            speed: default_speed(),
        }
    }
}

impl PlaybackConfig {
    /// Return a copy with all values clamped to their legal ranges.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            base_step_ms: self.base_step_ms.map(|ms| ms.max(1)),
            speed: if self.speed.is_nan() {
                MIN_SPEED
            } else {
                self.speed.clamp(MIN_SPEED, MAX_SPEED)
            },
        }
    }

    /// Resolve the effective base step given the producer's default.
    #[must_use]
    pub fn base_step_or(&self, producer_default: Duration) -> Duration {
        self.base_step_ms
            .map_or(producer_default, |ms| Duration::from_millis(ms.max(1)))
    }
}
