//! Configuration system with YAML schema and validation.
//!
//! Mistake-proofing through:
//! - Type-safe configuration structs with `deny_unknown_fields`
//! - Range validation via `validator`
//! - Semantic validation of cross-field constraints

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::{
    InputSampler, StudioRng, DEFAULT_ARRAY_SIZE, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE,
};
use crate::error::{StudioError, StudioResult};
use crate::playback::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use crate::sort::{BucketScheme, DEFAULT_BUCKET_COUNT, DEFAULT_DOMAIN_SIZE};

/// Top-level studio configuration.
///
/// Every section is optional in YAML. Defaults: 12 values in `5..=99`,
/// 5 buckets over `[0, 100)`, speed 800.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StudioConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Input array generation.
    #[validate(nested)]
    #[serde(default)]
    pub input: InputConfig,

    /// Bucket partition scheme.
    #[validate(nested)]
    #[serde(default)]
    pub buckets: BucketConfig,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Playback settings for hosting layers.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            input: InputConfig::default(),
            buckets: BucketConfig::default(),
            reproducibility: ReproducibilityConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> StudioResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> StudioResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run field and cross-field validation.
    ///
    /// Call again after mutating a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Validation` or `StudioError::Config` on the first
    /// failed constraint.
    pub fn check(&self) -> StudioResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> StudioConfigBuilder {
        StudioConfigBuilder::default()
    }

    /// Validate constraints that span fields.
    fn validate_semantic(&self) -> StudioResult<()> {
        if self.input.min_value > self.input.max_value {
            return Err(StudioError::config(format!(
                "input.min_value {} exceeds input.max_value {}",
                self.input.min_value, self.input.max_value
            )));
        }
        self.scheme()?;
        Ok(())
    }

    /// Bucket scheme described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Config` if the domain is not evenly divisible.
    pub fn scheme(&self) -> StudioResult<BucketScheme> {
        BucketScheme::new(self.buckets.count, self.buckets.domain_size)
    }

    /// Input sampler described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Config` if the value bounds are inverted.
    pub fn sampler(&self) -> StudioResult<InputSampler> {
        InputSampler::new(self.input.size, self.input.min_value, self.input.max_value)
    }

    /// RNG for drawing inputs: seeded if a seed is configured, otherwise
    /// from entropy.
    #[must_use]
    pub fn rng(&self) -> StudioRng {
        self.reproducibility
            .seed
            .map_or_else(StudioRng::from_entropy, StudioRng::new)
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct StudioConfigBuilder {
    seed: Option<u64>,
    size: Option<usize>,
    speed: Option<u32>,
}

impl StudioConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the array size.
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the playback speed.
    #[must_use]
    pub const fn speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> StudioConfig {
        let mut config = StudioConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = Some(seed);
        }

        if let Some(size) = self.size {
            config.input.size = size;
        }

        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }

        config
    }
}

/// Input array generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Number of elements.
    #[validate(range(max = 1000))]
    #[serde(default = "default_size")]
    pub size: usize,
    /// Smallest drawn value.
    #[serde(default = "default_min_value")]
    pub min_value: i64,
    /// Largest drawn value.
    #[serde(default = "default_max_value")]
    pub max_value: i64,
}

const fn default_size() -> usize {
    DEFAULT_ARRAY_SIZE
}

const fn default_min_value() -> i64 {
    DEFAULT_MIN_VALUE
}

const fn default_max_value() -> i64 {
    DEFAULT_MAX_VALUE
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            min_value: default_min_value(),
            max_value: default_max_value(),
        }
    }
}

/// Bucket partition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
    /// Number of buckets.
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_bucket_count")]
    pub count: usize,
    /// Size of the value domain `[0, domain_size)`.
    #[validate(range(min = 1))]
    #[serde(default = "default_domain_size")]
    pub domain_size: i64,
}

const fn default_bucket_count() -> usize {
    DEFAULT_BUCKET_COUNT
}

const fn default_domain_size() -> i64 {
    DEFAULT_DOMAIN_SIZE
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            count: default_bucket_count(),
            domain_size: default_domain_size(),
        }
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Seed for input generation; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Speed slider value; the tick interval is `1001 - speed` ms.
    #[validate(range(min = MIN_SPEED, max = MAX_SPEED))]
    #[serde(default = "default_speed")]
    pub speed: u32,
}

const fn default_speed() -> u32 {
    DEFAULT_SPEED
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
        }
    }
}
