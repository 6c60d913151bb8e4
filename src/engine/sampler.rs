//! Random input arrays for the studio.
//!
//! Reproduces the "new array" action: a fixed number of values drawn
//! uniformly from a closed range, by default 12 values in `5..=99`.

use serde::{Deserialize, Serialize};

use super::rng::StudioRng;
use crate::error::{StudioError, StudioResult};

/// Default number of elements per array.
pub const DEFAULT_ARRAY_SIZE: usize = 12;
/// Default smallest drawn value.
pub const DEFAULT_MIN_VALUE: i64 = 5;
/// Default largest drawn value.
pub const DEFAULT_MAX_VALUE: i64 = 99;

/// Draws input arrays of a fixed size and value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSampler")]
pub struct InputSampler {
    size: usize,
    min_value: i64,
    max_value: i64,
}

#[derive(Deserialize)]
struct RawSampler {
    size: usize,
    min_value: i64,
    max_value: i64,
}

impl TryFrom<RawSampler> for InputSampler {
    type Error = StudioError;

    fn try_from(raw: RawSampler) -> StudioResult<Self> {
        Self::new(raw.size, raw.min_value, raw.max_value)
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self {
            size: DEFAULT_ARRAY_SIZE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
        }
    }
}

impl InputSampler {
    /// Create a sampler drawing `size` values from `min_value..=max_value`.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Config` if `min_value > max_value`.
    pub fn new(size: usize, min_value: i64, max_value: i64) -> StudioResult<Self> {
        if min_value > max_value {
            return Err(StudioError::config(format!(
                "min_value {min_value} exceeds max_value {max_value}"
            )));
        }
        Ok(Self {
            size,
            min_value,
            max_value,
        })
    }

    /// Number of values per array.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Inclusive value bounds.
    #[must_use]
    pub const fn bounds(&self) -> (i64, i64) {
        (self.min_value, self.max_value)
    }

    /// Draw one array.
    pub fn sample(&self, rng: &mut StudioRng) -> Vec<i64> {
        (0..self.size)
            .map(|_| rng.gen_range_i64(self.min_value, self.max_value))
            .collect()
    }
}
