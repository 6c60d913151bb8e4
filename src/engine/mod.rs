//! Input generation.
//!
//! The step generator is a pure function of its input; all randomness lives
//! here, in the caller's choice of array:
//! - Deterministic RNG (PCG seeded from a `u64`)
//! - Input sampler reproducing the studio's "new array" action

pub mod rng;
pub mod sampler;

pub use rng::StudioRng;
pub use sampler::{InputSampler, DEFAULT_ARRAY_SIZE, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};
