//! # bucket-studio
//!
//! Deterministic step traces of bucket sort for teaching and visualization.
//!
//! The core is a pure function that simulates bucket sort and records every
//! state transition as an immutable [`sort::Snapshot`]:
//! - **distribute**: route each element to the bucket covering its range
//! - **sort_bucket**: order the contents of each bucket
//! - **collect**: write the buckets back into the array
//!
//! A renderer owns an index into the sequence (see [`playback::Playback`]);
//! the sequence itself never changes after it is produced.
//!
//! ## Example
//!
//! ```rust
//! use bucket_studio::prelude::*;
//!
//! let steps = generate_steps(&[5, 25, 45, 65, 85, 15]);
//! let last = steps.last().unwrap();
//! assert_eq!(last.phase(), Phase::Complete);
//! assert!(TraceGuard::default().check(&[5, 25, 45, 65, 85, 15], &steps).is_ok());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_wrap,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the algorithm's steps
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod playback;
pub mod replay;
pub mod sort;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{StudioConfig, StudioConfigBuilder};
    pub use crate::engine::{InputSampler, StudioRng};
    pub use crate::error::{StudioError, StudioResult};
    pub use crate::playback::Playback;
    pub use crate::replay::Trace;
    pub use crate::sort::{
        generate_steps, generate_steps_with, BucketScheme, GuardViolation, Phase, Snapshot,
        StepEvent, TraceGuard,
    };
}

/// Re-export for public API
pub use error::{StudioError, StudioResult};
