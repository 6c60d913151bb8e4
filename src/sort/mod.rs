//! Bucket-sort step generation.
//!
//! The generator turns an input array into an ordered, immutable sequence of
//! [`Snapshot`]s covering the whole sort:
//!
//! ```text
//! init → distribute* → sort_bucket* → collect* → complete
//! ```
//!
//! Nothing in here holds "current step" or playback state; that belongs to
//! whoever renders the sequence (see [`crate::playback`]).

pub mod generator;
pub mod guard;
pub mod listing;
pub mod scheme;
pub mod snapshot;

pub use generator::{generate_steps, generate_steps_with};
pub use guard::{GuardViolation, TraceGuard};
pub use listing::{listing, listing_line, LISTING};
pub use scheme::{BucketScheme, DEFAULT_BUCKET_COUNT, DEFAULT_DOMAIN_SIZE};
pub use snapshot::{Phase, Snapshot, StepEvent};
