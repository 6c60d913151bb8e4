//! Snapshot types recorded by the step generator.
//!
//! A snapshot is the full visualization state at one point of the simulated
//! sort. What happened at that point is a [`StepEvent`], a sum type over the
//! phases, so the active element/bucket can never disagree with the phase.

use serde::{Deserialize, Serialize};

/// Stage of the bucket sort a snapshot depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Unmodified input, empty buckets.
    Init,
    /// Moving input elements into buckets.
    Distribute,
    /// Sorting the contents of one bucket.
    SortBucket,
    /// Writing bucket contents back into the array.
    Collect,
    /// Sorted array, empty buckets.
    Complete,
}

impl Phase {
    /// Lowercase name as used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Distribute => "distribute",
            Self::SortBucket => "sort_bucket",
            Self::Collect => "collect",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The transition a snapshot records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum StepEvent {
    /// Starting state.
    Init,
    /// Element `index` (holding `value`) is routed to `bucket`.
    ///
    /// `placed` is false for the decision snapshot taken before the move and
    /// true for the one taken after it.
    Distribute {
        /// Position in the array.
        index: usize,
        /// Destination bucket.
        bucket: usize,
        /// Value being moved.
        value: i64,
        /// Whether the move has been applied.
        placed: bool,
    },
    /// Bucket `bucket` is sorted in place.
    SortBucket {
        /// Bucket being sorted.
        bucket: usize,
        /// Whether the sort has been applied.
        sorted: bool,
    },
    /// Front element `value` of `bucket` is about to be written to `slot`.
    Collect {
        /// Source bucket.
        bucket: usize,
        /// Value being written back.
        value: i64,
        /// Destination array slot.
        slot: usize,
    },
    /// Terminal state.
    Complete,
}

impl StepEvent {
    /// Phase tag of this event.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Init => Phase::Init,
            Self::Distribute { .. } => Phase::Distribute,
            Self::SortBucket { .. } => Phase::SortBucket,
            Self::Collect { .. } => Phase::Collect,
            Self::Complete => Phase::Complete,
        }
    }
}

/// Immutable record of the visualization state at one step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    /// Array slots; `None` once the element has moved into a bucket.
    pub values: Vec<Option<i64>>,
    /// Bucket contents in current order.
    pub buckets: Vec<Vec<i64>>,
    /// What this snapshot depicts.
    pub event: StepEvent,
    /// Human-readable description of the action.
    pub narration: String,
    /// Line of the illustrative listing to highlight.
    pub highlight_line: Option<usize>,
}

impl Snapshot {
    /// Phase tag.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.event.phase()
    }

    /// Array index being acted on, during distribution.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        match self.event {
            StepEvent::Distribute { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Bucket being acted on, during sorting and collection.
    #[must_use]
    pub const fn active_bucket(&self) -> Option<usize> {
        match self.event {
            StepEvent::SortBucket { bucket, .. } | StepEvent::Collect { bucket, .. } => {
                Some(bucket)
            }
            _ => None,
        }
    }

    /// Every element currently visible, array slots first then buckets.
    pub fn elements(&self) -> impl Iterator<Item = i64> + '_ {
        self.values
            .iter()
            .flatten()
            .copied()
            .chain(self.buckets.iter().flatten().copied())
    }

    /// Number of array slots that are empty.
    #[must_use]
    pub fn empty_slots(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Whether every bucket is empty.
    #[must_use]
    pub fn buckets_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}
