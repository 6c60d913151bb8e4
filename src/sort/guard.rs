//! Trace guard: audits a produced step sequence against its invariants.
//!
//! The generator is expected to satisfy all of these by construction. The
//! guard exists so that callers (the CLI `verify` command, property tests)
//! can stop the line on the first broken invariant with a precise report.
//!
//! # Checks
//!
//! 1. **Shape**: every snapshot has N slots and B buckets
//! 2. **Framing**: exactly one `init` (first) and one `complete` (last)
//! 3. **Phase order**: phases never move backwards
//! 4. **Conservation**: each snapshot holds exactly the input multiset
//! 5. **Slot lifecycle**: filled, then empty, then refilled and frozen
//! 6. **Membership**: bucket contents lie in their bucket's range
//! 7. **Terminal state**: empty buckets, ascending fully-populated values

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scheme::BucketScheme;
use super::snapshot::{Phase, Snapshot};

/// A broken trace invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GuardViolation {
    /// The sequence has no leading `init` snapshot.
    #[error("trace does not start with an init snapshot")]
    MissingInit,

    /// The sequence has no trailing `complete` snapshot.
    #[error("trace does not end with a complete snapshot")]
    MissingComplete,

    /// An `init` or `complete` snapshot appears somewhere else.
    #[error("unexpected {phase} snapshot at step {step}")]
    MisplacedTerminal {
        /// Offending step.
        step: usize,
        /// Its phase.
        phase: Phase,
    },

    /// A snapshot's phase precedes the previous one's.
    #[error("phase went back from {from} to {to} at step {step}")]
    PhaseRegression {
        /// Offending step.
        step: usize,
        /// Previous phase.
        from: Phase,
        /// Current phase.
        to: Phase,
    },

    /// A snapshot has the wrong number of slots or buckets.
    #[error("step {step} has {slots} slots and {buckets} buckets")]
    Shape {
        /// Offending step.
        step: usize,
        /// Slot count found.
        slots: usize,
        /// Bucket count found.
        buckets: usize,
    },

    /// A snapshot gained or lost elements.
    #[error("step {step} does not hold the input elements")]
    Conservation {
        /// Offending step.
        step: usize,
    },

    /// A slot changed outside its allowed lifecycle.
    #[error("slot {slot} changed illegally at step {step}")]
    SlotLifecycle {
        /// Offending step.
        step: usize,
        /// Slot index.
        slot: usize,
    },

    /// A bucket holds a value outside its range.
    #[error("bucket {bucket} holds {value} at step {step}")]
    Membership {
        /// Offending step.
        step: usize,
        /// Bucket index.
        bucket: usize,
        /// Misplaced value.
        value: i64,
    },

    /// The last snapshot is not the sorted input.
    #[error("final snapshot is not the sorted input")]
    Unsorted,
}

/// Slot state as tracked across the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Original,
    Emptied,
    Refilled(i64),
}

/// Audits traces produced under one partition scheme.
#[derive(Debug, Clone, Default)]
pub struct TraceGuard {
    scheme: BucketScheme,
}

impl TraceGuard {
    /// Create a guard for `scheme`.
    #[must_use]
    pub const fn new(scheme: BucketScheme) -> Self {
        Self { scheme }
    }

    /// Check every invariant of `steps` generated from `input`.
    ///
    /// # Errors
    ///
    /// Returns the first `GuardViolation` found.
    pub fn check(&self, input: &[i64], steps: &[Snapshot]) -> Result<(), GuardViolation> {
        self.check_framing(steps)?;

        let mut expected = input.to_vec();
        expected.sort_unstable();

        let mut slots = vec![SlotState::Original; input.len()];
        let mut previous = Phase::Init;

        for (step, snapshot) in steps.iter().enumerate() {
            self.check_shape(step, input.len(), snapshot)?;

            let phase = snapshot.phase();
            if phase < previous {
                return Err(GuardViolation::PhaseRegression {
                    step,
                    from: previous,
                    to: phase,
                });
            }
            previous = phase;

            let mut held: Vec<i64> = snapshot.elements().collect();
            held.sort_unstable();
            if held != expected {
                return Err(GuardViolation::Conservation { step });
            }

            check_slots(step, input, snapshot, &mut slots)?;
            self.check_membership(step, snapshot)?;
        }

        // Framing succeeded, so there is a last snapshot.
        let Some(last) = steps.last() else {
            return Err(GuardViolation::MissingComplete);
        };
        let sorted: Vec<Option<i64>> = expected.into_iter().map(Some).collect();
        if !last.buckets_empty() || last.values != sorted {
            return Err(GuardViolation::Unsorted);
        }
        Ok(())
    }

    fn check_framing(&self, steps: &[Snapshot]) -> Result<(), GuardViolation> {
        if steps.first().map(Snapshot::phase) != Some(Phase::Init) {
            return Err(GuardViolation::MissingInit);
        }
        if steps.len() < 2 || steps.last().map(Snapshot::phase) != Some(Phase::Complete) {
            return Err(GuardViolation::MissingComplete);
        }
        let inner = &steps[1..steps.len() - 1];
        if let Some((i, s)) = inner
            .iter()
            .enumerate()
            .find(|(_, s)| matches!(s.phase(), Phase::Init | Phase::Complete))
        {
            return Err(GuardViolation::MisplacedTerminal {
                step: i + 1,
                phase: s.phase(),
            });
        }
        Ok(())
    }

    fn check_shape(&self, step: usize, len: usize, s: &Snapshot) -> Result<(), GuardViolation> {
        if s.values.len() != len || s.buckets.len() != self.scheme.bucket_count() {
            return Err(GuardViolation::Shape {
                step,
                slots: s.values.len(),
                buckets: s.buckets.len(),
            });
        }
        Ok(())
    }

    fn check_membership(&self, step: usize, s: &Snapshot) -> Result<(), GuardViolation> {
        for (bucket, contents) in s.buckets.iter().enumerate() {
            if let Some(&value) = contents
                .iter()
                .find(|&&v| self.scheme.bucket_index(v) != bucket)
            {
                return Err(GuardViolation::Membership {
                    step,
                    bucket,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Advance each slot's lifecycle and reject illegal transitions.
fn check_slots(
    step: usize,
    input: &[i64],
    s: &Snapshot,
    slots: &mut [SlotState],
) -> Result<(), GuardViolation> {
    for (slot, (state, current)) in slots.iter_mut().zip(&s.values).enumerate() {
        let next = match (*state, *current) {
            (SlotState::Original, Some(v)) if v == input[slot] => SlotState::Original,
            (SlotState::Original | SlotState::Emptied, None) => SlotState::Emptied,
            (SlotState::Emptied, Some(v)) => SlotState::Refilled(v),
            (SlotState::Refilled(old), Some(v)) if old == v => SlotState::Refilled(v),
            _ => return Err(GuardViolation::SlotLifecycle { step, slot }),
        };
        *state = next;
    }
    Ok(())
}
