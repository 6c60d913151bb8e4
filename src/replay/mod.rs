//! Trace envelope for exporting and replaying step sequences.
//!
//! A [`Trace`] bundles an input, its partition scheme and the generated
//! steps with a BLAKE3 checksum over the `bincode` encoding of the steps.
//! Two runs over the same input must produce the same checksum.

use serde::{Deserialize, Serialize};

use crate::error::{StudioError, StudioResult};
use crate::sort::{generate_steps_with, BucketScheme, Snapshot, TraceGuard};

/// A generated step sequence with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Array the sequence was generated from.
    pub input: Vec<i64>,
    /// Partition scheme used.
    pub scheme: BucketScheme,
    /// Generated snapshots.
    pub steps: Vec<Snapshot>,
    /// Hex-encoded BLAKE3 digest of the steps.
    pub checksum: String,
}

impl Trace {
    /// Generate the trace for `input`.
    ///
    /// # Errors
    ///
    /// Returns error if the steps cannot be encoded for hashing.
    pub fn generate(input: &[i64], scheme: BucketScheme) -> StudioResult<Self> {
        let steps = generate_steps_with(input, &scheme);
        let checksum = checksum(&steps)?;
        Ok(Self {
            input: input.to_vec(),
            scheme,
            steps,
            checksum,
        })
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Snapshot at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.steps.get(index)
    }

    /// Sorted values of the final snapshot.
    #[must_use]
    pub fn sorted(&self) -> Vec<i64> {
        self.steps
            .last()
            .map(|s| s.values.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Recompute the checksum and compare.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::ChecksumMismatch` if the steps were altered.
    pub fn verify_checksum(&self) -> StudioResult<()> {
        let actual = checksum(&self.steps)?;
        if actual == self.checksum {
            Ok(())
        } else {
            Err(StudioError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            })
        }
    }

    /// Run the trace guard over the steps.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Guard` with the first broken invariant.
    pub fn audit(&self) -> StudioResult<()> {
        TraceGuard::new(self.scheme).check(&self.input, &self.steps)?;
        Ok(())
    }

    /// Render as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> StudioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> StudioResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse a trace previously rendered with [`Trace::to_json`].
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a valid trace.
    pub fn from_json(json: &str) -> StudioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Hex-encoded BLAKE3 digest of the bincode encoding of `steps`.
///
/// # Errors
///
/// Returns error if the steps cannot be encoded.
pub fn checksum(steps: &[Snapshot]) -> StudioResult<String> {
    let bytes = bincode::serialize(steps)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(input: &[i64]) -> Trace {
        Trace::generate(input, BucketScheme::default()).expect("trace")
    }

    #[test]
    fn test_generate_trace() {
        let t = trace(&[5, 25, 45, 65, 85, 15]);
        assert_eq!(t.input, vec![5, 25, 45, 65, 85, 15]);
        assert_eq!(t.sorted(), vec![5, 15, 25, 45, 65, 85]);
        assert_eq!(t.checksum.len(), 64);
        assert!(!t.is_empty());
        assert!(t.get(t.len()).is_none());
    }

    #[test]
    fn test_same_input_same_checksum() {
        let input = [61, 3, 3, 99, 40];
        assert_eq!(trace(&input).checksum, trace(&input).checksum);
    }

    #[test]
    fn test_different_input_different_checksum() {
        assert_ne!(trace(&[1, 2, 3]).checksum, trace(&[3, 2, 1]).checksum);
    }

    #[test]
    fn test_verify_checksum_detects_tampering() {
        let mut t = trace(&[10, 30]);
        assert!(t.verify_checksum().is_ok());

        t.steps[1].narration.push('!');
        let err = t.verify_checksum().unwrap_err();
        assert!(matches!(err, StudioError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_audit_passes_for_generated_trace() {
        assert!(trace(&[88, 12, 47, 47, 0, 99]).audit().is_ok());
    }

    #[test]
    fn test_audit_reports_guard_violation() {
        let mut t = trace(&[10, 30]);
        t.steps.remove(0);
        let err = t.audit().unwrap_err();
        assert!(err.is_trace_error());
    }

    #[test]
    fn test_json_roundtrip() {
        let t = trace(&[42, 17, 93]);
        let json = t.to_json().expect("json");
        assert!(json.contains("\"phase\": \"distribute\""));
        let restored = Trace::from_json(&json).expect("parse");
        assert_eq!(restored, t);
        assert!(restored.verify_checksum().is_ok());
    }

    #[test]
    fn test_from_json_rejects_degenerate_scheme() {
        let json = trace(&[42, 17]).to_json().expect("json");
        assert!(json.contains("\"domain_size\": 100"));
        for broken in [
            json.replace("\"domain_size\": 100", "\"domain_size\": 0"),
            json.replace("\"bucket_count\": 5", "\"bucket_count\": 0"),
        ] {
            assert!(Trace::from_json(&broken).is_err());
        }
    }

    #[test]
    fn test_yaml_export() {
        let yaml = trace(&[42]).to_yaml().expect("yaml");
        assert!(yaml.contains("phase: init"));
        assert!(yaml.contains("phase: complete"));
    }

    #[test]
    fn test_empty_input_trace() {
        let t = trace(&[]);
        assert_eq!(t.len(), 2);
        assert!(t.sorted().is_empty());
    }
}
