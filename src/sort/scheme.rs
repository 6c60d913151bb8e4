//! Fixed range partitioning of the input domain into buckets.
//!
//! ```text
//! rangeWidth = domainSize / bucketCount
//! bucket(v)  = clamp(floor(v / rangeWidth), 0, bucketCount - 1)
//! ```
//!
//! With the default `5 / 100` scheme the ranges are `[0,20) [20,40) [40,60)
//! [60,80) [80,99]`: contiguous, non-overlapping, and the last one closed at
//! the top of the domain.

use serde::{Deserialize, Serialize};

use crate::error::{StudioError, StudioResult};

/// Default number of buckets.
pub const DEFAULT_BUCKET_COUNT: usize = 5;

/// Default domain size; values are expected in `[0, DEFAULT_DOMAIN_SIZE)`.
pub const DEFAULT_DOMAIN_SIZE: i64 = 100;

/// Partition of `[0, domain_size)` into `bucket_count` equal ranges.
///
/// Deserialization goes through [`BucketScheme::new`], so a decoded scheme
/// upholds the same invariants as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawScheme")]
pub struct BucketScheme {
    bucket_count: usize,
    domain_size: i64,
}

/// Unchecked wire form of a [`BucketScheme`].
#[derive(Deserialize)]
struct RawScheme {
    bucket_count: usize,
    domain_size: i64,
}

impl TryFrom<RawScheme> for BucketScheme {
    type Error = StudioError;

    fn try_from(raw: RawScheme) -> StudioResult<Self> {
        Self::new(raw.bucket_count, raw.domain_size)
    }
}

impl Default for BucketScheme {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            domain_size: DEFAULT_DOMAIN_SIZE,
        }
    }
}

impl BucketScheme {
    /// Create a scheme, checking that the ranges tile the domain exactly.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::Config` if `bucket_count` is zero, `domain_size`
    /// is not positive, or `domain_size` is not a multiple of `bucket_count`.
    pub fn new(bucket_count: usize, domain_size: i64) -> StudioResult<Self> {
        if bucket_count == 0 {
            return Err(StudioError::config("bucket_count must be at least 1"));
        }
        if domain_size <= 0 {
            return Err(StudioError::config(format!(
                "domain_size must be positive, got {domain_size}"
            )));
        }
        let count = i64::try_from(bucket_count)
            .map_err(|_| StudioError::config("bucket_count does not fit the value domain"))?;
        if domain_size % count != 0 {
            return Err(StudioError::config(format!(
                "domain_size {domain_size} is not divisible by bucket_count {bucket_count}"
            )));
        }
        Ok(Self {
            bucket_count,
            domain_size,
        })
    }

    /// Number of buckets.
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Size of the value domain.
    #[must_use]
    pub const fn domain_size(&self) -> i64 {
        self.domain_size
    }

    /// Width of every bucket's range.
    #[must_use]
    pub fn range_width(&self) -> i64 {
        // `new` guarantees the count fits and divides the domain.
        self.domain_size / self.bucket_count as i64
    }

    /// Bucket a value belongs to.
    ///
    /// Values at or above the domain maximum land in the last bucket and
    /// negative values land in bucket 0, so every `i64` has a home.
    #[must_use]
    pub fn bucket_index(&self, value: i64) -> usize {
        let raw = value.div_euclid(self.range_width());
        let last = self.bucket_count - 1;
        if raw < 0 {
            0
        } else {
            usize::try_from(raw).map_or(last, |idx| idx.min(last))
        }
    }

    /// Inclusive numeric bounds `(low, high)` of a bucket.
    ///
    /// Every bucket but the last covers `[low, low + width)`; the last is
    /// closed at `domain_size - 1`.
    #[must_use]
    pub fn range(&self, bucket: usize) -> (i64, i64) {
        let width = self.range_width();
        let low = bucket as i64 * width;
        (low, low + width - 1)
    }

    /// Half-open display label of a bucket's range, e.g. `20-40`.
    #[must_use]
    pub fn label(&self, bucket: usize) -> String {
        let (low, high) = self.range(bucket);
        format!("{low}-{}", high + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_checks_invariants() {
        let ok: BucketScheme =
            serde_json::from_str(r#"{"bucket_count":4,"domain_size":100}"#).expect("valid");
        assert_eq!(ok.range_width(), 25);

        for bad in [
            r#"{"bucket_count":5,"domain_size":0}"#,
            r#"{"bucket_count":0,"domain_size":100}"#,
            r#"{"bucket_count":3,"domain_size":100}"#,
        ] {
            assert!(serde_json::from_str::<BucketScheme>(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_default_scheme() {
        let scheme = BucketScheme::default();
        assert_eq!(scheme.bucket_count(), 5);
        assert_eq!(scheme.domain_size(), 100);
        assert_eq!(scheme.range_width(), 20);
    }

    #[test]
    fn test_bucket_index_ranges() {
        let scheme = BucketScheme::default();
        assert_eq!(scheme.bucket_index(0), 0);
        assert_eq!(scheme.bucket_index(19), 0);
        assert_eq!(scheme.bucket_index(20), 1);
        assert_eq!(scheme.bucket_index(39), 1);
        assert_eq!(scheme.bucket_index(40), 2);
        assert_eq!(scheme.bucket_index(79), 3);
        assert_eq!(scheme.bucket_index(80), 4);
    }

    #[test]
    fn test_domain_maximum_goes_to_last_bucket() {
        let scheme = BucketScheme::default();
        assert_eq!(scheme.bucket_index(99), 4);
        assert_eq!(scheme.bucket_index(100), 4);
        assert_eq!(scheme.bucket_index(i64::MAX), 4);
    }

    #[test]
    fn test_negative_values_go_to_first_bucket() {
        let scheme = BucketScheme::default();
        assert_eq!(scheme.bucket_index(-1), 0);
        assert_eq!(scheme.bucket_index(-21), 0);
        assert_eq!(scheme.bucket_index(i64::MIN), 0);
    }

    #[test]
    fn test_ranges_are_contiguous() {
        let scheme = BucketScheme::default();
        let mut expected_low = 0;
        for b in 0..scheme.bucket_count() {
            let (low, high) = scheme.range(b);
            assert_eq!(low, expected_low);
            expected_low = high + 1;
        }
        assert_eq!(expected_low, scheme.domain_size());
    }

    #[test]
    fn test_range_matches_bucket_index() {
        let scheme = BucketScheme::default();
        for v in 0..scheme.domain_size() {
            let (low, high) = scheme.range(scheme.bucket_index(v));
            assert!(low <= v && v <= high, "{v} outside [{low}, {high}]");
        }
    }

    #[test]
    fn test_labels() {
        let scheme = BucketScheme::default();
        assert_eq!(scheme.label(0), "0-20");
        assert_eq!(scheme.label(4), "80-100");
    }

    #[test]
    fn test_new_rejects_bad_parameters() {
        assert!(BucketScheme::new(0, 100).is_err());
        assert!(BucketScheme::new(5, 0).is_err());
        assert!(BucketScheme::new(5, -100).is_err());
        assert!(BucketScheme::new(3, 100).is_err());
    }

    #[test]
    fn test_new_accepts_exact_tiling() {
        let scheme = BucketScheme::new(4, 100).unwrap();
        assert_eq!(scheme.range_width(), 25);
        assert_eq!(scheme.bucket_index(99), 3);
    }
}
