//! Illustrative source listing shown next to the visualization.
//!
//! Snapshots point into this listing through `highlight_line` (0-based).
//! [`LISTING`] is written for the default scheme; [`listing`] substitutes the
//! bucket count and range width of any other scheme.

use super::scheme::BucketScheme;

/// Listing of the algorithm under the default `5 / 100` scheme, one entry
/// per displayed line.
pub const LISTING: [&str; 17] = [
    "def bucket_sort(arr):",
    "    n = len(arr)",
    "    buckets = [[] for _ in range(5)]",
    "    for x in arr:",
    "        idx = int(x / 20) # 0-100 to 0-4",
    "        if idx == 5: idx = 4",
    "        buckets[idx].append(x)",
    "    ",
    "    for bucket in buckets:",
    "        bucket.sort()",
    "    ",
    "    # Concatenate results",
    "    k = 0",
    "    for bucket in buckets:",
    "        for val in bucket:",
    "            arr[k] = val",
    "            k += 1",
];

/// Bucket allocation.
const LINE_BUCKETS: usize = 2;
/// Top clamp of the bucket index.
const LINE_CLAMP: usize = 5;

/// Function header; also highlighted at start and completion.
pub const LINE_START: usize = 0;
/// Bucket index computation.
pub const LINE_BUCKET_INDEX: usize = 4;
/// Append to bucket.
pub const LINE_APPEND: usize = 6;
/// Per-bucket sort.
pub const LINE_SORT: usize = 9;
/// Line after the per-bucket sort.
pub const LINE_SORTED: usize = 10;
/// Write-back into the array.
pub const LINE_WRITE_BACK: usize = 15;

/// The listing with `scheme`'s constants filled in.
#[must_use]
pub fn listing(scheme: &BucketScheme) -> Vec<String> {
    let count = scheme.bucket_count();
    let last = count.saturating_sub(1);
    LISTING
        .iter()
        .enumerate()
        .map(|(i, line)| match i {
            LINE_BUCKETS => format!("    buckets = [[] for _ in range({count})]"),
            LINE_BUCKET_INDEX => format!(
                "        idx = int(x / {}) # 0-{} to 0-{last}",
                scheme.range_width(),
                scheme.domain_size()
            ),
            LINE_CLAMP => format!("        if idx == {count}: idx = {last}"),
            _ => (*line).to_string(),
        })
        .collect()
}

/// Text of a listing line under `scheme`, if it exists.
#[must_use]
pub fn listing_line(scheme: &BucketScheme, line: usize) -> Option<String> {
    listing(scheme).into_iter().nth(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_lines_exist() {
        for line in [
            LINE_START,
            LINE_BUCKET_INDEX,
            LINE_APPEND,
            LINE_SORT,
            LINE_SORTED,
            LINE_WRITE_BACK,
        ] {
            assert!(
                listing_line(&BucketScheme::default(), line).is_some(),
                "line {line} missing"
            );
        }
    }

    #[test]
    fn test_highlight_lines_point_at_expected_code() {
        assert!(LISTING[LINE_BUCKET_INDEX].contains("idx ="));
        assert!(LISTING[LINE_APPEND].contains("append"));
        assert!(LISTING[LINE_SORT].contains("sort()"));
        assert!(LISTING[LINE_WRITE_BACK].contains("arr[k]"));
    }

    #[test]
    fn test_out_of_range_line() {
        assert_eq!(listing_line(&BucketScheme::default(), LISTING.len()), None);
    }

    #[test]
    fn test_default_scheme_matches_static_listing() {
        assert_eq!(listing(&BucketScheme::default()), LISTING.to_vec());
    }

    #[test]
    fn test_custom_scheme_listing() {
        let scheme = BucketScheme::new(4, 100).expect("scheme");
        let lines = listing(&scheme);
        assert_eq!(lines.len(), LISTING.len());
        assert_eq!(lines[LINE_BUCKETS], "    buckets = [[] for _ in range(4)]");
        assert_eq!(
            lines[LINE_BUCKET_INDEX],
            "        idx = int(x / 25) # 0-100 to 0-3"
        );
        assert_eq!(lines[LINE_CLAMP], "        if idx == 4: idx = 3");
    }
}
