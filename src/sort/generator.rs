//! Bucket-sort step generator.
//!
//! Simulates the sort once, recording a [`Snapshot`] around every state
//! change. Each element or bucket operation follows the same shape: record
//! the decision, apply the change, record the result.

use tracing::debug;

use super::listing::{
    LINE_APPEND, LINE_BUCKET_INDEX, LINE_SORT, LINE_SORTED, LINE_START, LINE_WRITE_BACK,
};
use super::scheme::BucketScheme;
use super::snapshot::{Snapshot, StepEvent};

/// Generate the full step sequence for `input` with the default scheme.
///
/// # Example
///
/// ```rust
/// use bucket_studio::sort::{generate_steps, Phase};
///
/// let steps = generate_steps(&[42, 7]);
/// assert_eq!(steps.first().map(|s| s.phase()), Some(Phase::Init));
/// assert_eq!(steps.last().map(|s| s.phase()), Some(Phase::Complete));
/// ```
#[must_use]
pub fn generate_steps(input: &[i64]) -> Vec<Snapshot> {
    generate_steps_with(input, &BucketScheme::default())
}

/// Generate the full step sequence for `input` partitioned by `scheme`.
#[must_use]
pub fn generate_steps_with(input: &[i64], scheme: &BucketScheme) -> Vec<Snapshot> {
    let mut run = SortRun::new(input, scheme);
    run.init();
    run.distribute();
    run.sort_buckets();
    run.collect();
    run.complete();
    debug!(
        elements = input.len(),
        steps = run.steps.len(),
        "bucket sort trace generated"
    );
    run.steps
}

/// Working state of one simulated sort.
struct SortRun<'a> {
    scheme: &'a BucketScheme,
    values: Vec<Option<i64>>,
    buckets: Vec<Vec<i64>>,
    steps: Vec<Snapshot>,
}

impl<'a> SortRun<'a> {
    fn new(input: &[i64], scheme: &'a BucketScheme) -> Self {
        // 1 init + 2 per element (distribute) + 1 per element (collect)
        // + 1 complete + at most 2 per bucket (sort).
        let capacity = 2 + 3 * input.len() + 2 * scheme.bucket_count();
        Self {
            scheme,
            values: input.iter().copied().map(Some).collect(),
            buckets: vec![Vec::new(); scheme.bucket_count()],
            steps: Vec::with_capacity(capacity),
        }
    }

    fn record(&mut self, event: StepEvent, narration: String, line: usize) {
        self.steps.push(Snapshot {
            values: self.values.clone(),
            buckets: self.buckets.clone(),
            event,
            narration,
            highlight_line: Some(line),
        });
    }

    fn init(&mut self) {
        self.record(
            StepEvent::Init,
            format!(
                "Starting bucket sort: prepare {} buckets, one per value range, \
                 distribute the elements, then merge them back.",
                self.scheme.bucket_count()
            ),
            LINE_START,
        );
    }

    fn distribute(&mut self) {
        debug!(elements = self.values.len(), "distribute phase");
        for index in 0..self.values.len() {
            let Some(value) = self.values[index] else {
                continue;
            };
            let bucket = self.scheme.bucket_index(value);
            let narration = self.routing_narration(value, bucket);

            self.record(
                StepEvent::Distribute {
                    index,
                    bucket,
                    value,
                    placed: false,
                },
                narration,
                LINE_BUCKET_INDEX,
            );

            self.buckets[bucket].push(value);
            self.values[index] = None;

            self.record(
                StepEvent::Distribute {
                    index,
                    bucket,
                    value,
                    placed: true,
                },
                format!("Dropped {value} into bucket {bucket}."),
                LINE_APPEND,
            );
        }
    }

    fn routing_narration(&self, value: i64, bucket: usize) -> String {
        let (low, high) = self.scheme.range(bucket);
        if (low..=high).contains(&value) {
            format!(
                "{value} falls in the range {low}-{}, so it goes to bucket {bucket}.",
                high + 1
            )
        } else {
            format!(
                "{value} lies outside 0-{}, so it is clamped into bucket {bucket} ({low}-{}).",
                self.scheme.domain_size(),
                high + 1
            )
        }
    }

    fn sort_buckets(&mut self) {
        debug!(buckets = self.buckets.len(), "sort phase");
        for bucket in 0..self.buckets.len() {
            if self.buckets[bucket].len() < 2 {
                continue;
            }

            self.record(
                StepEvent::SortBucket {
                    bucket,
                    sorted: false,
                },
                format!("Sorting the contents of bucket {bucket}."),
                LINE_SORT,
            );

            self.buckets[bucket].sort_unstable();

            self.record(
                StepEvent::SortBucket {
                    bucket,
                    sorted: true,
                },
                format!("Bucket {bucket} is now in order."),
                LINE_SORTED,
            );
        }
    }

    fn collect(&mut self) {
        debug!("collect phase");
        let mut slot = 0;
        for bucket in 0..self.buckets.len() {
            while let Some(&value) = self.buckets[bucket].first() {
                // The value stays visible in its bucket until after this
                // snapshot, so no snapshot ever loses an element.
                self.record(
                    StepEvent::Collect {
                        bucket,
                        value,
                        slot,
                    },
                    format!(
                        "Taking the sorted value {value} out of bucket {bucket} \
                         and writing it back to position {slot}."
                    ),
                    LINE_WRITE_BACK,
                );

                self.buckets[bucket].remove(0);
                self.values[slot] = Some(value);
                slot += 1;
            }
        }
    }

    fn complete(&mut self) {
        self.record(
            StepEvent::Complete,
            "Every bucket is empty and the whole array is sorted.".to_string(),
            LINE_START,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::snapshot::Phase;

    fn phases(steps: &[Snapshot]) -> Vec<Phase> {
        steps.iter().map(Snapshot::phase).collect()
    }

    #[test]
    fn test_empty_input_yields_init_and_complete() {
        let steps = generate_steps(&[]);
        assert_eq!(phases(&steps), vec![Phase::Init, Phase::Complete]);
        for s in &steps {
            assert!(s.values.is_empty());
            assert_eq!(s.buckets.len(), 5);
            assert!(s.buckets_empty());
        }
    }

    #[test]
    fn test_single_element() {
        let steps = generate_steps(&[42]);
        assert_eq!(
            phases(&steps),
            vec![
                Phase::Init,
                Phase::Distribute,
                Phase::Distribute,
                Phase::Collect,
                Phase::Complete
            ]
        );
        assert_eq!(steps[2].buckets[2], vec![42]);
        assert_eq!(steps[4].values, vec![Some(42)]);
    }

    #[test]
    fn test_concrete_scenario() {
        let input = [5, 25, 45, 65, 85, 15];
        let steps = generate_steps(&input);

        let after_distribution = steps
            .iter()
            .rfind(|s| s.phase() == Phase::Distribute)
            .expect("distribution steps");
        assert_eq!(
            after_distribution.buckets,
            vec![vec![5, 15], vec![25], vec![45], vec![65], vec![85]]
        );
        assert!(after_distribution.values.iter().all(Option::is_none));

        let last = steps.last().expect("complete step");
        assert_eq!(
            last.values,
            vec![Some(5), Some(15), Some(25), Some(45), Some(65), Some(85)]
        );
    }

    #[test]
    fn test_decision_precedes_mutation() {
        let steps = generate_steps(&[30, 10]);
        // init, decide(30), placed(30), decide(10), placed(10), ...
        assert_eq!(steps[1].values, vec![Some(30), Some(10)]);
        assert_eq!(steps[1].active_index(), Some(0));
        assert!(steps[1].buckets_empty());

        assert_eq!(steps[2].values, vec![None, Some(10)]);
        assert_eq!(steps[2].active_index(), Some(0));
        assert_eq!(steps[2].buckets[1], vec![30]);

        assert_eq!(steps[3].active_index(), Some(1));
    }

    #[test]
    fn test_small_buckets_are_not_sorted_visibly() {
        let steps = generate_steps(&[5, 25, 45]);
        assert!(steps.iter().all(|s| s.phase() != Phase::SortBucket));
    }

    #[test]
    fn test_sort_bucket_pair() {
        let steps = generate_steps(&[19, 3, 11]);
        let sorting: Vec<&Snapshot> = steps
            .iter()
            .filter(|s| s.phase() == Phase::SortBucket)
            .collect();
        assert_eq!(sorting.len(), 2);
        assert_eq!(sorting[0].buckets[0], vec![19, 3, 11]);
        assert_eq!(sorting[1].buckets[0], vec![3, 11, 19]);
        assert_eq!(sorting[0].active_bucket(), Some(0));
        assert_eq!(sorting[1].active_bucket(), Some(0));
    }

    #[test]
    fn test_collect_writes_sequential_slots() {
        let steps = generate_steps(&[70, 10, 50]);
        let slots: Vec<(usize, i64)> = steps
            .iter()
            .filter_map(|s| match s.event {
                StepEvent::Collect { slot, value, .. } => Some((slot, value)),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![(0, 10), (1, 50), (2, 70)]);
    }

    #[test]
    fn test_collect_snapshot_shows_value_in_bucket() {
        let steps = generate_steps(&[70]);
        let collect = steps
            .iter()
            .find(|s| s.phase() == Phase::Collect)
            .expect("collect step");
        assert_eq!(collect.buckets[3], vec![70]);
        assert_eq!(collect.values, vec![None]);
    }

    #[test]
    fn test_highlight_lines() {
        let steps = generate_steps(&[1, 2]);
        let lines: Vec<Option<usize>> = steps.iter().map(|s| s.highlight_line).collect();
        assert_eq!(
            lines,
            vec![
                Some(LINE_START),
                Some(LINE_BUCKET_INDEX),
                Some(LINE_APPEND),
                Some(LINE_BUCKET_INDEX),
                Some(LINE_APPEND),
                Some(LINE_SORT),
                Some(LINE_SORTED),
                Some(LINE_WRITE_BACK),
                Some(LINE_WRITE_BACK),
                Some(LINE_START),
            ]
        );
    }

    #[test]
    fn test_narration_names_destination_bucket() {
        let steps = generate_steps(&[99]);
        assert!(steps[1].narration.contains("bucket 4"));
        assert!(steps[1].narration.contains("80-100"));
        assert!(!steps[1].narration.contains("clamped"));
    }

    #[test]
    fn test_narration_reports_clamped_values() {
        let steps = generate_steps(&[150, -5]);
        assert_eq!(
            steps[1].narration,
            "150 lies outside 0-100, so it is clamped into bucket 4 (80-100)."
        );
        assert_eq!(
            steps[3].narration,
            "-5 lies outside 0-100, so it is clamped into bucket 0 (0-20)."
        );
    }

    #[test]
    fn test_duplicates_and_all_equal() {
        let steps = generate_steps(&[7, 7, 7]);
        let last = steps.last().expect("complete step");
        assert_eq!(last.values, vec![Some(7), Some(7), Some(7)]);

        let steps = generate_steps(&[40, 12, 40, 12]);
        let last = steps.last().expect("complete step");
        assert_eq!(last.values, vec![Some(12), Some(12), Some(40), Some(40)]);
    }

    #[test]
    fn test_out_of_domain_values_do_not_panic() {
        let steps = generate_steps(&[-5, 150, 100, 0]);
        let last = steps.last().expect("complete step");
        assert_eq!(last.values, vec![Some(-5), Some(0), Some(100), Some(150)]);
    }

    #[test]
    fn test_custom_scheme() {
        let scheme = BucketScheme::new(2, 10).expect("valid scheme");
        let steps = generate_steps_with(&[9, 1, 5], &scheme);
        assert!(steps.iter().all(|s| s.buckets.len() == 2));
        let last = steps.last().expect("complete step");
        assert_eq!(last.values, vec![Some(1), Some(5), Some(9)]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let input = [88, 3, 51, 51, 20, 99, 0];
        assert_eq!(generate_steps(&input), generate_steps(&input));
    }
}
