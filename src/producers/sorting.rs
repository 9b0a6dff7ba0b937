//! Sorting step producers: bubble, merge, and quick sort.
//!
//! Each comparison and each write is a notable step. The payload carries
//! the full array plus the indices the renderer should highlight, so a
//! bar chart can show exactly what the algorithm is looking at.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::rng::VizRng;
use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Maximum array length. Bubble sort on 64 elements records ~4k steps.
pub const MAX_ARRAY_LEN: usize = 64;

/// Which sorting algorithm to visualize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    /// Bubble sort: adjacent compare/swap passes.
    Bubble,
    /// Merge sort: recursive split and merge.
    #[default]
    Merge,
    /// Quick sort: Lomuto partition, last element pivot.
    Quick,
}

impl SortAlgorithm {
    /// Display name used in snapshot descriptions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bubble => "bubble sort",
            Self::Merge => "merge sort",
            Self::Quick => "quick sort",
        }
    }
}

/// Sorting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    /// Algorithm to run.
    #[serde(default)]
    pub algorithm: SortAlgorithm,

    /// Explicit input array; truncated to [`MAX_ARRAY_LEN`].
    ///
    /// When empty, a random permutation of `size` values is generated
    /// from `seed`.
    #[serde(default)]
    pub values: Vec<i32>,

    /// Random array size when `values` is empty; clamped to `[2, 64]`.
    #[serde(default = "default_size")]
    pub size: usize,

    /// Seed for random array generation.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_size() -> usize {
    24
}

const fn default_seed() -> u64 {
    42
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            algorithm: SortAlgorithm::default(),
            values: Vec::new(),
            size: default_size(),
            seed: default_seed(),
        }
    }
}

/// Snapshot payload: array state plus renderer highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPayload {
    /// Current array contents.
    pub values: Vec<i32>,
    /// Indices being compared or written this step.
    pub highlighted: Vec<usize>,
    /// Number of comparisons so far.
    pub comparisons: u64,
    /// Number of writes/swaps so far.
    pub writes: u64,
    /// Whether the array is fully sorted.
    pub sorted: bool,
}

/// Sorting step producer.
#[derive(Debug, Clone)]
pub struct SortProducer {
    config: SortConfig,
    values: Vec<i32>,
    comparisons: u64,
    writes: u64,
}

impl SortProducer {
    fn payload(&self, highlighted: Vec<usize>, sorted: bool) -> SortPayload {
        SortPayload {
            values: self.values.clone(),
            highlighted,
            comparisons: self.comparisons,
            writes: self.writes,
            sorted,
        }
    }

    fn record_compare(
        &mut self,
        i: usize,
        j: usize,
        recorder: &mut StepRecorder<SortPayload>,
    ) {
        self.comparisons += 1;
        recorder.record(
            format!(
                "Compare {} (index {i}) with {} (index {j})",
                self.values[i], self.values[j]
            ),
            self.payload(vec![i, j], false),
        );
    }

    fn bubble(&mut self, recorder: &mut StepRecorder<SortPayload>) {
        let n = self.values.len();
        for pass in 0..n {
            let mut swapped = false;
            for i in 0..n - pass - 1 {
                self.record_compare(i, i + 1, recorder);
                if self.values[i] > self.values[i + 1] {
                    self.values.swap(i, i + 1);
                    self.writes += 1;
                    swapped = true;
                    recorder.record(
                        format!("Swap indices {i} and {}", i + 1),
                        self.payload(vec![i, i + 1], false),
                    );
                }
            }
            if !swapped {
                break;
            }
        }
    }

    fn merge_sort(&mut self, lo: usize, hi: usize, recorder: &mut StepRecorder<SortPayload>) {
        if hi - lo <= 1 {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.merge_sort(lo, mid, recorder);
        self.merge_sort(mid, hi, recorder);

        let left = self.values[lo..mid].to_vec();
        let right = self.values[mid..hi].to_vec();
        let (mut i, mut j, mut k) = (0, 0, lo);
        while i < left.len() && j < right.len() {
            self.comparisons += 1;
            if left[i] <= right[j] {
                self.values[k] = left[i];
                i += 1;
            } else {
                self.values[k] = right[j];
                j += 1;
            }
            self.writes += 1;
            recorder.record(
                format!("Merge write {} into index {k}", self.values[k]),
                self.payload(vec![k], false),
            );
            k += 1;
        }
        while i < left.len() {
            self.values[k] = left[i];
            self.writes += 1;
            recorder.record(
                format!("Merge write {} into index {k}", self.values[k]),
                self.payload(vec![k], false),
            );
            i += 1;
            k += 1;
        }
        while j < right.len() {
            self.values[k] = right[j];
            self.writes += 1;
            recorder.record(
                format!("Merge write {} into index {k}", self.values[k]),
                self.payload(vec![k], false),
            );
            j += 1;
            k += 1;
        }
    }

    fn quick_sort(&mut self, lo: isize, hi: isize, recorder: &mut StepRecorder<SortPayload>) {
        if lo >= hi {
            return;
        }
        let (lo_u, hi_u) = (lo as usize, hi as usize);
        let pivot = self.values[hi_u];
        recorder.record(
            format!("Choose pivot {pivot} (index {hi_u})"),
            self.payload(vec![hi_u], false),
        );

        let mut store = lo_u;
        for i in lo_u..hi_u {
            self.record_compare(i, hi_u, recorder);
            if self.values[i] < pivot {
                if i != store {
                    self.values.swap(i, store);
                    self.writes += 1;
                    recorder.record(
                        format!("Swap indices {store} and {i}"),
                        self.payload(vec![store, i], false),
                    );
                }
                store += 1;
            }
        }
        if store != hi_u {
            self.values.swap(store, hi_u);
            self.writes += 1;
            recorder.record(
                format!("Place pivot {pivot} at index {store}"),
                self.payload(vec![store], false),
            );
        }

        self.quick_sort(lo, store as isize - 1, recorder);
        self.quick_sort(store as isize + 1, hi, recorder);
    }
}

impl StepProducer for SortProducer {
    type Config = SortConfig;
    type Payload = SortPayload;

    fn from_config(mut config: Self::Config) -> Self {
        config.values.truncate(MAX_ARRAY_LEN);
        config.size = config.size.clamp(2, MAX_ARRAY_LEN);
        Self {
            config,
            values: Vec::new(),
            comparisons: 0,
            writes: 0,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "sort"
    }

    fn base_step_duration(&self) -> Duration {
        // Dense visualization: many small steps, keep them quick.
        Duration::from_millis(150)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        self.values = if self.config.values.is_empty() {
            let mut rng = VizRng::new(self.config.seed);
            rng.permutation(self.config.size)
                .into_iter()
                .map(|v| v as i32)
                .collect()
        } else {
            self.config.values.clone()
        };
        self.comparisons = 0;
        self.writes = 0;

        let mut recorder = StepRecorder::new();
        recorder.record(
            format!(
                "Initial array of {} elements ({})",
                self.values.len(),
                self.config.algorithm.label()
            ),
            self.payload(Vec::new(), false),
        );

        match self.config.algorithm {
            SortAlgorithm::Bubble => self.bubble(&mut recorder),
            SortAlgorithm::Merge => {
                let n = self.values.len();
                self.merge_sort(0, n, &mut recorder);
            }
            SortAlgorithm::Quick => {
                let n = self.values.len() as isize;
                self.quick_sort(0, n - 1, &mut recorder);
            }
        }

        recorder.record(
            format!(
                "Array sorted: {} comparisons, {} writes",
                self.comparisons, self.writes
            ),
            self.payload(Vec::new(), true),
        );
        recorder.into_sequence()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Falsification: every algorithm produces a sorted permutation
        /// of its input.
        #[test]
        fn prop_sorts_any_input(
            mut values in proptest::collection::vec(-1000i32..1000, 2..40),
            algo in 0u8..3,
        ) {
            let algorithm = match algo {
                0 => SortAlgorithm::Bubble,
                1 => SortAlgorithm::Merge,
                _ => SortAlgorithm::Quick,
            };
            let mut producer = SortProducer::from_config(SortConfig {
                algorithm,
                values: values.clone(),
                ..SortConfig::default()
            });
            let seq = producer.run();
            let last = seq.last().expect("non-empty");

            values.sort_unstable();
            prop_assert_eq!(&last.payload.values, &values);
        }
    }
}
