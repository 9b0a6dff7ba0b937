//! N-Queens backtracking step producer.
//!
//! Row-by-row placement with explicit snapshots for every try, conflict,
//! placement, backtrack, and solution. `find_first` stops the recorded
//! search after the first complete solution, which keeps the sequence
//! short for larger boards.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Maximum board size. N=12 stays within interactive snapshot counts
/// when `find_first` is set.
pub const MAX_BOARD: usize = 12;

/// N-Queens configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NQueensConfig {
    /// Board size; clamped to `[1, 12]`.
    #[serde(default = "default_n")]
    pub n: usize,

    /// Stop after the first solution instead of enumerating all.
    #[serde(default = "default_find_first")]
    pub find_first: bool,
}

const fn default_n() -> usize {
    8
}

const fn default_find_first() -> bool {
    true
}

impl Default for NQueensConfig {
    fn default() -> Self {
        Self {
            n: default_n(),
            find_first: default_find_first(),
        }
    }
}

/// Snapshot payload: queen column per row (None while row unsolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NQueensPayload {
    /// Board size.
    pub n: usize,
    /// Queen column for each row, if placed.
    pub queens: Vec<Option<usize>>,
    /// Row currently being worked on.
    pub current_row: usize,
    /// Solutions found so far.
    pub solutions_found: usize,
}

/// N-Queens step producer.
#[derive(Debug, Clone)]
pub struct NQueensProducer {
    config: NQueensConfig,
    queens: Vec<Option<usize>>,
    solutions_found: usize,
}

impl NQueensProducer {
    fn payload(&self, current_row: usize) -> NQueensPayload {
        NQueensPayload {
            n: self.config.n,
            queens: self.queens.clone(),
            current_row,
            solutions_found: self.solutions_found,
        }
    }

    fn safe(&self, row: usize, col: usize) -> bool {
        for (r, placed) in self.queens.iter().enumerate().take(row) {
            let Some(c) = *placed else { continue };
            if c == col || r.abs_diff(row) == c.abs_diff(col) {
                return false;
            }
        }
        true
    }

    /// Returns true when the search should stop (first solution found
    /// in `find_first` mode).
    fn search(&mut self, row: usize, recorder: &mut StepRecorder<NQueensPayload>) -> bool {
        let n = self.config.n;
        if row == n {
            self.solutions_found += 1;
            recorder.record(
                format!("Solution {} found", self.solutions_found),
                self.payload(row),
            );
            return self.config.find_first;
        }

        for col in 0..n {
            if self.safe(row, col) {
                self.queens[row] = Some(col);
                recorder.record(
                    format!("Place queen at row {row}, column {col}"),
                    self.payload(row),
                );
                if self.search(row + 1, recorder) {
                    return true;
                }
                self.queens[row] = None;
                recorder.record(
                    format!("Backtrack: remove queen from row {row}, column {col}"),
                    self.payload(row),
                );
            }
        }
        false
    }
}

impl StepProducer for NQueensProducer {
    type Config = NQueensConfig;
    type Payload = NQueensPayload;

    fn from_config(mut config: Self::Config) -> Self {
        config.n = config.n.clamp(1, MAX_BOARD);
        Self {
            config,
            queens: Vec::new(),
            solutions_found: 0,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "nqueens"
    }

    fn base_step_duration(&self) -> Duration {
        Duration::from_millis(300)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        self.queens = vec![None; self.config.n];
        self.solutions_found = 0;

        let mut recorder = StepRecorder::new();
        recorder.record(
            format!("Empty {0}x{0} board", self.config.n),
            self.payload(0),
        );
        self.search(0, &mut recorder);
        recorder.record(
            match self.solutions_found {
                0 => "Search exhausted: no solution exists".to_string(),
                1 => "Search finished: 1 solution found".to_string(),
                n => format!("Search exhausted: {n} solutions found"),
            },
            self.payload(self.config.n),
        );
        recorder.into_sequence()
    }
}
