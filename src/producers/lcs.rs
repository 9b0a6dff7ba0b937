//! Longest common subsequence step producer.
//!
//! Bottom-up dynamic programming: one snapshot per filled table cell,
//! then one per traceback step. Strings are capped at 30 characters so
//! the full table fill stays near 900 snapshots.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Maximum input string length (in characters).
pub const MAX_STRING_LEN: usize = 30;

/// LCS configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LcsConfig {
    /// First string; truncated to [`MAX_STRING_LEN`] characters.
    #[serde(default)]
    pub a: String,

    /// Second string; truncated to [`MAX_STRING_LEN`] characters.
    #[serde(default)]
    pub b: String,
}

/// Which phase of the algorithm a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LcsPhase {
    /// Filling the DP table.
    FillTable,
    /// Walking back through the table.
    Traceback,
    /// Run finished.
    Done,
}

/// Snapshot payload: DP table state plus the cell being filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsPayload {
    /// Current phase.
    pub phase: LcsPhase,
    /// DP table, `(len_a + 1) x (len_b + 1)`, row-major.
    pub table: Vec<Vec<usize>>,
    /// Cell touched by this step `(i, j)`, if any.
    pub current_cell: Option<(usize, usize)>,
    /// Subsequence recovered so far (traceback phase, final order).
    pub lcs: String,
}

/// LCS step producer.
#[derive(Debug, Clone)]
pub struct LcsProducer {
    config: LcsConfig,
    table: Vec<Vec<usize>>,
    lcs: String,
}

impl LcsProducer {
    fn payload(&self, phase: LcsPhase, current_cell: Option<(usize, usize)>) -> LcsPayload {
        LcsPayload {
            phase,
            table: self.table.clone(),
            current_cell,
            lcs: self.lcs.clone(),
        }
    }

    fn truncate_chars(s: &str) -> String {
        s.chars().take(MAX_STRING_LEN).collect()
    }
}

impl StepProducer for LcsProducer {
    type Config = LcsConfig;
    type Payload = LcsPayload;

    fn from_config(mut config: Self::Config) -> Self {
        config.a = Self::truncate_chars(&config.a);
        config.b = Self::truncate_chars(&config.b);
        Self {
            config,
            table: Vec::new(),
            lcs: String::new(),
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "lcs"
    }

    fn base_step_duration(&self) -> Duration {
        Duration::from_millis(120)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        let a: Vec<char> = self.config.a.chars().collect();
        let b: Vec<char> = self.config.b.chars().collect();
        self.table = vec![vec![0; b.len() + 1]; a.len() + 1];
        self.lcs = String::new();

        let mut recorder = StepRecorder::new();

        if a.is_empty() || b.is_empty() {
            recorder.record(
                "Nothing to compare: one input is empty",
                self.payload(LcsPhase::Done, None),
            );
            return recorder.into_sequence();
        }

        recorder.record(
            format!(
                "Compare \"{}\" ({} chars) with \"{}\" ({} chars)",
                self.config.a,
                a.len(),
                self.config.b,
                b.len()
            ),
            self.payload(LcsPhase::FillTable, None),
        );

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                if a[i - 1] == b[j - 1] {
                    self.table[i][j] = self.table[i - 1][j - 1] + 1;
                    recorder.record(
                        format!(
                            "Cell ({i}, {j}): '{}' matches, extend to {}",
                            a[i - 1],
                            self.table[i][j]
                        ),
                        self.payload(LcsPhase::FillTable, Some((i, j))),
                    );
                } else {
                    self.table[i][j] = self.table[i - 1][j].max(self.table[i][j - 1]);
                    recorder.record(
                        format!(
                            "Cell ({i}, {j}): no match, carry {}",
                            self.table[i][j]
                        ),
                        self.payload(LcsPhase::FillTable, Some((i, j))),
                    );
                }
            }
        }

        // Traceback from the bottom-right corner.
        let mut chars = Vec::new();
        let (mut i, mut j) = (a.len(), b.len());
        while i > 0 && j > 0 {
            if a[i - 1] == b[j - 1] {
                chars.push(a[i - 1]);
                self.lcs = chars.iter().rev().collect();
                recorder.record(
                    format!("Traceback ({i}, {j}): take '{}'", a[i - 1]),
                    self.payload(LcsPhase::Traceback, Some((i, j))),
                );
                i -= 1;
                j -= 1;
            } else if self.table[i - 1][j] >= self.table[i][j - 1] {
                recorder.record(
                    format!("Traceback ({i}, {j}): move up"),
                    self.payload(LcsPhase::Traceback, Some((i, j))),
                );
                i -= 1;
            } else {
                recorder.record(
                    format!("Traceback ({i}, {j}): move left"),
                    self.payload(LcsPhase::Traceback, Some((i, j))),
                );
                j -= 1;
            }
        }

        recorder.record(
            format!(
                "LCS has length {}: \"{}\"",
                self.table[a.len()][b.len()],
                self.lcs
            ),
            self.payload(LcsPhase::Done, None),
        );
        recorder.into_sequence()
    }
}
