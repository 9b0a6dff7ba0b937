//! Knuth-Morris-Pratt string matching step producer.
//!
//! Two phases, both recorded: building the failure (longest proper
//! prefix-suffix) table over the pattern, then the linear scan over the
//! text. An empty pattern or text degrades to a trivial run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Maximum text/pattern length.
pub const MAX_TEXT_LEN: usize = 256;

/// KMP configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KmpConfig {
    /// Text to search in; truncated to [`MAX_TEXT_LEN`].
    #[serde(default)]
    pub text: String,

    /// Pattern to search for; truncated to [`MAX_TEXT_LEN`].
    #[serde(default)]
    pub pattern: String,
}

/// Which phase of the algorithm a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KmpPhase {
    /// Building the failure table.
    BuildTable,
    /// Scanning the text.
    Scan,
    /// Run finished.
    Done,
}

/// Snapshot payload for the KMP visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KmpPayload {
    /// Current phase.
    pub phase: KmpPhase,
    /// Failure table built so far.
    pub failure: Vec<usize>,
    /// Current text index (scan phase).
    pub text_index: usize,
    /// Current pattern index.
    pub pattern_index: usize,
    /// Match start indices found so far.
    pub matches: Vec<usize>,
}

/// KMP step producer.
#[derive(Debug, Clone)]
pub struct KmpProducer {
    config: KmpConfig,
    failure: Vec<usize>,
    matches: Vec<usize>,
}

impl KmpProducer {
    fn payload(&self, phase: KmpPhase, text_index: usize, pattern_index: usize) -> KmpPayload {
        KmpPayload {
            phase,
            failure: self.failure.clone(),
            text_index,
            pattern_index,
            matches: self.matches.clone(),
        }
    }

    fn build_failure_table(
        &mut self,
        pattern: &[char],
        recorder: &mut StepRecorder<KmpPayload>,
    ) {
        self.failure = vec![0; pattern.len()];
        let mut len = 0;
        let mut i = 1;
        while i < pattern.len() {
            if pattern[i] == pattern[len] {
                len += 1;
                self.failure[i] = len;
                recorder.record(
                    format!("Failure table: prefix-suffix of length {len} ends at {i}"),
                    self.payload(KmpPhase::BuildTable, 0, i),
                );
                i += 1;
            } else if len > 0 {
                len = self.failure[len - 1];
                recorder.record(
                    format!("Failure table: mismatch at {i}, fall back to length {len}"),
                    self.payload(KmpPhase::BuildTable, 0, i),
                );
            } else {
                self.failure[i] = 0;
                recorder.record(
                    format!("Failure table: no prefix-suffix ends at {i}"),
                    self.payload(KmpPhase::BuildTable, 0, i),
                );
                i += 1;
            }
        }
    }

    fn scan(
        &mut self,
        text: &[char],
        pattern: &[char],
        recorder: &mut StepRecorder<KmpPayload>,
    ) {
        let mut j = 0; // pattern index
        let mut i = 0; // text index
        while i < text.len() {
            if text[i] == pattern[j] {
                recorder.record(
                    format!("Match '{}' at text index {i}, pattern index {j}", text[i]),
                    self.payload(KmpPhase::Scan, i, j),
                );
                i += 1;
                j += 1;
                if j == pattern.len() {
                    let start = i - j;
                    self.matches.push(start);
                    recorder.record(
                        format!("Pattern found at index {start}"),
                        self.payload(KmpPhase::Scan, i, j),
                    );
                    j = self.failure[j - 1];
                }
            } else if j > 0 {
                j = self.failure[j - 1];
                recorder.record(
                    format!("Mismatch at text index {i}; shift pattern to index {j}"),
                    self.payload(KmpPhase::Scan, i, j),
                );
            } else {
                recorder.record(
                    format!("Mismatch at text index {i}; advance text"),
                    self.payload(KmpPhase::Scan, i, j),
                );
                i += 1;
            }
        }
    }
}

impl StepProducer for KmpProducer {
    type Config = KmpConfig;
    type Payload = KmpPayload;

    fn from_config(mut config: Self::Config) -> Self {
        // Char-based truncation; byte truncation could split a code point.
        if config.text.chars().count() > MAX_TEXT_LEN {
            config.text = config.text.chars().take(MAX_TEXT_LEN).collect();
        }
        if config.pattern.chars().count() > MAX_TEXT_LEN {
            config.pattern = config.pattern.chars().take(MAX_TEXT_LEN).collect();
        }
        Self {
            config,
            failure: Vec::new(),
            matches: Vec::new(),
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "kmp"
    }

    fn base_step_duration(&self) -> Duration {
        Duration::from_millis(400)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        self.failure = Vec::new();
        self.matches = Vec::new();

        let text: Vec<char> = self.config.text.chars().collect();
        let pattern: Vec<char> = self.config.pattern.chars().collect();

        let mut recorder = StepRecorder::new();

        if pattern.is_empty() || text.is_empty() || pattern.len() > text.len() {
            // Degrade to a trivial run rather than signalling failure.
            recorder.record(
                "Nothing to search: pattern is empty or longer than the text",
                self.payload(KmpPhase::Done, 0, 0),
            );
            return recorder.into_sequence();
        }

        recorder.record(
            format!(
                "Search for \"{}\" ({} chars) in text of {} chars",
                self.config.pattern,
                pattern.len(),
                text.len()
            ),
            self.payload(KmpPhase::BuildTable, 0, 0),
        );

        self.build_failure_table(&pattern, &mut recorder);
        self.scan(&text, &pattern, &mut recorder);

        recorder.record(
            match self.matches.len() {
                0 => "Scan complete: no occurrences found".to_string(),
                1 => format!("Scan complete: 1 occurrence at index {}", self.matches[0]),
                n => format!("Scan complete: {n} occurrences found"),
            },
            self.payload(KmpPhase::Done, text.len(), 0),
        );
        recorder.into_sequence()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn naive_matches(text: &str, pattern: &str) -> Vec<usize> {
        let t: Vec<char> = text.chars().collect();
        let p: Vec<char> = pattern.chars().collect();
        if p.is_empty() || p.len() > t.len() {
            return Vec::new();
        }
        (0..=t.len() - p.len())
            .filter(|&i| t[i..i + p.len()] == p[..])
            .collect()
    }

    proptest! {
        /// Falsification: KMP agrees with the quadratic scan.
        #[test]
        fn prop_matches_agree_with_naive(
            text in "[ab]{0,40}",
            pattern in "[ab]{1,6}",
        ) {
            let mut producer = KmpProducer::from_config(KmpConfig {
                text: text.clone(),
                pattern: pattern.clone(),
            });
            let seq = producer.run();
            let found = &seq.last().expect("non-empty").payload.matches;
            prop_assert_eq!(found, &naive_matches(&text, &pattern));
        }
    }
}
