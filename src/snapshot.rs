//! Snapshot data model shared by every producer and the playback engine.
//!
//! A [`Snapshot`] is one recorded state of an algorithm's execution: a
//! human-readable description plus an opaque, producer-specific payload.
//! The playback engine never inspects the payload; it only hands it to
//! whatever renders the current step.
//!
//! # Capture contract
//!
//! Snapshots are value objects. A producer must hand the recorder an
//! *owned* payload (cloned from its working state before the state
//! mutates further). Once recorded, a snapshot is never modified.

use serde::{Deserialize, Serialize};

/// One recorded state of an algorithm's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<P> {
    /// Human-readable description of the step's intent.
    pub description: String,
    /// Producer-specific state, passed through to the renderer unexamined.
    pub payload: P,
}

impl<P> Snapshot<P> {
    /// Create a new snapshot.
    pub fn new(description: impl Into<String>, payload: P) -> Self {
        Self {
            description: description.into(),
            payload,
        }
    }
}

/// Ordered, 0-indexed, finite list of snapshots from one producer run.
///
/// Non-empty once a run completes: a producer that does nothing still
/// records an initial snapshot. The sequence is read-only once loaded
/// into a playback engine; only a fresh `load` replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSequence<P> {
    snapshots: Vec<Snapshot<P>>,
}

impl<P> Default for SnapshotSequence<P> {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }
}

impl<P> SnapshotSequence<P> {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get the snapshot at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Snapshot<P>> {
        self.snapshots.get(index)
    }

    /// Get the first snapshot.
    #[must_use]
    pub fn first(&self) -> Option<&Snapshot<P>> {
        self.snapshots.first()
    }

    /// Get the last snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<P>> {
        self.snapshots.last()
    }

    /// Iterate over snapshots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<P>> {
        self.snapshots.iter()
    }
}

impl<P> std::ops::Index<usize> for SnapshotSequence<P> {
    type Output = Snapshot<P>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.snapshots[index]
    }
}

impl<'a, P> IntoIterator for &'a SnapshotSequence<P> {
    type Item = &'a Snapshot<P>;
    type IntoIter = std::slice::Iter<'a, Snapshot<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Recorder a producer pushes snapshots into while running.
///
/// Taking payloads by value enforces clone-on-capture: the producer's
/// working state keeps mutating after the record call, but the recorded
/// payload is already an independent copy.
#[derive(Debug)]
pub struct StepRecorder<P> {
    snapshots: Vec<Snapshot<P>>,
}

impl<P> Default for StepRecorder<P> {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }
}

impl<P> StepRecorder<P> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step.
    pub fn record(&mut self, description: impl Into<String>, payload: P) {
        self.snapshots.push(Snapshot::new(description, payload));
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consume the recorder and produce the final sequence.
    #[must_use]
    pub fn into_sequence(self) -> SnapshotSequence<P> {
        SnapshotSequence {
            snapshots: self.snapshots,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_new() {
        let snap = Snapshot::new("initial state", vec![1, 2, 3]);
        assert_eq!(snap.description, "initial state");
        assert_eq!(snap.payload, vec![1, 2, 3]);
    }

    #[test]
    fn test_sequence_empty() {
        let seq: SnapshotSequence<u32> = SnapshotSequence::new();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert!(seq.get(0).is_none());
        assert!(seq.first().is_none());
        assert!(seq.last().is_none());
    }

    #[test]
    fn test_recorder_into_sequence() {
        let mut rec = StepRecorder::new();
        assert!(rec.is_empty());

        rec.record("step 0", 0u32);
        rec.record("step 1", 1u32);
        assert_eq!(rec.len(), 2);

        let seq = rec.into_sequence();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].description, "step 0");
        assert_eq!(seq[1].payload, 1);
    }

    #[test]
    fn test_sequence_get_out_of_bounds() {
        let mut rec = StepRecorder::new();
        rec.record("only", 0u32);
        let seq = rec.into_sequence();

        assert!(seq.get(0).is_some());
        assert!(seq.get(1).is_none());
    }

    #[test]
    fn test_capture_is_independent_of_working_state() {
        // The producer's working vector keeps mutating after capture;
        // the recorded payload must not change with it.
        let mut working = vec![3, 1, 2];
        let mut rec = StepRecorder::new();

        rec.record("before sort", working.clone());
        working.sort_unstable();
        rec.record("after sort", working.clone());

        let seq = rec.into_sequence();
        assert_eq!(seq[0].payload, vec![3, 1, 2]);
        assert_eq!(seq[1].payload, vec![1, 2, 3]);
    }

    #[test]
    fn test_sequence_iter_order() {
        let mut rec = StepRecorder::new();
        for i in 0..5 {
            rec.record(format!("step {i}"), i);
        }
        let seq = rec.into_sequence();

        let descriptions: Vec<&str> = seq.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["step 0", "step 1", "step 2", "step 3", "step 4"]
        );

        let payloads: Vec<i32> = (&seq).into_iter().map(|s| s.payload).collect();
        assert_eq!(payloads, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sequence_serde_roundtrip() {
        let mut rec = StepRecorder::new();
        rec.record("a", 1u8);
        rec.record("b", 2u8);
        let seq = rec.into_sequence();

        let yaml = serde_yaml::to_string(&seq).expect("serialize");
        let restored: SnapshotSequence<u8> = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(restored, seq);
    }
}
