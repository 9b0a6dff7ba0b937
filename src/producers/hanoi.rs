//! Tower of Hanoi step producer.
//!
//! Classic recursive transcription: moving `n` disks records exactly
//! `2^n − 1` move snapshots plus one initial snapshot.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::snapshot::{SnapshotSequence, StepRecorder};

use super::StepProducer;

/// Maximum disk count. Keeps total snapshots at 2^8 = 256.
pub const MAX_DISKS: u32 = 8;

/// Peg labels used in descriptions.
const PEG_NAMES: [char; 3] = ['A', 'B', 'C'];

/// Hanoi configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HanoiConfig {
    /// Number of disks; clamped to `[1, 8]`.
    #[serde(default = "default_disks")]
    pub disks: u32,
}

const fn default_disks() -> u32 {
    3
}

impl Default for HanoiConfig {
    fn default() -> Self {
        Self {
            disks: default_disks(),
        }
    }
}

/// Snapshot payload: full peg state after the described step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HanoiPayload {
    /// Disk sizes per peg, bottom first.
    pub pegs: [Vec<u32>; 3],
    /// Moves completed so far.
    pub moves_done: u32,
    /// Disk moved in this step, if any.
    pub moved_disk: Option<u32>,
}

/// Tower of Hanoi step producer.
#[derive(Debug, Clone)]
pub struct HanoiProducer {
    config: HanoiConfig,
    pegs: [Vec<u32>; 3],
    moves_done: u32,
}

impl HanoiProducer {
    fn payload(&self, moved_disk: Option<u32>) -> HanoiPayload {
        HanoiPayload {
            pegs: self.pegs.clone(),
            moves_done: self.moves_done,
            moved_disk,
        }
    }

    fn move_disk(&mut self, from: usize, to: usize, recorder: &mut StepRecorder<HanoiPayload>) {
        let Some(disk) = self.pegs[from].pop() else {
            return;
        };
        self.pegs[to].push(disk);
        self.moves_done += 1;
        recorder.record(
            format!(
                "Move disk {disk} from peg {} to peg {}",
                PEG_NAMES[from], PEG_NAMES[to]
            ),
            self.payload(Some(disk)),
        );
    }

    fn solve(
        &mut self,
        n: u32,
        from: usize,
        to: usize,
        via: usize,
        recorder: &mut StepRecorder<HanoiPayload>,
    ) {
        if n == 0 {
            return;
        }
        self.solve(n - 1, from, via, to, recorder);
        self.move_disk(from, to, recorder);
        self.solve(n - 1, via, to, from, recorder);
    }
}

impl StepProducer for HanoiProducer {
    type Config = HanoiConfig;
    type Payload = HanoiPayload;

    fn from_config(mut config: Self::Config) -> Self {
        config.disks = config.disks.clamp(1, MAX_DISKS);
        Self {
            config,
            pegs: [Vec::new(), Vec::new(), Vec::new()],
            moves_done: 0,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn name(&self) -> &'static str {
        "hanoi"
    }

    fn base_step_duration(&self) -> Duration {
        // Sparse visualization: one move per step reads best slowly.
        Duration::from_millis(800)
    }

    fn run(&mut self) -> SnapshotSequence<Self::Payload> {
        let n = self.config.disks;
        self.pegs = [(1..=n).rev().collect(), Vec::new(), Vec::new()];
        self.moves_done = 0;

        let mut recorder = StepRecorder::new();
        recorder.record(
            format!("Initial state: {n} disks on peg A"),
            self.payload(None),
        );
        self.solve(n, 0, 2, 1, &mut recorder);
        recorder.into_sequence()
    }
}
