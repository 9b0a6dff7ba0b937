//! Step producers: instrumented algorithm transcriptions.
//!
//! A producer runs one textbook algorithm eagerly to completion and
//! records a [`SnapshotSequence`] as a side effect. Producers are the
//! only components that know what a payload means; the playback engine
//! passes payloads through unexamined.
//!
//! # Contract
//!
//! - `run` always returns a non-empty sequence: even a degenerate input
//!   (empty pattern, unsolvable board) records at least an initial
//!   snapshot describing the situation.
//! - Producers are reusable mutable instances: `run` resets internal
//!   buffers at the start, so successive runs are independent.
//! - Bounded inputs: every numeric parameter is clamped to a documented
//!   range at configuration time so runs terminate in interactive time.
//! - No error channel: malformed input degrades to a trivial run.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::time::Duration;

use crate::error::VizResult;
use crate::snapshot::SnapshotSequence;

pub mod bst;
pub mod hanoi;
pub mod kmp;
pub mod lcs;
pub mod nqueens;
pub mod pathfinding;
pub mod sorting;
pub mod sudoku;

pub use bst::BstProducer;
pub use hanoi::HanoiProducer;
pub use kmp::KmpProducer;
pub use lcs::LcsProducer;
pub use nqueens::NQueensProducer;
pub use pathfinding::PathfindingProducer;
pub use sorting::SortProducer;
pub use sudoku::SudokuProducer;

/// Common interface for all step producers.
pub trait StepProducer: Sized {
    /// Configuration type loaded from YAML.
    type Config: DeserializeOwned + Debug;

    /// Payload carried by each snapshot of this producer.
    type Payload: Clone + Serialize + Debug;

    /// Create a producer from a config struct, clamping bounded inputs.
    fn from_config(config: Self::Config) -> Self;

    /// Create a producer from a YAML configuration string.
    ///
    /// # Errors
    ///
    /// Returns error if YAML parsing fails. Out-of-range values do not
    /// error; they are clamped by `from_config`.
    fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self::Config = serde_yaml::from_str(yaml)?;
        Ok(Self::from_config(config))
    }

    /// Get the current configuration (after clamping).
    fn config(&self) -> &Self::Config;

    /// Stable short name used by the CLI (`algoviz run <name>`).
    fn name(&self) -> &'static str;

    /// Nominal delay between automatic advances at 1.0x speed.
    ///
    /// Per-visualizer: visually dense algorithms use short steps to
    /// stay legible, sparse ones long steps.
    fn base_step_duration(&self) -> Duration;

    /// Run the algorithm to completion, recording every notable step.
    ///
    /// Resets internal buffers first; always returns a non-empty
    /// sequence.
    fn run(&mut self) -> SnapshotSequence<Self::Payload>;
}
