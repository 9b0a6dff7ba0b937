//! # algoviz
//!
//! Step-by-step playback of classic textbook algorithms.
//!
//! Every algorithm is a [`producers::StepProducer`] that runs eagerly to
//! completion, recording an ordered sequence of immutable snapshots. A
//! generic [`playback::PlaybackEngine`] replays the sequence under frame
//! timer or manual control, algorithm-agnostic: it only ever looks at a
//! snapshot's description and passes the payload through to a renderer.
//!
//! ## Example
//!
//! ```rust
//! use algoviz::prelude::*;
//!
//! let mut producer = HanoiProducer::from_config(HanoiConfig { disks: 3 });
//! let sequence = producer.run();
//!
//! let mut engine = PlaybackEngine::new(producer.base_step_duration());
//! engine.load(sequence);
//! engine.step_forward();
//! assert_eq!(engine.position(), 1);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod playback;
pub mod producers;
pub mod rng;
pub mod snapshot;
#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::error::{VizError, VizResult};
    pub use crate::playback::{PlaybackEngine, PlaybackState, PlaybackStatus};
    pub use crate::producers::hanoi::HanoiConfig;
    pub use crate::producers::{
        BstProducer, HanoiProducer, KmpProducer, LcsProducer, NQueensProducer,
        PathfindingProducer, SortProducer, StepProducer, SudokuProducer,
    };
    pub use crate::rng::VizRng;
    pub use crate::snapshot::{Snapshot, SnapshotSequence, StepRecorder};
}

/// Re-export for public API
pub use error::{VizError, VizResult};
