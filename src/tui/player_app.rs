//! Sorting playback TUI application state and logic.
//!
//! This module contains the testable state for the sorting TUI player.
//! Terminal I/O is handled by the binary, but all state management
//! lives here: the app owns a producer, a recorded sequence, and a
//! playback engine driven by [`PlayerApp::update`].

use std::time::Instant;

use crossterm::event::KeyCode;

use crate::config::VizConfig;
use crate::playback::PlaybackEngine;
use crate::producers::sorting::{SortAlgorithm, SortConfig, SortPayload, SortProducer};
use crate::producers::StepProducer;

/// Application state for the sorting playback TUI.
pub struct PlayerApp {
    /// Playback engine holding the recorded run.
    pub engine: PlaybackEngine<SortPayload>,
    /// Configuration used for the current run.
    pub config: SortConfig,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl PlayerApp {
    /// Create a new player for the given sorting configuration.
    ///
    /// The producer runs to completion immediately; playback starts
    /// paused at the first step.
    #[must_use]
    pub fn new(config: SortConfig) -> Self {
        let mut producer = SortProducer::from_config(config.clone());
        let sequence = producer.run();
        let mut engine = PlaybackEngine::new(producer.base_step_duration());
        engine.load(sequence);

        Self {
            engine,
            config,
            should_quit: false,
        }
    }

    /// Create a player from a top-level visualizer configuration.
    ///
    /// Applies the config's seed, base step override, and initial speed
    /// on top of the default sorting setup.
    #[must_use]
    pub fn from_viz_config(viz: &VizConfig) -> Self {
        let playback = viz.playback.clamped();
        let config = SortConfig {
            seed: viz.seed,
            ..SortConfig::default()
        };

        let mut producer = SortProducer::from_config(config.clone());
        let sequence = producer.run();
        let base_step = playback.base_step_or(producer.base_step_duration());

        let mut engine = PlaybackEngine::new(base_step);
        engine.load(sequence);
        engine.set_speed(playback.speed);

        Self {
            engine,
            config,
            should_quit: false,
        }
    }

    /// Re-run the producer with a fresh seed and load the new sequence.
    pub fn reshuffle(&mut self) {
        self.config.seed = self.config.seed.wrapping_add(1);
        let mut producer = SortProducer::from_config(self.config.clone());
        self.engine.load(producer.run());
    }

    /// Switch to the next sorting algorithm and re-run.
    pub fn cycle_algorithm(&mut self) {
        self.config.algorithm = match self.config.algorithm {
            SortAlgorithm::Bubble => SortAlgorithm::Merge,
            SortAlgorithm::Merge => SortAlgorithm::Quick,
            SortAlgorithm::Quick => SortAlgorithm::Bubble,
        };
        let mut producer = SortProducer::from_config(self.config.clone());
        self.engine.load(producer.run());
    }

    /// Advance playback if enough wall-clock time has passed.
    pub fn update(&mut self) {
        self.engine.tick(Instant::now());
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.engine.toggle(),
            KeyCode::Right | KeyCode::Char('l') => self.engine.step_forward(),
            KeyCode::Left | KeyCode::Char('h') => self.engine.step_backward(),
            KeyCode::Char('+' | '=') => {
                let speed = self.engine.speed();
                self.engine.set_speed(speed * 2.0);
            }
            KeyCode::Char('-') => {
                let speed = self.engine.speed();
                self.engine.set_speed(speed / 2.0);
            }
            KeyCode::Char('0') | KeyCode::Home => self.engine.go_to_step(0),
            KeyCode::Char('$') | KeyCode::End => {
                let last = self.engine.total_steps().saturating_sub(1);
                self.engine.go_to_step(last);
            }
            KeyCode::Char('r') => self.reshuffle(),
            KeyCode::Char('m') => self.cycle_algorithm(),
            _ => {}
        }
    }

    /// Check if the app should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Display name of the current algorithm.
    #[must_use]
    pub const fn algorithm_name(&self) -> &'static str {
        self.config.algorithm.label()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arbitrary_key() -> impl Strategy<Value = KeyCode> {
        prop_oneof![
            Just(KeyCode::Char(' ')),
            Just(KeyCode::Right),
            Just(KeyCode::Left),
            Just(KeyCode::Char('+')),
            Just(KeyCode::Char('-')),
            Just(KeyCode::Char('0')),
            Just(KeyCode::Char('$')),
            Just(KeyCode::Char('r')),
            Just(KeyCode::Char('m')),
        ]
    }

    proptest! {
        /// Falsification: a key sequence that moves the cursor out of
        /// bounds or the speed outside [0.25, 4.0] would break playback.
        #[test]
        fn prop_keys_keep_engine_in_bounds(keys in prop::collection::vec(arbitrary_key(), 0..40)) {
            let mut app = PlayerApp::new(SortConfig {
                values: vec![5, 2, 9, 1],
                ..SortConfig::default()
            });
            for key in keys {
                app.handle_key(key);
                prop_assert!(app.engine.position() < app.engine.total_steps());
                prop_assert!(app.engine.speed() >= 0.25 && app.engine.speed() <= 4.0);
            }
        }
    }
}
