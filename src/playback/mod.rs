//! Playback engine: time-driven and manual replay of snapshot sequences.
//!
//! The engine owns one [`SnapshotSequence`] and a current position, and
//! advances or rewinds that position under frame-timer control or explicit
//! request. It is algorithm-agnostic: the payload type `P` is opaque.
//!
//! # Advancing loop
//!
//! There is no internal timer. The host calls [`PlaybackEngine::tick`]
//! once per rendering frame with the current instant; the engine advances
//! when enough time has elapsed since the last advance. Polling per frame
//! instead of scheduling one timer per step means speed changes take
//! effect immediately, with nothing to cancel or reschedule.
//!
//! # Failure semantics
//!
//! None. Every input is clamped to the valid range and every operation on
//! an engine without a loaded sequence is a safe no-op.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::snapshot::{Snapshot, SnapshotSequence};

/// Minimum speed multiplier.
pub const MIN_SPEED: f64 = 0.25;
/// Maximum speed multiplier.
pub const MAX_SPEED: f64 = 4.0;
/// Default base delay between automatic advances at 1.0x speed.
pub const DEFAULT_BASE_STEP: Duration = Duration::from_millis(300);

/// Playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No sequence loaded, or loaded but never started.
    Idle,
    /// Advancing loop active.
    Playing,
    /// Playback suspended; position retained.
    Paused,
}

/// Derived status broadcast on every play/pause or speed change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Whether the advancing loop is active.
    pub is_playing: bool,
    /// Current snapshot index.
    pub current_index: usize,
    /// Total number of snapshots in the loaded sequence.
    pub total_steps: usize,
    /// Current speed multiplier in `[0.25, 4.0]`.
    pub speed_multiplier: f64,
    /// Progress through the sequence in percent.
    pub progress_percent: f64,
}

/// Listener invoked on every position change.
type StepListener<P> = Box<dyn FnMut(&Snapshot<P>, usize, usize)>;
/// Listener invoked on every play/pause or speed change.
type StatusListener = Box<dyn FnMut(&PlaybackStatus)>;

/// Generic playback engine over an opaque snapshot payload.
///
/// One engine instance per visualizer page; single-threaded by design.
pub struct PlaybackEngine<P> {
    /// Loaded sequence (read-only until the next `load`).
    sequence: SnapshotSequence<P>,
    /// Current position, always in `[0, len-1]` while a sequence is loaded.
    position: usize,
    /// State machine.
    state: PlaybackState,
    /// Speed multiplier in `[MIN_SPEED, MAX_SPEED]`.
    speed: f64,
    /// Nominal delay between automatic advances at 1.0x speed.
    base_step: Duration,
    /// Timestamp of the last automatic advance.
    last_advance: Option<Instant>,
    /// Position-change subscribers.
    step_listeners: Vec<StepListener<P>>,
    /// Status-change subscribers.
    status_listeners: Vec<StatusListener>,
}

impl<P> std::fmt::Debug for PlaybackEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("position", &self.position)
            .field("total_steps", &self.sequence.len())
            .field("state", &self.state)
            .field("speed", &self.speed)
            .field("base_step", &self.base_step)
            .field("step_listeners", &self.step_listeners.len())
            .field("status_listeners", &self.status_listeners.len())
            .finish()
    }
}

impl<P> Default for PlaybackEngine<P> {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_STEP)
    }
}

impl<P> PlaybackEngine<P> {
    /// Create an engine with the given base step duration.
    ///
    /// The base duration is per-visualizer: dense visualizations (sort
    /// bars) use short steps, sparse ones (Tower of Hanoi) long steps.
    #[must_use]
    pub fn new(base_step: Duration) -> Self {
        Self {
            sequence: SnapshotSequence::default(),
            position: 0,
            state: PlaybackState::Idle,
            speed: 1.0,
            base_step,
            last_advance: None,
            step_listeners: Vec::new(),
            status_listeners: Vec::new(),
        }
    }

    // === Subscriptions ===

    /// Register a listener for position changes.
    ///
    /// Called with the newly current snapshot, its index, and the total
    /// count. Position and status are independent channels; subscribe to
    /// both to stay fully in sync.
    pub fn on_step_changed(&mut self, listener: impl FnMut(&Snapshot<P>, usize, usize) + 'static) {
        self.step_listeners.push(Box::new(listener));
    }

    /// Register a listener for play/pause and speed changes.
    pub fn on_status_changed(&mut self, listener: impl FnMut(&PlaybackStatus) + 'static) {
        self.status_listeners.push(Box::new(listener));
    }

    // === Accessors ===

    /// Current playback state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the advancing loop is active.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Total number of snapshots loaded.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.sequence.len()
    }

    /// Current speed multiplier.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Base step duration at 1.0x speed.
    #[must_use]
    pub const fn base_step(&self) -> Duration {
        self.base_step
    }

    /// The currently displayed snapshot, if any sequence is loaded.
    #[must_use]
    pub fn current_snapshot(&self) -> Option<&Snapshot<P>> {
        self.sequence.get(self.position)
    }

    /// Whether the position sits on the final snapshot.
    #[must_use]
    pub fn at_end(&self) -> bool {
        !self.sequence.is_empty() && self.position + 1 == self.sequence.len()
    }

    /// Derived status.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            is_playing: self.is_playing(),
            current_index: self.position,
            total_steps: self.sequence.len(),
            speed_multiplier: self.speed,
            progress_percent: self.progress_percent(),
        }
    }

    /// Progress through the sequence in percent.
    ///
    /// A sequence of one snapshot (or none) is considered complete.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.sequence.len() <= 1 {
            return 100.0;
        }
        self.position as f64 / (self.sequence.len() - 1) as f64 * 100.0
    }

    // === Operations ===

    /// Load a new sequence, cancelling any in-flight playback.
    ///
    /// Resets position to 0 and transitions to `Idle`.
    pub fn load(&mut self, sequence: SnapshotSequence<P>) {
        self.sequence = sequence;
        self.position = 0;
        self.state = PlaybackState::Idle;
        self.last_advance = None;
        self.notify_step();
        self.notify_status();
    }

    /// Start the advancing loop.
    ///
    /// If the position is already at the final index, first resets to 0
    /// so play-after-completion restarts instead of no-oping. Safe no-op
    /// when no sequence (or an empty one) is loaded.
    pub fn play(&mut self) {
        if self.sequence.is_empty() {
            return;
        }
        if self.at_end() {
            self.set_position(0);
        }
        if self.state != PlaybackState::Playing {
            self.state = PlaybackState::Playing;
            self.last_advance = None;
            self.notify_status();
        }
    }

    /// Stop the advancing loop; position unchanged.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.last_advance = None;
            self.notify_status();
        }
    }

    /// Play if not playing, else pause.
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move one step forward; no-op at the final index.
    ///
    /// Manual stepping implicitly pauses an active advancing loop so a
    /// manual step can never race the next automatic advance.
    pub fn step_forward(&mut self) {
        self.pause();
        if self.position + 1 < self.sequence.len() {
            self.set_position(self.position + 1);
        }
    }

    /// Move one step backward; no-op at index 0.
    ///
    /// Implicitly pauses, like [`Self::step_forward`].
    pub fn step_backward(&mut self) {
        self.pause();
        if self.position > 0 {
            self.set_position(self.position - 1);
        }
    }

    /// Jump directly to `index`, clamped to the valid range.
    ///
    /// Used for scrub/seek interactions. Does not change play state.
    pub fn go_to_step(&mut self, index: usize) {
        if self.sequence.is_empty() {
            return;
        }
        let clamped = index.min(self.sequence.len() - 1);
        self.set_position(clamped);
    }

    /// Set the speed multiplier, clamped to `[0.25, 4.0]`.
    ///
    /// Affects the delay of the advancing loop; position is unchanged.
    /// NaN falls back to the minimum speed.
    pub fn set_speed(&mut self, multiplier: f64) {
        let clamped = if multiplier.is_nan() {
            MIN_SPEED
        } else {
            multiplier.clamp(MIN_SPEED, MAX_SPEED)
        };
        if (clamped - self.speed).abs() > f64::EPSILON {
            self.speed = clamped;
            self.notify_status();
        }
    }

    /// Reset position to 0 without altering play/pause state.
    pub fn reset(&mut self) {
        if self.sequence.is_empty() {
            return;
        }
        self.set_position(0);
    }

    /// Drive the advancing loop; call once per rendering frame.
    ///
    /// Returns `true` when the position advanced this frame. Reaching
    /// the final index stops the loop and fires a completion status
    /// change (`is_playing == false`).
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        let Some(last) = self.last_advance else {
            // First frame after play(): start measuring from here.
            self.last_advance = Some(now);
            return false;
        };

        let delay = self.base_step.div_f64(self.speed);
        if now.duration_since(last) < delay {
            return false;
        }

        self.last_advance = Some(now);
        let advanced = self.position + 1 < self.sequence.len();
        if advanced {
            self.set_position(self.position + 1);
        }

        if self.at_end() {
            self.state = PlaybackState::Idle;
            self.last_advance = None;
            self.notify_status();
        }
        advanced
    }

    // === Internals ===

    /// Set position and fire a step-changed notification if it moved.
    fn set_position(&mut self, index: usize) {
        if index == self.position {
            return;
        }
        self.position = index;
        self.notify_step();
    }

    fn notify_step(&mut self) {
        let total = self.sequence.len();
        if let Some(snapshot) = self.sequence.get(self.position) {
            for listener in &mut self.step_listeners {
                listener(snapshot, self.position, total);
            }
        }
    }

    fn notify_status(&mut self) {
        let status = self.status();
        for listener in &mut self.status_listeners {
            listener(&status);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::snapshot::StepRecorder;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sequence(n: usize) -> SnapshotSequence<u32> {
        let mut rec = StepRecorder::new();
        for i in 0..n {
            rec.record(format!("step {i}"), i as u32);
        }
        rec.into_sequence()
    }

    fn loaded(n: usize) -> PlaybackEngine<u32> {
        let mut engine = PlaybackEngine::new(Duration::from_millis(100));
        engine.load(sequence(n));
        engine
    }

    #[test]
    fn test_initial_state() {
        let engine: PlaybackEngine<u32> = PlaybackEngine::default();
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.total_steps(), 0);
        assert!(engine.current_snapshot().is_none());
        assert!((engine.speed() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_engine_operations_are_noops() {
        let mut engine: PlaybackEngine<u32> = PlaybackEngine::default();

        engine.play();
        assert!(!engine.is_playing());

        engine.step_forward();
        engine.step_backward();
        engine.go_to_step(5);
        engine.reset();
        assert_eq!(engine.position(), 0);

        assert!(!engine.tick(Instant::now()));
    }

    #[test]
    fn test_load_resets_position_and_state() {
        let mut engine = loaded(10);
        engine.go_to_step(7);
        engine.play();
        assert!(engine.is_playing());

        engine.load(sequence(3));
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(engine.total_steps(), 3);
    }

    #[test]
    fn test_step_forward_clamps_at_end() {
        let mut engine = loaded(3);
        engine.step_forward();
        engine.step_forward();
        assert_eq!(engine.position(), 2);
        engine.step_forward();
        assert_eq!(engine.position(), 2); // no wraparound
    }

    #[test]
    fn test_step_backward_clamps_at_start() {
        let mut engine = loaded(3);
        engine.step_backward();
        assert_eq!(engine.position(), 0);
    }

    #[test]
    fn test_go_to_step_clamps() {
        let mut engine = loaded(5);
        engine.go_to_step(100);
        assert_eq!(engine.position(), 4);
        engine.go_to_step(0);
        assert_eq!(engine.position(), 0);
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut engine = loaded(5);

        engine.set_speed(0.1);
        assert!((engine.speed() - MIN_SPEED).abs() < f64::EPSILON);

        engine.set_speed(10.0);
        assert!((engine.speed() - MAX_SPEED).abs() < f64::EPSILON);

        engine.set_speed(2.0);
        assert!((engine.speed() - 2.0).abs() < f64::EPSILON);

        engine.set_speed(f64::NAN);
        assert!((engine.speed() - MIN_SPEED).abs() < f64::EPSILON);
    }

    #[test]
    fn test_play_at_end_restarts() {
        let mut engine = loaded(4);
        engine.go_to_step(3);
        assert!(engine.at_end());

        engine.play();
        // Position reset before any frame elapses.
        assert_eq!(engine.position(), 0);
        assert!(engine.is_playing());
    }

    #[test]
    fn test_toggle() {
        let mut engine = loaded(4);
        engine.toggle();
        assert!(engine.is_playing());
        engine.toggle();
        assert!(!engine.is_playing());
        assert_eq!(engine.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_pause_keeps_position() {
        let mut engine = loaded(5);
        engine.go_to_step(2);
        engine.play();
        engine.pause();
        assert_eq!(engine.position(), 2);
    }

    #[test]
    fn test_manual_step_while_playing_pauses() {
        let mut engine = loaded(5);
        engine.play();
        assert!(engine.is_playing());

        engine.step_forward();
        assert!(!engine.is_playing());
        assert_eq!(engine.position(), 1);
    }

    #[test]
    fn test_reset_keeps_play_state() {
        let mut engine = loaded(5);
        engine.go_to_step(3);
        engine.play();
        engine.reset();
        assert_eq!(engine.position(), 0);
        assert!(engine.is_playing());
    }

    #[test]
    fn test_tick_advances_after_delay() {
        let mut engine = loaded(3);
        engine.play();

        let t0 = Instant::now();
        // First tick only arms the timer.
        assert!(!engine.tick(t0));
        assert_eq!(engine.position(), 0);

        // Not enough time elapsed.
        assert!(!engine.tick(t0 + Duration::from_millis(50)));
        assert_eq!(engine.position(), 0);

        // Base step is 100ms at 1.0x.
        assert!(engine.tick(t0 + Duration::from_millis(100)));
        assert_eq!(engine.position(), 1);
    }

    #[test]
    fn test_tick_speed_scales_delay() {
        let mut engine = loaded(3);
        engine.set_speed(4.0);
        engine.play();

        let t0 = Instant::now();
        engine.tick(t0);
        // 100ms base at 4x -> 25ms delay.
        assert!(engine.tick(t0 + Duration::from_millis(25)));
        assert_eq!(engine.position(), 1);
    }

    #[test]
    fn test_tick_completion_stops_playback() {
        let mut engine = loaded(3);
        engine.play();

        let t0 = Instant::now();
        engine.tick(t0);
        engine.tick(t0 + Duration::from_millis(100));
        engine.tick(t0 + Duration::from_millis(200));
        assert_eq!(engine.position(), 2);
        assert!(!engine.is_playing());
        assert_eq!(engine.state(), PlaybackState::Idle);

        // Further ticks do nothing.
        assert!(!engine.tick(t0 + Duration::from_millis(300)));
        assert_eq!(engine.position(), 2);
    }

    #[test]
    fn test_tick_at_final_index_completes_without_advancing() {
        let mut engine = loaded(3);
        engine.play();

        let t0 = Instant::now();
        engine.tick(t0);
        // Seek to the end while still playing.
        engine.go_to_step(2);

        // The completion frame stops playback but moves nothing.
        assert!(!engine.tick(t0 + Duration::from_millis(100)));
        assert_eq!(engine.position(), 2);
        assert!(!engine.is_playing());
    }

    #[test]
    fn test_step_listener_fires_on_position_change() {
        let mut engine = loaded(5);
        let seen: Rc<RefCell<Vec<(usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.on_step_changed(move |_, index, total| {
            sink.borrow_mut().push((index, total));
        });

        engine.step_forward();
        engine.step_forward();
        engine.step_backward();
        engine.go_to_step(4);
        engine.go_to_step(4); // clamped to same position, no event

        assert_eq!(&*seen.borrow(), &[(1, 5), (2, 5), (1, 5), (4, 5)]);
    }

    #[test]
    fn test_status_listener_fires_on_play_pause_speed() {
        let mut engine = loaded(5);
        let statuses: Rc<RefCell<Vec<PlaybackStatus>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&statuses);
        engine.on_status_changed(move |status| {
            sink.borrow_mut().push(*status);
        });

        engine.play();
        engine.set_speed(2.0);
        engine.pause();
        // Position changes alone do not fire status events.
        engine.go_to_step(3);

        let seen = statuses.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].is_playing);
        assert!((seen[1].speed_multiplier - 2.0).abs() < f64::EPSILON);
        assert!(!seen[2].is_playing);
    }

    #[test]
    fn test_completion_fires_status_not_playing() {
        let mut engine = loaded(2);
        let completed = Rc::new(RefCell::new(false));
        let sink = Rc::clone(&completed);
        engine.on_status_changed(move |status| {
            if !status.is_playing && status.current_index + 1 == status.total_steps {
                *sink.borrow_mut() = true;
            }
        });

        engine.play();
        let t0 = Instant::now();
        engine.tick(t0);
        engine.tick(t0 + Duration::from_millis(100));
        assert!(*completed.borrow());
    }

    #[test]
    fn test_progress_percent() {
        let mut engine = loaded(5);
        assert!((engine.progress_percent() - 0.0).abs() < f64::EPSILON);
        engine.go_to_step(2);
        assert!((engine.progress_percent() - 50.0).abs() < f64::EPSILON);
        engine.go_to_step(4);
        assert!((engine.progress_percent() - 100.0).abs() < f64::EPSILON);

        let single = loaded(1);
        assert!((single.progress_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_snapshot() {
        let mut engine = loaded(4);
        engine.go_to_step(1);
        engine.set_speed(0.5);

        let status = engine.status();
        assert!(!status.is_playing);
        assert_eq!(status.current_index, 1);
        assert_eq!(status.total_steps, 4);
        assert!((status.speed_multiplier - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_fires_both_channels() {
        let mut engine: PlaybackEngine<u32> = PlaybackEngine::default();
        let steps = Rc::new(RefCell::new(0usize));
        let statuses = Rc::new(RefCell::new(0usize));
        let s1 = Rc::clone(&steps);
        let s2 = Rc::clone(&statuses);
        engine.on_step_changed(move |_, _, _| *s1.borrow_mut() += 1);
        engine.on_status_changed(move |_| *s2.borrow_mut() += 1);

        engine.load(sequence(3));
        assert_eq!(*steps.borrow(), 1);
        assert_eq!(*statuses.borrow(), 1);
    }

    #[test]
    fn test_engine_debug() {
        let engine = loaded(3);
        let debug = format!("{engine:?}");
        assert!(debug.contains("PlaybackEngine"));
        assert!(debug.contains("total_steps"));
    }
}
