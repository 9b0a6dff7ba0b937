//! End-to-end playback engine behavior over recorded sequences.
//!
//! These tests exercise the engine the way a UI host would: load a
//! producer's output, subscribe to both channels, and drive the frame
//! loop with synthetic timestamps.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use algoviz::playback::{PlaybackEngine, PlaybackState, PlaybackStatus};
use algoviz::producers::hanoi::HanoiConfig;
use algoviz::producers::{HanoiProducer, StepProducer};
use algoviz::snapshot::{SnapshotSequence, StepRecorder};

fn numbered_sequence(n: usize) -> SnapshotSequence<usize> {
    let mut recorder = StepRecorder::new();
    for i in 0..n {
        recorder.record(format!("step {i}"), i);
    }
    recorder.into_sequence()
}

fn loaded_engine(n: usize) -> PlaybackEngine<usize> {
    let mut engine = PlaybackEngine::new(Duration::from_millis(100));
    engine.load(numbered_sequence(n));
    engine
}

#[test]
fn hanoi_run_plays_to_completion_via_ticks() {
    let mut producer = HanoiProducer::from_config(HanoiConfig { disks: 3 });
    let sequence = producer.run();
    let total = sequence.len();

    let mut engine = PlaybackEngine::new(producer.base_step_duration());
    engine.load(sequence);
    engine.play();

    let t0 = Instant::now();
    let mut now = t0;
    // First tick arms the timer, then one advance per base step.
    engine.tick(now);
    for _ in 0..total {
        now += producer.base_step_duration();
        engine.tick(now);
    }

    assert!(engine.at_end());
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(engine.position(), total - 1);
}

#[test]
fn completion_fires_status_with_playback_stopped() {
    let statuses: Rc<RefCell<Vec<PlaybackStatus>>> = Rc::default();
    let sink = Rc::clone(&statuses);

    let mut engine = loaded_engine(3);
    engine.on_status_changed(move |status| sink.borrow_mut().push(status.clone()));
    engine.play();

    let t0 = Instant::now();
    engine.tick(t0);
    for i in 1..=3 {
        engine.tick(t0 + Duration::from_millis(100 * i));
    }

    let last = statuses.borrow().last().cloned().unwrap();
    assert!(!last.is_playing);
    assert_eq!(last.current_index, 2);
    assert!((last.progress_percent - 100.0).abs() < 1e-9);
}

#[test]
fn step_listener_sees_every_advance_in_order() {
    let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = Rc::clone(&seen);

    let mut engine = loaded_engine(5);
    engine.on_step_changed(move |snapshot, index, total| {
        assert_eq!(snapshot.payload, index);
        assert_eq!(total, 5);
        sink.borrow_mut().push(index);
    });

    for _ in 0..6 {
        engine.step_forward();
    }
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);
}

#[test]
fn speed_scales_the_advance_delay() {
    let mut engine = loaded_engine(10);
    engine.set_speed(2.0);
    engine.play();

    let t0 = Instant::now();
    engine.tick(t0);
    // Base step is 100ms; at 2x the delay is 50ms.
    assert!(!engine.tick(t0 + Duration::from_millis(49)));
    assert!(engine.tick(t0 + Duration::from_millis(50)));
    assert_eq!(engine.position(), 1);
}

#[test]
fn slow_speed_delays_the_advance() {
    let mut engine = loaded_engine(10);
    engine.set_speed(0.25);
    engine.play();

    let t0 = Instant::now();
    engine.tick(t0);
    assert!(!engine.tick(t0 + Duration::from_millis(399)));
    assert!(engine.tick(t0 + Duration::from_millis(400)));
}

#[test]
fn play_after_completion_restarts_from_zero() {
    let mut engine = loaded_engine(4);
    engine.go_to_step(3);
    assert!(engine.at_end());

    engine.play();
    assert_eq!(engine.position(), 0);
    assert!(engine.is_playing());
}

#[test]
fn load_cancels_in_flight_playback() {
    let mut engine = loaded_engine(8);
    engine.play();
    engine.go_to_step(5);

    engine.load(numbered_sequence(3));
    assert_eq!(engine.position(), 0);
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(engine.total_steps(), 3);
}

#[test]
fn manual_step_pauses_active_playback() {
    let mut engine = loaded_engine(8);
    engine.play();
    engine.step_forward();
    assert_eq!(engine.state(), PlaybackState::Paused);
    assert_eq!(engine.position(), 1);
}

#[test]
fn reset_keeps_play_state() {
    let mut engine = loaded_engine(8);
    engine.play();
    engine.go_to_step(4);
    engine.reset();
    assert_eq!(engine.position(), 0);
    assert!(engine.is_playing());
}

#[test]
fn empty_engine_accepts_every_operation() {
    let mut engine: PlaybackEngine<usize> = PlaybackEngine::new(Duration::from_millis(100));
    engine.play();
    engine.toggle();
    engine.step_forward();
    engine.step_backward();
    engine.go_to_step(17);
    engine.set_speed(2.0);
    engine.reset();
    assert!(!engine.tick(Instant::now()));

    assert_eq!(engine.position(), 0);
    assert_eq!(engine.total_steps(), 0);
    assert!(!engine.is_playing());
    assert!(engine.current_snapshot().is_none());
}

#[test]
fn single_snapshot_sequence_reports_complete() {
    let mut engine = loaded_engine(1);
    assert!((engine.progress_percent() - 100.0).abs() < 1e-9);
    assert!(engine.at_end());

    engine.play();
    let t0 = Instant::now();
    engine.tick(t0);
    engine.tick(t0 + Duration::from_millis(100));
    assert_eq!(engine.position(), 0);
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Play,
    Pause,
    Toggle,
    StepForward,
    StepBackward,
    GoTo(usize),
    SetSpeed(f64),
    Reset,
    Tick(u64),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Play),
        Just(Op::Pause),
        Just(Op::Toggle),
        Just(Op::StepForward),
        Just(Op::StepBackward),
        (0usize..100).prop_map(Op::GoTo),
        (-1.0f64..10.0).prop_map(Op::SetSpeed),
        Just(Op::Reset),
        (0u64..500).prop_map(Op::Tick),
    ]
}

proptest! {
    /// Falsification: any operation sequence that leaves the position
    /// outside the loaded range, or the speed outside [0.25, 4.0],
    /// breaks the engine contract.
    #[test]
    fn prop_engine_invariants_hold_under_any_ops(
        len in 1usize..30,
        ops in prop::collection::vec(arbitrary_op(), 0..60),
    ) {
        let mut engine = loaded_engine(len);
        let t0 = Instant::now();
        let mut elapsed = Duration::ZERO;

        for op in ops {
            match op {
                Op::Play => engine.play(),
                Op::Pause => engine.pause(),
                Op::Toggle => engine.toggle(),
                Op::StepForward => engine.step_forward(),
                Op::StepBackward => engine.step_backward(),
                Op::GoTo(i) => engine.go_to_step(i),
                Op::SetSpeed(s) => engine.set_speed(s),
                Op::Reset => engine.reset(),
                Op::Tick(ms) => {
                    elapsed += Duration::from_millis(ms);
                    engine.tick(t0 + elapsed);
                }
            }
            prop_assert!(engine.position() < len);
            prop_assert!(engine.speed() >= 0.25 && engine.speed() <= 4.0);
            let progress = engine.progress_percent();
            prop_assert!((0.0..=100.0).contains(&progress));
        }
    }
}
