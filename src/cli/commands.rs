//! CLI command handlers.
//!
//! Execution logic for each CLI command, extracted from main.rs so
//! command behavior is testable without spawning a process.

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::error::{VizError, VizResult};
use crate::producers::{
    BstProducer, HanoiProducer, KmpProducer, LcsProducer, NQueensProducer, PathfindingProducer,
    SortProducer, StepProducer, SudokuProducer,
};

use super::output::{print_algorithm_list, print_help, print_run_summary, print_version};
use super::{Args, Command};

/// Names accepted by `algoviz run`, in display order.
pub const ALGORITHMS: [&str; 8] = [
    "hanoi", "sort", "kmp", "nqueens", "sudoku", "bst", "path", "lcs",
];

/// Serializable summary of one headless run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Producer name.
    pub algorithm: String,
    /// Total snapshots recorded.
    pub total_steps: usize,
    /// Description of the first snapshot.
    pub first_step: String,
    /// Description of the last snapshot.
    pub last_step: String,
    /// Base step duration in milliseconds at 1.0x speed.
    pub base_step_ms: u64,
}

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed
/// arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            algorithm,
            config_path,
            seed_override,
            verbose,
            json,
        } => match execute_run(&algorithm, config_path.as_deref(), seed_override, verbose, json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::List => {
            print_algorithm_list(&ALGORITHMS);
            ExitCode::SUCCESS
        }
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Run one algorithm headless and print its steps and summary.
fn execute_run(
    algorithm: &str,
    config_path: Option<&Path>,
    seed_override: Option<u64>,
    verbose: bool,
    json: bool,
) -> VizResult<()> {
    let summary = run_algorithm(algorithm, config_path, seed_override, verbose)?;

    if json {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| VizError::serialization(e.to_string()))?;
        println!("{rendered}");
    } else {
        print_run_summary(&summary);
    }
    Ok(())
}

/// Construct the named producer, run it, and summarize the sequence.
///
/// # Errors
///
/// Returns error for unknown algorithm names or unreadable/invalid
/// configuration YAML. Out-of-range config values never error; the
/// producers clamp them.
pub fn run_algorithm(
    algorithm: &str,
    config_path: Option<&Path>,
    seed_override: Option<u64>,
    verbose: bool,
) -> VizResult<RunSummary> {
    let yaml = match config_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::from("{}"),
    };

    match algorithm {
        "hanoi" => run_one(&mut HanoiProducer::from_yaml(&yaml)?, verbose),
        "kmp" => run_one(&mut KmpProducer::from_yaml(&yaml)?, verbose),
        "nqueens" => run_one(&mut NQueensProducer::from_yaml(&yaml)?, verbose),
        "sudoku" => run_one(&mut SudokuProducer::from_yaml(&yaml)?, verbose),
        "lcs" => run_one(&mut LcsProducer::from_yaml(&yaml)?, verbose),
        "sort" => {
            let mut producer = SortProducer::from_yaml(&yaml)?;
            if let Some(seed) = seed_override {
                let mut config = producer.config().clone();
                config.seed = seed;
                producer = SortProducer::from_config(config);
            }
            run_one(&mut producer, verbose)
        }
        "bst" => {
            let mut producer = BstProducer::from_yaml(&yaml)?;
            if let Some(seed) = seed_override {
                let mut config = producer.config().clone();
                config.seed = seed;
                producer = BstProducer::from_config(config);
            }
            run_one(&mut producer, verbose)
        }
        "path" => {
            let mut producer = PathfindingProducer::from_yaml(&yaml)?;
            if let Some(seed) = seed_override {
                let mut config = producer.config().clone();
                config.seed = seed;
                producer = PathfindingProducer::from_config(config);
            }
            run_one(&mut producer, verbose)
        }
        unknown => Err(VizError::UnknownAlgorithm(unknown.to_string())),
    }
}

fn run_one<P: StepProducer>(producer: &mut P, verbose: bool) -> VizResult<RunSummary> {
    let sequence = producer.run();
    let total = sequence.len();

    if verbose {
        for (i, snapshot) in sequence.iter().enumerate() {
            println!("[{:>4}/{total}] {}", i + 1, snapshot.description);
        }
    }

    Ok(RunSummary {
        algorithm: producer.name().to_string(),
        total_steps: total,
        first_step: sequence
            .first()
            .map(|s| s.description.clone())
            .unwrap_or_default(),
        last_step: sequence
            .last()
            .map(|s| s.description.clone())
            .unwrap_or_default(),
        base_step_ms: producer.base_step_duration().as_millis() as u64,
    })
}
