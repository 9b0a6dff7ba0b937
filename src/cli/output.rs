//! CLI output formatting.
//!
//! This module contains all output formatting functions for the CLI.
//! Extracted to enable testing of output generation.

use super::commands::RunSummary;

/// Print version information.
pub fn print_version() {
    println!(
        "algoviz {} ({} {})",
        env!("ALGOVIZ_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP")
    );
}

/// Print help message.
pub fn print_help() {
    println!(
        r"algoviz - Step-Recorded Algorithm Visualization

USAGE:
    algoviz <COMMAND> [OPTIONS]

COMMANDS:
    run <algorithm>             Run an algorithm and print its step summary
        --config <file.yaml>    Load producer configuration from YAML
        --seed <N>              Override the randomization seed
        -v, --verbose           Print every recorded step description
        --json                  Emit the run summary as JSON

    list                        List available algorithms

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    algoviz run hanoi
    algoviz run sort --config configs/quicksort.yaml --verbose
    algoviz run path --seed 12345 --json
"
    );
}

/// Print the available algorithm names.
pub fn print_algorithm_list(names: &[&str]) {
    println!("Available algorithms:");
    for name in names {
        println!("  {name}");
    }
}

/// Print a headless run summary.
pub fn print_run_summary(summary: &RunSummary) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Algorithm: {}", summary.algorithm);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    println!("Steps recorded: {}", summary.total_steps);
    println!("Base step:      {} ms", summary.base_step_ms);
    println!("First:          {}", summary.first_step);
    println!("Last:           {}", summary.last_step);
    println!();
}
