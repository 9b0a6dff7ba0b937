//! algoviz CLI - Step-Recorded Algorithm Visualization
//!
//! Thin binary shim: all command logic lives in `algoviz::cli` where it
//! is testable.

use std::process::ExitCode;

use algoviz::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
