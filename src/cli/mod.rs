//! CLI module for algoviz.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested:
//! `main.rs` only parses `std::env::args()` and calls [`run_cli`].

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{run_cli, RunSummary};
pub use output::{print_algorithm_list, print_help, print_version};
