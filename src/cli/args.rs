//! CLI argument parsing.
//!
//! Hand-rolled parser over an iterator of strings so the whole thing is
//! testable without touching `std::env`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run an algorithm headless and print its recorded steps.
    Run {
        /// Algorithm name (see `algoviz list`).
        algorithm: String,
        /// Optional producer configuration YAML.
        config_path: Option<PathBuf>,
        /// Optional seed override for producers with random inputs.
        seed_override: Option<u64>,
        /// Print every step description, not just the summary.
        verbose: bool,
        /// Print the run summary as JSON.
        json: bool,
    },
    /// List available algorithms.
    List,
    /// Show help.
    Help,
    /// Show version.
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "list" => Command::List,
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires an algorithm name");
            return Command::Help;
        }

        let algorithm = args[2].clone();
        let mut config_path = None;
        let mut seed_override = None;
        let mut verbose = false;
        let mut json = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    if i + 1 < args.len() {
                        config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--seed" => {
                    if i + 1 < args.len() {
                        if let Ok(seed) = args[i + 1].parse() {
                            seed_override = Some(seed);
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--verbose" | "-v" => {
                    verbose = true;
                    i += 1;
                }
                "--json" => {
                    json = true;
                    i += 1;
                }
                other => {
                    eprintln!("Ignoring unknown flag: {other}");
                    i += 1;
                }
            }
        }

        Command::Run {
            algorithm,
            config_path,
            seed_override,
            verbose,
            json,
        }
    }
}
