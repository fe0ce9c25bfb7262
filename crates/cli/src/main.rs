use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use glibc_check::commands::{assert_all_command, list_versions_command, max_command, min_command};
use glibc_check::{init_logging, violation_exit_code};

/// Tools for checking the glibc versions an executable requires.
///
/// This CLI is a thin wrapper around `glibc-check-core` (exposed in code as
/// `glibc_check_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "glibc-check",
    version,
    about = "Tools for checking glibc versions on an executable",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the glibc versions required by an executable, oldest first.
    ListVersions {
        /// Executable to inspect.
        file: PathBuf,

        /// Emit JSON instead of one version per line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the oldest glibc version required by an executable.
    Min {
        /// Executable to inspect.
        file: PathBuf,
    },

    /// Print the newest glibc version required by an executable.
    Max {
        /// Executable to inspect.
        file: PathBuf,
    },

    /// Assert that a condition holds for every glibc version in an executable.
    ///
    /// The variables `major`, `minor` and `patch` are bound for each version;
    /// `patch` is 0 for versions without a patch component, such as `2.32`.
    /// Supported operators: == != < <= > >= && || ! + - * / and parentheses.
    ///
    /// Example: glibc-check assert-all 'major == 2 && minor <= 17' ./server
    ///
    /// Exits with the number of versions that violate the condition.
    AssertAll {
        /// Boolean expression over `major`, `minor` and `patch`.
        #[arg(allow_hyphen_values = true)]
        condition: String,

        /// Executable to inspect.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::ListVersions { file, json } => list_versions_command(&file, json)?,
        Command::Min { file } => min_command(&file)?,
        Command::Max { file } => max_command(&file)?,
        Command::AssertAll { condition, file } => {
            let violations = assert_all_command(&condition, &file)?;
            if violations > 0 {
                std::process::exit(violation_exit_code(violations));
            }
        }
    }

    Ok(())
}
