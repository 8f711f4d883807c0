//! CLI module for cppdom
//!
//! This module provides the command-line interface to the frontend.
//!
//! ## Modes
//!
//! - `<file>` - Build the tree and report a one-line summary
//! - `--lex <file>` - Print the token stream
//! - `--events <file>` - Print the parser's event stream without building a tree
//! - `--dump <file>` - Print the built tree as an indented outline
//! - `--bind <file>` - Build the tree, run the declaration binder and print every name with its binding
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use thiserror::Error;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Build C/C++ declaration trees from parser events
#[derive(Parser, Debug)]
#[command(name = "cppdom")]
#[command(version = VERSION)]
#[command(about = "Build C/C++ declaration trees from parser events", long_about = None)]
pub struct Cli {
    /// File to build (default action when no flag is given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["file", "events_file", "dump_file", "bind_file"])]
    pub lex_file: Option<PathBuf>,

    /// Print parser events without building a tree
    #[arg(long = "events", value_name = "FILE", conflicts_with_all = ["file", "dump_file", "bind_file"])]
    pub events_file: Option<PathBuf>,

    /// Print the built tree as an outline
    #[arg(long = "dump", value_name = "FILE", conflicts_with_all = ["file", "bind_file"])]
    pub dump_file: Option<PathBuf>,

    /// Run the declaration binder and print every name with its binding
    #[arg(long = "bind", value_name = "FILE", conflicts_with = "file")]
    pub bind_file: Option<PathBuf>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.events_file {
        return commands::events_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.dump_file {
        return commands::dump_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.bind_file {
        return commands::bind_file(&file.to_string_lossy());
    }

    match cli.file {
        Some(file) => commands::check_file(&file.to_string_lossy()),
        // No flag and no file - let clap print usage
        None => Err(CliError::failure("Usage: cppdom [OPTIONS] [FILE]\n\nFor more information, try '--help'.")),
    }
}

// ============================================================================
// Tests
// ============================================================================
