//! Command line interface for library_bundler.
//!
//! This module provides argument parsing, colored terminal output, and the
//! bundling command itself.

mod args;
mod commands;
mod output;

pub use args::{Args, DEFAULT_OUTPUT, DEFAULT_PACKAGE_DIR};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args)
}
