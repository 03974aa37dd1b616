//! Library bundler - package a compiled Lean library for the web editor.
//!
//! This binary builds a Lean package with the external toolchain and
//! bundles the unique set of compiled artifacts on the toolchain search
//! path into a single compressed archive.

use library_bundler::cli;
use library_bundler::cli::OutputManager;
use std::process;

fn main() {
    // Duplicate notices are emitted at warn level; keep them visible by
    // default while letting RUST_LOG override the filter.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli::run() {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            // Show recovery suggestions for critical errors
            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\nRecovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
