//! Command line argument parsing and validation.
//!
//! This module provides minimal CLI argument parsing. The tool is designed
//! to "just work" from a web-editor checkout: point it at a Lean package,
//! it builds and bundles.

use std::path::PathBuf;

use clap::Parser;
use path_absolutize::Absolutize;

use crate::error::ConfigError;

/// Default location of the package to build and bundle.
pub const DEFAULT_PACKAGE_DIR: &str = "combined_lib";

/// Default location of the output archive.
pub const DEFAULT_OUTPUT: &str = "dist/library.zip";

/// Bundle a compiled Lean library for the web editor
#[derive(Parser, Debug)]
#[command(
    name = "library_bundler",
    version,
    about = "Create a library.zip bundle for the web editor",
    long_about = "Build a Lean package and bundle the unique set of compiled .olean \
artifacts found on the toolchain search path into a single library.zip.

Usage:
  library_bundler
  library_bundler -i path/to/combined_lib -o dist/library.zip
  library_bundler --skip-build"
)]
pub struct Args {
    /// Lean package to build and bundle
    #[arg(short = 'i', long = "package-dir", value_name = "DIR", default_value = DEFAULT_PACKAGE_DIR)]
    pub package_dir: PathBuf,

    /// Output archive path
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Skip the package build step and bundle already-built artifacts
    #[arg(long = "skip-build")]
    pub skip_build: bool,

    /// Show per-path detail while bundling
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    ///
    /// The package directory must exist (the search-path query runs there),
    /// and the output path's parent directory must exist so the run never
    /// leaves a half-created directory tree behind.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.package_dir.is_dir() {
            return Err(ConfigError::PackageDirMissing {
                path: self.package_dir.clone(),
            });
        }

        if let Ok(output) = self.output.absolutize()
            && let Some(parent) = output.parent()
            && !parent.is_dir()
        {
            return Err(ConfigError::OutputDirMissing {
                path: parent.to_path_buf(),
            });
        }

        Ok(())
    }
}
