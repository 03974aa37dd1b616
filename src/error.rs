//! Error types for library bundling operations.
//!
//! This module defines all error types with actionable error messages and
//! recovery suggestions. Errors are grouped per concern (configuration,
//! toolchain, packing) and aggregated into [`BundlerError`] at the top level.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for library_bundler operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all library_bundler operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Toolchain invocation errors
    #[error("Toolchain error: {0}")]
    Toolchain(#[from] ToolchainError),

    /// Artifact packing errors
    #[error("Packing error: {0}")]
    Pack(#[from] PackError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Configuration errors detected before any work starts
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Package directory missing
    #[error("Package directory not found: {path}")]
    PackageDirMissing {
        /// Path that was expected to be a directory
        path: PathBuf,
    },

    /// Output directory missing
    #[error("Output directory does not exist: {path}")]
    OutputDirMissing {
        /// Parent directory of the requested archive path
        path: PathBuf,
    },
}

/// Errors from invoking the external Lean toolchain
#[derive(Error, Debug)]
pub enum ToolchainError {
    /// A required toolchain binary is not on PATH
    #[error("'{tool}' not found in PATH: {source}")]
    NotFound {
        /// Binary name that could not be located
        tool: &'static str,
        /// Lookup error
        #[source]
        source: which::Error,
    },

    /// A toolchain process could not be spawned
    #[error("Failed to run '{tool}': {source}")]
    Spawn {
        /// Command that failed to start
        tool: String,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },

    /// The package build exited with a non-zero status
    #[error("Package build failed ({status})")]
    BuildFailed {
        /// Exit status of the build process
        status: ExitStatus,
    },

    /// A toolchain query exited with a non-zero status
    #[error("Toolchain query '{command}' failed ({status}): {stderr}")]
    QueryFailed {
        /// Command line that was run
        command: String,
        /// Exit status of the query process
        status: ExitStatus,
        /// Captured stderr output
        stderr: String,
    },

    /// The search-path report could not be parsed
    #[error("Invalid search-path report from toolchain: {source}")]
    InvalidPathReport {
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// A reported search-path entry could not be resolved
    #[error("Failed to resolve search-path entry {path}: {source}")]
    ResolvePath {
        /// Entry as reported by the toolchain
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Errors while collecting artifacts into the archive
#[derive(Error, Debug)]
pub enum PackError {
    /// The archive file could not be created
    #[error("Failed to create archive at {path}: {source}")]
    CreateArchive {
        /// Requested archive path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A discovered artifact could not be read
    #[error("Failed to read artifact {path}: {source}")]
    ReadArtifact {
        /// Artifact path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// An archive entry could not be started
    #[error("Failed to write archive entry '{name}': {source}")]
    WriteEntry {
        /// Entry name inside the archive
        name: String,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// An artifact's bytes could not be streamed into its entry
    #[error("Failed to stream {path} into the archive: {source}")]
    StreamEntry {
        /// Artifact being streamed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be finalized
    #[error("Failed to finalize archive at {path}: {source}")]
    FinishArchive {
        /// Archive path
        path: PathBuf,
        /// Underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// A search directory could not be traversed
    #[error("Error walking search directory {path}: {source}")]
    Walk {
        /// Search root being traversed
        path: PathBuf,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },

    /// A relative artifact path is not valid UTF-8
    #[error("Artifact path is not valid UTF-8: {path}")]
    NonUnicodePath {
        /// Offending path
        path: PathBuf,
    },
}

impl BundlerError {
    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Toolchain(ToolchainError::NotFound { tool, .. }) => vec![
                format!("Install the Lean toolchain so that '{tool}' is on PATH"),
                "If using elan, run: elan toolchain install stable".to_string(),
            ],
            BundlerError::Toolchain(ToolchainError::BuildFailed { .. }) => vec![
                "Run 'leanpkg build' inside the package directory to see the full build output"
                    .to_string(),
                "Pass --skip-build to bundle the artifacts of the last successful build"
                    .to_string(),
            ],
            BundlerError::Config(ConfigError::OutputDirMissing { path }) => vec![
                format!("Create the output directory first: mkdir -p {}", path.display()),
            ],
            BundlerError::Config(ConfigError::PackageDirMissing { path }) => vec![
                format!(
                    "Check the -i/--package-dir argument; '{}' is not a directory",
                    path.display()
                ),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
