//! External toolchain collaborator.
//!
//! The bundler shells out to the Lean toolchain for three things: building
//! the package, reporting the toolchain version, and reporting the module
//! search path. All three sit behind the [`Toolchain`] trait so the
//! collection pipeline can be driven and tested without Lean installed.

mod lean;

pub use lean::LeanToolchain;

use std::path::{Path, PathBuf};

use crate::error::ToolchainError;

/// Operations the bundler needs from the external toolchain.
pub trait Toolchain {
    /// Build the package rooted at `package_dir`.
    ///
    /// Build output is passed through to the operator. A non-zero exit
    /// status is an error.
    fn build(&self, package_dir: &Path) -> Result<(), ToolchainError>;

    /// Report the toolchain version as a single human-readable line.
    fn version(&self) -> Result<String, ToolchainError>;

    /// Report the module search path, resolved to absolute directories.
    ///
    /// The query runs from `package_dir`, since the toolchain derives the
    /// path from the package configuration found there. Entries are
    /// returned in the toolchain's order; the bundler searches them in that
    /// order.
    fn search_path(&self, package_dir: &Path) -> Result<Vec<PathBuf>, ToolchainError>;
}
