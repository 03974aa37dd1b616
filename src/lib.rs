//! # library_bundler
//!
//! Build a Lean package and bundle its compiled artifacts for the web
//! editor.
//!
//! This crate drives the external Lean toolchain to build a library
//! package, queries the toolchain for its module search path, and collects
//! every unique compiled `.olean` artifact found on that path into a single
//! deflate-compressed `library.zip`, ready to be served to the browser.
//!
//! ## Features
//!
//! - **Deterministic collection**: name-sorted traversal in search-path
//!   order, so the same filesystem state always yields the same archive
//! - **First-wins deduplication**: artifacts are identified by their path
//!   relative to the search root; later occurrences are skipped and logged
//! - **Intermediates exclusion**: anything under a `_target` path segment
//!   is build scratch and never bundled
//! - **Injected toolchain**: the build and path-query steps sit behind a
//!   trait, so collection is testable without Lean installed
//!
//! ## Usage
//!
//! ```bash
//! library_bundler                       # build combined_lib, write dist/library.zip
//! library_bundler --skip-build          # bundle whatever is already built
//! library_bundler -i mylib -o out.zip   # custom package and archive paths
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod error;
pub mod packer;
pub mod toolchain;

// Re-export main types for public API
pub use cli::Args;
pub use error::{BundlerError, ConfigError, PackError, Result, ToolchainError};
pub use packer::{PackReport, PackSettings, Packer};
pub use toolchain::{LeanToolchain, Toolchain};

/// File extension of compiled library artifacts, without the leading dot.
pub const ARTIFACT_EXTENSION: &str = "olean";

/// Name of the build-intermediates directory; its contents are never
/// bundled.
pub const INTERMEDIATES_DIR: &str = "_target";
