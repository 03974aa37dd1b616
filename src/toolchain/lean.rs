//! Process-backed Lean toolchain.
//!
//! Locates the `lean` and `leanpkg` binaries on PATH and drives them with
//! blocking subprocess calls. The search path comes from `lean -p`, which
//! prints a JSON report of the form `{"path": ["...", ...]}` (other fields
//! are ignored).

use std::path::{Path, PathBuf};
use std::process::Command;

use path_absolutize::Absolutize;
use serde::Deserialize;

use crate::error::ToolchainError;
use crate::toolchain::Toolchain;

/// Name of the Lean compiler binary.
const LEAN_BIN: &str = "lean";

/// Name of the Lean package manager binary.
const LEANPKG_BIN: &str = "leanpkg";

/// JSON report printed by `lean -p`.
#[derive(Debug, Deserialize)]
struct PathReport {
    path: Vec<PathBuf>,
}

/// The real Lean toolchain, invoked as subprocesses.
#[derive(Debug)]
pub struct LeanToolchain {
    lean: PathBuf,
    leanpkg: PathBuf,
}

impl LeanToolchain {
    /// Locate the toolchain binaries on PATH.
    ///
    /// # Errors
    ///
    /// Fails with [`ToolchainError::NotFound`] if either `lean` or
    /// `leanpkg` cannot be found.
    pub fn discover() -> Result<Self, ToolchainError> {
        let lean = which::which(LEAN_BIN).map_err(|source| ToolchainError::NotFound {
            tool: LEAN_BIN,
            source,
        })?;
        log::debug!("found {} at {}", LEAN_BIN, lean.display());

        let leanpkg = which::which(LEANPKG_BIN).map_err(|source| ToolchainError::NotFound {
            tool: LEANPKG_BIN,
            source,
        })?;
        log::debug!("found {} at {}", LEANPKG_BIN, leanpkg.display());

        Ok(Self { lean, leanpkg })
    }

    /// Run `lean <flag>` and capture stdout, failing on a non-zero exit.
    fn lean_command(&self, flag: &str, cwd: Option<&Path>) -> Result<Vec<u8>, ToolchainError> {
        let mut command = Command::new(&self.lean);
        command.arg(flag);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| ToolchainError::Spawn {
            tool: format!("{LEAN_BIN} {flag}"),
            source,
        })?;

        if !output.status.success() {
            return Err(ToolchainError::QueryFailed {
                command: format!("{LEAN_BIN} {flag}"),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl Toolchain for LeanToolchain {
    fn build(&self, package_dir: &Path) -> Result<(), ToolchainError> {
        let status = Command::new(&self.leanpkg)
            .arg("build")
            .current_dir(package_dir)
            .status()
            .map_err(|source| ToolchainError::Spawn {
                tool: format!("{LEANPKG_BIN} build"),
                source,
            })?;

        if !status.success() {
            return Err(ToolchainError::BuildFailed { status });
        }
        Ok(())
    }

    fn version(&self) -> Result<String, ToolchainError> {
        let output = self.lean_command("-v", None)?;
        Ok(String::from_utf8_lossy(&output).trim().to_string())
    }

    fn search_path(&self, package_dir: &Path) -> Result<Vec<PathBuf>, ToolchainError> {
        let output = self.lean_command("-p", Some(package_dir))?;
        parse_path_report(&output)
    }
}

/// Parse the `lean -p` report and resolve every entry to an absolute path.
fn parse_path_report(bytes: &[u8]) -> Result<Vec<PathBuf>, ToolchainError> {
    let report: PathReport = serde_json::from_slice(bytes)
        .map_err(|source| ToolchainError::InvalidPathReport { source })?;

    report
        .path
        .into_iter()
        .map(|entry| {
            let resolved = entry
                .absolutize()
                .map_err(|source| ToolchainError::ResolvePath {
                    path: entry.clone(),
                    source,
                })?
                .into_owned();
            Ok(resolved)
        })
        .collect()
}
