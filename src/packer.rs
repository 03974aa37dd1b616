//! Artifact collection and archive packing.
//!
//! This module implements the bundling core: walk an ordered list of search
//! directories, collect every compiled artifact matching the configured
//! extension, deduplicate by path-relative-to-search-root, and stream the
//! unique set into a single deflate-compressed zip archive.
//!
//! # Deduplication
//!
//! The relative path of an artifact (relative to whichever search root it
//! was found under) is both its identity and its entry name inside the
//! archive. When two search roots contain the same relative path, the first
//! one in search-path order wins; every later occurrence is skipped and
//! reported, never treated as an error. Layered package resolution makes
//! such collisions legitimate, so a duplicate is a warning, not a failure.
//!
//! # Determinism
//!
//! Directories are traversed with a name-sorted recursive descent, so for a
//! fixed filesystem state and search-path order the archive always contains
//! the same entries in the same order.
//!
//! # Example
//!
//! ```no_run
//! use library_bundler::packer::{PackSettings, Packer};
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), library_bundler::PackError> {
//! let packer = Packer::new(PackSettings {
//!     search_paths: vec![PathBuf::from("/pkg/_target/deps/mathlib")],
//!     extension: "olean".into(),
//!     exclude_dir: "_target".into(),
//!     output: PathBuf::from("dist/library.zip"),
//! });
//!
//! let report = packer.pack()?;
//! println!("wrote {} entries", report.entries);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackError;

/// Configuration for one packing run.
#[derive(Debug, Clone)]
pub struct PackSettings {
    /// Ordered list of directories to search for artifacts.
    ///
    /// Earlier directories win when the same relative path occurs more than
    /// once. Directories that do not exist contribute zero files.
    pub search_paths: Vec<PathBuf>,

    /// Artifact file extension to collect, without the leading dot.
    ///
    /// Matched as a name suffix, e.g. `"olean"` collects `Foo/Bar.olean`.
    pub extension: String,

    /// Name of the build-intermediates directory.
    ///
    /// Any artifact whose relative path contains this name as a whole path
    /// segment is skipped entirely.
    pub exclude_dir: String,

    /// Path of the archive to create. Overwritten if it already exists.
    pub output: PathBuf,
}

/// Outcome of a successful packing run.
#[derive(Debug)]
pub struct PackReport {
    /// Path of the archive that was written.
    pub output: PathBuf,

    /// Number of unique entries written to the archive.
    pub entries: usize,

    /// Absolute paths of artifacts skipped because their relative path was
    /// already present, in the order they were encountered.
    pub duplicates: Vec<PathBuf>,
}

/// Collects artifacts from a search path into a compressed archive.
///
/// One `Packer` performs one run: the seen-set and the archive handle are
/// created inside [`pack`](Packer::pack) and dropped when it returns. Runs
/// share no state.
#[derive(Debug)]
pub struct Packer {
    settings: PackSettings,
}

impl Packer {
    /// Create a packer for the given settings.
    pub fn new(settings: PackSettings) -> Self {
        Self { settings }
    }

    /// Collect all unique artifacts and write the archive.
    ///
    /// The archive at the configured output path is created fresh (any
    /// previous contents are discarded) and finalized before this returns.
    /// Duplicate artifacts are logged at `warn` level as they are
    /// encountered and listed in the returned report.
    ///
    /// # Errors
    ///
    /// Fails if the archive cannot be created at the output path, if a
    /// discovered artifact cannot be read, or if a search directory cannot
    /// be traversed. There is no partial-success mode: the archive must be
    /// considered invalid unless this returns `Ok`.
    pub fn pack(&self) -> Result<PackReport, PackError> {
        let settings = &self.settings;
        let suffix = format!(".{}", settings.extension.trim_start_matches('.'));

        let file = File::create(&settings.output).map_err(|source| PackError::CreateArchive {
            path: settings.output.clone(),
            source,
        })?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(9))
            .unix_permissions(0o644);

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut duplicates = Vec::new();

        for root in &settings.search_paths {
            if !root.is_dir() {
                log::debug!("search directory {} does not exist, skipping", root.display());
                continue;
            }

            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|source| PackError::Walk {
                    path: root.clone(),
                    source,
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                if !entry.file_name().to_string_lossy().ends_with(&suffix) {
                    continue;
                }

                // walkdir only yields paths under its root
                let Ok(rel) = entry.path().strip_prefix(root) else {
                    continue;
                };
                if contains_segment(rel, &settings.exclude_dir) {
                    continue;
                }
                if seen.contains(rel) {
                    log::warn!("duplicate artifact skipped: {}", entry.path().display());
                    duplicates.push(entry.path().to_path_buf());
                    continue;
                }

                let name = entry_name(rel)?;
                zip.start_file(name.as_str(), options)
                    .map_err(|source| PackError::WriteEntry { name: name.clone(), source })?;
                let artifact = File::open(entry.path()).map_err(|source| {
                    PackError::ReadArtifact {
                        path: entry.path().to_path_buf(),
                        source,
                    }
                })?;
                io::copy(&mut BufReader::new(artifact), &mut zip).map_err(|source| {
                    PackError::StreamEntry {
                        path: entry.path().to_path_buf(),
                        source,
                    }
                })?;

                log::debug!("added {} from {}", name, root.display());
                seen.insert(rel.to_path_buf());
            }
        }

        zip.finish().map_err(|source| PackError::FinishArchive {
            path: settings.output.clone(),
            source,
        })?;

        Ok(PackReport {
            output: settings.output.clone(),
            entries: seen.len(),
            duplicates,
        })
    }
}

/// Check whether any path segment of `rel` equals `dir_name`.
fn contains_segment(rel: &Path, dir_name: &str) -> bool {
    rel.components()
        .any(|component| component.as_os_str() == OsStr::new(dir_name))
}

/// Build the archive entry name for a relative path.
///
/// Entry names use forward slashes on every platform. Non-UTF-8 segments
/// cannot be represented as zip entry names and fail the run.
fn entry_name(rel: &Path) -> Result<String, PackError> {
    let mut segments = Vec::new();
    for component in rel.components() {
        let segment = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| PackError::NonUnicodePath {
                path: rel.to_path_buf(),
            })?;
        segments.push(segment);
    }
    Ok(segments.join("/"))
}
