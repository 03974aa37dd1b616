//! Command execution for the bundling run.
//!
//! Coordinates the full workflow: validate configuration, discover the
//! toolchain, build the package, query the search path, pack the archive,
//! and report the outcome.

use path_absolutize::Absolutize;

use crate::cli::{Args, OutputManager};
use crate::error::Result;
use crate::packer::{PackSettings, Packer};
use crate::toolchain::{LeanToolchain, Toolchain};
use crate::{ARTIFACT_EXTENSION, INTERMEDIATES_DIR};

/// Execute the bundling command based on parsed arguments
pub fn execute_command(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose, args.quiet);
    args.validate()?;

    let toolchain = LeanToolchain::discover()?;
    run_bundle(&args, &toolchain, &output)
}

/// Run one bundling pass with the given toolchain collaborator.
fn run_bundle(args: &Args, toolchain: &dyn Toolchain, output: &OutputManager) -> Result<i32> {
    // Resolve the archive location up front so the summary names the real
    // path even when the argument was relative.
    let archive_path = args.output.absolutize()?.into_owned();

    if !args.skip_build {
        let _ = output.progress(&format!("building {}", args.package_dir.display()));
        toolchain.build(&args.package_dir)?;
    }

    let version = toolchain.version()?;
    let _ = output.println(&format!("Using {}", version));

    let search_paths = toolchain.search_path(&args.package_dir)?;
    for path in &search_paths {
        let _ = output.verbose(&format!("search path entry: {}", path.display()));
    }

    let packer = Packer::new(PackSettings {
        search_paths,
        extension: ARTIFACT_EXTENSION.to_string(),
        exclude_dir: INTERMEDIATES_DIR.to_string(),
        output: archive_path,
    });
    let report = packer.pack()?;

    if !report.duplicates.is_empty() {
        let _ = output.warn(&format!(
            "skipped {} duplicate artifact(s)",
            report.duplicates.len()
        ));
    }
    let _ = output.success(&format!(
        "Created {} with {} {} files",
        report.output.display(),
        report.entries,
        ARTIFACT_EXTENSION
    ));

    Ok(0)
}
