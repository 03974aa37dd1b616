//! End-to-end tests for the library_bundler binary.
//!
//! Configuration errors are checked directly; the full bundling flow runs
//! against stub `lean`/`leanpkg` executables placed on a scratch `PATH`.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn bundler() -> Command {
    Command::cargo_bin("library_bundler").unwrap()
}

#[test]
fn help_shows_bundling_flags() {
    bundler()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--package-dir"))
        .stdout(predicate::str::contains("--skip-build"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn missing_package_directory_is_a_configuration_error() {
    let tmp = tempfile::tempdir().unwrap();

    bundler()
        .current_dir(tmp.path())
        .args(["-i", "no-such-package"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Package directory not found"));
}

#[test]
fn missing_output_directory_is_a_configuration_error() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("pkg")).unwrap();

    bundler()
        .current_dir(tmp.path())
        .args(["-i", "pkg", "-o", "no-such-dir/library.zip"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Output directory does not exist"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    bundler()
        .args(["--quiet", "--verbose"])
        .assert()
        .failure()
        .code(2);
}

#[cfg(unix)]
mod with_stub_toolchain {
    use super::*;
    use std::io::Read;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn write_executable(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Lay out stub toolchain binaries plus two search roots containing a
    /// duplicate artifact and an intermediates directory.
    fn scaffold(tmp: &Path) -> String {
        let bin = tmp.join("bin");
        fs::create_dir_all(&bin).unwrap();

        let root_a = tmp.join("roots/a");
        let root_b = tmp.join("roots/b");
        fs::create_dir_all(root_a.join("Foo/_target")).unwrap();
        fs::create_dir_all(root_b.join("Foo")).unwrap();
        fs::write(root_a.join("Foo/Bar.olean"), b"from root a").unwrap();
        fs::write(root_a.join("Foo/_target/Scratch.olean"), b"scratch").unwrap();
        fs::write(root_b.join("Foo/Bar.olean"), b"from root b").unwrap();
        fs::write(root_b.join("Qux.olean"), b"qux").unwrap();

        write_executable(
            &bin.join("lean"),
            &format!(
                "#!/bin/sh\n\
                 if [ \"$1\" = \"-v\" ]; then\n\
                 \techo \"Lean (version 3.51.1, commit 0000000, Release)\"\n\
                 elif [ \"$1\" = \"-p\" ]; then\n\
                 \tprintf '{{\"path\": [\"{}\", \"{}\"]}}'\n\
                 fi\n",
                root_a.display(),
                root_b.display()
            ),
        );
        write_executable(
            &bin.join("leanpkg"),
            &format!(
                "#!/bin/sh\n\
                 if [ \"$1\" = \"build\" ]; then\n\
                 \ttouch \"{}\"\n\
                 fi\n",
                tmp.join("build-ran").display()
            ),
        );

        fs::create_dir_all(tmp.join("pkg")).unwrap();
        fs::create_dir_all(tmp.join("dist")).unwrap();

        format!(
            "{}:{}",
            bin.display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }

    fn archive_entry(path: &Path, name: &str) -> Vec<u8> {
        let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn bundles_unique_artifacts_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let path = scaffold(tmp.path());

        bundler()
            .current_dir(tmp.path())
            .env("PATH", &path)
            .args(["-i", "pkg", "-o", "dist/library.zip"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Using Lean (version 3.51.1"))
            .stdout(predicate::str::contains("skipped 1 duplicate artifact"))
            .stdout(predicate::str::contains("2 olean files"))
            .stderr(predicate::str::contains("duplicate artifact skipped"));

        assert!(tmp.path().join("build-ran").exists());

        let archive = tmp.path().join("dist/library.zip");
        assert_eq!(archive_entry(&archive, "Foo/Bar.olean"), b"from root a");
        assert_eq!(archive_entry(&archive, "Qux.olean"), b"qux");

        let archive = zip::ZipArchive::new(fs::File::open(&archive).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn skip_build_collects_without_building() {
        let tmp = tempfile::tempdir().unwrap();
        let path = scaffold(tmp.path());

        bundler()
            .current_dir(tmp.path())
            .env("PATH", &path)
            .args(["-i", "pkg", "-o", "dist/library.zip", "--skip-build"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 olean files"));

        assert!(!tmp.path().join("build-ran").exists());
    }
}
