//! CLI integration tests for oma-import.
//!
//! These drive the real binary with scripted stdin and a fake `bazel`
//! executable supplied through the config file, so no Bazel workspace
//! or network access is needed.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the oma-import binary command.
fn oma_import() -> Command {
    Command::cargo_bin("oma-import").unwrap()
}

/// Write an executable fake `bazel` that prints the given labels.
fn fake_bazel(dir: &Path, labels: &[&str]) -> std::path::PathBuf {
    let path = dir.join("fake-bazel");
    let mut script = String::from("#!/bin/sh\n");
    for label in labels {
        script.push_str(&format!("echo \"{}\"\n", label));
    }
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Write a failing fake `bazel`.
fn broken_bazel(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("fake-bazel");
    fs::write(&path, "#!/bin/sh\necho \"no such package\" >&2\nexit 1\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Set up a workspace: manifest, artifact file, config pointing at the
/// fake bazel. Returns the temp dir.
fn workspace(labels: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("MODULE.bazel"), "module(name = \"oma\")\n").unwrap();
    fs::write(tmp.path().join("readme.txt"), "hello").unwrap();
    let bazel = fake_bazel(tmp.path(), labels);
    fs::write(
        tmp.path().join("oma-import.toml"),
        format!("bazel = \"{}\"\n", bazel.display()),
    )
    .unwrap();
    tmp
}

const SPDX_MIT: &str = "@package_metadata//licenses/spdx:MIT";
const SPDX_APACHE: &str = "@package_metadata//licenses/spdx:Apache-2.0";

// ============================================================================
// Successful imports
// ============================================================================

#[test]
fn test_file_import_writes_managed_region() {
    let tmp = workspace(&[SPDX_MIT, SPDX_APACHE]);

    // File, local path, name readme, default namespace, no version,
    // default URL list, "No license".
    oma_import()
        .current_dir(tmp.path())
        .write_stdin("1\n2\nreadme.txt\nreadme\n\n\n\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated stanza:"));

    let manifest = fs::read_to_string(tmp.path().join("MODULE.bazel")).unwrap();
    assert!(manifest.starts_with("module(name = \"oma\")\n"));
    assert_eq!(manifest.matches("# OMA_DATA_START").count(), 1);
    assert_eq!(manifest.matches("# OMA_DATA_END").count(), 1);
    assert!(manifest.contains("oma.file("));
    assert!(manifest.contains("name = \"readme\""));
    assert!(!manifest.contains("license_kind_label"));
    assert!(manifest.contains("purl = \"pkg:generic/oma/readme?download_url=file%3A%2F%2F"));
    // sha256 of "hello"
    assert!(manifest.contains(
        "sha256 = \"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\""
    ));
    // Exactly one entry in the urls block.
    assert_eq!(manifest.matches("        \"file://").count(), 1);
}

#[test]
fn test_second_import_reuses_the_region() {
    let tmp = workspace(&[SPDX_MIT]);

    oma_import()
        .current_dir(tmp.path())
        .write_stdin("1\n2\nreadme.txt\nfirst\n\n\n\n1\n")
        .assert()
        .success();

    oma_import()
        .current_dir(tmp.path())
        .write_stdin("1\n2\nreadme.txt\nsecond\n\n\n\n1\n")
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("MODULE.bazel")).unwrap();
    assert_eq!(manifest.matches("# OMA_DATA_START").count(), 1);
    assert_eq!(manifest.matches("# OMA_DATA_END").count(), 1);
    assert_eq!(manifest.matches("oma.file(").count(), 2);
    assert!(manifest.find("name = \"first\"").unwrap() < manifest.find("name = \"second\"").unwrap());
}

#[test]
fn test_archive_import_records_catalog_license() {
    let tmp = workspace(&[SPDX_MIT, SPDX_APACHE]);
    fs::write(tmp.path().join("data.tar.gz"), "archive bytes").unwrap();

    // Archive, local path, explicit version and urls. Sorted menu:
    // no-license, Apache-2.0, MIT, custom -> 3 selects MIT. Default
    // archive type (tar.gz, guessed) is accepted, extract without a
    // strip prefix.
    oma_import()
        .current_dir(tmp.path())
        .write_stdin("2\n2\ndata.tar.gz\ndataset\n\n1.0\nhttps://mirror/data.tar.gz\n3\n\ny\n\n")
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("MODULE.bazel")).unwrap();
    assert!(manifest.contains("oma.archive("));
    assert!(manifest.contains("archive_type = \"tar.gz\""));
    assert!(manifest.contains("extract = True,"));
    assert!(!manifest.contains("strip_prefix"));
    assert!(manifest.contains(&format!("license_kind_label = \"{}\"", SPDX_MIT)));
    assert!(manifest.contains(
        "purl = \"pkg:generic/oma/dataset@1.0?download_url=https%3A%2F%2Fmirror%2Fdata.tar.gz\""
    ));
}

// ============================================================================
// Dry run
// ============================================================================

#[test]
fn test_dry_run_reports_without_writing() {
    let tmp = workspace(&[SPDX_MIT]);
    let original = fs::read_to_string(tmp.path().join("MODULE.bazel")).unwrap();

    oma_import()
        .arg("--dry-run")
        .current_dir(tmp.path())
        .write_stdin("1\n2\nreadme.txt\nreadme\n\n\n\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run enabled"))
        .stdout(predicate::str::contains("oma.file("));

    let after = fs::read_to_string(tmp.path().join("MODULE.bazel")).unwrap();
    assert_eq!(after, original);
}

// ============================================================================
// Fatal errors
// ============================================================================

#[test]
fn test_catalog_failure_aborts_with_message() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("MODULE.bazel"), "module(name = \"oma\")\n").unwrap();
    fs::write(tmp.path().join("readme.txt"), "hello").unwrap();
    let bazel = broken_bazel(tmp.path());
    fs::write(
        tmp.path().join("oma-import.toml"),
        format!("bazel = \"{}\"\n", bazel.display()),
    )
    .unwrap();

    oma_import()
        .current_dir(tmp.path())
        .write_stdin("1\n2\nreadme.txt\nreadme\n\n\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("no such package"));

    // The manifest was never touched.
    let manifest = fs::read_to_string(tmp.path().join("MODULE.bazel")).unwrap();
    assert!(!manifest.contains("# OMA_DATA_START"));
}

#[test]
fn test_missing_artifact_aborts() {
    let tmp = workspace(&[SPDX_MIT]);

    oma_import()
        .current_dir(tmp.path())
        .write_stdin("1\n2\nno-such-file.bin\nreadme\n\n\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("failed to open file"));
}
