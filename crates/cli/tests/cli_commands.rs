mod support;

use predicates::prelude::*;
use tempfile::tempdir;

use support::write_elf_without_imports;

/// Running without a subcommand prints usage and fails.
#[test]
fn missing_subcommand_fails() {
    assert_cmd::cargo::cargo_bin_cmd!("glibc-check").assert().failure();
}

#[test]
fn version_flag_reports_package_version() {
    assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn assert_all_help_documents_bound_variables() {
    assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
        .args(["assert-all", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("major").and(predicate::str::contains("patch")));
}

#[test]
fn list_versions_requires_a_file_argument() {
    assert_cmd::cargo::cargo_bin_cmd!("glibc-check").arg("list-versions").assert().failure();
}

#[test]
fn list_versions_fails_for_missing_file() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
        .arg("list-versions")
        .arg(dir.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read glibc versions"));
}

#[test]
fn list_versions_prints_nothing_for_elf_without_imports() {
    let dir = tempdir().expect("tempdir");
    let fixture = dir.path().join("fixture.o");
    write_elf_without_imports(&fixture);

    assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
        .arg("list-versions")
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
        .args(["list-versions", "--json"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn min_max_and_assert_all_fail_without_versions() {
    let dir = tempdir().expect("tempdir");
    let fixture = dir.path().join("fixture.o");
    write_elf_without_imports(&fixture);

    for sub in ["min", "max"] {
        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .arg(sub)
            .arg(&fixture)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("no glibc versions found"));
    }

    assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
        .args(["assert-all", "major == 2"])
        .arg(&fixture)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no glibc versions found"));
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
mod against_glibc_binary {
    use glibc_check_core::extract;

    use super::support::cli_binary;
    use super::*;

    #[test]
    fn list_min_and_max_agree() {
        let versions = extract(cli_binary()).expect("extract cli binary");
        let expected: String = versions.iter().map(|v| format!("{v}\n")).collect();
        let min = versions.min().expect("non-empty").to_string();
        let max = versions.max().expect("non-empty").to_string();

        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .arg("list-versions")
            .arg(cli_binary())
            .assert()
            .success()
            .stdout(expected);

        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .arg("min")
            .arg(cli_binary())
            .assert()
            .success()
            .stdout(format!("{min}\n"));

        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .arg("max")
            .arg(cli_binary())
            .assert()
            .success()
            .stdout(format!("{max}\n"));
    }

    #[test]
    fn list_versions_json_matches_library_output() {
        let versions = extract(cli_binary()).expect("extract cli binary");
        let output = assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .args(["list-versions", "--json"])
            .arg(cli_binary())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let parsed: serde_json::Value = serde_json::from_slice(&output).expect("json output");
        assert_eq!(parsed, serde_json::to_value(&versions).unwrap());
    }

    #[test]
    fn assert_all_succeeds_when_condition_holds() {
        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .args(["assert-all", "major == 2 && minor >= 0"])
            .arg(cli_binary())
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn assert_all_exits_with_violation_count() {
        let versions = extract(cli_binary()).expect("extract cli binary");
        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .args(["assert-all", "major != 2"])
            .arg(cli_binary())
            .assert()
            .code(versions.len() as i32)
            .stderr(format!("condition did not hold for versions: {versions}\n"));
    }

    #[test]
    fn assert_all_exits_one_on_bad_expression() {
        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .args(["assert-all", "&"])
            .arg(cli_binary())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("parsing error"));

        assert_cmd::cargo::cargo_bin_cmd!("glibc-check")
            .args(["assert-all", "3"])
            .arg(cli_binary())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("did not evaluate to a boolean"));
    }
}
