//! CLI integration tests for epics-build-analysis.
//!
//! These tests run the binary against listing files and a fake EPICS tree
//! in a temporary directory; the inventory command is never invoked.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the epics-build-analysis binary command.
fn analysis() -> Command {
    Command::cargo_bin("epics-build-analysis").unwrap()
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Write a config file pointing every location into `root`.
fn write_config(root: &Path) -> std::path::PathBuf {
    let path = root.join("epics-build-analysis.toml");
    write(
        &path,
        &format!(
            r#"
[paths]
epics_root = "{epics}"
package_top = "{package}"
listing_dir = "{listings}"
output_dir = "{output}"
"#,
            epics = root.join("epics").display(),
            package = root.join("package").display(),
            listings = root.join("listings").display(),
            output = root.join("output").display(),
        ),
    );
    path
}

/// A small EPICS tree: motor depends on asyn and base, asyn on nothing.
fn create_epics_tree(root: &Path) {
    let modules = root.join("epics/R7.0.3/modules");
    write(
        &modules.join("motor/R7.2/configure/RELEASE"),
        "# motor\n\
         ASYN_MODULE_VERSION = R4.39\n\
         EPICS_BASE = $(EPICS_SITE_TOP)/base/$(BASE_MODULE_VERSION)\n\
         ASYN = $(EPICS_MODULES)/asyn/$(ASYN_MODULE_VERSION)\n",
    );
    write(&modules.join("asyn/R4.39/configure/RELEASE"), "# no pins\n");
    write(&modules.join("base/R7.0.3/configure/RELEASE"), "");

    write(
        &root.join("package/hdf5/1.10/include/hdf5.h"),
        "",
    );
}

// ============================================================================
// compare
// ============================================================================

#[test]
fn test_compare_writes_diff_and_filtered_reports() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());

    let first = tmp.path().join("R1.txt");
    let second = tmp.path().join("R2.txt");
    write(&first, "modA/R1.0 x\nmodA/R1.1 x\nmodB/R2.0 y\n");
    write(&second, "modB/R2.0 y\nmodC/master z\n");

    analysis()
        .args(["--config"])
        .arg(&config)
        .args(["compare", "R1", "R2", "--first-listing"])
        .arg(&first)
        .arg("--second-listing")
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 modules of R1 are not in R2"));

    let diff = fs::read_to_string(tmp.path().join("output/diff_R1_from_R2.txt")).unwrap();
    let diff_keys: Vec<_> = diff.lines().map(str::trim_end).collect();
    assert_eq!(diff_keys, vec!["modA/R1.0"]);

    let filtered = fs::read_to_string(tmp.path().join("output/filtered_R2.txt")).unwrap();
    let lines: Vec<_> = filtered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), 60);
    assert!(lines[1].starts_with(">>> INVALID MODULE NAME: modC/master"));
}

#[test]
fn test_compare_fails_on_malformed_listing() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());

    let first = tmp.path().join("R1.txt");
    let second = tmp.path().join("R2.txt");
    write(&first, "modA/R1.0\n");
    write(&second, "modB/R2.0 y\n");

    analysis()
        .arg("--config")
        .arg(&config)
        .args(["compare", "R1", "R2", "--first-listing"])
        .arg(&first)
        .arg("--second-listing")
        .arg(&second)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed listing line 1"));
}

#[test]
fn test_compare_requires_two_versions() {
    analysis()
        .args(["compare", "R1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SECOND_EPICS_VERSION"));
}

// ============================================================================
// deps
// ============================================================================

#[test]
fn test_deps_writes_report_and_graph() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());
    create_epics_tree(tmp.path());

    analysis()
        .arg("--config")
        .arg(&config)
        .args(["deps", "R7.0.3", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 3 items"));

    let report =
        fs::read_to_string(tmp.path().join("output/module_dependencies_R7.0.3_.txt")).unwrap();
    assert!(report.contains("asyn|R4.39:\n\tNo dependencies found.\n"));
    assert!(report.contains("motor|R7.2:\n\tbase|R7.0.3"));
    assert!(report.contains("\tasyn|R4.39"));

    let dot = fs::read_to_string(tmp.path().join("output/module_dependencies_R7.0.3.dot")).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("label = \"motor R7.2\""));

    let json =
        fs::read_to_string(tmp.path().join("output/module_dependencies_R7.0.3.json")).unwrap();
    assert!(json.contains("\"motor|R7.2\""));
}

#[test]
fn test_deps_include_packages() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());
    create_epics_tree(tmp.path());

    analysis()
        .arg("--config")
        .arg(&config)
        .args(["deps", "R7.0.3", "--include", "package"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 4 items"));

    let dot = fs::read_to_string(tmp.path().join("output/module_dependencies_R7.0.3.dot")).unwrap();
    assert!(dot.contains("label = \"hdf5 1.10\" style = filled fillcolor = red"));
}

#[test]
fn test_deps_with_missing_tree_succeeds_empty() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());

    analysis()
        .arg("--config")
        .arg(&config)
        .args(["deps", "R9.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved 0 items"));
}

#[test]
fn test_unknown_include_kind_is_rejected() {
    analysis()
        .args(["deps", "R7.0.3", "--include", "user_app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown item kind"));
}

// ============================================================================
// analyze
// ============================================================================

#[test]
fn test_analyze_runs_compare_then_deps() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path());
    create_epics_tree(tmp.path());

    let first = tmp.path().join("R7.0.2.txt");
    let second = tmp.path().join("R7.0.3.txt");
    write(&first, "asyn/R4.38 /a\nmotor/R7.2 /m\n");
    write(&second, "asyn/R4.39 /a\nmotor/R7.2 /m\n");

    let output_dir = tmp.path().join("elsewhere");

    analysis()
        .arg("--config")
        .arg(&config)
        .arg("--output-dir")
        .arg(&output_dir)
        .args(["analyze", "R7.0.2", "R7.0.3", "--libraries", "--first-listing"])
        .arg(&first)
        .arg("--second-listing")
        .arg(&second)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 modules of R7.0.2 are not in R7.0.3"))
        .stdout(predicate::str::contains("Resolved 3 items"));

    assert!(output_dir.join("diff_R7.0.2_from_R7.0.3.txt").exists());
    assert!(output_dir.join("filtered_R7.0.3.txt").exists());
    assert!(output_dir.join("module_dependencies_R7.0.3_.txt").exists());
    assert!(output_dir.join("libraries_R7.0.3.txt").exists());
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = TempDir::new().unwrap();

    analysis()
        .arg("--config")
        .arg(tmp.path().join("nope.toml"))
        .args(["deps", "R7.0.3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}
