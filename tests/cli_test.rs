use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the absolute path to a fixture file under `tests/fixtures/`.
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Builds a `cosmonav` Command pointing at an isolated work dir.
fn cosmonav(work_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cosmonav").unwrap();
    cmd.arg("-w").arg(work_dir).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_index_search_status_clear_flow() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("cache");

    cosmonav(&work)
        .arg("index")
        .arg("--inventory")
        .arg(fixture("inventory.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Indexed 2 accounts, 3 databases, 5 containers.",
        ));

    cosmonav(&work)
        .arg("search")
        .arg("orders")
        .assert()
        .success()
        .stdout(predicate::str::contains("orders"));

    cosmonav(&work)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("accounts:   2"));

    cosmonav(&work).arg("clear").assert().success();

    cosmonav(&work)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No index built"));
}

#[test]
fn test_multi_term_search_ranks_databases() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("cache");

    cosmonav(&work)
        .arg("index")
        .arg("--inventory")
        .arg(fixture("inventory.json"))
        .assert()
        .success();

    cosmonav(&work)
        .arg("search")
        .arg("mai db")
        .assert()
        .success()
        .stdout(predicate::str::contains("maindb"))
        .stdout(predicate::str::contains("analytics").not());
}

#[test]
fn test_scoped_search_lists_containers_here() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("cache");

    cosmonav(&work)
        .arg("index")
        .arg("--inventory")
        .arg(fixture("inventory.json"))
        .assert()
        .success();

    cosmonav(&work)
        .arg("search")
        .arg("customers")
        .arg("--account")
        .arg("contoso-prod")
        .arg("--database")
        .arg("maindb")
        .assert()
        .success()
        .stdout(predicate::str::contains("Containers here"));
}

#[test]
fn test_search_without_index_degrades_gracefully() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("cache");

    // No index built, no inventory reachable: still a clean exit with a hint.
    cosmonav(&work)
        .arg("search")
        .arg("anything")
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches"));
}

#[test]
fn test_index_with_missing_inventory_fails() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("cache");

    cosmonav(&work)
        .arg("index")
        .arg("--inventory")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure();
}
