use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .canonicalize()
        .expect("fixture directory present")
}

fn prepare_command() -> Command {
    let mut cmd = cargo_bin_cmd!("cityroute");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .arg("--no-logo")
        .arg("--data-dir")
        .arg(fixtures_dir());
    cmd
}

#[test]
fn map_lists_locations_and_totals() {
    let mut cmd = prepare_command();
    cmd.arg("map");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("A1 (0, 0) -> [B1, A2, F1]"))
        .stdout(predicate::str::contains("D1 (30, 5) -> []"))
        .stdout(predicate::str::contains("9 locations, 13 connections"))
        .stdout(predicate::str::contains("Q7").not());
}

#[test]
fn map_respects_avoid() {
    let mut cmd = prepare_command();
    cmd.args(["map", "--avoid", "F1,E9"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("A1 (0, 0) -> [B1, A2]"))
        .stdout(predicate::str::contains("7 locations, 9 connections"));
}

#[test]
fn map_json_lists_entries() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "map"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(value["connection_count"], 13);
    assert_eq!(value["locations"][0]["name"], "A1");
    assert_eq!(value["locations"][0]["position"]["x"], 0);
}

#[test]
fn logo_is_printed_unless_suppressed() {
    let temp = tempdir().expect("create temp dir");
    fs::write(temp.path().join("locations.txt"), "Solo 1 1\nEND\n").expect("write");
    fs::write(temp.path().join("connections.txt"), "Solo 0\nEND\n").expect("write");

    let mut cmd = cargo_bin_cmd!("cityroute");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env("LANG", "C")
        .env_remove("LC_ALL")
        .arg("--data-dir")
        .arg(temp.path())
        .arg("map");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("CITYROUTE"))
        .stdout(predicate::str::contains("Solo (1, 1) -> []"))
        .stdout(predicate::str::contains("1 locations, 0 connections"));
}
