//! Integration tests for the CLI

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("resources.csv")
}

fn list_audit() -> Command {
    let mut cmd = Command::cargo_bin("list-audit").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let output = list_audit()
        .arg("--dataset")
        .arg(fixture())
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    list_audit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--recent-days"))
        .stdout(predicate::str::contains("--no-license"));
}

#[test]
fn test_cli_high_level_report() {
    list_audit()
        .arg("--dataset")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("High-Level Audit Report"))
        .stdout(predicate::str::contains("Total Resources: 4"))
        .stdout(predicate::str::contains("Resources without license: 2"))
        .stdout(predicate::str::contains("Removed from origin: 1"));
}

#[test]
fn test_cli_high_level_json() {
    let json = json_output(&[]);
    assert_eq!(json["mode"], "high_level");
    assert_eq!(json["summary"]["total_resources"], 4);
    assert_eq!(json["summary"]["active"], 3);
    assert_eq!(json["summary"]["inactive"], 1);
    assert_eq!(json["summary"]["categories"]["Tooling"], 2);
    assert_eq!(json["summary"]["licenses"]["unlicensed"], 2);
    assert_eq!(json["summary"]["licenses"]["MIT"], 1);
    assert_eq!(json["summary"]["top_authors"]["alice"], 2);
    assert_eq!(json["summary"]["freshness"]["never_checked"], 1);
}

#[test]
fn test_cli_scoped_category() {
    list_audit()
        .arg("--dataset")
        .arg(fixture())
        .arg("--category")
        .arg("tooling")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scoped Audit Report"))
        .stdout(predicate::str::contains("Category: tooling"))
        .stdout(predicate::str::contains("No filters applied").not())
        .stdout(predicate::str::contains("Matched: 2 resources"))
        .stdout(predicate::str::contains("Context Packer"))
        .stdout(predicate::str::contains("REMOVED FROM ORIGIN"));
}

#[test]
fn test_cli_combined_filters_json() {
    let json = json_output(&["--category", "Tooling", "--inactive"]);
    assert_eq!(json["mode"], "scoped");
    assert_eq!(json["matched_count"], 1);
    assert_eq!(json["resources"][0]["id"], "tool-002");
    assert_eq!(json["filters"]["inactive_only"], true);
    assert_eq!(json["summary"]["total_resources"], 1);
}

#[test]
fn test_cli_no_license() {
    let json = json_output(&["--no-license"]);
    let ids: Vec<_> = json["resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["tool-002", "hook-001"]);
}

#[test]
fn test_cli_unknown_author_is_empty() {
    list_audit()
        .arg("--dataset")
        .arg(fixture())
        .arg("--author")
        .arg("nobody")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched: 0 resources"));
}

#[test]
fn test_cli_recent_days() {
    let recent = (Utc::now() - Duration::days(2)).format("%Y-%m-%d:%H-%M-%S");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "ID,Display Name,Category,Author Name,License,Active,Date Added\n\
         new-1,Fresh,Tooling,dana,MIT,TRUE,{recent}\n\
         old-1,Stale,Tooling,dana,MIT,TRUE,2020-01-01:00-00-00"
    )
    .unwrap();

    let output = list_audit()
        .arg("--dataset")
        .arg(file.path())
        .args(["--recent-days", "7", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["matched_count"], 1);
    assert_eq!(json["resources"][0]["id"], "new-1");
}

#[test]
fn test_cli_recent_days_past_date_range() {
    let json = json_output(&["--recent-days", "100000000"]);
    assert_eq!(json["mode"], "scoped");
    assert_eq!(json["matched_count"], 4);
}

#[test]
fn test_cli_license_risk_is_lowercase() {
    list_audit()
        .arg("--dataset")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("permissive: 2"))
        .stdout(predicate::str::contains("Permissive").not());
}

#[test]
fn test_cli_config_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        config,
        "dataset_path = {:?}\ntop_authors = 1",
        fixture().display().to_string()
    )
    .unwrap();

    let output = list_audit()
        .arg("--config")
        .arg(config.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let top = json["summary"]["top_authors"].as_object().unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top["alice"], 2);
}

#[test]
fn test_cli_missing_dataset() {
    list_audit()
        .arg("--dataset")
        .arg("/nonexistent/THE_RESOURCES_TABLE.csv")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Dataset not found"));
}

#[test]
fn test_cli_invalid_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "top_authors = 0").unwrap();

    list_audit()
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("top_authors"));
}
