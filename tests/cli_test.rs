//! CLI contract tests
//!
//! Drives the built binary through a full ledger lifecycle in a temporary
//! project directory: add, list, score, export, delete, clear.

use std::path::Path;
use std::process::{Command, Output};

fn greenbuild_bin() -> &'static str {
    env!("CARGO_BIN_EXE_greenbuild")
}

fn greenbuild(project: &Path, args: &[&str]) -> Output {
    Command::new(greenbuild_bin())
        .arg("-C")
        .arg(project)
        .args(args)
        .env_remove("GREENBUILD_DB")
        .env_remove("RUST_LOG")
        .output()
        .expect("run greenbuild")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn add_gold_material(project: &Path) {
    let out = greenbuild(
        project,
        &[
            "add",
            "--name",
            "Recycled Steel",
            "--category",
            "structural",
            "--cost",
            "1000",
            "--weight",
            "100",
            "--embodied-carbon",
            "2",
            "--transport-distance",
            "500",
            "--recycled-post",
            "50",
            "--local",
            "--epd",
        ],
    );
    assert!(out.status.success(), "add failed: {}", stderr(&out));
}

fn list_json(project: &Path) -> Vec<serde_json::Value> {
    let out = greenbuild(project, &["list", "--format", "json"]);
    assert!(out.status.success(), "list failed: {}", stderr(&out));
    serde_json::from_str(&stdout(&out)).expect("list emits a JSON array")
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let out = greenbuild(dir.path(), &["version"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("greenbuild "));
}

#[test]
fn test_init_creates_config_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let out = greenbuild(dir.path(), &["init"]);
    assert!(out.status.success(), "init failed: {}", stderr(&out));
    assert!(dir.path().join("greenbuild.toml").exists());
    assert!(dir.path().join(".greenbuild").join("ledger.redb").exists());

    // Second run keeps the existing config
    std::fs::write(dir.path().join("greenbuild.toml"), "[sync]\nsettle_ms = 5\n").unwrap();
    let out = greenbuild(dir.path(), &["init"]);
    assert!(out.status.success());
    let kept = std::fs::read_to_string(dir.path().join("greenbuild.toml")).unwrap();
    assert!(kept.contains("settle_ms = 5"));
}

#[test]
fn test_add_list_and_score() {
    let dir = tempfile::tempdir().unwrap();
    add_gold_material(dir.path());

    let items = list_json(dir.path());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Recycled Steel");
    assert_eq!(items[0]["hasEPD"], true);
    assert_eq!(items[0]["supplier"]["name"], "Direct");

    let out = greenbuild(dir.path(), &["score", "--format", "json"]);
    assert!(out.status.success(), "score failed: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["credits"]["totalPoints"], 4);
    assert_eq!(report["credits"]["certLevel"], "Gold");
    assert_eq!(report["carbon"]["totalEmbodiedCarbon"], 205.0);
    assert_eq!(report["carbon"]["isBelowNationalAvg"], true);
    assert_eq!(report["materialCount"], 1);
}

#[test]
fn test_list_is_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["First", "Second", "Third"] {
        let out = greenbuild(dir.path(), &["add", "--name", name]);
        assert!(out.status.success());
    }
    let names: Vec<String> = list_json(dir.path())
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[test]
fn test_invalid_numbers_become_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = greenbuild(dir.path(), &["add", "--cost", "lots", "--weight", ""]);
    assert!(out.status.success(), "add failed: {}", stderr(&out));
    let items = list_json(dir.path());
    assert_eq!(items[0]["cost"], 0.0);
    assert_eq!(items[0]["weight"], 0.0);
    assert_eq!(items[0]["name"], "Unnamed Material");
}

#[test]
fn test_export_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    add_gold_material(dir.path());

    let csv_path = dir.path().join("audit.csv");
    let out = greenbuild(dir.path(), &["export", "-o", csv_path.to_str().unwrap()]);
    assert!(out.status.success(), "export failed: {}", stderr(&out));

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Name,Category,Cost,Weight,Embodied Carbon,Transport Distance,Local Sourced,Has EPD,Supplier Name,Supplier Location"
    );
    let row = lines.next().unwrap();
    assert!(row.contains(",Recycled Steel,structural,1000,100,2,500,Yes,Yes,Direct,UAE"));

    // Stdout variant
    let out = greenbuild(dir.path(), &["export", "-o", "-"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("ID,Name,"));
}

#[test]
fn test_export_refuses_empty_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let out = greenbuild(dir.path(), &["export"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("No data available to export."));
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".csv"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_delete_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    add_gold_material(dir.path());
    add_gold_material(dir.path());
    add_gold_material(dir.path());

    let items = list_json(dir.path());
    let id = items[1]["id"].as_str().unwrap().to_string();

    let out = greenbuild(dir.path(), &["delete", &id]);
    assert!(out.status.success(), "delete failed: {}", stderr(&out));
    let remaining = list_json(dir.path());
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|m| m["id"] != id.as_str()));

    // Unknown ids are not an error
    let out = greenbuild(dir.path(), &["delete", "does-not-exist"]);
    assert!(out.status.success());
    assert_eq!(list_json(dir.path()).len(), 2);

    // Without --yes and no terminal the prompt reads as declined
    let out = greenbuild(dir.path(), &["clear"]);
    assert!(out.status.success());
    assert_eq!(list_json(dir.path()).len(), 2);

    let out = greenbuild(dir.path(), &["clear", "--yes"]);
    assert!(out.status.success(), "clear failed: {}", stderr(&out));
    assert!(list_json(dir.path()).is_empty());
}

#[test]
fn test_db_flag_and_env_override_store_path() {
    let dir = tempfile::tempdir().unwrap();
    let custom = dir.path().join("custom.redb");

    let out = Command::new(greenbuild_bin())
        .arg("-C")
        .arg(dir.path())
        .args(["add", "--name", "Env Stored"])
        .env("GREENBUILD_DB", &custom)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(out.status.success(), "add failed: {}", stderr(&out));
    assert!(custom.exists());
    assert!(!dir.path().join(".greenbuild").join("ledger.redb").exists());

    let out = greenbuild(
        dir.path(),
        &["--db", custom.to_str().unwrap(), "list", "--format", "json"],
    );
    let items: Vec<serde_json::Value> = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Env Stored");
}

#[test]
fn test_relative_db_resolves_from_working_dir() {
    let project = tempfile::tempdir().unwrap();
    let cwd = tempfile::tempdir().unwrap();

    let out = Command::new(greenbuild_bin())
        .current_dir(cwd.path())
        .arg("-C")
        .arg(project.path())
        .args(["--db", "shared/site.redb", "add", "--name", "Relative"])
        .env_remove("GREENBUILD_DB")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(out.status.success(), "add failed: {}", stderr(&out));
    assert!(cwd.path().join("shared").join("site.redb").exists());
    assert!(!project.path().join("shared").exists());
}

#[test]
fn test_score_markdown_to_file() {
    let dir = tempfile::tempdir().unwrap();
    add_gold_material(dir.path());
    let report_path = dir.path().join("report.md");
    let out = greenbuild(
        dir.path(),
        &["score", "--format", "md", "-o", report_path.to_str().unwrap()],
    );
    assert!(out.status.success(), "score failed: {}", stderr(&out));
    let md = std::fs::read_to_string(&report_path).unwrap();
    assert!(md.starts_with("# "));
    assert!(md.contains("Tier: Gold"));
}

#[test]
fn test_config_format_default_applies_to_score() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("greenbuild.toml"),
        "[defaults]\nformat = \"json\"\ncurrency = \"USD\"\n",
    )
    .unwrap();
    let out = greenbuild(dir.path(), &["score"]);
    assert!(out.status.success(), "score failed: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["currency"], "USD");
    assert_eq!(report["credits"]["certLevel"], "No Certification");
}
