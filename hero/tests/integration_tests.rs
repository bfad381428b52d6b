//! Integration tests for the hero CLI

use assert_cmd::Command;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn hero() -> Command {
    let mut cmd = Command::cargo_bin("hero").unwrap();
    // Keep the platform config dir out of the tests.
    let temp_dir = std::env::temp_dir().join("hero-cli-tests-no-config");
    cmd.env("XDG_CONFIG_HOME", &temp_dir).env("HOME", &temp_dir);
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Test CLI argument parsing
#[test]
fn test_cli_help() {
    let mut cmd = hero();
    cmd.arg("--help");
    cmd.assert().success();
}

/// Test CLI version
#[test]
fn test_cli_version() {
    let mut cmd = hero();
    cmd.arg("--version");
    cmd.assert().success();
}

/// Test invalid arguments
#[test]
fn test_invalid_arguments() {
    let mut cmd = hero();
    cmd.arg("--invalid-flag");
    cmd.assert().failure();
}

#[test]
fn test_missing_subcommand() {
    hero().assert().failure();
}

#[rstest]
#[case(1440, 5)]
#[case(1024, 6)]
#[case(800, 7)]
#[case(500, 7)]
fn test_layout_row_count(#[case] width: u32, #[case] rows: u64) {
    let value = stdout_json(hero().args(["layout", "--width", &width.to_string(), "-o", "json"]));
    assert_eq!(value["layout"]["row_count"], rows);
}

#[test]
fn test_layout_font_size() {
    let value = stdout_json(hero().args(["layout", "--height", "1024", "--output", "json"]));
    assert_eq!(value["layout"]["font_size_px"], 300.0);
    assert_eq!(value["row_style"]["font_size_px"], 450.0);
}

#[test]
fn test_rows_are_rotated() {
    let value = stdout_json(hero().args(["rows", "-o", "json"]));
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(
        rows[2]["text"],
        "develop • innovate • collaborate • create • design"
    );
    assert_eq!(rows[0]["direction"], "left");
    assert_eq!(rows[1]["direction"], "right");
}

#[test]
fn test_plan_lists_segments() {
    let value = stdout_json(hero().args(["plan", "-o", "json"]));
    let labels: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|segment| segment["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["brand", "subheading", "heading", "content"]);
}

#[test]
fn test_plan_text_output() {
    let output = hero().arg("plan").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("heading"));
    assert!(stdout.contains("100ms"));
}

#[test]
fn test_simulate_completes_entrance() {
    let value = stdout_json(hero().args(["simulate", "--duration", "4", "-o", "json"]));
    assert_eq!(value["status"]["entrance"], "completed");
    assert_eq!(value["status"]["live_loops"], 5);
    assert_eq!(value["status"]["live_splits"], 0);
}

#[test]
fn test_simulate_with_resize() {
    let value = stdout_json(hero().args([
        "simulate",
        "--duration",
        "2",
        "--resize",
        "1:700x600",
        "-o",
        "json",
    ]));
    assert_eq!(value["status"]["marquee_rebuilds"], 2);
    assert_eq!(value["status"]["live_loops"], 7);
    assert_eq!(value["scene"]["rows"].as_array().unwrap().len(), 7);
}

#[rstest]
#[case("800x600")]
#[case("1:800")]
#[case("soon:800x600")]
fn test_simulate_rejects_bad_resize(#[case] resize: &str) {
    hero()
        .args(["simulate", "--resize", resize])
        .assert()
        .failure();
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("hero.json");
    fs::write(&config, r#"{ "content": { "vocabulary": ["ship", "build"] } }"#).unwrap();

    let value = stdout_json(hero().arg("--config").arg(&config).args(["rows", "-o", "json"]));
    assert_eq!(value[0]["text"], "ship • build");
    assert_eq!(value[1]["text"], "build • ship");
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("hero.json");
    fs::write(&config, "{ not json").unwrap();

    hero().arg("--config").arg(&config).arg("layout").assert().failure();
    hero()
        .arg("--config")
        .arg(temp_dir.path().join("missing.json"))
        .arg("layout")
        .assert()
        .failure();
}
