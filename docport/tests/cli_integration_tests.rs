// docport/tests/cli_integration_tests.rs
//! Command-line integration tests for the `docport` binary.
//!
//! Each test runs the real executable through `assert_cmd`, feeding input on
//! stdin or from a `tempfile`, and asserts on stdout, stderr and the exit
//! status. `HOME` is pointed at an empty temp directory so a developer's own
//! `~/.docport/config.yaml` never leaks into the results, and ANSI escapes are
//! stripped before comparing terminal output.

use anyhow::Result;
#[allow(unused_imports)]
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[allow(unused_imports)]
use assert_cmd::prelude::*;
use assert_cmd::Command;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

/// Builds a `docport` command isolated from any user configuration.
fn docport_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docport").unwrap();
    cmd.env("HOME", home.path());
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd.env_remove("DOCPORT_CONFIG");
    cmd.env("RUST_LOG", "debug");
    cmd
}

/// Runs `docport` with `input` on stdin and returns the assertion handle.
fn run_docport(input: &str, args: &[&str]) -> (assert_cmd::assert::Assert, TempDir) {
    let home = TempDir::new().unwrap();
    let mut cmd = docport_command(&home);
    cmd.args(args);
    cmd.write_stdin(input.as_bytes());
    (cmd.assert(), home)
}

fn strip_ansi(s: &str) -> String {
    let cleaned = strip_ansi_escapes_fn(s);
    String::from_utf8_lossy(&cleaned).to_string()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    eprintln!("STDOUT:\n{}", stdout);
    eprintln!("STDERR:\n{}", String::from_utf8_lossy(&assert.get_output().stderr));
    strip_ansi(&stdout)
}

fn write_temp(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn test_normalize_from_stdin() {
    let (assert, _home) = run_docport("A:主訴 | B:右下腹部痛\n既往歴\n虫垂炎にて手術", &["normalize"]);
    let assert = assert.success();
    assert_eq!(stdout_of(&assert), "主訴: 右下腹部痛\n既往歴: 虫垂炎にて手術\n");
}

#[test]
fn test_normalize_from_input_file() -> Result<()> {
    let input = write_temp("紹介目的\r\n精査加療のお願い\r\n\r\n\r\n\r\n以上\r\n")?;
    let (assert, _home) = run_docport("", &["normalize", "-i", input.path().to_str().unwrap()]);
    let assert = assert.success();
    assert_eq!(stdout_of(&assert), "紹介目的: 精査加療のお願い\n\n以上\n");
    Ok(())
}

#[test]
fn test_normalize_trace_goes_to_stderr() -> Result<()> {
    let (assert, _home) = run_docport("主訴\n右下腹部痛", &["--quiet", "normalize", "--trace"]);
    let assert = assert.success();
    assert_eq!(stdout_of(&assert), "主訴: 右下腹部痛\n");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    let trace: serde_json::Value = serde_json::from_str(&stderr)?;
    assert_eq!(trace["joins"][0]["heading"], "主訴");
    assert_eq!(trace["heading_candidates"][0]["in_vocabulary"], true);
    Ok(())
}

#[test]
fn test_scan_prints_advisory_summary() {
    let (assert, _home) = run_docport("HIV陽性。入院歴あり", &["scan"]);
    let stdout = stdout_of(&assert.success());
    assert!(stdout.contains("[high] 感染症に関する記載の可能性 (infectious_disease: 1 evidence)"));
    assert!(stdout.contains("[low] 治療・投薬に関する記載の可能性 (treatment: 1 evidence)"));
    assert!(stdout.contains("p.1 [HIV] HIV陽性。入院歴あり"));
    assert!(stdout.contains("These are possibilities only."));
}

#[test]
fn test_scan_without_matches_is_still_advisory() {
    let (assert, _home) = run_docport("主訴: 右下腹部痛", &["scan"]);
    let stdout = stdout_of(&assert.success());
    assert!(stdout.contains("No configured keywords found."));
    assert!(stdout.contains("does not guarantee"));
}

#[test]
fn test_scan_json_output() -> Result<()> {
    let (assert, _home) = run_docport("HIV陽性。入院歴あり", &["scan", "--json"]);
    let alerts: serde_json::Value = serde_json::from_str(&stdout_of(&assert.success()))?;
    let ids: Vec<&str> = alerts.as_array().unwrap().iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["infectious_disease", "treatment"]);
    assert_eq!(alerts[0]["severity"], "high");
    assert_eq!(alerts[0]["evidence"][0]["page"], 1);
    Ok(())
}

#[test]
fn test_scan_disable_rule() -> Result<()> {
    let (assert, _home) = run_docport("HIV陽性。入院歴あり", &["scan", "--json", "--disable", "infectious_disease"]);
    let alerts: serde_json::Value = serde_json::from_str(&stdout_of(&assert.success()))?;
    assert_eq!(alerts.as_array().unwrap().len(), 1);
    assert_eq!(alerts[0]["id"], "treatment");
    Ok(())
}

#[test]
fn test_scan_no_normalize_scans_raw_text() -> Result<()> {
    // The raw cell row keeps its prefixes, so the snippet shows them.
    let (assert, _home) = run_docport("A:既往 | B:結核", &["scan", "--json", "--no-normalize"]);
    let alerts: serde_json::Value = serde_json::from_str(&stdout_of(&assert.success()))?;
    assert_eq!(alerts[0]["evidence"][0]["snippet"], "A:既往 | B:結核");
    Ok(())
}

#[test]
fn test_intake_report_json() -> Result<()> {
    let input = write_temp("主訴\n右下腹部痛\n既往: 結核")?;
    let path = input.path().to_str().unwrap().to_string();
    let (assert, _home) = run_docport(
        "",
        &["intake", "-i", &path, "--pages", "2", "--warning", "2ページ目のOCRに失敗しました。"],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout_of(&assert.success()))?;

    assert_eq!(report["text"], "主訴: 右下腹部痛\n既往: 結核");
    assert_eq!(report["text_normalized"], report["text"]);
    assert_eq!(report["meta"]["page_count"], 2);
    assert_eq!(report["meta"]["source_id"], path.as_str());
    assert_eq!(report["meta"]["truncated"], false);
    assert!(report["structured"].is_null());
    assert!(report.get("debug").is_none());

    let warnings: Vec<&str> = report["warnings"].as_array().unwrap().iter().map(|w| w.as_str().unwrap()).collect();
    assert_eq!(warnings[0], "2ページ目のOCRに失敗しました。");
    assert!(warnings[1].contains("結核"));
    assert_eq!(report["alerts"][0]["id"], "infectious_disease");
    Ok(())
}

#[test]
fn test_intake_empty_input_warns() -> Result<()> {
    let (assert, _home) = run_docport("", &["intake", "--trace"]);
    let report: serde_json::Value = serde_json::from_str(&stdout_of(&assert.success()))?;
    assert_eq!(report["text"], "");
    assert!(report["warnings"][0].as_str().unwrap().contains("テキストを抽出できませんでした"));
    assert!(report["alerts"].as_array().unwrap().is_empty());
    assert!(report["debug"].is_object());
    Ok(())
}

#[test]
fn test_highlight_marks_keywords_without_a_terminal() {
    let (assert, _home) = run_docport("既往: HIV", &["highlight"]);
    assert_eq!(stdout_of(&assert.success()), "既往: [[HIV]]\n");
}

#[test]
fn test_custom_config_extends_vocabulary_and_rules() -> Result<()> {
    let config = write_temp(
        r#"
heading_vocabulary: [紹介状要旨]
alert_rules:
  - id: genetic
    label: 遺伝情報に関する記載の可能性
    severity: high
    keywords: [遺伝性]
"#,
    )?;
    let config_path = config.path().to_str().unwrap();

    let (assert, _home) = run_docport("紹介状要旨\n精査のお願い", &["normalize", "--config", config_path]);
    assert_eq!(stdout_of(&assert.success()), "紹介状要旨: 精査のお願い\n");

    let (assert, _home) = run_docport("遺伝性疾患の家族歴", &["scan", "--json", "-c", config_path]);
    let alerts: serde_json::Value = serde_json::from_str(&stdout_of(&assert.success()))?;
    assert_eq!(alerts[0]["id"], "genetic");
    Ok(())
}

#[test]
fn test_config_from_environment_variable() -> Result<()> {
    let config = write_temp("heading_vocabulary: [紹介状要旨]\n")?;
    let home = TempDir::new()?;
    let mut cmd = docport_command(&home);
    cmd.env("DOCPORT_CONFIG", config.path());
    cmd.args(["normalize"]);
    cmd.write_stdin("紹介状要旨\n精査のお願い".as_bytes());
    let assert = cmd.assert().success();
    assert_eq!(stdout_of(&assert), "紹介状要旨: 精査のお願い\n");
    Ok(())
}

#[test]
fn test_user_config_in_home_is_picked_up() -> Result<()> {
    let home = TempDir::new()?;
    std::fs::create_dir_all(home.path().join(".docport"))?;
    std::fs::write(home.path().join(".docport").join("config.yaml"), "heading_vocabulary: [紹介状要旨]\n")?;

    let mut cmd = docport_command(&home);
    cmd.args(["normalize"]);
    cmd.write_stdin("紹介状要旨\n精査のお願い".as_bytes());
    let assert = cmd.assert().success();
    assert_eq!(stdout_of(&assert), "紹介状要旨: 精査のお願い\n");
    Ok(())
}

#[test]
fn test_missing_input_file_fails() {
    let (assert, _home) = run_docport("", &["normalize", "-i", "/nonexistent/letter.txt"]);
    assert
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let config = write_temp(
        r#"
alert_rules:
  - id: broken
    label: broken
    severity: extreme
    keywords: [x]
"#,
    )?;
    let (assert, _home) = run_docport("主訴\n腹痛", &["scan", "--config", config.path().to_str().unwrap()]);
    assert.failure().stderr(predicate::str::contains("Failed to parse intake configuration"));
    Ok(())
}

#[test]
fn test_no_subcommand_prints_help() {
    let (assert, _home) = run_docport("", &[]);
    assert.failure().stderr(predicate::str::contains("Usage"));
}
