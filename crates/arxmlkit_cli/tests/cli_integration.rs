//! Integration tests for the arxml2xlsx CLI

use std::fs;
use std::process::Command;

use calamine::{Reader, Xlsx, open_workbook};
use tempfile::TempDir;

const C_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AUTOSAR>
  <AR-PACKAGES>
    <AR-PACKAGE><SHORT-NAME>Alpha</SHORT-NAME></AR-PACKAGE>
    <AR-PACKAGE><ELEMENTS/></AR-PACKAGE>
    <AR-PACKAGE>
      <SHORT-NAME>Beta</SHORT-NAME>
      <ELEMENTS><I-SIGNAL><SHORT-NAME>S</SHORT-NAME></I-SIGNAL></ELEMENTS>
    </AR-PACKAGE>
  </AR-PACKAGES>
</AUTOSAR>
"#;

fn run_arxml2xlsx(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_arxml2xlsx"))
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn setup_input() -> (TempDir, String) {
    let dir = TempDir::new().expect("tempdir");
    let path_in = dir.path().join("model.arxml");
    fs::write(&path_in, C_DOC).expect("write input");
    let c_path_in = path_in.to_string_lossy().to_string();
    (dir, c_path_in)
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_arxml2xlsx(&["--help"]);

    assert!(success);
    assert!(stdout.contains("arxml2xlsx"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--no-overwrite"));
    assert!(stdout.contains("--quiet"));
}

#[test]
fn test_cli_converts_next_to_input() {
    let (dir, c_path_in) = setup_input();
    let (stdout, stderr, success) = run_arxml2xlsx(&[&c_path_in, "-o", "model.xlsx"]);

    assert!(success, "stderr: {stderr}");
    assert!(stdout.contains("Sheet 'Alpha' written: 1 rows, 5 columns."));
    assert!(stdout.contains("Sheet 'Beta' written: 3 rows, 7 columns."));
    assert!(stdout.contains("[ARXML] units=3 tables=2 rows=4 skipped=1 warnings=1"));
    assert!(stderr.contains("Skipped an AR-PACKAGE without SHORT-NAME."));

    let path_out = dir.path().join("model.xlsx");
    let workbook: Xlsx<_> = open_workbook(&path_out).expect("open workbook");
    assert_eq!(workbook.sheet_names().to_vec(), vec!["Alpha", "Beta"]);
}

#[test]
fn test_cli_quiet_prints_no_progress() {
    let (_dir, c_path_in) = setup_input();
    let (stdout, stderr, success) = run_arxml2xlsx(&[&c_path_in, "-o", "quiet.xlsx", "-q"]);

    assert!(success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("warning:"));
}

#[test]
fn test_cli_no_overwrite_fails_on_existing_output() {
    let (dir, c_path_in) = setup_input();
    let path_out = dir.path().join("exists.xlsx");
    fs::write(&path_out, b"keep").expect("seed output");

    let (_, stderr, success) =
        run_arxml2xlsx(&[&c_path_in, "-o", "exists.xlsx", "--no-overwrite"]);

    assert!(!success);
    assert!(stderr.contains("already exists"));
    assert_eq!(fs::read(&path_out).expect("read"), b"keep");
}

#[test]
fn test_cli_missing_input_fails() {
    let dir = TempDir::new().expect("tempdir");
    let c_path_in = dir.path().join("missing.arxml").to_string_lossy().to_string();
    let (_, stderr, success) = run_arxml2xlsx(&[&c_path_in, "-o", "out.xlsx"]);

    assert!(!success);
    assert!(stderr.contains("Input file not found"));
}
